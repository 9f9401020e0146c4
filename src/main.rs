//! `velac`'s binary entry point: wires the library's core passes to file
//! I/O, logging, and the external assembler/linker. Per `spec.md` §7, this
//! is the single place that prints an error and calls `std::process::exit`
//! — every pass function below returns `Result` and is driven with `?`.

use std::io::Write as _;

use clap::Parser;
use velac::cli::Args;
use velac::context::PipelineContext;
use velac::emit::render;
use velac::error::CompileError;
use velac::report::PassReport;

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(err) = run(&args) {
        eprintln!("velac: {err}");
        std::process::exit(err.stage().exit_code());
    }
}

fn init_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(args.log_level());

    if let Some(path) = &args.log_file {
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("velac: could not open log file {}: {e}", path.display());
            }
        }
    }

    builder.init();
}

fn run(args: &Args) -> Result<(), CompileError> {
    let ctx = PipelineContext::new();
    let output = ctx.compile_file(&args.input)?;

    if let Some(report_path) = &args.report {
        write_report(&output, report_path)?;
    }

    let asm_text = render(&output.emit);
    let asm_path = args.asm_path();
    std::fs::write(&asm_path, &asm_text)
        .map_err(|e| CompileError::io(format!("writing {}: {e}", asm_path.display())))?;

    if args.emit_asm {
        log::info!("wrote assembly to {}", asm_path.display());
        return Ok(());
    }

    let output_path = args.output_path();
    velac::driver::assemble_and_link(&asm_path, &output_path)?;
    log::info!("wrote executable to {}", output_path.display());

    if !args.keep_asm {
        let _ = std::fs::remove_file(&asm_path);
        let _ = std::fs::remove_file(asm_path.with_extension("o"));
    }

    Ok(())
}

fn write_report(
    output: &velac::context::CompileOutput,
    path: &std::path::Path,
) -> Result<(), CompileError> {
    let report = PassReport::from_output(output);
    let json = report
        .to_json()
        .map_err(|e| CompileError::io(format!("serializing report: {e}")))?;
    let mut file = std::fs::File::create(path)
        .map_err(|e| CompileError::io(format!("creating {}: {e}", path.display())))?;
    file.write_all(json.as_bytes())
        .map_err(|e| CompileError::io(format!("writing {}: {e}", path.display())))?;
    Ok(())
}

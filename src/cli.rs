//! The command-line argument surface.
//!
//! `spec.md` §1 places the CLI surface out of core scope, but a CLI surface
//! still has to exist for `velac` to be a runnable compiler, and ambient
//! concerns are carried regardless of what a Non-goal excludes. `clap`
//! derive is the pack's CLI crate of choice (`faxt`, `y-lang`).

use std::path::PathBuf;

use clap::Parser;

/// `velac` — compile a Vela source file to a native executable.
#[derive(Parser, Debug)]
#[command(name = "velac")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Vela source file to compile.
    pub input: PathBuf,

    /// Output executable path. Defaults to the input file's stem.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop after code generation and write the assembly listing instead
    /// of assembling and linking it.
    #[arg(short = 'S', long = "emit-asm")]
    pub emit_asm: bool,

    /// Keep the intermediate `.s` file after a full build.
    #[arg(long)]
    pub keep_asm: bool,

    /// Increase logging verbosity. Repeatable (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write a JSON pass-counter snapshot to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// The output executable path: `--output` if given, else the input
    /// file's stem in the current directory.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(
                self.input
                    .file_stem()
                    .map(|s| s.to_owned())
                    .unwrap_or_else(|| std::ffi::OsString::from("a.out")),
            )
        })
    }

    /// The path of the intermediate assembly file: the output path with a
    /// `.s` extension.
    pub fn asm_path(&self) -> PathBuf {
        self.output_path().with_extension("s")
    }

    /// `log`'s `LevelFilter` implied by the repeated `-v` flag: `Warn` by
    /// default, `Info`/`Debug`/`Trace` for one/two/three-or-more `-v`s.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

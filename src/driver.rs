//! External assembler/linker invocation.
//!
//! `spec.md` §4.6/§6 abstracts the assembler and linker as an external
//! collaborator: the emitted NASM-syntax text goes in, an object file and
//! then a native binary come out, and its exit code propagates. No crate in
//! the retrieved pack wraps process invocation for this scale of usage
//! (shelling out to two fixed external tools), so this is `std::process::
//! Command` directly — the same primitive `spec.md` §4.6 describes and
//! nothing more.

use std::path::Path;
use std::process::Command;

use crate::error::CompileError;

/// Assemble `asm_path` (NASM syntax, ELF64) into an object file next to it,
/// then link that object file into the executable at `output_path`.
pub fn assemble_and_link(asm_path: &Path, output_path: &Path) -> Result<(), CompileError> {
    let obj_path = asm_path.with_extension("o");

    run_tool(
        "nasm",
        &[
            "-f",
            "elf64",
            asm_path.to_str().ok_or_else(|| {
                CompileError::external(format!("non-UTF-8 path: {}", asm_path.display()))
            })?,
            "-o",
            obj_path.to_str().ok_or_else(|| {
                CompileError::external(format!("non-UTF-8 path: {}", obj_path.display()))
            })?,
        ],
    )?;

    run_tool(
        "ld",
        &[
            obj_path.to_str().unwrap(),
            "-o",
            output_path.to_str().ok_or_else(|| {
                CompileError::external(format!("non-UTF-8 path: {}", output_path.display()))
            })?,
        ],
    )
}

fn run_tool(program: &str, args: &[&str]) -> Result<(), CompileError> {
    log::debug!("invoking {program} {}", args.join(" "));
    let status = Command::new(program).args(args).status().map_err(|e| {
        CompileError::external(format!("failed to spawn {program}: {e}"))
    })?;

    if !status.success() {
        return Err(CompileError::external(format!(
            "{program} exited with {status}"
        )));
    }
    Ok(())
}

//! Pipeline orchestration.
//!
//! `spec.md` §9 calls for consolidating the original's process-wide globals
//! (`next_char`, `char_line`, `char_col`, `next_lexeme`, `ast_curr_lexeme`,
//! `asm_cmd_list`, `vars`, `strs`) into a single value threaded through the
//! passes. Each pass already owns its own local cursor/counter state (see
//! `cursor::Cursor`, `parser::Parser`, `emit::Emitter`) rather than reaching
//! into shared globals, so `PipelineContext` here is the one remaining
//! globally-threaded piece: the driver that owns the whole run and calls
//! preprocess → lex → parse → optimize → emit in order, handing every pass
//! its predecessor's output and nothing else (`spec.md` §5: "strictly
//! forward" data flow, no pass re-reads earlier output).

use std::path::Path;

use crate::emit::{self, EmitResult};
use crate::error::CompileError;
use crate::lexer::{self, token::Token};
use crate::optimize;
use crate::parser::{self, ast::AstNode};
use crate::preprocess;

/// Everything produced by one run of the pipeline, kept around so the
/// shell (CLI, report sink) can inspect intermediate stages without
/// re-running them.
pub struct CompileOutput {
    pub tokens: Vec<Token>,
    pub ast_before_optimize: Option<AstNode>,
    pub ast: Option<AstNode>,
    pub emit: EmitResult,
}

/// Owns one compilation run. Stateless between runs — there is nothing in
/// `spec.md` §5's concurrency model that needs to survive from one
/// `compile_*` call to the next, so this holds no fields today, only the
/// methods that sequence the passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PipelineContext;

impl PipelineContext {
    pub fn new() -> Self {
        Self
    }

    /// Run preprocess → lex → parse → optimize → emit over the source file
    /// at `path`.
    pub fn compile_file(&self, path: &Path) -> Result<CompileOutput, CompileError> {
        log::debug!("preprocessing {}", path.display());
        let source = preprocess::preprocess(path)?;
        self.compile_source(&source)
    }

    /// Run lex → parse → optimize → emit over already-preprocessed source
    /// text. Split out from [`Self::compile_file`] so tests and the report
    /// sink can drive the pipeline over in-memory strings.
    pub fn compile_source(&self, source: &str) -> Result<CompileOutput, CompileError> {
        let tokens = lexer::tokenize(source)?;
        log::debug!("lexed {} tokens", tokens.len());

        let ast = parser::parse(&tokens)?;
        log::debug!("parsed {} node(s)", node_count(&ast));

        let optimized = optimize::optimize(ast.clone());
        log::debug!(
            "optimized {} node(s) -> {} node(s)",
            node_count(&ast),
            node_count(&optimized)
        );

        let emitted = emit::emit(optimized.as_ref())?;
        log::debug!("emitted {} instruction(s)", emitted.instrs.len());

        Ok(CompileOutput {
            tokens,
            ast_before_optimize: ast,
            ast: optimized,
            emit: emitted,
        })
    }
}

/// Count nodes in an AST for logging/reporting purposes only — not a pass,
/// so it lives alongside the orchestrator rather than in `parser`/`optimize`.
fn node_count(node: &Option<AstNode>) -> usize {
    fn count(node: &AstNode) -> usize {
        use AstNode::*;
        1 + match node {
            Ident(_) | Integer(_) | Str(_) => 0,
            Add(l, r) | Sub(l, r) | Mul(l, r) | Div(l, r) | Mod(l, r) | Eq(l, r) | Neq(l, r)
            | Lss(l, r) | Gtr(l, r) | Leq(l, r) | Geq(l, r) | And(l, r) | Or(l, r)
            | Assign(l, r) => count(l) + count(r),
            Not(inner) | Negate(inner) | Prts(inner) | Prti(inner) | Input(inner) => {
                count(inner)
            }
            If(a, b) => opt_count(a) + opt_count(b),
            While(cond, body) => count(cond) + opt_count(body),
            Sequence(a, b) => opt_count(a) + opt_count(b),
        }
    }
    fn opt_count(node: &Option<Box<AstNode>>) -> usize {
        node.as_deref().map(count).unwrap_or(0)
    }
    node.as_ref().map(count).unwrap_or(0)
}

//! The report sink: a JSON snapshot of per-pass counters.
//!
//! `spec.md` §4.6 abstracts a "report sink" that receives snapshots after
//! each pass (token list, AST graph, assembly listing); §1 explicitly
//! excludes the HTML/CSS/mermaid rendering of that report from core scope.
//! This keeps the one sliver worth carrying into a real repo: a thin,
//! optional, machine-readable counters snapshot, written with
//! `serde`/`serde_json` (the pack's serialization crates — `fgc`, `faxt`).
//! It never gates pipeline success; a failed `--report` write is logged,
//! not fatal.

use serde::Serialize;

use crate::context::CompileOutput;

#[derive(Debug, Serialize)]
pub struct PassReport {
    pub tokens_lexed: usize,
    pub ast_nodes_before_optimize: usize,
    pub ast_nodes_after_optimize: usize,
    pub instructions_emitted: usize,
    pub identifiers_interned: usize,
    pub strings_interned: usize,
}

impl PassReport {
    pub fn from_output(output: &CompileOutput) -> Self {
        Self {
            tokens_lexed: output.tokens.len(),
            ast_nodes_before_optimize: count_nodes(&output.ast_before_optimize),
            ast_nodes_after_optimize: count_nodes(&output.ast),
            instructions_emitted: output.emit.instrs.len(),
            identifiers_interned: output.emit.identifiers.len(),
            strings_interned: output.emit.strings.len(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn count_nodes(node: &Option<crate::parser::ast::AstNode>) -> usize {
    use crate::parser::ast::AstNode::*;

    fn count(node: &crate::parser::ast::AstNode) -> usize {
        1 + match node {
            Ident(_) | Integer(_) | Str(_) => 0,
            Add(l, r) | Sub(l, r) | Mul(l, r) | Div(l, r) | Mod(l, r) | Eq(l, r) | Neq(l, r)
            | Lss(l, r) | Gtr(l, r) | Leq(l, r) | Geq(l, r) | And(l, r) | Or(l, r)
            | Assign(l, r) => count(l) + count(r),
            Not(inner) | Negate(inner) | Prts(inner) | Prti(inner) | Input(inner) => {
                count(inner)
            }
            If(a, b) => opt(a) + opt(b),
            While(cond, body) => count(cond) + opt(body),
            Sequence(a, b) => opt(a) + opt(b),
        }
    }
    fn opt(node: &Option<Box<crate::parser::ast::AstNode>>) -> usize {
        node.as_deref().map(count).unwrap_or(0)
    }
    node.as_ref().map(count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PipelineContext;

    #[test]
    fn report_counts_match_a_small_program() {
        let ctx = PipelineContext::new();
        let output = ctx.compile_source("x = 1 + 2; print(x);").unwrap();
        let report = PassReport::from_output(&output);
        assert_eq!(report.tokens_lexed, output.tokens.len());
        assert_eq!(report.instructions_emitted, output.emit.instrs.len());
        assert!(report.ast_nodes_after_optimize <= report.ast_nodes_before_optimize);
    }

    #[test]
    fn report_serializes_to_json() {
        let ctx = PipelineContext::new();
        let output = ctx.compile_source("x = 1;").unwrap();
        let report = PassReport::from_output(&output);
        let json = report.to_json().unwrap();
        assert!(json.contains("tokens_lexed"));
    }
}

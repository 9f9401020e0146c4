//! # velac
//!
//! A compiler for Vela, a small imperative language with integer/string
//! variables, arithmetic and boolean expressions, `if`/`else`, `while`,
//! `print`, `input`, and block scoping. `velac` translates Vela source into
//! a native x86-64 executable via a textual, NASM-compatible assembly
//! intermediate form:
//!
//! ```text
//! preprocess -> lex -> parse + optimize -> emit -> (nasm -> ld)
//! ```
//!
//! ## Pipeline
//!
//! The four core passes are each their own module:
//!
//! 1. [`preprocess`] — comment stripping and `#include` splicing
//! 2. [`lexer`] — tokenizes preprocessed source into a [`lexer::token::Token`] sequence
//! 3. [`parser`] — builds an [`parser::ast::AstNode`] tree via precedence climbing + recursive descent
//! 4. [`optimize`] — rewrites away the degenerate `Sequence`/`If` nodes the parser produces
//! 5. [`emit`] — walks the optimized tree into an ordered [`emit::Instr`] list
//!
//! [`context::PipelineContext`] drives all five in sequence. The ambient
//! modules ([`cli`], [`report`], [`driver`]) are the shell that wraps the
//! core passes into a runnable binary; they are peripheral per `spec.md`
//! §1 but still implemented as a complete stack rather than left as bare
//! `std::process`/`println!` calls.
//!
//! ## Example
//!
//! ```rust
//! use velac::context::PipelineContext;
//!
//! let ctx = PipelineContext::new();
//! let output = ctx.compile_source("x = 1 + 2; print(x);").unwrap();
//! assert!(!output.emit.instrs.is_empty());
//! ```

pub mod cli;
pub mod context;
pub mod cursor;
pub mod driver;
pub mod emit;
pub mod error;
pub mod lexer;
pub mod optimize;
pub mod parser;
pub mod preprocess;
pub mod report;

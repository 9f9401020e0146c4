//! The abstract syntax tree built by the parser and rewritten by the
//! optimizer, per `spec.md` §3.
//!
//! Every node kind gets its own variant with exactly the children it can
//! have, rather than a single generic "binary tree node" struct with two
//! nullable child pointers and a payload union (the original's C shape).
//! `Sequence`, `If`, and `While`'s body keep an `Option<Box<AstNode>>`
//! child where `spec.md` allows "absent"; every other multi-child node
//! always has both children, enforced at the type level instead of by
//! convention (invariant (c)). `Prts`/`Prti`/`Input` drop the spec's literal
//! "second child is always null" slot entirely, since in this encoding that
//! slot never carries information.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Leaves
    Ident(String),
    Integer(i64),
    Str(String),

    // Binary arithmetic
    Add(Box<AstNode>, Box<AstNode>),
    Sub(Box<AstNode>, Box<AstNode>),
    Mul(Box<AstNode>, Box<AstNode>),
    Div(Box<AstNode>, Box<AstNode>),
    Mod(Box<AstNode>, Box<AstNode>),

    // Comparisons
    Eq(Box<AstNode>, Box<AstNode>),
    Neq(Box<AstNode>, Box<AstNode>),
    Lss(Box<AstNode>, Box<AstNode>),
    Gtr(Box<AstNode>, Box<AstNode>),
    Leq(Box<AstNode>, Box<AstNode>),
    Geq(Box<AstNode>, Box<AstNode>),

    // Logicals
    And(Box<AstNode>, Box<AstNode>),
    Or(Box<AstNode>, Box<AstNode>),

    // Unary
    Not(Box<AstNode>),
    Negate(Box<AstNode>),

    // Statement shapes
    Assign(Box<AstNode>, Box<AstNode>),
    /// `(cond, then_and_else)`: the outer `If` always has both children;
    /// the inner `If` it wraps may have either child absent. See
    /// `spec.md` §3/§4.3.
    If(Option<Box<AstNode>>, Option<Box<AstNode>>),
    While(Box<AstNode>, Option<Box<AstNode>>),
    Sequence(Option<Box<AstNode>>, Option<Box<AstNode>>),
    Prts(Box<AstNode>),
    Prti(Box<AstNode>),
    Input(Box<AstNode>),
}

impl AstNode {
    pub fn sequence(prev: Option<AstNode>, next: Option<AstNode>) -> AstNode {
        AstNode::Sequence(prev.map(Box::new), next.map(Box::new))
    }
}

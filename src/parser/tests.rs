use super::ast::AstNode;
use super::parse;
use crate::error::CompileError;
use crate::lexer::tokenize;

fn ast(source: &str) -> Option<AstNode> {
    let tokens = tokenize(source).expect("lex failed");
    parse(&tokens).expect("parse failed")
}

fn parse_err(source: &str) -> CompileError {
    let tokens = tokenize(source).expect("lex failed");
    parse(&tokens).expect_err("expected a parse error")
}

#[test]
fn empty_source_parses_to_none() {
    assert_eq!(ast(""), None);
}

#[test]
fn semicolons_only_parses_to_none() {
    assert_eq!(ast(";;;"), None);
}

#[test]
fn simple_assignment() {
    assert_eq!(
        ast("x = 1;"),
        Some(AstNode::sequence(
            None,
            Some(AstNode::Assign(
                Box::new(AstNode::Ident("x".into())),
                Box::new(AstNode::Integer(1)),
            )),
        ))
    );
}

#[test]
fn precedence_tighter_op_binds_first_on_the_right() {
    // a + b * c  ==  a + (b * c)
    let expr = match ast("x = a + b * c;").unwrap() {
        AstNode::Sequence(_, Some(rhs)) => match *rhs {
            AstNode::Assign(_, value) => *value,
            other => panic!("expected Assign, got {other:?}"),
        },
        other => panic!("expected Sequence, got {other:?}"),
    };
    assert_eq!(
        expr,
        AstNode::Add(
            Box::new(AstNode::Ident("a".into())),
            Box::new(AstNode::Mul(
                Box::new(AstNode::Ident("b".into())),
                Box::new(AstNode::Ident("c".into())),
            )),
        )
    );
}

#[test]
fn precedence_tighter_op_binds_first_on_the_left() {
    // a * b + c  ==  (a * b) + c
    let expr = match ast("x = a * b + c;").unwrap() {
        AstNode::Sequence(_, Some(rhs)) => match *rhs {
            AstNode::Assign(_, value) => *value,
            other => panic!("expected Assign, got {other:?}"),
        },
        other => panic!("expected Sequence, got {other:?}"),
    };
    assert_eq!(
        expr,
        AstNode::Add(
            Box::new(AstNode::Mul(
                Box::new(AstNode::Ident("a".into())),
                Box::new(AstNode::Ident("b".into())),
            )),
            Box::new(AstNode::Ident("c".into())),
        )
    );
}

#[test]
fn binary_operators_left_associate() {
    // a - b - c  ==  (a - b) - c
    let expr = match ast("x = a - b - c;").unwrap() {
        AstNode::Sequence(_, Some(rhs)) => match *rhs {
            AstNode::Assign(_, value) => *value,
            other => panic!("expected Assign, got {other:?}"),
        },
        other => panic!("expected Sequence, got {other:?}"),
    };
    assert_eq!(
        expr,
        AstNode::Sub(
            Box::new(AstNode::Sub(
                Box::new(AstNode::Ident("a".into())),
                Box::new(AstNode::Ident("b".into())),
            )),
            Box::new(AstNode::Ident("c".into())),
        )
    );
}

#[test]
fn unary_not_and_negate() {
    let expr = match ast("x = !-y;").unwrap() {
        AstNode::Sequence(_, Some(rhs)) => match *rhs {
            AstNode::Assign(_, value) => *value,
            other => panic!("expected Assign, got {other:?}"),
        },
        other => panic!("expected Sequence, got {other:?}"),
    };
    assert_eq!(
        expr,
        AstNode::Not(Box::new(AstNode::Negate(Box::new(AstNode::Ident(
            "y".into()
        )))))
    );
}

#[test]
fn leading_unary_plus_is_transparent() {
    let expr = match ast("x = +1;").unwrap() {
        AstNode::Sequence(_, Some(rhs)) => match *rhs {
            AstNode::Assign(_, value) => *value,
            other => panic!("expected Assign, got {other:?}"),
        },
        other => panic!("expected Sequence, got {other:?}"),
    };
    assert_eq!(expr, AstNode::Integer(1));
}

#[test]
fn parenthesised_expression_overrides_precedence() {
    // (a + b) * c
    let expr = match ast("x = (a + b) * c;").unwrap() {
        AstNode::Sequence(_, Some(rhs)) => match *rhs {
            AstNode::Assign(_, value) => *value,
            other => panic!("expected Assign, got {other:?}"),
        },
        other => panic!("expected Sequence, got {other:?}"),
    };
    assert_eq!(
        expr,
        AstNode::Mul(
            Box::new(AstNode::Add(
                Box::new(AstNode::Ident("a".into())),
                Box::new(AstNode::Ident("b".into())),
            )),
            Box::new(AstNode::Ident("c".into())),
        )
    );
}

#[test]
fn if_without_else_wraps_inner_if_with_null_else() {
    let root = ast("if (x) { y = 1; }").unwrap();
    let AstNode::If(cond, then_else) = root else {
        panic!("expected If, got {root:?}");
    };
    assert_eq!(*cond.unwrap(), AstNode::Ident("x".into()));
    let AstNode::If(then_branch, else_branch) = *then_else.unwrap() else {
        panic!("expected inner If wrapper");
    };
    assert!(then_branch.is_some());
    assert!(else_branch.is_none());
}

#[test]
fn if_with_else_carries_both_branches() {
    let root = ast("if (x) { y = 1; } else { y = 2; }").unwrap();
    let AstNode::If(_, then_else) = root else {
        panic!("expected If");
    };
    let AstNode::If(then_branch, else_branch) = *then_else.unwrap() else {
        panic!("expected inner If wrapper");
    };
    assert!(then_branch.is_some());
    assert!(else_branch.is_some());
}

#[test]
fn while_loop_shape() {
    let root = ast("while (x) { x = x - 1; }").unwrap();
    let AstNode::While(cond, body) = root else {
        panic!("expected While, got {root:?}");
    };
    assert_eq!(*cond, AstNode::Ident("x".into()));
    assert!(body.is_some());
}

#[test]
fn while_with_empty_body_has_null_body() {
    let root = ast("while (x) ;").unwrap();
    let AstNode::While(_, body) = root else {
        panic!("expected While, got {root:?}");
    };
    assert!(body.is_none());
}

#[test]
fn print_string_literal() {
    let root = ast("print(\"hi\");").unwrap();
    assert_eq!(root, AstNode::Prts(Box::new(AstNode::Str("hi".into()))));
}

#[test]
fn print_expression() {
    let root = ast("print(1 + 2);").unwrap();
    assert_eq!(
        root,
        AstNode::Prti(Box::new(AstNode::Add(
            Box::new(AstNode::Integer(1)),
            Box::new(AstNode::Integer(2)),
        )))
    );
}

#[test]
fn print_mixed_items_chain_as_sequence() {
    let root = ast("print(\"hi\", 1+2);").unwrap();
    assert_eq!(
        root,
        AstNode::sequence(
            Some(AstNode::Prts(Box::new(AstNode::Str("hi".into())))),
            Some(AstNode::Prti(Box::new(AstNode::Add(
                Box::new(AstNode::Integer(1)),
                Box::new(AstNode::Integer(2)),
            )))),
        )
    );
}

#[test]
fn input_as_assignment_rhs_is_accepted() {
    let root = ast("x = input(\"n=\");").unwrap();
    assert_eq!(
        root,
        AstNode::sequence(
            None,
            Some(AstNode::Assign(
                Box::new(AstNode::Ident("x".into())),
                Box::new(AstNode::sequence(
                    Some(AstNode::Input(Box::new(AstNode::Str("n=".into())))),
                    None,
                )),
            )),
        )
    );
}

#[test]
fn input_outside_assignment_is_a_parse_error() {
    let err = parse_err("print(input(\"n=\"));");
    assert!(matches!(err, CompileError::Parse { .. }));
}

#[test]
fn block_scoping_chains_statements() {
    let root = ast("{ x = 1; y = 2; }").unwrap();
    assert_eq!(
        root,
        AstNode::sequence(
            Some(AstNode::Assign(
                Box::new(AstNode::Ident("x".into())),
                Box::new(AstNode::Integer(1)),
            )),
            Some(AstNode::Assign(
                Box::new(AstNode::Ident("y".into())),
                Box::new(AstNode::Integer(2)),
            )),
        )
    );
}

#[test]
fn missing_semicolon_is_a_parse_error() {
    let err = parse_err("x = 1");
    assert!(matches!(err, CompileError::Parse { .. }));
}

#[test]
fn dangling_else_attaches_to_nearest_if() {
    // if (a) if (b) x = 1; else x = 2;  -- else binds to the inner if
    let root = ast("if (a) if (b) x = 1; else x = 2;").unwrap();
    let AstNode::If(_, outer_then_else) = root else {
        panic!("expected outer If");
    };
    let AstNode::If(outer_then, outer_else) = *outer_then_else.unwrap() else {
        panic!("expected inner If wrapper");
    };
    assert!(outer_else.is_none());
    let AstNode::If(_, inner_then_else) = *outer_then.unwrap() else {
        panic!("expected nested If as outer's then branch");
    };
    let AstNode::If(_, inner_else) = *inner_then_else.unwrap() else {
        panic!("expected doubly-nested If wrapper");
    };
    assert!(inner_else.is_some());
}

#[test]
fn unexpected_statement_token_is_a_parse_error() {
    let err = parse_err(")");
    assert!(matches!(err, CompileError::Parse { .. }));
}

#[test]
fn unexpected_primary_token_is_a_parse_error() {
    let err = parse_err("x = ;");
    assert!(matches!(err, CompileError::Parse { .. }));
}

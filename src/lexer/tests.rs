use super::token::TokenKind::*;
use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![Eof]);
}

#[test]
fn single_char_punctuation() {
    assert_eq!(
        kinds("{}()/*%;,+-"),
        vec![Lbrace, Rbrace, Lparen, Rparen, Div, Mul, Mod, Semi, Comma, Add, Sub, Eof]
    );
}

#[test]
fn compound_operators_disambiguate() {
    assert_eq!(
        kinds("== != <= >= && || < > = !"),
        vec![Eq, Neq, Leq, Geq, And, Or, Lss, Gtr, Assign, Not, Eof]
    );
}

#[test]
fn lone_ampersand_or_pipe_is_illegal() {
    assert!(tokenize("&").is_err());
    assert!(tokenize("|").is_err());
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("if else while print input foo_bar"),
        vec![
            If,
            Else,
            While,
            Print,
            Input,
            Identifier("foo_bar".into()),
            Eof
        ]
    );
}

#[test]
fn integer_literal() {
    assert_eq!(kinds("12345"), vec![Integer(12345), Eof]);
}

#[test]
fn identifier_with_leading_digits_mix_is_still_an_identifier() {
    assert_eq!(kinds("123abc"), vec![Identifier("123abc".into()), Eof]);
}

#[test]
fn string_literal() {
    assert_eq!(kinds("\"hello\""), vec![String("hello".into()), Eof]);
}

#[test]
fn unterminated_string_is_an_error() {
    assert!(tokenize("\"oops").is_err());
    assert!(tokenize("\"oops\nmore\"").is_err());
}

#[test]
fn unrecognised_character_is_an_error() {
    assert!(tokenize("@").is_err());
}

#[test]
fn token_positions_track_line_and_column() {
    let tokens = tokenize("x\n  = 1;").unwrap();
    assert_eq!(tokens[0].span.line, 1);
    assert_eq!(tokens[0].span.col, 1);
    assert_eq!(tokens[1].span.line, 2);
    assert_eq!(tokens[1].span.col, 3);
}

#[test]
fn relexing_a_tokens_recorded_text_reproduces_it() {
    // §8 round-trip property: re-lexing each token's own symbol in
    // isolation yields an equal token kind.
    for src in ["+", "-", "*", "/", "%", "==", "!=", "<=", ">=", "&&", "||", "!", "="] {
        let again = tokenize(src).unwrap();
        assert_eq!(again.len(), 2); // token + Eof
        assert_eq!(again[0].kind.symbol(), src);
    }
}

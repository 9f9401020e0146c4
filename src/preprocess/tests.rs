use super::*;
use std::io::Write;

#[test]
fn strips_line_comment() {
    let out = strip_comments("x = 1; // set x\ny = 2;").unwrap();
    assert_eq!(out, "x = 1; \ny = 2;");
}

#[test]
fn strips_block_comment_preserving_newlines() {
    let out = strip_comments("x = 1; /* a\nb\nc */ y = 2;").unwrap();
    // two embedded newlines are preserved so `y = 2;` keeps its original line
    assert_eq!(out, "x = 1; \n\n y = 2;");
}

#[test]
fn unterminated_block_comment_is_an_error() {
    let err = strip_comments("x = 1; /* never closed").unwrap_err();
    assert!(matches!(err, CompileError::Preprocess { .. }));
}

#[test]
fn slash_not_starting_a_comment_passes_through() {
    let out = strip_comments("x = 10 / 2;").unwrap();
    assert_eq!(out, "x = 10 / 2;");
}

#[test]
fn splices_include_relative_to_source_dir() {
    let dir = tempfile::tempdir().unwrap();
    let inc_path = dir.path().join("inc.vela");
    std::fs::File::create(&inc_path)
        .unwrap()
        .write_all(b"y = 2;\n")
        .unwrap();

    let main_path = dir.path().join("main.vela");
    std::fs::File::create(&main_path)
        .unwrap()
        .write_all(b"#include \"inc.vela\"\nx = 1;\n")
        .unwrap();

    let out = preprocess(&main_path).unwrap();
    assert!(out.contains("y = 2;"));
    assert!(out.contains("x = 1;"));
}

#[test]
fn missing_include_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let main_path = dir.path().join("main.vela");
    std::fs::File::create(&main_path)
        .unwrap()
        .write_all(b"#include \"missing.vela\"\n")
        .unwrap();

    let err = preprocess(&main_path).unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }));
}

#[test]
fn directive_not_at_column_one_is_left_alone() {
    let out = splice_includes("  #include \"x.vela\"\n", Path::new(".")).unwrap();
    assert_eq!(out, "  #include \"x.vela\"\n");
}

//! Integration tests for the signature compiler public API.

use sigdb::writer::{from_json, to_json, to_text};
use sigdb::{compile, compile_file, CompileError, CompileOptions, Label, PatternToken};

const LIBRARY: &str = "\
==INITHEAP.OBJ==
InitHeap:
27 BD FF E8 AF BF 00 10 
0C ?? ?? ?? 00 00 00 00 
8F BF 00 10 
InitHeap2:
03 E0 00 08 27 BD 00 18 

==PRINTF.OBJ==
printf:
printf_impl:
?? ?? 04 3C 
";

fn lenient(source: &str) -> Vec<sigdb::SignatureRecord> {
    compile(source, CompileOptions::default()).unwrap()
}

#[test]
fn test_library_file() {
    let records = lenient(LIBRARY);
    assert_eq!(records.len(), 2);

    let heap = &records[0];
    assert_eq!(heap.name(), "INITHEAP.OBJ");
    assert_eq!(heap.pattern().len(), 28);
    assert_eq!(heap.pattern().wildcard_count(), 3);
    assert_eq!(
        heap.labels(),
        &[Label::new("InitHeap", 0), Label::new("InitHeap2", 20)]
    );

    let printf = &records[1];
    assert_eq!(
        printf.labels(),
        &[Label::new("printf", 0), Label::new("printf_impl", 0)]
    );
    assert_eq!(printf.pattern().tokens()[0], PatternToken::Wildcard);
    assert_eq!(printf.pattern().tokens()[3], PatternToken::Byte(0x3C));
}

#[test]
fn test_order_preserved_and_duplicates_kept() {
    let records = lenient("==B.OBJ==\n==A.OBJ==\n==B.OBJ==\n00 \n");
    let names: Vec<_> = records.iter().map(|r| r.name()).collect();
    assert_eq!(names, ["B.OBJ", "A.OBJ", "B.OBJ"]);
    assert!(records[0].pattern().is_empty());
    assert_eq!(records[2].pattern().len(), 1);
}

#[test]
fn test_degenerate_records() {
    let records = lenient("==A.OBJ==\n\n==B.OBJ==\nonly:\n");
    assert!(records[0].pattern().is_empty());
    assert!(records[0].labels().is_empty());
    assert!(records[1].pattern().is_empty());
    assert_eq!(records[1].labels(), &[Label::new("only", 0)]);
}

#[test]
fn test_wildcard_only_pattern() {
    let records = lenient("==W.OBJ==\n?? ?? ?? ?? \n");
    assert_eq!(records[0].pattern().len(), 4);
    assert_eq!(records[0].pattern().concrete_count(), 0);
    assert!(records[0].pattern().matches(&[1, 2, 3, 4]));
}

#[test]
fn test_junk_line_is_rechecked_as_header() {
    // The bad fragment ends A; the following label is outside any block and skipped.
    let records = lenient("==A.OBJ==\nf:\n00 1X \ng:\n11 \n==B.OBJ==\nh:\n22 \n");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].labels(), &[Label::new("f", 0)]);
    assert!(records[0].pattern().is_empty());
    assert_eq!(records[1].labels(), &[Label::new("h", 0)]);
}

#[test]
fn test_strict_mode_rejects_what_lenient_skips() {
    let source = "==A.OBJ==\nf:\n00 1X \n";
    assert_eq!(lenient(source).len(), 1);
    let err = compile(source, CompileOptions::strict()).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert!(matches!(err, CompileError::MalformedSignatureFragment { .. }));
}

#[test]
fn test_no_open_record_aborts() {
    let err = compile("00 11 \n==A.OBJ==\n", CompileOptions::default()).unwrap_err();
    assert!(matches!(err, CompileError::NoOpenRecord { line: 1 }));
}

#[test]
fn test_round_trips() {
    let records = lenient(LIBRARY);
    assert_eq!(lenient(&to_text(&records)), records);
    assert_eq!(from_json(&to_json(&records).unwrap()).unwrap(), records);
}

#[test]
fn test_compile_file() {
    let path = std::env::temp_dir().join(format!("sigdb-compile-{}.txt", std::process::id()));
    std::fs::write(&path, LIBRARY.replace('\n', "\r\n")).unwrap();
    let records = compile_file(&path, CompileOptions::default()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(records, lenient(LIBRARY));
}

#[test]
fn test_compile_file_rejects_invalid_utf8() {
    let path = std::env::temp_dir().join(format!("sigdb-utf8-{}.txt", std::process::id()));
    std::fs::write(&path, b"==A.OBJ==\n\xff\xfe\n").unwrap();
    let err = compile_file(&path, CompileOptions::default()).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err, CompileError::Utf8 { .. }));
}

#[test]
fn test_missing_file() {
    let err = compile_file(std::path::Path::new("/nonexistent/sigdb.txt"), CompileOptions::default()).unwrap_err();
    assert!(matches!(err, CompileError::Io(_)));
}

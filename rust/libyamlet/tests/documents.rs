//! End-to-end scenarios: parse documents, inspect trees, round-trip text.

use pretty_assertions::assert_eq;

use libyamlet::{parse, serialize, Category, Error, Kind, Node, SerializeConfig};

/// Config with scalar folding disabled, for byte-exact block scalars.
fn no_fold() -> SerializeConfig {
    SerializeConfig {
        scalar_max_length: 0,
        ..SerializeConfig::default()
    }
}

#[test]
fn test_simple_map() {
    let doc = parse("key: value\n").unwrap();
    assert_eq!(doc.kind(), Kind::Map);
    assert_eq!(doc.size(), 1);
    assert_eq!(doc["key"].as_str(), "value");

    let text = serialize(&doc, &SerializeConfig::default()).unwrap();
    assert_eq!(text, "key: value\n");
}

#[test]
fn test_nested_map() {
    let doc = parse("a:\n  b: 1\n  c: 2\n").unwrap();
    assert_eq!(doc["a"].kind(), Kind::Map);
    assert_eq!(doc["a"]["b"].as_str(), "1");
    assert_eq!(doc["a"]["c"].as_str(), "2");
}

#[test]
fn test_sequence_of_maps() {
    let doc = parse("- x: 1\n- x: 2\n").unwrap();
    assert_eq!(doc.kind(), Kind::Sequence);
    assert_eq!(doc.size(), 2);
    assert_eq!(doc[0]["x"].as_str(), "1");
    assert_eq!(doc[1]["x"].as_str(), "2");
}

#[test]
fn test_literal_block_scalar() {
    let doc = parse("text: |\n  line1\n  line2\n").unwrap();
    assert_eq!(doc["text"].as_str(), "line1\nline2\n");
}

#[test]
fn test_folded_block_scalar_with_strip() {
    let doc = parse("text: >-\n  a\n  b\n").unwrap();
    assert_eq!(doc["text"].as_str(), "a b");
}

#[test]
fn test_quoted_key_with_special_char() {
    let doc = parse("\"a:b\": v\n").unwrap();
    assert_eq!(doc["a:b"].as_str(), "v");

    let text = serialize(&doc, &SerializeConfig::default()).unwrap();
    assert_eq!(text, "\"a:b\": v\n");
}

#[test]
fn test_tab_indentation_fails() {
    let err = parse("a:\n\tb: 1\n").unwrap_err();
    assert!(matches!(err, Error::TabInOffset { line: 2, column: 1 }));
    assert_eq!(err.category(), Category::Parsing);
}

#[test]
fn test_empty_document() {
    let doc = parse("").unwrap();
    assert!(doc.is_none());
    assert_eq!(serialize(&doc, &SerializeConfig::default()).unwrap(), "");
}

#[test]
fn test_comment_only_document() {
    let doc = parse("# nothing here\n\n# nor here\n").unwrap();
    assert!(doc.is_none());
}

#[test]
fn test_scalar_root() {
    let doc = parse("just a value\n").unwrap();
    assert_eq!(doc.kind(), Kind::Scalar);
    assert_eq!(doc.as_str(), "just a value");
}

#[test]
fn test_sequence_root_of_scalars() {
    let doc = parse("- a\n- b\n- c\n").unwrap();
    assert_eq!(doc.size(), 3);
    assert_eq!(doc[2].as_str(), "c");
}

#[test]
fn test_document_start_discards_prefix() {
    let doc = parse("junk: 1\n---\nreal: 2\n").unwrap();
    assert_eq!(doc.size(), 1);
    assert_eq!(doc["real"].as_str(), "2");
    assert!(doc["junk"].is_none());
}

#[test]
fn test_document_end_stops_reading() {
    let doc = parse("a: 1\n...\nb: 2\n").unwrap();
    assert_eq!(doc.size(), 1);
    assert!(doc["b"].is_none());
}

#[test]
fn test_single_quoted_value_not_decoded() {
    let doc = parse("a: 'kept'\n").unwrap();
    assert_eq!(doc["a"].as_str(), "'kept'");
}

#[test]
fn test_escaped_colon_in_quoted_key() {
    let doc = parse("\"a\\:b\": v\n").unwrap();
    assert_eq!(doc["a:b"].as_str(), "v");
}

#[test]
fn test_mixed_entry_kinds_rejected() {
    let err = parse("- a\nb: c\n").unwrap_err();
    assert!(matches!(err, Error::DifferentEntryNotAllowed { line: 2 }));
}

#[test]
fn test_inline_sequence_value_rejected() {
    let err = parse("a: - 1\n").unwrap_err();
    assert!(matches!(err, Error::BlockSequenceNotAllowed { line: 1 }));
}

#[test]
fn test_invalid_character_cites_position() {
    let err = parse("ok: 1\nkey: caf\u{00e9}\n").unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidCharacter { line: 2, column: 9 }
    ));
}

#[test]
fn test_cannot_open_missing_file() {
    let err = libyamlet::parse_file("/no/such/file.yaml").unwrap_err();
    assert!(matches!(err, Error::CannotOpenFile { .. }));
    assert_eq!(err.category(), Category::Operation);
}

#[test]
fn test_file_round_trip() {
    let path = std::env::temp_dir().join("yamlet-file-round-trip.yaml");
    let mut root = Node::None;
    root.key_mut("name").set_scalar("demo");
    root.key_mut("items").push_back().set_scalar("one");

    libyamlet::serialize_file(&root, &SerializeConfig::default(), &path).unwrap();
    let read_back = libyamlet::parse_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(read_back, root);
}

#[test]
fn test_round_trip_structure() {
    let mut root = Node::None;
    root.key_mut("name").set_scalar("demo");
    let server = root.key_mut("server");
    server.key_mut("host").set_scalar("localhost");
    server.key_mut("port").set_scalar("8080");
    let list = root.key_mut("features");
    list.push_back().set_scalar("alpha");
    list.push_back().key_mut("beta").set_scalar("yes");

    let text = serialize(&root, &SerializeConfig::default()).unwrap();
    let reparsed = parse(&text).unwrap();
    assert_eq!(reparsed, root);
}

#[test]
fn test_round_trip_preserves_newlines_in_block_scalars() {
    let mut root = Node::None;
    root.key_mut("keep").set_scalar("one\ntwo\nthree\n");
    root.key_mut("strip").set_scalar("four\nfive");

    let text = serialize(&root, &no_fold()).unwrap();
    let reparsed = parse(&text).unwrap();
    assert_eq!(reparsed["keep"].as_str(), "one\ntwo\nthree\n");
    assert_eq!(reparsed["strip"].as_str(), "four\nfive");
}

#[test]
fn test_round_trip_folded_long_scalar() {
    let long = "the quick brown fox jumps over the lazy dog and keeps on running far";
    let mut root = Node::None;
    root.key_mut("text").set_scalar(long);

    let config = SerializeConfig {
        scalar_max_length: 16,
        ..SerializeConfig::default()
    };
    let text = serialize(&root, &config).unwrap();
    assert!(text.starts_with("text: >-\n"));
    let reparsed = parse(&text).unwrap();
    assert_eq!(reparsed["text"].as_str(), long);
}

#[test]
fn test_comment_invariance() {
    let source = "a: 1\nb:\n  - x\n";
    let with_comment = format!("{}\n# anything\n", source);
    assert_eq!(parse(source).unwrap(), parse(&with_comment).unwrap());
}

#[test]
fn test_map_insertion_order_survives_round_trip() {
    let source = "zebra: 1\napple: 2\nmango: 3\n";
    let doc = parse(source).unwrap();
    let keys: Vec<&str> = doc.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);

    let text = serialize(&doc, &SerializeConfig::default()).unwrap();
    assert_eq!(text, source);
}

#[test]
fn test_duplicate_keys_collapse() {
    let doc = parse("a: 1\na: 2\n").unwrap();
    assert_eq!(doc.size(), 1);
    assert_eq!(doc["a"].as_str(), "2");
}

#[test]
fn test_empty_value_reads_as_empty_scalar() {
    let doc = parse("a:\nb: 1\n").unwrap();
    assert_eq!(doc["a"].kind(), Kind::Scalar);
    assert_eq!(doc["a"].as_str(), "");
    assert_eq!(doc["b"].as_str(), "1");
}

#[test]
fn test_internal_errors_categorized() {
    let err = parse("- 1\n-\n").unwrap_err();
    assert!(matches!(err, Error::UnexpectedDocumentEnd));
    assert_eq!(err.category(), Category::Internal);
}

use crate::{NodeId, PositionIndex, SourceKind, SourceMap, Span};

#[test]
fn sources_get_sequential_ids() {
    let mut map = SourceMap::new();

    let a = map.add_file("a.sb", "module A\n");
    let b = map.add_virtual("<repl>", "module B\n");

    assert_ne!(a, b);
    assert_eq!(map.len(), 2);
    assert_eq!(map.content(b), "module B\n");
    assert_eq!(map.kind(a), &SourceKind::File("a.sb".to_owned()));
    assert_eq!(map.display_name(b), "<repl>");
}

#[test]
fn line_col_is_one_based() {
    let mut map = SourceMap::new();
    let id = map.add_virtual("t", "module A\nlet f = x\n");

    assert_eq!(map.line_col(id, 0), (1, 1));
    assert_eq!(map.line_col(id, 7), (1, 8));
    assert_eq!(map.line_col(id, 9), (2, 1));
    assert_eq!(map.line_col(id, 17), (2, 9));
    assert_eq!(map.line_col(id, 1000), (3, 1));
}

#[test]
fn line_col_clamps_inside_multibyte_char() {
    let mut map = SourceMap::new();
    let id = map.add_virtual("t", "é\nxé");

    assert_eq!(map.line_col(id, 1), (1, 1));
    assert_eq!(map.line_col(id, 2), (1, 2));
    assert_eq!(map.line_col(id, 5), (2, 2));
    assert_eq!(map.line_col(id, 6), (2, 3));
}

#[test]
fn load_file_reads_from_disk() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"module Disk\n").unwrap();
    file.flush().unwrap();

    let mut map = SourceMap::new();
    let id = map.load_file(file.path()).unwrap();

    assert_eq!(map.content(id), "module Disk\n");
    assert_eq!(
        map.display_name(id),
        file.path().display().to_string().as_str()
    );
    assert!(matches!(map.kind(id), SourceKind::File(_)));
}

#[test]
fn load_missing_file_fails() {
    let mut map = SourceMap::new();
    assert!(map.load_file("/nonexistent/sable/missing.sb").is_err());
    assert!(map.is_empty());
}

#[test]
fn position_index_lookup() {
    let mut map = SourceMap::new();
    let source = map.add_virtual("t", "module A\n");
    let mut index = PositionIndex::new();
    let id = NodeId::from_raw(3);

    assert!(index.insert(id, Span::new(source, 7, 8)).is_none());

    assert_eq!(index.get(id), Some(Span::new(source, 7, 8)));
    assert_eq!(index.source(id), Some(source));
    assert!(!index.contains(NodeId::from_raw(4)));
    assert_eq!(index.get(id).map(|s| s.len()), Some(1));
}

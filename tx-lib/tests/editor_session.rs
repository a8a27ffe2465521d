use std::fs;

use tx_core::DEFAULT_FILE_MODE;
use tx_lib::{
  Bound,
  Editor,
  Error,
  Side,
};

const TEXT: &str = "fn main() {\n    println!(\"hello\");\n}\n";

#[test]
fn move_a_line_and_save() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("main.rs");
  fs::write(&path, TEXT).unwrap();

  let mut editor = Editor::open(&path, false, DEFAULT_FILE_MODE).unwrap();
  assert_eq!(editor.buffer(Side::Source).file_refs(), 2);

  editor.set_bound(Side::Source, Bound::Start, "\"println\"").unwrap();
  editor.set_bound(Side::Source, Bound::End, "#0").unwrap();
  editor.read("call").unwrap();
  assert_eq!(
    editor.variables().get("call").unwrap().as_bytes(),
    b"println!(\"hello\");"
  );

  editor.set_bound(Side::Destination, Bound::Start, "0").unwrap();
  editor.insert(b"// ").unwrap();
  editor.set_bound(Side::Destination, Bound::Start, "+#3").unwrap();
  editor.write("call").unwrap();
  editor.save().unwrap();

  assert_eq!(
    fs::read_to_string(&path).unwrap(),
    "fn main() {\n    println!(\"hello\");\n// println!(\"hello\");}\n"
  );
}

#[test]
fn snippet_highlights_destination() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("main.rs");
  fs::write(&path, TEXT).unwrap();

  let mut editor = Editor::open(&path, false, DEFAULT_FILE_MODE).unwrap();
  editor.set_bound(Side::Destination, Bound::Start, "2#5").unwrap();
  editor.set_bound(Side::Destination, Bound::End, "+#7").unwrap();

  let snippet = editor.snippet(Side::Destination, 3).unwrap();
  assert_eq!(snippet.first_line(), Some(1));
  assert_eq!(snippet.len(), 3);

  let line = &snippet.lines()[1];
  assert_eq!(line.number(), 2);
  assert_eq!(line.highlight(), Some(4..11));
  assert_eq!(&line.text()[4..11], b"println");
}

#[test]
fn readonly_session_never_writes() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("main.rs");
  fs::write(&path, TEXT).unwrap();

  let mut editor = Editor::open(&path, true, DEFAULT_FILE_MODE).unwrap();
  editor.set_bound(Side::Destination, Bound::Start, "1").unwrap();
  editor.insert(b"// ").unwrap();

  assert!(matches!(editor.save(), Err(Error::InvalidArgument(_))));
  assert_eq!(fs::read_to_string(&path).unwrap(), TEXT);
}

#[test]
fn missing_file_is_created() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("new.txt");

  let mut editor = Editor::open(&path, false, DEFAULT_FILE_MODE).unwrap();
  assert!(editor.buffer(Side::Source).is_empty());

  editor.set_bound(Side::Destination, Bound::Start, "1").unwrap();
  editor.insert(b"first\n").unwrap();
  editor.save().unwrap();
  assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");

  let missing = dir.path().join("missing.txt");
  assert!(matches!(
    Editor::open(&missing, true, DEFAULT_FILE_MODE),
    Err(Error::Io(_))
  ));
}

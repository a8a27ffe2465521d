//! An editing session over one file.
//!
//! The session keeps two buffers over the same file: the *source* buffer
//! shows the file as it was opened and is where text is read from, the
//! *destination* buffer starts as a clone of it and receives every edit.
//! Each side has its own [`Selection`], whose bounds are stored as
//! expressions rather than offsets so that they can be shown back to the
//! user and extended with relative movements.

use std::path::Path;

use crate::{
  Buffer,
  Error,
  Result,
  Snippet,
  Variables,
  telex::{
    Direction,
    Step,
    Telex,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
  Source,
  Destination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
  Start,
  End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  pub start: Option<Telex>,
  pub end:   Option<Telex>,
}

impl Selection {
  pub fn bound(&self, bound: Bound) -> Option<&Telex> {
    match bound {
      Bound::Start => self.start.as_ref(),
      Bound::End => self.end.as_ref(),
    }
  }

  fn bound_mut(&mut self, bound: Bound) -> &mut Option<Telex> {
    match bound {
      Bound::Start => &mut self.start,
      Bound::End => &mut self.end,
    }
  }
}

#[derive(Debug)]
pub struct Editor {
  pre:         Buffer,
  post:        Buffer,
  source:      Selection,
  destination: Selection,
  variables:   Variables,
  readonly:    bool,
}

impl Editor {
  pub fn open<P: AsRef<Path>>(path: P, readonly: bool, mode: u32) -> Result<Self> {
    let buffer = Buffer::open_with_mode(path, readonly, mode)?;
    Ok(Self::from_buffer(buffer, readonly))
  }

  pub fn from_buffer(buffer: Buffer, readonly: bool) -> Self {
    Self {
      post: buffer.clone(),
      pre: buffer,
      source: Selection::default(),
      destination: Selection::default(),
      variables: Variables::new(),
      readonly,
    }
  }

  pub fn buffer(&self, side: Side) -> &Buffer {
    match side {
      Side::Source => &self.pre,
      Side::Destination => &self.post,
    }
  }

  pub fn selection(&self, side: Side) -> &Selection {
    match side {
      Side::Source => &self.source,
      Side::Destination => &self.destination,
    }
  }

  pub fn variables(&self) -> &Variables {
    &self.variables
  }

  pub fn is_readonly(&self) -> bool {
    self.readonly
  }

  /// Parses `text` and stores it as a bound of the selection on `side`.
  ///
  /// A relative expression continues from the current bound: the start
  /// extends the start, the end extends the end or, if there is none yet,
  /// the start. Without anything to continue from, or for an absolute
  /// expression, the bound is replaced. The result must resolve against the
  /// side's buffer the way it is used later: a start from the buffer start,
  /// an end from the position the start resolves to. Otherwise the selection
  /// is left as it was.
  pub fn set_bound(&mut self, side: Side, bound: Bound, text: &str) -> Result<()> {
    let telex = Telex::parse(text)?;
    let buffer = match side {
      Side::Source => &self.pre,
      Side::Destination => &self.post,
    };
    let selection = match side {
      Side::Source => &mut self.source,
      Side::Destination => &mut self.destination,
    };

    let reference = match (bound, &selection.start) {
      (Bound::End, Some(start)) => buffer.lookup(start, 0)?,
      _ => 0,
    };

    if !telex.is_absolute() {
      let base = match bound {
        Bound::Start => selection.start.as_ref(),
        Bound::End => selection.end.as_ref().or(selection.start.as_ref()),
      };
      if let Some(base) = base {
        let mut chained = base.clone();
        chained.try_append(&telex, buffer.as_bytes(), reference)?;
        log::debug!("{side:?} {bound:?} = {chained}");
        *selection.bound_mut(bound) = Some(chained);
        return Ok(());
      }
    }

    buffer.lookup(&telex, reference)?;
    log::debug!("{side:?} {bound:?} = {telex}");
    *selection.bound_mut(bound) = Some(telex);
    Ok(())
  }

  /// The canonical text of a bound, if set.
  pub fn bound_text(&self, side: Side, bound: Bound) -> Option<String> {
    self.selection(side).bound(bound).map(Telex::to_string)
  }

  /// Copies the source selection into the variable `name`.
  pub fn read(&mut self, name: &str) -> Result<()> {
    let (Some(start), Some(end)) = (&self.source.start, &self.source.end) else {
      return Err(Error::InvalidArgument(
        "source selection needs a start and an end".to_string(),
      ));
    };
    let text = self.pre.get_substring(start, end)?;
    self.variables.set(name, text);
    Ok(())
  }

  /// Inserts the value of the variable `name` at the destination start.
  pub fn write(&mut self, name: &str) -> Result<()> {
    let value = self
      .variables
      .get(name)
      .ok_or_else(|| Error::InvalidArgument(format!("no variable named {name}")))?;
    let start = destination_start(&self.destination)?;
    self.post.insert(value.as_bytes(), start)
  }

  /// Inserts `text` at the destination start.
  pub fn insert(&mut self, text: &[u8]) -> Result<()> {
    let start = destination_start(&self.destination)?;
    self.post.insert(text, start)
  }

  /// Replaces the destination selection with `text`. Without an end the
  /// rest of the buffer is replaced.
  pub fn overwrite(&mut self, text: &[u8]) -> Result<()> {
    let start = destination_start(&self.destination)?;
    self.post.overwrite(text, start, self.destination.end.as_ref())
  }

  /// Deletes the destination selection.
  pub fn erase(&mut self) -> Result<()> {
    let start = destination_start(&self.destination)?;
    let end = self.destination.end.as_ref().ok_or_else(|| {
      Error::InvalidArgument("destination selection needs an end".to_string())
    })?;
    self.post.overwrite(b"", start, Some(end))
  }

  /// Writes the destination buffer to the file.
  pub fn save(&self) -> Result<()> {
    if self.readonly {
      return Err(Error::InvalidArgument("file is open read-only".to_string()));
    }
    self.post.save()
  }

  /// The lines to display for `side`: the window around its selection if a
  /// start is set, the top of the buffer otherwise.
  pub fn snippet(&self, side: Side, max_lines: usize) -> Result<Snippet> {
    let buffer = self.buffer(side);
    let selection = self.selection(side);

    match &selection.start {
      Some(start) => {
        let here = Telex::from(Step::column(Direction::Forward, 0));
        let end = selection.end.as_ref().unwrap_or(&here);
        buffer.get_snippet_telex(start, end, max_lines)
      },
      None => buffer.get_snippet(1, max_lines, None),
    }
  }
}

fn destination_start(selection: &Selection) -> Result<&Telex> {
  selection
    .start
    .as_ref()
    .ok_or_else(|| Error::InvalidArgument("destination selection needs a start".to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  const TEXT: &[u8] = b"line1\nline2\nline3\n";

  fn editor() -> Editor {
    Editor::from_buffer(Buffer::from_bytes(TEXT), false)
  }

  #[test]
  fn relative_bounds_are_chained() {
    let mut editor = editor();
    editor.set_bound(Side::Source, Bound::Start, "2").unwrap();
    editor.set_bound(Side::Source, Bound::Start, "+#2").unwrap();
    assert_eq!(editor.bound_text(Side::Source, Bound::Start).unwrap(), "2+#2");

    // The end continues from the start when it is not set yet.
    editor.set_bound(Side::Source, Bound::End, "+#3").unwrap();
    assert_eq!(editor.bound_text(Side::Source, Bound::End).unwrap(), "2+#2+#3");

    // An absolute expression replaces the bound.
    editor.set_bound(Side::Source, Bound::Start, "1").unwrap();
    assert_eq!(editor.bound_text(Side::Source, Bound::Start).unwrap(), "1");
  }

  #[test]
  fn relative_bound_without_base_resolves_from_buffer_start() {
    let mut editor = editor();
    editor.set_bound(Side::Destination, Bound::Start, "+1").unwrap();
    assert_eq!(editor.bound_text(Side::Destination, Bound::Start).unwrap(), "+1");
    assert!(editor.bound_text(Side::Destination, Bound::End).is_none());
  }

  #[test]
  fn invalid_bounds_leave_selection() {
    let mut editor = editor();
    editor.set_bound(Side::Source, Bound::Start, "3").unwrap();

    let err = editor.set_bound(Side::Source, Bound::Start, "+5").unwrap_err();
    assert!(matches!(err, Error::Range));
    let err = editor.set_bound(Side::Source, Bound::Start, "12").unwrap_err();
    assert!(matches!(err, Error::Range));
    let err = editor.set_bound(Side::Source, Bound::Start, "3x").unwrap_err();
    assert!(matches!(err, Error::Parse(ref e) if e.offset == 1));

    assert_eq!(editor.bound_text(Side::Source, Bound::Start).unwrap(), "3");
  }

  #[test]
  fn end_is_checked_from_the_start() {
    let mut editor = Editor::from_buffer(Buffer::from_bytes(&b"ab\nlonger line\n"[..]), false);

    // Line 1 has no column 8, line 2 does.
    assert!(matches!(
      editor.set_bound(Side::Source, Bound::End, "#8"),
      Err(Error::Range)
    ));
    editor.set_bound(Side::Source, Bound::Start, "2").unwrap();
    editor.set_bound(Side::Source, Bound::End, "#8").unwrap();
    editor.read("a").unwrap();
    assert_eq!(editor.variables().get("a").unwrap().as_bytes(), b"longer ");

    editor.set_bound(Side::Source, Bound::End, "+#4").unwrap();
    assert_eq!(editor.bound_text(Side::Source, Bound::End).unwrap(), "#8+#4");
    assert!(matches!(
      editor.set_bound(Side::Source, Bound::End, "+#1"),
      Err(Error::Range)
    ));
    editor.read("a").unwrap();
    assert_eq!(editor.variables().get("a").unwrap().as_bytes(), b"longer line");
  }

  #[test]
  fn read_and_write_variables() {
    let mut editor = editor();
    assert!(matches!(editor.read("a"), Err(Error::InvalidArgument(_))));

    editor.set_bound(Side::Source, Bound::Start, "2").unwrap();
    editor.set_bound(Side::Source, Bound::End, "+1").unwrap();
    editor.read("a").unwrap();
    assert_eq!(editor.variables().get("a").unwrap().as_bytes(), b"line2\n");

    editor.set_bound(Side::Destination, Bound::Start, "1").unwrap();
    editor.write("a").unwrap();
    assert_eq!(
      editor.buffer(Side::Destination).as_bytes(),
      b"line2\nline1\nline2\nline3\n"
    );
    // The source view is unaffected.
    assert_eq!(editor.buffer(Side::Source).as_bytes(), TEXT);

    assert!(matches!(editor.write("missing"), Err(Error::InvalidArgument(_))));
  }

  #[test]
  fn overwrite_and_erase() {
    let mut editor = editor();
    assert!(matches!(editor.insert(b"x"), Err(Error::InvalidArgument(_))));

    editor.set_bound(Side::Destination, Bound::Start, "2").unwrap();
    assert!(matches!(editor.erase(), Err(Error::InvalidArgument(_))));

    editor.set_bound(Side::Destination, Bound::End, "#0").unwrap();
    editor.overwrite(b"LINE2").unwrap();
    assert_eq!(editor.buffer(Side::Destination).as_bytes(), b"line1\nLINE2\nline3\n");

    editor.erase().unwrap();
    assert_eq!(editor.buffer(Side::Destination).as_bytes(), b"line1\n\nline3\n");

    editor.insert(b"two").unwrap();
    assert_eq!(editor.buffer(Side::Destination).as_bytes(), b"line1\ntwo\nline3\n");
  }

  #[test]
  fn snippet_follows_selection() {
    let mut editor = editor();
    let snippet = editor.snippet(Side::Source, 2).unwrap();
    assert_eq!(snippet.first_line(), Some(1));
    assert_eq!(snippet.len(), 2);

    editor.set_bound(Side::Source, Bound::Start, "3").unwrap();
    let snippet = editor.snippet(Side::Source, 1).unwrap();
    assert_eq!(snippet.first_line(), Some(3));
  }

  #[test]
  fn readonly_refuses_save() {
    let editor = Editor::from_buffer(Buffer::from_bytes(TEXT), true);
    assert!(editor.is_readonly());
    assert!(matches!(editor.save(), Err(Error::InvalidArgument(_))));
  }
}

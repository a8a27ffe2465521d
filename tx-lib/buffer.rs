//! File-backed byte buffers.
//!
//! A [`Buffer`] holds the complete content of a file in memory. All
//! positions are byte offsets, but callers normally do not compute them
//! themselves: they pass [`Telex`] expressions, which the buffer resolves
//! against its current content before doing anything else. A failed
//! resolution or allocation leaves the buffer untouched.
//!
//! Cloning a buffer copies its content and shares its [`File`]. The clone
//! can be edited independently and saved back to the same file.

use std::{
  ops::Range,
  path::Path,
  sync::Arc,
};

use tx_core::{
  ByteString,
  DEFAULT_FILE_MODE,
  File,
  chars,
};

use crate::{
  Error,
  Result,
  Snippet,
  telex::{
    Direction,
    Step,
    Telex,
  },
};

#[derive(Debug, Clone, Default)]
pub struct Buffer {
  file: Option<Arc<File>>,
  data: ByteString,
}

impl Buffer {
  /// An empty buffer not backed by a file.
  pub fn new() -> Self {
    Self::default()
  }

  /// A buffer holding `data`, not backed by a file.
  pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
    Self {
      file: None,
      data: ByteString::from(data.into()),
    }
  }

  /// Opens `path` and reads its content. Missing files are created unless
  /// `readonly` is set.
  pub fn open<P: AsRef<Path>>(path: P, readonly: bool) -> Result<Self> {
    Self::open_with_mode(path, readonly, DEFAULT_FILE_MODE)
  }

  /// Like [`Buffer::open`], with explicit permission bits for a newly created
  /// file.
  pub fn open_with_mode<P: AsRef<Path>>(path: P, readonly: bool, mode: u32) -> Result<Self> {
    let file = File::open(path, readonly, mode)?;
    let data = file.read_all()?;
    log::debug!("loaded {} bytes from {}", data.len(), file.path().display());

    Ok(Self {
      file: Some(Arc::new(file)),
      data: ByteString::from(data),
    })
  }

  /// Writes the whole content back to the file, replacing what was there.
  pub fn save(&self) -> Result<()> {
    let file = self
      .file
      .as_ref()
      .ok_or_else(|| Error::InvalidArgument("buffer has no file".to_string()))?;
    file.write_all(self.as_bytes())?;
    log::debug!("saved {} bytes to {}", self.data.len(), file.path().display());
    Ok(())
  }

  pub fn file(&self) -> Option<&Arc<File>> {
    self.file.as_ref()
  }

  /// Number of buffers sharing this buffer's file, itself included.
  pub fn file_refs(&self) -> usize {
    self.file.as_ref().map_or(0, Arc::strong_count)
  }

  pub fn path(&self) -> Option<&Path> {
    self.file.as_deref().map(File::path)
  }

  pub fn is_readonly(&self) -> bool {
    self.file.as_deref().is_some_and(File::is_readonly)
  }

  pub fn as_bytes(&self) -> &[u8] {
    self.data.as_bytes()
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn append(&mut self, byte: u8) -> Result<()> {
    self.data.insert_char(None, byte)?;
    Ok(())
  }

  fn check_pos(&self, pos: usize) -> Result<()> {
    if pos > self.data.len() {
      return Err(Error::Range);
    }
    Ok(())
  }

  /// 1-based number of the line containing `pos`.
  pub fn line_at(&self, pos: usize) -> Result<usize> {
    self.check_pos(pos)?;
    Ok(chars::count_line_endings(&self.as_bytes()[..pos]) + 1)
  }

  /// 1-based column of `pos` within its line.
  pub fn col_at(&self, pos: usize) -> Result<usize> {
    self.check_pos(pos)?;
    Ok(pos - chars::line_start(self.as_bytes(), pos) + 1)
  }

  pub fn line_count(&self) -> usize {
    chars::count_lines(self.as_bytes())
  }

  /// Resolves `telex` starting at `reference`.
  pub fn lookup(&self, telex: &Telex, reference: usize) -> Result<usize> {
    telex.lookup(self.as_bytes(), reference).ok_or(Error::Range)
  }

  /// Resolves a start expression from the buffer start and an optional end
  /// expression from the resolved start. A missing end means the buffer end.
  /// The result is ordered.
  fn resolve_range(&self, start: &Telex, end: Option<&Telex>) -> Result<Range<usize>> {
    let start = self.lookup(start, 0)?;
    let end = match end {
      Some(end) => self.lookup(end, start)?,
      None => self.data.len(),
    };
    Ok(start.min(end)..start.max(end))
  }

  /// Lines `start_line..start_line + line_count`, or up to the buffer end if
  /// the buffer is shorter. `selection` is a range of buffer offsets to mark.
  pub fn get_snippet(
    &self,
    start_line: usize,
    line_count: usize,
    selection: Option<Range<usize>>,
  ) -> Result<Snippet> {
    let line = |number: usize| Telex::from(Step::line(Direction::Absolute, number as u64));

    let start = self.lookup(&line(start_line), 0)?;
    let end = line(start_line.saturating_add(line_count))
      .lookup(self.as_bytes(), 0)
      .filter(|&end| end >= start)
      .unwrap_or(self.data.len());

    let first_line = self.line_at(start)?;
    Ok(Snippet::from_bytes(self.as_bytes(), start..end, first_line, selection))
  }

  /// The window of at most `max_lines` lines showing the range between
  /// `start` and `end`, with that range highlighted.
  ///
  /// A range shorter than the window is centred in it, moving up when the
  /// buffer ends too early. A longer range is cut to its first `max_lines`
  /// lines.
  pub fn get_snippet_telex(&self, start: &Telex, end: &Telex, max_lines: usize) -> Result<Snippet> {
    if max_lines == 0 {
      return Err(Error::InvalidArgument("snippet needs at least one line".to_string()));
    }

    let Range { start, end } = self.resolve_range(start, Some(end))?;
    let first = self.line_at(start)?;
    let last = self.line_at(end)?;
    let span = last - first + 1;

    let first_line = if span >= max_lines {
      first
    } else {
      let pad = (max_lines - span) / 2;
      let first_line = first.saturating_sub(pad).max(1);
      let total = self.line_count().max(1);
      let overflow = (first_line + max_lines - 1).saturating_sub(total);
      first_line.saturating_sub(overflow).max(1)
    };

    self.get_snippet(first_line, max_lines, Some(start..end))
  }

  /// Copies the bytes between the positions `start` and `end` resolve to.
  pub fn get_substring(&self, start: &Telex, end: &Telex) -> Result<ByteString> {
    let range = self.resolve_range(start, Some(end))?;
    Ok(self.data.substring(range.start, Some(range.len()))?)
  }

  /// Inserts `text` at the position `at` resolves to from the buffer start.
  pub fn insert(&mut self, text: &[u8], at: &Telex) -> Result<()> {
    let pos = self.lookup(at, 0)?;
    self.data.insert_bytes(Some(pos), text)?;
    log::debug!("inserted {} bytes at {pos}", text.len());
    Ok(())
  }

  /// Replaces the bytes between `start` and `end` (the buffer end if `None`)
  /// with `text`.
  pub fn overwrite(&mut self, text: &[u8], start: &Telex, end: Option<&Telex>) -> Result<()> {
    let range = self.resolve_range(start, end)?;
    // Nothing is removed until the insertion is sure to fit.
    self.data.reserve(text.len().saturating_sub(range.len()))?;
    match end {
      Some(_) => self.data.remove(range.clone())?,
      None => self.data.truncate(range.start)?,
    }
    self.data.insert_bytes(Some(range.start), text)?;
    log::debug!("overwrote {:?} with {} bytes", range, text.len());
    Ok(())
  }
}

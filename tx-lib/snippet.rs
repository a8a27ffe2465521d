//! Render-ready windows of buffer lines.
//!
//! A [`Snippet`] is built once from a byte range and then only read by front
//! ends. Each [`Line`] owns a copy of its text (without the line ending) and
//! remembers which part of it, if any, falls inside the active selection.

use std::{
  borrow::Cow,
  ops::Range,
  slice,
};

use tx_core::chars::line_end;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
  number:          usize,
  offset:          usize,
  text:            Vec<u8>,
  highlight:       Option<Range<usize>>,
  selection_start: Option<usize>,
  selection_end:   Option<usize>,
}

impl Line {
  /// Builds a line starting at buffer offset `offset`. `selection` is given
  /// in buffer offsets and is translated to offsets relative to the line.
  pub fn new(
    number: usize,
    offset: usize,
    text: &[u8],
    selection: Option<&Range<usize>>,
  ) -> Self {
    let end = offset + text.len();
    let mut line = Self {
      number,
      offset,
      text: text.to_vec(),
      highlight: None,
      selection_start: None,
      selection_end: None,
    };

    if let Some(selection) = selection {
      let contains = |pos: usize| (offset..=end).contains(&pos);
      line.selection_start = contains(selection.start).then(|| selection.start - offset);
      line.selection_end = contains(selection.end).then(|| selection.end - offset);

      let from = selection.start.max(offset);
      let to = selection.end.min(end);
      if from < to {
        line.highlight = Some(from - offset..to - offset);
      }
    }

    line
  }

  /// 1-based line number.
  pub fn number(&self) -> usize {
    self.number
  }

  /// Buffer offset of the first byte.
  pub fn offset(&self) -> usize {
    self.offset
  }

  pub fn text(&self) -> &[u8] {
    &self.text
  }

  pub fn text_lossy(&self) -> Cow<'_, str> {
    String::from_utf8_lossy(&self.text)
  }

  pub fn len(&self) -> usize {
    self.text.len()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  /// The selected part of the line, relative to its start.
  pub fn highlight(&self) -> Option<Range<usize>> {
    self.highlight.clone()
  }

  pub fn selection_start(&self) -> Option<usize> {
    self.selection_start
  }

  pub fn selection_end(&self) -> Option<usize> {
    self.selection_end
  }

  /// Whether the buffer offset `pos` lies on this line. The position right
  /// after the last byte (where the line ending sits) counts.
  pub fn contains(&self, pos: usize) -> bool {
    (self.offset..=self.offset + self.text.len()).contains(&pos)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
  lines: Vec<Line>,
}

impl Snippet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Splits `data[range]` into lines. `first_line` is the number of the line
  /// containing `range.start`, which is expected to be a line start.
  ///
  /// A final line ending does not produce an empty trailing line.
  pub fn from_bytes(
    data: &[u8],
    range: Range<usize>,
    first_line: usize,
    selection: Option<Range<usize>>,
  ) -> Self {
    let stop = range.end.min(data.len());
    let data = &data[..stop];
    let mut snippet = Self::new();
    let mut pos = range.start.min(stop);
    let mut number = first_line;

    while pos < stop {
      let end = line_end(data, pos);
      snippet.push(Line::new(number, pos, &data[pos..end], selection.as_ref()));
      pos = end + 1;
      number += 1;
    }

    snippet
  }

  pub fn push(&mut self, line: Line) {
    self.lines.push(line);
  }

  /// Number of the first line, if there is one.
  pub fn first_line(&self) -> Option<usize> {
    self.lines.first().map(Line::number)
  }

  pub fn lines(&self) -> &[Line] {
    &self.lines
  }

  pub fn iter(&self) -> slice::Iter<'_, Line> {
    self.lines.iter()
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}

impl<'a> IntoIterator for &'a Snippet {
  type Item = &'a Line;
  type IntoIter = slice::Iter<'a, Line>;

  fn into_iter(self) -> Self::IntoIter {
    self.lines.iter()
  }
}

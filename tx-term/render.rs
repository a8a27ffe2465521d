//! Rendering - prints snippets and expression errors to the terminal.

use std::io::Write;

use anyhow::Result;
use crossterm::style::Stylize;
use tx_lib::{
  Line,
  ParseError,
  Snippet,
};

/// Prints every line as `NNNN: text`, with the highlighted part in reverse
/// video.
pub fn print_snippet(out: &mut impl Write, snippet: &Snippet, tab_width: usize) -> Result<()> {
  for line in snippet {
    print_line(out, line, tab_width)?;
  }
  Ok(())
}

fn print_line(out: &mut impl Write, line: &Line, tab_width: usize) -> Result<()> {
  let text = line.text();
  let mut col = 0;
  write!(out, "{:04}: ", line.number())?;

  match line.highlight() {
    Some(range) => {
      let before = expand_tabs(&text[..range.start], &mut col, tab_width);
      let selected = expand_tabs(&text[range.clone()], &mut col, tab_width);
      let after = expand_tabs(&text[range.end..], &mut col, tab_width);
      write!(out, "{before}{}{after}", selected.reverse())?;
    },
    None => write!(out, "{}", expand_tabs(text, &mut col, tab_width))?,
  }

  // An empty selection at the end of a line has nothing to highlight.
  if line.selection_start() == Some(line.len()) && line.highlight().is_none() {
    write!(out, "{}", " ".reverse())?;
  }

  writeln!(out)?;
  Ok(())
}

/// Decodes `bytes` lossily and replaces tabs with spaces up to the next tab
/// stop. `col` is the display column the text starts at and is advanced.
pub fn expand_tabs(bytes: &[u8], col: &mut usize, tab_width: usize) -> String {
  let tab_width = tab_width.max(1);
  let mut out = String::with_capacity(bytes.len());

  for ch in String::from_utf8_lossy(bytes).chars() {
    if ch == '\t' {
      let spaces = tab_width - *col % tab_width;
      out.extend(std::iter::repeat_n(' ', spaces));
      *col += spaces;
    } else {
      out.push(ch);
      *col += 1;
    }
  }

  out
}

/// Echoes `expr` with the part starting at the error offset underlined, then
/// the error itself.
pub fn print_parse_error(out: &mut impl Write, expr: &str, err: &ParseError) -> Result<()> {
  let offset = err.offset.min(expr.len());
  let (good, bad) = expr.split_at(offset);
  let bad = if bad.is_empty() { " " } else { bad };

  writeln!(out, "  {good}{}", bad.red().underlined())?;
  writeln!(out, "  {}^ {}", " ".repeat(good.chars().count()), err.kind)?;
  Ok(())
}

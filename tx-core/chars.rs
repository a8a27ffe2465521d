//! Line-ending scanning over raw bytes.
//!
//! Buffers are byte arrays of unknown encoding, so every line computation in
//! the workspace goes through these helpers rather than through `str::lines`.
//! A line ends at a `\n`; a trailing `\n` terminates the last line instead of
//! starting a new one.

pub const LINE_FEED: u8 = b'\n';

#[inline]
pub fn byte_is_line_ending(byte: u8) -> bool {
  byte == LINE_FEED
}

/// Returns the offset of the first byte of the line containing `pos`.
///
/// `pos` is clamped to `data.len()`.
pub fn line_start(data: &[u8], pos: usize) -> usize {
  let pos = pos.min(data.len());
  data[..pos]
    .iter()
    .rposition(|&b| byte_is_line_ending(b))
    .map_or(0, |idx| idx + 1)
}

/// Returns the offset of the line ending terminating the line containing
/// `pos`, or `data.len()` if that line is unterminated.
pub fn line_end(data: &[u8], pos: usize) -> usize {
  let pos = pos.min(data.len());
  data[pos..]
    .iter()
    .position(|&b| byte_is_line_ending(b))
    .map_or(data.len(), |idx| pos + idx)
}

/// Returns the offset just past the next line ending at or after `pos`.
pub fn next_line_start(data: &[u8], pos: usize) -> Option<usize> {
  let end = line_end(data, pos);
  (end < data.len()).then_some(end + 1)
}

/// Returns the start of the line preceding the one containing `pos`.
pub fn prev_line_start(data: &[u8], pos: usize) -> Option<usize> {
  let start = line_start(data, pos);
  (start > 0).then(|| line_start(data, start - 1))
}

pub fn count_line_endings(data: &[u8]) -> usize {
  data.iter().filter(|&&b| byte_is_line_ending(b)).count()
}

/// Number of lines in `data`. An empty slice has no lines.
pub fn count_lines(data: &[u8]) -> usize {
  match data.last() {
    None => 0,
    Some(&last) if byte_is_line_ending(last) => count_line_endings(data),
    Some(_) => count_line_endings(data) + 1,
  }
}

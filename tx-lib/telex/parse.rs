use thiserror::Error;

use super::{
  Direction,
  Step,
  Telex,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
  #[error("expected a line, column or pattern")]
  Empty,
  #[error("unexpected character '{0}'")]
  UnexpectedChar(char),
  #[error("unterminated pattern")]
  UnterminatedRegex,
}

/// A malformed expression. `offset` is the byte offset into the input where
/// the problem starts, so front ends can highlight the rest of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
  pub offset: usize,
  pub kind:   ParseErrorKind,
}

impl ParseError {
  fn new(offset: usize, kind: ParseErrorKind) -> Self {
    Self { offset, kind }
  }
}

impl Telex {
  /// Parses the textual form of an expression.
  ///
  /// A `+` or `-` that is not followed by an atom is dropped, but an input
  /// that produces no step at all is rejected.
  pub fn parse(input: &str) -> Result<Self, ParseError> {
    Parser::new(input).parse()
  }
}

impl std::str::FromStr for Telex {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

struct Parser<'a> {
  input: &'a str,
  /// The current byte index of the input being considered.
  pos:   usize,
}

impl<'a> Parser<'a> {
  fn new(input: &'a str) -> Self {
    Self { input, pos: 0 }
  }

  fn byte(&self) -> Option<u8> {
    self.input.as_bytes().get(self.pos).copied()
  }

  fn parse(mut self) -> Result<Telex, ParseError> {
    let mut steps = Vec::new();
    let mut direction = Direction::Absolute;

    while let Some(byte) = self.byte() {
      let step = match byte {
        b'+' => {
          direction = Direction::Forward;
          self.pos += 1;
          continue;
        },
        b'-' => {
          direction = Direction::Backward;
          self.pos += 1;
          continue;
        },
        b'#' => {
          self.pos += 1;
          Step::column(direction, self.parse_number())
        },
        b'0'..=b'9' => Step::line(direction, self.parse_number()),
        b'"' => Step::regex(direction, self.parse_pattern()?),
        _ => {
          let ch = self.input[self.pos..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
          return Err(ParseError::new(
            self.pos,
            ParseErrorKind::UnexpectedChar(ch),
          ));
        },
      };

      steps.push(step);
      direction = Direction::Absolute;
    }

    if steps.is_empty() {
      return Err(ParseError::new(self.pos, ParseErrorKind::Empty));
    }

    Ok(Telex { steps })
  }

  /// Accumulates decimal digits. Overflow wraps.
  fn parse_number(&mut self) -> u64 {
    let mut number: u64 = 0;
    while let Some(byte @ b'0'..=b'9') = self.byte() {
      number = number
        .wrapping_mul(10)
        .wrapping_add(u64::from(byte - b'0'));
      self.pos += 1;
    }
    number
  }

  /// Parses a quoted pattern starting at the opening quote.
  fn parse_pattern(&mut self) -> Result<String, ParseError> {
    let quote = self.pos;
    let unterminated = || ParseError::new(quote, ParseErrorKind::UnterminatedRegex);

    let rest = &self.input[quote + 1..];
    let mut chars = rest.char_indices();
    let mut pattern = String::new();

    loop {
      match chars.next() {
        Some((_, '\\')) => {
          let (_, escaped) = chars.next().ok_or_else(unterminated)?;
          pattern.push(escaped);
        },
        Some((idx, '"')) => {
          self.pos = quote + 1 + idx + 1;
          return Ok(pattern);
        },
        Some((_, ch)) => pattern.push(ch),
        None => return Err(unterminated()),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::telex::StepKind;

  #[track_caller]
  fn assert_steps(input: &str, expected: &[Step]) {
    let telex = Telex::parse(input).unwrap();
    assert_eq!(telex.steps(), expected);
  }

  #[track_caller]
  fn assert_error(input: &str, offset: usize, kind: ParseErrorKind) {
    assert_eq!(Telex::parse(input), Err(ParseError { offset, kind }));
  }

  #[test]
  fn parse_lines_and_columns() {
    assert_steps("12", &[Step::line(Direction::Absolute, 12)]);
    assert_steps("12#5", &[
      Step::line(Direction::Absolute, 12),
      Step::column(Direction::Absolute, 5),
    ]);
    assert_steps("+3-#2", &[
      Step::line(Direction::Forward, 3),
      Step::column(Direction::Backward, 2),
    ]);
    assert_steps("#", &[Step::column(Direction::Absolute, 0)]);
    assert_steps("007", &[Step::line(Direction::Absolute, 7)]);
  }

  #[test]
  fn direction_applies_to_next_atom_only() {
    assert_steps("+1#4", &[
      Step::line(Direction::Forward, 1),
      Step::column(Direction::Absolute, 4),
    ]);
    // The last sign before an atom wins.
    assert_steps("+-2", &[Step::line(Direction::Backward, 2)]);
    // A dangling sign is dropped.
    assert_steps("4-", &[Step::line(Direction::Absolute, 4)]);
  }

  #[test]
  fn parse_patterns() {
    assert_steps(r#""abc""#, &[Step::regex(Direction::Absolute, "abc")]);
    assert_steps(r#""a\"b""#, &[Step::regex(Direction::Absolute, "a\"b")]);
    assert_steps(r#""a\\b""#, &[Step::regex(Direction::Absolute, "a\\b")]);
    assert_steps(r#"-"x"3"#, &[
      Step::regex(Direction::Backward, "x"),
      Step::line(Direction::Absolute, 3),
    ]);
    assert_steps(r#""""#, &[Step::regex(Direction::Absolute, "")]);
    assert_steps("\"größe\"", &[Step::regex(Direction::Absolute, "größe")]);
  }

  #[test]
  fn parse_errors() {
    assert_error("", 0, ParseErrorKind::Empty);
    assert_error("+", 1, ParseErrorKind::Empty);
    assert_error("x", 0, ParseErrorKind::UnexpectedChar('x'));
    assert_error("12:3", 2, ParseErrorKind::UnexpectedChar(':'));
    assert_error("1 2", 1, ParseErrorKind::UnexpectedChar(' '));
    assert_error("3\"abc", 1, ParseErrorKind::UnterminatedRegex);
    assert_error("\"abc\\\"", 0, ParseErrorKind::UnterminatedRegex);
    assert_error("\"a\\", 0, ParseErrorKind::UnterminatedRegex);
  }

  #[test]
  fn overflow_wraps() {
    let telex = Telex::parse("18446744073709551616").unwrap();
    assert_eq!(telex.first().kind, StepKind::Line(0));
  }

  quickcheck::quickcheck! {
    fn decimal_is_single_absolute_line(n: u64) -> bool {
      let telex = Telex::parse(&n.to_string()).unwrap();
      telex.steps() == [Step::line(Direction::Absolute, n)]
    }
  }
}

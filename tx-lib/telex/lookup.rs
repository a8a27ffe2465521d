use regex::bytes::Regex;
use tx_core::chars::{
  LINE_FEED,
  line_end,
  line_start,
  next_line_start,
  prev_line_start,
};

use super::{
  Direction,
  Step,
  StepKind,
  Telex,
};

impl Telex {
  /// Resolves the expression against `data`, starting at `reference`.
  ///
  /// Returns `None` if `reference` lies outside `data`, or if any step runs
  /// off the buffer or finds no match.
  pub fn lookup(&self, data: &[u8], reference: usize) -> Option<usize> {
    let pos = self
      .steps
      .iter()
      .try_fold(reference, |pos, step| step.lookup(data, pos));
    log::trace!("lookup {self} from {reference}: {pos:?}");
    pos
  }
}

/// Resolves several expressions one after the other, each continuing from
/// the position the previous one produced.
pub fn lookup_multi(data: &[u8], reference: usize, telexes: &[&Telex]) -> Option<usize> {
  telexes
    .iter()
    .try_fold(reference, |pos, telex| telex.lookup(data, pos))
}

impl Step {
  pub fn lookup(&self, data: &[u8], pos: usize) -> Option<usize> {
    if pos > data.len() {
      return None;
    }

    match &self.kind {
      StepKind::Line(number) => line(data, pos, self.direction, *number),
      StepKind::Column(number) => column(data, pos, self.direction, *number),
      StepKind::Regex(pattern) => regex(data, pos, self.direction, pattern),
    }
  }
}

fn line(data: &[u8], pos: usize, direction: Direction, number: u64) -> Option<usize> {
  match direction {
    Direction::Absolute if number == 0 => {
      // A trailing line ending does not start another line.
      let end = match data.last() {
        Some(&LINE_FEED) => data.len() - 1,
        _ => data.len(),
      };
      Some(line_start(data, end))
    },
    Direction::Absolute => (1..number).try_fold(0, |pos, _| next_line_start(data, pos)),
    Direction::Forward => (0..number).try_fold(pos, |pos, _| next_line_start(data, pos)),
    Direction::Backward => {
      (0..number).try_fold(line_start(data, pos), |pos, _| prev_line_start(data, pos))
    },
  }
}

fn column(data: &[u8], pos: usize, direction: Direction, number: u64) -> Option<usize> {
  let number = usize::try_from(number).ok()?;
  match direction {
    Direction::Absolute if number == 0 => Some(line_end(data, pos)),
    Direction::Absolute => advance(data, line_start(data, pos), number - 1),
    Direction::Forward => advance(data, pos, number),
    Direction::Backward => retreat(data, pos, number),
  }
}

/// Moves `count` bytes right without passing a line ending. Landing on one
/// is fine.
fn advance(data: &[u8], pos: usize, count: usize) -> Option<usize> {
  let end = pos.checked_add(count).filter(|&end| end <= data.len())?;
  (!data[pos..end].contains(&LINE_FEED)).then_some(end)
}

fn retreat(data: &[u8], pos: usize, count: usize) -> Option<usize> {
  let start = pos.checked_sub(count)?;
  (!data[start..pos].contains(&LINE_FEED)).then_some(start)
}

fn regex(data: &[u8], pos: usize, direction: Direction, pattern: &str) -> Option<usize> {
  let regex = match Regex::new(pattern) {
    Ok(regex) => regex,
    Err(err) => {
      log::debug!("invalid pattern {pattern:?}: {err}");
      return None;
    },
  };

  match direction {
    Direction::Absolute => regex.find_at(data, pos).map(|m| m.start()),
    Direction::Forward => {
      let from = pos + 1;
      if from > data.len() {
        return None;
      }
      regex.find_at(data, from).map(|m| m.start())
    },
    Direction::Backward => {
      let mut found = None;
      let mut at = 0;
      while at < pos {
        match regex.find_at(data, at) {
          Some(m) if m.start() < pos => {
            found = Some(m.start());
            at = m.start() + 1;
          },
          _ => break,
        }
      }
      found
    },
  }
}

#[cfg(test)]
mod tests {
  use quickcheck::{
    Arbitrary,
    Gen,
    TestResult,
  };

  use super::*;

  const TEXT: &[u8] = b"line1\nline2\nline3\n";

  #[track_caller]
  fn lookup(data: &[u8], input: &str, reference: usize) -> Option<usize> {
    Telex::parse(input).unwrap().lookup(data, reference)
  }

  #[test]
  fn absolute_lines() {
    assert_eq!(lookup(TEXT, "1", 9), Some(0));
    assert_eq!(lookup(TEXT, "2", 0), Some(6));
    assert_eq!(lookup(TEXT, "3", 0), Some(12));
    assert_eq!(lookup(TEXT, "0", 0), Some(12));
    assert_eq!(lookup(b"a\nb", "0", 0), Some(2));
    assert_eq!(lookup(b"", "0", 0), Some(0));
    assert_eq!(lookup(TEXT, "5", 0), None);
  }

  #[test]
  fn relative_lines() {
    assert_eq!(lookup(TEXT, "+1", 6), Some(12));
    assert_eq!(lookup(TEXT, "-1", 6), Some(0));
    // Backward movement is measured from the start of the current line.
    assert_eq!(lookup(TEXT, "-1", 9), Some(0));
    assert_eq!(lookup(TEXT, "+0", 9), Some(9));
    assert_eq!(lookup(TEXT, "-0", 9), Some(6));
    assert_eq!(lookup(TEXT, "-1", 3), None);
    assert_eq!(lookup(b"a\nb", "+1", 2), None);
  }

  #[test]
  fn columns() {
    assert_eq!(lookup(TEXT, "2#3", 0), Some(8));
    assert_eq!(lookup(TEXT, "2#0", 0), Some(11));
    assert_eq!(lookup(TEXT, "2#1", 0), Some(6));
    // The line ending itself is reachable, the next line is not.
    assert_eq!(lookup(TEXT, "2#6", 0), Some(11));
    assert_eq!(lookup(TEXT, "2#7", 0), None);
    assert_eq!(lookup(TEXT, "+#2", 6), Some(8));
    assert_eq!(lookup(TEXT, "-#2", 8), Some(6));
    assert_eq!(lookup(TEXT, "-#3", 8), None);
    assert_eq!(lookup(b"abc", "+#4", 0), None);
  }

  #[test]
  fn patterns() {
    assert_eq!(lookup(TEXT, "\"line\"", 0), Some(0));
    assert_eq!(lookup(TEXT, "+\"line\"", 0), Some(6));
    assert_eq!(lookup(TEXT, "-\"line\"", 12), Some(6));
    assert_eq!(lookup(TEXT, "-\"line\"", 0), None);
    assert_eq!(lookup(TEXT, "\"[0-9]\"", 6), Some(10));
    assert_eq!(lookup(TEXT, "\"nope\"", 0), None);
    assert_eq!(lookup(TEXT, "\"(\"", 0), None);
    assert_eq!(lookup(TEXT, "+\"line\"", TEXT.len()), None);
  }

  #[test]
  fn reference_out_of_range() {
    assert_eq!(lookup(TEXT, "1", TEXT.len() + 1), None);
    assert_eq!(lookup(TEXT, "+0", TEXT.len()), Some(TEXT.len()));
  }

  #[test]
  fn chained_lookup() {
    let head = Telex::parse("2").unwrap();
    let tail = Telex::parse("+#3").unwrap();
    assert_eq!(lookup_multi(TEXT, 0, &[&head, &tail]), Some(9));
    assert_eq!(lookup_multi(TEXT, 0, &[]), Some(0));
    assert_eq!(lookup_multi(TEXT, 0, &[&head, &Telex::parse("+#9").unwrap()]), None);
  }

  impl Arbitrary for Step {
    fn arbitrary(g: &mut Gen) -> Self {
      let direction = *g
        .choose(&[Direction::Backward, Direction::Absolute, Direction::Forward])
        .unwrap();
      match u8::arbitrary(g) % 3 {
        0 => Step::line(direction, u64::from(u8::arbitrary(g) % 6)),
        1 => Step::column(direction, u64::from(u8::arbitrary(g) % 8)),
        _ => {
          let pattern = *g.choose(&["line", "e\\d", "a\"b", "\n", ""]).unwrap();
          Step::regex(direction, pattern)
        },
      }
    }
  }

  quickcheck::quickcheck! {
    // Adjacent atoms may merge when written out, so the property is checked
    // on whatever chain the written text parses back into.
    fn display_round_trips(steps: Vec<Step>) -> TestResult {
      let text: String = steps.iter().map(Step::to_string).collect();
      let Ok(telex) = Telex::parse(&text) else {
        return TestResult::discard();
      };
      let reparsed = Telex::parse(&telex.to_string()).unwrap();
      TestResult::from_bool(
        reparsed == telex
          && (0..=TEXT.len()).all(|pos| reparsed.lookup(TEXT, pos) == telex.lookup(TEXT, pos)),
      )
    }
  }

  #[test]
  fn adjacent_numbers_parse_as_one() {
    let column = Step::column(Direction::Absolute, 5);
    let line = Step::line(Direction::Absolute, 3);
    let telex = Telex::parse(&format!("{column}{line}")).unwrap();
    assert_eq!(telex.steps(), &[Step::column(Direction::Absolute, 53)]);
    assert_eq!(telex.to_string(), "#53");
  }
}

use tx_core::ByteString;

/// Named text storage, used to carry selections from the source side of an
/// editing session to the destination side.
#[derive(Debug, Clone, Default)]
pub struct Variables {
  entries: Vec<(String, ByteString)>,
}

impl Variables {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores `value` under `name`, returning the value it replaced.
  pub fn set(&mut self, name: &str, value: ByteString) -> Option<ByteString> {
    log::trace!("set variable {name} ({} bytes)", value.len());
    match self.entries.iter_mut().find(|(n, _)| n == name) {
      Some((_, slot)) => Some(std::mem::replace(slot, value)),
      None => {
        self.entries.push((name.to_string(), value));
        None
      },
    }
  }

  pub fn get(&self, name: &str) -> Option<&ByteString> {
    self
      .entries
      .iter()
      .find_map(|(n, value)| (n == name).then_some(value))
  }

  pub fn remove(&mut self, name: &str) -> Option<ByteString> {
    let idx = self.entries.iter().position(|(n, _)| n == name)?;
    Some(self.entries.remove(idx).1)
  }

  /// Names in the order they were first set.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(name, _)| name.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &ByteString)> {
    self.entries.iter().map(|(name, value)| (name.as_str(), value))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

//! Whole-file access for buffers.
//!
//! A [`File`] keeps its descriptor open for as long as any buffer refers to
//! it. Buffers cloned from one another share the same `Arc<File>`; the
//! descriptor is closed when the last handle is dropped.
//!
//! Reads and writes always cover the whole file starting at offset 0 and
//! leave the descriptor's cursor where it was.

use std::{
  fs::{
    self,
    OpenOptions,
  },
  io::{
    Read,
    Seek,
    SeekFrom,
    Write,
  },
  path::{
    Path,
    PathBuf,
  },
};

use crate::Result;

#[derive(Debug)]
pub struct File {
  inner:    fs::File,
  path:     PathBuf,
  readonly: bool,
}

impl File {
  /// Opens `path`. Read-write files are created if missing, with `mode` as
  /// their permission bits; read-only files must already exist.
  pub fn open<P>(path: P, readonly: bool, mode: u32) -> Result<Self>
  where
    P: AsRef<Path>,
  {
    let path = path.as_ref();
    let mut options = OpenOptions::new();
    options.read(true);
    if !readonly {
      options.write(true).create(true);
    }

    #[cfg(unix)]
    {
      use std::os::unix::fs::OpenOptionsExt;
      options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let inner = options.open(path)?;
    log::debug!(
      "opened {} ({})",
      path.display(),
      if readonly { "read-only" } else { "read-write" }
    );

    Ok(Self {
      inner,
      path: path.to_path_buf(),
      readonly,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn is_readonly(&self) -> bool {
    self.readonly
  }

  pub fn size(&self) -> Result<u64> {
    Ok(self.inner.metadata()?.len())
  }

  /// Reads the entire file.
  pub fn read_all(&self) -> Result<Vec<u8>> {
    let size = usize::try_from(self.size()?).unwrap_or(usize::MAX);
    let mut data = Vec::new();
    data.try_reserve_exact(size)?;

    self.with_rewound(|mut handle| {
      handle.read_to_end(&mut data)?;
      Ok(())
    })?;

    log::trace!("read {} bytes from {}", data.len(), self.path.display());
    Ok(data)
  }

  /// Replaces the file's content with `data`.
  pub fn write_all(&self, data: &[u8]) -> Result<()> {
    self.with_rewound(|mut handle| {
      handle.write_all(data)?;
      handle.set_len(data.len() as u64)?;
      handle.flush()?;
      Ok(())
    })?;

    log::trace!("wrote {} bytes to {}", data.len(), self.path.display());
    Ok(())
  }

  /// Runs `f` with the cursor at offset 0 and restores the previous cursor
  /// afterwards. The first error wins.
  fn with_rewound<F>(&self, f: F) -> Result<()>
  where
    F: FnOnce(&fs::File) -> Result<()>,
  {
    let mut handle = &self.inner;
    let prev = handle.stream_position()?;
    handle.seek(SeekFrom::Start(0))?;

    let result = f(handle);
    let restored = handle.seek(SeekFrom::Start(prev));

    result?;
    restored?;
    Ok(())
  }
}

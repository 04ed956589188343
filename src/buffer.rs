//! the shared byte sink backing a document's `<AppendedData>` section

use std::io::{self, Write};

/// Grow-only byte buffer with in-place patching of already-written bytes.
///
/// The buffer supports exactly the four operations the appended-data flow
/// needs: query the current length, append at the end, overwrite a
/// previously-recorded region, and read the whole thing back out. Bytes
/// are never truncated or inserted, so every recorded offset stays valid
/// for the lifetime of the document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppendBuffer {
    bytes: Vec<u8>,
}

impl AppendBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// current length; also the `offset` attribute of the next appended array
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// append bytes at the end
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Overwrite previously-written bytes starting at `at`.
    ///
    /// Panics if the patch reaches past the already-written region; a
    /// patch offset always comes from an earlier reservation, so going out
    /// of bounds is a sequencing bug in this crate, not caller input.
    pub(crate) fn patch(&mut self, at: usize, bytes: &[u8]) {
        self.bytes[at..at + bytes.len()].copy_from_slice(bytes);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Write for AppendBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

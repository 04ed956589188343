//! single-block zlib compression of array payloads
//!
//! VTK's zlib compressor splits large arrays into multiple blocks; this
//! writer always emits exactly one block per array, which the header codec
//! records as `numBlocks = 1`.

use std::io::Write;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::Error;

/// Compression setting for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// raw payload bytes behind a single u32 size header
    None,
    /// one zlib-wrapped deflate block per array, level 1 (fastest) through
    /// 9 (smallest)
    Zlib(u8),
}

impl Compression {
    /// zlib compression with `level` clamped into the accepted 1..=9 range
    pub fn zlib(level: u8) -> Self {
        Self::Zlib(level.clamp(1, 9))
    }

    pub(crate) fn is_active(&self) -> bool {
        matches!(self, Self::Zlib(_))
    }
}

impl Default for Compression {
    fn default() -> Self {
        Self::None
    }
}

/// Deflate `raw` as one finalized zlib block. The returned length is the
/// compressed size recorded in the block header; it is only meaningful
/// because the stream end marker is already included.
pub(crate) fn deflate_block(raw: &[u8], level: u8) -> Vec<u8> {
    compress_to_vec_zlib(raw, level)
}

/// Deflate `raw` and write the block to `sink`, returning the compressed
/// size.
pub(crate) fn write_block<W: Write>(raw: &[u8], level: u8, sink: &mut W) -> Result<usize, Error> {
    let compressed = deflate_block(raw, level);
    sink.write_all(&compressed).map_err(Error::Compression)?;
    Ok(compressed.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::inflate::decompress_to_vec_zlib;

    #[test]
    fn block_round_trips() {
        let raw: Vec<u8> = (0..=255).cycle().take(4096).collect();
        let compressed = deflate_block(&raw, 6);

        assert!(compressed.len() < raw.len());
        assert_eq!(decompress_to_vec_zlib(&compressed).unwrap(), raw);
    }

    #[test]
    fn deflate_is_deterministic() {
        let raw = b"the same input twice".repeat(50);
        assert_eq!(deflate_block(&raw, 3), deflate_block(&raw, 3));
    }

    #[test]
    fn write_block_reports_compressed_size() {
        let raw = vec![7_u8; 1000];
        let mut sink = Vec::new();
        let size = write_block(&raw, 9, &mut sink).unwrap();
        assert_eq!(size, sink.len());
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(Compression::zlib(0), Compression::Zlib(1));
        assert_eq!(Compression::zlib(200), Compression::Zlib(9));
        assert_eq!(Compression::zlib(5), Compression::Zlib(5));
    }
}

//! fixed-layout binary block headers
//!
//! Every data block is preceded by a header of little-endian u32 words
//! matching `header_type="UInt32"`. Compressed blocks carry
//! `[numBlocks, blockSize, lastBlockSize, compressedBlockSize]`;
//! uncompressed blocks a single byte count. Both layouts are what the
//! target visualization tools expect byte for byte.

use crate::buffer::AppendBuffer;

pub(crate) const RAW_HEADER_LEN: usize = 4;
pub(crate) const COMPRESSED_HEADER_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockHeader {
    Raw {
        bytes: u32,
    },
    Compressed {
        uncompressed: u32,
        compressed: u32,
    },
}

impl BlockHeader {
    pub(crate) fn to_bytes(self) -> Vec<u8> {
        match self {
            Self::Raw { bytes } => bytes.to_le_bytes().to_vec(),
            Self::Compressed {
                uncompressed,
                compressed,
            } => {
                // exactly one block per array, so the block size and the
                // last block size are both the full uncompressed size
                let mut out = Vec::with_capacity(COMPRESSED_HEADER_LEN);
                for word in [1, uncompressed, uncompressed, compressed] {
                    out.extend_from_slice(&word.to_le_bytes());
                }
                out
            }
        }
    }

    /// Self-contained base64 run for the inline flow.
    ///
    /// The header and the payload are encoded as two independent base64
    /// runs and concatenated as text, never as raw bytes: the header must
    /// stand on its own in the element text even though its compressed
    /// size is only known after the payload bytes exist.
    pub(crate) fn to_base64(self) -> String {
        base64::encode(self.to_bytes())
    }
}

/// Reserve a zeroed placeholder for a header whose values are only known
/// after the payload is written, returning the placeholder's offset.
pub(crate) fn reserve(buffer: &mut AppendBuffer, compressed: bool) -> usize {
    let at = buffer.len();
    let len = if compressed {
        COMPRESSED_HEADER_LEN
    } else {
        RAW_HEADER_LEN
    };
    buffer.append(&[0; COMPRESSED_HEADER_LEN][..len]);
    at
}

/// Overwrite the placeholder reserved at `at` with the final header. Must
/// only run after the payload write (and compression, if any) finished.
pub(crate) fn patch(buffer: &mut AppendBuffer, at: usize, header: BlockHeader) {
    buffer.patch(at, &header.to_bytes());
}

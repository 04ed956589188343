//! building `<DataArray>` nodes and their binary payloads
//!
//! This is the orchestration layer: given a resolved shape and a parent
//! node, it creates the array element, fills in its attributes, and routes
//! the payload bytes either into the shared append buffer (with a
//! reserve-then-patch header) or into the element text as base64 or ascii.

use crate::buffer::AppendBuffer;
use crate::compress::{self, Compression};
use crate::element::Element;
use crate::encode;
use crate::header::{self, BlockHeader};
use crate::payload::{ElementType, Payload};
use crate::shape::{Placement, Shape};
use crate::Error;

/// How array bytes end up in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// raw bytes in the trailing `<AppendedData>` section, referenced by
    /// a byte offset
    Appended,
    /// base64 text inside the element
    Base64,
    /// whitespace-separated text inside the element; string payloads fall
    /// back to base64 since they have no ascii form
    Ascii,
}

/// Create the array node for `payload` under `parent` and emit its bytes.
///
/// Returns the created node. In appended mode no payload bytes touch the
/// node itself; only the `offset` attribute references the buffer.
pub(crate) fn data_to_xml<'e>(
    parent: &'e mut Element,
    buffer: &mut AppendBuffer,
    payload: &Payload<'_>,
    name: &str,
    shape: Shape,
    placement: Placement,
    encoding: Encoding,
    compression: Compression,
) -> Result<&'e Element, Error> {
    // string arrays use the <Array> tag rather than <DataArray>
    let tag = if shape.element == ElementType::Str {
        "Array"
    } else {
        "DataArray"
    };

    let mut node = Element::new(tag);
    node.set_attribute("type", shape.element.as_str());
    node.set_attribute("Name", name);
    node.set_attribute("NumberOfComponents", shape.components.to_string());
    if placement == Placement::Field {
        node.set_attribute("NumberOfTuples", shape.tuples.to_string());
    }

    match encoding {
        Encoding::Appended => {
            node.set_attribute("format", "appended");
            node.set_attribute("offset", buffer.len().to_string());
            append_block(buffer, payload, shape, compression)?;
        }
        Encoding::Ascii if shape.element != ElementType::Str => {
            node.set_attribute("format", "ascii");
            node.set_text(encode::format_ascii(payload)?);
        }
        Encoding::Base64 | Encoding::Ascii => {
            node.set_attribute("format", "binary");
            node.set_text(inline_base64(payload, shape, compression)?);
        }
    }

    Ok(parent.push_child(node))
}

/// Appended flow: reserve the header placeholder, write the (possibly
/// compressed) payload after it, then patch the header in place once the
/// sizes are known. The reserve must precede the payload write and the
/// patch must follow the compression finalize; nothing else about the
/// buffer moves in between.
fn append_block(
    buffer: &mut AppendBuffer,
    payload: &Payload<'_>,
    shape: Shape,
    compression: Compression,
) -> Result<(), Error> {
    let header_at = header::reserve(buffer, compression.is_active());

    let header = match compression {
        Compression::Zlib(level) => {
            let mut raw = Vec::with_capacity(shape.bytes);
            let written = encode::write_payload(payload, &mut raw)?;
            debug_assert_eq!(written, shape.bytes);

            let compressed = compress::write_block(&raw, level, buffer)?;
            BlockHeader::Compressed {
                uncompressed: written as u32,
                compressed: compressed as u32,
            }
        }
        Compression::None => {
            let written = encode::write_payload(payload, buffer)?;
            debug_assert_eq!(written, shape.bytes);
            BlockHeader::Raw {
                bytes: written as u32,
            }
        }
    };

    header::patch(buffer, header_at, header);
    Ok(())
}

/// Inline flow: encode into a scratch buffer scoped to this call, then
/// emit the header and the payload as two independently-padded base64 runs
/// concatenated at the text level.
fn inline_base64(
    payload: &Payload<'_>,
    shape: Shape,
    compression: Compression,
) -> Result<String, Error> {
    let mut scratch = Vec::with_capacity(shape.bytes);
    let written = encode::write_payload(payload, &mut scratch)?;
    debug_assert_eq!(written, shape.bytes);

    let (header, block) = match compression {
        Compression::Zlib(level) => {
            let compressed = compress::deflate_block(&scratch, level);
            let header = BlockHeader::Compressed {
                uncompressed: written as u32,
                compressed: compressed.len() as u32,
            };
            (header, compressed)
        }
        Compression::None => (
            BlockHeader::Raw {
                bytes: written as u32,
            },
            scratch,
        ),
    };

    let encoded = base64::encode(&block);
    let mut text = String::with_capacity(encoded.len() + 26);
    text.push('\n');
    text.push_str(&header.to_base64());
    text.push_str(&encoded);
    text.push('\n');
    Ok(text)
}

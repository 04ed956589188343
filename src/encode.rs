//! raw little-endian serialization of payloads
//!
//! VTK files written by this crate declare `byte_order="LittleEndian"`, so
//! every numeric element goes through `to_le_bytes`. Strings are written
//! with a single trailing NUL. Component tuples are interleaved by index
//! so that the file carries one full tuple after another.

use std::io::Write;

use crate::payload::{Num, NumSlice, Payload};
use crate::Error;

macro_rules! write_le {
    ($value:expr, $sink:expr) => {{
        let bytes = $value.to_le_bytes();
        $sink.write_all(&bytes)?;
        bytes.len()
    }};
}

/// Write `payload` to `sink` in element order, returning the number of
/// bytes written. The caller checks the count against the precomputed
/// [`Shape`](crate::Shape) byte size.
pub fn write_payload<W: Write>(payload: &Payload<'_>, sink: &mut W) -> Result<usize, Error> {
    match payload {
        Payload::Scalar(num) => write_num(*num, sink),
        Payload::Str(s) => write_str(s, sink),
        Payload::Array(arr) => write_slice(arr, sink),
        Payload::Strings(strings) => {
            let mut written = 0;
            for s in strings.iter() {
                written += write_str(s, sink)?;
            }
            Ok(written)
        }
        Payload::Tuple(arrays) => write_interleaved(arrays, sink),
    }
}

fn write_num<W: Write>(num: Num, sink: &mut W) -> Result<usize, Error> {
    let written = match num {
        Num::I8(v) => write_le!(v, sink),
        Num::U8(v) => write_le!(v, sink),
        Num::I16(v) => write_le!(v, sink),
        Num::U16(v) => write_le!(v, sink),
        Num::I32(v) => write_le!(v, sink),
        Num::U32(v) => write_le!(v, sink),
        Num::I64(v) => write_le!(v, sink),
        Num::U64(v) => write_le!(v, sink),
        Num::F32(v) => write_le!(v, sink),
        Num::F64(v) => write_le!(v, sink),
    };
    Ok(written)
}

fn write_str<W: Write>(s: &str, sink: &mut W) -> Result<usize, Error> {
    sink.write_all(s.as_bytes())?;
    sink.write_all(&[0])?;
    Ok(s.len() + 1)
}

fn write_slice<W: Write>(arr: &NumSlice<'_>, sink: &mut W) -> Result<usize, Error> {
    let mut written = 0;
    for index in 0..arr.len() {
        written += write_element(arr, index, sink)?;
    }
    Ok(written)
}

/// Interleave by index: element `i` of every array in order, for each `i`.
/// This produces the per-tuple component layout VTK expects when a vector
/// field is assembled from separate component arrays.
fn write_interleaved<W: Write>(arrays: &[NumSlice<'_>], sink: &mut W) -> Result<usize, Error> {
    let len = arrays.first().map(|a| a.len()).unwrap_or(0);

    let mut written = 0;
    for index in 0..len {
        for arr in arrays {
            written += write_element(arr, index, sink)?;
        }
    }
    Ok(written)
}

fn write_element<W: Write>(arr: &NumSlice<'_>, index: usize, sink: &mut W) -> Result<usize, Error> {
    let written = match arr {
        NumSlice::I8(s) => write_le!(s[index], sink),
        NumSlice::U8(s) => write_le!(s[index], sink),
        NumSlice::I16(s) => write_le!(s[index], sink),
        NumSlice::U16(s) => write_le!(s[index], sink),
        NumSlice::I32(s) => write_le!(s[index], sink),
        NumSlice::U32(s) => write_le!(s[index], sink),
        NumSlice::I64(s) => write_le!(s[index], sink),
        NumSlice::U64(s) => write_le!(s[index], sink),
        NumSlice::F32(s) => write_le!(s[index], sink),
        NumSlice::F64(s) => write_le!(s[index], sink),
    };
    Ok(written)
}

/// Format a numeric payload as whitespace-separated text for
/// `format="ascii"` arrays. String payloads have no ascii form.
pub(crate) fn format_ascii(payload: &Payload<'_>) -> Result<String, Error> {
    let mut out = String::new();

    match payload {
        Payload::Str(_) | Payload::Strings(_) => {
            return Err(Error::UnsupportedType {
                found: "String",
                reason: "strings cannot be written as ascii text",
            })
        }
        Payload::Scalar(num) => push_num_ascii(*num, &mut out),
        Payload::Array(arr) => {
            for index in 0..arr.len() {
                push_element_ascii(arr, index, &mut out);
            }
        }
        Payload::Tuple(arrays) => {
            let len = arrays.first().map(|a| a.len()).unwrap_or(0);
            for index in 0..len {
                for arr in arrays {
                    push_element_ascii(arr, index, &mut out);
                }
            }
        }
    }

    Ok(out)
}

fn push_num_ascii(num: Num, out: &mut String) {
    match num {
        Num::F32(v) => {
            let mut buffer = ryu::Buffer::new();
            out.push_str(buffer.format(v));
        }
        Num::F64(v) => {
            let mut buffer = ryu::Buffer::new();
            out.push_str(buffer.format(v));
        }
        Num::I8(v) => out.push_str(&v.to_string()),
        Num::U8(v) => out.push_str(&v.to_string()),
        Num::I16(v) => out.push_str(&v.to_string()),
        Num::U16(v) => out.push_str(&v.to_string()),
        Num::I32(v) => out.push_str(&v.to_string()),
        Num::U32(v) => out.push_str(&v.to_string()),
        Num::I64(v) => out.push_str(&v.to_string()),
        Num::U64(v) => out.push_str(&v.to_string()),
    }
    out.push(' ');
}

fn push_element_ascii(arr: &NumSlice<'_>, index: usize, out: &mut String) {
    let num = match arr {
        NumSlice::I8(s) => Num::I8(s[index]),
        NumSlice::U8(s) => Num::U8(s[index]),
        NumSlice::I16(s) => Num::I16(s[index]),
        NumSlice::U16(s) => Num::U16(s[index]),
        NumSlice::I32(s) => Num::I32(s[index]),
        NumSlice::U32(s) => Num::U32(s[index]),
        NumSlice::I64(s) => Num::I64(s[index]),
        NumSlice::U64(s) => Num::U64(s[index]),
        NumSlice::F32(s) => Num::F32(s[index]),
        NumSlice::F64(s) => Num::F64(s[index]),
    };
    push_num_ascii(num, out);
}

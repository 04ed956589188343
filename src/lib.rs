//! A writer for the VTK XML visualization file formats.
//!
//! The crate serializes in-memory array data into `DataArray` nodes of a
//! VTK XML document, with the numeric payload stored either as raw bytes
//! in the trailing `<AppendedData>` section or as base64 (optionally
//! zlib-compressed) inline in the element text. The produced files load in
//! paraview and other VTK-based tools.
//!
//! The entry point is [`VtkDocument::attach_data`]: hand it a
//! [`Payload`] (a number, a string, a numeric array, a collection of
//! strings, or a tuple of component arrays), a name, and optionally a
//! [`Placement`]; it resolves the component layout, picks the right
//! container node (`PointData`, `CellData`, or `FieldData`), and emits the
//! bytes.
//!
//! ```
//! use vtkwrite::{Encoding, GridType, Payload, VtkDocument};
//!
//! let mut doc = VtkDocument::new(GridType::RectilinearGrid, 6, 2)
//!     .encoding(Encoding::Base64);
//! doc.add_piece(Some("0 5 0 0 0 0"));
//!
//! let u = vec![0.0_f64; 6];
//! let v = vec![0.0_f64; 6];
//! // two component arrays interleaved into one 2-component point field
//! let velocity = Payload::tuple([u.as_slice(), v.as_slice()]);
//! doc.attach_data(&velocity, "velocity", None).unwrap();
//!
//! let mut out = Vec::new();
//! doc.write_document(&mut out).unwrap();
//! ```

pub mod buffer;
pub mod compress;
pub mod document;
pub mod element;
mod emit;
mod encode;
mod header;
pub mod payload;
pub mod prelude;
pub mod shape;

pub use buffer::AppendBuffer;
pub use compress::Compression;
pub use document::{GridType, VtkDocument};
pub use element::Element;
pub use emit::Encoding;
pub use encode::write_payload;
pub use payload::{ElementType, Num, NumSlice, Payload};
pub use shape::{Placement, Shape};

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// the payload's element count does not divide evenly over the
    /// relevant count (grid points, grid cells, or the tuple's first
    /// array)
    #[error("payload of {len} elements does not divide evenly over {count} {unit}")]
    ShapeMismatch {
        len: usize,
        count: usize,
        unit: &'static str,
    },
    /// the payload's element type cannot be used where it was given
    #[error("element type {found} is not usable here: {reason}")]
    UnsupportedType {
        found: &'static str,
        reason: &'static str,
    },
    /// the sink failed while a deflate block was being written
    #[error("could not write deflate block: {0}")]
    Compression(#[source] std::io::Error),
    /// point or cell data was attached before any `<Piece>` node exists
    #[error("no <Piece> node exists to attach {placement} data to")]
    Structural { placement: &'static str },
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Could not write XML data to file: `{0}`")]
    XmlWrite(#[from] quick_xml::Error),
}

//! Common types that are useful for working with `vtkwrite`

pub use crate::buffer::AppendBuffer;
pub use crate::compress::Compression;
pub use crate::document::{GridType, VtkDocument};
pub use crate::element::Element;
pub use crate::Encoding;
pub use crate::payload::{ElementType, Num, NumSlice, Payload};
pub use crate::shape::{Placement, Shape};
pub use crate::Error;

//! placement and shape inference for payloads
//!
//! Before any bytes are written, a payload is resolved into a [`Shape`]:
//! its element type, the number of components per tuple, the tuple count,
//! and the total encoded byte size. Shapes are computed fresh on every
//! attach call from the payload and the grid's ambient point/cell counts.

use crate::payload::{ElementType, Payload};
use crate::Error;

/// Where a data array lives in the file: attached to mesh points, mesh
/// cells, or the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Point,
    Cell,
    Field,
}

impl Placement {
    /// the container node arrays with this placement are emitted under
    pub(crate) fn container_tag(&self) -> &'static str {
        match self {
            Self::Point => "PointData",
            Self::Cell => "CellData",
            Self::Field => "FieldData",
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Cell => "cell",
            Self::Field => "field",
        }
    }

    /// Pick a placement from the payload's element count alone: point data
    /// if the count divides evenly over the points, cell data if it divides
    /// over the cells, field data otherwise.
    pub fn infer(payload: &Payload<'_>, num_points: usize, num_cells: usize) -> Self {
        // an empty component tuple carries no length information; point
        // placement is the historical default for that case only
        if matches!(payload, Payload::Tuple(arrays) if arrays.is_empty()) {
            return Self::Point;
        }

        let count = payload.element_count();

        if num_points > 0 && count % num_points == 0 {
            Self::Point
        } else if num_cells > 0 && count % num_cells == 0 {
            Self::Cell
        } else {
            Self::Field
        }
    }
}

/// Derived layout of one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub element: ElementType,
    /// components per tuple (`NumberOfComponents`)
    pub components: usize,
    /// number of tuples; for point/cell data this equals the grid's
    /// point/cell count, for field data it is written as `NumberOfTuples`
    pub tuples: usize,
    /// total binary size of the payload
    pub bytes: usize,
}

impl Shape {
    /// Resolve the shape of `payload` under `placement`.
    ///
    /// For point and cell placement the element count must divide evenly
    /// over the grid's point/cell count; otherwise this fails with
    /// [`Error::ShapeMismatch`] before any bytes are written.
    pub fn resolve(
        payload: &Payload<'_>,
        placement: Placement,
        num_points: usize,
        num_cells: usize,
    ) -> Result<Self, Error> {
        // validates tuple homogeneity as a side effect
        let element = payload.element_type()?;
        let bytes = payload.byte_size();

        match placement {
            Placement::Field => {
                let (components, tuples) = match payload {
                    Payload::Tuple(arrays) => match arrays.first() {
                        Some(first) => (arrays.len(), first.len()),
                        None => (1, 0),
                    },
                    Payload::Scalar(_) | Payload::Str(_) => (1, 1),
                    Payload::Array(arr) => (1, arr.len()),
                    Payload::Strings(strings) => (1, strings.len()),
                };

                Ok(Self {
                    element,
                    components,
                    tuples,
                    bytes,
                })
            }
            Placement::Point | Placement::Cell => {
                let (count, unit) = match placement {
                    Placement::Point => (num_points, "points"),
                    _ => (num_cells, "cells"),
                };

                let len = payload.element_count();

                if count == 0 || len % count != 0 {
                    return Err(Error::ShapeMismatch { len, count, unit });
                }

                Ok(Self {
                    element,
                    components: len / count,
                    tuples: count,
                    bytes,
                })
            }
        }
    }
}

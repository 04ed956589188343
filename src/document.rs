//! one in-progress vtk xml document
//!
//! [`VtkDocument`] owns everything a single file-writing session needs:
//! the grid element tree, the shared append buffer, the grid's point and
//! cell counts, and the output options. Arrays are attached one at a time
//! through [`attach_data`](VtkDocument::attach_data) and the finished file
//! is streamed out with [`write_document`](VtkDocument::write_document).
//! Sessions are single-threaded; one attach call runs to completion before
//! the next begins.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::buffer::AppendBuffer;
use crate::compress::Compression;
use crate::element::Element;
use crate::emit::{self, Encoding};
use crate::payload::Payload;
use crate::shape::{Placement, Shape};
use crate::Error;

/// The xml grid flavors this writer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridType {
    ImageData,
    RectilinearGrid,
    StructuredGrid,
    UnstructuredGrid,
}

impl GridType {
    /// the `type` attribute of the `VTKFile` element, also the tag name of
    /// the grid node
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImageData => "ImageData",
            Self::RectilinearGrid => "RectilinearGrid",
            Self::StructuredGrid => "StructuredGrid",
            Self::UnstructuredGrid => "UnstructuredGrid",
        }
    }

    /// conventional file extension for this grid flavor
    pub fn extension(&self) -> &'static str {
        match self {
            Self::ImageData => "vti",
            Self::RectilinearGrid => "vtr",
            Self::StructuredGrid => "vts",
            Self::UnstructuredGrid => "vtu",
        }
    }
}

/// A vtk xml file being assembled in memory.
///
/// ```
/// use vtkwrite::{Compression, Encoding, GridType, Payload, VtkDocument};
///
/// let mut doc = VtkDocument::new(GridType::RectilinearGrid, 4, 3)
///     .encoding(Encoding::Appended)
///     .compression(Compression::zlib(6));
///
/// doc.add_piece(Some("0 3 0 0 0 0"));
///
/// let pressure = vec![0.0_f64; 4];
/// doc.attach_data(&Payload::from(&pressure), "pressure", None).unwrap();
///
/// let mut out = Vec::new();
/// doc.write_document(&mut out).unwrap();
/// ```
pub struct VtkDocument {
    grid: Element,
    grid_type: GridType,
    num_points: usize,
    num_cells: usize,
    encoding: Encoding,
    compression: Compression,
    buffer: AppendBuffer,
}

impl VtkDocument {
    /// Start a document for a grid with the given ambient point and cell
    /// counts. Defaults to appended encoding without compression.
    pub fn new(grid_type: GridType, num_points: usize, num_cells: usize) -> Self {
        Self {
            grid: Element::new(grid_type.as_str()),
            grid_type,
            num_points,
            num_cells,
            encoding: Encoding::Appended,
            compression: Compression::None,
            buffer: AppendBuffer::new(),
        }
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn grid_type(&self) -> GridType {
        self.grid_type
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// the grid node at the root of the document tree
    pub fn root(&self) -> &Element {
        &self.grid
    }

    /// the shared appended-data buffer for this session
    pub fn append_buffer(&self) -> &AppendBuffer {
        &self.buffer
    }

    /// Open a new `<Piece>` under the grid node and return it so the
    /// caller can fill in its geometry. Point and cell arrays attach to
    /// the most recently added piece.
    pub fn add_piece(&mut self, extent: Option<&str>) -> &mut Element {
        let mut piece = Element::new("Piece");
        if let Some(extent) = extent {
            piece.set_attribute("Extent", extent);
        }
        self.grid.push_child(piece)
    }

    /// Attach one payload as a data array, returning the created node.
    ///
    /// When `placement` is `None` it is inferred from the element count:
    /// point data if the count divides evenly over the points, cell data
    /// if over the cells, field data otherwise.
    ///
    /// Fails with [`Error::Structural`] if point or cell data is attached
    /// before any `<Piece>` exists; the grid must be initialized first.
    pub fn attach_data(
        &mut self,
        payload: &Payload<'_>,
        name: &str,
        placement: Option<Placement>,
    ) -> Result<&Element, Error> {
        let placement = placement
            .unwrap_or_else(|| Placement::infer(payload, self.num_points, self.num_cells));
        let shape = Shape::resolve(payload, placement, self.num_points, self.num_cells)?;

        let container = match placement {
            Placement::Field => self.grid.child_or_insert("FieldData"),
            Placement::Point | Placement::Cell => {
                let piece = self
                    .grid
                    .last_child_mut("Piece")
                    .ok_or(Error::Structural {
                        placement: placement.as_str(),
                    })?;
                piece.child_or_insert(placement.container_tag())
            }
        };

        emit::data_to_xml(
            container,
            &mut self.buffer,
            payload,
            name,
            shape,
            placement,
            self.encoding,
            self.compression,
        )
    }

    /// Stream the whole document: the xml declaration, the `VTKFile`
    /// wrapper, the grid subtree, and the trailing raw appended section.
    pub fn write_document<W: Write>(&self, sink: W) -> Result<(), Error> {
        let mut writer = Writer::new(sink);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut file = BytesStart::new("VTKFile");
        file.push_attribute(("type", self.grid_type.as_str()));
        file.push_attribute(("version", "1.0"));
        file.push_attribute(("byte_order", "LittleEndian"));
        file.push_attribute(("header_type", "UInt32"));
        if self.compression.is_active() {
            file.push_attribute(("compressor", "vtkZLibDataCompressor"));
        }
        writer.write_event(Event::Start(file))?;

        self.grid.write_xml(&mut writer)?;

        // the appended section holds raw bytes, not xml text, so it goes
        // through the underlying sink directly
        let mut sink = writer.into_inner();
        if !self.buffer.is_empty() {
            sink.write_all(b"<AppendedData encoding=\"raw\">_")?;
            sink.write_all(self.buffer.as_slice())?;
            sink.write_all(b"\n</AppendedData>")?;
        }

        let mut writer = Writer::new(sink);
        writer.write_event(Event::End(BytesEnd::new("VTKFile")))?;

        Ok(())
    }

    /// Write the document to a file at `path`.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = std::fs::File::create(path)?;
        self.write_document(std::io::BufWriter::new(file))
    }
}

//! payload shapes accepted by [`attach_data`](crate::VtkDocument::attach_data)
//!
//! Every piece of data handed to the writer is one of a closed set of
//! shapes: a single number, a single string, a homogeneous numeric array,
//! an ordered collection of strings, or a tuple of same-shaped arrays
//! holding the components of a vector field. The writer borrows the data
//! for the duration of one call and never retains it.

use crate::Error;

/// The element types understood by VTK readers.
///
/// The `as_str` spellings are exactly what paraview expects in the `type`
/// attribute of a `DataArray` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Str,
}

impl ElementType {
    /// the exact `type` attribute value written to the file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int8 => "Int8",
            Self::UInt8 => "UInt8",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Str => "String",
        }
    }
}

macro_rules! numeric_variants {
    ($(($variant:ident, $ty:ty, $elem:ident)),+ $(,)?) => {
        /// A single number of one of the supported element types.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum Num {
            $($variant($ty),)+
        }

        impl Num {
            pub fn element_type(&self) -> ElementType {
                match self {
                    $(Self::$variant(_) => ElementType::$elem,)+
                }
            }

            /// encoded width in bytes
            pub(crate) fn width(&self) -> usize {
                match self {
                    $(Self::$variant(_) => std::mem::size_of::<$ty>(),)+
                }
            }
        }

        /// A borrowed slice of one of the supported numeric element types.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum NumSlice<'a> {
            $($variant(&'a [$ty]),)+
        }

        impl NumSlice<'_> {
            pub fn len(&self) -> usize {
                match self {
                    $(Self::$variant(s) => s.len(),)+
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            pub fn element_type(&self) -> ElementType {
                match self {
                    $(Self::$variant(_) => ElementType::$elem,)+
                }
            }

            /// encoded width of one element in bytes
            pub(crate) fn width(&self) -> usize {
                match self {
                    $(Self::$variant(_) => std::mem::size_of::<$ty>(),)+
                }
            }
        }

        $(
            impl<'a> From<&'a [$ty]> for NumSlice<'a> {
                fn from(slice: &'a [$ty]) -> Self {
                    NumSlice::$variant(slice)
                }
            }

            impl<'a> From<&'a [$ty]> for Payload<'a> {
                fn from(slice: &'a [$ty]) -> Self {
                    Payload::Array(NumSlice::$variant(slice))
                }
            }

            impl<'a> From<&'a Vec<$ty>> for Payload<'a> {
                fn from(vec: &'a Vec<$ty>) -> Self {
                    Payload::Array(NumSlice::$variant(vec.as_slice()))
                }
            }

            impl From<$ty> for Num {
                fn from(value: $ty) -> Self {
                    Num::$variant(value)
                }
            }

            impl From<$ty> for Payload<'_> {
                fn from(value: $ty) -> Self {
                    Payload::Scalar(Num::$variant(value))
                }
            }

            impl<'a> From<&'a ndarray::Array1<$ty>> for Payload<'a> {
                fn from(array: &'a ndarray::Array1<$ty>) -> Self {
                    // owned 1D arrays are always contiguous
                    Payload::Array(NumSlice::$variant(array.as_slice().unwrap()))
                }
            }
        )+
    };
}

numeric_variants!(
    (I8, i8, Int8),
    (U8, u8, UInt8),
    (I16, i16, Int16),
    (U16, u16, UInt16),
    (I32, i32, Int32),
    (U32, u32, UInt32),
    (I64, i64, Int64),
    (U64, u64, UInt64),
    (F32, f32, Float32),
    (F64, f64, Float64),
);

/// One piece of data to be serialized into a `DataArray` node.
#[derive(Debug, Clone)]
pub enum Payload<'a> {
    /// a single number
    Scalar(Num),
    /// a single string, encoded with a trailing NUL
    Str(&'a str),
    /// a homogeneous numeric array
    Array(NumSlice<'a>),
    /// an ordered collection of strings, each encoded with a trailing NUL
    Strings(&'a [String]),
    /// a fixed-length tuple of same-shaped arrays; element `i` of each
    /// array in order forms tuple `i` of the output
    Tuple(Vec<NumSlice<'a>>),
}

impl<'a> Payload<'a> {
    /// assemble a component tuple from anything convertible to numeric slices
    pub fn tuple<T>(components: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<NumSlice<'a>>,
    {
        Payload::Tuple(components.into_iter().map(Into::into).collect())
    }

    /// total number of scalar elements (or strings) across the payload
    pub fn element_count(&self) -> usize {
        match self {
            Self::Scalar(_) | Self::Str(_) => 1,
            Self::Array(arr) => arr.len(),
            Self::Strings(strings) => strings.len(),
            Self::Tuple(arrays) => arrays.iter().map(|a| a.len()).sum(),
        }
    }

    /// the element type shared by every element of the payload
    ///
    /// Fails with [`Error::UnsupportedType`] if a tuple mixes element types
    /// and with [`Error::ShapeMismatch`] if a tuple mixes array lengths.
    /// An empty tuple has no type of its own and reports `Float64`.
    pub fn element_type(&self) -> Result<ElementType, Error> {
        match self {
            Self::Scalar(num) => Ok(num.element_type()),
            Self::Str(_) | Self::Strings(_) => Ok(ElementType::Str),
            Self::Array(arr) => Ok(arr.element_type()),
            Self::Tuple(arrays) => {
                let first = match arrays.first() {
                    Some(first) => first,
                    None => return Ok(ElementType::Float64),
                };

                for other in &arrays[1..] {
                    if other.element_type() != first.element_type() {
                        return Err(Error::UnsupportedType {
                            found: other.element_type().as_str(),
                            reason: "all arrays of a component tuple must share one element type",
                        });
                    }
                    if other.len() != first.len() {
                        return Err(Error::ShapeMismatch {
                            len: other.len(),
                            count: first.len(),
                            unit: "elements of the first tuple array",
                        });
                    }
                }

                Ok(first.element_type())
            }
        }
    }

    /// total number of bytes the binary encoding of this payload occupies
    pub fn byte_size(&self) -> usize {
        match self {
            Self::Scalar(num) => num.width(),
            Self::Str(s) => s.len() + 1,
            Self::Array(arr) => arr.len() * arr.width(),
            Self::Strings(strings) => strings.iter().map(|s| s.len() + 1).sum(),
            Self::Tuple(arrays) => arrays.iter().map(|a| a.len() * a.width()).sum(),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(s: &'a str) -> Self {
        Payload::Str(s)
    }
}

impl<'a> From<&'a [String]> for Payload<'a> {
    fn from(strings: &'a [String]) -> Self {
        Payload::Strings(strings)
    }
}

impl<'a> From<&'a Vec<String>> for Payload<'a> {
    fn from(strings: &'a Vec<String>) -> Self {
        Payload::Strings(strings.as_slice())
    }
}

impl<'a> From<NumSlice<'a>> for Payload<'a> {
    fn from(slice: NumSlice<'a>) -> Self {
        Payload::Array(slice)
    }
}

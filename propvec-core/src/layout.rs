//! Column element types and layout definitions
//!
//! This module defines the closed set of element types a property column can
//! store, the runtime type tag recorded at registration, and the layout
//! descriptor (type + array width) that the buffer and accessor layers share.

use bytemuck::Pod;

/// Element types supported by property columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataType {
    /// 32-bit floating point
    F32 = 0,
    /// 64-bit floating point
    F64 = 1,
    /// 32-bit signed integer
    I32 = 2,
    /// 64-bit signed integer
    I64 = 3,
    /// 32-bit unsigned integer
    U32 = 4,
    /// 64-bit unsigned integer
    U64 = 5,
}

impl DataType {
    /// Convert from u8 representation
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DataType::F32),
            1 => Some(DataType::F64),
            2 => Some(DataType::I32),
            3 => Some(DataType::I64),
            4 => Some(DataType::U32),
            5 => Some(DataType::U64),
            _ => None,
        }
    }

    /// Convert to u8 representation
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Get the size in bytes for this data type
    pub const fn size_bytes(self) -> usize {
        match self {
            DataType::F32 | DataType::I32 | DataType::U32 => 4,
            DataType::F64 | DataType::I64 | DataType::U64 => 8,
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::U32 => write!(f, "u32"),
            DataType::U64 => write!(f, "u64"),
        }
    }
}

/// Trait for types that can be stored as column elements
///
/// All column element types must be plain-old-data (`bytemuck::Pod`), which
/// is what makes the type-erased word buffers and the all-zero default value
/// of freshly created rows sound.
pub trait ColumnElement: Pod + PartialEq + core::fmt::Debug {
    /// Type tag recorded at registration and checked at accessor bind
    const DATA_TYPE: DataType;
}

// Implement ColumnElement for the supported numeric types
macro_rules! impl_column_element {
    ($type:ty, $variant:ident) => {
        impl ColumnElement for $type {
            const DATA_TYPE: DataType = DataType::$variant;
        }
    };
}

impl_column_element!(f32, F32);
impl_column_element!(f64, F64);
impl_column_element!(i32, I32);
impl_column_element!(i64, I64);
impl_column_element!(u32, U32);
impl_column_element!(u64, U64);

/// Opaque identifier of a registered property column
///
/// Identifiers are allocated monotonically per container and stay unique for
/// the lifetime of the container; erasing a column never recycles its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyId(u64);

impl PropertyId {
    /// Reconstruct an identifier from its raw value
    pub const fn from_raw(raw: u64) -> Self {
        PropertyId(raw)
    }

    /// Get the raw value of this identifier
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "property #{}", self.0)
    }
}

/// Shape of one property column: element type plus fixed array width
///
/// A scalar column is simply a column of width 1. The width is fixed at
/// registration and never changes for the lifetime of the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnLayout {
    /// Element type stored in the column
    pub data_type: DataType,
    /// Number of elements per row (1 for scalar columns)
    pub width: usize,
}

/// Size of the buffer word all column storage is built from
pub const WORD_BYTES: usize = core::mem::size_of::<u64>();

impl ColumnLayout {
    /// Layout of a scalar column
    pub const fn scalar(data_type: DataType) -> Self {
        ColumnLayout { data_type, width: 1 }
    }

    /// Layout of a fixed-width array column
    pub const fn array(data_type: DataType, width: usize) -> Self {
        ColumnLayout { data_type, width }
    }

    /// Whether this column stores one element per row
    pub const fn is_scalar(&self) -> bool {
        self.width == 1
    }

    /// Bytes occupied by one row of this column
    ///
    /// Panics on overflow, which is the same failure class as exceeding the
    /// allocator's capacity limit.
    pub fn stride_bytes(&self) -> usize {
        match self.data_type.size_bytes().checked_mul(self.width) {
            Some(stride) => stride,
            None => panic!("column row stride overflows usize"),
        }
    }

    /// Elements (not bytes) held by `capacity` rows of this column
    pub fn elems_for(&self, capacity: usize) -> usize {
        match self.width.checked_mul(capacity) {
            Some(elems) => elems,
            None => panic!("column element count overflows usize"),
        }
    }

    /// Buffer words needed to hold `capacity` rows of this column
    ///
    /// The word count is rounded up, so every supported element type stays
    /// alignment-compatible with the backing buffer.
    pub fn words_for(&self, capacity: usize) -> usize {
        let bytes = match self.stride_bytes().checked_mul(capacity) {
            Some(bytes) => bytes,
            None => panic!("column byte size overflows usize"),
        };
        bytes.div_ceil(WORD_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_roundtrip() {
        for raw in 0u8..6 {
            let dt = DataType::from_u8(raw).unwrap();
            assert_eq!(dt.to_u8(), raw);
        }
        assert_eq!(DataType::from_u8(6), None);
    }

    #[test]
    fn test_data_type_sizes() {
        assert_eq!(DataType::F32.size_bytes(), 4);
        assert_eq!(DataType::F64.size_bytes(), 8);
        assert_eq!(DataType::I32.size_bytes(), core::mem::size_of::<i32>());
        assert_eq!(DataType::U64.size_bytes(), core::mem::size_of::<u64>());
    }

    #[test]
    fn test_element_tags_match() {
        assert_eq!(<f32 as ColumnElement>::DATA_TYPE, DataType::F32);
        assert_eq!(<i64 as ColumnElement>::DATA_TYPE, DataType::I64);
        assert_eq!(<u32 as ColumnElement>::DATA_TYPE, DataType::U32);
    }

    #[test]
    fn test_layout_strides() {
        let scalar = ColumnLayout::scalar(DataType::I32);
        assert!(scalar.is_scalar());
        assert_eq!(scalar.stride_bytes(), 4);

        let pair = ColumnLayout::array(DataType::F32, 2);
        assert!(!pair.is_scalar());
        assert_eq!(pair.stride_bytes(), 8);
        assert_eq!(pair.elems_for(48), 96);
    }

    #[test]
    fn test_words_round_up() {
        // 4-byte rows: 3 rows = 12 bytes = 2 words
        let scalar = ColumnLayout::scalar(DataType::F32);
        assert_eq!(scalar.words_for(3), 2);
        assert_eq!(scalar.words_for(0), 0);

        // 8-byte rows pack exactly
        let wide = ColumnLayout::scalar(DataType::F64);
        assert_eq!(wide.words_for(7), 7);

        // 12-byte rows: 3 rows = 36 bytes = 5 words
        let triple = ColumnLayout::array(DataType::U32, 3);
        assert_eq!(triple.words_for(3), 5);
    }

    #[test]
    fn test_property_id_raw_roundtrip() {
        let id = PropertyId::from_raw(17);
        assert_eq!(id.to_raw(), 17);
        assert!(PropertyId::from_raw(3) < PropertyId::from_raw(4));
    }
}

//! Propvec - Struct-of-Arrays Property Storage for Particle Simulations
//!
//! This library provides a resizable per-element property container: a
//! logically ordered sequence of rows, each carrying arbitrary, dynamically
//! registered typed data columns (positions, velocities, identifiers, bond
//! partners, ...). It is the storage foundation for spatial decomposition,
//! neighbor lists, force evaluation, and inter-partition exchange layers
//! built on top of it.
//!
//! ## Architecture
//!
//! Propvec follows a clean specification/implementation separation:
//!
//! - **propvec-core**: element types, column layout, and growth-policy math
//!   (no_std, no allocation)
//! - **propvec**: the concrete container with buffers, registry, and
//!   accessors
//!
//! ## Quick Start
//!
//! ```rust
//! use propvec::{GrowthPolicy, PropertyStore};
//!
//! // one container per spatial partition; capacity grows in blocks of 8
//! // and is only given back once 32 slots sit unused
//! let mut store = PropertyStore::with_policy(
//!     GrowthPolicy::new().with_granularity(8).with_shrink_threshold(32),
//! );
//! let kind = store.add_scalar::<u32>();
//! let velocity = store.add_array::<f64>(3);
//! store.resize(42);
//! assert_eq!(store.capacity(), 48);
//!
//! {
//!     let view = store.access_mut();
//!     let mut kinds = view.scalars_mut::<u32>(kind).unwrap();
//!     let mut velocities = view.arrays_mut::<f64>(velocity).unwrap();
//!     for row in view.rows_mut() {
//!         kinds[row] = 1;
//!         velocities[row][2] = -9.81;
//!     }
//! }
//!
//! // rows shift as a unit across every column
//! store.insert_copy(10, 6);
//! assert_eq!(store.len(), 43);
//! ```
//!
//! ## Features
//!
//! - **Uniform capacity**: every column is backed to the same capacity,
//!   managed by a per-instance growth policy with shrink slack
//! - **Typed accessors**: scalar and array column accessors bind once and
//!   index in O(1); capability (read vs write) and element type are checked
//!   in the type system
//! - **Ordered rows**: insert and erase shift the tail across all columns
//!   atomically and preserve the relative order of untouched rows
//! - **Safe traversal**: iterators and accessors borrow the container, so
//!   no handle can observe a reallocation

// Re-export core definitions
pub use propvec_core::{
    ColumnElement, ColumnLayout, DataType, GrowthPolicy, PropError, PropertyId, Result,
};

// Implementation modules
pub mod access;
pub mod iter;
pub mod store;

mod column;
mod table;

// Public exports
pub use access::{
    AccessMut, ArrayReader, ArrayWriter, Row, RowMut, ScalarReader, ScalarWriter,
};
pub use iter::{Rows, RowsMut};
pub use store::PropertyStore;

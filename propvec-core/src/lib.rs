#![no_std]

//! Propvec Core - Per-Element Property Column Definitions
//!
//! This crate provides the element type, column layout, and capacity policy
//! definitions for struct-of-arrays particle property storage

pub mod error;
pub mod layout;
pub mod policy;

pub use error::*;
pub use layout::*;
pub use policy::*;

//! Core types and utilities

pub mod cell;
pub mod index;
pub mod vec3;

pub use cell::Cell;
pub use index::CellIndex;
pub use vec3::Vec3;

//! Game implementations.

pub mod amazons;

//! External data sources.
//!
//! The only one is the credit-risk prediction endpoint (`predict`).

pub mod predict;

pub use predict::*;

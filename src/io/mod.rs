//! Input/output helpers.
//!
//! - JSON answer files for `predict --input` (`answers`)
//! - assessment exports (`export`)

pub mod answers;
pub mod export;

pub use answers::*;
pub use export::*;

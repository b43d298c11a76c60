//! Wizard state: the step machine and the session that owns the form.

pub mod session;
pub mod step;

pub use session::*;
pub use step::*;

//! Domain types shared by the wizard, the client, and the front-ends.
//!
//! - the field catalog and wizard steps (`schema`)
//! - raw form values (`form`)
//! - the normalized request body (`payload`)
//! - the endpoint's response (`prediction`)

pub mod form;
pub mod payload;
pub mod prediction;
pub mod schema;

pub use form::*;
pub use payload::*;
pub use prediction::*;
pub use schema::*;

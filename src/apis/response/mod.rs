//! Payment gateway responses.

mod model;

pub use model::*;

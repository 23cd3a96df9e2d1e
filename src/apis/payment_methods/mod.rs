//! Payment methods and the transactions they can prepare.

mod model;

pub use model::*;

//! Parameter groups making up a payment gateway request.

mod model;

pub use model::*;

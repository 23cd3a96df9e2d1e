//! Transport of transactions to the payment gateway.

mod api;

pub use api::PaymentsApi;

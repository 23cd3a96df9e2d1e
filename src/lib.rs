//! Rust client for the [Heidelpay](https://dev.heidelpay.com) payment gateway.
//!
//! # Usage
//!
//! ## Initialize a new `HeidelpayClient`
//!
//! ```rust,no_run
//! # use heidelpay_rust::HeidelpayClient;
//! let client = HeidelpayClient::new();
//! ```
//!
//! A client sends each transaction to the live or the sandbox payment URL, depending on the
//! `sandbox` flag of the transaction's [`Authentication`](crate::apis::request::Authentication).
//! To point the client somewhere else, use
//! [`with_environment`](crate::client::HeidelpayClientBuilder::with_environment).
//!
//! ## Authorize an iDEAL payment
//!
//! ```rust,no_run
//! # use heidelpay_rust::{HeidelpayClient, Error, apis::{payment_methods::*, request::*}};
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! # let client = HeidelpayClient::new();
//! let request = Request::new()
//!     .with_authentication(
//!         AuthenticationBuilder::default()
//!             .security_sender("31HA07BC8142C5A171745D00AD63D182")
//!             .user_login("31ha07bc8142c5a171744e5aef11ffd3")
//!             .user_password("93167DE7")
//!             .transaction_channel("31HA07BC8142C5A171744B56E61281E5")
//!             .sandbox(true)
//!             .build()
//!             .unwrap(),
//!     )
//!     .with_basket(
//!         BasketBuilder::default()
//!             .transaction_id("order-42")
//!             .amount_in_minor(2312u64)
//!             .currency(Currency::Eur)
//!             .secret("my-shared-secret")
//!             .build()
//!             .unwrap(),
//!     )
//!     .with_async_frontend(
//!         AsyncFrontendBuilder::default()
//!             .language("EN")
//!             .response_url("https://my.shop/heidelpay/response")
//!             .build()
//!             .unwrap(),
//!     );
//!
//! let response = client
//!     .payments
//!     .authorize(&IdealPaymentMethod::new(request))
//!     .await?;
//!
//! if response.is_success() {
//!     println!("Redirect the customer to: {}", response.payment_form_url()?);
//! } else {
//!     println!("Authorize failed: {:?}", response.error());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Prepare a transaction without sending it
//!
//! [`Authorize::authorize`](crate::apis::payment_methods::Authorize::authorize) only builds the
//! transaction, which is useful to inspect or log the parameters before sending them with
//! [`PaymentsApi::send`](crate::apis::payments::PaymentsApi::send).
//!
//! ## More examples
//!
//! Look into the [`demos`](../demos) for more example usages of this library.
//!
//! ```shell
//! cargo run --example authorize_ideal
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod client;
mod common;
pub mod error;
mod middlewares;
pub mod params;

pub use client::HeidelpayClient;
pub use error::Error;

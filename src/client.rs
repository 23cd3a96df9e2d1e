//! Module containing the main Heidelpay API client.

use crate::{
    apis::{payments::PaymentsApi, request::TransactionMode, HeidelpayClientInner},
    common::{DEFAULT_LIVE_PAYMENT_URL, DEFAULT_SANDBOX_PAYMENT_URL},
    middlewares::{
        error_handling::ErrorHandlingMiddleware, inject_user_agent::InjectUserAgentMiddleware,
    },
};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::RetryTransientMiddleware;
use reqwest_tracing::{DefaultSpanBackend, TracingMiddleware};
use retry_policies::{RetryDecision, RetryPolicy};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

/// Client for the Heidelpay payment gateway.
///
/// Automatic retries are disabled by default: a transaction whose response was lost may
/// still have been processed by the gateway, and sending it again creates a second one.
#[derive(Debug, Clone)]
pub struct HeidelpayClient {
    /// Payments APIs client.
    pub payments: PaymentsApi,
    inner: Arc<HeidelpayClientInner>,
}

impl HeidelpayClient {
    /// Builds a new [`HeidelpayClient`](crate::client::HeidelpayClient) with the default configuration.
    pub fn new() -> HeidelpayClient {
        HeidelpayClientBuilder::new().build()
    }

    /// Returns a new builder to configure a new [`HeidelpayClient`](crate::client::HeidelpayClient).
    pub fn builder() -> HeidelpayClientBuilder {
        HeidelpayClientBuilder::new()
    }

    /// URL transactions in the given mode are sent to.
    pub fn payment_url(&self, mode: TransactionMode) -> &Url {
        self.inner.environment.payment_url(mode)
    }
}

impl Default for HeidelpayClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`HeidelpayClient`](crate::client::HeidelpayClient).
#[derive(Debug)]
pub struct HeidelpayClientBuilder {
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    environment: Environment,
}

impl Default for HeidelpayClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeidelpayClientBuilder {
    /// Creates a new builder to configure a [`HeidelpayClient`](crate::client::HeidelpayClient).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            retry_policy: None,
            environment: Environment::default(),
        }
    }

    /// Consumes the builder and builds a new [`HeidelpayClient`](crate::client::HeidelpayClient).
    pub fn build(self) -> HeidelpayClient {
        let inner = Arc::new(HeidelpayClientInner {
            client: build_client_with_middleware(self.client, self.retry_policy),
            environment: self.environment,
        });

        HeidelpayClient {
            payments: PaymentsApi::new(inner.clone()),
            inner,
        }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets a [`RetryPolicy`](retry_policies::RetryPolicy) to retry transient failures
    /// (connection errors, `5xx` and `429` responses) with.
    ///
    /// Use `None` to disable retries again.
    pub fn with_retry_policy(
        mut self,
        retry_policy: impl Into<Option<Arc<dyn RetryPolicy + Send + Sync + 'static>>>,
    ) -> Self {
        self.retry_policy = retry_policy.into().map(DynRetryPolicy);
        self
    }

    /// Sets the environment to which this client should connect.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

fn build_client_with_middleware(
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
) -> ClientWithMiddleware {
    let mut builder = reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::<DefaultSpanBackend>::default())
        .with(InjectUserAgentMiddleware::new())
        .with(ErrorHandlingMiddleware);

    if let Some(retry_policy) = retry_policy {
        builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }

    builder.build()
}

/// Payment URLs of the gateway. The URL a transaction is sent to depends on its
/// [`TransactionMode`](crate::apis::request::TransactionMode).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Environment {
    live_url: Url,
    sandbox_url: Url,
}

impl Environment {
    pub fn new(live_url: Url, sandbox_url: Url) -> Self {
        Self {
            live_url,
            sandbox_url,
        }
    }

    /// Sends all transactions to the same URL, regardless of their mode.
    pub fn from_single_url(url: &Url) -> Self {
        Self::new(url.clone(), url.clone())
    }

    pub fn payment_url(&self, mode: TransactionMode) -> &Url {
        match mode {
            TransactionMode::Live => &self.live_url,
            TransactionMode::ConnectorTest => &self.sandbox_url,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(
            Url::parse(DEFAULT_LIVE_PAYMENT_URL).unwrap(),
            Url::parse(DEFAULT_SANDBOX_PAYMENT_URL).unwrap(),
        )
    }
}

/// Wrapper type around a retry policy because `dyn RetryPolicy` does not implement `RetryPolicy`.
#[derive(Clone)]
pub struct DynRetryPolicy(pub Arc<dyn RetryPolicy + Send + Sync + 'static>);

impl RetryPolicy for DynRetryPolicy {
    fn should_retry(&self, n_past_retries: u32) -> RetryDecision {
        self.0.should_retry(n_past_retries)
    }
}

impl Debug for DynRetryPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynRetryPolicy").finish_non_exhaustive()
    }
}

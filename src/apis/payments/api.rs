use crate::{
    apis::{
        payment_methods::{Authorize, Transaction},
        response::Response,
        HeidelpayClientInner,
    },
    params::Params,
    Error,
};
use std::sync::Arc;

/// Heidelpay payment gateway client.
#[derive(Clone, Debug)]
pub struct PaymentsApi {
    inner: Arc<HeidelpayClientInner>,
}

impl PaymentsApi {
    pub(crate) fn new(inner: Arc<HeidelpayClientInner>) -> Self {
        Self { inner }
    }

    /// Prepares and sends an authorize transaction for the given payment method.
    #[tracing::instrument(
        name = "Authorize",
        skip(self, payment_method),
        fields(
            brand = ?payment_method.brand(),
            amount_in_minor = ?payment_method.request().basket().map(|b| b.amount_in_minor),
            currency = ?payment_method.request().basket().map(|b| b.currency),
        )
    )]
    pub async fn authorize<M>(&self, payment_method: &M) -> Result<Response, Error>
    where
        M: Authorize,
    {
        let transaction = payment_method.authorize()?;
        self.send(&transaction).await
    }

    /// Sends a prepared transaction to the payment URL matching its mode.
    ///
    /// A transaction rejected by the gateway is still returned as `Ok`: check
    /// [`Response::is_success`](crate::apis::response::Response::is_success).
    #[tracing::instrument(
        name = "Send Transaction",
        skip(self, transaction),
        fields(
            payment_code = %transaction.payment_code(),
            mode = %transaction.mode(),
        )
    )]
    pub async fn send(&self, transaction: &Transaction) -> Result<Response, Error> {
        let body = self
            .inner
            .client
            .post(self.inner.environment.payment_url(transaction.mode()).clone())
            .form(transaction.params())
            .send()
            .await?
            .bytes()
            .await?;

        let response = Response::new(Params::from_form(&body));

        if response.is_success() {
            tracing::info!(
                unique_id = response.payment_reference_id().unwrap_or_default(),
                pending = response.is_pending(),
                "Transaction accepted"
            );
        } else if let Some(error) = response.error() {
            tracing::warn!(%error, "Transaction rejected");
        }

        Ok(response)
    }
}

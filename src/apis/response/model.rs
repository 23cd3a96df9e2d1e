use crate::{
    apis::request::security_hash,
    common::{
        PROCESSING_RESULT_ACK, PROCESSING_STATUS_CODE_WAITING, PROCESSING_TIMESTAMP_FORMAT,
    },
    params::Params,
    Error,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};
use subtle::ConstantTimeEq;

/// Payment codes whose payment form is rendered in an iframe.
static FRAME_PAYMENT_CODES: &[&str] = &["CC", "DC"];

/// Answer of the payment gateway to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    params: Params,
}

impl Response {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Parses the asynchronous notification posted by the gateway to the configured
    /// `FRONTEND.RESPONSE_URL`.
    pub fn from_post<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::new(Params::from_pairs(pairs))
    }

    /// All the raw parameters returned by the gateway.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns `true` if the gateway accepted the transaction (`PROCESSING.RESULT=ACK`).
    pub fn is_success(&self) -> bool {
        self.params.get("PROCESSING", "RESULT") == Some(PROCESSING_RESULT_ACK)
    }

    /// Returns `true` if the transaction is waiting for the customer,
    /// e.g. to complete the payment on their bank's page.
    pub fn is_pending(&self) -> bool {
        self.params.get("PROCESSING", "STATUS_CODE") == Some(PROCESSING_STATUS_CODE_WAITING)
    }

    /// Returns `true` if the gateway did not accept the transaction.
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Error code and message returned by the gateway, if the transaction was not successful.
    pub fn error(&self) -> Option<ProcessingError> {
        if !self.is_error() {
            return None;
        }

        Some(ProcessingError {
            code: self.params.get("PROCESSING", "RETURN_CODE").map(String::from),
            message: self.params.get("PROCESSING", "RETURN").map(String::from),
        })
    }

    /// Unique id assigned by the gateway to this transaction (`IDENTIFICATION.UNIQUEID`).
    ///
    /// Subsequent transactions (captures, refunds, ...) reference it.
    pub fn payment_reference_id(&self) -> Option<&str> {
        self.params
            .get("IDENTIFICATION", "UNIQUEID")
            .filter(|id| !id.is_empty())
    }

    /// Merchant side transaction id echoed back by the gateway.
    pub fn transaction_id(&self) -> Option<&str> {
        self.params.get("IDENTIFICATION", "TRANSACTIONID")
    }

    /// Payment code of the transaction, e.g. `OT.PA`.
    pub fn payment_code(&self) -> Option<&str> {
        self.params.get("PAYMENT", "CODE")
    }

    /// Payment method configuration returned by the gateway.
    ///
    /// Missing configuration yields empty maps.
    pub fn config(&self) -> Result<Config, Error> {
        Ok(Config {
            bank_country: self.json_map("CONFIG", "BANKCOUNTRY")?,
            brands: self.json_map("CONFIG", "BRANDS")?,
        })
    }

    /// URL the customer must be sent to in order to complete the payment.
    ///
    /// For card payments this is the URL of the payment iframe, otherwise the redirect URL.
    pub fn payment_form_url(&self) -> Result<&str, Error> {
        let is_frame_payment = self
            .payment_code()
            .and_then(|code| code.split('.').next())
            .map_or(false, |method| FRAME_PAYMENT_CODES.contains(&method));

        let url = if is_frame_payment {
            self.params.get("FRONTEND", "PAYMENT_FRAME_URL")
        } else {
            self.params.get("FRONTEND", "REDIRECT_URL")
        };

        url.filter(|url| !url.is_empty())
            .ok_or_else(|| Error::InvalidResponse("no payment form url returned".into()))
    }

    /// Checks that `CRITERION.SECRET` matches the hash of `transaction_id` and `secret`.
    pub fn verify_security_hash(&self, secret: &str, transaction_id: &str) -> Result<(), Error> {
        let returned = self
            .params
            .get("CRITERION", "SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::InvalidResponse("no security hash returned".into()))?;

        let expected = security_hash(transaction_id, secret);
        let matches: bool = returned
            .to_lowercase()
            .as_bytes()
            .ct_eq(expected.as_bytes())
            .into();
        if !matches {
            tracing::warn!(transaction_id, "Security hash mismatch");
            return Err(Error::SecurityHashMismatch);
        }

        Ok(())
    }

    /// Time at which the gateway processed the transaction.
    pub fn processing_timestamp(&self) -> Option<DateTime<Utc>> {
        self.params
            .get("PROCESSING", "TIMESTAMP")
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, PROCESSING_TIMESTAMP_FORMAT).ok())
            .map(|ts| Utc.from_utc_datetime(&ts))
    }

    fn json_map(&self, group: &str, name: &str) -> Result<BTreeMap<String, String>, Error> {
        match self.params.get(group, name) {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw).map_err(|e| {
                Error::InvalidResponse(format!("malformed {}.{}: {}", group, name, e))
            }),
            _ => Ok(BTreeMap::new()),
        }
    }
}

/// Payment method configuration returned along with a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Country code to country name of the supported banks.
    pub bank_country: BTreeMap<String, String>,
    /// Brand code (e.g. BIC) to display name of the supported banks.
    pub brands: BTreeMap<String, String>,
}

/// Reason of a transaction not accepted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingError {
    /// Return code, e.g. `800.100.152`.
    pub code: Option<String>,
    /// Human readable explanation.
    pub message: Option<String>,
}

impl Display for ProcessingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.code.as_deref().unwrap_or("unknown"),
            self.message.as_deref().unwrap_or("no message")
        )
    }
}

use crate::{
    apis::request::{Request, TransactionMode},
    params::Params,
    Error,
};
use std::fmt::{Debug, Display, Formatter};

/// Kind of transaction to send to the gateway.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum TransactionType {
    /// Reserve funds on the customer's payment method.
    Authorize,
}

impl TransactionType {
    /// Two letter code appended to the payment method code in `PAYMENT.CODE`.
    pub fn code(&self) -> &'static str {
        match self {
            TransactionType::Authorize => "PA",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A payment method supported by the gateway, holding the request it will send.
pub trait PaymentMethod: Debug + Send + Sync {
    /// Two letter payment method code, e.g. `OT` for online transfers.
    fn payment_code(&self) -> &'static str;

    /// Brand sent as `ACCOUNT.BRAND`, if the payment code covers more than one brand.
    fn brand(&self) -> Option<&'static str> {
        None
    }

    fn request(&self) -> &Request;

    fn request_mut(&mut self) -> &mut Request;

    /// Builds the transaction without sending it.
    fn prepare(&self, transaction_type: TransactionType) -> Result<Transaction, Error> {
        let mode = self
            .request()
            .authentication()
            .map(|a| a.transaction_mode())
            .ok_or_else(|| Error::InvalidRequest("missing authentication".into()))?;

        let payment_code = format!("{}.{}", self.payment_code(), transaction_type);

        let mut params = self.request().to_params()?;
        params.insert("PAYMENT", "CODE", &payment_code);
        params.insert_opt("ACCOUNT", "BRAND", self.brand());

        Ok(Transaction {
            payment_code,
            transaction_type,
            mode,
            params,
        })
    }
}

/// Payment methods that can reserve funds with an authorize transaction.
pub trait Authorize: PaymentMethod {
    /// Prepares an authorize transaction for this payment method.
    ///
    /// Send it with [`PaymentsApi::send`](crate::apis::payments::PaymentsApi::send),
    /// or use [`PaymentsApi::authorize`](crate::apis::payments::PaymentsApi::authorize) to do both at once.
    fn authorize(&self) -> Result<Transaction, Error> {
        self.prepare(TransactionType::Authorize)
    }
}

/// A transaction ready to be sent to the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    payment_code: String,
    transaction_type: TransactionType,
    mode: TransactionMode,
    params: Params,
}

impl Transaction {
    /// Full payment code, e.g. `OT.PA`.
    pub fn payment_code(&self) -> &str {
        &self.payment_code
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// Mode selecting the payment URL this transaction must be sent to.
    pub fn mode(&self) -> TransactionMode {
        self.mode
    }

    /// Parameters sent to the gateway.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Bank transfer through iDEAL, the Dutch online banking payment scheme.
#[derive(Debug, Clone, Default)]
pub struct IdealPaymentMethod {
    request: Request,
}

impl IdealPaymentMethod {
    pub fn new(request: Request) -> Self {
        Self { request }
    }
}

impl PaymentMethod for IdealPaymentMethod {
    fn payment_code(&self) -> &'static str {
        "OT"
    }

    fn brand(&self) -> Option<&'static str> {
        Some("IDEAL")
    }

    fn request(&self) -> &Request {
        &self.request
    }

    fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }
}

impl Authorize for IdealPaymentMethod {}

/// Bank transfer through Przelewy24, the Polish online banking payment scheme.
#[derive(Debug, Clone, Default)]
pub struct Przelewy24PaymentMethod {
    request: Request,
}

impl Przelewy24PaymentMethod {
    pub fn new(request: Request) -> Self {
        Self { request }
    }
}

impl PaymentMethod for Przelewy24PaymentMethod {
    fn payment_code(&self) -> &'static str {
        "OT"
    }

    fn brand(&self) -> Option<&'static str> {
        Some("PRZELEWY24")
    }

    fn request(&self) -> &Request {
        &self.request
    }

    fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }
}

impl Authorize for Przelewy24PaymentMethod {}

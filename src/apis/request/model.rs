use crate::{
    common::{FRONTEND_MODE, REQUEST_VERSION, SDK_NAME, SDK_VERSION},
    params::Params,
    Error,
};
use derive_builder::Builder;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// A group of related request parameters sharing the same key prefix.
pub(crate) trait ParameterGroup {
    fn write_params(&self, params: &mut Params);
}

/// Credentials and channel used to authenticate against the payment gateway.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), derive(Debug))]
pub struct Authentication {
    /// Security sender id (`SECURITY.SENDER`).
    pub security_sender: String,
    /// User login (`USER.LOGIN`).
    pub user_login: String,
    /// User password (`USER.PWD`).
    pub user_password: Token,
    /// Transaction channel id (`TRANSACTION.CHANNEL`). Each payment method has its own channel.
    pub transaction_channel: String,
    /// Send transactions to the sandbox instead of the live system.
    #[builder(default)]
    pub sandbox: bool,
}

impl Authentication {
    /// Returns the transaction mode matching the sandbox flag.
    pub fn transaction_mode(&self) -> TransactionMode {
        if self.sandbox {
            TransactionMode::ConnectorTest
        } else {
            TransactionMode::Live
        }
    }
}

impl ParameterGroup for Authentication {
    fn write_params(&self, params: &mut Params) {
        params.insert("SECURITY", "SENDER", &self.security_sender);
        params.insert("USER", "LOGIN", &self.user_login);
        params.insert("USER", "PWD", self.user_password.expose_secret());
        params.insert("TRANSACTION", "CHANNEL", &self.transaction_channel);
        params.insert("TRANSACTION", "MODE", self.transaction_mode().to_string());
    }
}

/// Mode of a transaction, which also selects the payment URL it is sent to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionMode {
    Live,
    ConnectorTest,
}

impl Display for TransactionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionMode::Live => write!(f, "LIVE"),
            TransactionMode::ConnectorTest => write!(f, "CONNECTOR_TEST"),
        }
    }
}

/// Customer name, address and contact details.
#[derive(Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into), derive(Debug))]
pub struct CustomerAddress {
    pub name_given: String,
    pub name_family: String,
    #[builder(default, setter(into, strip_option))]
    pub name_company: Option<String>,
    /// Identifier of the customer in the merchant's shop.
    #[builder(default, setter(into, strip_option))]
    pub shopper_id: Option<String>,
    pub street: String,
    /// State or region, e.g. `DE-BW`.
    #[builder(default, setter(into, strip_option))]
    pub state: Option<String>,
    pub zip: String,
    pub city: String,
    pub country: CountryCode,
    pub email: String,
}

impl ParameterGroup for CustomerAddress {
    fn write_params(&self, params: &mut Params) {
        params.insert("NAME", "GIVEN", &self.name_given);
        params.insert("NAME", "FAMILY", &self.name_family);
        params.insert_opt("NAME", "COMPANY", self.name_company.as_deref());
        params.insert_opt("IDENTIFICATION", "SHOPPERID", self.shopper_id.as_deref());
        params.insert("ADDRESS", "STREET", &self.street);
        params.insert_opt("ADDRESS", "STATE", self.state.as_deref());
        params.insert("ADDRESS", "ZIP", &self.zip);
        params.insert("ADDRESS", "CITY", &self.city);
        params.insert("ADDRESS", "COUNTRY", self.country.to_string());
        params.insert("CONTACT", "EMAIL", &self.email);
    }
}

/// Amount, currency and merchant side identification of a transaction.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), derive(Debug))]
pub struct Basket {
    /// Merchant side identifier of the transaction, e.g. an order id.
    ///
    /// Defaults to a random identifier.
    #[builder(default = "Uuid::new_v4().simple().to_string()")]
    pub transaction_id: String,
    /// Amount in the minor unit of the currency (e.g. cents).
    pub amount_in_minor: u64,
    pub currency: Currency,
    /// Shared secret used to compute `CRITERION.SECRET`.
    pub secret: Token,
    /// Text shown to the customer on their bank statement.
    #[builder(default, setter(into, strip_option))]
    pub usage: Option<String>,
}

impl Basket {
    /// Returns the value of `CRITERION.SECRET` for this basket.
    pub fn security_hash(&self) -> String {
        security_hash(&self.transaction_id, self.secret.expose_secret())
    }
}

impl ParameterGroup for Basket {
    fn write_params(&self, params: &mut Params) {
        params.insert("IDENTIFICATION", "TRANSACTIONID", &self.transaction_id);
        params.insert("PRESENTATION", "AMOUNT", format_amount(self.amount_in_minor));
        params.insert("PRESENTATION", "CURRENCY", self.currency.to_string());
        params.insert_opt("PRESENTATION", "USAGE", self.usage.as_deref());
        params.insert("CRITERION", "SECRET", self.security_hash());
    }
}

/// Asynchronous frontend configuration: the gateway will post the transaction result
/// to `response_url` and redirect the customer to the page returned from there.
#[derive(Debug, Clone, Eq, PartialEq, Builder)]
#[builder(setter(into), derive(Debug))]
pub struct AsyncFrontend {
    /// Two letter language code for the payment pages.
    pub language: String,
    pub response_url: String,
}

impl ParameterGroup for AsyncFrontend {
    fn write_params(&self, params: &mut Params) {
        params.insert("FRONTEND", "LANGUAGE", &self.language);
        params.insert("FRONTEND", "RESPONSE_URL", &self.response_url);
    }
}

/// All the data sent to the payment gateway for one transaction, apart from the payment code.
#[derive(Debug, Clone, Default)]
pub struct Request {
    authentication: Option<Authentication>,
    customer_address: Option<CustomerAddress>,
    basket: Option<Basket>,
    async_frontend: Option<AsyncFrontend>,
    reference_id: Option<String>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.set_authentication(authentication);
        self
    }

    pub fn with_customer_address(mut self, customer_address: CustomerAddress) -> Self {
        self.set_customer_address(customer_address);
        self
    }

    pub fn with_basket(mut self, basket: Basket) -> Self {
        self.set_basket(basket);
        self
    }

    pub fn with_async_frontend(mut self, async_frontend: AsyncFrontend) -> Self {
        self.set_async_frontend(async_frontend);
        self
    }

    /// Sets the unique id of a previous transaction this one refers to.
    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.set_reference_id(reference_id);
        self
    }

    pub fn set_authentication(&mut self, authentication: Authentication) -> &mut Self {
        self.authentication = Some(authentication);
        self
    }

    pub fn set_customer_address(&mut self, customer_address: CustomerAddress) -> &mut Self {
        self.customer_address = Some(customer_address);
        self
    }

    pub fn set_basket(&mut self, basket: Basket) -> &mut Self {
        self.basket = Some(basket);
        self
    }

    pub fn set_async_frontend(&mut self, async_frontend: AsyncFrontend) -> &mut Self {
        self.async_frontend = Some(async_frontend);
        self
    }

    pub fn set_reference_id(&mut self, reference_id: impl Into<String>) -> &mut Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    pub fn authentication(&self) -> Option<&Authentication> {
        self.authentication.as_ref()
    }

    pub fn customer_address(&self) -> Option<&CustomerAddress> {
        self.customer_address.as_ref()
    }

    pub fn basket(&self) -> Option<&Basket> {
        self.basket.as_ref()
    }

    pub fn async_frontend(&self) -> Option<&AsyncFrontend> {
        self.async_frontend.as_ref()
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }

    /// Flattens the request into the parameters sent to the payment gateway.
    ///
    /// Fails if authentication or basket are missing.
    pub fn to_params(&self) -> Result<Params, Error> {
        let authentication = self
            .authentication
            .as_ref()
            .ok_or_else(|| Error::InvalidRequest("missing authentication".into()))?;
        let basket = self
            .basket
            .as_ref()
            .ok_or_else(|| Error::InvalidRequest("missing basket data".into()))?;

        let mut params = Params::new();
        params.insert("REQUEST", "VERSION", REQUEST_VERSION);
        params.insert("CRITERION", "SDK_NAME", SDK_NAME);
        params.insert("CRITERION", "SDK_VERSION", SDK_VERSION);
        params.insert("FRONTEND", "MODE", FRONTEND_MODE);
        params.insert(
            "FRONTEND",
            "ENABLED",
            if self.async_frontend.is_some() {
                "TRUE"
            } else {
                "FALSE"
            },
        );
        params.insert_opt("IDENTIFICATION", "REFERENCEID", self.reference_id.as_deref());

        authentication.write_params(&mut params);
        basket.write_params(&mut params);
        if let Some(customer_address) = &self.customer_address {
            customer_address.write_params(&mut params);
        }
        if let Some(async_frontend) = &self.async_frontend {
            async_frontend.write_params(&mut params);
        }

        Ok(params)
    }
}

/// Computes the hex encoded SHA-512 of `transaction_id` followed by `secret`.
///
/// The gateway echoes this value back in `CRITERION.SECRET`, which allows verifying that
/// a response belongs to a transaction issued by the holder of the secret.
pub fn security_hash(transaction_id: &str, secret: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(transaction_id.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Formats an amount in minor units as the decimal string expected by the gateway.
fn format_amount(amount_in_minor: u64) -> String {
    format!("{}.{:02}", amount_in_minor / 100, amount_in_minor % 100)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Chf,
    Czk,
    Dkk,
    Eur,
    Gbp,
    Huf,
    Nok,
    Pln,
    Sek,
    Usd,
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Chf => write!(f, "CHF"),
            Currency::Czk => write!(f, "CZK"),
            Currency::Dkk => write!(f, "DKK"),
            Currency::Eur => write!(f, "EUR"),
            Currency::Gbp => write!(f, "GBP"),
            Currency::Huf => write!(f, "HUF"),
            Currency::Nok => write!(f, "NOK"),
            Currency::Pln => write!(f, "PLN"),
            Currency::Sek => write!(f, "SEK"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CountryCode {
    AT,
    BE,
    CH,
    CZ,
    DE,
    DK,
    ES,
    FR,
    GB,
    IT,
    NL,
    PL,
}

impl Display for CountryCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Variant names are already the ISO 3166-1 alpha-2 codes
        write!(f, "{:?}", self)
    }
}

/// Wrapper for a secret string that makes it harder to accidentally expose secrets
/// and ensures the backing memory is wiped on drop.
///
/// It is a wrapper around a [`secrecy::Secret`](secrecy::Secret).
///
/// ```rust
/// # use heidelpay_rust::apis::request::Token;
/// let token = Token::new("supersecret");
///
/// // The secret is redacted when printed with Debug
/// assert!(!format!("{:?}", token).contains("supersecret"));
///
/// // But can be manually exposed calling `expose_secret()`
/// assert_eq!(token.expose_secret(), "supersecret");
/// ```
#[derive(Clone, Debug)]
pub struct Token(Secret<String>);

impl Token {
    /// Wraps a secret string in a new `Token`.
    pub fn new<T: Into<String>>(s: T) -> Self {
        Self(Secret::new(s.into()))
    }

    /// Exposes a reference to the underlying secret string.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl<T> From<T> for Token
where
    T: Into<String>,
{
    fn from(s: T) -> Self {
        Token::new(s)
    }
}

use anyhow::Context;
use heidelpay_rust::{
    apis::{
        payment_methods::IdealPaymentMethod,
        request::{
            AsyncFrontendBuilder, AuthenticationBuilder, BasketBuilder, CountryCode, Currency,
            CustomerAddressBuilder, Request,
        },
    },
    HeidelpayClient,
};

#[derive(serde::Deserialize, Debug)]
struct Config {
    security_sender: String,
    user_login: String,
    user_password: String,
    transaction_channel: String,
    secret: String,
    response_url: String,
    #[serde(default)]
    sandbox: bool,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("HEIDELPAY"))
            .build()?
            .try_deserialize()
            .context("Failed to assemble the required configuration")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;

    let request = Request::new()
        .with_authentication(
            AuthenticationBuilder::default()
                .security_sender(config.security_sender)
                .user_login(config.user_login)
                .user_password(config.user_password)
                .transaction_channel(config.transaction_channel)
                .sandbox(config.sandbox)
                .build()?,
        )
        .with_customer_address(
            CustomerAddressBuilder::default()
                .name_given("Heidel")
                .name_family("Berger-Payment")
                .street("Vagerowstr. 18")
                .zip("69115")
                .city("Heidelberg")
                .country(CountryCode::DE)
                .email("development@heidelpay.de")
                .build()?,
        )
        .with_basket(
            BasketBuilder::default()
                .amount_in_minor(2312u64)
                .currency(Currency::Eur)
                .secret(config.secret)
                .build()?,
        )
        .with_async_frontend(
            AsyncFrontendBuilder::default()
                .language("EN")
                .response_url(config.response_url)
                .build()?,
        );

    let client = HeidelpayClient::new();
    let response = client
        .payments
        .authorize(&IdealPaymentMethod::new(request))
        .await?;

    if let Some(error) = response.error() {
        anyhow::bail!("Authorize rejected: {}", error);
    }

    tracing::info!(
        "Authorized transaction {}",
        response.payment_reference_id().unwrap_or_default()
    );

    let config = response.config()?;
    for (bic, name) in &config.brands {
        tracing::info!("Available bank: {} ({})", name, bic);
    }

    tracing::info!("Redirect the customer to: {}", response.payment_form_url()?);

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}

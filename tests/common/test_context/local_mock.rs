use crate::common::{mock_server::HeidelpayMockServer, GatewayAccount};
use heidelpay_rust::{client::Environment, params::Params, HeidelpayClient};
use uuid::Uuid;

pub struct TestContext {
    pub client: HeidelpayClient,
    pub account: GatewayAccount,
    mock_server: HeidelpayMockServer,
}

impl TestContext {
    pub async fn start() -> Self {
        // Generate a new set of random credentials and channels for this specific test
        let random_id = || Uuid::new_v4().simple().to_string().to_uppercase();
        let account = GatewayAccount {
            security_sender: random_id(),
            user_login: random_id().to_lowercase(),
            user_password: random_id()[..8].to_string(),
            ideal_channel: random_id(),
            przelewy24_channel: random_id(),
        };

        // Setup a new mock server
        let mock_server = HeidelpayMockServer::start(&account).await;

        // Configure a new HeidelpayClient to point to the mock server
        let client = HeidelpayClient::builder()
            .with_environment(Environment::from_single_url(mock_server.url()))
            .build();

        Self {
            client,
            account,
            mock_server,
        }
    }

    /// Parameters the mock gateway received for the transaction with the given unique id.
    pub fn received_transaction(&self, unique_id: &str) -> Option<Params> {
        self.mock_server.received_transaction(unique_id)
    }
}

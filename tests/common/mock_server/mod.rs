mod routes;

use crate::common::GatewayAccount;
use actix_web::{web, App, HttpServer};
use heidelpay_rust::params::Params;
use reqwest::Url;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tokio::sync::oneshot;

static MOCK_REDIRECT_URL: &str = "https://mock.redirect.uri/ngw/redirect";

#[derive(Clone)]
struct MockServerConfiguration {
    account: GatewayAccount,
    /// Transaction channel to the only brand accepted on it.
    channel_brands: HashMap<String, &'static str>,
}

/// Transactions accepted by the mock server, by unique id.
type MockServerStorage = Arc<RwLock<HashMap<String, Params>>>;

/// Simple mock of the Heidelpay payment gateway used in local integration tests.
pub struct HeidelpayMockServer {
    url: Url,
    shutdown: Option<oneshot::Sender<()>>,
    storage: MockServerStorage,
}

impl HeidelpayMockServer {
    pub async fn start(account: &GatewayAccount) -> Self {
        let configuration = MockServerConfiguration {
            account: account.clone(),
            channel_brands: [
                (account.ideal_channel.clone(), "IDEAL"),
                (account.przelewy24_channel.clone(), "PRZELEWY24"),
            ]
            .into_iter()
            .collect(),
        };

        // Setup the in-memory storage
        let storage = MockServerStorage::default();
        let storage_clone = storage.clone();

        // Setup the mock HTTP server and bind it to a random port
        let http_server_factory = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(configuration.clone()))
                .app_data(web::Data::new(storage.clone()))
                .service(
                    web::resource("/ngw/post").route(web::post().to(routes::post_transaction)),
                )
        })
        .workers(1)
        .bind("127.0.0.1:0")
        .unwrap();

        // Retrieve the address and port the server was bound to
        let addr = http_server_factory.addrs().first().cloned().unwrap();

        // Prepare a oneshot channel to kill the HTTP server when this struct is dropped
        let (shutdown_sender, shutdown_recv) = oneshot::channel();

        // Start the server in another task
        let http_server = http_server_factory.run();
        tokio::spawn(async move {
            tokio::select! {
                _ = http_server => panic!("HTTP server crashed"),
                _ = shutdown_recv => { /* Intentional shutdown */ }
            }
        });

        Self {
            url: Url::parse(&format!("http://{}/ngw/post", addr)).unwrap(),
            shutdown: Some(shutdown_sender),
            storage: storage_clone,
        }
    }

    /// Payment URL of the mock gateway.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Parameters received for the transaction with the given unique id.
    pub fn received_transaction(&self, unique_id: &str) -> Option<Params> {
        self.storage.read().unwrap().get(unique_id).cloned()
    }
}

impl Drop for HeidelpayMockServer {
    fn drop(&mut self) {
        // Send a shutdown signal to the actix server on drop
        let _ = self.shutdown.take().unwrap().send(());
    }
}

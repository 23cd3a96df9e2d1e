use crate::common::mock_server::{MockServerConfiguration, MockServerStorage, MOCK_REDIRECT_URL};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use chrono::Utc;
use heidelpay_rust::params::Params;
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

/// POST /ngw/post
pub(super) async fn post_transaction(
    req: HttpRequest,
    configuration: web::Data<MockServerConfiguration>,
    storage: web::Data<MockServerStorage>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    // User agent must be set by the client on every request
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    if user_agent != Some(concat!("heidelpay-rust/", env!("CARGO_PKG_VERSION"))) {
        return HttpResponse::BadRequest().body("Invalid User-Agent");
    }

    let request = Params::from_pairs(form.into_inner());

    let mut response = match validate(&configuration, &request) {
        Ok(()) => accept(&request, &storage),
        Err((code, message)) => reject(code, message),
    };

    // The gateway echoes back every request parameter, except for the credentials
    for (key, value) in request.iter() {
        if key != "USER.PWD" && !response.contains_key(key) {
            response.insert_key(key, value);
        }
    }

    HttpResponse::Ok()
        .content_type("application/x-www-form-urlencoded;charset=UTF-8")
        .body(
            url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(response.iter())
                .finish(),
        )
}

fn validate(
    configuration: &MockServerConfiguration,
    request: &Params,
) -> Result<(), (&'static str, &'static str)> {
    let account = &configuration.account;
    if request.get("SECURITY", "SENDER") != Some(account.security_sender.as_str())
        || request.get("USER", "LOGIN") != Some(account.user_login.as_str())
        || request.get("USER", "PWD") != Some(account.user_password.as_str())
    {
        return Err(("800.900.300", "invalid authentication information"));
    }

    let brand = request
        .get("TRANSACTION", "CHANNEL")
        .and_then(|channel| configuration.channel_brands.get(channel))
        .ok_or(("800.100.501", "Card or Payment method not supported on channel"))?;

    if request.get("TRANSACTION", "MODE") != Some("CONNECTOR_TEST") {
        return Err(("800.900.200", "transaction mode not allowed on sandbox"));
    }

    if request.get("PAYMENT", "CODE") != Some("OT.PA") || request.get("ACCOUNT", "BRAND") != Some(brand)
    {
        return Err(("100.100.101", "invalid payment code or brand"));
    }

    for key in [
        "IDENTIFICATION.TRANSACTIONID",
        "PRESENTATION.AMOUNT",
        "PRESENTATION.CURRENCY",
        "CRITERION.SECRET",
        "FRONTEND.RESPONSE_URL",
    ] {
        if request.get_key(key).map_or(true, str::is_empty) {
            return Err(("200.100.101", "invalid or missing request parameter"));
        }
    }

    Ok(())
}

fn accept(request: &Params, storage: &MockServerStorage) -> Params {
    let unique_id = Uuid::new_v4().simple().to_string().to_uppercase();

    let mut response = Params::new();
    response.insert("PROCESSING", "RESULT", "ACK");
    response.insert("PROCESSING", "STATUS", "WAITING");
    response.insert("PROCESSING", "STATUS_CODE", "80");
    response.insert("PROCESSING", "CODE", "OT.PA.80.00");
    response.insert("PROCESSING", "RETURN_CODE", "000.200.000");
    response.insert("PROCESSING", "RETURN", "Transaction pending");
    response.insert(
        "PROCESSING",
        "TIMESTAMP",
        Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    response.insert("IDENTIFICATION", "UNIQUEID", &unique_id);
    response.insert(
        "FRONTEND",
        "REDIRECT_URL",
        format!("{}/{}", MOCK_REDIRECT_URL, unique_id),
    );

    if request.get("ACCOUNT", "BRAND") == Some("IDEAL") {
        response.insert(
            "CONFIG",
            "BANKCOUNTRY",
            json!({ "NL": "Niederlande" }).to_string(),
        );
        response.insert(
            "CONFIG",
            "BRANDS",
            json!({
                "INGBNL2A": "Issuer Simulation V3 - ING",
                "RABONL2U": "Issuer Simulation V3 - RABO"
            })
            .to_string(),
        );
    }

    storage
        .write()
        .unwrap()
        .insert(unique_id, request.clone());

    response
}

fn reject(code: &str, message: &str) -> Params {
    let mut response = Params::new();
    response.insert("PROCESSING", "RESULT", "NOK");
    response.insert("PROCESSING", "STATUS", "REJECTED_VALIDATION");
    response.insert("PROCESSING", "STATUS_CODE", "70");
    response.insert("PROCESSING", "RETURN_CODE", code);
    response.insert("PROCESSING", "RETURN", message);
    response
}

use crate::error::{ApiError, Error};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which translates non successful HTTP responses returned from the
/// payment gateway into [`Error::ApiError`](crate::error::Error)s.
///
/// Transactions rejected by the gateway are returned with a `200 OK` status and
/// pass through untouched.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an ApiError if the response is not a success
        if !response.status().is_success() {
            tracing::debug!("Failed HTTP request. Status code: {}", response.status());

            let api_error = api_error_from_response(response).await?;
            return Err(Error::ApiError(api_error).into());
        }

        Ok(response)
    }
}

async fn api_error_from_response(response: Response) -> reqwest_middleware::Result<ApiError> {
    let status = response.status();
    let body = response.text().await?;

    Ok(ApiError {
        status: status.as_u16(),
        title: status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string(),
        detail: Some(body.trim().to_string()).filter(|b| !b.is_empty()),
    })
}

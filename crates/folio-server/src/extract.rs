//! Request body extraction
//!
//! Bodies are taken as raw JSON and handed to the validators in
//! `folio-core`, so a malformed body is reported through the same
//! `details` list as a failed field rule.

use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use folio_core::ValidationErrors;

/// Raw JSON body
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

/// Body was not JSON (bad syntax, wrong content type, unreadable)
#[derive(Debug)]
pub struct MalformedBody(pub ValidationErrors);

impl MalformedBody {
    pub fn into_errors(self) -> ValidationErrors {
        self.0
    }
}

/// Handlers normally take `Result<JsonBody, MalformedBody>` and render the
/// rejection in their own shape; this is the fallback.
impl IntoResponse for MalformedBody {
    fn into_response(self) -> Response {
        let body = json!({ "error": "Invalid request data", "details": self.0 });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = MalformedBody;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(MalformedBody(ValidationErrors::malformed(rejection.body_text())))
            }
        }
    }
}

//! Dispatch input extraction
//!
//! `user_id` may arrive in the query string, a JSON body or a form body.
//! A value in the body wins over one in the query string, including an
//! explicit JSON `null`; an empty body counts as no body. Repeated keys keep
//! their last value, and a JSON body that is not an object carries no
//! `user_id`.

use crate::error::ApiError;
use crate::types::FieldPairs;
use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::Form;
use serde_json::Value;
use userq_core::application::DispatchRequest;
use userq_core::domain::UserId;
use userq_core::error::AppError;

/// Upper bound on buffered request bodies, enforced by the router
pub const MAX_BODY_BYTES: usize = 64 * 1024;

const USER_ID_FIELD: &str = "user_id";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Extracted and coerced dispatch request
#[derive(Debug)]
pub struct DispatchInput(pub DispatchRequest);

fn last_user_id(pairs: FieldPairs) -> Option<Value> {
    pairs
        .into_iter()
        .rev()
        .find(|(key, _)| key == USER_ID_FIELD)
        .map(|(_, value)| Value::String(value))
}

impl<S> FromRequest<S> for DispatchInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let from_query = match req.uri().query() {
            Some(_) => last_user_id(Query::<FieldPairs>::try_from_uri(req.uri())?.0),
            None => None,
        };

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let bytes = Bytes::from_request(req, state).await?;

        let from_body = if bytes.is_empty() {
            None
        } else if content_type.starts_with("application/json") {
            match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(mut fields) => fields.remove(USER_ID_FIELD),
                _ => None,
            }
        } else if content_type.starts_with(FORM_CONTENT_TYPE) {
            // Form reads the query string on GET/HEAD; rebuild as POST so it reads the body
            let form_req = Request::builder()
                .method(Method::POST)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(Body::from(bytes))
                .map_err(|e| ApiError::bad_request(format!("Invalid form request: {}", e)))?;
            last_user_id(Form::<FieldPairs>::from_request(form_req, state).await?.0)
        } else {
            None
        };

        let user_id = match from_body.or(from_query) {
            Some(value) => UserId::from_json(&value).map_err(AppError::from)?,
            None => UserId::default(),
        };

        Ok(DispatchInput(DispatchRequest { user_id }))
    }
}

//! Axum extractor for raw address input
//!
//! Write endpoints accept the same key-value field map whether the body is
//! url-encoded, multipart, or a flat JSON object. The extractor only
//! collects the fields; validation happens inside the service so that its
//! result is reported in the operation's uniform outcome.

use super::FormFields;
use crate::core::error::RequestError;
use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use serde_json::{Map, Value};

/// Field map extracted from a request body
#[derive(Debug, Clone, Default)]
pub struct FormInput(pub FormFields);

impl FormInput {
    pub fn into_inner(self) -> FormFields {
        self.0
    }
}

impl std::ops::Deref for FormInput {
    type Target = FormFields;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequest<S> for FormInput
where
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| RequestError::InvalidBody(e.body_text()))?;
            return from_multipart(multipart).await.map(FormInput);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<FormFields>::from_request(req, state)
                .await
                .map_err(|e| RequestError::InvalidBody(e.body_text()))?;
            return Ok(FormInput(fields));
        }

        if content_type.starts_with("application/json") {
            let Json(object) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| RequestError::InvalidBody(e.body_text()))?;
            return from_json(object).map(FormInput);
        }

        Err(RequestError::UnsupportedContentType(content_type))
    }
}

async fn from_multipart(mut multipart: Multipart) -> Result<FormFields, RequestError> {
    let mut fields = FormFields::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RequestError::InvalidBody(e.body_text()))?
    {
        // File parts carry no address data
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let text = field
            .text()
            .await
            .map_err(|e| RequestError::InvalidBody(e.body_text()))?;
        fields.insert(name, text);
    }
    Ok(fields)
}

/// Flatten a JSON object into string fields
///
/// Scalars are stringified and `null` is treated as absent. Nested values
/// are rejected.
fn from_json(object: Map<String, Value>) -> Result<FormFields, RequestError> {
    let mut fields = FormFields::new();
    for (key, value) in object {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(RequestError::InvalidBody(format!(
                    "field '{}' must be a scalar value",
                    key
                )));
            }
        };
        fields.insert(key, text);
    }
    Ok(fields)
}

//! JSON body extractor. An empty body or any non-object value reads as `{}`; malformed JSON is a 400
//! in the API's error shape.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?
        };
        let object = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        serde_json::from_value(Value::Object(object))
            .map(JsonBody)
            .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
    }
}

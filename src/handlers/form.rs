use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::dev::Payload;
use actix_web::http::header::{self, HeaderMap};
use actix_web::web::BytesMut;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Upper bound on a submitted body, summed across all multipart fields.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Flat `name -> value` map decoded from a multipart, urlencoded, or JSON body.
#[derive(Debug, Default)]
pub struct SubmittedFields(HashMap<String, String>);

impl SubmittedFields {
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }
}

impl FromRequest for SubmittedFields {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let headers = req.headers().clone();
        let payload = payload.take();

        Box::pin(async move {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_ascii_lowercase();
            let essence = content_type.split(';').next().unwrap_or("").trim().to_string();

            let fields = match essence.as_str() {
                "multipart/form-data" => read_multipart(&headers, payload).await?,
                "application/x-www-form-urlencoded" => {
                    let body = read_body(payload).await?;
                    url::form_urlencoded::parse(&body).into_owned().collect()
                }
                "application/json" => {
                    let body = read_body(payload).await?;
                    json_fields(&body)?
                }
                // An empty body carries no fields whatever its declared type.
                other => {
                    let body = read_body(payload).await?;
                    if !body.is_empty() {
                        return Err(AppError::UnsupportedMediaType(format!(
                            "Unsupported content type '{}'",
                            other
                        )));
                    }
                    HashMap::new()
                }
            };

            Ok(SubmittedFields(fields))
        })
    }
}

async fn read_body(mut payload: Payload) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| AppError::BadRequest(err.to_string()))?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

async fn read_multipart(headers: &HeaderMap, payload: Payload) -> Result<HashMap<String, String>, AppError> {
    let mut multipart = Multipart::new(headers, payload);
    let mut fields = HashMap::new();
    let mut total = 0;

    while let Some(item) = multipart.next().await {
        let mut field = item.map_err(|err| AppError::BadRequest(err.to_string()))?;
        let name = field.content_disposition().get_name().map(str::to_string);

        let mut value = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| AppError::BadRequest(err.to_string()))?;
            total += chunk.len();
            if total > MAX_BODY_BYTES {
                return Err(too_large());
            }
            value.extend_from_slice(&chunk);
        }

        if let Some(name) = name {
            fields.insert(name, String::from_utf8_lossy(&value).into_owned());
        }
    }

    Ok(fields)
}

/// Scalars become strings and null becomes empty; nested values are dropped.
fn json_fields(body: &[u8]) -> Result<HashMap<String, String>, AppError> {
    let object: Map<String, Value> = serde_json::from_slice(body)
        .map_err(|err| AppError::BadRequest(format!("Malformed JSON body: {}", err)))?;

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(text) => text,
                Value::Null => String::new(),
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key, value))
        })
        .collect())
}

fn too_large() -> AppError {
    AppError::PayloadTooLarge(format!("Request body exceeds {} bytes", MAX_BODY_BYTES))
}

//! Provider contract and per-attempt error model.
//!
//! A provider is one named upstream (or derived) price source. The chain
//! runner in [`crate::chain`] tries providers in order; every failure is
//! classified as one of three [`ProviderErrorKind`]s and never escapes the
//! chain.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::http_client::{HttpClient, HttpRequest};
use crate::ValidationError;

/// Classification of a single failed provider attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Network failure, timeout or non-success HTTP status.
    TransportFailure,
    /// Body was not valid JSON.
    ParseFailure,
    /// JSON parsed but did not have the expected shape or values.
    MalformedResponse,
}

/// Structured error recorded for a failed provider attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::TransportFailure,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::ParseFailure,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::MalformedResponse,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::TransportFailure => "provider.transport_failure",
            ProviderErrorKind::ParseFailure => "provider.parse_failure",
            ProviderErrorKind::MalformedResponse => "provider.malformed_response",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

impl From<ValidationError> for ProviderError {
    fn from(error: ValidationError) -> Self {
        Self::malformed(error.to_string())
    }
}

/// Transport and timeout shared by every attempt of one chain run.
#[derive(Clone, Copy)]
pub struct FetchContext<'a> {
    pub http: &'a dyn HttpClient,
    pub timeout_ms: u64,
}

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// One entry of a provider chain.
///
/// Implementations are stateless with respect to a single fetch and must be
/// `Send + Sync` so chains can be shared between tasks.
pub trait Provider: Send + Sync {
    type Output;

    /// Stable name used in logs, diagnostics and [`crate::PriceRecord::source`].
    fn name(&self) -> &'static str;

    /// Performs one attempt. No retries happen inside a provider.
    fn fetch<'a>(&'a self, ctx: FetchContext<'a>) -> ProviderFuture<'a, Self::Output>;
}

/// Normalizer from a decoded JSON body to a provider output.
pub type Normalizer<T> = fn(&Value) -> Result<T, ProviderError>;

/// Provider backed by a single fixed-URL JSON GET.
pub struct JsonProvider<T> {
    name: &'static str,
    url: &'static str,
    normalize: Normalizer<T>,
}

impl<T> JsonProvider<T> {
    pub const fn new(name: &'static str, url: &'static str, normalize: Normalizer<T>) -> Self {
        Self {
            name,
            url,
            normalize,
        }
    }

    pub fn normalize(&self, body: &Value) -> Result<T, ProviderError> {
        (self.normalize)(body)
    }
}

impl<T: Send> Provider for JsonProvider<T> {
    type Output = T;

    fn name(&self) -> &'static str {
        self.name
    }

    fn fetch<'a>(&'a self, ctx: FetchContext<'a>) -> ProviderFuture<'a, T> {
        Box::pin(async move {
            let body = fetch_json(ctx, self.url).await?;
            self.normalize(&body)
        })
    }
}

/// Issues a GET and decodes the body, classifying failures.
pub async fn fetch_json(ctx: FetchContext<'_>, url: &str) -> Result<Value, ProviderError> {
    let request = HttpRequest::get(url).with_timeout_ms(ctx.timeout_ms);
    let response = ctx.http.execute(request).await.map_err(|error| {
        if error.timed_out() {
            ProviderError::transport(format!("timed out: {}", error.message()))
        } else {
            ProviderError::transport(error.message())
        }
    })?;

    if !response.is_success() {
        return Err(ProviderError::transport(format!(
            "upstream returned status {}",
            response.status
        )));
    }

    serde_json::from_str(&response.body)
        .map_err(|error| ProviderError::parse(format!("invalid JSON body: {error}")))
}

/// Reads a number at a JSON pointer, accepting numeric strings as exchanges
/// commonly quote prices that way.
pub fn number_at(body: &Value, pointer: &str) -> Result<f64, ProviderError> {
    let value = body
        .pointer(pointer)
        .ok_or_else(|| ProviderError::malformed(format!("missing field '{pointer}'")))?;

    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ProviderError::malformed(format!("field '{pointer}' is not numeric")))?;

    if !number.is_finite() {
        return Err(ProviderError::malformed(format!(
            "field '{pointer}' is not finite"
        )));
    }

    Ok(number)
}

/// Like [`number_at`] but treats an absent or null field as `default`.
pub fn number_at_or(body: &Value, pointer: &str, default: f64) -> Result<f64, ProviderError> {
    match body.pointer(pointer) {
        None | Some(Value::Null) => Ok(default),
        Some(_) => number_at(body, pointer),
    }
}

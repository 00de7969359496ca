//! Token extraction from the sign-in reply.
//!
//! The platform has been seen answering with a JSON object carrying the
//! token under `token` or `jwt`, and with a bare (sometimes quoted) JWT as
//! plain text. Each shape is one [`TokenNormalizer`]; a [`NormalizerChain`]
//! tries them in order.

use serde_json::{Map, Value};

/// Turns a successful sign-in body into a token.
pub trait TokenNormalizer: Send + Sync {
    /// Returns `None` when this strategy does not apply or yields nothing.
    fn extract(&self, body: &[u8]) -> Option<String>;
}

/// Reads the first string field found among `fields` in a JSON object.
#[derive(Debug, Clone)]
pub struct JsonFieldNormalizer {
    fields: Vec<String>,
}

impl JsonFieldNormalizer {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for JsonFieldNormalizer {
    fn default() -> Self {
        Self::new(["token", "jwt"])
    }
}

impl TokenNormalizer for JsonFieldNormalizer {
    fn extract(&self, body: &[u8]) -> Option<String> {
        let object: Map<String, Value> = serde_json::from_slice(body).ok()?;
        self.fields
            .iter()
            .find_map(|field| object.get(field).and_then(Value::as_str))
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
    }
}

/// Uses the whole body, minus surrounding quotes and whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextNormalizer;

impl TokenNormalizer for PlainTextNormalizer {
    fn extract(&self, body: &[u8]) -> Option<String> {
        let text = String::from_utf8_lossy(body);
        let token = text
            .trim_matches(|c| matches!(c, '"' | ' ' | '\n' | '\r' | '\t'))
            .trim();
        (!token.is_empty()).then(|| token.to_owned())
    }
}

/// Ordered list of strategies; the first non-empty token wins.
pub struct NormalizerChain {
    normalizers: Vec<Box<dyn TokenNormalizer>>,
}

impl NormalizerChain {
    pub fn new() -> Self {
        Self {
            normalizers: Vec::new(),
        }
    }

    /// Append a strategy, tried after every one already registered.
    pub fn with(mut self, normalizer: impl TokenNormalizer + 'static) -> Self {
        self.normalizers.push(Box::new(normalizer));
        self
    }
}

impl Default for NormalizerChain {
    /// JSON `token`/`jwt` first, then the raw body.
    fn default() -> Self {
        Self::new()
            .with(JsonFieldNormalizer::default())
            .with(PlainTextNormalizer)
    }
}

impl TokenNormalizer for NormalizerChain {
    fn extract(&self, body: &[u8]) -> Option<String> {
        self.normalizers.iter().find_map(|n| n.extract(body))
    }
}

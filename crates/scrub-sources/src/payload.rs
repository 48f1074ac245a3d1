//! Payload normalization: raw cell text to a flat record

use scrub_core::Record;
use serde_json::Value;
use thiserror::Error;

use crate::literal::{self, LiteralError};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("literal: {0}")]
    Literal(#[from] LiteralError),

    #[error("payload is a {0}, not a mapping")]
    NotAMapping(&'static str),
}

fn into_record(value: Value) -> Result<Record, ParseError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(ParseError::NotAMapping("list")),
        Value::String(_) => Err(ParseError::NotAMapping("string")),
        Value::Number(_) => Err(ParseError::NotAMapping("number")),
        Value::Bool(_) => Err(ParseError::NotAMapping("boolean")),
        Value::Null => Err(ParseError::NotAMapping("null")),
    }
}

/// One way of turning payload text into a record
pub trait PayloadParser: Send + Sync {
    fn name(&self) -> &'static str;

    fn parse(&self, raw: &str) -> Result<Record, ParseError>;
}

/// Plain JSON
pub struct StrictJson;

impl PayloadParser for StrictJson {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, raw: &str) -> Result<Record, ParseError> {
        into_record(serde_json::from_str(raw.trim())?)
    }
}

/// Literal expressions with single quotes, `True`/`None` and friends
pub struct LiteralExpr;

impl PayloadParser for LiteralExpr {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn parse(&self, raw: &str) -> Result<Record, ParseError> {
        into_record(literal::parse(raw.trim())?)
    }
}

/// JSON after swapping every single quote for a double quote
pub struct QuoteSubstituted;

impl PayloadParser for QuoteSubstituted {
    fn name(&self) -> &'static str {
        "quote-substituted"
    }

    fn parse(&self, raw: &str) -> Result<Record, ParseError> {
        into_record(serde_json::from_str(&raw.replace('\'', "\""))?)
    }
}

/// Tries each parser in order; the first success wins
pub struct PayloadNormalizer {
    parsers: Vec<Box<dyn PayloadParser>>,
}

impl PayloadNormalizer {
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(StrictJson),
                Box::new(LiteralExpr),
                Box::new(QuoteSubstituted),
            ],
        }
    }

    /// Parse a payload, or `None` if no parser accepts it
    pub fn try_normalize(&self, raw: &str) -> Option<Record> {
        if raw.trim().is_empty() {
            return Some(Record::new());
        }

        for parser in &self.parsers {
            match parser.parse(raw) {
                Ok(record) => {
                    tracing::trace!(parser = parser.name(), fields = record.len(), "payload parsed");
                    return Some(record);
                }
                Err(e) => tracing::trace!(parser = parser.name(), error = %e, "parser rejected payload"),
            }
        }

        let tried: Vec<_> = self.parsers.iter().map(|p| p.name()).collect();
        tracing::debug!(?tried, "payload not parseable, treating as empty");
        None
    }

    /// Parse a payload; unparseable input yields an empty record
    pub fn normalize(&self, raw: &str) -> Record {
        self.try_normalize(raw).unwrap_or_default()
    }
}

impl Default for PayloadNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

//! Core domain models for scrub
//!
//! This crate contains:
//! - Domain models (Record, Category, SignalSet, Verdict)
//! - The key taxonomy (field-name aliases per category)
//! - Shared error type

pub mod category;
pub mod error;
pub mod record;
pub mod signal;

pub use category::Category;
pub use error::{Error, Result};
pub use record::{Record, RedactionInfo, RedactionRule, Verdict, value_text};
pub use signal::SignalSet;

//! Type classification for JSON documents
//!
//! This module turns a sample document into a bare structural mapping:
//! every field is classified as one of the [`FieldKind`]s, objects and arrays
//! of objects carry the classification of their own fields.
//!
//! ## Rules
//!
//! - **Dates** - ISO-8601 date and date-time strings become `date`
//! - **Arrays** - typed by their first element; arrays of objects become `nested`
//! - **Numbers** - every number becomes `double`
//! - **`_id`** - skipped at every level
//!
//! ## Cross-document checks
//!
//! A [`TypeLog`] remembers the type of every field seen per index scope.
//! Passing the same log to later classifications rejects documents that
//! change the type of a known field.
//!
//! ```rust
//! use elasticsearch_mapper::inference::{FieldKind, TypeClassifier, TypeLog};
//! use serde_json::json;
//!
//! let classifier = TypeClassifier::new();
//! let mut log = TypeLog::new();
//!
//! let props = classifier.classify(&json!({"name": "Bingo"}), "animals", Some(&mut log))?;
//! assert_eq!(props["name"].kind, FieldKind::String);
//!
//! assert!(classifier.classify(&json!({"name": 5}), "animals", Some(&mut log)).is_err());
//! # Ok::<(), elasticsearch_mapper::inference::InferenceError>(())
//! ```

mod classifier;
mod config;
mod dates;
mod error;
mod type_log;
mod types;

pub use classifier::{ID_FIELD, TypeClassifier};
pub use config::{ClassifierConfig, ClassifierConfigBuilder, TypeLogKey};
pub use dates::is_date_string;
pub use error::InferenceError;
pub use type_log::{TypeLog, TypeRecord};
pub use types::{FieldKind, FieldMapping, IndexMode, Properties};

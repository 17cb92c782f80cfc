//! Form schema validation against a terminology service
//!
//! Walks every question of a form definition, confirms referenced concepts
//! exist, that declared answers fit the concept, and that the concept's
//! datatype suits the chosen control. Checks run concurrently and their
//! outcomes are merged into a [`ValidationReport`] of errors and warnings.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use formcheck_terminology_client::TerminologyClient;
//! use formcheck_validator::{DataTypeRenderingMap, FormValidator, ValidatorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TerminologyClient::with_base_url("http://localhost:8080/openmrs/ws/rest/v1")?;
//! let rules = DataTypeRenderingMap::new()
//!     .with("Coded", ["select", "radio", "checkbox"])
//!     .with("Numeric", ["number"]);
//! let validator = FormValidator::new(Arc::new(client), ValidatorConfig::new(rules));
//!
//! let report = validator.validate(r#"{"pages": []}"#).await;
//! assert!(report.is_valid());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod messages;
pub mod plan;
pub mod report;
pub mod schema;
pub mod steps;
pub mod validator;

pub use config::{DataTypeRenderingMap, LookupFailurePolicy, RenderingMatch, ValidatorConfig};
pub use error::{ConfigError, SchemaError};
pub use plan::{Check, ValidationPlan};
pub use report::{CheckOutcome, ErrorRecord, Field, ValidationReport, WarningRecord};
pub use schema::{Answer, ConceptMappingRef, Page, Question, QuestionOptions, QuestionType, Schema, SchemaInput, Section};
pub use validator::{validate_form, FormValidator};

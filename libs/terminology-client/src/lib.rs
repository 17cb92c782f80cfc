//! Terminology Service Client
//!
//! This crate provides async access to the two read-only endpoints form
//! validation needs: concept search by reference list and patient identifier
//! type lookup.
//!
//! # Examples
//!
//! ```rust,no_run
//! use formcheck_terminology_client::{TerminologyClient, CONCEPT_REPRESENTATION};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TerminologyClient::with_base_url("http://localhost:8080/openmrs/ws/rest/v1")?;
//! let concepts = client
//!     .search_concepts("CIEL:5272", CONCEPT_REPRESENTATION)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
pub mod client;
pub mod error;
pub mod models;
pub mod source;

pub use client::{TerminologyClient, TerminologyClientConfig};
pub use error::{Error, Result};
pub use models::{
    Concept, ConceptAnswer, ConceptDatatype, ConceptMapping, ConceptSearchResponse,
    ANSWER_CONCEPT_REPRESENTATION, CONCEPT_REPRESENTATION,
};
pub use source::TerminologySource;

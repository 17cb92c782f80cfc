//! Wire models for terminology service responses

use serde::{Deserialize, Serialize};

/// Full projection used when validating a question's concept.
pub const CONCEPT_REPRESENTATION: &str =
    "custom:(uuid,display,datatype,answers,conceptMappings:(conceptReferenceTerm:(conceptSource:(name),code)))";

/// Lighter projection used for answer concepts; the answer set is not needed.
pub const ANSWER_CONCEPT_REPRESENTATION: &str =
    "custom:(uuid,display,datatype,conceptMappings:(conceptReferenceTerm:(conceptSource:(name),code)))";

/// Envelope returned by `GET /concept`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConceptSearchResponse {
    #[serde(default)]
    pub results: Vec<Concept>,
}

/// A concept as projected by [`CONCEPT_REPRESENTATION`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub uuid: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub datatype: Option<ConceptDatatype>,
    #[serde(default)]
    pub answers: Vec<ConceptAnswer>,
    #[serde(default)]
    pub concept_mappings: Vec<ConceptMapping>,
}

impl Concept {
    /// Datatype name, or an empty string when the service omitted it.
    pub fn datatype_name(&self) -> &str {
        self.datatype.as_ref().map(|d| d.name.as_str()).unwrap_or("")
    }

    pub fn has_answer(&self, uuid: &str) -> bool {
        self.answers.iter().any(|a| a.uuid == uuid)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptDatatype {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptAnswer {
    pub uuid: String,
    #[serde(default)]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapping {
    #[serde(default)]
    pub concept_reference_term: Option<ConceptReferenceTerm>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptReferenceTerm {
    #[serde(default)]
    pub concept_source: Option<ConceptSource>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptSource {
    #[serde(default)]
    pub name: Option<String>,
}

//! Form schema model
//!
//! Mirrors the JSON form definition: pages contain sections, sections contain
//! questions, and `obsGroup` questions nest further questions. Unknown keys are
//! ignored, `null` collections read as empty, and scalar text fields accept
//! numbers or booleans, so one oddly typed field never hides the rest of a
//! partially authored form.

use crate::error::SchemaError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub pages: Vec<Page>,
}

impl Schema {
    /// Top-level questions in page, section, question order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.pages
            .iter()
            .flat_map(|page| page.sections.iter())
            .flat_map(|section| section.questions.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_type")]
    pub question_type: QuestionType,
    #[serde(default, deserialize_with = "nullable")]
    pub question_options: QuestionOptions,
    /// Child questions of an `obsGroup`.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<Question>,
}

impl Question {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }
}

/// The question's `type`. Types without validation rules are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Obs,
    ObsGroup,
    PatientIdentifier,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Obs => "obs",
            Self::ObsGroup => "obsGroup",
            Self::PatientIdentifier => "patientIdentifier",
            Self::Other(other) => other,
        }
    }
}

impl Default for QuestionType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for QuestionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "obs" => Self::Obs,
            "obsGroup" => Self::ObsGroup,
            "patientIdentifier" => Self::PatientIdentifier,
            _ => Self::Other(value),
        }
    }
}

impl From<QuestionType> for String {
    fn from(value: QuestionType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOptions {
    /// Control used to capture the answer, e.g. `radio` or `select`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub rendering: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub concept: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub concept_mappings: Vec<ConceptMappingRef>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub identifier_type: Option<String>,
}

impl QuestionOptions {
    pub fn search_reference(&self) -> Option<String> {
        concept_reference(self.concept.as_deref(), &self.concept_mappings)
    }

    /// How the question's concept is named in records: the concept, else the
    /// joined mapping reference, else empty.
    pub fn shown_reference(&self) -> String {
        self.search_reference().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub concept: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub concept_mappings: Vec<ConceptMappingRef>,
}

impl Answer {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    pub fn search_reference(&self) -> Option<String> {
        concept_reference(self.concept.as_deref(), &self.concept_mappings)
    }
}

/// Alternate reference to a concept through a terminology source code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMappingRef {
    /// Source name, e.g. `CIEL`.
    #[serde(rename = "type", default, deserialize_with = "lenient_code")]
    pub source: String,
    /// Code within the source. Numeric codes are kept as their digits.
    #[serde(default, deserialize_with = "lenient_code")]
    pub value: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub relationship: Option<String>,
}

/// Reference used to search the terminology service.
///
/// A non-empty `concept` wins; otherwise all mappings are rendered as
/// `source:code` and comma-joined. `None` when neither is present.
pub fn concept_reference(concept: Option<&str>, mappings: &[ConceptMappingRef]) -> Option<String> {
    if let Some(concept) = concept.filter(|c| !c.is_empty()) {
        return Some(concept.to_string());
    }

    if mappings.is_empty() {
        return None;
    }

    Some(
        mappings
            .iter()
            .map(|m| format!("{}:{}", m.source, m.value))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// The forms a schema can be handed to the validator in.
#[derive(Debug, Clone, Default)]
pub enum SchemaInput {
    #[default]
    Empty,
    Text(String),
    Json(Value),
    Parsed(Schema),
}

impl SchemaInput {
    /// Resolve into a typed schema. `Ok(None)` for empty input (no text,
    /// blank text, `null`, `false`, `0` or `""`).
    pub fn resolve(self) -> Result<Option<Schema>, SchemaError> {
        match self {
            Self::Empty => Ok(None),
            Self::Parsed(schema) => Ok(Some(schema)),
            Self::Text(text) => {
                if text.trim().is_empty() {
                    return Ok(None);
                }
                let value: Value = serde_json::from_str(&text).map_err(SchemaError::Parse)?;
                Self::Json(value).resolve()
            }
            Self::Json(value) => match value {
                Value::Null | Value::Bool(false) => Ok(None),
                Value::Number(ref n) if n.as_f64() == Some(0.0) => Ok(None),
                Value::String(text) => Self::Text(text).resolve(),
                Value::Object(_) => serde_json::from_value(value)
                    .map(Some)
                    .map_err(SchemaError::Shape),
                Value::Array(_) => Err(SchemaError::NotAnObject("an array")),
                Value::Bool(true) => Err(SchemaError::NotAnObject("a boolean")),
                Value::Number(_) => Err(SchemaError::NotAnObject("a number")),
            },
        }
    }
}

impl From<&str> for SchemaInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SchemaInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for SchemaInput {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Schema> for SchemaInput {
    fn from(value: Schema) -> Self {
        Self::Parsed(value)
    }
}

impl<T: Into<SchemaInput>> From<Option<T>> for SchemaInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings as-is, numbers and booleans as their text; anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_type<'de, D>(deserializer: D) -> Result<QuestionType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?
        .map(QuestionType::from)
        .unwrap_or_default())
}

//! Record wording
//!
//! Form-builder UIs match on these strings, so the prefixes (❌ mismatch,
//! ❓ missing or unknown, ⚠️ warning) and phrasing must stay stable.

pub const NO_UUID: &str = "❓ No UUID";
pub const IDENTIFIER_TYPE_MISSING: &str = "❓ Patient identifier type missing in schema";
pub const IDENTIFIER_TYPE_NOT_FOUND: &str = "❓ The identifier type does not exist";

pub fn concept_not_found(concept: &str) -> String {
    format!("❓ Concept \"{}\" not found", concept)
}

pub fn non_boolean_answer(concept: &str, answer_label: &str) -> String {
    format!(
        "❌ concept \"{}\" of type \"boolean\" has a non-boolean answer \"{}\"",
        concept, answer_label
    )
}

pub fn answer_not_in_concept(answer_label: &str, answer_concept: &str) -> String {
    format!(
        "⚠️ answer: \"{}\" - \"{}\" does not exist in the response answers but exists in the form",
        answer_label, answer_concept
    )
}

pub fn datatype_rendering_mismatch(concept: &str, datatype: &str, rendering: &str) -> String {
    format!(
        "❓ {}: datatype \"{}\" doesn't match control type \"{}\"",
        concept, datatype, rendering
    )
}

pub fn untracked_datatype(datatype: &str) -> String {
    format!("❓ Untracked datatype \"{}\"", datatype)
}

pub fn answer_concept_not_found(concept: &str) -> String {
    format!("❌ concept \"{}\" not found", concept)
}

pub fn lookup_failed(reference: &str, reason: &str) -> String {
    format!("❌ Lookup failed for \"{}\": {}", reference, reason)
}

pub fn schema_unparseable(reason: &str) -> String {
    format!("❌ Schema could not be parsed: {}", reason)
}

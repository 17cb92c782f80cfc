use crate::schema::{Answer, Question};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The schema element a record points at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl Field {
    /// Label, id and concept of a question.
    pub fn question(question: &Question) -> Self {
        Self {
            label: question.label().to_string(),
            concept: question.question_options.concept.clone(),
            id: question.id.clone(),
            field_type: None,
        }
    }

    /// Like [`Field::question`], plus the question type.
    pub fn question_with_type(question: &Question) -> Self {
        Self {
            field_type: Some(question.question_type.to_string()),
            ..Self::question(question)
        }
    }

    pub fn answer(answer: &Answer) -> Self {
        Self {
            label: answer.label().to_string(),
            concept: answer.concept.clone(),
            id: None,
            field_type: None,
        }
    }

    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub error_message: String,
    pub field: Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningRecord {
    pub field: Field,
    pub warning_message: String,
}

/// Records produced by one check. Owned by the check until the join point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOutcome {
    pub errors: Vec<ErrorRecord>,
    pub warnings: Vec<WarningRecord>,
}

impl CheckOutcome {
    pub fn error(&mut self, message: impl Into<String>, field: Field) {
        self.errors.push(ErrorRecord {
            error_message: message.into(),
            field,
        });
    }

    pub fn warning(&mut self, message: impl Into<String>, field: Field) {
        self.warnings.push(WarningRecord {
            field,
            warning_message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Merged result of a validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ErrorRecord>,
    pub warnings: Vec<WarningRecord>,
}

impl ValidationReport {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = CheckOutcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            report.errors.extend(outcome.errors);
            report.warnings.extend(outcome.warnings);
        }
        report
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn into_parts(self) -> (Vec<ErrorRecord>, Vec<WarningRecord>) {
        (self.errors, self.warnings)
    }

    /// Errors and warnings sorted, for comparing runs whose check order differs.
    pub fn sorted(mut self) -> Self {
        self.errors.sort();
        self.warnings.sort();
        self
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "errors": self.errors,
            "warnings": self.warnings,
        })
    }
}

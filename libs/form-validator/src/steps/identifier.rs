//! Patient identifier type existence

use crate::messages;
use crate::report::{CheckOutcome, Field};
use crate::schema::Question;
use formcheck_terminology_client::TerminologySource;

/// Fetch failures count as "does not exist": a form pointing at an
/// identifier type the server cannot serve is not deployable.
pub async fn validate_patient_identifier(
    question: &Question,
    source: &dyn TerminologySource,
) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let field = Field::question_with_type(question);

    let identifier_type = question
        .question_options
        .identifier_type
        .as_deref()
        .filter(|t| !t.is_empty());

    let Some(identifier_type) = identifier_type else {
        outcome.error(messages::IDENTIFIER_TYPE_MISSING, field);
        return outcome;
    };

    match source.patient_identifier_type(identifier_type).await {
        Ok(Some(_)) => {}
        Ok(None) => outcome.error(messages::IDENTIFIER_TYPE_NOT_FOUND, field),
        Err(err) => {
            tracing::error!(identifier_type, error = %err, "Error fetching patient identifier type");
            outcome.error(messages::IDENTIFIER_TYPE_NOT_FOUND, field);
        }
    }

    outcome
}

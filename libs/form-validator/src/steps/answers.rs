use super::record_lookup_failure;
use crate::config::ValidatorConfig;
use crate::messages;
use crate::report::{CheckOutcome, Field};
use crate::schema::Answer;
use formcheck_terminology_client::{TerminologySource, ANSWER_CONCEPT_REPRESENTATION};

/// Confirm a declared answer's concept exists.
pub async fn validate_answer(
    answer: &Answer,
    source: &dyn TerminologySource,
    config: &ValidatorConfig,
) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let field = Field::answer(answer);
    let shown = answer.concept.as_deref().unwrap_or_default();

    // Nothing to search for; such an answer can never resolve.
    let Some(reference) = answer.search_reference() else {
        outcome.error(messages::answer_concept_not_found(shown), field);
        return outcome;
    };

    match source
        .search_concepts(&reference, ANSWER_CONCEPT_REPRESENTATION)
        .await
    {
        Ok(results) if results.is_empty() => {
            let shown = if shown.is_empty() { reference.as_str() } else { shown };
            outcome.error(messages::answer_concept_not_found(shown), field);
        }
        Ok(_) => {}
        Err(err) => record_lookup_failure(
            &reference,
            &err,
            config.lookup_failures,
            field,
            &mut outcome,
        ),
    }

    outcome
}

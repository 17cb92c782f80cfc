//! Concept lookup for a question
//!
//! Resolves the question's concept reference against the terminology service
//! and, once found, checks declared answers against the concept's datatype
//! before handing over to the rendering check.

use super::record_lookup_failure;
use crate::config::ValidatorConfig;
use crate::messages;
use crate::report::{CheckOutcome, Field};
use crate::schema::Question;
use formcheck_terminology_client::{Concept, TerminologySource, CONCEPT_REPRESENTATION};

/// Well-known concept answering "true" on a Boolean question.
pub const BOOLEAN_TRUE_CONCEPT: &str = "cf82933b-3f3f-45e7-a5ab-5d31aaee3da3";
/// Well-known concept answering "false" on a Boolean question.
pub const BOOLEAN_FALSE_CONCEPT: &str = "488b58ff-64f5-4f8a-8979-fa79940b1594";

pub async fn validate_concept(
    question: &Question,
    source: &dyn TerminologySource,
    config: &ValidatorConfig,
) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let field = Field::question(question);

    let Some(reference) = question.question_options.search_reference() else {
        outcome.error(messages::NO_UUID, field);
        return outcome;
    };

    tracing::debug!(question = ?question.id, reference = %reference, "Validating question concept");

    match source
        .search_concepts(&reference, CONCEPT_REPRESENTATION)
        .await
    {
        Ok(results) => match results.first() {
            Some(concept) => check_resolved(question, concept, config, &mut outcome),
            None => outcome.error(messages::concept_not_found(&reference), field),
        },
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

fn check_resolved(
    question: &Question,
    concept: &Concept,
    config: &ValidatorConfig,
    outcome: &mut CheckOutcome,
) {
    let options = &question.question_options;
    let shown = options.shown_reference();
    let datatype = concept.datatype_name();

    match datatype {
        "Boolean" => {
            for answer in &options.answers {
                if !is_boolean_answer(answer.concept.as_deref()) {
                    outcome.error(
                        messages::non_boolean_answer(&shown, answer.label()),
                        Field::question(question),
                    );
                }
            }
        }
        "Coded" => {
            for answer in &options.answers {
                let answer_concept = answer.concept.as_deref().unwrap_or_default();
                if !concept.has_answer(answer_concept) {
                    outcome.warning(
                        messages::answer_not_in_concept(answer.label(), answer_concept),
                        Field::question(question),
                    );
                }
            }
        }
        _ => {}
    }

    super::rendering::check_rendering(
        question,
        datatype,
        &config.data_type_to_rendering_map,
        outcome,
    );
}

fn is_boolean_answer(concept: Option<&str>) -> bool {
    matches!(concept, Some(BOOLEAN_TRUE_CONCEPT | BOOLEAN_FALSE_CONCEPT))
}

//! Datatype / rendering compatibility

use crate::config::{DataTypeRenderingMap, RenderingMatch};
use crate::messages;
use crate::report::{CheckOutcome, Field};
use crate::schema::Question;

/// Check the question's rendering against the controls allowed for `datatype`.
pub fn check_rendering(
    question: &Question,
    datatype: &str,
    rules: &DataTypeRenderingMap,
    outcome: &mut CheckOutcome,
) {
    let rendering = question
        .question_options
        .rendering
        .as_deref()
        .unwrap_or_default();

    match rules.check(datatype, rendering) {
        RenderingMatch::Allowed => {}
        RenderingMatch::Mismatch => outcome.error(
            messages::datatype_rendering_mismatch(
                &question.question_options.shown_reference(),
                datatype,
                rendering,
            ),
            Field::question_with_type(question),
        ),
        RenderingMatch::Untracked => outcome.error(
            messages::untracked_datatype(datatype),
            Field::question_with_type(question),
        ),
    }
}

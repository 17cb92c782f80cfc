//! Individual checks executed by the validator.
//!
//! Each check owns a [`CheckOutcome`] and returns it; nothing is shared
//! between checks while they run.

pub mod answers;
pub mod concept;
pub mod identifier;
pub mod rendering;

use crate::config::LookupFailurePolicy;
use crate::messages;
use crate::report::{CheckOutcome, Field};
use formcheck_terminology_client::Error as LookupError;

/// Log a failed concept or answer lookup and, under [`LookupFailurePolicy::Report`],
/// record it as an error.
pub(crate) fn record_lookup_failure(
    reference: &str,
    error: &LookupError,
    policy: LookupFailurePolicy,
    field: Field,
    outcome: &mut CheckOutcome,
) {
    tracing::error!(reference, error = %error, "Concept lookup failed");

    if policy == LookupFailurePolicy::Report {
        outcome.error(
            messages::lookup_failed(reference, &error.to_string()),
            field,
        );
    }
}

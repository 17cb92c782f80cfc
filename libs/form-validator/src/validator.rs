use crate::config::ValidatorConfig;
use crate::error::ConfigError;
use crate::messages;
use crate::plan::{Check, ValidationPlan};
use crate::report::{CheckOutcome, ErrorRecord, Field, ValidationReport, WarningRecord};
use crate::schema::{Schema, SchemaInput};
use crate::steps;
use formcheck_terminology_client::TerminologySource;
use futures::{future, stream, StreamExt};
use std::sync::Arc;

/// Reusable validator - owns the terminology source and configuration
pub struct FormValidator {
    source: Arc<dyn TerminologySource>,
    config: ValidatorConfig,
}

impl FormValidator {
    pub fn new(source: Arc<dyn TerminologySource>, config: ValidatorConfig) -> Self {
        Self { source, config }
    }

    pub fn from_config(
        source: Arc<dyn TerminologySource>,
        config: ValidatorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(source, config))
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a schema given as text, JSON value or typed [`Schema`].
    ///
    /// Never fails: empty input yields an empty report and unparseable input
    /// yields a single error record.
    pub async fn validate(&self, input: impl Into<SchemaInput>) -> ValidationReport {
        match input.into().resolve() {
            Ok(Some(schema)) => self.validate_schema(&schema).await,
            Ok(None) => ValidationReport::default(),
            Err(err) => {
                tracing::warn!(error = %err, "Form schema could not be parsed");
                let mut outcome = CheckOutcome::default();
                outcome.error(
                    messages::schema_unparseable(&err.to_string()),
                    Field::labelled("schema"),
                );
                ValidationReport::from_outcomes([outcome])
            }
        }
    }

    /// Run every check of the schema's plan concurrently and merge the outcomes.
    pub async fn validate_schema(&self, schema: &Schema) -> ValidationReport {
        let plan = ValidationPlan::for_schema(schema);
        tracing::debug!(
            form = ?schema.name,
            checks = plan.len(),
            max_concurrent = ?self.config.max_concurrent_lookups,
            "Dispatching form checks"
        );

        let runs = plan.checks.iter().map(|check| self.run_check(*check));
        let outcomes: Vec<CheckOutcome> = match self.config.max_concurrent_lookups {
            Some(limit) => stream::iter(runs).buffer_unordered(limit.max(1)).collect().await,
            None => future::join_all(runs).await,
        };

        let report = ValidationReport::from_outcomes(outcomes);
        tracing::info!(
            form = ?schema.name,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Form validation finished"
        );
        report
    }

    async fn run_check(&self, check: Check<'_>) -> CheckOutcome {
        let source = self.source.as_ref();
        match check {
            Check::Concept(question) => {
                steps::concept::validate_concept(question, source, &self.config).await
            }
            Check::PatientIdentifier(question) => {
                steps::identifier::validate_patient_identifier(question, source).await
            }
            Check::Answer(answer) => {
                steps::answers::validate_answer(answer, source, &self.config).await
            }
        }
    }
}

/// One-shot validation returning the `(errors, warnings)` pair.
pub async fn validate_form(
    source: Arc<dyn TerminologySource>,
    schema: impl Into<SchemaInput>,
    config: ValidatorConfig,
) -> (Vec<ErrorRecord>, Vec<WarningRecord>) {
    FormValidator::new(source, config)
        .validate(schema)
        .await
        .into_parts()
}

mod support;

use formcheck_validator::{
    validate_form, FormValidator, LookupFailurePolicy, ValidationReport, ValidatorConfig,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use support::{concept, config, form, FakeTerminology};

const TRUE_CONCEPT: &str = "cf82933b-3f3f-45e7-a5ab-5d31aaee3da3";
const FALSE_CONCEPT: &str = "488b58ff-64f5-4f8a-8979-fa79940b1594";

async fn run(source: FakeTerminology, schema: serde_json::Value) -> ValidationReport {
    run_with(source, schema, config()).await
}

async fn run_with(
    source: FakeTerminology,
    schema: serde_json::Value,
    config: ValidatorConfig,
) -> ValidationReport {
    FormValidator::new(Arc::new(source), config)
        .validate(schema)
        .await
}

fn messages(report: &ValidationReport) -> Vec<&str> {
    report
        .errors
        .iter()
        .map(|e| e.error_message.as_str())
        .collect()
}

#[tokio::test]
async fn empty_inputs_produce_empty_report() {
    let validator = FormValidator::new(Arc::new(FakeTerminology::new()), config());

    for report in [
        validator.validate(None::<String>).await,
        validator.validate("").await,
        validator.validate(json!(null)).await,
    ] {
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }
}

#[tokio::test]
async fn boolean_concept_with_non_boolean_answer() {
    let source = FakeTerminology::new()
        .with_concept("hiv-tested", concept("hiv-tested", "Boolean", &[]))
        .with_known(&[TRUE_CONCEPT, "unknown-answer"]);

    let report = run(
        source,
        form(json!([{
            "id": "hivTested",
            "label": "Tested for HIV?",
            "type": "obs",
            "questionOptions": {
                "rendering": "radio",
                "concept": "hiv-tested",
                "answers": [
                    {"label": "Yes", "concept": TRUE_CONCEPT},
                    {"label": "Unknown", "concept": "unknown-answer"}
                ]
            }
        }])),
    )
    .await;

    assert_eq!(
        messages(&report),
        vec!["❌ concept \"hiv-tested\" of type \"boolean\" has a non-boolean answer \"Unknown\""]
    );
    assert_eq!(report.errors[0].field.id.as_deref(), Some("hivTested"));
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn boolean_concept_with_true_and_false_answers_is_valid() {
    let source = FakeTerminology::new()
        .with_concept("smokes", concept("smokes", "Boolean", &[]))
        .with_known(&[TRUE_CONCEPT, FALSE_CONCEPT]);

    let report = run(
        source,
        form(json!([{
            "id": "smokes",
            "label": "Smokes?",
            "type": "obs",
            "questionOptions": {
                "rendering": "toggle",
                "concept": "smokes",
                "answers": [
                    {"label": "Yes", "concept": TRUE_CONCEPT},
                    {"label": "No", "concept": FALSE_CONCEPT}
                ]
            }
        }])),
    )
    .await;

    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[tokio::test]
async fn unresolved_concept_skips_datatype_check() {
    let report = run(
        FakeTerminology::new(),
        form(json!([{
            "id": "weight",
            "label": "Weight",
            "type": "obs",
            "questionOptions": {"rendering": "number", "concept": "missing-concept"}
        }])),
    )
    .await;

    assert_eq!(messages(&report), vec!["❓ Concept \"missing-concept\" not found"]);
}

#[tokio::test]
async fn rendering_not_allowed_for_datatype() {
    let source =
        FakeTerminology::new().with_concept("weight", concept("weight", "Numeric", &[]));

    let report = run(
        source,
        form(json!([{
            "id": "weight",
            "label": "Weight",
            "type": "obs",
            "questionOptions": {"rendering": "radio", "concept": "weight"}
        }])),
    )
    .await;

    assert_eq!(report.error_count(), 1);
    assert!(report.errors[0]
        .error_message
        .contains("doesn't match control type"));
    assert!(!report.errors[0].error_message.contains("Untracked"));
    assert_eq!(report.errors[0].field.field_type.as_deref(), Some("obs"));
}

#[tokio::test]
async fn datatype_missing_from_rules_is_untracked() {
    let source = FakeTerminology::new().with_concept("scan", concept("scan", "Complex", &[]));

    let report = run(
        source,
        form(json!([{
            "id": "scan",
            "label": "Chest X-ray",
            "type": "obs",
            "questionOptions": {"rendering": "file", "concept": "scan"}
        }])),
    )
    .await;

    assert_eq!(messages(&report), vec!["❓ Untracked datatype \"Complex\""]);
}

#[tokio::test]
async fn coded_answers_missing_from_concept_are_warnings() {
    let source = FakeTerminology::new()
        .with_concept(
            "marital-status",
            concept("marital-status", "Coded", &["married", "single"]),
        )
        .with_known(&["married", "widowed"]);

    let report = run(
        source,
        form(json!([{
            "id": "maritalStatus",
            "label": "Marital status",
            "type": "obs",
            "questionOptions": {
                "rendering": "select",
                "concept": "marital-status",
                "answers": [
                    {"label": "Married", "concept": "married"},
                    {"label": "Widowed", "concept": "widowed"}
                ]
            }
        }])),
    )
    .await;

    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(
        report.warnings[0].warning_message,
        "⚠️ answer: \"Widowed\" - \"widowed\" does not exist in the response answers but exists in the form"
    );
}

#[tokio::test]
async fn group_members_without_reference_each_report_no_uuid() {
    let report = run(
        FakeTerminology::new(),
        form(json!([{
            "id": "vitals",
            "label": "Vitals",
            "type": "obsGroup",
            "questionOptions": {"rendering": "group"},
            "questions": [
                {"id": "systolic", "label": "Systolic", "type": "obs", "questionOptions": {"rendering": "number"}},
                {"id": "diastolic", "label": "Diastolic", "type": "obs", "questionOptions": {"rendering": "number"}}
            ]
        }])),
    )
    .await;

    assert_eq!(messages(&report), vec!["❓ No UUID", "❓ No UUID"]);
    let mut ids: Vec<_> = report
        .errors
        .iter()
        .map(|e| e.field.id.clone().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["diastolic", "systolic"]);
}

#[tokio::test]
async fn concept_mappings_are_joined_into_reference() {
    let source = FakeTerminology::new()
        .with_concept("CIEL:5089,PIH:WEIGHT (KG)", concept("5089", "Numeric", &[]));

    let report = run(
        source,
        form(json!([{
            "id": "weight",
            "label": "Weight",
            "type": "obs",
            "questionOptions": {
                "rendering": "number",
                "conceptMappings": [
                    {"type": "CIEL", "value": "5089"},
                    {"type": "PIH", "value": "WEIGHT (KG)"}
                ]
            }
        }])),
    )
    .await;

    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[tokio::test]
async fn patient_identifier_type_checks() {
    let source = FakeTerminology::new().with_identifier_type("openmrs-id");

    let report = run(
        source,
        form(json!([
            {"id": "known", "label": "OpenMRS ID", "type": "patientIdentifier",
             "questionOptions": {"rendering": "text", "identifierType": "openmrs-id"}},
            {"id": "unknown", "label": "Legacy ID", "type": "patientIdentifier",
             "questionOptions": {"rendering": "text", "identifierType": "legacy-id"}},
            {"id": "untyped", "label": "Some ID", "type": "patientIdentifier",
             "questionOptions": {"rendering": "text"}}
        ])),
    )
    .await;

    assert_eq!(report.error_count(), 2);
    let by_id = |id: &str| {
        report
            .errors
            .iter()
            .find(|e| e.field.id.as_deref() == Some(id))
            .map(|e| e.error_message.clone())
    };
    assert!(by_id("known").is_none());
    assert!(by_id("unknown").unwrap().contains("does not exist"));
    assert!(by_id("untyped").unwrap().contains("missing"));
    assert_eq!(
        report.errors[0].field.field_type.as_deref(),
        Some("patientIdentifier")
    );
}

#[tokio::test]
async fn identifier_lookup_failure_is_reported() {
    let source = FakeTerminology::new().failing_identifier_lookups();

    let report = run(
        source,
        form(json!([{
            "id": "openmrsId",
            "label": "OpenMRS ID",
            "type": "patientIdentifier",
            "questionOptions": {"identifierType": "openmrs-id"}
        }])),
    )
    .await;

    assert_eq!(messages(&report), vec!["❓ The identifier type does not exist"]);
}

#[tokio::test]
async fn unknown_answer_concept_is_error() {
    let source = FakeTerminology::new()
        .with_concept("referral", concept("referral", "Coded", &["clinic"]))
        .with_known(&["clinic"]);

    let report = run(
        source,
        form(json!([{
            "id": "referral",
            "label": "Referred to",
            "type": "obs",
            "questionOptions": {
                "rendering": "select",
                "concept": "referral",
                "answers": [
                    {"label": "Clinic", "concept": "clinic"},
                    {"label": "Hospital", "concept": "hospital"}
                ]
            }
        }])),
    )
    .await;

    assert_eq!(messages(&report), vec!["❌ concept \"hospital\" not found"]);
    assert_eq!(report.errors[0].field.label, "Hospital");
    assert_eq!(report.warning_count(), 1);
}

#[tokio::test]
async fn lookup_failures_are_ignored_by_default() {
    let source = FakeTerminology::new().failing_on("weight");

    let report = run(
        source,
        form(json!([{
            "id": "weight",
            "label": "Weight",
            "type": "obs",
            "questionOptions": {"rendering": "number", "concept": "weight"}
        }])),
    )
    .await;

    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn lookup_failures_are_reported_when_configured() {
    let source = FakeTerminology::new()
        .with_concept("pregnant", concept("pregnant", "Coded", &["yes"]))
        .failing_on("yes")
        .failing_on("weight");

    let report = run_with(
        source,
        form(json!([
            {"id": "weight", "label": "Weight", "type": "obs",
             "questionOptions": {"rendering": "number", "concept": "weight"}},
            {"id": "pregnant", "label": "Pregnant", "type": "obs",
             "questionOptions": {"rendering": "radio", "concept": "pregnant",
                                 "answers": [{"label": "Yes", "concept": "yes"}]}}
        ])),
        config().with_lookup_failures(LookupFailurePolicy::Report),
    )
    .await;

    assert_eq!(report.error_count(), 2);
    assert!(report
        .errors
        .iter()
        .all(|e| e.error_message.starts_with("❌ Lookup failed for")));
}

#[tokio::test]
async fn unparseable_schema_yields_single_error() {
    let validator = FormValidator::new(Arc::new(FakeTerminology::new()), config());
    let report = validator.validate("{\"pages\": [").await;

    assert_eq!(report.error_count(), 1);
    assert!(report.errors[0]
        .error_message
        .starts_with("❌ Schema could not be parsed"));
    assert_eq!(report.errors[0].field.label, "schema");
}

#[tokio::test]
async fn concurrency_cap_limits_lookups_in_flight() {
    let source = Arc::new(FakeTerminology::new().with_latency(Duration::from_millis(20)));
    let questions: Vec<_> = (0..12)
        .map(|i| {
            json!({"id": format!("q{i}"), "label": format!("Q{i}"), "type": "obs",
                   "questionOptions": {"rendering": "text", "concept": format!("c{i}")}})
        })
        .collect();

    let validator = FormValidator::new(source.clone(), config().with_max_concurrent_lookups(3));
    let report = validator.validate(form(json!(questions))).await;

    assert_eq!(report.error_count(), 12);
    assert_eq!(source.searches().len(), 12);
    assert!(source.max_in_flight() <= 3);
}

#[tokio::test]
async fn unbounded_fan_out_launches_all_lookups_together() {
    let source = Arc::new(FakeTerminology::new().with_latency(Duration::from_millis(20)));
    let questions: Vec<_> = (0..8)
        .map(|i| {
            json!({"id": format!("q{i}"), "type": "obs",
                   "questionOptions": {"rendering": "text", "concept": format!("c{i}")}})
        })
        .collect();

    let validator = FormValidator::new(source.clone(), config());
    validator.validate(form(json!(questions))).await;

    assert_eq!(source.max_in_flight(), 8);
}

#[tokio::test]
async fn repeated_runs_are_identical() {
    let source = Arc::new(
        FakeTerminology::new()
            .with_concept("coded", concept("coded", "Coded", &["a"]))
            .with_concept("numeric", concept("numeric", "Numeric", &[]))
            .with_known(&["a", "b"]),
    );
    let schema = form(json!([
        {"id": "coded", "label": "Coded", "type": "obs",
         "questionOptions": {"rendering": "text", "concept": "coded",
                             "answers": [{"label": "A", "concept": "a"}, {"label": "B", "concept": "b"}]}},
        {"id": "numeric", "label": "Numeric", "type": "obs",
         "questionOptions": {"rendering": "select", "concept": "numeric"}},
        {"id": "orphan", "label": "Orphan", "type": "obs", "questionOptions": {"rendering": "text"}}
    ]));

    let validator =
        FormValidator::new(source, config().with_max_concurrent_lookups(2));
    let first = validator.validate(schema.clone()).await.sorted();
    let second = validator.validate(schema).await.sorted();

    assert_eq!(first, second);
    assert_eq!(first.error_count(), 3);
    assert_eq!(first.warning_count(), 1);
}

#[tokio::test]
async fn validate_form_returns_error_and_warning_pair() {
    let (errors, warnings) = validate_form(
        Arc::new(FakeTerminology::new()),
        form(json!([{"id": "q", "label": "Q", "type": "obs"}])).to_string(),
        config(),
    )
    .await;

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_message, "❓ No UUID");
    assert!(warnings.is_empty());
}

#[tokio::test]
async fn oddly_typed_mappings_do_not_hide_other_questions() {
    let source = FakeTerminology::new()
        .with_concept("weight", concept("weight", "Numeric", &[]))
        .with_concept("CIEL:5090", concept("height", "Numeric", &[]));

    let report = run(
        source,
        form(json!([
            {
                "id": "weight",
                "label": "Weight",
                "type": "obs",
                "questionOptions": {"rendering": "radio", "concept": "weight"}
            },
            {
                "id": "height",
                "label": "Height",
                "type": "obs",
                "questionOptions": {
                    "rendering": "number",
                    "conceptMappings": [{"type": "CIEL", "value": 5090}]
                }
            },
            {
                "id": "muac",
                "label": "MUAC",
                "type": "obs",
                "questionOptions": {
                    "rendering": "number",
                    "conceptMappings": [{"type": "CIEL"}]
                }
            }
        ])),
    )
    .await;

    let mut found = messages(&report);
    found.sort_unstable();
    assert_eq!(
        found,
        vec![
            "❓ Concept \"CIEL:\" not found",
            "❓ weight: datatype \"Numeric\" doesn't match control type \"radio\"",
        ]
    );
    assert!(!found.iter().any(|m| m.contains("Schema could not be parsed")));
}

#[tokio::test]
async fn wrongly_shaped_schema_is_not_reported_as_invalid_json() {
    let validator = FormValidator::new(Arc::new(FakeTerminology::new()), config());
    let report = validator.validate(json!({"pages": "Intake"})).await;

    assert_eq!(report.error_count(), 1);
    assert!(report.errors[0]
        .error_message
        .starts_with("❌ Schema could not be parsed: form schema has an unexpected shape"));
}

#[tokio::test]
async fn mapping_only_boolean_question_names_its_reference() {
    let source = FakeTerminology::new()
        .with_concept("CIEL:1065", concept("ciel-1065", "Boolean", &[]))
        .with_known(&["maybe"]);

    let report = run(
        source,
        form(json!([{
            "id": "onArt",
            "label": "On ART?",
            "type": "obs",
            "questionOptions": {
                "rendering": "radio",
                "conceptMappings": [{"type": "CIEL", "value": "1065"}],
                "answers": [{"label": "Maybe", "concept": "maybe"}]
            }
        }])),
    )
    .await;

    assert_eq!(
        messages(&report),
        vec!["❌ concept \"CIEL:1065\" of type \"boolean\" has a non-boolean answer \"Maybe\""]
    );
}

//! Validate a small form against a canned terminology source and print the
//! report as JSON.
//!
//! ```bash
//! cargo run -p formcheck-validator --example offline_rules
//! ```

use async_trait::async_trait;
use formcheck_terminology_client::{
    Concept, ConceptDatatype, Result, TerminologySource,
};
use formcheck_validator::{DataTypeRenderingMap, FormValidator, ValidatorConfig};
use serde_json::{json, Value};
use std::sync::Arc;

struct CannedTerminology;

#[async_trait]
impl TerminologySource for CannedTerminology {
    async fn search_concepts(&self, references: &str, _representation: &str) -> Result<Vec<Concept>> {
        let datatype = match references {
            "5089AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA" => "Numeric",
            "1284AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA" => "Coded",
            _ => return Ok(Vec::new()),
        };

        Ok(vec![Concept {
            uuid: references.to_string(),
            datatype: Some(ConceptDatatype {
                name: datatype.to_string(),
            }),
            ..Concept::default()
        }])
    }

    async fn patient_identifier_type(&self, _identifier_type: &str) -> Result<Option<Value>> {
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = ValidatorConfig::from_yaml(
        r#"
dataTypeToRenderingMap:
  Numeric: [number]
  Coded: [select, radio]
"#,
    )?;

    let schema = json!({
        "name": "Vitals",
        "pages": [{"label": "Vitals", "sections": [{"label": "Measurements", "questions": [
            {"id": "weight", "label": "Weight (kg)", "type": "obs",
             "questionOptions": {"rendering": "text", "concept": "5089AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"}},
            {"id": "diagnosis", "label": "Diagnosis", "type": "obs",
             "questionOptions": {"rendering": "select", "concept": "1284AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"}},
            {"id": "openmrsId", "label": "OpenMRS ID", "type": "patientIdentifier",
             "questionOptions": {"rendering": "text"}}
        ]}]}]
    });

    let validator = FormValidator::new(Arc::new(CannedTerminology), config);
    let report = validator.validate(schema).await;

    println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    println!(
        "{} error(s), {} warning(s)",
        report.error_count(),
        report.warning_count()
    );

    // Rules can be extended without code changes.
    let extended = DataTypeRenderingMap::new().with("Numeric", ["number", "text"]);
    let relaxed = FormValidator::new(Arc::new(CannedTerminology), ValidatorConfig::new(extended));
    let report = relaxed.validate(weight_only_schema()).await;
    println!("relaxed rules: {} error(s)", report.error_count());

    Ok(())
}

fn weight_only_schema() -> Value {
    json!({"pages": [{"sections": [{"questions": [
        {"id": "weight", "type": "obs",
         "questionOptions": {"rendering": "text", "concept": "5089AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"}}
    ]}]}]})
}

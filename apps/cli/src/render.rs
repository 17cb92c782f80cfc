//! Report rendering for the terminal

use formcheck_validator::{Field, ValidationReport};
use serde_json::{json, Value};
use std::fmt::Write;
use std::path::Path;

pub fn text(path: &Path, report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} error(s), {} warning(s)",
        path.display(),
        report.error_count(),
        report.warning_count()
    );

    for error in &report.errors {
        let _ = writeln!(out, "  {}  [{}]", error.error_message, describe(&error.field));
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "  {}  [{}]", warning.warning_message, describe(&warning.field));
    }

    out
}

pub fn json<'a>(reports: impl IntoIterator<Item = (&'a Path, &'a ValidationReport)>) -> Value {
    let forms: Vec<Value> = reports
        .into_iter()
        .map(|(path, report)| {
            let mut entry = report.to_json();
            entry["schema"] = json!(path.display().to_string());
            entry
        })
        .collect();

    json!({ "forms": forms })
}

fn describe(field: &Field) -> String {
    let mut parts = vec![if field.label.is_empty() {
        "<no label>".to_string()
    } else {
        field.label.clone()
    }];
    if let Some(id) = &field.id {
        parts.push(format!("id={}", id));
    }
    if let Some(concept) = &field.concept {
        parts.push(format!("concept={}", concept));
    }
    parts.join(", ")
}

//! In-memory terminology service for validator tests.

use async_trait::async_trait;
use formcheck_terminology_client::{
    Concept, ConceptAnswer, ConceptDatatype, Error, Result, TerminologySource,
};
use formcheck_validator::{DataTypeRenderingMap, ValidatorConfig};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeTerminology {
    concepts: HashMap<String, Concept>,
    identifier_types: HashSet<String>,
    failing: HashSet<String>,
    fail_identifier_lookups: bool,
    latency: Option<Duration>,
    searches: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeTerminology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `concept` for searches on `reference`.
    pub fn with_concept(mut self, reference: &str, concept: Concept) -> Self {
        self.concepts.insert(reference.to_string(), concept);
        self
    }

    /// Serve a plain concept whose uuid is its own reference.
    pub fn with_known(mut self, uuids: &[&str]) -> Self {
        for uuid in uuids {
            self.concepts
                .insert(uuid.to_string(), concept(uuid, "N/A", &[]));
        }
        self
    }

    pub fn with_identifier_type(mut self, uuid: &str) -> Self {
        self.identifier_types.insert(uuid.to_string());
        self
    }

    /// Searches on `reference` fail with a 500.
    pub fn failing_on(mut self, reference: &str) -> Self {
        self.failing.insert(reference.to_string());
        self
    }

    pub fn failing_identifier_lookups(mut self) -> Self {
        self.fail_identifier_lookups = true;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TerminologySource for FakeTerminology {
    async fn search_concepts(&self, references: &str, _representation: &str) -> Result<Vec<Concept>> {
        self.searches.lock().unwrap().push(references.to_string());
        self.simulate_latency().await;

        if self.failing.contains(references) {
            return Err(Error::Status {
                endpoint: "/concept".to_string(),
                status: 500,
            });
        }

        Ok(self.concepts.get(references).cloned().into_iter().collect())
    }

    async fn patient_identifier_type(&self, identifier_type: &str) -> Result<Option<Value>> {
        self.simulate_latency().await;

        if self.fail_identifier_lookups {
            return Err(Error::Status {
                endpoint: "/patientidentifiertype".to_string(),
                status: 503,
            });
        }

        Ok(self
            .identifier_types
            .get(identifier_type)
            .map(|uuid| json!({"uuid": uuid, "display": "OpenMRS ID"})))
    }
}

pub fn concept(uuid: &str, datatype: &str, answers: &[&str]) -> Concept {
    Concept {
        uuid: uuid.to_string(),
        display: Some(format!("Concept {}", uuid)),
        datatype: Some(ConceptDatatype {
            name: datatype.to_string(),
        }),
        answers: answers
            .iter()
            .map(|a| ConceptAnswer {
                uuid: a.to_string(),
                display: None,
            })
            .collect(),
        concept_mappings: Vec::new(),
    }
}

pub fn rules() -> DataTypeRenderingMap {
    DataTypeRenderingMap::new()
        .with("Boolean", ["radio", "checkbox", "toggle"])
        .with("Coded", ["select", "radio", "checkbox", "multiCheckbox"])
        .with("Numeric", ["number", "fixed-value"])
        .with("Text", ["text", "textarea"])
        .with("N/A", Vec::<String>::new())
}

pub fn config() -> ValidatorConfig {
    ValidatorConfig::new(rules())
}

/// Wrap questions into a single-page, single-section schema.
pub fn form(questions: Value) -> Value {
    json!({
        "name": "Test Form",
        "pages": [{
            "label": "Page 1",
            "sections": [{"label": "Section 1", "questions": questions}]
        }]
    })
}

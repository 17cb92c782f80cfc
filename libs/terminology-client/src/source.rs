use crate::client::TerminologyClient;
use crate::error::Result;
use crate::models::Concept;
use async_trait::async_trait;
use serde_json::Value;

/// Read-only view of a terminology service.
///
/// [`TerminologyClient`] is the HTTP implementation; validators depend on this
/// trait so lookups can be served from elsewhere.
#[async_trait]
pub trait TerminologySource: Send + Sync {
    async fn search_concepts(&self, references: &str, representation: &str)
        -> Result<Vec<Concept>>;

    async fn patient_identifier_type(&self, identifier_type: &str) -> Result<Option<Value>>;
}

#[async_trait]
impl TerminologySource for TerminologyClient {
    async fn search_concepts(
        &self,
        references: &str,
        representation: &str,
    ) -> Result<Vec<Concept>> {
        TerminologyClient::search_concepts(self, references, representation).await
    }

    async fn patient_identifier_type(&self, identifier_type: &str) -> Result<Option<Value>> {
        TerminologyClient::patient_identifier_type(self, identifier_type).await
    }
}

use anyhow::Result;
use ontox_core::{
    dataset::{OntologyRecord, OntologyTable},
    llm_client::{config::LlmConfig, groq_client::GroqClient},
    resolver::{AncestorAnswer, AncestorResolver},
    OntoxError,
};

use crate::config::Settings;

/// Service layer that owns the loaded ontology table and the resolver
pub struct OntologyService {
    table: OntologyTable,
    resolver: AncestorResolver<GroqClient>,
}

impl OntologyService {
    /// Create a new OntologyService
    ///
    /// Loads the dataset once; it is shared read-only for the lifetime of
    /// the server. Fails up front when the Groq credential is missing.
    pub fn new(settings: &Settings) -> Result<Self> {
        let table = OntologyTable::load(&settings.dataset_path)?;

        let mut llm_config = LlmConfig::default().with_api_key(settings.groq_api_key.clone());
        if let Some(model) = settings.model_name.clone() {
            llm_config = llm_config.with_model(model);
        }
        if let Some(base_url) = settings.groq_base_url.clone() {
            llm_config = llm_config.with_base_url(base_url);
        }

        let llm_client = GroqClient::new(llm_config)
            .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {:?}", e))?;

        Ok(Self {
            table,
            resolver: AncestorResolver::new(llm_client),
        })
    }

    /// First rows of the dataset, for the page preview
    pub fn preview(&self, n: usize) -> &[OntologyRecord] {
        self.table.head(n)
    }

    /// Total number of dataset records
    pub fn dataset_len(&self) -> usize {
        self.table.len()
    }

    /// Ask the LLM for the ancestors of the queried Preferred Label
    pub async fn ancestors(&self, query: &str) -> Result<AncestorAnswer, OntoxError> {
        self.resolver.resolve(&self.table, query).await
    }
}

/*
Copyright 2024, Zep Software, Inc.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! # Onto-X Core
//!
//! Library crate behind the Onto-X ancestor explorer.
//!
//! Loads a tabular ontology dataset, builds the ancestor-resolution prompt,
//! and delegates the actual hierarchy reasoning to a hosted LLM. There is
//! deliberately no graph traversal here: the resolution procedure is a
//! natural-language instruction set executed by the model.

pub mod dataset;
pub mod errors;
pub mod llm_client;
pub mod prompts;
pub mod resolver;

// Re-export commonly used types
pub use errors::{LlmError, OntoxError};

// Re-export traits
pub use llm_client::LlmClient;

// Re-export concrete types
pub use dataset::{OntologyRecord, OntologyTable};
pub use llm_client::{config::LlmConfig, models::Message, GroqClient};
pub use resolver::{AncestorAnswer, AncestorResolver};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports() {
        // This test ensures that all the main exports are available
        // and can be used together
        let _config = LlmConfig::default();
        let _table = OntologyTable::default();
    }
}

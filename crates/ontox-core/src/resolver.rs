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

//! LLM-backed ancestor resolution
//!
//! Builds the resolution prompt from the loaded ontology table and a
//! queried Preferred Label, sends it to the LLM, and classifies the reply.
//! The reply is either a dictionary of ancestor labels to depths, or raw
//! text when the model answered in any other shape. Classification never
//! fails; only transport and credential errors propagate as `Err`.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::dataset::OntologyTable;
use crate::errors::OntoxResult;
use crate::llm_client::LlmClient;
use crate::prompts::models::PromptVersion;
use crate::prompts::{get_prompt_library, PromptContext, PromptLibrary};

/// Outcome of an ancestor query.
#[derive(Debug, Clone, PartialEq)]
pub enum AncestorAnswer {
    /// The model replied with a dictionary of Preferred Label to depth.
    Depths(BTreeMap<String, u32>),
    /// The model replied in some other shape; the raw text is surfaced
    /// to the caller as-is.
    Raw(String),
}

/// Resolves ancestor chains by delegating to an LLM.
pub struct AncestorResolver<C: LlmClient> {
    client: C,
    prompts: PromptLibrary,
}

impl<C: LlmClient> AncestorResolver<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            prompts: get_prompt_library(),
        }
    }

    /// Ask the LLM for all ancestors of `query` within `table`.
    pub async fn resolve(&self, table: &OntologyTable, query: &str) -> OntoxResult<AncestorAnswer> {
        let mut context = PromptContext::new();
        context.insert(
            "ontology_context".to_string(),
            Value::String(table.to_context()?),
        );
        context.insert("query".to_string(), Value::String(query.to_string()));

        let messages = self.prompts.resolve_ancestors.resolve.call(&context);
        debug!("Resolving ancestors for query: {}", query);

        let reply = self.client.chat_completion(&messages).await?;
        Ok(classify_reply(reply))
    }
}

/// Classify an LLM reply as a depth dictionary or raw output.
fn classify_reply(reply: Value) -> AncestorAnswer {
    match &reply {
        Value::Object(map) => {
            let mut depths = BTreeMap::new();
            for (label, depth) in map {
                match depth.as_u64().and_then(|d| u32::try_from(d).ok()) {
                    Some(d) => {
                        depths.insert(label.clone(), d);
                    }
                    None => {
                        warn!("Non-integer depth for {:?} in LLM reply", label);
                        return AncestorAnswer::Raw(render_raw(&reply));
                    }
                }
            }
            AncestorAnswer::Depths(depths)
        }
        _ => AncestorAnswer::Raw(render_raw(&reply)),
    }
}

fn render_raw(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::client::MockLlmClient;
    use serde_json::json;

    fn sample_table() -> OntologyTable {
        let csv_data = "\
Class ID,Preferred Label,Synonyms,Definitions,Obsolete,CUI,Semantic Types,Parents
http://entity.org/1,CERVIX DISORDER,,,false,,,http://entity.org/2
http://entity.org/2,CERVIX DISORDERS,,,false,,,http://entity.org/3
http://entity.org/3,GYNECOLOGIC DISORDERS,,,false,,,
";
        let reader = csv::Reader::from_reader(csv_data.as_bytes());
        OntologyTable::from_csv_reader(reader).expect("sample CSV should parse")
    }

    fn resolver_with_reply(reply: Value) -> AncestorResolver<MockLlmClient> {
        let mut client = MockLlmClient::new();
        client
            .expect_chat_completion()
            .times(1)
            .returning(move |_| Ok(reply.clone()));
        AncestorResolver::new(client)
    }

    #[tokio::test]
    async fn test_dictionary_reply_parses_into_depths() {
        let resolver = resolver_with_reply(json!({
            "CERVIX DISORDERS": 1,
            "GYNECOLOGIC DISORDERS": 2
        }));
        let answer = resolver
            .resolve(&sample_table(), "CERVIX DISORDER")
            .await
            .expect("resolve");

        let mut expected = BTreeMap::new();
        expected.insert("CERVIX DISORDERS".to_string(), 1);
        expected.insert("GYNECOLOGIC DISORDERS".to_string(), 2);
        assert_eq!(answer, AncestorAnswer::Depths(expected));
    }

    #[tokio::test]
    async fn test_empty_dictionary_reply_is_valid() {
        let resolver = resolver_with_reply(json!({}));
        let answer = resolver
            .resolve(&sample_table(), "GYNECOLOGIC DISORDERS")
            .await
            .expect("resolve");
        assert_eq!(answer, AncestorAnswer::Depths(BTreeMap::new()));
    }

    #[tokio::test]
    async fn test_text_reply_takes_raw_path() {
        let resolver =
            resolver_with_reply(Value::String("I don't have any knowledge about that.".into()));
        let answer = resolver
            .resolve(&sample_table(), "UNKNOWN ENTITY")
            .await
            .expect("resolve");
        assert_eq!(
            answer,
            AncestorAnswer::Raw("I don't have any knowledge about that.".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_integer_depths_take_raw_path() {
        let resolver = resolver_with_reply(json!({ "CERVIX DISORDERS": "one" }));
        let answer = resolver
            .resolve(&sample_table(), "CERVIX DISORDER")
            .await
            .expect("resolve");
        match answer {
            AncestorAnswer::Raw(raw) => assert!(raw.contains("CERVIX DISORDERS")),
            other => panic!("expected raw answer, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_array_reply_takes_raw_path() {
        let resolver = resolver_with_reply(json!([1, 2, 3]));
        let answer = resolver
            .resolve(&sample_table(), "CERVIX DISORDER")
            .await
            .expect("resolve");
        assert_eq!(answer, AncestorAnswer::Raw("[1,2,3]".to_string()));
    }

    #[tokio::test]
    async fn test_client_errors_propagate() {
        let mut client = MockLlmClient::new();
        client
            .expect_chat_completion()
            .times(1)
            .returning(|_| Err(crate::errors::LlmError::RateLimit));
        let resolver = AncestorResolver::new(client);

        let result = resolver.resolve(&sample_table(), "CERVIX DISORDER").await;
        assert!(matches!(
            result,
            Err(crate::errors::OntoxError::Llm(
                crate::errors::LlmError::RateLimit
            ))
        ));
    }

    #[tokio::test]
    async fn test_prompt_receives_table_context() {
        let table = sample_table();
        let mut client = MockLlmClient::new();
        client
            .expect_chat_completion()
            .withf(|messages| {
                messages.len() == 2
                    && messages[1].content.contains("GYNECOLOGIC DISORDERS")
                    && messages[1].content.contains("Preferred Label: CERVIX DISORDER")
            })
            .times(1)
            .returning(|_| Ok(json!({})));
        let resolver = AncestorResolver::new(client);

        resolver
            .resolve(&table, "CERVIX DISORDER")
            .await
            .expect("resolve");
    }
}

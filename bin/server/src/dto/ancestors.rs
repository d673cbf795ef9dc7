use std::collections::BTreeMap;

use ontox_core::resolver::AncestorAnswer;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Warning shown when the LLM reply is not a dictionary
pub const UNEXPECTED_FORMAT_WARNING: &str =
    "Received an unexpected result format. Displaying raw output:";

/// Ancestor query request
#[derive(Debug, Deserialize, Validate)]
pub struct AncestorsRequest {
    #[validate(length(min = 1))]
    pub query: String,
}

/// Ancestor query response
///
/// A dictionary reply fills `ancestors`; anything else fills `raw` plus
/// the format warning.
#[derive(Debug, Serialize)]
pub struct AncestorsResponse {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<BTreeMap<String, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl AncestorsResponse {
    pub fn from_answer(query: String, answer: AncestorAnswer) -> Self {
        match answer {
            AncestorAnswer::Depths(depths) => Self {
                query,
                ancestors: Some(depths),
                raw: None,
                warning: None,
            },
            AncestorAnswer::Raw(raw) => Self {
                query,
                ancestors: None,
                raw: Some(raw),
                warning: Some(UNEXPECTED_FORMAT_WARNING.to_string()),
            },
        }
    }
}

/// Dataset preview response
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub total_records: usize,
    pub rows: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_fails_validation() {
        let request = AncestorsRequest {
            query: String::new(),
        };
        assert!(request.validate().is_err());

        let request = AncestorsRequest {
            query: "CERVIX DISORDER".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_dictionary_answer_has_no_warning() {
        let mut depths = BTreeMap::new();
        depths.insert("CERVIX DISORDERS".to_string(), 1);
        let response = AncestorsResponse::from_answer(
            "CERVIX DISORDER".to_string(),
            AncestorAnswer::Depths(depths),
        );
        assert!(response.ancestors.is_some());
        assert!(response.raw.is_none());
        assert!(response.warning.is_none());
    }

    #[test]
    fn test_raw_answer_carries_warning() {
        let response = AncestorsResponse::from_answer(
            "UNKNOWN".to_string(),
            AncestorAnswer::Raw("I don't have any knowledge about that.".to_string()),
        );
        assert!(response.ancestors.is_none());
        assert_eq!(
            response.raw.as_deref(),
            Some("I don't have any knowledge about that.")
        );
        assert_eq!(response.warning.as_deref(), Some(UNEXPECTED_FORMAT_WARNING));
    }
}

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

use async_trait::async_trait;
use serde_json::Value;

use super::models::Message;
use crate::errors::LlmResult;

/// Trait for LLM clients that can generate responses.
///
/// One call is one request. Callers get back the raw reply content parsed
/// as JSON when possible, otherwise a JSON string; interpreting the reply
/// is the caller's problem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat_completion(&self, messages: &[Message]) -> LlmResult<Value>;
}

/// Clean input string of invalid unicode and control characters
pub fn clean_input(input: &str) -> String {
    // Remove zero-width characters and other invisible unicode
    let zero_width_chars = ['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}', '\u{2060}'];
    let mut cleaned = input.to_string();
    for char in zero_width_chars {
        cleaned = cleaned.replace(char, "");
    }

    // Remove control characters except newlines, returns, and tabs
    cleaned
        .chars()
        .filter(|&c| (c as u32) >= 32 || c == '\n' || c == '\r' || c == '\t')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input_strips_zero_width() {
        let input = "CERVIX\u{200b} DISORDER\u{feff}";
        assert_eq!(clean_input(input), "CERVIX DISORDER");
    }

    #[test]
    fn test_clean_input_keeps_newlines_and_tabs() {
        let input = "a\tb\nc\u{0007}";
        assert_eq!(clean_input(input), "a\tb\nc");
    }
}

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

use thiserror::Error;

/// Base error type for Onto-X Core operations
#[derive(Debug, Error)]
pub enum OntoxError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] csv::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// LLM-specific error types
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    #[error("LLM refused to generate a response: {message}")]
    Refusal { message: String },

    #[error("LLM returned an empty response: {message}")]
    EmptyResponse { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Invalid model configuration: {message}")]
    InvalidConfig { message: String },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}

/// Result type alias for Onto-X operations
pub type OntoxResult<T> = Result<T, OntoxError>;

/// Result type alias for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

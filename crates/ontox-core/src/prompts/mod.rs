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

//! Prompt library for LLM interactions
//!
//! The ancestor-resolution logic of this tool is not implemented in code:
//! it lives entirely in the natural-language instruction set built here and
//! is executed by the hosted model.

pub mod lib;
pub mod models;
pub mod resolve_ancestors;

pub use lib::{get_prompt_library, PromptLibrary};
pub use models::{Message, PromptContext, PromptFunction};

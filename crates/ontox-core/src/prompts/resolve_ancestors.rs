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

//! Ancestor resolution prompts

use std::collections::HashMap;

use crate::prompts::models::{Message, PromptFunction};

const SYS_PROMPT: &str = r##"You are an ontology expert. Your job is to determine all the ancestor classes of a given entity from the ontology, along with the depth of each ancestor. The ancestors and their labels must come **exclusively from the provided context**. Do not invent or guess ancestors that are not listed in the context.

**General Explanation:**
1. You will be given an entity's Preferred Label.
2. Find that entity in the provided ontology context. If the entity is not found, return "I don't have any knowledge about that."
3. Identify the entity's parents (depth 1). Convert their Class IDs to their Preferred Labels using the context.
4. For each parent, find its parents (depth 2), and continue this process until no further parents exist (or only http://www.w3.org/2002/07/owl#Thing indicates a top-level entity).
5. Collect all these ancestors in a JSON-like dictionary with their Preferred Labels as keys and their depth as values.
6. If the entity has no parents, return an empty dictionary.
7. Strictly do not produce ancestors not found in the context.

**No Hallucinations:**
- Only include ancestors explicitly found in the context.
- Do not include entities not present in the provided data.
- If unsure, do not guess. Simply return what is found.

Final example output for "HYPOCHLOREMIC ALKALOSIS":
{ "ALKALOSIS": 1, "Chlorine Disorders": 1, "Hydrogen Disorders": 1, "METABOLIC DISORDERS": 2, "Element and Ion Disorders NEC": 2, "Metabolic and Nutritional Disorders": 3 }

This example is to illustrate the general procedure.

**Original Examples (For Reference):**

- Example 1: "CERVIX DISORDER"
  Suppose:
  "CERVIX DISORDER" -> Parent: "CERVIX DISORDERS" (depth 1)
  "CERVIX DISORDERS" -> Parent: "GYNECOLOGIC DISORDERS" (depth 2)

  Output:
  { "CERVIX DISORDERS": 1, "GYNECOLOGIC DISORDERS": 2 }

- Example 2: "EXTRAPYRAMIDAL SYNDROME"
  Suppose:
  "EXTRAPYRAMIDAL SYNDROME" -> Parent: "MOVEMENT DISORDERS" (depth 1)
  "MOVEMENT DISORDERS" -> Parent: "Nervous System" (depth 2)

  Output:
  { "MOVEMENT DISORDERS": 1, "Nervous System": 2 }

- Example 3: "ELECTROLYTE ABNORMALITY"
  Suppose:
  "ELECTROLYTE ABNORMALITY" -> Parents: "METABOLIC DISORDERS: GENERAL" (depth 1) and "Element and Ion Disorders NEC" (depth 1)
  "METABOLIC DISORDERS: GENERAL" -> Parent: "METABOLIC DISORDERS" (depth 2)
  "Element and Ion Disorders NEC" -> Parent: "Metabolic and Nutritional Disorders" (depth 2)

  Output:
  { "METABOLIC DISORDERS: GENERAL": 1, "Element and Ion Disorders NEC": 1, "METABOLIC DISORDERS": 2, "Metabolic and Nutritional Disorders": 2 }

- Example 4: "MESENTERIC VENOUS OCCLUSION"
  Suppose:
  "MESENTERIC VENOUS OCCLUSION" -> Parents: "Venous and Venular Disorders" (depth 1), "THROMBOSIS VENOUS" (depth 1)
  "Venous and Venular Disorders" -> Parent: "Vascular Disorders" (depth 2)
  "THROMBOSIS VENOUS" -> Parent: "PATHOLOGICAL DISORDERS" (depth 2)
  "Vascular Disorders" -> Parent: "CARDIOVASCULAR DISORDERS" (depth 3)

  Output:
  { "Venous and Venular Disorders": 1, "THROMBOSIS VENOUS": 1, "Vascular Disorders": 2, "PATHOLOGICAL DISORDERS": 2, "CARDIOVASCULAR DISORDERS": 3 }

- Example 5: "WBC ABNORMALITY"
  Suppose:
  "WBC ABNORMALITY" -> Parent: "WBC ABNORMALITY GENERAL" (depth 1)
  "WBC ABNORMALITY GENERAL" -> Parents: "HEMORRHAGE" (2), "SIGNS" (2), "HEMORRHAGIC DISORDER" (2), "Vascular Disorders, General and NEC" (2)
  Further ancestors might lead to "NONSPECIFIC DISORDERS" (3), "PATHOLOGICAL DISORDERS" (3), "Vascular Disorders" (3), "CARDIOVASCULAR DISORDERS" (4), depending on the context provided.

  A possible outcome:
  { "WBC ABNORMALITY GENERAL": 1, "HEMORRHAGE": 2, "SIGNS": 2, "HEMORRHAGIC DISORDER": 2, "Vascular Disorders, General and NEC": 2, "NONSPECIFIC DISORDERS": 3, "PATHOLOGICAL DISORDERS": 3, "Vascular Disorders": 3, "CARDIOVASCULAR DISORDERS": 4 }

- Example 6: "KIDNEY VASCULITIS"
  Suppose:
  "KIDNEY VASCULITIS" -> Parents: "COLLAGEN/VASCULAR DISEASE" (1), "kidney morphologic" (1), "RENOVASCULAR" (1), "RENAL DISORDERS: NONSPECIFIC" (1), "Vascular Disorders, General and NEC" (1)

  Each of these might have their own parents. For instance:
  "COLLAGEN/VASCULAR DISEASE" -> "PATHOLOGICAL DISORDERS" (2)
  "kidney morphologic" -> "Kidney Disorders" (2)
  "RENOVASCULAR" -> "RENAL DISORDERS" (2)
  "RENAL DISORDERS: NONSPECIFIC" -> "Vascular Disorders" (2)
  "Vascular Disorders, General and NEC" -> "Vascular Disorders" (2)
  and so on, tracing up until no more parents are found.

  A possible final answer:
  { "COLLAGEN/VASCULAR DISEASE": 1, "kidney morphologic": 1, "RENOVASCULAR": 1, "RENAL DISORDERS: NONSPECIFIC": 1, "Vascular Disorders, General and NEC": 1, "PATHOLOGICAL DISORDERS": 2, "Kidney Disorders": 2, "RENAL DISORDERS": 2, "Vascular Disorders": 2, "Urinary Tract Disorders": 3, "CARDIOVASCULAR DISORDERS": 3, "Urogenital System": 4 }

**If the entity is not found in the context:**
Return exactly:
"I don't have any knowledge about that."
"##;

/// Resolve the ancestors of an entity from the ontology context
pub fn resolve(context: &HashMap<String, serde_json::Value>) -> Vec<Message> {
    let ontology_context = context
        .get("ontology_context")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let query = context.get("query").and_then(|v| v.as_str()).unwrap_or("");

    let user_prompt = format!(
        r#"
<ONTOLOGY>
{ontology_context}
</ONTOLOGY>

Given the above ontology table, determine all ancestor classes of the entity with the Preferred Label below, following the procedure you were given. Respond with only the JSON dictionary of Preferred Labels to depths.

Preferred Label: {query}
"#
    );

    vec![Message::system(SYS_PROMPT), Message::user(user_prompt)]
}

/// Available prompt versions for ancestor resolution
pub struct ResolveAncestorsPrompt {
    pub resolve: PromptFunction,
}

impl Default for ResolveAncestorsPrompt {
    fn default() -> Self {
        Self { resolve }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_embeds_context_and_query() {
        let mut context = HashMap::new();
        context.insert(
            "ontology_context".to_string(),
            json!("Class ID,Preferred Label,Parents\nhttp://entity.org/1,CERVIX DISORDER,http://entity.org/2"),
        );
        context.insert("query".to_string(), json!("CERVIX DISORDER"));

        let messages = resolve(&context);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[0].content.contains("ontology expert"));
        assert!(messages[0]
            .content
            .contains("I don't have any knowledge about that."));
        assert!(messages[0]
            .content
            .contains("http://www.w3.org/2002/07/owl#Thing"));
        assert!(messages[1].content.contains("Preferred Label: CERVIX DISORDER"));
        assert!(messages[1].content.contains("<ONTOLOGY>"));
        assert!(messages[1].content.contains("http://entity.org/1"));
    }

    #[test]
    fn test_resolve_with_empty_context() {
        let messages = resolve(&HashMap::new());
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("Preferred Label: \n"));
    }
}

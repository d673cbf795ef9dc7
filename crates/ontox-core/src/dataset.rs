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

//! Ontology dataset loading
//!
//! Reads a BioPortal-style CSV export of an ontology into an in-memory
//! table. The table is loaded once at startup and shared read-only; no
//! indexing or relationship validation happens here. Interpreting the
//! parent references is entirely the job of the LLM prompt.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::info;

use crate::errors::OntoxResult;

/// Marker parent value for top-level entities.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";

/// A single ontology entity row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyRecord {
    #[serde(rename = "Class ID")]
    pub class_id: String,

    #[serde(rename = "Preferred Label")]
    pub preferred_label: String,

    #[serde(rename = "Synonyms", default, deserialize_with = "empty_as_none")]
    pub synonyms: Option<String>,

    #[serde(rename = "Definitions", default, deserialize_with = "empty_as_none")]
    pub definitions: Option<String>,

    #[serde(rename = "Obsolete", default, deserialize_with = "flexible_bool")]
    pub obsolete: bool,

    #[serde(rename = "CUI", default, deserialize_with = "empty_as_none")]
    pub cui: Option<String>,

    #[serde(rename = "Semantic Types", default, deserialize_with = "empty_as_none")]
    pub semantic_types: Option<String>,

    /// Parent class IDs, pipe-separated in the CSV.
    #[serde(
        rename = "Parents",
        default,
        deserialize_with = "split_parents",
        serialize_with = "join_parents"
    )]
    pub parents: Vec<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(
        value.as_deref().map(str::trim),
        Some(v) if v.eq_ignore_ascii_case("true")
    ))
}

fn split_parents<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| {
            s.split('|')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

fn join_parents<S>(parents: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&parents.join("|"))
}

/// The loaded ontology table.
#[derive(Debug, Clone, Default)]
pub struct OntologyTable {
    records: Vec<OntologyRecord>,
}

impl OntologyTable {
    /// Load the table from a CSV file on disk.
    pub fn load(path: impl AsRef<Path>) -> OntoxResult<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path)?;
        let table = Self::from_csv_reader(reader)?;
        info!(
            "Loaded ontology dataset from {} ({} records)",
            path.display(),
            table.len()
        );
        Ok(table)
    }

    /// Load the table from any CSV reader.
    pub fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> OntoxResult<Self> {
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: OntologyRecord = result?;
            records.push(record);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[OntologyRecord] {
        &self.records
    }

    /// First `n` rows, for the page preview.
    pub fn head(&self, n: usize) -> &[OntologyRecord] {
        &self.records[..self.records.len().min(n)]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the table as the textual context block handed to the LLM.
    ///
    /// Only the columns the resolution procedure reads are included:
    /// class ID, preferred label, and the parent references. Fields are
    /// written through the CSV writer so labels containing commas stay
    /// quoted and rows stay aligned.
    pub fn to_context(&self) -> OntoxResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["Class ID", "Preferred Label", "Parents"])?;
        for record in &self.records {
            writer.write_record([
                record.class_id.as_str(),
                record.preferred_label.as_str(),
                record.parents.join("|").as_str(),
            ])?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Class ID,Preferred Label,Synonyms,Definitions,Obsolete,CUI,Semantic Types,Parents
http://entity.org/1,CERVIX DISORDER,,,false,C001,T047,http://entity.org/2
http://entity.org/2,CERVIX DISORDERS,,,false,C002,T047,http://entity.org/3
http://entity.org/3,GYNECOLOGIC DISORDERS,,,false,C003,T047,http://www.w3.org/2002/07/owl#Thing
http://entity.org/4,ELECTROLYTE ABNORMALITY,,,false,C004,T047,http://entity.org/5|http://entity.org/6
http://entity.org/7,ORPHAN ENTITY,,,true,,,
";

    fn sample_table() -> OntologyTable {
        let reader = csv::Reader::from_reader(SAMPLE.as_bytes());
        OntologyTable::from_csv_reader(reader).expect("sample CSV should parse")
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(SAMPLE.as_bytes()).expect("write sample");
        let table = OntologyTable::load(file.path()).expect("load");
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_parents_are_split_on_pipe() {
        let table = sample_table();
        let multi = &table.records()[3];
        assert_eq!(
            multi.parents,
            vec!["http://entity.org/5", "http://entity.org/6"]
        );
    }

    #[test]
    fn test_empty_parents_cell_yields_no_parents() {
        let table = sample_table();
        let orphan = &table.records()[4];
        assert!(orphan.parents.is_empty());
        assert!(orphan.obsolete);
        assert!(orphan.cui.is_none());
    }

    #[test]
    fn test_owl_thing_is_not_filtered() {
        let table = sample_table();
        let top = &table.records()[2];
        assert_eq!(top.parents, vec![OWL_THING]);
    }

    #[test]
    fn test_head_preview() {
        let table = sample_table();
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(100).len(), 5);
        assert_eq!(table.head(2)[0].preferred_label, "CERVIX DISORDER");
    }

    #[test]
    fn test_context_rendering() {
        let table = sample_table();
        let context = table.to_context().expect("context");
        assert!(context.starts_with("Class ID,Preferred Label,Parents\n"));
        assert!(context.contains("CERVIX DISORDER,http://entity.org/2"));
        assert!(context.contains("http://entity.org/5|http://entity.org/6"));
    }

    #[test]
    fn test_context_quotes_labels_with_commas() {
        let csv_data = "\
Class ID,Preferred Label,Synonyms,Definitions,Obsolete,CUI,Semantic Types,Parents
http://entity.org/8,\"Vascular Disorders, General and NEC\",,,false,,,http://entity.org/9
";
        let reader = csv::Reader::from_reader(csv_data.as_bytes());
        let table = OntologyTable::from_csv_reader(reader).expect("parse");
        let context = table.to_context().expect("context");
        assert!(context
            .contains("\"Vascular Disorders, General and NEC\",http://entity.org/9"));
    }
}

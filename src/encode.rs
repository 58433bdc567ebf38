//! Encoder: requisite table rows → one encoded requisite line.
//!
//! Each row of a course's requisites table holds one leaf requirement written
//! in prose (`"(Mathematics 31A or"`), its minimum grade, and its role and
//! enforcement. Rows are rewritten into the compact form the parser reads:
//! `(MATH#31A{tttfC-}|...`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CompilerError;
use crate::graph::types::value_node_id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectArea {
    pub code: String,
    pub name: String,
}

/// Read-only subject-area name → code lookup, built once at run start.
#[derive(Debug, Clone, Default)]
pub struct SubjectAreaIndex {
    codes_by_name: HashMap<String, String>,
}

impl SubjectAreaIndex {
    pub fn new(subject_areas: &[SubjectArea]) -> Self {
        let codes_by_name = subject_areas
            .iter()
            .map(|s| (s.name.clone(), s.code.clone()))
            .collect();
        SubjectAreaIndex { codes_by_name }
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.codes_by_name.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes_by_name.is_empty()
    }
}

/// One row of a requisites table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisiteRow {
    /// Prose fragment, possibly with parentheses and a trailing `and` / `or`.
    pub expression: String,
    #[serde(default)]
    pub minimum_grade: String,
    #[serde(default)]
    pub prerequisite: bool,
    #[serde(default)]
    pub corequisite: bool,
    #[serde(default)]
    pub enforced: bool,
}

fn flag(b: bool) -> char {
    if b { 't' } else { 'f' }
}

/// Encode all rows of one course into a single line.
pub fn encode_rows(rows: &[RequisiteRow], index: &SubjectAreaIndex) -> Result<String, CompilerError> {
    let mut line = String::new();
    for row in rows {
        line.push_str(&encode_row(row, index)?);
    }
    Ok(line)
}

fn encode_row(row: &RequisiteRow, index: &SubjectAreaIndex) -> Result<String, CompilerError> {
    let mut fragment = row.expression.as_str();

    let and_suffix = fragment.strip_suffix(" and");
    if let Some(rest) = and_suffix {
        fragment = rest;
    }
    let or_suffix = fragment.strip_suffix(" or");
    if let Some(rest) = or_suffix {
        fragment = rest;
    }

    let prose_id = fragment.trim_matches(|c| matches!(c, '(' | ')' | ' '));
    if prose_id.is_empty() {
        return Err(CompilerError::encode(
            "N001",
            format!("Requisite row '{}' has no requirement text", row.expression),
        ));
    }

    // Last word is the catalog number; the rest names the subject area.
    let catalog_number = prose_id.rsplit(' ').next().unwrap_or(prose_id);
    let subject_name = prose_id[..prose_id.len() - catalog_number.len()].trim();

    let mut fragment = fragment.to_string();
    let (node_id, is_course) = match index.code_for(subject_name) {
        Some(code) => {
            let node_id = value_node_id(code, catalog_number);
            fragment = fragment.replacen(prose_id, &node_id, 1);
            (node_id, true)
        }
        None => (prose_id.to_string(), false),
    };

    let leaf = format!(
        "{}{{{}{}{}{}{}}}",
        node_id,
        flag(is_course),
        flag(row.enforced),
        flag(row.prerequisite),
        flag(row.corequisite),
        row.minimum_grade
    );

    // Whitespace is dropped from the connective text around the id, never from
    // the id itself, so course ids keep matching `CODE#CATALOG` node ids.
    let mut encoded = fragment
        .split(node_id.as_str())
        .map(|segment| segment.replace(' ', ""))
        .collect::<Vec<_>>()
        .join(&leaf);

    if and_suffix.is_some() {
        encoded.push('&');
    }
    if or_suffix.is_some() {
        encoded.push('|');
    }
    Ok(encoded)
}

//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::bind::{CourseExpression, bind_course};
use crate::encode::{RequisiteRow, SubjectArea, SubjectAreaIndex, encode_rows};
use crate::error::CompilerError;
use crate::graph::{CourseRef, Node, Relation};

/// Compile one course's encoded requisite line.
/// Returns a JSON object with either the graph records (success) or `errors`.
#[wasm_bindgen]
pub fn compile_requisites(subject_area_code: &str, catalog_number: &str, encoded: &str) -> JsValue {
    let result = compile_requisites_inner(subject_area_code, catalog_number, encoded);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn compile_requisites_inner(subject_area_code: &str, catalog_number: &str, encoded: &str) -> CompileResult {
    let input = CourseExpression::new(subject_area_code, catalog_number, encoded);
    match bind_course(&input) {
        Ok(contribution) => {
            let export = contribution.graph.into_export();
            CompileResult::Success(GraphDto {
                root_id: contribution.root_id,
                nodes: export.nodes,
                courses: export.courses,
                relations: export.relations,
            })
        }
        Err(error) => CompileResult::Errors {
            errors: vec![ErrorDto::from(error)],
        },
    }
}

/// Encode requisite table rows into one line.
/// `rows_json` is an array of rows, `subject_areas_json` an array of `{code, name}`.
#[wasm_bindgen]
pub fn encode_requisites(rows_json: &str, subject_areas_json: &str) -> JsValue {
    let result = encode_requisites_inner(rows_json, subject_areas_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn encode_requisites_inner(rows_json: &str, subject_areas_json: &str) -> EncodeResult {
    let rows = match serde_json::from_str::<Vec<RequisiteRow>>(rows_json) {
        Ok(r) => r,
        Err(e) => {
            return EncodeResult::Errors(vec![ErrorDto {
                code: "N002".into(),
                phase: "Encode".into(),
                message: format!("Failed to parse requisite rows JSON: {}", e),
                node_id: None,
            }]);
        }
    };

    let subject_areas = match serde_json::from_str::<Vec<SubjectArea>>(subject_areas_json) {
        Ok(s) => s,
        Err(e) => {
            return EncodeResult::Errors(vec![ErrorDto {
                code: "N002".into(),
                phase: "Encode".into(),
                message: format!("Failed to parse subject areas JSON: {}", e),
                node_id: None,
            }]);
        }
    };

    let index = SubjectAreaIndex::new(&subject_areas);
    match encode_rows(&rows, &index) {
        Ok(line) => EncodeResult::Success(line),
        Err(error) => EncodeResult::Errors(vec![ErrorDto::from(error)]),
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    node_id: Option<String>,
}

impl From<CompilerError> for ErrorDto {
    fn from(e: CompilerError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            node_id: e.node_id,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphDto {
    root_id: Option<String>,
    nodes: Vec<Node>,
    courses: Vec<CourseRef>,
    relations: Vec<Relation>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum CompileResult {
    #[serde(rename = "success")]
    Success(GraphDto),
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", content = "value")]
enum EncodeResult {
    #[serde(rename = "success")]
    Success(String),
    #[serde(rename = "errors")]
    Errors(Vec<ErrorDto>),
}

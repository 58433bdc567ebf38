//! Run configuration, read once at run start.

use serde::{Deserialize, Serialize};

use crate::encode::{SubjectArea, SubjectAreaIndex};
use crate::error::CompilerError;

const DEFAULT_MAX_WORKERS: usize = 8;

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Upper bound on concurrently compiled courses.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// Subject-area snapshot used by the encoder.
    #[serde(default)]
    pub subject_areas: Vec<SubjectArea>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_workers: DEFAULT_MAX_WORKERS,
            subject_areas: Vec::new(),
        }
    }
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self, CompilerError> {
        let config: RunConfig = serde_json::from_str(json).map_err(|e| {
            CompilerError::config("C001", format!("Failed to parse run config JSON: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompilerError> {
        if self.max_workers == 0 {
            return Err(CompilerError::config(
                "C001",
                "maxWorkers must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn subject_area_index(&self) -> SubjectAreaIndex {
        SubjectAreaIndex::new(&self.subject_areas)
    }
}

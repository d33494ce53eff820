//! Maps encoded label ids back to category names.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::{read_artifact, write_artifact};
use crate::pipeline::LabelDecoder;
use crate::{ModelError, Result};

pub const LABEL_ENCODER_KIND: &str = "label_encoder";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Category name for each encoded id; the id is the index.
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        let encoder = Self { classes };
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let encoder: Self = read_artifact(path, LABEL_ENCODER_KIND)?;
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_artifact(path, LABEL_ENCODER_KIND, self)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(ModelError::invalid(LABEL_ENCODER_KIND, "no classes"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ModelError::invalid(LABEL_ENCODER_KIND, format!("duplicate class '{dup}'")));
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn decode(&self, id: i64) -> Result<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
            .ok_or(ModelError::UnseenLabel(id))
    }
}

impl LabelDecoder for LabelEncoder {
    fn inverse_transform(&self, ids: &[i64]) -> Result<Vec<String>> {
        ids.iter().map(|&id| self.decode(id).map(str::to_string)).collect()
    }
}

//! Pre-trained linear classifier.
//!
//! Covers every model that scores classes with `coef · x + intercept`
//! (logistic regression, linear SVM, ridge). Predicts encoded label ids.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::{read_artifact, write_artifact};
use crate::features::FeatureVector;
use crate::pipeline::Classifier;
use crate::{ModelError, Result};

pub const CLASSIFIER_KIND: &str = "linear_classifier";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// Encoded label id for each class, in score order.
    classes: Vec<i64>,
    /// One weight row per class, or a single row for binary problems.
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearClassifier {
    pub fn new(classes: Vec<i64>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        let model = Self { classes, coef, intercept };
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let model: Self = read_artifact(path, CLASSIFIER_KIND)?;
        model.validate()?;
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_artifact(path, CLASSIFIER_KIND, self)
    }

    fn validate(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(ModelError::invalid(CLASSIFIER_KIND, "at least two classes are required"));
        }

        let rows = self.coef.len();
        let rows_ok = if n_classes == 2 { rows == 1 || rows == 2 } else { rows == n_classes };
        if !rows_ok {
            return Err(ModelError::invalid(
                CLASSIFIER_KIND,
                format!("{rows} coefficient rows for {n_classes} classes"),
            ));
        }
        if self.intercept.len() != rows {
            return Err(ModelError::invalid(
                CLASSIFIER_KIND,
                format!("{} intercepts for {rows} coefficient rows", self.intercept.len()),
            ));
        }

        let width = self.coef[0].len();
        if width == 0 || self.coef.iter().any(|row| row.len() != width) {
            return Err(ModelError::invalid(CLASSIFIER_KIND, "coefficient rows must share a non-zero width"));
        }
        let all_finite = self.coef.iter().flatten().chain(&self.intercept).all(|w| w.is_finite());
        if !all_finite {
            return Err(ModelError::invalid(CLASSIFIER_KIND, "weights contain non-finite values"));
        }
        Ok(())
    }

    /// Number of input features the weights were trained on.
    pub fn n_features(&self) -> usize {
        self.coef[0].len()
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Raw per-row scores for one sample.
    pub fn decision_function(&self, x: &FeatureVector) -> Result<Vec<f64>> {
        if x.dim() != self.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features(),
                found: x.dim(),
            });
        }
        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| x.dot(row) + b)
            .collect())
    }

    pub fn predict_one(&self, x: &FeatureVector) -> Result<i64> {
        let scores = self.decision_function(x)?;
        if scores.len() == 1 {
            let idx = usize::from(scores[0] > 0.0);
            return Ok(self.classes[idx]);
        }

        // First maximum wins on ties.
        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<i64>> {
        rows.iter().map(|x| self.predict_one(x)).collect()
    }
}

//! The three inference stages and the single-text prediction path.

use tracing::debug;

use crate::features::FeatureVector;
use crate::{ModelError, Result};

/// Text -> fixed-width numeric features.
pub trait FeatureTransformer: Send + Sync {
    fn transform(&self, texts: &[&str]) -> Result<Vec<FeatureVector>>;
}

/// Feature rows -> encoded label ids, one per row.
pub trait Classifier: Send + Sync {
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<i64>>;
}

/// Encoded label ids -> category names.
pub trait LabelDecoder: Send + Sync {
    fn inverse_transform(&self, ids: &[i64]) -> Result<Vec<String>>;
}

/// A complete set of loaded artifacts. Immutable once built.
pub struct Artifacts {
    transformer: Box<dyn FeatureTransformer>,
    classifier: Box<dyn Classifier>,
    decoder: Box<dyn LabelDecoder>,
}

impl std::fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifacts").finish_non_exhaustive()
    }
}

impl Artifacts {
    pub fn new(
        transformer: impl FeatureTransformer + 'static,
        classifier: impl Classifier + 'static,
        decoder: impl LabelDecoder + 'static,
    ) -> Self {
        Self {
            transformer: Box::new(transformer),
            classifier: Box::new(classifier),
            decoder: Box::new(decoder),
        }
    }

    /// Classify one text and return its category name.
    ///
    /// Runs transform, classify and decode once each. The text is submitted
    /// as a batch of one, so only position 0 of each stage's output is used.
    pub fn predict(&self, text: &str) -> Result<String> {
        let features = self.transformer.transform(&[text])?;
        let ids = self.classifier.predict(&features)?;
        let id = *ids
            .first()
            .ok_or(ModelError::EmptyPrediction { stage: "classifier" })?;

        let label = self
            .decoder
            .inverse_transform(&[id])?
            .into_iter()
            .next()
            .ok_or(ModelError::EmptyPrediction { stage: "label decoder" })?;

        debug!(id, label = %label, "prediction complete");
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Shared record of which stage ran, in call order.
    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    struct RecordingTransformer {
        log: CallLog,
        fail: Option<String>,
    }

    impl FeatureTransformer for RecordingTransformer {
        fn transform(&self, texts: &[&str]) -> Result<Vec<FeatureVector>> {
            self.log.lock().unwrap().push("transform");
            if let Some(msg) = &self.fail {
                return Err(ModelError::Inference(msg.clone()));
            }
            Ok(texts
                .iter()
                .map(|t| FeatureVector::new(2, vec![(0, t.len() as f64)]))
                .collect())
        }
    }

    struct RecordingClassifier {
        log: CallLog,
        output: Vec<i64>,
    }

    impl Classifier for RecordingClassifier {
        fn predict(&self, _rows: &[FeatureVector]) -> Result<Vec<i64>> {
            self.log.lock().unwrap().push("classify");
            Ok(self.output.clone())
        }
    }

    struct RecordingDecoder {
        log: CallLog,
    }

    impl LabelDecoder for RecordingDecoder {
        fn inverse_transform(&self, ids: &[i64]) -> Result<Vec<String>> {
            self.log.lock().unwrap().push("decode");
            Ok(ids.iter().map(|id| format!("mood-{id}")).collect())
        }
    }

    fn recording(fail: Option<&str>, output: Vec<i64>) -> (Artifacts, CallLog) {
        let log = CallLog::default();
        let artifacts = Artifacts::new(
            RecordingTransformer { log: log.clone(), fail: fail.map(str::to_string) },
            RecordingClassifier { log: log.clone(), output },
            RecordingDecoder { log: log.clone() },
        );
        (artifacts, log)
    }

    #[test]
    fn test_stages_run_once_in_order() {
        let (artifacts, log) = recording(None, vec![3]);
        assert_eq!(artifacts.predict("I feel so happy today").unwrap(), "mood-3");
        assert_eq!(*log.lock().unwrap(), vec!["transform", "classify", "decode"]);
    }

    #[test]
    fn test_takes_first_classifier_position() {
        let (artifacts, _) = recording(None, vec![1, 9]);
        assert_eq!(artifacts.predict("la la").unwrap(), "mood-1");
    }

    #[test]
    fn test_transform_failure_stops_pipeline() {
        let (artifacts, log) = recording(Some("unseen feature"), vec![0]);
        let err = artifacts.predict("anything").unwrap_err();
        assert!(err.to_string().contains("unseen feature"));
        assert_eq!(*log.lock().unwrap(), vec!["transform"]);
    }

    #[test]
    fn test_empty_classifier_output_is_an_error() {
        let (artifacts, log) = recording(None, vec![]);
        let err = artifacts.predict("anything").unwrap_err();
        assert_eq!(err.to_string(), "classifier returned no result");
        assert_eq!(*log.lock().unwrap(), vec!["transform", "classify"]);
    }
}

//! Startup loading of the artifact bundle.
//!
//! Loading never fails outright: any problem with any of the three files
//! leaves the bundle [`ArtifactBundle::Unavailable`] for the rest of the
//! process lifetime. There is no reload; restart the process instead.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info, warn};

use crate::classifier::LinearClassifier;
use crate::label_encoder::LabelEncoder;
use crate::pipeline::Artifacts;
use crate::vectorizer::TfidfVectorizer;
use crate::{ModelError, Result};

pub const DEFAULT_MODEL_FILE: &str = "model.json";
pub const DEFAULT_VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const DEFAULT_LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// Where the three artifact files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub dir: PathBuf,
    pub model: String,
    pub vectorizer: String,
    pub label_encoder: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            model: DEFAULT_MODEL_FILE.to_string(),
            vectorizer: DEFAULT_VECTORIZER_FILE.to_string(),
            label_encoder: DEFAULT_LABEL_ENCODER_FILE.to_string(),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(&self.vectorizer)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.dir.join(&self.label_encoder)
    }
}

/// Either a full set of artifacts, or the reason prediction is disabled.
#[derive(Debug)]
pub enum ArtifactBundle {
    Loaded(Artifacts),
    Unavailable { reason: String },
}

impl ArtifactBundle {
    /// Load all three artifacts, degrading to `Unavailable` on any error.
    pub fn load(paths: &ArtifactPaths) -> Self {
        let start = Instant::now();
        match Self::try_load(paths) {
            Ok(artifacts) => {
                info!(
                    dir = %paths.dir.display(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "All models loaded successfully"
                );
                ArtifactBundle::Loaded(artifacts)
            }
            Err(e) => {
                error!(dir = %paths.dir.display(), "Error loading model files: {}", e);
                ArtifactBundle::Unavailable { reason: e.to_string() }
            }
        }
    }

    fn try_load(paths: &ArtifactPaths) -> Result<Artifacts> {
        let classifier = load_file(&paths.model_path(), LinearClassifier::load)?;
        let vectorizer = load_file(&paths.vectorizer_path(), TfidfVectorizer::load)?;
        let encoder = load_file(&paths.label_encoder_path(), LabelEncoder::load)?;

        info!(
            vocabulary = vectorizer.n_features(),
            classes = classifier.classes().len(),
            labels = encoder.classes().len(),
            "artifact summary"
        );

        // Left to surface per request, as a shape mismatch.
        if classifier.n_features() != vectorizer.n_features() {
            warn!(
                classifier_features = classifier.n_features(),
                vectorizer_features = vectorizer.n_features(),
                "classifier and vectorizer widths differ; every prediction will fail"
            );
        }
        if let Some(id) = classifier
            .classes()
            .iter()
            .find(|&&id| encoder.decode(id).is_err())
        {
            warn!(id, "classifier can predict a label id the encoder cannot decode");
        }

        Ok(Artifacts::new(vectorizer, classifier, encoder))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ArtifactBundle::Unavailable { reason: reason.into() }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ArtifactBundle::Loaded(_))
    }

    pub fn artifacts(&self) -> Option<&Artifacts> {
        match self {
            ArtifactBundle::Loaded(artifacts) => Some(artifacts),
            ArtifactBundle::Unavailable { .. } => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            ArtifactBundle::Loaded(_) => None,
            ArtifactBundle::Unavailable { reason } => Some(reason),
        }
    }
}

fn load_file<T>(path: &Path, load: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    load(path).map_err(|source| ModelError::Load {
        path: path.display().to_string(),
        source: Box::new(source),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::vectorizer::TfidfSpec;

    fn write_valid_artifacts(dir: &Path) {
        let vocabulary: HashMap<String, usize> = ["happy", "sad", "sunshine", "tears"]
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();
        TfidfVectorizer::from_spec(TfidfSpec::new(vocabulary, vec![1.0; 4]))
            .unwrap()
            .save(&dir.join(DEFAULT_VECTORIZER_FILE))
            .unwrap();
        LinearClassifier::new(
            vec![0, 1],
            vec![vec![1.0, -1.0, 1.0, -1.0], vec![-1.0, 1.0, -1.0, 1.0]],
            vec![0.0, 0.0],
        )
        .unwrap()
        .save(&dir.join(DEFAULT_MODEL_FILE))
        .unwrap();
        LabelEncoder::new(vec!["Happy".into(), "Sad".into()])
            .unwrap()
            .save(&dir.join(DEFAULT_LABEL_ENCODER_FILE))
            .unwrap();
    }

    #[test]
    fn test_loads_and_predicts() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_artifacts(dir.path());

        let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(dir.path()));
        let artifacts = bundle.artifacts().expect("bundle should load");
        assert_eq!(artifacts.predict("I feel so happy today").unwrap(), "Happy");
        assert_eq!(artifacts.predict("sad sad tears").unwrap(), "Sad");
    }

    #[test]
    fn test_missing_file_disables_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_artifacts(dir.path());
        std::fs::remove_file(dir.path().join(DEFAULT_LABEL_ENCODER_FILE)).unwrap();

        let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(dir.path()));
        assert!(!bundle.is_loaded());
        let reason = bundle.unavailable_reason().unwrap();
        assert!(reason.contains(DEFAULT_LABEL_ENCODER_FILE), "reason: {reason}");
    }

    #[test]
    fn test_corrupt_file_disables_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_artifacts(dir.path());
        std::fs::write(dir.path().join(DEFAULT_MODEL_FILE), b"\x80\x04not json").unwrap();

        let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(dir.path()));
        assert!(bundle.artifacts().is_none());
        assert!(bundle.unavailable_reason().unwrap().contains("JSON error"));
    }

    #[test]
    fn test_incompatible_version_disables_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_artifacts(dir.path());
        let path = dir.path().join(DEFAULT_VECTORIZER_FILE);
        let mut doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        doc["version"] = serde_json::json!(2);
        std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

        let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(dir.path()));
        assert!(bundle.unavailable_reason().unwrap().contains("Unsupported tfidf_vectorizer version 2"));
    }

    #[test]
    fn test_width_mismatch_is_a_request_failure_not_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_artifacts(dir.path());
        LinearClassifier::new(vec![0, 1], vec![vec![1.0, 1.0]], vec![0.0])
            .unwrap()
            .save(&dir.path().join(DEFAULT_MODEL_FILE))
            .unwrap();

        let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(dir.path()));
        let err = bundle.artifacts().unwrap().predict("happy").unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { expected: 2, found: 4 }));
    }

    #[test]
    fn test_shipped_sample_artifacts_load_and_predict() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../artifacts");
        let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir(dir));
        let artifacts = bundle.artifacts().expect("sample artifacts should load");

        for (lyrics, mood) in [
            ("I feel so happy today, the sunshine makes me smile", "Happy"),
            ("Lonely nights and tears in the rain", "Sad"),
            ("I scream with rage, I hate this fight", "Angry"),
            ("A slow gentle breeze, an easy dream", "Relaxed"),
        ] {
            assert_eq!(artifacts.predict(lyrics).unwrap(), mood, "lyrics: {lyrics}");
        }
    }

    #[test]
    fn test_default_paths() {
        let paths = ArtifactPaths::in_dir("artifacts");
        assert_eq!(paths.model_path(), PathBuf::from("artifacts/model.json"));
        assert_eq!(paths.vectorizer_path(), PathBuf::from("artifacts/tfidf_vectorizer.json"));
        assert_eq!(paths.label_encoder_path(), PathBuf::from("artifacts/label_encoder.json"));
        assert_eq!(ArtifactPaths::default().dir, PathBuf::from("."));
    }
}

//! lyricmood-model — Pre-fitted text classification artifacts.
//!
//! Three artifacts make up a bundle:
//!   - a TF-IDF vectorizer (text -> sparse feature vector)
//!   - a linear classifier (feature vector -> encoded label id)
//!   - a label encoder (encoded label id -> category name)
//!
//! # Example
//! ```rust,no_run
//! use lyricmood_model::{ArtifactBundle, ArtifactPaths};
//!
//! let bundle = ArtifactBundle::load(&ArtifactPaths::in_dir("artifacts"));
//! if let Some(artifacts) = bundle.artifacts() {
//!     let mood = artifacts.predict("I feel so happy today").unwrap();
//!     println!("{mood}");
//! }
//! ```

pub mod artifact;
pub mod bundle;
pub mod classifier;
pub mod error;
pub mod features;
pub mod label_encoder;
pub mod pipeline;
pub mod vectorizer;

pub use bundle::{ArtifactBundle, ArtifactPaths};
pub use classifier::LinearClassifier;
pub use error::{ModelError, Result};
pub use features::FeatureVector;
pub use label_encoder::LabelEncoder;
pub use pipeline::{Artifacts, Classifier, FeatureTransformer, LabelDecoder};
pub use vectorizer::{Norm, TfidfSpec, TfidfVectorizer};

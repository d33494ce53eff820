//! On-disk envelope shared by all artifacts.
//!
//! Every artifact is a JSON object carrying a `format` tag and a `version`
//! next to its own fields:
//!
//! ```json
//! { "format": "label_encoder", "version": 1, "classes": ["Happy", "Sad"] }
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Artifact schema version understood by this build.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct Header {
    format: String,
    version: u32,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    format: &'a str,
    version: u32,
    #[serde(flatten)]
    body: &'a T,
}

/// Parse an artifact document, checking its format tag and version first.
pub(crate) fn parse_artifact<T: DeserializeOwned>(bytes: &[u8], kind: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let header = Header::deserialize(&value)?;

    if header.format != kind {
        return Err(ModelError::Format {
            expected: kind.to_string(),
            found: header.format,
        });
    }
    if header.version != FORMAT_VERSION {
        return Err(ModelError::UnsupportedVersion {
            kind: kind.to_string(),
            found: header.version,
            supported: FORMAT_VERSION,
        });
    }

    Ok(T::deserialize(value)?)
}

pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T> {
    let bytes = std::fs::read(path)?;
    parse_artifact(&bytes, kind)
}

pub(crate) fn write_artifact<T: Serialize>(path: &Path, kind: &str, body: &T) -> Result<()> {
    let envelope = Envelope {
        format: kind,
        version: FORMAT_VERSION,
        body,
    };
    let json = serde_json::to_vec_pretty(&envelope)?;
    std::fs::write(path, json)?;
    Ok(())
}

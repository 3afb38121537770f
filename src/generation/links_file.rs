//! Versioned JSON links file loading.
//!
//! ```json
//! {
//!   "version": 1,
//!   "files": {
//!     "/home/alice/.bashrc": { "source": "/store/abc-bashrc", "type": "link" }
//!   }
//! }
//! ```
use std::path::Path;

use serde::Deserialize;

use super::Generation;
use crate::error::SchemaError;

/// The only links file schema version this linker understands.
pub const SUPPORTED_VERSION: u64 = 1;

/// Read just enough to dispatch on the schema version.
#[derive(Deserialize)]
struct Header {
    version: u64,
}

#[derive(Deserialize)]
struct LinksDocument {
    files: Generation,
}

/// Read and parse the links file at `path`.
///
/// # Errors
///
/// Returns [`SchemaError::Io`] if the file cannot be read, and any error of
/// [`parse_links`] otherwise.
pub fn load_links_file(path: &Path) -> Result<Generation, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_links(&content, &path.display().to_string())
}

/// Parse a links document.  `origin` names the document in error messages.
///
/// # Errors
///
/// Returns [`SchemaError::Malformed`] if the text is not JSON, lacks a
/// `version` or `files` key, or contains an entry of unknown type, and
/// [`SchemaError::UnsupportedVersion`] if `version` is not
/// [`SUPPORTED_VERSION`].
pub fn parse_links(content: &str, origin: &str) -> Result<Generation, SchemaError> {
    let malformed = |source| SchemaError::Malformed {
        origin: origin.to_string(),
        source,
    };

    let header: Header = serde_json::from_str(content).map_err(malformed)?;
    if header.version != SUPPORTED_VERSION {
        return Err(SchemaError::UnsupportedVersion {
            origin: origin.to_string(),
            version: header.version,
        });
    }

    let document: LinksDocument = serde_json::from_str(content).map_err(malformed)?;
    Ok(document.files)
}

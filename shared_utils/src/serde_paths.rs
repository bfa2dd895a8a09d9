//! Lossy path serialization for reports.
//!
//! serde rejects paths that are not valid UTF-8. These helpers write such
//! paths with U+FFFD in place of the invalid bytes so a report never fails to
//! serialize.

use serde::Serializer;
use std::path::{Path, PathBuf};

/// `#[serde(serialize_with = "shared_utils::serde_paths::lossy")]`
pub fn lossy<P, S>(path: &P, serializer: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: Serializer,
{
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}

/// Same as [`lossy`] for `(path, message)` failure lists.
pub fn lossy_errors<S>(errors: &[(PathBuf, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(
        errors
            .iter()
            .map(|(path, message)| (path.to_string_lossy(), message)),
    )
}

//! Image asset domain types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a locally built container image asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAssetConfig {
    /// Asset name, used to derive the image URI
    pub asset_name: String,

    /// Build context directory
    pub directory: PathBuf,
}

impl ImageAssetConfig {
    pub fn new(asset_name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self { asset_name: asset_name.into(), directory: directory.into() }
    }
}

/// Built container image asset.
///
/// Immutable once built; the source hash pins the image to the exact
/// build-context contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Asset name
    pub asset_name: String,

    /// SHA256 over the build context (relative paths and file contents)
    pub source_hash: String,

    /// Image URI referenced by container definitions
    pub image_uri: String,
}

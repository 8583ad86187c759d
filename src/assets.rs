//! Container image asset builder.
//!
//! Builds a local directory into an addressable image artifact. The asset is
//! pinned by a SHA256 source hash over the build context, so rebuilding an
//! unchanged directory yields the same artifact.

use crate::error::{Result, StratusError};
use crate::types::{ImageAsset, ImageAssetConfig};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Builder for container image assets.
pub struct ImageAssetBuilder;

impl ImageAssetBuilder {
    /// Build an image asset from its build-context directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing, is not a directory, or
    /// cannot be read.
    #[instrument(skip(config), fields(asset = %config.asset_name))]
    pub fn build(config: &ImageAssetConfig) -> Result<ImageAsset> {
        info!("Building image asset from {:?}", config.directory);

        if !config.directory.is_dir() {
            return Err(StratusError::BuildContextMissing {
                path: config.directory.clone(),
                hint: "Expected a directory containing the container build context".to_string(),
            });
        }

        let source_hash = Self::hash_directory(&config.directory)?;
        let image_uri = format!("{}:{}", config.asset_name, &source_hash[..12]);

        info!(hash = %source_hash, "Image asset built");
        Ok(ImageAsset { asset_name: config.asset_name.clone(), source_hash, image_uri })
    }

    /// SHA256 over relative paths and file contents, visited in sorted order
    /// so the hash is independent of directory iteration order.
    fn hash_directory(dir: &Path) -> Result<String> {
        let mut files = Vec::new();
        Self::collect_files(dir, dir, &mut files)?;
        files.sort();

        let mut hasher = Sha256::new();
        for (relative, absolute) in files {
            hasher.update(relative.as_bytes());
            let content = fs::read(&absolute)
                .map_err(|e| StratusError::IoError { path: absolute.clone(), source: e })?;
            hasher.update(&content);
        }
        Ok(format!("{:x}", hasher.finalize()))
    }

    fn collect_files(root: &Path, dir: &Path, out: &mut Vec<(String, PathBuf)>) -> Result<()> {
        let entries = fs::read_dir(dir)
            .map_err(|e| StratusError::IoError { path: dir.to_path_buf(), source: e })?;

        for entry in entries {
            let entry =
                entry.map_err(|e| StratusError::IoError { path: dir.to_path_buf(), source: e })?;
            let path = entry.path();
            if path.is_dir() {
                Self::collect_files(root, &path, out)?;
            } else if path.is_file() {
                let relative = path
                    .strip_prefix(root)
                    .map_err(|e| StratusError::BuildFailed { reason: e.to_string() })?
                    .to_string_lossy()
                    .to_string();
                out.push((relative, path));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_context(dir: &TempDir, dockerfile: &str) {
        fs::write(dir.path().join("Dockerfile"), dockerfile).unwrap();
    }

    #[test]
    fn test_missing_directory_fails_fast() {
        let config = ImageAssetConfig::new("demo", "/nonexistent/build/context");
        let err = ImageAssetBuilder::build(&config);
        assert!(matches!(err, Err(StratusError::BuildContextMissing { .. })));
    }

    #[test]
    fn test_identical_context_yields_identical_hash() {
        let dir = TempDir::new().unwrap();
        write_context(&dir, "FROM alpine:3.20\n");

        let config = ImageAssetConfig::new("demo", dir.path());
        let first = ImageAssetBuilder::build(&config).unwrap();
        let second = ImageAssetBuilder::build(&config).unwrap();
        assert_eq!(first.source_hash, second.source_hash);
        assert_eq!(first.image_uri, second.image_uri);
    }

    #[test]
    fn test_changed_context_changes_hash() {
        let dir = TempDir::new().unwrap();
        write_context(&dir, "FROM alpine:3.20\n");
        let config = ImageAssetConfig::new("demo", dir.path());
        let before = ImageAssetBuilder::build(&config).unwrap();

        write_context(&dir, "FROM alpine:3.21\n");
        let after = ImageAssetBuilder::build(&config).unwrap();
        assert_ne!(before.source_hash, after.source_hash);
    }

    #[test]
    fn test_nested_files_are_hashed() {
        let dir = TempDir::new().unwrap();
        write_context(&dir, "FROM alpine:3.20\nCOPY app /app\n");
        fs::create_dir(dir.path().join("app")).unwrap();
        fs::write(dir.path().join("app").join("main.py"), "print('hi')\n").unwrap();
        let config = ImageAssetConfig::new("demo", dir.path());
        let before = ImageAssetBuilder::build(&config).unwrap();

        fs::write(dir.path().join("app").join("main.py"), "print('bye')\n").unwrap();
        let after = ImageAssetBuilder::build(&config).unwrap();
        assert_ne!(before.source_hash, after.source_hash);
    }

    #[test]
    fn test_uri_embeds_asset_name_and_short_hash() {
        let dir = TempDir::new().unwrap();
        write_context(&dir, "FROM alpine:3.20\n");
        let config = ImageAssetConfig::new("demo-image", dir.path());
        let asset = ImageAssetBuilder::build(&config).unwrap();

        assert!(asset.image_uri.starts_with("demo-image:"));
        assert_eq!(asset.image_uri, format!("demo-image:{}", &asset.source_hash[..12]));
    }
}

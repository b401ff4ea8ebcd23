//! Temporary module trees for discovery and runner tests.
//!
//! A [`ModuleTree`] owns a temporary directory laid out like a platform source
//! tree. It is removed when the tree is dropped.
//!
//! # Examples
//!
//! ```
//! use openapi_cases_test_helpers::tree::ModuleTree;
//!
//! let tree = ModuleTree::new().expect("create tree");
//! let dir = tree.schema_dir("modules/010-foo/openapi").expect("create schema dir");
//! assert!(dir.is_dir());
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary source tree rooted in its own directory.
pub struct ModuleTree {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl ModuleTree {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create module tree")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("module tree is not valid UTF-8: {}", path.display()))?;
        Ok(Self { root, _dir: dir })
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Creates the directory `relative` (and its parents) and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn schema_dir(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        std::fs::create_dir_all(&path).with_context(|| format!("create {path}"))?;
        Ok(path)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be written.
    pub fn write_file(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Writes a case file named `file_name` into the schema directory
    /// `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn cases_file(&self, schema_dir: &str, file_name: &str, yaml: &str) -> Result<Utf8PathBuf> {
        self.write_file(&format!("{schema_dir}/{file_name}"), yaml)
    }
}

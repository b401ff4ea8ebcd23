//! Locating module schema directories in a source tree.
//!
//! Schemas live in an `openapi` directory per module, spread over the
//! open-source tree and the enterprise trees, plus one directory for the
//! global values.

use std::path::{Path, PathBuf};

use camino::Utf8Path;
use glob::Pattern;
use tracing::debug;

use crate::{CasesError, CasesResult};

/// Glob patterns, relative to the tree root, matching module schema
/// directories. Expanded in this order.
pub const MODULE_SCHEMA_PATTERNS: [&str; 3] = [
    "modules/*/openapi",
    "ee/modules/*/openapi",
    "ee/fe/modules/*/openapi",
];

/// Schema directory of the global values, relative to the tree root.
pub const GLOBAL_SCHEMA_DIR: &str = "global-hooks/openapi";

/// Lists the schema directories that exist below `root`.
///
/// Matches of [`MODULE_SCHEMA_PATTERNS`] come first, in glob order, followed
/// by [`GLOBAL_SCHEMA_DIR`]. Candidates that are missing, are not
/// directories, or cannot be inspected are left out. Glob metacharacters in
/// `root` match literally.
///
/// # Errors
///
/// Returns [`CasesError::Pattern`] if a pattern cannot be compiled.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use openapi_cases::discover_schema_directories;
///
/// # fn run() -> openapi_cases::CasesResult<()> {
/// for dir in discover_schema_directories(Utf8Path::new("/deckhouse"))? {
///     println!("{}", dir.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn discover_schema_directories(root: &Utf8Path) -> CasesResult<Vec<PathBuf>> {
    let escaped_root = Pattern::escape(root.as_str());
    let mut candidates = Vec::new();
    for relative in MODULE_SCHEMA_PATTERNS {
        let pattern = format!("{escaped_root}/{relative}");
        let paths = glob::glob(&pattern).map_err(|source| CasesError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        for entry in paths {
            match entry {
                Ok(path) => candidates.push(path),
                Err(err) => debug!(%pattern, error = %err, "skipping unreadable glob entry"),
            }
        }
    }
    candidates.push(root.join(GLOBAL_SCHEMA_DIR).into_std_path_buf());

    Ok(candidates.into_iter().filter(|path| is_dir(path)).collect())
}

/// Returns `true` when `path` resolves to a directory. Stat failures count as
/// "not a directory".
fn is_dir(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => true,
        Ok(_) => {
            debug!(path = %path.display(), "skipping schema candidate that is not a directory");
            false
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "skipping schema candidate");
            false
        }
    }
}

//! Reading case files from disk.

use std::path::Path;

use crate::{CasesError, CasesResult, TestCases};

/// Name of the case file inside a module's schema directory.
pub const DEFAULT_CASES_FILE_NAME: &str = "openapi-case-tests.yaml";

/// Directory holding global hooks; its values live under `global`.
const GLOBAL_HOOKS_DIR: &str = "global-hooks";

/// Derives the values key of the module owning `schema_dir`.
///
/// The module is the parent of the schema directory. A leading numeric
/// ordering prefix is dropped and the kebab-case name is converted to lower
/// camel case, so `modules/040-node-manager/openapi` yields `nodeManager`.
/// The global hooks directory maps to `global`.
///
/// ```rust
/// use openapi_cases::module_name_for_dir;
/// use std::path::Path;
///
/// assert_eq!(module_name_for_dir(Path::new("/d/modules/040-node-manager/openapi")), "nodeManager");
/// assert_eq!(module_name_for_dir(Path::new("/d/global-hooks/openapi")), "global");
/// ```
#[must_use]
pub fn module_name_for_dir(schema_dir: &Path) -> String {
    let dir_name = schema_dir
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if dir_name == GLOBAL_HOOKS_DIR {
        return "global".to_owned();
    }
    values_key(strip_order_prefix(&dir_name))
}

/// Drops a `NNN-` ordering prefix, leaving names without one untouched.
fn strip_order_prefix(name: &str) -> &str {
    match name.split_once('-') {
        Some((prefix, rest))
            if !prefix.is_empty() && !rest.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            rest
        }
        _ => name,
    }
}

/// Converts `kebab-case` to `lowerCamelCase`.
fn values_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = !key.is_empty();
        } else if upper_next {
            key.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            key.push(ch);
        }
    }
    key
}

impl TestCases {
    /// Loads the cases stored in the YAML file at `path`.
    ///
    /// Keys other than `Positive` and `Negative` (and, inside them,
    /// `ConfigValues`, `Values` and `HelmValues`) are ignored. The module name
    /// is derived from the file's directory with [`module_name_for_dir`].
    ///
    /// # Errors
    ///
    /// Returns [`CasesError::Io`] if the file cannot be read and
    /// [`CasesError::Format`] if its contents do not describe test cases.
    pub fn from_file(path: &Path) -> CasesResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CasesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cases: Self =
            serde_yaml::from_str(&contents).map_err(|source| CasesError::Format {
                path: path.to_path_buf(),
                source,
            })?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let module_name = module_name_for_dir(&dir);
        cases.finish_load(dir, module_name);
        Ok(cases)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{module_name_for_dir, strip_order_prefix, values_key};
    use std::path::Path;

    #[rstest]
    #[case("/deckhouse/modules/040-node-manager/openapi", "nodeManager")]
    #[case("/deckhouse/modules/500-upmeter/openapi", "upmeter")]
    #[case("/deckhouse/ee/fe/modules/030-cloud-provider-openstack/openapi", "cloudProviderOpenstack")]
    #[case("/deckhouse/modules/prometheus/openapi", "prometheus")]
    #[case("/deckhouse/global-hooks/openapi", "global")]
    #[case("openapi", "")]
    fn derives_values_keys(#[case] dir: &str, #[case] expected: &str) {
        assert_eq!(module_name_for_dir(Path::new(dir)), expected);
    }

    #[rstest]
    #[case("040-node-manager", "node-manager")]
    #[case("node-manager", "node-manager")]
    #[case("040-", "040-")]
    #[case("v1-beta", "v1-beta")]
    fn strips_only_numeric_prefixes(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(strip_order_prefix(name), expected);
    }

    #[rstest]
    #[case("user-authn", "userAuthn")]
    #[case("-leading", "leading")]
    #[case("plain", "plain")]
    fn camel_cases_kebab_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(values_key(name), expected);
    }
}

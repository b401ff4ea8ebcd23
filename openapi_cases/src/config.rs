//! Harness configuration.
//!
//! Settings are layered with `figment`: built-in defaults first, then
//! `OPENAPI_CASES_*` environment variables.

use camino::Utf8PathBuf;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

use crate::{CasesError, CasesResult, DEFAULT_CASES_FILE_NAME};

/// Prefix of the environment variables read by [`HarnessConfig::load`].
const ENV_PREFIX: &str = "OPENAPI_CASES_";

/// Settings for a harness run over a source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Root of the source tree holding the module directories.
    pub root: Utf8PathBuf,
    /// File name of the case file inside each schema directory.
    pub cases_file_name: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("/deckhouse"),
            cases_file_name: DEFAULT_CASES_FILE_NAME.to_owned(),
        }
    }
}

impl HarnessConfig {
    /// Builds the configuration from defaults and the environment.
    ///
    /// `OPENAPI_CASES_ROOT` and `OPENAPI_CASES_CASES_FILE_NAME` override the
    /// matching fields.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CasesError::Config`] if a provided value cannot be
    /// extracted.
    pub fn load() -> CasesResult<Self> {
        Self::from_figment(Self::figment())
    }

    /// The layered providers behind [`HarnessConfig::load`], for callers that
    /// want to merge further sources on top.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extracts the configuration from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CasesError::Config`] if extraction fails.
    pub fn from_figment(figment: Figment) -> CasesResult<Self> {
        figment
            .extract()
            .map_err(|err| CasesError::Config(Box::new(err)))
    }
}

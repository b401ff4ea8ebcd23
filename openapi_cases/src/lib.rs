//! Conformance harness for module values schemas.
//!
//! Every module of the platform ships an `openapi` directory holding the
//! schemas for its configuration values and, optionally, a YAML file of test
//! cases. Positive cases must validate against the schema; negative cases must
//! be rejected. This crate models those cases ([`TestCases`]), finds the
//! schema directories of a source tree ([`discover_schema_directories`]), and
//! drives an injected [`ValuesValidator`] over each case
//! ([`validate_positive_case`], [`validate_negative_case`], [`run_cases`]).
//!
//! A case map carrying the [`FOCUS_FIELD_NAME`] key is *focused*: when any case
//! in a file is focused, only focused cases of that file run; [`run_tree`]
//! widens this to every file of the tree. The marker is stripped before the
//! validator sees the values.
//!
//! ```rust,no_run
//! use openapi_cases::{HarnessConfig, SchemaCategory, SchemaValidationError, Values, run_tree};
//!
//! # fn main() -> openapi_cases::CasesResult<()> {
//! let config = HarnessConfig::load()?;
//! let validator = |_category: SchemaCategory, _module: &str, _values: &Values| {
//!     Ok::<(), SchemaValidationError>(())
//! };
//! for report in run_tree(&validator, &config)? {
//!     assert!(report.cases.is_success(), "{}", report.module_name);
//! }
//! # Ok(())
//! # }
//! ```

mod case;
mod category;
mod config;
mod discovery;
mod error;
mod loader;
mod runner;
mod validate;
mod validator;

pub use case::{FOCUS_FIELD_NAME, TestCase, TestCases, Values, is_focused, strip_focus};
pub use category::{Polarity, SchemaCategory};
pub use config::HarnessConfig;
pub use discovery::{GLOBAL_SCHEMA_DIR, MODULE_SCHEMA_PATTERNS, discover_schema_directories};
pub use error::{CasesError, CasesResult};
pub use loader::{DEFAULT_CASES_FILE_NAME, module_name_for_dir};
pub use runner::{CaseFailure, CaseReport, ModuleReport, run_cases, run_cases_with, run_tree};
pub use validate::{CaseOutcome, validate_negative_case, validate_positive_case, values_to_string};
pub use validator::{SchemaValidationError, ValuesValidator};

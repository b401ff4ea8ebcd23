//! Running every case of a file, and every case file of a tree.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::{
    CaseOutcome, CasesError, CasesResult, HarnessConfig, Polarity, SchemaCategory, TestCases,
    ValuesValidator, discover_schema_directories, validate_negative_case, validate_positive_case,
};

/// A case that did not get the expected verdict.
#[derive(Debug)]
pub struct CaseFailure {
    /// Module the case belongs to.
    pub module: String,
    /// Schema category the case was checked against.
    pub category: SchemaCategory,
    /// Expected verdict of the case.
    pub polarity: Polarity,
    /// Position of the case within its sequence.
    pub index: usize,
    /// Why the check failed.
    pub error: CasesError,
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}[{}]: {}",
            self.module, self.polarity, self.category, self.index, self.error
        )
    }
}

/// Tally of the checks run for one case file.
#[derive(Debug, Default)]
pub struct CaseReport {
    /// Cases that got the expected verdict.
    pub passed: usize,
    /// Cases left out of a focused run.
    pub skipped: usize,
    /// Cases that got the wrong verdict.
    pub failures: Vec<CaseFailure>,
}

impl CaseReport {
    /// Returns `true` when no case failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of the case file of one schema directory.
#[derive(Debug)]
pub struct ModuleReport {
    /// Values key of the module.
    pub module_name: String,
    /// Schema directory holding the case file.
    pub dir: PathBuf,
    /// Checks run for the module.
    pub cases: CaseReport,
}

/// Checks every case in `cases` against `validator`.
///
/// Categories without cases are not checked. If the file contains a focused
/// case, only focused cases run and the rest are counted as skipped.
pub fn run_cases<V>(validator: &V, cases: &mut TestCases) -> CaseReport
where
    V: ValuesValidator + ?Sized,
{
    let run_focused = cases.has_focused();
    run_cases_with(validator, cases, run_focused)
}

/// Checks every case in `cases`, running only focused cases when
/// `run_focused` is set.
///
/// [`run_tree`] passes the focus state of the whole suite here, so a focused
/// case in one module also narrows the run of every other module.
pub fn run_cases_with<V>(validator: &V, cases: &mut TestCases, run_focused: bool) -> CaseReport
where
    V: ValuesValidator + ?Sized,
{
    let module_name = cases.module_name().to_owned();
    if run_focused {
        info!(module = %module_name, "running focused cases only");
    }

    let mut report = CaseReport::default();
    for category in SchemaCategory::ALL {
        if !cases.have_cases(category) {
            continue;
        }
        for polarity in [Polarity::Positive, Polarity::Negative] {
            let instances = cases.cases_mut(polarity, category);
            for (index, instance) in instances.iter_mut().enumerate() {
                let result = match polarity {
                    Polarity::Positive => validate_positive_case(
                        validator,
                        &module_name,
                        category,
                        instance,
                        run_focused,
                    ),
                    Polarity::Negative => validate_negative_case(
                        validator,
                        &module_name,
                        category,
                        instance,
                        run_focused,
                    ),
                };
                match result {
                    Ok(CaseOutcome::Passed) => report.passed += 1,
                    Ok(CaseOutcome::Skipped) => report.skipped += 1,
                    Err(error) => {
                        let failure = CaseFailure {
                            module: module_name.clone(),
                            category,
                            polarity,
                            index,
                            error,
                        };
                        warn!(%failure, "case failed");
                        report.failures.push(failure);
                    }
                }
            }
        }
    }
    report
}

/// Runs the case files of every schema directory below `config.root`.
///
/// Schema directories without a case file are skipped. Every file is loaded
/// before any case runs; if any of them holds a focused case, only focused
/// cases run across the whole tree.
///
/// # Errors
///
/// Returns an error if discovery fails or a case file cannot be loaded. Case
/// failures are reported in the returned [`ModuleReport`]s instead.
pub fn run_tree<V>(validator: &V, config: &HarnessConfig) -> CasesResult<Vec<ModuleReport>>
where
    V: ValuesValidator + ?Sized,
{
    let mut loaded = Vec::new();
    for dir in discover_schema_directories(&config.root)? {
        let file = dir.join(&config.cases_file_name);
        if !file.is_file() {
            debug!(dir = %dir.display(), "no case file");
            continue;
        }
        loaded.push((dir, TestCases::from_file(&file)?));
    }

    let any_focused = loaded.iter().any(|(_, cases)| cases.has_focused());
    if any_focused {
        info!("focused cases found, running focused cases only");
    }

    let reports = loaded
        .into_iter()
        .map(|(dir, mut cases)| {
            let report = run_cases_with(validator, &mut cases, any_focused);
            ModuleReport {
                module_name: cases.module_name().to_owned(),
                dir,
                cases: report,
            }
        })
        .collect();
    Ok(reports)
}

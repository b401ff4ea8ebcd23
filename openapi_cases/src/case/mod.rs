//! In-memory model of a module's schema test cases.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::{Polarity, SchemaCategory};

/// Key marking a case map as focused. Only its presence matters.
pub const FOCUS_FIELD_NAME: &str = "x-test-focus";

/// One case instance: a map of values as it would appear under the module key.
pub type Values = serde_json::Map<String, serde_json::Value>;

/// Returns `true` when `values` carries the focus marker.
#[must_use]
pub fn is_focused(values: &Values) -> bool {
    values.contains_key(FOCUS_FIELD_NAME)
}

/// Removes the focus marker from `values`. Stripping twice is a no-op.
pub fn strip_focus(values: &mut Values) {
    values.remove(FOCUS_FIELD_NAME);
}

/// Case instances of one polarity, grouped by schema category.
///
/// Category keys match case-insensitively (`values`, `VALUES`); when one
/// category is spelled twice the later entry wins. A `null` sequence is empty
/// and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCase {
    /// Instances checked against the config values schema.
    pub config_values: Vec<Values>,
    /// Instances checked against the values schema.
    pub values: Vec<Values>,
    /// Instances checked against the Helm values schema.
    pub helm_values: Vec<Values>,
}

impl TestCase {
    /// Returns `true` when any instance of any category is focused.
    #[must_use]
    pub fn has_focused(&self) -> bool {
        SchemaCategory::ALL
            .into_iter()
            .any(|category| self.cases(category).iter().any(is_focused))
    }

    /// Instances for `category`.
    #[must_use]
    pub fn cases(&self, category: SchemaCategory) -> &[Values] {
        match category {
            SchemaCategory::ConfigValues => &self.config_values,
            SchemaCategory::Values => &self.values,
            SchemaCategory::HelmValues => &self.helm_values,
        }
    }

    /// Mutable instances for `category`; the sequence itself keeps its length.
    pub fn cases_mut(&mut self, category: SchemaCategory) -> &mut [Values] {
        self.sequence_mut(category)
    }

    const fn sequence_mut(&mut self, category: SchemaCategory) -> &mut Vec<Values> {
        match category {
            SchemaCategory::ConfigValues => &mut self.config_values,
            SchemaCategory::Values => &mut self.values,
            SchemaCategory::HelmValues => &mut self.helm_values,
        }
    }
}

/// Positive and negative cases loaded from one case file.
///
/// Instances are built by [`TestCases::from_file`]. The focus state is
/// computed once at load time, so stripping markers while validating does not
/// change which cases a later pass selects. Role keys follow the same
/// matching rules as the category keys of [`TestCase`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCases {
    positive: TestCase,
    negative: TestCase,

    dir: PathBuf,
    module_name: String,
    has_focused: bool,
}

impl TestCases {
    /// Cases that must validate.
    #[must_use]
    pub const fn positive(&self) -> &TestCase {
        &self.positive
    }

    /// Cases that must be rejected.
    #[must_use]
    pub const fn negative(&self) -> &TestCase {
        &self.negative
    }

    /// Cases for `polarity`.
    #[must_use]
    pub const fn role(&self, polarity: Polarity) -> &TestCase {
        match polarity {
            Polarity::Positive => &self.positive,
            Polarity::Negative => &self.negative,
        }
    }

    /// Mutable instances of one role and category.
    pub fn cases_mut(&mut self, polarity: Polarity, category: SchemaCategory) -> &mut [Values] {
        self.role_mut(polarity).cases_mut(category)
    }

    const fn role_mut(&mut self, polarity: Polarity) -> &mut TestCase {
        match polarity {
            Polarity::Positive => &mut self.positive,
            Polarity::Negative => &mut self.negative,
        }
    }

    /// Directory the case file was read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Values key of the module the cases belong to.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Whether any case in the file was focused when it was loaded.
    #[must_use]
    pub const fn has_focused(&self) -> bool {
        self.has_focused
    }

    /// Returns `true` when either role has config values cases.
    #[must_use]
    pub fn have_config_values_cases(&self) -> bool {
        self.have_cases(SchemaCategory::ConfigValues)
    }

    /// Returns `true` when either role has values cases.
    #[must_use]
    pub fn have_values_cases(&self) -> bool {
        self.have_cases(SchemaCategory::Values)
    }

    /// Returns `true` when either role has Helm values cases.
    #[must_use]
    pub fn have_helm_values_cases(&self) -> bool {
        self.have_cases(SchemaCategory::HelmValues)
    }

    /// Returns `true` when either role has cases for `category`.
    #[must_use]
    pub fn have_cases(&self, category: SchemaCategory) -> bool {
        !self.positive.cases(category).is_empty() || !self.negative.cases(category).is_empty()
    }

    /// Records where the cases came from and derives the focus state.
    pub(crate) fn finish_load(&mut self, dir: PathBuf, module_name: String) {
        self.dir = dir;
        self.module_name = module_name;
        self.has_focused = self.positive.has_focused() || self.negative.has_focused();
    }
}

/// Finds the entry of `names` equal to `key`, ignoring case.
fn match_key<T: Copy>(key: &str, names: &[(T, &str)]) -> Option<T> {
    names
        .iter()
        .find(|(_, name)| key.eq_ignore_ascii_case(name))
        .map(|(item, _)| *item)
}

struct TestCaseVisitor;

impl<'de> Visitor<'de> for TestCaseVisitor {
    type Value = TestCase;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of ConfigValues, Values and HelmValues sequences")
    }

    fn visit_map<A>(self, mut map: A) -> Result<TestCase, A::Error>
    where
        A: MapAccess<'de>,
    {
        let names = SchemaCategory::ALL.map(|category| (category, category.as_str()));
        let mut case = TestCase::default();
        while let Some(key) = map.next_key::<String>()? {
            match match_key(&key, &names) {
                Some(category) => {
                    *case.sequence_mut(category) =
                        map.next_value::<Option<Vec<Values>>>()?.unwrap_or_default();
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(case)
    }
}

impl<'de> Deserialize<'de> for TestCase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TestCaseVisitor)
    }
}

struct TestCasesVisitor;

impl<'de> Visitor<'de> for TestCasesVisitor {
    type Value = TestCases;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with Positive and Negative cases")
    }

    fn visit_map<A>(self, mut map: A) -> Result<TestCases, A::Error>
    where
        A: MapAccess<'de>,
    {
        let names = [Polarity::Positive, Polarity::Negative].map(|role| (role, role.as_str()));
        let mut cases = TestCases::default();
        while let Some(key) = map.next_key::<String>()? {
            match match_key(&key, &names) {
                Some(polarity) => {
                    *cases.role_mut(polarity) =
                        map.next_value::<Option<TestCase>>()?.unwrap_or_default();
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(cases)
    }
}

impl<'de> Deserialize<'de> for TestCases {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TestCasesVisitor)
    }
}

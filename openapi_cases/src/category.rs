//! Schema categories and case polarities.

use std::fmt;

/// Values domain a case is validated against; each has its own schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaCategory {
    /// User-facing module configuration (`config-values.yaml`).
    ConfigValues,
    /// Full runtime values of the module (`values.yaml`).
    Values,
    /// Values handed to the module's Helm chart.
    HelmValues,
}

impl SchemaCategory {
    /// Every category, in the order the runner checks them.
    pub const ALL: [Self; 3] = [Self::ConfigValues, Self::Values, Self::HelmValues];

    /// Returns the name used for this category in case files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigValues => "ConfigValues",
            Self::Values => "Values",
            Self::HelmValues => "HelmValues",
        }
    }
}

impl fmt::Display for SchemaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a case is expected to pass or fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// The case must validate.
    Positive,
    /// The case must be rejected.
    Negative,
}

impl Polarity {
    /// Returns the name used for this role in case files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

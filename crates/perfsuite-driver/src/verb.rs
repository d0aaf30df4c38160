//! Aggregate verbs and their per-unit sub-target mapping
//!
//! Each verb requested of the suite maps to exactly one sub-target name
//! handed to the build tool inside every benchmark directory.

use crate::error::{DriverError, DriverResult};
use serde::{Deserialize, Serialize};

/// Aggregate action requested of the whole suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Build and execute every benchmark (default)
    Run,
    /// Build every benchmark without executing
    Build,
    /// Remove build products of every benchmark
    Clean,
}

impl Verb {
    /// Parse a verb from string
    ///
    /// `"all"` is accepted as an alias for `run`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> DriverResult<Self> {
        match s.to_lowercase().as_str() {
            "run" | "all" => Ok(Self::Run),
            "build" => Ok(Self::Build),
            "clean" => Ok(Self::Clean),
            other => Err(DriverError::UnknownVerb(other.to_string())),
        }
    }

    /// Get verb name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Build => "build",
            Self::Clean => "clean",
        }
    }

    /// Sub-target name passed to the build tool inside each unit directory
    ///
    /// `build` maps to the conventional `all` target; the other verbs map
    /// to targets of the same name.
    pub fn subtarget(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Build => "all",
            Self::Clean => "clean",
        }
    }

    /// Get all verbs
    pub fn all() -> [Verb; 3] {
        [Self::Run, Self::Build, Self::Clean]
    }
}

#[allow(clippy::derivable_impls)]
impl Default for Verb {
    fn default() -> Self {
        Self::Run
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("run", Verb::Run)]
    #[case("all", Verb::Run)]
    #[case("build", Verb::Build)]
    #[case("clean", Verb::Clean)]
    #[case("RUN", Verb::Run)]
    fn test_verb_from_str(#[case] input: &str, #[case] expected: Verb) {
        assert_eq!(Verb::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_verb_from_str_unknown() {
        let err = Verb::from_str("frobnicate").unwrap_err();
        assert!(matches!(err, DriverError::UnknownVerb(_)));
    }

    #[rstest]
    #[case(Verb::Run, "run")]
    #[case(Verb::Build, "all")]
    #[case(Verb::Clean, "clean")]
    fn test_verb_subtarget(#[case] verb: Verb, #[case] subtarget: &str) {
        assert_eq!(verb.subtarget(), subtarget);
    }

    #[test]
    fn test_verb_default_is_run() {
        assert_eq!(Verb::default(), Verb::Run);
    }

    #[test]
    fn test_verb_display() {
        assert_eq!(Verb::Build.to_string(), "build");
        assert_eq!(Verb::Run.to_string(), "run");
    }
}

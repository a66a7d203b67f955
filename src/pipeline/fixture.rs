//! Fixture harness
//!
//! A fixture is a `.decl` source file whose first line states the expected
//! outcome of every phase:
//!
//! ```text
//! // expect: lexical=PASS syntax=ERROR
//! ```
//!
//! A phase left out of the header is expected to be skipped.

use super::{analyze, Phase, PhaseOutcome};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const HEADER_PREFIX: &str = "// expect:";

pub const FIXTURE_EXTENSION: &str = "decl";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bad fixture header in {}: {message}", .path.display())]
    Header { path: PathBuf, message: String },
}

/// Expected outcome of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expectation {
    Pass,
    Error,
    #[default]
    Skip,
}

impl Expectation {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "PASS" => Some(Expectation::Pass),
            "ERROR" => Some(Expectation::Error),
            "SKIP" => Some(Expectation::Skip),
            _ => None,
        }
    }

    pub fn matches(self, outcome: &PhaseOutcome) -> bool {
        matches!(
            (self, outcome),
            (Expectation::Pass, PhaseOutcome::Pass)
                | (Expectation::Error, PhaseOutcome::Error(_))
                | (Expectation::Skip, PhaseOutcome::Skipped)
        )
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Expectation::Pass => "PASS",
            Expectation::Error => "ERROR",
            Expectation::Skip => "SKIP",
        };
        f.write_str(label)
    }
}

/// Expected outcome of every phase, indexed like [`Phase::ALL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expected {
    pub lexical: Expectation,
    pub syntax: Expectation,
    pub semantic: Expectation,
}

impl Expected {
    pub fn get(&self, phase: Phase) -> Expectation {
        match phase {
            Phase::Lexical => self.lexical,
            Phase::Syntax => self.syntax,
            Phase::Semantic => self.semantic,
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Expectation> {
        match key {
            "lexical" => Some(&mut self.lexical),
            "syntax" => Some(&mut self.syntax),
            "semantic" => Some(&mut self.semantic),
            _ => None,
        }
    }
}

/// A loaded fixture file
#[derive(Debug, Clone)]
pub struct Fixture {
    pub path: PathBuf,
    pub source: String,
    pub expected: Expected,
}

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref().to_path_buf();
        let source = fs::read_to_string(&path).map_err(|source| FixtureError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_source(path, source)
    }

    pub fn from_source(path: impl Into<PathBuf>, source: String) -> Result<Self, FixtureError> {
        let path = path.into();
        let expected = Self::parse_header(&source).map_err(|message| FixtureError::Header {
            path: path.clone(),
            message,
        })?;
        Ok(Self {
            path,
            source,
            expected,
        })
    }

    /// Parse the `// expect: key=VALUE ...` first line.
    pub fn parse_header(source: &str) -> Result<Expected, String> {
        let first = source.lines().next().unwrap_or("").trim();
        let body = first
            .strip_prefix(HEADER_PREFIX)
            .ok_or_else(|| format!("first line must start with `{}`", HEADER_PREFIX))?;

        let mut expected = Expected::default();
        for pair in body.split_whitespace() {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected `phase=OUTCOME`, found `{}`", pair))?;
            let slot = expected
                .slot(key)
                .ok_or_else(|| format!("unknown phase `{}`", key))?;
            *slot = Expectation::from_label(value)
                .ok_or_else(|| format!("unknown outcome `{}` for phase `{}`", value, key))?;
        }
        Ok(expected)
    }

    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn run(&self) -> FixtureReport {
        let analysis = analyze(&self.source);
        let actual = Phase::ALL.map(|phase| analysis.outcome(phase).clone());
        let report = FixtureReport {
            name: self.name(),
            expected: self.expected,
            actual,
        };
        if !report.passed() {
            log::warn!("fixture {} did not match its header", report.name);
        }
        report
    }
}

/// Expected against actual outcomes for one fixture
#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub name: String,
    pub expected: Expected,
    pub actual: [PhaseOutcome; 3],
}

impl FixtureReport {
    pub fn passed(&self) -> bool {
        self.mismatches().next().is_none()
    }

    /// Phases whose outcome differs from the expectation.
    pub fn mismatches(&self) -> impl Iterator<Item = (Phase, Expectation, &PhaseOutcome)> + '_ {
        Phase::ALL
            .iter()
            .zip(self.actual.iter())
            .map(|(phase, actual)| (*phase, self.expected.get(*phase), actual))
            .filter(|(_, expected, actual)| !expected.matches(actual))
    }
}

impl fmt::Display for FixtureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "ok   {}", self.name);
        }
        write!(f, "FAIL {}", self.name)?;
        for (phase, expected, actual) in self.mismatches() {
            write!(f, "\n     {} expected {}, got {}", phase, expected, actual)?;
        }
        Ok(())
    }
}

/// Load and run every `.decl` file in `dir`, in file-name order.
pub fn run_dir(dir: impl AsRef<Path>) -> Result<Vec<FixtureReport>, FixtureError> {
    let dir = dir.as_ref();
    let io_error = |source: io::Error| FixtureError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|ext| ext == FIXTURE_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| Fixture::load(path).map(|fixture| fixture.run()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_header() {
        let expected =
            Fixture::parse_header("// expect: syntax=ERROR lexical=pass\nint x = ;").unwrap();
        assert_eq!(
            expected,
            Expected {
                lexical: Expectation::Pass,
                syntax: Expectation::Error,
                semantic: Expectation::Skip,
            }
        );
    }

    #[test]
    fn test_bad_headers() {
        assert!(Fixture::parse_header("int x = 5;").is_err());
        assert!(Fixture::parse_header("// expect: lexical").is_err());
        assert!(Fixture::parse_header("// expect: codegen=PASS").is_err());
        assert!(Fixture::parse_header("// expect: lexical=MAYBE").is_err());
    }

    #[test]
    fn test_header_error_names_the_file() {
        let err = Fixture::from_source("broken.decl", "int x = 5;".to_string()).unwrap_err();
        assert!(matches!(err, FixtureError::Header { .. }));
        assert!(err.to_string().contains("broken.decl"));
    }

    #[test]
    fn test_run_matching_fixture() {
        let fixture = Fixture::from_source(
            "widening.decl",
            "// expect: lexical=PASS syntax=PASS semantic=PASS\nfloat f = 10;".to_string(),
        )
        .unwrap();
        let report = fixture.run();
        assert!(report.passed(), "{}", report);
        assert_eq!(report.name, "widening");
    }

    #[test]
    fn test_run_mismatching_fixture() {
        let fixture = Fixture::from_source(
            "narrowing.decl",
            "// expect: lexical=PASS syntax=PASS semantic=PASS\nbyte b = 300;".to_string(),
        )
        .unwrap();
        let report = fixture.run();
        assert!(!report.passed());
        let mismatched: Vec<Phase> = report.mismatches().map(|(phase, _, _)| phase).collect();
        assert_eq!(mismatched, vec![Phase::Semantic]);
        assert!(report.to_string().starts_with("FAIL narrowing"));
    }
}

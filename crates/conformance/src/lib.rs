// File: crates/conformance/src/lib.rs
//
// Conformance harness for the launcher's command-line grammar.
//
// Purpose:
// - Parse argv/RUBYOPT fixtures through rubylaunch-options deterministically
// - Emit traces of the resolved configuration
// - Compare traces against golden expectations

use indexmap::IndexMap;
use rubylaunch_options::{CommandLineError, CommandLineOptions, CommandLineParser};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("golden mismatch: {0}")]
    GoldenMismatch(String),

    #[error("fixture invalid: {0}")]
    FixtureInvalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub name: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// RUBYOPT value pre-parsed in restricted mode.
    #[serde(default)]
    pub rubyopt: Option<String>,

    #[serde(default)]
    pub expect_trace: Option<String>,

    #[serde(default)]
    pub expect_error: Option<String>,
}

impl Fixture {
    pub fn base_dir(&self, fixture_file: &Path) -> PathBuf {
        fixture_file
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn golden_path(&self, fixture_file: &Path) -> Result<PathBuf, ConformanceError> {
        let rel = self
            .expect_trace
            .as_ref()
            .or(self.expect_error.as_ref())
            .ok_or_else(|| ConformanceError::FixtureInvalid("missing golden path".into()))?;
        Ok(self.base_dir(fixture_file).join(rel))
    }

    pub fn validate(&self) -> Result<(), ConformanceError> {
        match (self.expect_trace.is_some(), self.expect_error.is_some()) {
            (true, false) | (false, true) => Ok(()),
            (false, false) => Err(ConformanceError::FixtureInvalid(format!(
                "fixture '{}' must specify exactly one of expect_trace or expect_error",
                self.name
            ))),
            (true, true) => Err(ConformanceError::FixtureInvalid(format!(
                "fixture '{}' must not specify both expect_trace and expect_error",
                self.name
            ))),
        }
    }

    /// Run the environment pre-parse, then the primary parse.
    pub fn resolve(&self, options: &mut CommandLineOptions) -> Result<(), CommandLineError> {
        if let Some(rubyopt) = &self.rubyopt {
            CommandLineParser::process_environment_value(rubyopt, options)?;
        }
        CommandLineParser::new(self.args.iter().cloned(), options).process_arguments()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceError {
    pub kind: String,
    pub message: String,
    pub usage: bool,
}

impl From<&CommandLineError> for TraceError {
    fn from(e: &CommandLineError) -> Self {
        Self {
            kind: e.kind().to_string(),
            message: e.to_string(),
            usage: e.is_usage_error(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSuccessTrace {
    pub options: IndexMap<String, serde_json::Value>,
    pub script_arguments: Vec<String>,
    pub unknown_arguments: Vec<String>,
}

impl ParseSuccessTrace {
    pub fn from_options(options: &CommandLineOptions) -> Result<Self, ConformanceError> {
        let mut values = IndexMap::new();
        for (name, value) in options.values() {
            values.insert(name.clone(), serde_json::to_value(value)?);
        }
        Ok(Self {
            options: values,
            script_arguments: options.script_arguments().to_vec(),
            unknown_arguments: options.unknown_arguments().to_vec(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseFailureTrace {
    pub error: TraceError,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParseTrace {
    Failure(ParseFailureTrace),
    Success(ParseSuccessTrace),
}

#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    pub bless: bool,
}

pub struct Runner {
    cfg: RunnerConfig,
}

impl Runner {
    pub fn new(cfg: RunnerConfig) -> Self {
        Self { cfg }
    }

    pub fn load_fixture(path: impl AsRef<Path>) -> Result<Fixture, ConformanceError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn run_fixture(&self, fixture: &Fixture) -> Result<ParseTrace, ConformanceError> {
        let mut options = CommandLineOptions::new();
        match fixture.resolve(&mut options) {
            Ok(()) => Ok(ParseTrace::Success(ParseSuccessTrace::from_options(
                &options,
            )?)),
            Err(e) => Ok(ParseTrace::Failure(ParseFailureTrace {
                error: TraceError::from(&e),
            })),
        }
    }

    pub fn assert_matches(
        &self,
        fixture_file: impl AsRef<Path>,
        fixture: &Fixture,
        produced: &ParseTrace,
    ) -> Result<(), ConformanceError> {
        let fixture_file = fixture_file.as_ref();
        let golden_path = fixture.golden_path(fixture_file)?;

        if self.cfg.bless {
            fs::create_dir_all(golden_path.parent().unwrap_or_else(|| Path::new(".")))?;
            let s = serde_json::to_string_pretty(produced)?;
            fs::write(golden_path, s.as_bytes())?;
            return Ok(());
        }

        let golden_bytes = fs::read(&golden_path)?;
        let golden: ParseTrace = serde_json::from_slice(&golden_bytes)?;

        let expects_error = fixture.expect_error.is_some();
        if expects_error != matches!(produced, ParseTrace::Failure(_)) || &golden != produced {
            let golden_s = serde_json::to_string_pretty(&golden)?;
            let produced_s = serde_json::to_string_pretty(produced)?;
            return Err(ConformanceError::GoldenMismatch(format!(
                "fixture '{}' produced trace does not match golden.\nfixture_file: {}\nargs: {:?}\nexpected: {}\n\n--- golden ---\n{}\n\n--- produced ---\n{}\n",
                fixture.name,
                fixture_file.display(),
                fixture.args,
                golden_path.display(),
                golden_s,
                produced_s,
            )));
        }

        Ok(())
    }

    pub fn run_and_check(&self, fixture_file: impl AsRef<Path>) -> Result<(), ConformanceError> {
        let fixture_file = fixture_file.as_ref();
        let fixture = Self::load_fixture(fixture_file)?;
        fixture.validate()?;
        let produced = self.run_fixture(&fixture)?;
        self.assert_matches(fixture_file, &fixture, &produced)
    }
}

// File: crates/options/src/argument.rs
//
// Raw argument tokens.
//
// Tokens read from RUBYOPT may omit their leading dash (`RUBYOPT=w`), so each
// token can lazily produce a dashed form. No validation happens here.

use once_cell::unsync::OnceCell;
use std::fmt;

/// One raw argument token.
#[derive(Debug, Clone)]
pub struct Argument {
    original: String,
    dashed: OnceCell<String>,
}

impl Argument {
    /// Wrap `value`. When `dashed` is false the dashed form is the value itself.
    pub fn new(value: impl Into<String>, dashed: bool) -> Self {
        let original = value.into();
        let cell = OnceCell::new();
        if !dashed {
            let _ = cell.set(original.clone());
        }
        Self {
            original,
            dashed: cell,
        }
    }

    pub fn original_value(&self) -> &str {
        &self.original
    }

    /// The token with a `-` prefix, computed at most once.
    pub fn dashed_value(&self) -> &str {
        self.dashed.get_or_init(|| {
            if self.original.starts_with('-') {
                self.original.clone()
            } else {
                format!("-{}", self.original)
            }
        })
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dashed_value())
    }
}

/// Shape raw strings into arguments, optionally forcing the dashed form.
pub fn tokenize<I, S>(values: I, dashed: bool) -> Vec<Argument>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(|v| Argument::new(v, dashed))
        .collect()
}

/// Split an environment value on runs of whitespace.
pub fn split_environment_value(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

// File: crates/options/src/description.rs
//
// Typed option descriptions.
//
// A description is a name, help text, default value and a closed kind tag that
// selects the coercion rules applied by `check_value`. Typed access goes through
// `OptionKey<T>`, which pairs a catalog name with the Rust type of its value.

use crate::enums::{DefaultExecutionAction, ExecutionAction, OptionEnum, ShowHelp, Verbosity};
use crate::error::{CommandLineError, Result};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// A stored option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i32),
    String(String),
    StringArray(Vec<String>),
    Enum(&'static str),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Boolean(b) => write!(f, "{b}"),
            OptionValue::Integer(n) => write!(f, "{n}"),
            OptionValue::String(s) => f.write_str(s),
            OptionValue::StringArray(items) => f.write_str(&items.join(",")),
            OptionValue::Enum(name) => f.write_str(name),
        }
    }
}

/// The closed set of option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Boolean,
    Integer,
    String,
    StringArray,
    /// An enum with the given constant names.
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone)]
pub struct OptionDescription {
    name: &'static str,
    description: &'static str,
    kind: OptionKind,
    default: OptionValue,
}

impl OptionDescription {
    pub fn boolean(name: &'static str, description: &'static str, default: bool) -> Self {
        Self::new(name, description, OptionKind::Boolean, OptionValue::Boolean(default))
    }

    pub fn integer(name: &'static str, description: &'static str, default: i32) -> Self {
        Self::new(name, description, OptionKind::Integer, OptionValue::Integer(default))
    }

    pub fn string(name: &'static str, description: &'static str, default: &str) -> Self {
        Self::new(
            name,
            description,
            OptionKind::String,
            OptionValue::String(default.to_string()),
        )
    }

    pub fn string_array(name: &'static str, description: &'static str) -> Self {
        Self::new(
            name,
            description,
            OptionKind::StringArray,
            OptionValue::StringArray(Vec::new()),
        )
    }

    pub fn enumeration<E: OptionEnum>(
        name: &'static str,
        description: &'static str,
        default: E,
    ) -> Self {
        Self::new(
            name,
            description,
            OptionKind::Enum(E::NAMES),
            OptionValue::Enum(default.name()),
        )
    }

    fn new(
        name: &'static str,
        description: &'static str,
        kind: OptionKind,
        default: OptionValue,
    ) -> Self {
        Self {
            name,
            description,
            kind,
            default,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn default_value(&self) -> &OptionValue {
        &self.default
    }

    /// Coerce a raw value to this option's kind.
    ///
    /// `None` is the null value: booleans become `false`, other kinds their default.
    pub fn check_value(&self, raw: Option<&OptionValue>) -> Result<OptionValue> {
        let raw = match raw {
            Some(raw) => raw,
            None => {
                return Ok(match self.kind {
                    OptionKind::Boolean => OptionValue::Boolean(false),
                    _ => self.default.clone(),
                })
            }
        };

        match (self.kind, raw) {
            (OptionKind::Boolean, OptionValue::Boolean(b)) => Ok(OptionValue::Boolean(*b)),
            (OptionKind::Boolean, OptionValue::String(s)) => match s.as_str() {
                "true" => Ok(OptionValue::Boolean(true)),
                "false" => Ok(OptionValue::Boolean(false)),
                _ => Err(self.type_error(raw)),
            },

            (OptionKind::Integer, OptionValue::Integer(n)) => Ok(OptionValue::Integer(*n)),
            (OptionKind::Integer, OptionValue::String(s)) => s
                .parse::<i32>()
                .map(OptionValue::Integer)
                .map_err(|_| self.type_error(raw)),

            (OptionKind::String, OptionValue::String(s)) => Ok(OptionValue::String(s.clone())),

            (OptionKind::StringArray, OptionValue::StringArray(items)) => {
                Ok(OptionValue::StringArray(items.clone()))
            }
            (OptionKind::StringArray, OptionValue::String(s)) => Ok(OptionValue::StringArray(
                s.split(',')
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),

            (OptionKind::Enum(names), OptionValue::Enum(text)) => {
                self.enum_constant(names, text, raw)
            }
            (OptionKind::Enum(names), OptionValue::String(text)) => {
                self.enum_constant(names, text, raw)
            }

            _ => Err(self.type_error(raw)),
        }
    }

    fn enum_constant(
        &self,
        names: &'static [&'static str],
        text: &str,
        raw: &OptionValue,
    ) -> Result<OptionValue> {
        names
            .iter()
            .find(|candidate| **candidate == text)
            .map(|candidate| OptionValue::Enum(*candidate))
            .ok_or_else(|| self.type_error(raw))
    }

    fn type_error(&self, raw: &OptionValue) -> CommandLineError {
        CommandLineError::option_type(self.name, raw.to_string())
    }
}

/// Rust types that can be stored as an option value.
pub trait OptionType: Sized + Default {
    fn into_value(self) -> OptionValue;

    fn from_value(value: &OptionValue) -> Option<Self>;
}

impl OptionType for bool {
    fn into_value(self) -> OptionValue {
        OptionValue::Boolean(self)
    }

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl OptionType for i32 {
    fn into_value(self) -> OptionValue {
        OptionValue::Integer(self)
    }

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl OptionType for String {
    fn into_value(self) -> OptionValue {
        OptionValue::String(self)
    }

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl OptionType for Vec<String> {
    fn into_value(self) -> OptionValue {
        OptionValue::StringArray(self)
    }

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::StringArray(items) => Some(items.clone()),
            _ => None,
        }
    }
}

macro_rules! enum_option_type {
    ($($ty:ty),+) => {
        $(
            impl OptionType for $ty {
                fn into_value(self) -> OptionValue {
                    OptionValue::Enum(self.name())
                }

                fn from_value(value: &OptionValue) -> Option<Self> {
                    match value {
                        OptionValue::Enum(name) => <$ty>::from_name(name),
                        _ => None,
                    }
                }
            }
        )+
    };
}

enum_option_type!(ExecutionAction, DefaultExecutionAction, ShowHelp, Verbosity);

/// A catalog option name tagged with the Rust type of its value.
pub struct OptionKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> OptionKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for OptionKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OptionKey<T> {}

impl<T> fmt::Debug for OptionKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OptionKey").field(&self.name).finish()
    }
}

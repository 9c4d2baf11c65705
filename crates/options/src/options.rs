// File: crates/options/src/options.rs
//
// The resolved configuration record produced by a parse session.

use crate::catalog::OptionsCatalog;
use crate::description::{OptionKey, OptionType, OptionValue};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Mutable result of parsing: explicitly set option values, the script's own
/// arguments, and every argument the parser did not recognize.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandLineOptions {
    options: IndexMap<String, OptionValue>,
    script_arguments: Vec<String>,
    unknown_arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_level")]
    log_level: Option<log::LevelFilter>,
}

fn serialize_level<S: Serializer>(
    level: &Option<log::LevelFilter>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match level {
        Some(level) => serializer.serialize_str(level.as_str()),
        None => serializer.serialize_none(),
    }
}

impl CommandLineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed read. Unset options fall back to the catalog default.
    pub fn get_option<T: OptionType>(&self, key: OptionKey<T>) -> T {
        self.options
            .get(key.name())
            .and_then(T::from_value)
            .or_else(|| {
                OptionsCatalog::global()
                    .lookup(key.name())
                    .and_then(|d| T::from_value(d.default_value()))
            })
            .unwrap_or_default()
    }

    pub fn set_option<T: OptionType>(&mut self, key: OptionKey<T>, value: T) {
        self.options.insert(key.name().to_string(), value.into_value());
    }

    /// Store an already-checked value under a fully-qualified name.
    pub fn put_value(&mut self, name: impl Into<String>, value: OptionValue) {
        self.options.insert(name.into(), value);
    }

    /// Append one entry to a string-array option.
    pub fn append_option_value(&mut self, key: OptionKey<Vec<String>>, value: impl Into<String>) {
        let mut items = self.get_option(key);
        items.push(value.into());
        self.set_option(key, items);
    }

    /// Concatenate text onto a string option (used for repeated `-e`).
    pub fn append_option_text(&mut self, key: OptionKey<String>, text: &str) {
        let mut current = match self.options.get(key.name()) {
            Some(OptionValue::String(s)) => s.clone(),
            _ => String::new(),
        };
        current.push_str(text);
        self.set_option(key, current);
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Explicitly set values, in the order they were first set.
    pub fn values(&self) -> &IndexMap<String, OptionValue> {
        &self.options
    }

    pub fn script_arguments(&self) -> &[String] {
        &self.script_arguments
    }

    pub fn set_script_arguments(&mut self, arguments: Vec<String>) {
        self.script_arguments = arguments;
    }

    pub fn unknown_arguments(&self) -> &[String] {
        &self.unknown_arguments
    }

    pub fn add_unknown_argument(&mut self, argument: impl Into<String>) {
        self.unknown_arguments.push(argument.into());
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level
    }

    pub fn set_log_level(&mut self, level: log::LevelFilter) {
        self.log_level = Some(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DEFAULT_CACHE, EXECUTION_ACTION, LOAD_PATHS, RUBYGEMS, TO_EXECUTE};
    use crate::enums::ExecutionAction;
    use pretty_assertions::assert_eq;

    #[test]
    fn unset_options_read_catalog_defaults() {
        let options = CommandLineOptions::new();
        assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::Unset);
        assert!(options.get_option(RUBYGEMS));
        assert_eq!(options.get_option(DEFAULT_CACHE), 8);
        assert!(options.values().is_empty());
    }

    #[test]
    fn appends_keep_order() {
        let mut options = CommandLineOptions::new();
        options.append_option_value(LOAD_PATHS, "foo");
        options.append_option_value(LOAD_PATHS, "bar");
        assert_eq!(options.get_option(LOAD_PATHS), vec!["foo", "bar"]);
    }

    #[test]
    fn text_appends_concatenate() {
        let mut options = CommandLineOptions::new();
        options.append_option_text(TO_EXECUTE, "a\n");
        options.append_option_text(TO_EXECUTE, "b\n");
        assert_eq!(options.get_option(TO_EXECUTE), "a\nb\n");
    }

    #[test]
    fn serializes_set_values_in_order() {
        let mut options = CommandLineOptions::new();
        options.set_option(EXECUTION_ACTION, ExecutionAction::Stdin);
        options.set_option(RUBYGEMS, false);
        options.set_script_arguments(vec!["x".into()]);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "options": {
                    "ruby.execution_action": "STDIN",
                    "ruby.rubygems": false
                },
                "script_arguments": ["x"],
                "unknown_arguments": []
            })
        );
    }
}

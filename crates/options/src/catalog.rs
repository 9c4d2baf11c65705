// File: crates/options/src/catalog.rs
//
// Process-wide option catalog.
//
// The catalog is built once from a fixed table and is read-only afterwards.
// Every name is namespaced under `LANGUAGE_ID` ("ruby.").

use crate::description::{OptionDescription, OptionKey};
use crate::enums::{DefaultExecutionAction, ExecutionAction, ShowHelp, Verbosity};
use crate::LANGUAGE_ID;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

pub const HOME: OptionKey<String> = OptionKey::new("ruby.home");
pub const LOAD_PATHS: OptionKey<Vec<String>> = OptionKey::new("ruby.load_paths");
pub const REQUIRED_LIBRARIES: OptionKey<Vec<String>> = OptionKey::new("ruby.required_libraries");
pub const WORKING_DIRECTORY: OptionKey<String> = OptionKey::new("ruby.working_directory");
pub const DEBUG: OptionKey<bool> = OptionKey::new("ruby.debug");
pub const VERBOSITY: OptionKey<Verbosity> = OptionKey::new("ruby.verbosity");
pub const FROZEN_STRING_LITERALS: OptionKey<bool> = OptionKey::new("ruby.frozen_string_literals");
pub const RUBYGEMS: OptionKey<bool> = OptionKey::new("ruby.rubygems");
pub const DID_YOU_MEAN: OptionKey<bool> = OptionKey::new("ruby.did_you_mean");
pub const READ_RUBYOPT: OptionKey<bool> = OptionKey::new("ruby.read_rubyopt");
pub const INTERNAL_ENCODING: OptionKey<String> = OptionKey::new("ruby.internal_encoding");
pub const EXTERNAL_ENCODING: OptionKey<String> = OptionKey::new("ruby.external_encoding");
pub const SYNTAX_CHECK: OptionKey<bool> = OptionKey::new("ruby.syntax_check");
pub const EXECUTION_ACTION: OptionKey<ExecutionAction> = OptionKey::new("ruby.execution_action");
pub const TO_EXECUTE: OptionKey<String> = OptionKey::new("ruby.to_execute");
pub const DEFAULT_EXECUTION_ACTION: OptionKey<DefaultExecutionAction> =
    OptionKey::new("ruby.default_execution_action");
pub const SHOW_VERSION: OptionKey<bool> = OptionKey::new("ruby.show_version");
pub const SHOW_COPYRIGHT: OptionKey<bool> = OptionKey::new("ruby.show_copyright");
pub const SHOW_HELP: OptionKey<ShowHelp> = OptionKey::new("ruby.show_help");
pub const ARGV_GLOBALS: OptionKey<bool> = OptionKey::new("ruby.argv_globals");
pub const ARGV_GLOBAL_VALUES: OptionKey<Vec<String>> = OptionKey::new("ruby.argv_global_values");
pub const ARGV_GLOBAL_FLAGS: OptionKey<Vec<String>> = OptionKey::new("ruby.argv_global_flags");
pub const IGNORE_LINES_BEFORE_RUBY_SHEBANG: OptionKey<bool> =
    OptionKey::new("ruby.ignore_lines_before_ruby_shebang");
pub const CORE_LOAD_PATH: OptionKey<String> = OptionKey::new("ruby.core.load_path");
pub const EXCEPTIONS_PRINT_UNCAUGHT: OptionKey<bool> =
    OptionKey::new("ruby.exceptions.print_uncaught");
pub const DEFAULT_CACHE: OptionKey<i32> = OptionKey::new("ruby.default_cache");
pub const ARRAY_UNINITIALIZED_SIZE: OptionKey<i32> =
    OptionKey::new("ruby.array.uninitialized_size");
pub const COVERAGE_GLOBAL: OptionKey<bool> = OptionKey::new("ruby.coverage.global");

fn descriptions() -> Vec<OptionDescription> {
    vec![
        OptionDescription::string(HOME.name(), "The location of the Ruby home directory", ""),
        OptionDescription::string_array(LOAD_PATHS.name(), "Load paths"),
        OptionDescription::string_array(REQUIRED_LIBRARIES.name(), "Required libraries"),
        OptionDescription::string(
            WORKING_DIRECTORY.name(),
            "Interpreter will switch to this directory",
            "",
        ),
        OptionDescription::boolean(DEBUG.name(), "Sets $DEBUG to this value", false),
        OptionDescription::enumeration(VERBOSITY.name(), "Sets $VERBOSE to this value", Verbosity::False),
        OptionDescription::boolean(
            FROZEN_STRING_LITERALS.name(),
            "Use frozen string literals",
            false,
        ),
        OptionDescription::boolean(RUBYGEMS.name(), "Use RubyGems", true),
        OptionDescription::boolean(DID_YOU_MEAN.name(), "Use did_you_mean", true),
        OptionDescription::boolean(READ_RUBYOPT.name(), "Read RUBYOPT", true),
        OptionDescription::string(INTERNAL_ENCODING.name(), "Internal encoding", ""),
        OptionDescription::string(EXTERNAL_ENCODING.name(), "External encoding", ""),
        OptionDescription::boolean(
            SYNTAX_CHECK.name(),
            "Do not execute just check syntax",
            false,
        ),
        OptionDescription::enumeration(
            EXECUTION_ACTION.name(),
            "What should be done after options are parsed",
            ExecutionAction::Unset,
        ),
        OptionDescription::string(TO_EXECUTE.name(), "A file, path or inline code to execute", ""),
        OptionDescription::enumeration(
            DEFAULT_EXECUTION_ACTION.name(),
            "What should be done when no action is set",
            DefaultExecutionAction::Irb,
        ),
        OptionDescription::boolean(SHOW_VERSION.name(), "Print version", false),
        OptionDescription::boolean(SHOW_COPYRIGHT.name(), "Print copyright", false),
        OptionDescription::enumeration(SHOW_HELP.name(), "Show help", ShowHelp::None),
        OptionDescription::boolean(
            ARGV_GLOBALS.name(),
            "Parse options in script argv into global variables",
            false,
        ),
        OptionDescription::string_array(
            ARGV_GLOBAL_VALUES.name(),
            "Parsed options from script argv with a value",
        ),
        OptionDescription::string_array(
            ARGV_GLOBAL_FLAGS.name(),
            "Parsed options from script argv acting as flags with no value",
        ),
        OptionDescription::boolean(
            IGNORE_LINES_BEFORE_RUBY_SHEBANG.name(),
            "Strip off text before #!ruby line",
            false,
        ),
        OptionDescription::string(
            CORE_LOAD_PATH.name(),
            "Location to load the Ruby core library from",
            "resource:/truffleruby",
        ),
        OptionDescription::boolean(
            EXCEPTIONS_PRINT_UNCAUGHT.name(),
            "Print uncaught internal exceptions at the point of translating them to Ruby",
            false,
        ),
        OptionDescription::integer(DEFAULT_CACHE.name(), "Default size for caches", 8),
        OptionDescription::integer(
            ARRAY_UNINITIALIZED_SIZE.name(),
            "How large an Array to allocate when we have no other information to go on",
            32,
        ),
        OptionDescription::boolean(COVERAGE_GLOBAL.name(), "Run coverage for all code", false),
    ]
}

/// Registry of every option description, keyed by fully-qualified name.
#[derive(Debug)]
pub struct OptionsCatalog {
    by_name: IndexMap<&'static str, OptionDescription>,
}

static CATALOG: Lazy<OptionsCatalog> = Lazy::new(|| OptionsCatalog::from_descriptions(descriptions()));

impl OptionsCatalog {
    /// The process-wide catalog.
    pub fn global() -> &'static OptionsCatalog {
        &CATALOG
    }

    fn from_descriptions(descriptions: Vec<OptionDescription>) -> Self {
        let by_name = descriptions
            .into_iter()
            .map(|d| (d.name(), d))
            .collect();
        Self { by_name }
    }

    pub fn lookup(&self, name: &str) -> Option<&OptionDescription> {
        self.by_name.get(name)
    }

    pub fn all_descriptions(&self) -> impl Iterator<Item = &OptionDescription> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Text printed for `-X options`: one `-Xname=default` line per entry.
    pub fn listing(&self) -> String {
        let mut out = String::from("Ruby options and their default values:\n");
        for option in self.all_descriptions() {
            let name_value = format!(
                "-X{}={}",
                extended_name(option.name()),
                option.default_value()
            );
            out.push_str(&format!(
                "  {name_value:<50}# {}\n",
                option.description()
            ));
        }
        out
    }
}

/// Strip the `ruby.` namespace for display as an extended option.
pub fn extended_name(full_name: &str) -> &str {
    full_name
        .strip_prefix(LANGUAGE_ID)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(full_name)
}

/// Qualify an extended option name with the `ruby.` namespace.
pub fn qualified_name(extended: &str) -> String {
    format!("{LANGUAGE_ID}.{extended}")
}

// File: crates/options/src/parser/mod.rs
//
// Command-line parser for the launcher's switch grammar.
//
// One parser instance consumes one token list and mutates the borrowed
// `CommandLineOptions`. Parsing stops at the first token that is not a switch,
// at `--`, at a bare `-`, or after `-S`. What follows is the script's own argv.

mod cursor;

pub use cursor::Cursor;

use crate::argument::{split_environment_value, tokenize, Argument};
use crate::catalog::{
    self, OptionsCatalog, ARGV_GLOBALS, ARGV_GLOBAL_FLAGS, ARGV_GLOBAL_VALUES, DEBUG,
    DEFAULT_EXECUTION_ACTION, EXECUTION_ACTION, EXTERNAL_ENCODING, IGNORE_LINES_BEFORE_RUBY_SHEBANG,
    INTERNAL_ENCODING, LOAD_PATHS, REQUIRED_LIBRARIES, SHOW_COPYRIGHT, SHOW_HELP, SHOW_VERSION,
    SYNTAX_CHECK, TO_EXECUTE, VERBOSITY, WORKING_DIRECTORY,
};
use crate::description::OptionValue;
use crate::enums::{DefaultExecutionAction, ExecutionAction, ShowHelp, Verbosity};
use crate::error::{CommandLineError, Result};
use crate::features::FeatureTable;
use crate::options::CommandLineOptions;
use log::{debug, warn};
use std::path::{Path, MAIN_SEPARATOR};

/// How a parser instance treats its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Split the tokens after the switches into script arguments.
    pub process_argv: bool,
    /// Prefix tokens lacking a leading `-` (RUBYOPT allows `w` for `-w`).
    pub dashed: bool,
    /// Reject switches that are unsafe to take from the environment.
    pub restricted: bool,
    /// Honor `-h`, `--help` and `--version`.
    pub allow_help_and_version: bool,
}

impl ParserConfig {
    /// The primary process argument vector.
    pub fn primary() -> Self {
        Self {
            process_argv: true,
            dashed: false,
            restricted: false,
            allow_help_and_version: true,
        }
    }

    /// Tokens split out of the RUBYOPT environment variable.
    pub fn environment() -> Self {
        Self {
            process_argv: false,
            dashed: true,
            restricted: true,
            allow_help_and_version: true,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::primary()
    }
}

/// Whether the character scan of the current token goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// The switch consumed nothing; look at the next character (`-dv`).
    Continue,
    /// The switch consumed the token (or the next one); stop scanning it.
    Stop,
}

pub struct CommandLineParser<'a> {
    cursor: Cursor,
    config: ParserConfig,
    options: &'a mut CommandLineOptions,
    end_of_interpreter_arguments: bool,
    catalog: &'static OptionsCatalog,
    features: &'static FeatureTable,
}

impl<'a> CommandLineParser<'a> {
    /// Parser over the primary argument vector.
    pub fn new<I, S>(arguments: I, options: &'a mut CommandLineOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(arguments, ParserConfig::primary(), options)
    }

    pub fn with_config<I, S>(
        arguments: I,
        config: ParserConfig,
        options: &'a mut CommandLineOptions,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cursor: Cursor::new(tokenize(arguments, config.dashed)),
            config,
            options,
            end_of_interpreter_arguments: false,
            catalog: OptionsCatalog::global(),
            features: FeatureTable::global(),
        }
    }

    /// Pre-parse the named environment variable in restricted mode.
    ///
    /// An unset or empty variable is not an error.
    pub fn process_environment_variable(
        name: &str,
        options: &mut CommandLineOptions,
    ) -> Result<()> {
        match std::env::var(name) {
            Ok(value) => Self::process_environment_value(&value, options),
            Err(_) => Ok(()),
        }
    }

    /// Parse an environment value already read by the caller.
    pub fn process_environment_value(value: &str, options: &mut CommandLineOptions) -> Result<()> {
        let tokens = split_environment_value(value);
        if tokens.is_empty() {
            return Ok(());
        }
        debug!("parsing {} environment token(s)", tokens.len());
        CommandLineParser::with_config(tokens, ParserConfig::environment(), options)
            .process_arguments()
    }

    pub fn process_arguments(mut self) -> Result<()> {
        while let Some(argument) = self.cursor.current() {
            if !self.is_interpreter_argument(argument) {
                break;
            }
            self.process_argument()?;
            self.cursor.advance_token();
        }

        if self.options.get_option(EXECUTION_ACTION) == ExecutionAction::Unset {
            if let Some(file) = self.cursor.current().map(|a| a.original_value().to_string()) {
                self.options.set_option(EXECUTION_ACTION, ExecutionAction::File);
                self.options.set_option(TO_EXECUTE, file);
                self.cursor.advance_token();
            }
        }

        if self.config.process_argv {
            self.process_argv();
        }

        Ok(())
    }

    fn is_interpreter_argument(&self, argument: &Argument) -> bool {
        !self.end_of_interpreter_arguments
            && matches!(argument.dashed_value().chars().next(), Some('-' | '+'))
    }

    /// Split what is left into script arguments, lifting `-key[=value]` tokens
    /// into the argv-globals buckets when `-s` was given.
    fn process_argv(&mut self) {
        let argv_globals = self.options.get_option(ARGV_GLOBALS);
        let mut script_arguments = Vec::new();

        while let Some(argument) = self.cursor.current() {
            let argument = argument.original_value().to_string();
            self.cursor.advance_token();

            if !argv_globals || !argument.starts_with('-') {
                script_arguments.push(argument);
                continue;
            }
            let switch = &argument[1..];

            let (key, value) = match switch.find('=') {
                Some(split) if split > 0 => (&switch[..split], Some(&switch[split + 1..])),
                _ => (switch, None),
            };
            // Valueless switches go to their own bucket so `-x` stays
            // distinguishable from `-x=true`.
            let key = key.replace('-', "_");
            match value {
                Some(value) => {
                    self.options.append_option_value(ARGV_GLOBAL_VALUES, key);
                    self.options.append_option_value(ARGV_GLOBAL_VALUES, value);
                }
                None => self.options.append_option_value(ARGV_GLOBAL_FLAGS, key),
            }
        }

        self.options.set_script_arguments(script_arguments);
    }

    fn process_argument(&mut self) -> Result<()> {
        let argument = match self.cursor.current() {
            Some(a) => a.dashed_value().to_string(),
            None => return Ok(()),
        };
        debug!("processing switch {argument}");

        if argument.chars().count() == 1 {
            // sole "-": read the script from stdin, the rest is ARGV
            self.end_of_interpreter_arguments = true;
            if self.options.get_option(EXECUTION_ACTION) == ExecutionAction::Unset {
                self.options.set_option(EXECUTION_ACTION, ExecutionAction::Stdin);
            }
            return Ok(());
        }

        self.cursor.begin_scan();
        while let Some(c) = self.cursor.peek_current_char() {
            match self.process_switch(c, &argument)? {
                Scan::Continue => self.cursor.advance_char(),
                Scan::Stop => break,
            }
        }
        Ok(())
    }

    fn process_switch(&mut self, c: char, argument: &str) -> Result<Scan> {
        match c {
            '0' => {
                self.disallowed_in_restricted_mode(argument)?;
                if let Some(separator) = self.cursor.take_remainder() {
                    if separator != "0"
                        && separator != "777"
                        && i32::from_str_radix(&separator, 8).is_err()
                    {
                        return Err(CommandLineError::invalid_argument(
                            " -0 must be followed by either 0, 777, or a valid octal value",
                        ));
                    }
                }
                Err(not_implemented("-0"))
            }
            'a' => {
                self.disallowed_in_restricted_mode(argument)?;
                Err(not_implemented("-a"))
            }
            'c' => {
                self.disallowed_in_restricted_mode(argument)?;
                self.options.set_option(SYNTAX_CHECK, true);
                Ok(Scan::Continue)
            }
            'C' => {
                self.disallowed_in_restricted_mode(argument)?;
                let dir = self.grab_value(CommandLineError::invalid_argument(
                    " -C must be followed by a directory expression",
                ))?;
                self.options.set_option(WORKING_DIRECTORY, dir);
                Ok(Scan::Stop)
            }
            'd' => {
                self.options.set_option(DEBUG, true);
                self.options.set_option(VERBOSITY, Verbosity::True);
                Ok(Scan::Continue)
            }
            'e' => {
                self.disallowed_in_restricted_mode(argument)?;
                let code = self.grab_value(CommandLineError::invalid_argument(
                    " -e must be followed by an expression to report",
                ))?;
                match self.options.get_option(EXECUTION_ACTION) {
                    ExecutionAction::Unset | ExecutionAction::Inline => {
                        self.options.set_option(EXECUTION_ACTION, ExecutionAction::Inline);
                        self.options.append_option_text(TO_EXECUTE, &format!("{code}\n"));
                    }
                    // another action already won; -e is ignored
                    _ => {}
                }
                Ok(Scan::Stop)
            }
            'E' => {
                let value =
                    self.grab_value(CommandLineError::invalid_argument("unknown encoding name"))?;
                self.process_encoding_option(&value)?;
                Ok(Scan::Stop)
            }
            'F' => {
                self.disallowed_in_restricted_mode(argument)?;
                Err(not_implemented("-F"))
            }
            'h' => {
                if self.config.allow_help_and_version {
                    self.disallowed_in_restricted_mode(argument)?;
                    self.options.set_option(SHOW_HELP, ShowHelp::Short);
                    self.options.set_option(EXECUTION_ACTION, ExecutionAction::None);
                }
                Ok(Scan::Continue)
            }
            'i' => {
                self.disallowed_in_restricted_mode(argument)?;
                Err(not_implemented("-i"))
            }
            'I' => {
                let paths = self.grab_value(CommandLineError::invalid_argument(
                    "-I must be followed by a directory name to add to lib path",
                ))?;
                for path in split_list(&paths, path_list_separator()) {
                    self.options
                        .append_option_value(LOAD_PATHS, expand_home(path));
                }
                Ok(Scan::Stop)
            }
            'y' => {
                self.disallowed_in_restricted_mode(argument)?;
                warn!("the -y switch is silently ignored as it is an internal development tool");
                Ok(Scan::Stop)
            }
            'J' => {
                let vm_option = self.cursor.take_remainder();
                warn!("warning: {argument} argument ignored (launched in same VM?)");
                if matches!(vm_option.as_deref(), Some("-cp" | "-classpath")) {
                    while self.cursor.take_remainder().is_some() {}
                    self.grab_value(CommandLineError::invalid_argument(
                        " -J-cp must be followed by a path expression",
                    ))?;
                }
                Ok(Scan::Stop)
            }
            'K' => Err(not_implemented("-K")),
            'l' => {
                self.disallowed_in_restricted_mode(argument)?;
                Err(not_implemented("-l"))
            }
            'n' => {
                self.disallowed_in_restricted_mode(argument)?;
                Err(not_implemented("-n"))
            }
            'p' => {
                self.disallowed_in_restricted_mode(argument)?;
                Err(not_implemented("-p"))
            }
            'r' => {
                let library = self.grab_value(CommandLineError::invalid_argument(
                    "-r must be followed by a package to require",
                ))?;
                self.options.append_option_value(REQUIRED_LIBRARIES, library);
                Ok(Scan::Stop)
            }
            's' => {
                self.disallowed_in_restricted_mode(argument)?;
                self.options.set_option(ARGV_GLOBALS, true);
                Ok(Scan::Continue)
            }
            'G' => Err(not_implemented("-G")),
            'S' => {
                self.disallowed_in_restricted_mode(argument)?;
                let script = self.grab_value(CommandLineError::Usage(
                    "provide a bin script to execute".into(),
                ))?;
                if self.options.get_option(EXECUTION_ACTION) == ExecutionAction::Unset {
                    self.options.set_option(EXECUTION_ACTION, ExecutionAction::Path);
                    self.options.set_option(TO_EXECUTE, script);
                }
                self.end_of_interpreter_arguments = true;
                Ok(Scan::Stop)
            }
            'T' => {
                self.disallowed_in_restricted_mode(argument)?;
                Err(not_implemented("-T"))
            }
            'U' => {
                self.options.set_option(INTERNAL_ENCODING, "UTF-8".to_string());
                Ok(Scan::Continue)
            }
            'v' => {
                self.options.set_option(VERBOSITY, Verbosity::True);
                self.options.set_option(SHOW_VERSION, true);
                self.options
                    .set_option(DEFAULT_EXECUTION_ACTION, DefaultExecutionAction::None);
                Ok(Scan::Continue)
            }
            'w' => {
                self.options.set_option(VERBOSITY, Verbosity::True);
                Ok(Scan::Continue)
            }
            'W' => {
                let verbosity = match self.cursor.take_remainder().as_deref() {
                    None | Some("2") => Verbosity::True,
                    Some("0") => Verbosity::Nil,
                    Some("1") => Verbosity::False,
                    Some(_) => {
                        return Err(CommandLineError::invalid_argument(
                            " -W must be followed by either 0, 1, 2 or nothing",
                        ))
                    }
                };
                self.options.set_option(VERBOSITY, verbosity);
                Ok(Scan::Stop)
            }
            'x' => {
                self.disallowed_in_restricted_mode(argument)?;
                self.options.set_option(IGNORE_LINES_BEFORE_RUBY_SHEBANG, true);
                if self.cursor.take_remainder().is_some() {
                    return Err(not_implemented("-x with directory"));
                }
                Ok(Scan::Stop)
            }
            'X' => {
                self.disallowed_in_restricted_mode(argument)?;
                let extended = self.grab_value(CommandLineError::Usage(
                    "-X must be followed by an option".into(),
                ))?;
                self.process_extended_option(&extended)?;
                Ok(Scan::Stop)
            }
            '-' => self.process_long_option(argument),
            _ => {
                self.options.add_unknown_argument(argument);
                Ok(Scan::Stop)
            }
        }
    }

    fn process_long_option(&mut self, argument: &str) -> Result<Scan> {
        let help_and_version = self.config.allow_help_and_version;

        if argument == "--copyright" {
            self.disallowed_in_restricted_mode(argument)?;
            self.options.set_option(SHOW_COPYRIGHT, true);
            self.options.set_option(EXECUTION_ACTION, ExecutionAction::None);
        } else if argument == "--debug" {
            return Err(not_implemented("--debug"));
        } else if argument == "--yydebug" {
            self.disallowed_in_restricted_mode(argument)?;
            warn!("the --yydebug switch is silently ignored as it is an internal development tool");
        } else if help_and_version && argument == "--help" {
            self.disallowed_in_restricted_mode(argument)?;
            self.options.set_option(SHOW_HELP, ShowHelp::Long);
            self.options.set_option(EXECUTION_ACTION, ExecutionAction::None);
        } else if help_and_version && argument == "--version" {
            self.disallowed_in_restricted_mode(argument)?;
            self.options.set_option(SHOW_VERSION, true);
            self.options.set_option(EXECUTION_ACTION, ExecutionAction::None);
        } else if argument.starts_with("--profile") {
            return Err(not_implemented("--profile"));
        } else if argument == "--debug-frozen-string-literal" {
            return Err(not_implemented("--debug-frozen-string-literal"));
        } else if argument.starts_with("--disable") {
            self.disallowed_in_restricted_mode(argument)?;
            self.toggle_features(argument, "disable", false)?;
        } else if argument.starts_with("--enable") {
            self.disallowed_in_restricted_mode(argument)?;
            self.toggle_features(argument, "enable", true)?;
        } else if argument == "--gemfile" {
            return Err(not_implemented("--gemfile"));
        } else if argument == "--verbose" {
            self.options.set_option(VERBOSITY, Verbosity::True);
        } else if argument.starts_with("--dump=") {
            warn!("the --dump= switch is silently ignored as it is an internal development tool");
        } else if argument == "--" {
            // Usage: ruby [switches] [--] [programfile] [arguments]
            self.end_of_interpreter_arguments = true;
        } else {
            self.options.add_unknown_argument(argument);
        }
        Ok(Scan::Stop)
    }

    /// `--enable=a,b`, `--enable-a` or `--enable a,b`.
    fn toggle_features(&mut self, argument: &str, key: &str, enabled: bool) -> Result<()> {
        let switch = format!("--{key}");
        let list = if argument == switch {
            self.cursor.skip_to_token_end();
            self.grab_value(CommandLineError::Invalid(format!(
                "invalid argument\nmissing argument for --{key}\n"
            )))?
        } else {
            // skip the `=` (or `-`) joining the switch and its list
            let mut rest = argument[switch.len()..].chars();
            rest.next();
            rest.as_str().to_string()
        };

        let names = split_list(&list, ',');
        if names.is_empty() {
            return Err(CommandLineError::Usage(format!(
                "missing argument for --{key}\n"
            )));
        }

        for name in names {
            if !self.features.apply(name, self.options, enabled) {
                warn!("warning: unknown argument for --{key}: `{name}'");
            }
        }
        Ok(())
    }

    fn process_extended_option(&mut self, extended: &str) -> Result<()> {
        if Path::new(extended).is_dir() {
            warn!(
                "the -X option supplied also appears to be a directory name - did you intend to use -X like -C?"
            );
        }

        if extended == "options" {
            print!("{}", self.catalog.listing());
            self.options.set_option(EXECUTION_ACTION, ExecutionAction::None);
            return Ok(());
        }

        if let Some(level) = extended.strip_prefix("log=") {
            let filter = parse_log_level(level)?;
            log::set_max_level(filter);
            self.options.set_log_level(filter);
            return Ok(());
        }

        let (name, value) = extended.split_once('=').unwrap_or((extended, "true"));
        let full_name = catalog::qualified_name(name);
        match self.catalog.lookup(&full_name) {
            Some(description) => {
                let value = description.check_value(Some(&OptionValue::String(value.into())))?;
                self.options.put_value(full_name, value);
            }
            None => self.options.add_unknown_argument(name),
        }
        Ok(())
    }

    /// `-E ext[:int]`. With two parts both encodings take the second part.
    fn process_encoding_option(&mut self, value: &str) -> Result<()> {
        let encodings: Vec<&str> = value.splitn(3, ':').collect();
        match encodings.as_slice() {
            [_, _, extra] => {
                return Err(CommandLineError::Invalid(format!(
                    "extra argument for -E: {extra}"
                )))
            }
            [_, internal] => {
                self.options
                    .set_option(INTERNAL_ENCODING, internal.to_string());
                self.options
                    .set_option(EXTERNAL_ENCODING, internal.to_string());
            }
            [external] => {
                self.options
                    .set_option(EXTERNAL_ENCODING, external.to_string());
            }
            _ => {}
        }
        Ok(())
    }

    /// The rest of the current token, else the whole next token.
    fn grab_value(&mut self, missing: CommandLineError) -> Result<String> {
        if let Some(value) = self.cursor.take_remainder() {
            return Ok(value);
        }
        self.cursor.next_whole_token().ok_or(missing)
    }

    fn disallowed_in_restricted_mode(&self, switch: &str) -> Result<()> {
        if self.config.restricted {
            return Err(CommandLineError::Restricted(switch.to_string()));
        }
        Ok(())
    }
}

fn not_implemented(switch: &str) -> CommandLineError {
    CommandLineError::NotImplemented(switch.to_string())
}

/// Split on `separator`, dropping trailing empty segments only.
///
/// An empty input yields one empty segment; a run of separators yields none.
fn split_list(value: &str, separator: char) -> Vec<&str> {
    if value.is_empty() {
        return vec![value];
    }
    let mut parts: Vec<&str> = value.split(separator).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

fn path_list_separator() -> char {
    if cfg!(windows) {
        ';'
    } else {
        ':'
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> String {
    let home_prefix = format!("~{MAIN_SEPARATOR}");
    match (path.strip_prefix(&home_prefix), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => format!("{home}{MAIN_SEPARATOR}{rest}"),
        _ => path.to_string(),
    }
}

/// Level names accepted by `-X log=LEVEL`: the `log` crate's names plus the
/// launcher's historical ones.
pub fn parse_log_level(level: &str) -> Result<log::LevelFilter> {
    use log::LevelFilter;

    let filter = match level.to_ascii_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" | "SEVERE" => LevelFilter::Error,
        "WARN" | "WARNING" => LevelFilter::Warn,
        "INFO" | "PERFORMANCE" => LevelFilter::Info,
        "DEBUG" | "CONFIG" | "FINE" => LevelFilter::Debug,
        "TRACE" | "FINER" | "FINEST" | "ALL" => LevelFilter::Trace,
        _ => {
            return Err(CommandLineError::invalid_argument(&format!(
                "unknown log level: {level}"
            )))
        }
    };
    Ok(filter)
}

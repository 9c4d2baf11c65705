// crates/options/tests/parser.rs
//
// End-to-end parsing of launcher command lines.
//
// Each test feeds a full argument vector (and, where relevant, a RUBYOPT value)
// through the public API and inspects the resolved configuration.

use pretty_assertions::assert_eq;
use rubylaunch_options::catalog::{
    ARGV_GLOBALS, ARGV_GLOBAL_FLAGS, ARGV_GLOBAL_VALUES, DEBUG, DEFAULT_EXECUTION_ACTION,
    DID_YOU_MEAN, EXECUTION_ACTION, FROZEN_STRING_LITERALS, IGNORE_LINES_BEFORE_RUBY_SHEBANG,
    LOAD_PATHS, READ_RUBYOPT, RUBYGEMS, SHOW_COPYRIGHT, SHOW_HELP, SHOW_VERSION, TO_EXECUTE,
    VERBOSITY, WORKING_DIRECTORY,
};
use rubylaunch_options::{
    CommandLineError, CommandLineOptions, CommandLineParser, DefaultExecutionAction,
    ExecutionAction, ShowHelp, Verbosity,
};

fn parse(args: &[&str]) -> Result<CommandLineOptions, CommandLineError> {
    let mut options = CommandLineOptions::new();
    CommandLineParser::new(args.iter().copied(), &mut options).process_arguments()?;
    Ok(options)
}

fn parse_env(value: &str) -> Result<CommandLineOptions, CommandLineError> {
    let mut options = CommandLineOptions::new();
    CommandLineParser::process_environment_value(value, &mut options)?;
    Ok(options)
}

#[test]
fn repeated_inline_code_appends() {
    let options = parse(&["-e", "a", "-e", "b"]).unwrap();
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::Inline);
    assert_eq!(options.get_option(TO_EXECUTE), "a\nb\n");
}

#[test]
fn inline_code_after_file_action_is_ignored() {
    let options = parse(&["-S", "rake", "-e", "x"]).unwrap();
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::Path);
    assert_eq!(options.get_option(TO_EXECUTE), "rake");
    // -S ends switch parsing, so -e and x belong to the script
    assert_eq!(options.script_arguments(), &["-e", "x"]);
}

#[test]
fn load_path_list_is_split_in_order() {
    let options = parse(&["-I", "foo:bar", "-Ibaz"]).unwrap();
    assert_eq!(options.get_option(LOAD_PATHS), vec!["foo", "bar", "baz"]);
}

#[test]
fn disable_list_and_aliases() {
    let options = parse(&["--disable=gems,did_you_mean"]).unwrap();
    assert!(!options.get_option(RUBYGEMS));
    assert!(!options.get_option(DID_YOU_MEAN));

    let dashed = parse(&["--disable=did-you-mean"]).unwrap();
    let underscored = parse(&["--disable=did_you_mean"]).unwrap();
    assert_eq!(dashed.values(), underscored.values());
}

#[test]
fn disable_all_toggles_every_feature() {
    let options = parse(&["--disable=all"]).unwrap();
    assert!(!options.get_option(RUBYGEMS));
    assert!(!options.get_option(DID_YOU_MEAN));
    assert!(!options.get_option(FROZEN_STRING_LITERALS));
    assert!(!options.get_option(READ_RUBYOPT));
    assert!(options.unknown_arguments().is_empty());
}

#[test]
fn enable_feature_with_dash_joined_name() {
    let options = parse(&["--enable-frozen-string-literal"]).unwrap();
    assert!(options.get_option(FROZEN_STRING_LITERALS));
}

#[test]
fn unknown_feature_is_not_fatal() {
    let options = parse(&["--enable=jit,gems", "x.rb"]).unwrap();
    assert!(options.get_option(RUBYGEMS));
    assert_eq!(options.get_option(TO_EXECUTE), "x.rb");
}

#[test]
fn bare_dash_reads_stdin_and_ends_switches() {
    let options = parse(&["-w", "-", "-d", "arg"]).unwrap();
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::Stdin);
    assert!(!options.get_option(DEBUG));
    assert_eq!(options.script_arguments(), &["-d", "arg"]);
}

#[test]
fn bare_dash_after_inline_code_keeps_inline() {
    let options = parse(&["-e", "p ARGV", "-", "a"]).unwrap();
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::Inline);
    assert_eq!(options.script_arguments(), &["a"]);
}

#[test]
fn clustered_flags_match_separate_flags() {
    let clustered = parse(&["-dv"]).unwrap();
    let separate = parse(&["-d", "-v"]).unwrap();
    assert_eq!(clustered.values(), separate.values());
    assert!(clustered.get_option(DEBUG));
    assert!(clustered.get_option(SHOW_VERSION));
    assert_eq!(clustered.get_option(VERBOSITY), Verbosity::True);
    assert_eq!(
        clustered.get_option(DEFAULT_EXECUTION_ACTION),
        DefaultExecutionAction::None
    );
}

#[test]
fn restricted_mode_rejects_inline_code() {
    assert!(parse(&["-e", "foo"]).is_ok());
    let err = parse_env("-e foo").unwrap_err();
    assert_eq!(err, CommandLineError::Restricted("-e".into()));
    assert!(!err.is_usage_error());
}

#[test]
fn restricted_mode_rejects_exiting_switches() {
    for value in ["--version", "-h", "--copyright", "-Xoptions", "--disable=gems", "-s"] {
        let err = parse_env(value).unwrap_err();
        assert!(
            matches!(err, CommandLineError::Restricted(_)),
            "{value} should be restricted, got {err:?}"
        );
    }
}

#[test]
fn restricted_mode_allows_safe_switches() {
    let options = parse_env("  -w   -rjson\t-Ilib ").unwrap();
    assert_eq!(options.get_option(VERBOSITY), Verbosity::True);
    assert_eq!(options.get_option(LOAD_PATHS), vec!["lib"]);
    assert!(options.script_arguments().is_empty());
}

#[test]
fn environment_variable_is_read_by_name() {
    let name = "RUBYLAUNCH_OPTIONS_TEST_RUBYOPT";
    std::env::set_var(name, "-d");
    let mut options = CommandLineOptions::new();
    CommandLineParser::process_environment_variable(name, &mut options).unwrap();
    assert!(options.get_option(DEBUG));
    std::env::remove_var(name);

    let mut untouched = CommandLineOptions::new();
    CommandLineParser::process_environment_variable(name, &mut untouched).unwrap();
    assert!(untouched.values().is_empty());
}

#[test]
fn warning_levels() {
    assert_eq!(parse(&["-W"]).unwrap().get_option(VERBOSITY), Verbosity::True);
    assert_eq!(parse(&["-W2"]).unwrap().get_option(VERBOSITY), Verbosity::True);
    assert_eq!(parse(&["-W1"]).unwrap().get_option(VERBOSITY), Verbosity::False);
    assert_eq!(parse(&["-W0"]).unwrap().get_option(VERBOSITY), Verbosity::Nil);
    let err = parse(&["-W5"]).unwrap_err();
    assert!(err.is_usage_error());
}

#[test]
fn options_listing_cancels_execution() {
    let options = parse(&["-e", "1", "-X", "options"]).unwrap();
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::None);
}

#[test]
fn help_version_and_copyright_cancel_execution() {
    let options = parse(&["-e", "1", "--help"]).unwrap();
    assert_eq!(options.get_option(SHOW_HELP), ShowHelp::Long);
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::None);

    let options = parse(&["-h", "script.rb"]).unwrap();
    assert_eq!(options.get_option(SHOW_HELP), ShowHelp::Short);
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::None);
    assert_eq!(options.script_arguments(), &["script.rb"]);

    let options = parse(&["--copyright"]).unwrap();
    assert!(options.get_option(SHOW_COPYRIGHT));
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::None);

    let options = parse(&["--version"]).unwrap();
    assert!(options.get_option(SHOW_VERSION));
}

#[test]
fn argv_globals_split_flags_and_values() {
    let options = parse(&["-s", "script.rb", "-xyz", "-foo-bar=baz", "plain", "-v=true"]).unwrap();
    assert!(options.get_option(ARGV_GLOBALS));
    assert_eq!(options.get_option(TO_EXECUTE), "script.rb");
    assert_eq!(options.get_option(ARGV_GLOBAL_FLAGS), vec!["xyz"]);
    assert_eq!(
        options.get_option(ARGV_GLOBAL_VALUES),
        vec!["foo_bar", "baz", "v", "true"]
    );
    assert_eq!(options.script_arguments(), &["plain"]);
}

#[test]
fn working_directory_takes_attached_or_next_value() {
    assert_eq!(parse(&["-C", "/tmp"]).unwrap().get_option(WORKING_DIRECTORY), "/tmp");
    assert_eq!(parse(&["-C/tmp"]).unwrap().get_option(WORKING_DIRECTORY), "/tmp");
}

#[test]
fn unsupported_switches_are_not_implemented() {
    for (args, switch) in [
        (&["-a"][..], "-a"),
        (&["-n"][..], "-n"),
        (&["-p"][..], "-p"),
        (&["-K"][..], "-K"),
        (&["--debug"][..], "--debug"),
        (&["--profile=flat"][..], "--profile"),
        (&["--gemfile"][..], "--gemfile"),
        (&["-x/tmp"][..], "-x with directory"),
    ] {
        assert_eq!(
            parse(args).unwrap_err(),
            CommandLineError::NotImplemented(switch.into())
        );
    }
}

#[test]
fn shebang_skipping_without_directory() {
    let options = parse(&["-x", "script.rb"]).unwrap();
    assert!(options.get_option(IGNORE_LINES_BEFORE_RUBY_SHEBANG));
    assert_eq!(options.get_option(EXECUTION_ACTION), ExecutionAction::File);
}

#[test]
fn bad_extended_value_is_type_error() {
    let err = parse(&["-Xrubygems=maybe"]).unwrap_err();
    assert_eq!(
        err,
        CommandLineError::OptionType {
            name: "ruby.rubygems".into(),
            value: "maybe".into()
        }
    );
}

#[test]
fn environment_then_primary_accumulate() {
    let mut options = CommandLineOptions::new();
    CommandLineParser::process_environment_value("-Ienv", &mut options).unwrap();
    CommandLineParser::new(["-Iargv", "app.rb"], &mut options)
        .process_arguments()
        .unwrap();
    assert_eq!(options.get_option(LOAD_PATHS), vec!["env", "argv"]);
    assert_eq!(options.get_option(TO_EXECUTE), "app.rb");
}

#[test]
fn extended_log_level_sets_filter_without_catalog_lookup() {
    let options = parse(&["-Xlog=FINE", "-X", "log=warning", "app.rb"]).unwrap();
    assert_eq!(options.log_level(), Some(log::LevelFilter::Warn));
    assert!(options.unknown_arguments().is_empty());
    assert!(!options.values().keys().any(|name| name.contains("log")));
    assert_eq!(options.get_option(TO_EXECUTE), "app.rb");

    let options = parse(&["-Xlog=FINE"]).unwrap();
    assert_eq!(options.log_level(), Some(log::LevelFilter::Debug));
    assert!(options.unknown_arguments().is_empty());
}

#[test]
fn unknown_extended_log_level_is_usage_error() {
    let err = parse(&["-Xlog=LOUD"]).unwrap_err();
    assert!(err.is_usage_error());
    assert_eq!(err.to_string(), "invalid argument\nunknown log level: LOUD\n");
}

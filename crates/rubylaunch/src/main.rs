// File: crates/rubylaunch/src/main.rs

mod args;

use rubylaunch_options::catalog::{
    DEFAULT_EXECUTION_ACTION, EXECUTION_ACTION, SHOW_COPYRIGHT, SHOW_HELP, SHOW_VERSION,
};
use rubylaunch_options::{
    CommandLineError, CommandLineOptions, CommandLineParser, DefaultExecutionAction,
    ExecutionAction, ShowHelp, RUBYOPT_VARIABLE,
};

fn main() {
    // Deterministic logging initialization:
    // - respects RUST_LOG if set
    // - otherwise defaults to warn, so ignored switches are reported
    init_logging();

    let argv: Vec<String> = std::env::args().skip(1).collect();

    let options = match resolve(argv) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("rubylaunch: {e}");
            if e.is_usage_error() {
                eprint!("{}", args::usage());
                std::process::exit(1);
            }
            std::process::exit(2);
        }
    };

    match options.get_option(SHOW_HELP) {
        ShowHelp::Short => print!("{}", args::short_help()),
        ShowHelp::Long => print!("{}", args::long_help()),
        ShowHelp::None => {}
    }

    if options.get_option(SHOW_VERSION) {
        println!("{}", args::version());
    }

    if options.get_option(SHOW_COPYRIGHT) {
        println!("{}", args::copyright());
    }

    let action = options.get_option(EXECUTION_ACTION);
    log::debug!("resolved execution action {action}");
    if action == ExecutionAction::None {
        return;
    }
    if action == ExecutionAction::Unset
        && options.get_option(DEFAULT_EXECUTION_ACTION) == DefaultExecutionAction::None
    {
        // `-v` with no script: nothing left to run
        return;
    }

    // The resolved configuration is the hand-off to the interpreter.
    match serde_json::to_string_pretty(&options) {
        Ok(s) => {
            println!("{s}");
        }
        Err(e) => {
            eprintln!("rubylaunch: failed to serialize configuration: {e}");
            std::process::exit(4);
        }
    }
}

/// RUBYOPT first, in restricted mode, then the process arguments.
fn resolve(argv: Vec<String>) -> Result<CommandLineOptions, CommandLineError> {
    let mut options = CommandLineOptions::new();
    CommandLineParser::process_environment_variable(RUBYOPT_VARIABLE, &mut options)?;
    CommandLineParser::new(argv, &mut options).process_arguments()?;
    Ok(options)
}

fn init_logging() {
    // env_logger is deterministic given fixed inputs; we avoid timestamps by default.
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });

    let _ = builder.try_init();
}

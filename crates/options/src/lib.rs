//! Ruby launcher option parsing: command-line and RUBYOPT grammar.
//!
//! This crate turns raw process arguments (and optionally the `RUBYOPT`
//! environment variable) into a resolved [`CommandLineOptions`] record:
//! - typed option descriptions and the process-wide [`OptionsCatalog`]
//! - the `--enable`/`--disable` feature table
//! - the [`CommandLineParser`] state machine for the historical switch grammar
//!
//! This crate contains NO interpreter logic. It never loads files and never
//! exits the process; the only output is the resolved configuration value.

/// Language identifier every catalog option name is namespaced under.
pub const LANGUAGE_ID: &str = "ruby";

/// Environment variable pre-parsed in restricted mode.
pub const RUBYOPT_VARIABLE: &str = "RUBYOPT";

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error, Clone, PartialEq, Eq)]
    pub enum CommandLineError {
        #[error("invalid value for option {name}: {value}")]
        OptionType { name: String, value: String },

        #[error("{0}")]
        Usage(String),

        #[error("the {0} option is not implemented")]
        NotImplemented(String),

        #[error("invalid switch in RUBYOPT: {0} (RuntimeError)")]
        Restricted(String),

        #[error("{0}")]
        Invalid(String),
    }

    impl CommandLineError {
        /// Usage errors are malformed invocations; the launcher prints usage with them.
        pub fn is_usage_error(&self) -> bool {
            matches!(self, CommandLineError::Usage(_))
        }

        /// Stable kind name used in conformance traces.
        pub fn kind(&self) -> &'static str {
            match self {
                CommandLineError::OptionType { .. } => "OptionType",
                CommandLineError::Usage(_) => "Usage",
                CommandLineError::NotImplemented(_) => "NotImplemented",
                CommandLineError::Restricted(_) => "Restricted",
                CommandLineError::Invalid(_) => "Invalid",
            }
        }

        pub(crate) fn option_type(name: &str, value: impl Into<String>) -> Self {
            CommandLineError::OptionType {
                name: name.to_string(),
                value: value.into(),
            }
        }

        /// Usage error in the reference `invalid argument` layout.
        pub(crate) fn invalid_argument(detail: &str) -> Self {
            CommandLineError::Usage(format!("invalid argument\n{detail}\n"))
        }
    }

    pub type Result<T> = std::result::Result<T, CommandLineError>;
}

pub use error::CommandLineError;

pub mod argument;
pub mod catalog;
pub mod description;
pub mod enums;
pub mod features;
pub mod options;
pub mod parser;

pub use argument::{tokenize, Argument};
pub use catalog::OptionsCatalog;
pub use description::{OptionDescription, OptionKey, OptionKind, OptionType, OptionValue};
pub use enums::{DefaultExecutionAction, ExecutionAction, OptionEnum, ShowHelp, Verbosity};
pub use features::{Feature, FeatureTable};
pub use options::CommandLineOptions;
pub use parser::{CommandLineParser, ParserConfig};

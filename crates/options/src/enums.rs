// File: crates/options/src/enums.rs
//
// Closed enumerations stored in the option catalog.
//
// Each enum registers its constant names so that textual values (`-Xverbosity=NIL`)
// can be validated against the closed set.

use serde::{Serialize, Serializer};
use std::fmt;

/// A closed, pre-registered set of named constants usable as an option value.
pub trait OptionEnum: Copy + Eq + fmt::Debug + Default + 'static {
    /// Every constant name, in declaration order.
    const NAMES: &'static [&'static str];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        pub enum $ty:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $name:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $ty {
            $( $(#[$vmeta])* $variant ),+
        }

        impl OptionEnum for $ty {
            const NAMES: &'static [&'static str] = &[$($name),+];

            fn name(self) -> &'static str {
                match self {
                    $( $ty::$variant => $name ),+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some($ty::$variant), )+
                    _ => None,
                }
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

option_enum! {
    /// What the launcher should run once parsing is complete.
    ///
    /// Starts as `Unset`. Help, version, copyright and `-X options` force `None`.
    pub enum ExecutionAction {
        #[default]
        Unset => "UNSET",
        None => "NONE",
        File => "FILE",
        Inline => "INLINE",
        Stdin => "STDIN",
        Path => "PATH",
    }
}

option_enum! {
    /// Behavior when no execution action was resolved.
    pub enum DefaultExecutionAction {
        None => "NONE",
        #[default]
        Irb => "IRB",
    }
}

option_enum! {
    pub enum ShowHelp {
        #[default]
        None => "NONE",
        Short => "SHORT",
        Long => "LONG",
    }
}

option_enum! {
    /// Tri-state `$VERBOSE`: nil, false or true carry different runtime meaning.
    pub enum Verbosity {
        Nil => "NIL",
        #[default]
        False => "FALSE",
        True => "TRUE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_registry() {
        for name in ExecutionAction::NAMES {
            let action = ExecutionAction::from_name(name).unwrap();
            assert_eq!(action.name(), *name);
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(Verbosity::from_name("TRUE"), Some(Verbosity::True));
        assert_eq!(Verbosity::from_name("true"), None);
    }

    #[test]
    fn defaults_match_launcher_initial_state() {
        assert_eq!(ExecutionAction::default(), ExecutionAction::Unset);
        assert_eq!(ShowHelp::default(), ShowHelp::None);
        assert_eq!(Verbosity::default(), Verbosity::False);
    }

    #[test]
    fn enums_serialize_as_constant_names() {
        let s = serde_json::to_string(&ExecutionAction::Inline).unwrap();
        assert_eq!(s, "\"INLINE\"");
    }
}

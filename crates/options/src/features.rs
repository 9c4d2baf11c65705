// File: crates/options/src/features.rs
//
// Feature table for `--enable=...` / `--disable=...`.
//
// Built once from a literal list. The meta-feature `all` is not an entry in the
// table; it is expanded over the registered entries, so it never toggles itself.

use crate::catalog::{DID_YOU_MEAN, FROZEN_STRING_LITERALS, READ_RUBYOPT, RUBYGEMS};
use crate::options::CommandLineOptions;
use once_cell::sync::Lazy;
use std::fmt;

/// Name of the meta-feature expanding to every registered feature.
pub const ALL_FEATURES: &str = "all";

pub type FeatureSetter = fn(&mut CommandLineOptions, bool);

#[derive(Clone, Copy)]
pub struct Feature {
    pub canonical_name: &'static str,
    pub aliases: &'static [&'static str],
    pub apply: FeatureSetter,
}

impl fmt::Debug for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
            .field("canonical_name", &self.canonical_name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

impl Feature {
    fn matches(&self, name: &str) -> bool {
        self.canonical_name == name || self.aliases.iter().any(|alias| *alias == name)
    }
}

#[derive(Debug)]
pub struct FeatureTable {
    features: Vec<Feature>,
}

static FEATURES: Lazy<FeatureTable> = Lazy::new(|| {
    FeatureTable::new(vec![
        Feature {
            canonical_name: "did_you_mean",
            aliases: &["did-you-mean"],
            apply: |options, enabled| options.set_option(DID_YOU_MEAN, enabled),
        },
        Feature {
            canonical_name: "gem",
            aliases: &["gems"],
            apply: |options, enabled| options.set_option(RUBYGEMS, enabled),
        },
        Feature {
            canonical_name: "frozen_string_literal",
            aliases: &["frozen-string-literal"],
            apply: |options, enabled| options.set_option(FROZEN_STRING_LITERALS, enabled),
        },
        Feature {
            canonical_name: "rubyopt",
            aliases: &[],
            apply: |options, enabled| options.set_option(READ_RUBYOPT, enabled),
        },
    ])
});

impl FeatureTable {
    /// Build a table. Entries named `all` are dropped so `all` stays a pure expansion.
    pub fn new(features: Vec<Feature>) -> Self {
        let features = features
            .into_iter()
            .filter(|f| f.canonical_name != ALL_FEATURES)
            .collect();
        Self { features }
    }

    pub fn global() -> &'static FeatureTable {
        &FEATURES
    }

    pub fn lookup(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.matches(name))
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Toggle `name`. Returns false (and changes nothing) for unknown names.
    pub fn apply(&self, name: &str, options: &mut CommandLineOptions, enabled: bool) -> bool {
        if name == ALL_FEATURES {
            for feature in &self.features {
                (feature.apply)(options, enabled);
            }
            return true;
        }

        match self.lookup(name) {
            Some(feature) => {
                (feature.apply)(options, enabled);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_the_same_feature() {
        let table = FeatureTable::global();
        let a = table.lookup("did-you-mean").unwrap();
        let b = table.lookup("did_you_mean").unwrap();
        assert_eq!(a.canonical_name, b.canonical_name);
        assert_eq!(table.lookup("gems").unwrap().canonical_name, "gem");
    }

    #[test]
    fn all_toggles_every_registered_feature() {
        let mut options = CommandLineOptions::new();
        assert!(FeatureTable::global().apply("all", &mut options, false));
        assert!(!options.get_option(DID_YOU_MEAN));
        assert!(!options.get_option(RUBYGEMS));
        assert!(!options.get_option(FROZEN_STRING_LITERALS));
        assert!(!options.get_option(READ_RUBYOPT));
        assert_eq!(options.values().len(), 4);
    }

    #[test]
    fn all_is_never_a_registered_entry() {
        let table = FeatureTable::new(vec![Feature {
            canonical_name: ALL_FEATURES,
            aliases: &[],
            apply: |_, _| panic!("`all` must not toggle itself"),
        }]);
        assert!(table.features().is_empty());
        let mut options = CommandLineOptions::new();
        assert!(table.apply("all", &mut options, true));
    }

    #[test]
    fn unknown_names_change_nothing() {
        let mut options = CommandLineOptions::new();
        assert!(!FeatureTable::global().apply("jit", &mut options, true));
        assert!(options.values().is_empty());
    }
}

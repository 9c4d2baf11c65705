// File: crates/rubylaunch/src/args.rs
//
// User-facing text for the `rubylaunch` executable: usage, help, version and
// copyright.
//
// This file defines the public CLI contract only.
// The switch grammar itself lives in rubylaunch-options.

/// Ruby language version the launcher's switch grammar follows.
pub const RUBY_VERSION: &str = "2.3.5";

pub fn usage() -> &'static str {
    "Usage: rubylaunch [switches] [--] [programfile] [arguments]\n"
}

const SHORT_SWITCHES: &str = "  \
  -0[octal]       specify record separator (\\0, if no argument)
  -a              autosplit mode with -n or -p (splits $_ into $F)
  -c              check syntax only
  -Cdirectory     cd to directory before executing your script
  -d              set debugging flags (set $DEBUG to true)
  -e 'command'    one line of script. Several -e's allowed. Omit [programfile]
  -Eex[:in]       specify the default external and internal character encodings
  -Fpattern       split() pattern for autosplit (-a)
  -i[extension]   edit ARGV files in place (make backup if extension supplied)
  -Idirectory     specify $LOAD_PATH directory (may be used more than once)
  -l              enable line ending processing
  -n              assume 'while gets(); ... end' loop around your script
  -p              assume loop like -n but print line also like sed
  -rlibrary       require the library before executing your script
  -s              enable some switch parsing for switches after script name
  -S              look for the script using PATH environment variable
  -T[level=1]     turn on tainting checks
  -U              use UTF-8 as default internal encoding
  -v              print the version number, then turn on verbose mode
  -w              turn warnings on for your script
  -W[level=2]     set warning level; 0=silence, 1=medium, 2=verbose
  -x[directory]   strip off text before #!ruby line and perhaps cd to directory
  -h              show this message, --help for more info
";

const LONG_SWITCHES: &str = "\
Features:
  gem             rubygems (default: enabled)
  did_you_mean    did_you_mean (default: enabled)
  rubyopt         RUBYOPT environment variable (default: enabled)
  frozen-string-literal
                  freeze all string literals (default: disabled)
Extended options:
  -Xlog=LEVEL     set the launcher log level
  -Xoptions       print available extended options and their defaults
  -Xname=value    set an extended option (omit =value to set true)
Long switches:
  --copyright     print the copyright
  --enable=feature[,...], --disable=feature[,...]
                  enable or disable features
  --verbose       turn on verbose mode
  --version       print the version
  --help          show this message, -h for short message
";

pub fn short_help() -> String {
    format!("{}{}", usage(), SHORT_SWITCHES)
}

pub fn long_help() -> String {
    format!("{}{}{}", usage(), SHORT_SWITCHES, LONG_SWITCHES)
}

pub fn version() -> String {
    format!(
        "rubylaunch {} (ruby {RUBY_VERSION} compatible)",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn copyright() -> &'static str {
    "rubylaunch - Copyright (c) the rubylaunch developers"
}

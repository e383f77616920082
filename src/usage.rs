//! Rendering the usage screen.
//!
//! One line per flag-capable option, in registration order. Options with a
//! getter show their *current* value, which makes `--help` double as a way
//! to check whether config files and env vars are being applied.

use std::fmt::Write;

use crate::option::{FlagOpt, Getter, Setter};
use crate::registry::OptionSet;

impl OptionSet {
    /// Render the usage screen.
    pub fn usage(&self) -> String {
        let mut rows = Vec::new();
        self.visit_flags(|flag| {
            let mut left = match flag.short_flag() {
                Some(c) => format!("-{c}, --{}", flag.flag()),
                None => format!("    --{}", flag.flag()),
            };
            if let Some(getter) = flag.as_getter() {
                let _ = write!(left, "={}", getter.get());
            }
            rows.push((left, flag.help().to_owned()));
        });

        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        let mut out = format!("Usage of {}:\n", self.app_name());
        for (left, help) in rows {
            let _ = writeln!(out, "  {left:width$}  {help}");
        }
        out
    }

    /// Print the usage screen to stderr.
    pub fn print_usage(&self) {
        eprint!("{}", self.usage());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_the_app() {
        let set = OptionSet::new("myapp");
        assert!(set.usage().starts_with("Usage of myapp:\n"));
    }

    #[test]
    fn lists_flags_in_registration_order() {
        let mut set = OptionSet::new("myapp");
        set.add_bool("verbose", Some('v'), false, "enable verbose output");
        set.add_string("out", None, "a.txt", "output file");

        let usage = set.usage();
        let verbose = usage.find("--verbose").unwrap();
        let out = usage.find("--out").unwrap();
        assert!(verbose < out);
    }

    #[test]
    fn shows_short_flag_help_and_current_value() {
        let mut set = OptionSet::new("myapp");
        set.add_int("port", Some('p'), 8080, "listen port");

        let usage = set.usage();
        assert!(usage.contains("-p, --port=8080"));
        assert!(usage.contains("listen port"));
    }

    #[test]
    fn help_flag_has_no_value_column() {
        let mut set = OptionSet::new("myapp");
        set.add_help();
        let usage = set.usage();
        assert!(usage.contains("-h, --help "));
        assert!(usage.contains("view this help message"));
    }
}

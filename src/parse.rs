//! The all-in-one entry point: files, then environment, then flags.

use crate::error::UconfError;
use crate::registry::OptionSet;

impl OptionSet {
    /// Resolve configuration from every built-in source, lowest priority
    /// first: the standard TOML files, then environment variables, then the
    /// given command-line arguments. Stops at the first error.
    ///
    /// Afterwards, if an error occurred or a help flag registered via
    /// [`add_help`](OptionSet::add_help) is set, the usage screen is printed
    /// to stderr. The error is returned either way; exit codes are the
    /// caller's business.
    ///
    /// This is a convenience wrapper — calling the three parse methods
    /// yourself, in any order or subset, is valid and encouraged.
    pub fn parse<I>(&mut self, args: I) -> Result<(), UconfError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut result = self.parse_std_toml();
        if result.is_ok() {
            result = self.parse_env();
        }
        if result.is_ok() {
            result = self.parse_flags(args);
        }

        let help = self.help.as_ref().is_some_and(|h| h.get());
        if result.is_err() || help {
            self.print_usage();
        }
        result
    }
}

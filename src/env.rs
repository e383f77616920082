//! Setting options from environment variables.
//!
//! With app name `myapp`, an option whose env key is `DB_URL` is looked up
//! as `MYAPP_DB_URL`. Absent variables are skipped; a variable whose value
//! the option rejects does not stop the sweep — the last error is returned
//! once every option has been visited.

use std::collections::HashMap;

use crate::error::UconfError;
use crate::option::{EnvOpt, Input, Setter};
use crate::registry::OptionSet;

impl OptionSet {
    /// Apply `{APP}_{KEY}` environment variables to every env-capable option.
    pub fn parse_env(&self) -> Result<(), UconfError> {
        self.parse_env_from(std::env::vars())
    }

    /// Like [`parse_env`](OptionSet::parse_env), but reads from the given
    /// pairs instead of the process environment. Tests pass synthetic data.
    pub fn parse_env_from(
        &self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<(), UconfError> {
        let prefix = self.app_name().to_uppercase();
        let vars: HashMap<String, String> = vars.into_iter().collect();

        let mut last_err = None;
        self.visit(|opt| {
            let Some(env) = opt.as_env() else {
                return;
            };
            let key = format!("{prefix}_{}", env.env_key());
            let Some(value) = vars.get(&key) else {
                return;
            };
            if let Err(e) = opt.set(Input::Text(value)) {
                last_err = Some(e);
            }
        });

        match last_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn simple_key() {
        let mut set = OptionSet::new("myapp");
        let host = set.add_string("host", None, "localhost", "");
        set.parse_env_from(vars(&[("MYAPP_HOST", "0.0.0.0")]))
            .unwrap();
        assert_eq!(*host.borrow(), "0.0.0.0");
    }

    #[test]
    fn dotted_flag_maps_to_underscores() {
        let mut set = OptionSet::new("myapp");
        let url = set.add_string("db.url", None, "", "");
        set.parse_env_from(vars(&[("MYAPP_DB_URL", "pg://db")]))
            .unwrap();
        assert_eq!(*url.borrow(), "pg://db");
    }

    #[test]
    fn app_name_is_uppercased() {
        let mut set = OptionSet::new("MyApp");
        let n = set.add_int("n", None, 0, "");
        set.parse_env_from(vars(&[("MYAPP_N", "3")])).unwrap();
        assert_eq!(n.get(), 3);
    }

    #[test]
    fn absent_variables_leave_defaults() {
        let mut set = OptionSet::new("myapp");
        let port = set.add_int("port", None, 8080, "");
        set.parse_env_from(vars(&[("OTHER_PORT", "1")])).unwrap();
        assert_eq!(port.get(), 8080);
    }

    #[test]
    fn rejected_value_reports_error_but_continues() {
        let mut set = OptionSet::new("myapp");
        let port = set.add_int("port", None, 0, "");
        let host = set.add_string("host", None, "", "");
        let err = set
            .parse_env_from(vars(&[("MYAPP_PORT", "not-a-number"), ("MYAPP_HOST", "h")]))
            .unwrap_err();
        assert!(matches!(err, UconfError::TypeMismatch { .. }));
        // the sweep still applied the later option
        assert_eq!(*host.borrow(), "h");
        assert_eq!(port.get(), 0);
    }

    #[test]
    fn help_flag_ignores_environment() {
        let mut set = OptionSet::new("myapp");
        let help = set.add_help();
        set.parse_env_from(vars(&[("MYAPP_HELP", "true")])).unwrap();
        assert!(!help.get());
    }
}

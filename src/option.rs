//! The capability model that decouples the parsers from concrete value kinds.
//!
//! Every option implements [`Setter`]; everything else is optional. The flag
//! parser, the env sweep, the TOML sweep, and the usage renderer each ask an
//! option for the one capability they need via the `as_*` query methods and
//! skip options that don't expose it. This keeps the parsers generic: they
//! never see an option's underlying scalar type, only its `set` entry point.
//!
//! Values are delivered to `set` as an [`Input`] — a small tagged union
//! covering the three shapes a value can arrive in: command-line/env text,
//! the boolean auto-true default, or a parsed TOML value.

use crate::error::UconfError;

/// A value on its way into an option, tagged with where it came from.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    /// Raw text from the command line or an environment variable.
    Text(&'a str),
    /// The auto-true path: a boolean flag given without an explicit value.
    Bool(bool),
    /// A value read from a configuration file.
    Toml(&'a toml::Value),
}

/// The one mandatory capability: every option can be set.
///
/// `set` coerces the input to the option's kind and stores it, or returns
/// [`UconfError::TypeMismatch`] when the input has no sensible coercion.
/// Implementations should at minimum handle [`Input::Text`]; boolean options
/// must also handle [`Input::Bool`].
///
/// The `as_*` methods are safe capability queries with default `None`
/// implementations — an option opts into a capability by overriding the
/// query to return itself.
pub trait Setter {
    fn set(&self, input: Input<'_>) -> Result<(), UconfError>;

    /// The option can be matched on the command line.
    fn as_flag(&self) -> Option<&dyn FlagOpt> {
        None
    }

    /// The option can be set from an environment variable.
    fn as_env(&self) -> Option<&dyn EnvOpt> {
        None
    }

    /// The option can be set from a TOML configuration file.
    fn as_toml(&self) -> Option<&dyn TomlOpt> {
        None
    }

    /// The option can report its current value.
    fn as_getter(&self) -> Option<&dyn Getter> {
        None
    }
}

/// An option that can be matched on the command line.
///
/// `flag` and `short_flag` are the identity the tokenizer resolves against;
/// both are fixed for the option's lifetime. When `is_boolean` returns true
/// the parser treats a missing explicit value as success and passes
/// `Input::Bool(true)` instead of erroring.
pub trait FlagOpt: Setter {
    /// The long flag name, e.g. `verbose` or `db.url`. Dots are meaningful.
    fn flag(&self) -> &str;

    /// The short flag character, or `None` if the option has no short form.
    fn short_flag(&self) -> Option<char>;

    /// Whether a value is optional for this flag (boolean auto-true).
    fn is_boolean(&self) -> bool;

    /// One-line description shown by the usage renderer.
    fn help(&self) -> &str;
}

/// An option that can be set from the environment.
///
/// With app name `app` and `env_key()` returning `DB_URL`, the env sweep
/// looks up the variable `APP_DB_URL`.
pub trait EnvOpt: Setter {
    fn env_key(&self) -> String;
}

/// An option that can be set from a TOML file.
///
/// `toml_key` is a dotted query (`db.url`) resolved against the parsed table.
pub trait TomlOpt: Setter {
    fn toml_key(&self) -> &str;
}

/// An option that can report its current value.
///
/// Used by the usage renderer (so `--help` shows what each flag currently
/// resolves to) and by tests.
pub trait Getter {
    fn get(&self) -> toml::Value;
}

/// Derive the environment key from a long flag name: dots become
/// underscores, the result is uppercased. `db.pool.size` -> `DB_POOL_SIZE`.
pub(crate) fn env_name(flag: &str) -> String {
    flag.replace('.', "_").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_name_replaces_dots_and_uppercases() {
        assert_eq!(env_name("db.pool.size"), "DB_POOL_SIZE");
    }

    #[test]
    fn env_name_plain_name() {
        assert_eq!(env_name("verbose"), "VERBOSE");
    }

    #[test]
    fn env_name_keeps_literal_underscores() {
        assert_eq!(env_name("pool_size"), "POOL_SIZE");
    }
}

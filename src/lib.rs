//! Layered application configuration: TOML files, environment variables, and
//! command-line flags, resolved into plain typed values.
//!
//! Register options once, parse, and read the resolved values through the
//! handles the registration calls return:
//!
//! ```no_run
//! use uconf::OptionSet;
//!
//! let mut opts = OptionSet::new("myapp");
//! let verbose = opts.add_bool("verbose", Some('v'), false, "enable verbose output");
//! let port = opts.add_int("port", Some('p'), 8080, "listen port");
//! let _db_url = opts.add_string("db.url", None, "", "database connection string");
//! opts.add_help();
//!
//! opts.parse(std::env::args().skip(1))?;
//!
//! if verbose.get() {
//!     eprintln!("listening on port {}", port.get());
//! }
//! # Ok::<(), uconf::UconfError>(())
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Compiled defaults      the value passed to add_*
//!        ↑ overridden by
//! Config files           /etc, ~/.{app}rc, platform config dir
//!        ↑ overridden by
//! Environment vars       {APP}_{KEY}
//!        ↑ overridden by
//! Command-line flags
//! ```
//!
//! Every layer is sparse: a source only touches the options it names, and
//! untouched options keep whatever the layer below left there. Precedence is
//! nothing more than apply order — [`parse`](OptionSet::parse) runs files,
//! then env, then flags, and each `set` overwrites the last.
//!
//! # Flag grammar
//!
//! ```text
//! --name=value    --name value    --name        (boolean: implies true)
//! -x value        -xvalue         -ab           (boolean short flags combine)
//! --              everything after is positional
//! ```
//!
//! Long names may be dotted (`--db.url=pg://x`); the same name addresses the
//! option in TOML files (`[db] url = ...`) and the environment
//! (`MYAPP_DB_URL`). Boolean flags given without a value default to true, so
//! `--verbose somefile` treats `somefile` as a positional argument — a
//! boolean only consumes the next token when it literally parses as a bool
//! (`--verbose false`).
//!
//! Unknown flags are not errors. A `--name` or `-x` token that doesn't match
//! a registered option degrades to a plain token and lands in
//! [`args()`](OptionSet::args) with the other positionals, for the caller to
//! interpret.
//!
//! # Options are capabilities, not types
//!
//! The parsers know nothing about bools or integers. An option is anything
//! implementing [`Setter`]; the flag parser, env sweep, TOML sweep, and
//! usage renderer each query for the one optional capability they need
//! ([`FlagOpt`], [`EnvOpt`], [`TomlOpt`], [`Getter`]) and skip options that
//! don't expose it. The built-in kinds in [`options`] cover the scalar
//! cases; custom kinds only have to implement the traits they want picked
//! up.
//!
//! # Errors
//!
//! All fallible operations return [`UconfError`]. Flag parsing fails only
//! two ways: a non-boolean flag that never received a value
//! ([`MissingValue`](UconfError::MissingValue)) and a value the option
//! rejected ([`SetFailed`](UconfError::SetFailed)), both naming the flag.
//! The first error aborts the parse call and nothing from that call is
//! committed; there is no partial-failure mode.

pub mod error;
pub mod option;
pub mod options;

mod env;
mod file;
mod flags;
mod parse;
mod registry;
mod token;
mod usage;

pub use error::UconfError;
pub use option::{EnvOpt, FlagOpt, Getter, Input, Setter, TomlOpt};
pub use options::{BoolOpt, FloatOpt, HelpOpt, IntOpt, StringOpt, UintOpt};
pub use registry::OptionSet;

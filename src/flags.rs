//! The flag resolution state machine.
//!
//! Tokens are consumed left to right. At most one option is "pending" at a
//! time: the most recently matched flag that is still eligible to consume
//! the next token as its value. The rules:
//!
//! - A new flag token first resolves the pending option: booleans default to
//!   true, non-booleans fail with `MissingValue`.
//! - A plain token is the pending option's candidate value. If the option
//!   rejects it and is boolean, the token goes to the positional list and
//!   the option falls back to true; a non-boolean rejecting its value is
//!   fatal.
//! - `--` ends flag scanning; everything after it is positional verbatim.
//! - End of input resolves the pending option the same way a new flag would.
//!
//! The first error aborts the scan; the positionals gathered so far are
//! discarded and the set's committed `args` are left untouched.

use crate::error::UconfError;
use crate::option::{FlagOpt, Input, Setter};
use crate::registry::OptionSet;
use crate::token::{self, Token};

/// The option currently awaiting a value.
struct Pending<'a> {
    opt: &'a dyn FlagOpt,
    /// Name used in error messages: the long name for long flags, the
    /// single character for short flags.
    name: String,
    satisfied: bool,
}

impl<'a> Pending<'a> {
    fn long(opt: &'a dyn FlagOpt) -> Self {
        Pending {
            opt,
            name: opt.flag().to_owned(),
            satisfied: false,
        }
    }

    fn short(opt: &'a dyn FlagOpt) -> Self {
        Pending {
            opt,
            name: opt.short_flag().map(String::from).unwrap_or_default(),
            satisfied: false,
        }
    }

    fn set_text(&self, value: &str) -> Result<(), UconfError> {
        self.opt
            .set(Input::Text(value))
            .map_err(|_| UconfError::SetFailed {
                flag: self.name.clone(),
                value: value.to_owned(),
            })
    }

    fn set_true(&self) -> Result<(), UconfError> {
        self.opt
            .set(Input::Bool(true))
            .map_err(|_| UconfError::SetFailed {
                flag: self.name.clone(),
                value: "true".to_owned(),
            })
    }

    /// Resolve a pending option that never received a value: booleans go
    /// auto-true, non-booleans are a `MissingValue` error.
    fn resolve(self) -> Result<(), UconfError> {
        if self.satisfied {
            return Ok(());
        }
        if !self.opt.is_boolean() {
            return Err(UconfError::MissingValue { flag: self.name });
        }
        self.set_true()
    }
}

fn resolve_pending(pending: &mut Option<Pending<'_>>) -> Result<(), UconfError> {
    match pending.take() {
        Some(p) => p.resolve(),
        None => Ok(()),
    }
}

impl OptionSet {
    /// Parse command-line arguments (conventionally excluding the program
    /// name) and set the matched options.
    ///
    /// Accepted forms:
    ///
    /// ```text
    /// --name=value   --name value   --name          (boolean: implies true)
    /// -x value       -xvalue        -ab             (boolean cluster)
    /// --             everything after is positional
    /// ```
    ///
    /// Unregistered `--name`/`-x` tokens are not errors; they and every
    /// other unconsumed token are appended to [`args`](OptionSet::args) —
    /// but only when the whole parse succeeds. On error nothing is
    /// committed.
    pub fn parse_flags<I>(&mut self, args: I) -> Result<(), UconfError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let positionals = self.scan(args)?;
        self.args.extend(positionals);
        Ok(())
    }

    fn scan<I>(&self, args: I) -> Result<Vec<String>, UconfError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut positionals = Vec::new();
        let mut terminated = false;
        let mut pending: Option<Pending<'_>> = None;

        for raw in args {
            let raw = raw.as_ref();
            if terminated {
                positionals.push(raw.to_owned());
                continue;
            }

            match token::classify(self, raw) {
                Token::Long { opt, value } => {
                    resolve_pending(&mut pending)?;
                    let mut p = Pending::long(opt);
                    if let Some(value) = value {
                        p.set_text(&value)?;
                        p.satisfied = true;
                    }
                    pending = Some(p);
                }
                Token::Cluster { opts, value } => {
                    resolve_pending(&mut pending)?;
                    let last = opts.len() - 1;
                    for (i, opt) in opts.into_iter().enumerate() {
                        let p = Pending::short(opt);
                        if i != last {
                            // guaranteed boolean by the tokenizer
                            p.set_true()?;
                            continue;
                        }
                        let mut p = p;
                        if let Some(value) = &value {
                            // no boolean fallback on the inline-value path:
                            // -aarbitrary for a lone boolean 'a' is an error
                            p.set_text(value)?;
                            p.satisfied = true;
                        }
                        pending = Some(p);
                    }
                }
                Token::EndOfFlags => terminated = true,
                Token::Plain => match &mut pending {
                    Some(p) if !p.satisfied => {
                        if p.opt.set(Input::Text(raw)).is_ok() {
                            p.satisfied = true;
                        } else if p.opt.is_boolean() {
                            // the token was not consumed as a value
                            positionals.push(raw.to_owned());
                            p.set_true()?;
                            p.satisfied = true;
                        } else {
                            return Err(UconfError::SetFailed {
                                flag: p.name.clone(),
                                value: raw.to_owned(),
                            });
                        }
                    }
                    _ => positionals.push(raw.to_owned()),
                },
            }
        }

        // the last token was a flag that never got its value
        resolve_pending(&mut pending)?;
        Ok(positionals)
    }
}

//! Classification of raw command-line tokens.
//!
//! A token is classified against the registry: a `--name` form only counts
//! as a long flag if `name` is registered, and a `-abc` form only counts as
//! a short cluster if at least its first character resolves. Everything else
//! is [`Token::Plain`] — unknown flags deliberately degrade to plain tokens
//! so they can pass through to the positional list instead of erroring.
//!
//! Classification is transient: a `Token` borrows the resolved options from
//! the registry and never outlives one resolution step.

use crate::option::FlagOpt;
use crate::registry::OptionSet;

pub(crate) enum Token<'a> {
    /// `--name` or `--name=value`, with `name` registered.
    Long {
        opt: &'a dyn FlagOpt,
        value: Option<String>,
    },
    /// `-abc` with at least one leading character resolved. Every option
    /// before the last is boolean — the walk stops as soon as a non-boolean
    /// is seen, capturing the remainder of the token as its inline value.
    Cluster {
        opts: Vec<&'a dyn FlagOpt>,
        value: Option<String>,
    },
    /// The `--` sentinel: flag scanning is over.
    EndOfFlags,
    /// Not a flag token at all: a value or positional argument.
    Plain,
}

pub(crate) fn classify<'a>(set: &'a OptionSet, raw: &str) -> Token<'a> {
    if raw == "--" {
        return Token::EndOfFlags;
    }
    if let Some(token) = long_flag(set, raw) {
        return token;
    }
    if let Some(token) = short_cluster(set, raw) {
        return token;
    }
    Token::Plain
}

/// `--name[=value]`, length >= 3. The name is everything up to the first
/// `=`; dots are permitted and meaningful. An empty inline value
/// (`--name=`) counts as no value.
fn long_flag<'a>(set: &'a OptionSet, raw: &str) -> Option<Token<'a>> {
    let rest = raw.strip_prefix("--")?;
    if rest.is_empty() {
        return None;
    }
    let (name, value) = match rest.split_once('=') {
        Some((name, value)) if !value.is_empty() => (name, Some(value.to_owned())),
        Some((name, _)) => (name, None),
        None => (rest, None),
    };
    let opt = set.find_long_flag(name)?;
    Some(Token::Long { opt, value })
}

/// `-abc[value]`, length >= 2, second character not `-`. Characters are
/// resolved one at a time; the walk stops at the first unresolved character
/// or right after a non-boolean option, and the remainder of the token
/// becomes the inline value. Yields `None` (not a cluster) when not even the
/// first character resolves.
fn short_cluster<'a>(set: &'a OptionSet, raw: &str) -> Option<Token<'a>> {
    let rest = raw.strip_prefix('-')?;
    if rest.is_empty() || rest.starts_with('-') {
        return None;
    }

    let mut opts: Vec<&dyn FlagOpt> = Vec::new();
    let mut value = None;
    for (i, c) in rest.char_indices() {
        let resolved = match set.find_short_flag(c) {
            // a non-boolean consumes the rest of the token as its value
            Some(opt) if opts.last().is_none_or(|prev| prev.is_boolean()) => Some(opt),
            _ => None,
        };
        match resolved {
            Some(opt) => opts.push(opt),
            None => {
                value = Some(rest[i..].to_owned());
                break;
            }
        }
    }

    if opts.is_empty() {
        return None;
    }
    Some(Token::Cluster { opts, value })
}

//! The option registry: an insertion-ordered collection of options with
//! lookup indices for long-flag names and short-flag characters.
//!
//! Insertion order is preserved and observable — it determines usage output
//! and the order of the env/TOML sweeps. The indices are maintained
//! incrementally by [`register`](OptionSet::register), which rejects
//! duplicate keys rather than silently merging two options under one name.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::UconfError;
use crate::option::{FlagOpt, Setter};

/// A set of registered options plus the positional arguments accumulated by
/// [`parse_flags`](OptionSet::parse_flags).
///
/// Populate the set fully, parse once, then treat the option values as
/// read-only. `OptionSet` is single-threaded by design; the value slots are
/// `Rc`-shared and not `Sync`.
pub struct OptionSet {
    pub(crate) app_name: String,
    pub(crate) options: Vec<Rc<dyn Setter>>,
    pub(crate) by_flag: HashMap<String, usize>,
    pub(crate) by_short: HashMap<char, usize>,
    pub(crate) args: Vec<String>,
    /// Handle to the help flag, if one was registered via `add_help`.
    pub(crate) help: Option<Rc<Cell<bool>>>,
}

impl OptionSet {
    /// `app_name` prefixes environment variables and names the standard
    /// config files; it also heads the usage output.
    pub fn new(app_name: impl Into<String>) -> Self {
        OptionSet {
            app_name: app_name.into(),
            options: Vec::new(),
            by_flag: HashMap::new(),
            by_short: HashMap::new(),
            args: Vec::new(),
            help: None,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Add an option to the set. Options are expected to arrive pre-set to
    /// their default value.
    ///
    /// If the option exposes the flag capability, its long name and short
    /// character are indexed for lookup. Registering a long name or a short
    /// character that is already taken returns
    /// [`DuplicateFlag`](UconfError::DuplicateFlag) /
    /// [`DuplicateShortFlag`](UconfError::DuplicateShortFlag) and leaves the
    /// set unchanged.
    pub fn register(&mut self, opt: Rc<dyn Setter>) -> Result<(), UconfError> {
        let index = self.options.len();
        if let Some(flag) = opt.as_flag() {
            if self.by_flag.contains_key(flag.flag()) {
                return Err(UconfError::DuplicateFlag {
                    flag: flag.flag().to_owned(),
                });
            }
            if let Some(c) = flag.short_flag()
                && self.by_short.contains_key(&c)
            {
                return Err(UconfError::DuplicateShortFlag { flag: c });
            }
            self.by_flag.insert(flag.flag().to_owned(), index);
            if let Some(c) = flag.short_flag() {
                self.by_short.insert(c, index);
            }
        }
        self.options.push(opt);
        Ok(())
    }

    /// Look up an option by its long flag name.
    pub fn find_long_flag(&self, name: &str) -> Option<&dyn FlagOpt> {
        let &index = self.by_flag.get(name)?;
        self.options[index].as_flag()
    }

    /// Look up an option by its short flag character. Options without a
    /// short form are never indexed, so they can't be found here.
    pub fn find_short_flag(&self, c: char) -> Option<&dyn FlagOpt> {
        let &index = self.by_short.get(&c)?;
        self.options[index].as_flag()
    }

    /// Visit every option in insertion order.
    pub fn visit(&self, mut f: impl FnMut(&dyn Setter)) {
        for opt in &self.options {
            f(opt.as_ref());
        }
    }

    /// Visit every flag-capable option in insertion order.
    pub fn visit_flags(&self, mut f: impl FnMut(&dyn FlagOpt)) {
        for opt in &self.options {
            if let Some(flag) = opt.as_flag() {
                f(flag);
            }
        }
    }

    /// The positional arguments accumulated by successful
    /// [`parse_flags`](OptionSet::parse_flags) calls.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Drain the accumulated positional arguments.
    pub fn take_args(&mut self) -> Vec<String> {
        std::mem::take(&mut self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Getter;

    #[test]
    fn find_long_flag_resolves_registered_options() {
        let mut set = OptionSet::new("test");
        let a = set.add_string("aflag", None, "aval", "ahelp");
        let b = set.add_string("bflag", None, "bval", "bhelp");

        let found = set.find_long_flag("aflag").unwrap();
        let got = found.as_getter().unwrap().get();
        assert_eq!(got.as_str().unwrap(), *a.borrow());

        let found = set.find_long_flag("bflag").unwrap();
        let got = found.as_getter().unwrap().get();
        assert_eq!(got.as_str().unwrap(), *b.borrow());
    }

    #[test]
    fn find_short_flag_resolves_registered_options() {
        let mut set = OptionSet::new("test");
        let a = set.add_string("aflag", Some('a'), "aval", "ahelp");
        set.add_string("bflag", Some('b'), "bval", "bhelp");

        let found = set.find_short_flag('a').unwrap();
        let got = found.as_getter().unwrap().get();
        assert_eq!(got.as_str().unwrap(), *a.borrow());
    }

    #[test]
    fn find_unknown_flags_yields_none() {
        let mut set = OptionSet::new("test");
        set.add_bool("verbose", None, false, "");
        assert!(set.find_long_flag("missing").is_none());
        assert!(set.find_short_flag('v').is_none());
    }

    #[test]
    fn duplicate_long_name_rejected() {
        let mut set = OptionSet::new("test");
        let (opt, _) = crate::options::BoolOpt::new("verbose", None, false, "");
        let (dup, _) = crate::options::BoolOpt::new("verbose", Some('v'), false, "");
        set.register(opt).unwrap();
        let err = set.register(dup).unwrap_err();
        assert!(matches!(err, UconfError::DuplicateFlag { flag } if flag == "verbose"));
        // the duplicate was not added, and lookups still hit the first registration
        assert!(set.find_short_flag('v').is_none());
    }

    #[test]
    fn duplicate_short_char_rejected() {
        let mut set = OptionSet::new("test");
        let (opt, _) = crate::options::BoolOpt::new("verbose", Some('v'), false, "");
        let (dup, _) = crate::options::BoolOpt::new("version", Some('v'), false, "");
        set.register(opt).unwrap();
        let err = set.register(dup).unwrap_err();
        assert!(matches!(err, UconfError::DuplicateShortFlag { flag: 'v' }));
        assert!(set.find_long_flag("version").is_none());
    }

    #[test]
    fn visit_preserves_insertion_order() {
        let mut set = OptionSet::new("test");
        set.add_bool("first", None, false, "");
        set.add_int("second", None, 0, "");
        set.add_string("third", None, "", "");

        let mut names = Vec::new();
        set.visit_flags(|f| names.push(f.flag().to_owned()));
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn take_args_drains() {
        let mut set = OptionSet::new("test");
        set.args = vec!["a".into(), "b".into()];
        assert_eq!(set.take_args(), ["a", "b"]);
        assert!(set.args().is_empty());
    }
}

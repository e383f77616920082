//! The built-in scalar option kinds: bool, int, uint, float, string, and the
//! special help flag.
//!
//! Each kind owns a shared value slot (`Rc<Cell<T>>`, or `Rc<RefCell<String>>`
//! for strings). The constructor returns one clone of the slot to the caller
//! and keeps another inside the option, so the caller can read the resolved
//! value at any time without going back through the registry. Slots are
//! pre-set to the default value at construction.
//!
//! All kinds expose the flag, env, TOML, and getter capabilities, except
//! [`HelpOpt`] which is flag-only: help has no business being set from a
//! config file or the environment.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::UconfError;
use crate::option::{EnvOpt, FlagOpt, Getter, Input, Setter, TomlOpt, env_name};
use crate::registry::OptionSet;

/// Render an input for a `TypeMismatch` error message.
fn describe(input: &Input<'_>) -> String {
    match input {
        Input::Text(s) => (*s).to_owned(),
        Input::Bool(b) => b.to_string(),
        Input::Toml(v) => v.to_string(),
    }
}

fn mismatch(expected: &'static str, input: &Input<'_>) -> UconfError {
    UconfError::TypeMismatch {
        expected,
        value: describe(input),
    }
}

/// Parse an integer literal with an optional sign and `0x`/`0o`/`0b` radix
/// prefix. Plain digits are decimal.
fn parse_int_text(s: &str) -> Option<i64> {
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = parse_uint_text(rest)?;
    let magnitude = i64::try_from(magnitude).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse an unsigned integer literal with an optional `0x`/`0o`/`0b` prefix.
fn parse_uint_text(s: &str) -> Option<u64> {
    let (radix, digits) = if let Some(d) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (16, d)
    } else if let Some(d) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        (8, d)
    } else if let Some(d) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (2, d)
    } else {
        (10, s)
    };
    u64::from_str_radix(digits, radix).ok()
}

macro_rules! flag_capabilities {
    () => {
        fn as_flag(&self) -> Option<&dyn FlagOpt> {
            Some(self)
        }
        fn as_env(&self) -> Option<&dyn EnvOpt> {
            Some(self)
        }
        fn as_toml(&self) -> Option<&dyn TomlOpt> {
            Some(self)
        }
        fn as_getter(&self) -> Option<&dyn Getter> {
            Some(self)
        }
    };
}

macro_rules! impl_flag_identity {
    ($ty:ident, boolean: $boolean:expr) => {
        impl FlagOpt for $ty {
            fn flag(&self) -> &str {
                &self.name
            }
            fn short_flag(&self) -> Option<char> {
                self.short
            }
            fn is_boolean(&self) -> bool {
                $boolean
            }
            fn help(&self) -> &str {
                &self.help
            }
        }

        impl EnvOpt for $ty {
            fn env_key(&self) -> String {
                env_name(&self.name)
            }
        }

        impl TomlOpt for $ty {
            fn toml_key(&self) -> &str {
                &self.name
            }
        }
    };
}

// ---- bool

pub struct BoolOpt {
    name: String,
    short: Option<char>,
    help: String,
    value: Rc<Cell<bool>>,
}

impl BoolOpt {
    pub fn new(
        name: impl Into<String>,
        short: Option<char>,
        default: bool,
        help: impl Into<String>,
    ) -> (Rc<Self>, Rc<Cell<bool>>) {
        let value = Rc::new(Cell::new(default));
        let opt = Rc::new(BoolOpt {
            name: name.into(),
            short,
            help: help.into(),
            value: Rc::clone(&value),
        });
        (opt, value)
    }
}

impl Setter for BoolOpt {
    fn set(&self, input: Input<'_>) -> Result<(), UconfError> {
        match input {
            Input::Text(s) if s.eq_ignore_ascii_case("true") => self.value.set(true),
            Input::Text(s) if s.eq_ignore_ascii_case("false") => self.value.set(false),
            Input::Bool(b) => self.value.set(b),
            Input::Toml(toml::Value::Boolean(b)) => self.value.set(*b),
            other => return Err(mismatch("bool", &other)),
        }
        Ok(())
    }

    flag_capabilities!();
}

impl_flag_identity!(BoolOpt, boolean: true);

impl Getter for BoolOpt {
    fn get(&self) -> toml::Value {
        toml::Value::Boolean(self.value.get())
    }
}

// ---- int

pub struct IntOpt {
    name: String,
    short: Option<char>,
    help: String,
    value: Rc<Cell<i64>>,
}

impl IntOpt {
    pub fn new(
        name: impl Into<String>,
        short: Option<char>,
        default: i64,
        help: impl Into<String>,
    ) -> (Rc<Self>, Rc<Cell<i64>>) {
        let value = Rc::new(Cell::new(default));
        let opt = Rc::new(IntOpt {
            name: name.into(),
            short,
            help: help.into(),
            value: Rc::clone(&value),
        });
        (opt, value)
    }
}

impl Setter for IntOpt {
    fn set(&self, input: Input<'_>) -> Result<(), UconfError> {
        match input {
            Input::Text(s) => match parse_int_text(s) {
                Some(i) => self.value.set(i),
                None => return Err(mismatch("int", &input)),
            },
            Input::Toml(toml::Value::Integer(i)) => self.value.set(*i),
            // truncates toward zero
            Input::Toml(toml::Value::Float(f)) => self.value.set(*f as i64),
            other => return Err(mismatch("int", &other)),
        }
        Ok(())
    }

    flag_capabilities!();
}

impl_flag_identity!(IntOpt, boolean: false);

impl Getter for IntOpt {
    fn get(&self) -> toml::Value {
        toml::Value::Integer(self.value.get())
    }
}

// ---- uint

pub struct UintOpt {
    name: String,
    short: Option<char>,
    help: String,
    value: Rc<Cell<u64>>,
}

impl UintOpt {
    pub fn new(
        name: impl Into<String>,
        short: Option<char>,
        default: u64,
        help: impl Into<String>,
    ) -> (Rc<Self>, Rc<Cell<u64>>) {
        let value = Rc::new(Cell::new(default));
        let opt = Rc::new(UintOpt {
            name: name.into(),
            short,
            help: help.into(),
            value: Rc::clone(&value),
        });
        (opt, value)
    }
}

impl Setter for UintOpt {
    fn set(&self, input: Input<'_>) -> Result<(), UconfError> {
        match input {
            Input::Text(s) => match parse_uint_text(s) {
                Some(u) => self.value.set(u),
                None => return Err(mismatch("uint", &input)),
            },
            Input::Toml(toml::Value::Integer(i)) => match u64::try_from(*i) {
                Ok(u) => self.value.set(u),
                Err(_) => return Err(mismatch("uint", &input)),
            },
            other => return Err(mismatch("uint", &other)),
        }
        Ok(())
    }

    flag_capabilities!();
}

impl_flag_identity!(UintOpt, boolean: false);

impl Getter for UintOpt {
    fn get(&self) -> toml::Value {
        let v = self.value.get();
        match i64::try_from(v) {
            Ok(i) => toml::Value::Integer(i),
            Err(_) => toml::Value::String(v.to_string()),
        }
    }
}

// ---- float

pub struct FloatOpt {
    name: String,
    short: Option<char>,
    help: String,
    value: Rc<Cell<f64>>,
}

impl FloatOpt {
    pub fn new(
        name: impl Into<String>,
        short: Option<char>,
        default: f64,
        help: impl Into<String>,
    ) -> (Rc<Self>, Rc<Cell<f64>>) {
        let value = Rc::new(Cell::new(default));
        let opt = Rc::new(FloatOpt {
            name: name.into(),
            short,
            help: help.into(),
            value: Rc::clone(&value),
        });
        (opt, value)
    }
}

impl Setter for FloatOpt {
    fn set(&self, input: Input<'_>) -> Result<(), UconfError> {
        match input {
            Input::Text(s) => match s.parse::<f64>() {
                Ok(f) => self.value.set(f),
                Err(_) => return Err(mismatch("float", &input)),
            },
            Input::Toml(toml::Value::Float(f)) => self.value.set(*f),
            Input::Toml(toml::Value::Integer(i)) => self.value.set(*i as f64),
            other => return Err(mismatch("float", &other)),
        }
        Ok(())
    }

    flag_capabilities!();
}

impl_flag_identity!(FloatOpt, boolean: false);

impl Getter for FloatOpt {
    fn get(&self) -> toml::Value {
        toml::Value::Float(self.value.get())
    }
}

// ---- string

pub struct StringOpt {
    name: String,
    short: Option<char>,
    help: String,
    value: Rc<RefCell<String>>,
}

impl StringOpt {
    pub fn new(
        name: impl Into<String>,
        short: Option<char>,
        default: impl Into<String>,
        help: impl Into<String>,
    ) -> (Rc<Self>, Rc<RefCell<String>>) {
        let value = Rc::new(RefCell::new(default.into()));
        let opt = Rc::new(StringOpt {
            name: name.into(),
            short,
            help: help.into(),
            value: Rc::clone(&value),
        });
        (opt, value)
    }
}

impl Setter for StringOpt {
    /// String options accept anything: text verbatim, other inputs rendered.
    fn set(&self, input: Input<'_>) -> Result<(), UconfError> {
        let s = match input {
            Input::Text(s) => s.to_owned(),
            Input::Bool(b) => b.to_string(),
            Input::Toml(toml::Value::String(s)) => s.clone(),
            Input::Toml(v) => v.to_string(),
        };
        *self.value.borrow_mut() = s;
        Ok(())
    }

    flag_capabilities!();
}

impl_flag_identity!(StringOpt, boolean: false);

impl Getter for StringOpt {
    fn get(&self) -> toml::Value {
        toml::Value::String(self.value.borrow().clone())
    }
}

// ---- help

/// The `--help`/`-h` flag. Identity is fixed, and the only accepted input is
/// the parser's own auto-true boolean — `--help=true` or an env/TOML value
/// would be nonsense, so the env, TOML, and getter capabilities are absent.
pub struct HelpOpt {
    value: Rc<Cell<bool>>,
}

impl HelpOpt {
    pub fn new() -> (Rc<Self>, Rc<Cell<bool>>) {
        let value = Rc::new(Cell::new(false));
        let opt = Rc::new(HelpOpt {
            value: Rc::clone(&value),
        });
        (opt, value)
    }
}

impl Setter for HelpOpt {
    fn set(&self, input: Input<'_>) -> Result<(), UconfError> {
        match input {
            Input::Bool(b) => {
                self.value.set(b);
                Ok(())
            }
            other => Err(mismatch("bool", &other)),
        }
    }

    fn as_flag(&self) -> Option<&dyn FlagOpt> {
        Some(self)
    }
}

impl FlagOpt for HelpOpt {
    fn flag(&self) -> &str {
        "help"
    }
    fn short_flag(&self) -> Option<char> {
        Some('h')
    }
    fn is_boolean(&self) -> bool {
        true
    }
    fn help(&self) -> &str {
        "view this help message"
    }
}

// ---- OptionSet integration

impl OptionSet {
    fn must_register(&mut self, opt: Rc<dyn Setter>) {
        if let Err(e) = self.register(opt) {
            panic!("option registration failed: {e}");
        }
    }

    /// Register a boolean flag and return a handle to its value slot.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `short` is already registered — duplicate
    /// registration is a programming error. Use
    /// [`register`](OptionSet::register) to handle the error instead.
    pub fn add_bool(
        &mut self,
        name: &str,
        short: Option<char>,
        default: bool,
        help: &str,
    ) -> Rc<Cell<bool>> {
        let (opt, value) = BoolOpt::new(name, short, default, help);
        self.must_register(opt);
        value
    }

    /// Register an integer flag and return a handle to its value slot.
    ///
    /// # Panics
    ///
    /// Panics on duplicate registration, like [`add_bool`](OptionSet::add_bool).
    pub fn add_int(
        &mut self,
        name: &str,
        short: Option<char>,
        default: i64,
        help: &str,
    ) -> Rc<Cell<i64>> {
        let (opt, value) = IntOpt::new(name, short, default, help);
        self.must_register(opt);
        value
    }

    /// Register an unsigned integer flag and return a handle to its value slot.
    ///
    /// # Panics
    ///
    /// Panics on duplicate registration, like [`add_bool`](OptionSet::add_bool).
    pub fn add_uint(
        &mut self,
        name: &str,
        short: Option<char>,
        default: u64,
        help: &str,
    ) -> Rc<Cell<u64>> {
        let (opt, value) = UintOpt::new(name, short, default, help);
        self.must_register(opt);
        value
    }

    /// Register a float flag and return a handle to its value slot.
    ///
    /// # Panics
    ///
    /// Panics on duplicate registration, like [`add_bool`](OptionSet::add_bool).
    pub fn add_float(
        &mut self,
        name: &str,
        short: Option<char>,
        default: f64,
        help: &str,
    ) -> Rc<Cell<f64>> {
        let (opt, value) = FloatOpt::new(name, short, default, help);
        self.must_register(opt);
        value
    }

    /// Register a string flag and return a handle to its value slot.
    ///
    /// # Panics
    ///
    /// Panics on duplicate registration, like [`add_bool`](OptionSet::add_bool).
    pub fn add_string(
        &mut self,
        name: &str,
        short: Option<char>,
        default: &str,
        help: &str,
    ) -> Rc<RefCell<String>> {
        let (opt, value) = StringOpt::new(name, short, default, help);
        self.must_register(opt);
        value
    }

    /// Register the `--help`/`-h` flag and return a handle to its value.
    /// [`parse`](OptionSet::parse) prints usage when the handle is true.
    ///
    /// # Panics
    ///
    /// Panics if `help` or `h` is already registered.
    pub fn add_help(&mut self) -> Rc<Cell<bool>> {
        let (opt, value) = HelpOpt::new();
        self.must_register(opt);
        self.help = Some(Rc::clone(&value));
        value
    }
}

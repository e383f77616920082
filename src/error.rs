use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UconfError {
    /// A non-boolean flag reached the end of the scan, or was superseded by
    /// another flag, without ever receiving a value.
    #[error("missing value for flag '{flag}'")]
    MissingValue { flag: String },

    /// A flag's `set` rejected the raw value supplied on the command line.
    #[error("failed to set flag '{flag}' to '{value}'")]
    SetFailed { flag: String, value: String },

    /// A value could not be coerced to the option's kind. Returned by the
    /// [`Setter`](crate::Setter) implementations themselves.
    #[error("cannot coerce '{value}' to {expected}")]
    TypeMismatch { expected: &'static str, value: String },

    #[error("duplicate long flag '{flag}'")]
    DuplicateFlag { flag: String },

    #[error("duplicate short flag '-{flag}'")]
    DuplicateShortFlag { flag: char },

    #[error("failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

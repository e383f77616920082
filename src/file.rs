//! Setting options from TOML configuration files.
//!
//! An option's TOML key is its long flag name, resolved as a dotted query
//! against the parsed table (`db.url` reads `url` inside the `[db]` table).
//! Keys absent from a file are skipped — config files are sparse overlays,
//! and later files simply overwrite whatever earlier ones set. A present
//! value the option rejects does not stop the sweep; the last error wins.
//!
//! [`parse_std_toml`](OptionSet::parse_std_toml) walks the standard
//! per-platform file list in fixed order. Missing files are silently
//! skipped; other I/O errors are propagated.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::UconfError;
use crate::option::{Input, Setter, TomlOpt};
use crate::registry::OptionSet;

impl OptionSet {
    /// Apply a string of TOML data to every TOML-capable option.
    pub fn parse_toml_str(&self, content: &str) -> Result<(), UconfError> {
        let table: Table = toml::from_str(content)?;
        self.apply_table(&table)
    }

    /// Read and apply one TOML file. Unlike
    /// [`parse_std_toml`](OptionSet::parse_std_toml), a missing file is an
    /// error here — the caller asked for this file specifically.
    pub fn parse_toml_file(&self, path: impl AsRef<Path>) -> Result<(), UconfError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| UconfError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table: Table = toml::from_str(&content).map_err(|e| UconfError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.apply_table(&table)
    }

    /// Apply the standard configuration files for the platform, lowest
    /// priority first:
    ///
    /// ```text
    /// /etc/{app}.toml
    /// /etc/{app}/config.toml
    /// ~/.{app}rc
    /// {config_dir}/{app}.toml
    /// {config_dir}/{app}/config.toml
    /// ```
    ///
    /// Missing files are skipped. If a file fails to parse or a value fails
    /// to apply, the remaining files are not visited.
    pub fn parse_std_toml(&self) -> Result<(), UconfError> {
        for path in self.std_toml_paths() {
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(UconfError::IoError { path, source: e }),
            };
            let table: Table =
                toml::from_str(&content).map_err(|e| UconfError::ParseError { path, source: e })?;
            self.apply_table(&table)?;
        }
        Ok(())
    }

    fn std_toml_paths(&self) -> Vec<PathBuf> {
        let app = self.app_name();
        let mut paths = vec![
            PathBuf::from("/etc").join(format!("{app}.toml")),
            PathBuf::from("/etc").join(app).join("config.toml"),
        ];
        if let Some(dirs) = directories::BaseDirs::new() {
            paths.push(dirs.home_dir().join(format!(".{app}rc")));
            paths.push(dirs.config_dir().join(format!("{app}.toml")));
            paths.push(dirs.config_dir().join(app).join("config.toml"));
        }
        paths
    }

    fn apply_table(&self, table: &Table) -> Result<(), UconfError> {
        let mut last_err = None;
        self.visit(|opt| {
            let Some(toml_opt) = opt.as_toml() else {
                return;
            };
            let Some(value) = lookup_dotted(table, toml_opt.toml_key()) else {
                return;
            };
            if let Err(e) = opt.set(Input::Toml(value)) {
                last_err = Some(e);
            }
        });
        match last_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Resolve a dotted key against nested tables: `a.b.c` reads `c` from the
/// table at `a.b`. Any segment that is absent or not a table yields `None`.
fn lookup_dotted<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    let mut segments = key.split('.');
    let mut current = table.get(segments.next()?)?;
    for segment in segments {
        current = current.as_table()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_keys_apply() {
        let mut set = OptionSet::new("test");
        let host = set.add_string("host", None, "", "");
        let port = set.add_int("port", None, 0, "");
        set.parse_toml_str("host = \"example\"\nport = 8080\n")
            .unwrap();
        assert_eq!(*host.borrow(), "example");
        assert_eq!(port.get(), 8080);
    }

    #[test]
    fn dotted_keys_read_nested_tables() {
        let mut set = OptionSet::new("test");
        let url = set.add_string("db.url", None, "", "");
        let size = set.add_int("db.pool.size", None, 0, "");
        set.parse_toml_str("[db]\nurl = \"pg://x\"\n[db.pool]\nsize = 20\n")
            .unwrap();
        assert_eq!(*url.borrow(), "pg://x");
        assert_eq!(size.get(), 20);
    }

    #[test]
    fn absent_keys_keep_defaults() {
        let mut set = OptionSet::new("test");
        let port = set.add_int("port", None, 8080, "");
        set.parse_toml_str("host = \"x\"\n").unwrap();
        assert_eq!(port.get(), 8080);
    }

    #[test]
    fn scalar_in_the_middle_of_a_dotted_key_is_skipped() {
        let mut set = OptionSet::new("test");
        let url = set.add_string("db.url", None, "default", "");
        set.parse_toml_str("db = \"flat\"\n").unwrap();
        assert_eq!(*url.borrow(), "default");
    }

    #[test]
    fn wrong_typed_value_reports_but_continues() {
        let mut set = OptionSet::new("test");
        let port = set.add_int("port", None, 0, "");
        let host = set.add_string("host", None, "", "");
        let err = set
            .parse_toml_str("port = \"eighty\"\nhost = \"h\"\n")
            .unwrap_err();
        assert!(matches!(err, UconfError::TypeMismatch { .. }));
        assert_eq!(*host.borrow(), "h");
        assert_eq!(port.get(), 0);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let set = OptionSet::new("test");
        assert!(matches!(
            set.parse_toml_str("not valid ="),
            Err(UconfError::TomlError(_))
        ));
    }

    #[test]
    fn later_files_overwrite_earlier() {
        let mut set = OptionSet::new("test");
        let port = set.add_int("port", None, 0, "");
        set.parse_toml_str("port = 1000\n").unwrap();
        set.parse_toml_str("port = 2000\n").unwrap();
        assert_eq!(port.get(), 2000);
    }

    #[test]
    fn parse_toml_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        std::fs::write(&path, "n = 7\n").unwrap();

        let mut set = OptionSet::new("test");
        let n = set.add_int("n", None, 0, "");
        set.parse_toml_file(&path).unwrap();
        assert_eq!(n.get(), 7);
    }

    #[test]
    fn parse_toml_file_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let set = OptionSet::new("test");
        let err = set
            .parse_toml_file(dir.path().join("absent.toml"))
            .unwrap_err();
        assert!(matches!(err, UconfError::IoError { .. }));
    }

    #[test]
    fn parse_toml_file_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "x = = =\n").unwrap();

        let set = OptionSet::new("test");
        let err = set.parse_toml_file(&path).unwrap_err();
        assert!(matches!(err, UconfError::ParseError { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn lookup_dotted_walks_tables() {
        let table: Table = "[a]\n[a.b]\nc = 1\n".parse().unwrap();
        assert_eq!(lookup_dotted(&table, "a.b.c").unwrap().as_integer(), Some(1));
        assert!(lookup_dotted(&table, "a.b.missing").is_none());
        assert!(lookup_dotted(&table, "a.b.c.d").is_none());
    }
}

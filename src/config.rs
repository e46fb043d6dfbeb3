//! @ai:module:intent Scan configuration loaded from TOML
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config, Excludes
//! @ai:module:depends_on filetype, slice, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::filetype::FileTypeTable;
use crate::slice::Whitespace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Everything that tunes a scan, with defaults matching the built-in behavior
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Which bytes are trimmed around markers and descriptions.
    #[serde(default)]
    pub whitespace: Whitespace,
    /// Skip files whose type is not in the table instead of scanning them as plain text.
    #[serde(default)]
    pub known_only: bool,
    /// Regular expressions matched against walked paths; matches are pruned.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub file_types: FileTypeTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            whitespace: Whitespace::default(),
            known_only: false,
            exclude: default_exclude(),
            file_types: FileTypeTable::default(),
        }
    }
}

fn default_exclude() -> Vec<String> {
    vec![r"(^|/)\.git$".to_string()]
}

impl Config {
    /// @ai:intent Load a config file
    /// @ai:pre path points at a TOML document
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// @ai:intent Render the config as TOML, e.g. to seed a config file
    /// @ai:effects pure
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// @ai:intent Compile the exclude patterns
    /// @ai:effects pure
    pub fn excludes(&self) -> Result<Excludes> {
        Excludes::new(&self.exclude)
    }
}

/// @ai:intent Compiled path exclusion patterns
#[derive(Debug, Clone, Default)]
pub struct Excludes {
    patterns: Vec<Regex>,
}

impl Excludes {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| Error::InvalidPattern {
                    pattern: pattern.clone(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// @ai:intent Check a path against every pattern, using `/` separators
    /// @ai:pre path is relative to the scan root, so ancestors of the root never match
    /// @ai:effects pure
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let path = path.to_string_lossy().replace('\\', "/");
        self.patterns.iter().any(|re| re.is_match(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filetype::FileType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_gives_defaults() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_overrides() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r##"whitespace = "blank"
known_only = true
exclude = ["vendor"]

[[file_types]]
file_type = "python"
marker = "#"
suffixes = [".py", ".pyw"]

[[file_types]]
file_type = "plain_text"
suffixes = [".md"]
"##
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.whitespace, Whitespace::Blank);
        assert!(config.known_only);
        assert_eq!(config.exclude, vec!["vendor".to_string()]);
        assert_eq!(config.file_types.entries().len(), 2);
        assert_eq!(config.file_types.classify("gui.pyw"), FileType::Python);
        assert_eq!(config.file_types.classify("lib.rs"), FileType::Unknown);
        assert_eq!(config.file_types.comment_marker(FileType::PlainText), "");
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "whitespace = 3").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load(Path::new("/definitely/not/here.toml")),
            Err(Error::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_default_excludes_git() {
        let excludes = Config::default().excludes().unwrap();
        assert!(excludes.is_excluded(Path::new("repo/.git")));
        assert!(excludes.is_excluded(Path::new(".git")));
        assert!(!excludes.is_excluded(Path::new("repo/.github")));
        assert!(!excludes.is_excluded(Path::new("repo/src/git.rs")));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Excludes::new(&["(unclosed".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }
}

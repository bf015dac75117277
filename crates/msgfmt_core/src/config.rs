use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::ConfigError;

static DEFAULT_CONFIG_TOML: &str = include_str!("default_config.toml");

static COMPILED_DEFAULT: LazyLock<Config> = LazyLock::new(|| {
    toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml is validated by build.rs")
});

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub normalize: NormalizeConfig,
    pub completion: CompletionConfig,
}

/// A literal broken-token → corrected-token substitution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repair {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Ordered repair dictionary. Earlier entries win over later ones.
    pub repairs: Vec<Repair>,
    /// Capitalized words the prefix-join heuristic never glues to the next word.
    pub join_exclusions: Vec<String>,
    /// Keep word repairs out of `` `code` `` spans.
    pub protect_code_spans: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            repairs: Vec::new(),
            join_exclusions: Vec::new(),
            protect_code_spans: true,
        }
    }
}

impl NormalizeConfig {
    pub(crate) fn is_join_excluded(&self, word: &str) -> bool {
        self.join_exclusions.iter().any(|w| w == word)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub keywords: Vec<String>,
}

/// On-disk shape of a user config: every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    normalize: Option<NormalizeConfig>,
    completion: Option<CompletionConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self::compiled_default().clone()
    }
}

impl Config {
    /// The configuration bundled with the library.
    pub fn compiled_default() -> &'static Config {
        &COMPILED_DEFAULT
    }

    /// Parse a TOML config. Sections missing from `content` keep their compiled defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let base = Self::compiled_default();
        Ok(Self {
            normalize: file.normalize.unwrap_or_else(|| base.normalize.clone()),
            completion: file.completion.unwrap_or_else(|| base.completion.clone()),
        })
    }

    /// Load config from a TOML file, failing on unreadable or invalid files.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => {
                log::debug!("no config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_has_both_sections() {
        let config = Config::compiled_default();
        assert!(!config.normalize.repairs.is_empty());
        assert!(config.normalize.protect_code_spans);
        assert!(config.completion.keywords.iter().any(|k| k == "selesai"));
        assert!(!config.normalize.is_join_excluded("The"));
    }

    #[test]
    fn partial_file_keeps_other_sections() {
        let config = Config::from_toml_str("[completion]\nkeywords = [\"fertig\"]\n").unwrap();
        assert_eq!(config.completion.keywords, vec!["fertig".to_string()]);
        assert_eq!(
            config.normalize.repairs,
            Config::compiled_default().normalize.repairs
        );
    }

    #[test]
    fn normalize_section_fields_default_individually() {
        let config = Config::from_toml_str(
            "[[normalize.repairs]]\nfrom = \"fo o\"\nto = \"foo\"\n",
        )
        .unwrap();
        assert_eq!(config.normalize.repairs.len(), 1);
        assert!(config.normalize.protect_code_spans);
        assert!(config.normalize.join_exclusions.is_empty());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[normalize\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/msgfmt/config.toml"));
        assert_eq!(
            config.completion.keywords,
            Config::compiled_default().completion.keywords
        );
    }
}

//! Configuration management for Quire.
//!
//! Parses `quire.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `module_name`
//! - `source_sets.declarations` and `source_sets.includes` (also `~`)
//! - `external_links.url`
//! - `external_links.package_list` (also `~`)

mod expand;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override module name.
    pub module_name: Option<String>,
    /// Override output link extension.
    pub extension: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the documented module, used in package lists.
    pub module_name: String,
    /// Output configuration.
    pub output: OutputConfig,
    /// Source sets in declared order (paths are relative strings from TOML).
    source_sets: Vec<SourceSetConfigRaw>,
    /// External documentation links (paths are relative strings from TOML).
    external_links: Vec<ExternalLinkConfigRaw>,

    /// Resolved source sets (set after loading).
    #[serde(skip)]
    pub source_sets_resolved: Vec<SourceSetConfig>,
    /// Resolved external links (set after loading).
    #[serde(skip)]
    pub external_links_resolved: Vec<ExternalLinkConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module_name: "root".to_owned(),
            output: OutputConfig::default(),
            source_sets: Vec::new(),
            external_links: Vec::new(),
            source_sets_resolved: Vec::new(),
            external_links_resolved: Vec::new(),
            config_path: None,
        }
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Extension of page links, with leading dot. Empty for none.
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: ".html".to_owned(),
        }
    }
}

/// Raw source set configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize)]
struct SourceSetConfigRaw {
    name: String,
    declarations: String,
    #[serde(default)]
    includes: Vec<String>,
}

/// Resolved source set configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSetConfig {
    /// Source set name (e.g. `jvm`).
    pub name: String,
    /// JSON file with the source set's declaration tree.
    pub declarations: PathBuf,
    /// Markdown include files with module and package documentation.
    pub includes: Vec<PathBuf>,
}

/// Raw external link configuration as parsed from TOML.
#[derive(Debug, Deserialize)]
struct ExternalLinkConfigRaw {
    url: String,
    package_list: String,
}

/// Resolved external documentation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLinkConfig {
    /// Base URL of the external documentation.
    pub url: String,
    /// Package list published with the external documentation.
    pub package_list: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`external_links.url`").
        field: String,
        /// Error message (e.g., "${`DOCS_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quire.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(module_name) = &settings.module_name {
            self.module_name.clone_from(module_name);
        }
        if let Some(extension) = &settings.extension {
            self.output.extension.clone_from(extension);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.module_name, "module_name")?;
        self.validate_output()?;
        self.validate_source_sets()?;
        self.validate_external_links()?;
        Ok(())
    }

    fn validate_output(&self) -> Result<(), ConfigError> {
        let extension = &self.output.extension;
        if !extension.is_empty() && !extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "output.extension must be empty or start with '.', got '{extension}'"
            )));
        }
        Ok(())
    }

    fn validate_source_sets(&self) -> Result<(), ConfigError> {
        if self.source_sets_resolved.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[source_sets]] entry is required".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for source_set in &self.source_sets_resolved {
            require_non_empty(&source_set.name, "source_sets.name")?;
            if !seen.insert(source_set.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "source set '{}' is declared more than once",
                    source_set.name
                )));
            }
        }
        Ok(())
    }

    fn validate_external_links(&self) -> Result<(), ConfigError> {
        for link in &self.external_links_resolved {
            require_non_empty(&link.url, "external_links.url")?;
            require_http_url(&link.url, "external_links.url")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.module_name = expand::expand_env(&self.module_name, "module_name")?;

        for source_set in &mut self.source_sets {
            source_set.declarations =
                expand::expand_path(&source_set.declarations, "source_sets.declarations")?;
            for include in &mut source_set.includes {
                *include = expand::expand_path(include, "source_sets.includes")?;
            }
        }

        for link in &mut self.external_links {
            link.url = expand::expand_env(&link.url, "external_links.url")?;
            link.package_list =
                expand::expand_path(&link.package_list, "external_links.package_list")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.source_sets_resolved = self
            .source_sets
            .iter()
            .map(|raw| SourceSetConfig {
                name: raw.name.clone(),
                declarations: config_dir.join(&raw.declarations),
                includes: raw.includes.iter().map(|p| config_dir.join(p)).collect(),
            })
            .collect();

        self.external_links_resolved = self
            .external_links
            .iter()
            .map(|raw| ExternalLinkConfig {
                url: raw.url.clone(),
                package_list: config_dir.join(&raw.package_list),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FULL: &str = r#"
module_name = "core"

[output]
extension = ".md"

[[source_sets]]
name = "jvm"
declarations = "build/jvm.json"
includes = ["docs/Module.md"]

[[source_sets]]
name = "js"
declarations = "/abs/js.json"

[[external_links]]
url = "https://example.org/stdlib/"
package_list = "stdlib/package-list"
"#;

    fn parsed(toml: &str) -> Config {
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config
    }

    fn assert_validation_error(config: &Config, needles: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let message = err.to_string();
        for needle in needles {
            assert!(message.contains(needle), "'{message}' should mention '{needle}'");
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.module_name, "root");
        assert_eq!(config.output.extension, ".html");
        assert!(config.source_sets_resolved.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.module_name, "root");
        assert_eq!(config.output.extension, ".html");
    }

    #[test]
    fn test_resolve_paths() {
        let config = parsed(FULL);

        assert_eq!(config.module_name, "core");
        assert_eq!(config.output.extension, ".md");
        assert_eq!(
            config.source_sets_resolved,
            vec![
                SourceSetConfig {
                    name: "jvm".to_owned(),
                    declarations: PathBuf::from("/project/build/jvm.json"),
                    includes: vec![PathBuf::from("/project/docs/Module.md")],
                },
                SourceSetConfig {
                    name: "js".to_owned(),
                    declarations: PathBuf::from("/abs/js.json"),
                    includes: Vec::new(),
                },
            ]
        );
        assert_eq!(
            config.external_links_resolved,
            vec![ExternalLinkConfig {
                url: "https://example.org/stdlib/".to_owned(),
                package_list: PathBuf::from("/project/stdlib/package-list"),
            }]
        );
    }

    #[test]
    fn test_source_set_requires_declarations() {
        let toml = r#"
[[source_sets]]
name = "jvm"
"#;
        let result: Result<Config, _> = toml::from_str(toml);

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_full_config_passes() {
        assert!(parsed(FULL).validate().is_ok());
    }

    #[test]
    fn test_validate_requires_source_set() {
        assert_validation_error(&Config::default(), &["source_sets"]);
    }

    #[test]
    fn test_validate_duplicate_source_set() {
        let toml = r#"
[[source_sets]]
name = "jvm"
declarations = "a.json"

[[source_sets]]
name = "jvm"
declarations = "b.json"
"#;
        assert_validation_error(&parsed(toml), &["jvm", "more than once"]);
    }

    #[test]
    fn test_validate_empty_source_set_name() {
        let toml = r#"
[[source_sets]]
name = ""
declarations = "a.json"
"#;
        assert_validation_error(&parsed(toml), &["source_sets.name", "empty"]);
    }

    #[test]
    fn test_validate_extension_without_dot() {
        let mut config = parsed(FULL);
        config.output.extension = "html".to_owned();
        assert_validation_error(&config, &["output.extension"]);
    }

    #[test]
    fn test_validate_empty_extension_allowed() {
        let mut config = parsed(FULL);
        config.output.extension = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_external_link_invalid_scheme() {
        let toml = r#"
[[source_sets]]
name = "jvm"
declarations = "a.json"

[[external_links]]
url = "ftp://example.org/"
package_list = "package-list"
"#;
        assert_validation_error(&parsed(toml), &["external_links.url", "http"]);
    }

    #[test]
    fn test_validate_empty_module_name() {
        let mut config = parsed(FULL);
        config.module_name = String::new();
        assert_validation_error(&config, &["module_name", "empty"]);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = parsed(FULL);
        let overrides = CliSettings {
            module_name: Some("io".to_owned()),
            extension: Some(String::new()),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.module_name, "io");
        assert_eq!(config.output.extension, "");
        assert_eq!(config.source_sets_resolved.len(), 2); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = parsed(FULL);

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.module_name, "core");
        assert_eq!(config.output.extension, ".md");
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUIRE_TEST_DOCS_URL", "https://docs.test.com/");
            std::env::set_var("QUIRE_TEST_BUILD", "out");
        }

        let toml = r#"
module_name = "${QUIRE_TEST_MODULE:-core}"

[[source_sets]]
name = "jvm"
declarations = "${QUIRE_TEST_BUILD}/jvm.json"

[[external_links]]
url = "${QUIRE_TEST_DOCS_URL}"
package_list = "package-list"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.module_name, "core");
        assert_eq!(
            config.source_sets_resolved[0].declarations,
            PathBuf::from("/project/out/jvm.json")
        );
        assert_eq!(config.external_links_resolved[0].url, "https://docs.test.com/");

        unsafe {
            std::env::remove_var("QUIRE_TEST_DOCS_URL");
            std::env::remove_var("QUIRE_TEST_BUILD");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_QUIRE_CONFIG_TEST");
        }

        let toml = r#"
[[external_links]]
url = "${MISSING_VAR_QUIRE_CONFIG_TEST}"
package_list = "package-list"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_QUIRE_CONFIG_TEST"));
        assert!(err.to_string().contains("external_links.url"));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path, Some(path));
        assert_eq!(
            config.source_sets_resolved[0].declarations,
            dir.path().join("build/jvm.json")
        );
    }

    #[test]
    fn test_load_applies_cli_settings_before_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL).unwrap();
        let overrides = CliSettings {
            extension: Some("txt".to_owned()),
            ..Default::default()
        };

        let result = Config::load(Some(&path), Some(&overrides));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "module_name = [").unwrap();

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

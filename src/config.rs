use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::concept::LanguageContext;
use crate::dom::MountOptions;
use crate::error::Error;
use crate::filter::SupportedTypes;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub language: LanguageConfig,
    pub filter: FilterConfig,
    pub render: RenderConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub active: String,
    pub fallbacks: Vec<String>,
    pub fallback_to_any: bool,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            active: "fi".to_string(),
            fallbacks: vec!["en".to_string(), "sv".to_string()],
            fallback_to_any: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub supported: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            supported: ["document", "paragraph", "link", "text"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub popover_trigger: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            popover_trigger: "mouseenter:mouseleave".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "termdown=info".to_string(),
        }
    }
}

impl Config {
    /// The config bundled with the crate (validated by build.rs).
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    /// A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        match Self::from_path(path) {
            Err(Error::Io { .. }) => Ok(Self::compiled_default()),
            result => result,
        }
    }

    /// Load config from a TOML file, failing if it is missing or invalid.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn language_context(&self) -> LanguageContext {
        LanguageContext {
            active: self.language.active.clone(),
            fallbacks: self.language.fallbacks.clone(),
            fallback_to_any: self.language.fallback_to_any,
        }
    }

    pub fn supported_types(&self) -> SupportedTypes {
        SupportedTypes::new(self.filter.supported.iter().cloned())
    }

    pub fn mount_options(&self) -> MountOptions {
        MountOptions {
            language: self.language_context(),
            popover_trigger: self.render.popover_trigger.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_bundled_file() {
        let config = Config::compiled_default();
        assert_eq!(config.language.active, "fi");
        assert_eq!(config.language.fallbacks, ["en", "sv"]);
        assert_eq!(config.supported_types(), SupportedTypes::default());
        assert_eq!(config.render.popover_trigger, "mouseenter:mouseleave");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[language]\nactive = \"en\"\n").unwrap();
        assert_eq!(config.language.active, "en");
        assert!(config.language.fallback_to_any);
        assert_eq!(config.log.level, "termdown=info");
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let config = Config::load(Path::new("/nonexistent/termdown.toml")).unwrap();
        assert_eq!(config.language.active, "fi");
        assert!(matches!(
            Config::from_path(Path::new("/nonexistent/termdown.toml")),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("termdown-config-{}.toml", std::process::id()));
        fs::write(&path, "[language\nactive = 1").unwrap();
        let result = Config::from_path(&path);
        let loaded = Config::load(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(Error::ConfigToml(_))));
        assert!(matches!(loaded, Err(Error::ConfigToml(_))));
    }
}

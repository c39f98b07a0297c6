use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use notemark_engine::env::DEFAULT_CONTENT_WIDTH;
pub use notemark_engine::io::NOTE_EXTENSION as DEFAULT_NOTE_EXTENSION;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value in config file at {config_path}: {message}")]
    ConfigValueError {
        config_path: PathBuf,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub notes_path: PathBuf,
    #[serde(default = "default_content_width")]
    pub content_width: u32,
    /// Extension of note files, without the dot.
    #[serde(default = "default_note_extension")]
    pub note_extension: String,
}

fn default_content_width() -> u32 {
    DEFAULT_CONTENT_WIDTH
}

fn default_note_extension() -> String {
    DEFAULT_NOTE_EXTENSION.to_string()
}

impl Config {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
            content_width: DEFAULT_CONTENT_WIDTH,
            note_extension: default_note_extension(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config
            .validate()
            .map_err(|message| ConfigError::ConfigValueError {
                config_path: config_path.to_path_buf(),
                message,
            })?;

        // Expand shell variables and tilde in the loaded notes path
        config.notes_path = Self::expand_path(&config.notes_path).unwrap_or(config.notes_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/notemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn validate(&self) -> Result<(), String> {
        if self.content_width == 0 {
            return Err("content_width must be greater than 0".to_string());
        }
        if self.note_extension.is_empty() || self.note_extension.starts_with('.') {
            return Err(format!(
                "note_extension must be a bare extension like \"{DEFAULT_NOTE_EXTENSION}\", got \"{}\"",
                self.note_extension
            ));
        }
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_file = dir.path().join("config.toml");
        std::fs::write(&config_file, content).unwrap();
        config_file
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/notemark/config.toml"));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "notes_path = \"/srv/notes\"\n");

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config, Config::new("/srv/notes"));
        assert_eq!(config.content_width, 588);
        assert_eq!(config.note_extension, "note");
    }

    #[test]
    fn test_defaults_match_the_engine() {
        let config = Config::new("/srv/notes");

        assert_eq!(
            config.content_width,
            notemark_engine::Environment::standalone().content_width
        );
        assert_eq!(config.note_extension, notemark_engine::io::NOTE_EXTENSION);
    }

    #[test]
    fn test_all_fields() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(
            &temp_dir,
            r#"
notes_path = "/srv/notes"
content_width = 720
note_extension = "txt"
"#,
        );

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.content_width, 720);
        assert_eq!(config.note_extension, "txt");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/test/path")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_notes_path_env_var_is_expanded_on_load() {
        unsafe {
            env::set_var("NOTEMARK_TEST_ROOT", "/custom/notes");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "notes_path = \"$NOTEMARK_TEST_ROOT/wiki\"\n");
        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.notes_path, PathBuf::from("/custom/notes/wiki"));

        unsafe {
            env::remove_var("NOTEMARK_TEST_ROOT");
        }
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        for path in ["/absolute/path", "relative/path"] {
            assert_eq!(Config::expand_path(Path::new(path)), Some(PathBuf::from(path)));
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from_path(temp_dir.path().join("nonexistent.toml")).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = write_config(&temp_dir, "notes_path = \n");

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        for content in [
            "notes_path = \"/n\"\ncontent_width = 0\n",
            "notes_path = \"/n\"\nnote_extension = \".note\"\n",
        ] {
            let config_file = write_config(&temp_dir, content);
            let err = Config::load_from_path(&config_file).unwrap_err();
            assert!(matches!(err, ConfigError::ConfigValueError { .. }), "{content}");
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut test_config = Config::new("/tmp/test-notes");
        test_config.content_width = 640;

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}

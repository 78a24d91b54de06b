use crate::constants::{
    DEFAULT_API_BASE_URL, KEY_API_KEY, KEY_BASE_URL, KEY_DALLE_MODEL, KEY_IMAGE_FOLDER,
    KEY_MAX_TOKENS, KEY_NUM_IMAGES, KEY_SIZE, KEY_TEXT_MODEL, REQUIRED_API_KEYS, SECTION_API,
    SECTION_SETTINGS,
};
use crate::error::ConfigError;
use config::{Config, File, FileFormat};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

type Sections = HashMap<String, HashMap<String, String>>;

/// Parsed contents of the INI configuration file.
///
/// Values are kept as the strings found in the file. Section and key names are
/// lowercased so lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct Settings {
    sections: Sections,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = File::new(&path.as_ref().to_string_lossy(), FileFormat::Ini);
        let raw = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize::<Sections>()?;
        Self::from_sections(raw)
    }

    pub fn from_ini_str(contents: &str) -> Result<Self, ConfigError> {
        let raw = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Ini))
            .build()?
            .try_deserialize::<Sections>()?;
        Self::from_sections(raw)
    }

    /// Validates that every required `[API]` key is present.
    pub fn from_sections(raw: Sections) -> Result<Self, ConfigError> {
        let sections: Sections = raw
            .into_iter()
            .map(|(name, entries)| {
                let entries = entries
                    .into_iter()
                    .map(|(key, value)| (key.to_lowercase(), value))
                    .collect();
                (name.to_lowercase(), entries)
            })
            .collect();

        let api = sections.get(SECTION_API);
        let missing: Vec<String> = REQUIRED_API_KEYS
            .iter()
            .filter(|key| api.map_or(true, |entries| !entries.contains_key(**key)))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing));
        }

        Ok(Settings { sections })
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(&section.to_lowercase())
            .and_then(|entries| entries.get(&key.to_lowercase()))
            .map(String::as_str)
    }

    fn require(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.get(section, key)
            .ok_or_else(|| ConfigError::MissingSetting {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    fn require_number<T>(&self, section: &str, key: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        let value = self.require(section, key)?;
        value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidNumber {
                key: key.to_string(),
                value: value.to_string(),
                source,
            })
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.require(SECTION_API, KEY_API_KEY)
    }

    pub fn text_model(&self) -> Result<&str, ConfigError> {
        self.require(SECTION_API, KEY_TEXT_MODEL)
    }

    pub fn dalle_model(&self) -> Result<&str, ConfigError> {
        self.require(SECTION_API, KEY_DALLE_MODEL)
    }

    pub fn size(&self) -> Result<&str, ConfigError> {
        self.require(SECTION_API, KEY_SIZE)
    }

    pub fn max_tokens(&self) -> Result<u32, ConfigError> {
        self.require_number(SECTION_API, KEY_MAX_TOKENS)
    }

    pub fn base_url(&self) -> &str {
        self.get(SECTION_API, KEY_BASE_URL)
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn image_folder(&self) -> Result<PathBuf, ConfigError> {
        self.require(SECTION_SETTINGS, KEY_IMAGE_FOLDER)
            .map(PathBuf::from)
    }

    pub fn num_images(&self) -> Result<usize, ConfigError> {
        self.require_number(SECTION_SETTINGS, KEY_NUM_IMAGES)
    }
}

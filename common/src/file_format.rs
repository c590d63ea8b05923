use std::path::Path;

use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ConfigFormatError {
    #[error("Failed to get file extension")]
    MissingFileExtension,
    #[error("Unsupported file extension for file: {0}")]
    UnsupportedFileExtension(String),
    #[error("Failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("YAML deserialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON deserialization failed")]
    Json(#[from] serde_json::Error),
}

pub type ConfigFormatResult<T> = Result<T, ConfigFormatError>;

pub fn get_file_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|os_str| os_str.to_str())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> ConfigFormatResult<Self> {
        let ext = get_file_extension(path).ok_or(ConfigFormatError::MissingFileExtension)?;

        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Ok(Self::Yaml)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(ConfigFormatError::UnsupportedFileExtension(
                path.display().to_string(),
            ))
        }
    }

    pub fn deserialize<T: DeserializeOwned>(self, text: &str) -> ConfigFormatResult<T> {
        match self {
            Self::Yaml => Ok(serde_yml::from_str(text)?),
            Self::Json => Ok(serde_json::from_str(text)?),
        }
    }
}

/// Reads and deserializes a config file, picking the format from its extension.
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> ConfigFormatResult<T> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    format.deserialize(&text)
}

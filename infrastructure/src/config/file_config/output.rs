//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};

/// Result rendering on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Default format when `--output` is not given
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "json"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        assert!(config.output.color);
    }

    #[test]
    fn test_color_can_be_disabled() {
        let config: FileOutputConfig = toml::from_str("color = false").unwrap();
        assert!(!config.color);
        assert_eq!(config.format, None);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(toml::from_str::<FileOutputConfig>("format = \"yaml\"").is_err());
    }
}

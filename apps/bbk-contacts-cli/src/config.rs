use crate::error::{CliError, CliResult};
use bbk_contacts_sdk::{FormatConfig, HomeArea};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "bbk-contacts.yaml";

/// Deployment configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Local area; numbers elsewhere get a long-distance `0`
    pub home_area: HomeArea,

    /// Loan export to read
    pub input: PathBuf,

    /// Mobile-prefix area-code database
    pub area_code_db: PathBuf,

    /// Contact file to write
    pub output: PathBuf,

    /// Display-name parts enabled by default
    pub format: FormatConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            home_area: HomeArea::default(),
            input: PathBuf::from("peopleList.csv"),
            area_code_db: PathBuf::from("phone.dat"),
            output: PathBuf::from("名片.csv"),
            format: FormatConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Load an explicit config file, or `bbk-contacts.yaml` if present, or defaults
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            CliError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> CliResult<Self> {
        let config: ToolConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        let code = &self.home_area.area_code;
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CliError::InvalidConfig(format!(
                "home_area.area_code must be digits, got '{}'",
                code
            )));
        }
        if self.home_area.city.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "home_area.city must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

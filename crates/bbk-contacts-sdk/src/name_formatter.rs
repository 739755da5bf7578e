use crate::record_extractor::{ContactRecord, ContactRole};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const GUARANTOR_SUFFIX: &str = "_担保";
pub const MANAGER_LABEL: &str = "经办:";

/// Which optional parts appear in a contact's display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub include_manager: bool,
    pub include_phone: bool,
    pub include_sequence: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            include_manager: true,
            include_phone: true,
            include_sequence: true,
        }
    }
}

impl fmt::Display for FormatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |flag: bool| if flag { "on" } else { "off" };
        write!(
            f,
            "sequence={}, phone={}, manager={}",
            on_off(self.include_sequence),
            on_off(self.include_phone),
            on_off(self.include_manager)
        )
    }
}

/// Render `[NNN.]name[_担保][_phone][_经办:manager]` for the record at 1-based `position`
pub fn format_display_name(record: &ContactRecord, position: usize, config: &FormatConfig) -> String {
    let mut name = String::new();

    if config.include_sequence {
        name.push_str(&format!("{position:03}."));
    }

    name.push_str(record.name.trim());
    if record.role == ContactRole::Guarantor {
        name.push_str(GUARANTOR_SUFFIX);
    }

    if config.include_phone {
        name.push('_');
        name.push_str(&record.phone_digits);
    }

    let manager = record.manager_name.trim();
    if config.include_manager && !manager.is_empty() {
        name.push('_');
        name.push_str(MANAGER_LABEL);
        name.push_str(manager);
    }

    name
}

/*!
# CSV Schema Definitions

Two tables cross this crate's boundary:

- the **input table**: a loan export whose header names vary between branches
  and report versions. It is kept loosely typed (header list + string cells);
  semantic column resolution happens downstream.
- the **contact table** (`名片.csv`): the fixed five-column layout the BBK USB
  telephone's contact importer expects.
*/

use serde::{Deserialize, Serialize};
use std::fmt;

// ================================================================================================
// Contact CSV Schema (output)
// ================================================================================================

/// Expected headers for the contact file in exact order
pub const CONTACT_CSV_HEADERS: &[&str] = &["姓名", "移动电话", "办公电话", "家庭电话", "备注"];

/// Escape placed in front of phone numbers so importers keep them as text
pub const PHONE_TEXT_ESCAPE: char = '\t';

/// Row structure for the contact file
///
/// **File**: `名片.csv`
/// **Encoding**: GB18030, no byte-order mark
/// **Consumer**: BBK handset contact import
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactCsvRow {
    /// Display name shown on the handset
    #[serde(rename = "姓名")]
    pub name: String,

    /// Mobile number, tab-armored
    #[serde(rename = "移动电话")]
    pub mobile: String,

    #[serde(rename = "办公电话")]
    pub office_phone: String,

    #[serde(rename = "家庭电话")]
    pub home_phone: String,

    #[serde(rename = "备注")]
    pub note: String,
}

impl ContactCsvRow {
    /// Build a row from a display name and bare phone digits.
    pub fn new(name: impl Into<String>, phone_digits: &str) -> Self {
        Self {
            name: name.into(),
            mobile: format!("{PHONE_TEXT_ESCAPE}{phone_digits}"),
            office_phone: String::new(),
            home_phone: String::new(),
            note: String::new(),
        }
    }

    /// Phone digits with the text escape removed
    pub fn phone_digits(&self) -> &str {
        self.mobile.trim_start_matches(PHONE_TEXT_ESCAPE)
    }
}

// ================================================================================================
// Input CSV Schema
// ================================================================================================

/// Encodings tried, in order, when decoding an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEncoding {
    Utf8,
    Utf8Bom,
    Gbk,
    Gb18030,
}

impl InputEncoding {
    pub const DETECTION_ORDER: [InputEncoding; 4] = [
        InputEncoding::Utf8,
        InputEncoding::Utf8Bom,
        InputEncoding::Gbk,
        InputEncoding::Gb18030,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InputEncoding::Utf8 => "utf-8",
            InputEncoding::Utf8Bom => "utf-8-sig",
            InputEncoding::Gbk => "gbk",
            InputEncoding::Gb18030 => "gb18030",
        }
    }
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded input table: trimmed, de-duplicated headers and raw string cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub encoding: InputEncoding,
}

impl InputTable {
    /// Position of a header in the table
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell value, empty when the row is shorter than the header
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

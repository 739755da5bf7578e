use bbk_contacts_areacode::{AreaCodeInfo, AreaCodeLookup};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Local area of the deployment; numbers outside it get a long-distance `0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeArea {
    pub area_code: String,
    pub city: String,
}

impl Default for HomeArea {
    fn default() -> Self {
        Self {
            area_code: "0558".to_string(),
            city: "亳州".to_string(),
        }
    }
}

impl HomeArea {
    pub fn new(area_code: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            area_code: area_code.into(),
            city: city.into(),
        }
    }

    /// Same area code and same city
    pub fn matches(&self, info: &AreaCodeInfo) -> bool {
        info.area_code == self.area_code && info.city == self.city
    }
}

/// Keep only ASCII decimal digits
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Prefix decision: a found area other than home needs the prefix; misses and
/// failures never do.
pub fn needs_prefix(found: Option<&AreaCodeInfo>, home: &HomeArea) -> bool {
    match found {
        Some(info) => !home.matches(info),
        None => false,
    }
}

/// Applies the long-distance prefix decision to sanitized numbers
pub struct PhoneNormalizer<L> {
    lookup: L,
    home: HomeArea,
}

impl<L: AreaCodeLookup> PhoneNormalizer<L> {
    pub fn new(lookup: L, home: HomeArea) -> Self {
        Self { lookup, home }
    }

    pub fn home(&self) -> &HomeArea {
        &self.home
    }

    /// Query the lookup; errors are treated as a miss so an outage never blocks a run
    pub fn needs_prefix(&self, digits: &str) -> bool {
        let found = match self.lookup.find(digits) {
            Ok(found) => found,
            Err(e) => {
                debug!(digits, error = %e, "area-code lookup failed, no prefix");
                None
            }
        };
        needs_prefix(found.as_ref(), &self.home)
    }

    /// Prepend `0` to sanitized digits when the number is long-distance
    pub fn apply(&self, digits: String) -> String {
        if self.needs_prefix(&digits) {
            format!("0{digits}")
        } else {
            digits
        }
    }

    /// Sanitize then apply; `None` when no digits remain
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let digits = sanitize_digits(raw);
        if digits.is_empty() {
            return None;
        }
        Some(self.apply(digits))
    }
}

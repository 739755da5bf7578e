use crate::{
    error::AreaCodeResult,
    phone_dat::{MAX_LOOKUP_DIGITS, MIN_LOOKUP_DIGITS},
    AreaCodeInfo, AreaCodeLookup,
};
use std::collections::HashMap;

/// Area codes keyed by 7-digit mobile prefix, held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticAreaCodes {
    prefixes: HashMap<String, AreaCodeInfo>,
}

impl StaticAreaCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for a prefix (only its first seven digits are used)
    pub fn with_prefix(mut self, prefix: &str, area_code: &str, city: &str) -> Self {
        self.insert(prefix, AreaCodeInfo::new(area_code, city));
        self
    }

    pub fn insert(&mut self, prefix: &str, info: AreaCodeInfo) {
        let key: String = prefix.chars().take(MIN_LOOKUP_DIGITS).collect();
        self.prefixes.insert(key, info);
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl AreaCodeLookup for StaticAreaCodes {
    fn find(&self, digits: &str) -> AreaCodeResult<Option<AreaCodeInfo>> {
        if !(MIN_LOOKUP_DIGITS..=MAX_LOOKUP_DIGITS).contains(&digits.len())
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Ok(None);
        }
        Ok(self.prefixes.get(&digits[..MIN_LOOKUP_DIGITS]).cloned())
    }
}

/// Lookup used when no database is available: every number misses
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAreaCodes;

impl AreaCodeLookup for NoAreaCodes {
    fn find(&self, _digits: &str) -> AreaCodeResult<Option<AreaCodeInfo>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_lookup_by_prefix() {
        let table = StaticAreaCodes::new()
            .with_prefix("13900000000", "010", "北京")
            .with_prefix("1395580", "0558", "亳州");

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.find("13900001234").unwrap(),
            Some(AreaCodeInfo::new("010", "北京"))
        );
        assert_eq!(table.find("1395580").unwrap().unwrap().city, "亳州");
        assert!(table.find("15000000000").unwrap().is_none());
        assert!(table.find("139").unwrap().is_none());
    }

    #[test]
    fn test_no_area_codes_always_misses() {
        assert!(NoAreaCodes.find("13900000000").unwrap().is_none());
    }
}

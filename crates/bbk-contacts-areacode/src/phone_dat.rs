/*!
# `phone.dat` reader

Layout (all integers little-endian):

```text
| version: [u8; 4] | index_offset: i32 |
| records: "province|city|zip|area_code\0" ...              |
| index:   { prefix: i32, record_offset: i32, carrier: u8 } ... |
```

Index entries are sorted by `prefix`, the first seven digits of a mobile number.
*/

use crate::{
    error::{AreaCodeError, AreaCodeResult},
    AreaCodeInfo, AreaCodeLookup,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

const HEADER_LEN: usize = 8;
const INDEX_ENTRY_LEN: usize = 9;

/// Digits the database can answer for: a 7-digit prefix up to a full 11-digit number
pub const MIN_LOOKUP_DIGITS: usize = 7;
pub const MAX_LOOKUP_DIGITS: usize = 11;

/// Network operator recorded for a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Carrier {
    ChinaMobile,
    ChinaUnicom,
    ChinaTelecom,
    TelecomVirtual,
    UnicomVirtual,
    MobileVirtual,
    Unknown(u8),
}

impl From<u8> for Carrier {
    fn from(value: u8) -> Self {
        match value {
            1 => Carrier::ChinaMobile,
            2 => Carrier::ChinaUnicom,
            3 => Carrier::ChinaTelecom,
            4 => Carrier::TelecomVirtual,
            5 => Carrier::UnicomVirtual,
            6 => Carrier::MobileVirtual,
            other => Carrier::Unknown(other),
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Carrier::ChinaMobile => f.write_str("移动"),
            Carrier::ChinaUnicom => f.write_str("联通"),
            Carrier::ChinaTelecom => f.write_str("电信"),
            Carrier::TelecomVirtual => f.write_str("电信虚拟运营商"),
            Carrier::UnicomVirtual => f.write_str("联通虚拟运营商"),
            Carrier::MobileVirtual => f.write_str("移动虚拟运营商"),
            Carrier::Unknown(code) => write!(f, "未知({code})"),
        }
    }
}

/// Full record for a mobile prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub phone: String,
    pub province: String,
    pub city: String,
    pub zip_code: String,
    pub area_code: String,
    pub carrier: Carrier,
}

impl From<PhoneRecord> for AreaCodeInfo {
    fn from(record: PhoneRecord) -> Self {
        AreaCodeInfo {
            area_code: record.area_code,
            city: record.city,
        }
    }
}

/// In-memory `phone.dat` database
pub struct PhoneDat {
    buf: Vec<u8>,
    version: String,
    index_offset: usize,
    record_count: usize,
}

impl PhoneDat {
    /// Load a database file
    pub fn open<P: AsRef<Path>>(path: P) -> AreaCodeResult<Self> {
        let path = path.as_ref();
        let buf = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AreaCodeError::NotFound(path.to_path_buf()),
            _ => AreaCodeError::Io(e),
        })?;

        let dat = Self::from_bytes(buf)?;
        debug!(
            path = %path.display(),
            version = %dat.version,
            records = dat.record_count,
            "loaded area-code database"
        );
        Ok(dat)
    }

    /// Validate the header and wrap raw database bytes
    pub fn from_bytes(buf: Vec<u8>) -> AreaCodeResult<Self> {
        if buf.len() < HEADER_LEN {
            return Err(AreaCodeError::Truncated { len: buf.len() });
        }

        let version = String::from_utf8_lossy(&buf[0..4]).into_owned();
        let raw_offset = read_i32(&buf, 4);
        let index_offset = usize::try_from(raw_offset)
            .ok()
            .filter(|offset| (HEADER_LEN..=buf.len()).contains(offset))
            .ok_or(AreaCodeError::InvalidIndexOffset {
                offset: raw_offset.into(),
                len: buf.len(),
            })?;
        let record_count = (buf.len() - index_offset) / INDEX_ENTRY_LEN;

        Ok(Self {
            buf,
            version,
            index_offset,
            record_count,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of prefixes in the index
    pub fn len(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Look up the record for a number.
    ///
    /// Numbers outside 7..=11 digits, or containing anything but digits, are a miss.
    pub fn find_record(&self, phone: &str) -> AreaCodeResult<Option<PhoneRecord>> {
        if !(MIN_LOOKUP_DIGITS..=MAX_LOOKUP_DIGITS).contains(&phone.len())
            || !phone.bytes().all(|b| b.is_ascii_digit())
        {
            return Ok(None);
        }

        let Ok(prefix) = phone[..MIN_LOOKUP_DIGITS].parse::<i32>() else {
            return Ok(None);
        };

        let (mut lo, mut hi) = (0usize, self.record_count);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let entry = self.index_offset + mid * INDEX_ENTRY_LEN;
            let current = read_i32(&self.buf, entry);

            if current < prefix {
                lo = mid + 1;
            } else if current > prefix {
                hi = mid;
            } else {
                let record_offset = read_i32(&self.buf, entry + 4);
                let carrier = Carrier::from(self.buf[entry + 8]);
                return self.read_record(phone, record_offset, carrier).map(Some);
            }
        }

        Ok(None)
    }

    fn read_record(&self, phone: &str, offset: i32, carrier: Carrier) -> AreaCodeResult<PhoneRecord> {
        let start = usize::try_from(offset)
            .ok()
            .filter(|start| (HEADER_LEN..self.index_offset).contains(start))
            .ok_or(AreaCodeError::CorruptRecord {
                offset: offset.max(0) as usize,
            })?;

        let corrupt = || AreaCodeError::CorruptRecord { offset: start };

        let len = self.buf[start..self.index_offset]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(corrupt)?;
        let content = std::str::from_utf8(&self.buf[start..start + len]).map_err(|_| corrupt())?;

        let mut parts = content.split('|');
        let (Some(province), Some(city), Some(zip_code), Some(area_code), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(corrupt());
        };

        Ok(PhoneRecord {
            phone: phone.to_string(),
            province: province.to_string(),
            city: city.to_string(),
            zip_code: zip_code.to_string(),
            area_code: area_code.to_string(),
            carrier,
        })
    }
}

impl AreaCodeLookup for PhoneDat {
    fn find(&self, digits: &str) -> AreaCodeResult<Option<AreaCodeInfo>> {
        Ok(self.find_record(digits)?.map(AreaCodeInfo::from))
    }
}

fn read_i32(buf: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

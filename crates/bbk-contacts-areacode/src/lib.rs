/*!
# BBK Contacts Area-Code Lookup

Answers one question for the converter: which telephone area (code + city) does
a mobile number belong to. The capability is the [`AreaCodeLookup`] trait so the
prefix decision never depends on where the data lives.

Implementations:

- [`PhoneDat`]: the `phone.dat` mobile-prefix database shipped next to the tool
- [`StaticAreaCodes`]: an in-memory prefix table
- [`NoAreaCodes`]: always misses, used when no database is installed

```rust,no_run
use bbk_contacts_areacode::{AreaCodeLookup, PhoneDat};

# fn example() -> bbk_contacts_areacode::AreaCodeResult<()> {
let dat = PhoneDat::open("phone.dat")?;
if let Some(info) = dat.find("13900000000")? {
    println!("{} {}", info.area_code, info.city);
}
# Ok(())
# }
```
*/

mod error;
mod phone_dat;
mod static_table;

use serde::{Deserialize, Serialize};

pub use error::{AreaCodeError, AreaCodeResult};
pub use phone_dat::{Carrier, PhoneDat, PhoneRecord, MAX_LOOKUP_DIGITS, MIN_LOOKUP_DIGITS};
pub use static_table::{NoAreaCodes, StaticAreaCodes};

/// Telephone area a number belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCodeInfo {
    pub area_code: String,
    pub city: String,
}

impl AreaCodeInfo {
    pub fn new(area_code: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            area_code: area_code.into(),
            city: city.into(),
        }
    }
}

/// Keyed area-code resource: `Ok(None)` is a miss, `Err` an unavailable resource
pub trait AreaCodeLookup {
    fn find(&self, digits: &str) -> AreaCodeResult<Option<AreaCodeInfo>>;
}

impl<T: AreaCodeLookup + ?Sized> AreaCodeLookup for &T {
    fn find(&self, digits: &str) -> AreaCodeResult<Option<AreaCodeInfo>> {
        (**self).find(digits)
    }
}

impl<T: AreaCodeLookup + ?Sized> AreaCodeLookup for Box<T> {
    fn find(&self, digits: &str) -> AreaCodeResult<Option<AreaCodeInfo>> {
        (**self).find(digits)
    }
}

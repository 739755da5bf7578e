/*!
# BBK Contacts SDK

Turns a loan-customer export into the contact list a BBK USB telephone imports.
The pipeline lives in [`convert_contacts`]; each stage is public on its own:

- [`resolve_columns`]: variant headers → [`CanonicalField`]s
- [`PhoneNormalizer`]: digit sanitizing and the long-distance `0` decision
- [`extract_records`]: ordered customer/guarantor [`ContactRecord`]s
- [`format_display_name`]: `001.张三_013900000000_经办:李四`
- [`export_contacts`]: GB18030 contact file

```rust,no_run
use bbk_contacts_sdk::{convert_contacts, load_area_codes, FormatConfig, HomeArea};
use std::path::Path;

# fn example() -> bbk_contacts_sdk::ContactsResult<()> {
let lookup = load_area_codes(Path::new("phone.dat"))?;
let report = convert_contacts(
    Path::new("peopleList.csv"),
    Path::new("名片.csv"),
    lookup,
    HomeArea::default(),
    FormatConfig::default(),
)?;
println!("{} contacts written", report.record_count());
# Ok(())
# }
```
*/

mod column_resolver;
mod contact_converter;
mod contact_exporter;
mod contacts_error;
mod name_formatter;
mod phone_normalizer;
mod record_extractor;

pub use column_resolver::{resolve_columns, CanonicalField, ColumnMap};
pub use contact_converter::{convert_contacts, load_area_codes, ConversionReport};
pub use contact_exporter::{export_contacts, to_contact_rows};
pub use contacts_error::{ContactsError, ContactsResult, FailureKind};
pub use name_formatter::{format_display_name, FormatConfig, GUARANTOR_SUFFIX, MANAGER_LABEL};
pub use phone_normalizer::{needs_prefix, sanitize_digits, HomeArea, PhoneNormalizer};
pub use record_extractor::{
    extract_records, ContactRecord, ContactRole, Extraction, ExtractionStats, SkipReason,
    MIN_PHONE_DIGITS,
};

// Re-export the lookup capability so callers need only this crate
pub use bbk_contacts_areacode::{AreaCodeInfo, AreaCodeLookup, NoAreaCodes, StaticAreaCodes};

/*!
# BBK Contacts CSV Schema Definitions

This crate owns every byte that crosses the file boundary of the converter:

- **Input exports** (`peopleList.csv`) → decoded with encoding detection
  (UTF-8, UTF-8 with BOM, GBK, GB18030) into an [`InputTable`]
- **Contact files** (`名片.csv`) → the fixed five-column layout
  (`姓名,移动电话,办公电话,家庭电话,备注`), GB18030 without BOM, written atomically

## Usage

```rust,no_run
use bbk_contacts_csvs::{read_input_csv, write_contact_csv, ContactCsvRow, CsvResult};

fn example() -> CsvResult<()> {
    let table = read_input_csv("peopleList.csv")?;
    println!("{} rows decoded as {}", table.row_count(), table.encoding);

    let rows = vec![ContactCsvRow::new("001.张三_013900000000", "013900000000")];
    write_contact_csv("名片.csv", &rows)?;
    Ok(())
}
```
*/

pub mod encoding;
pub mod errors;
pub mod io;
pub mod schemas;

// Re-export main types for convenience
pub use errors::{CsvError, CsvResult};
pub use io::{
    contact_csv_bytes, dedupe_headers, parse_input_csv, read_input_csv, write_contact_csv,
    write_error,
};
pub use schemas::{ContactCsvRow, InputEncoding, InputTable, CONTACT_CSV_HEADERS, PHONE_TEXT_ESCAPE};

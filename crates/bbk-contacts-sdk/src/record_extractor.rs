/*!
# Record Extractor

Walks the input table in row order and emits contact records: for each row the
customer first, then the guarantor. Slots that cannot produce a record are
skipped silently and only counted.
*/

use crate::column_resolver::{CanonicalField, ColumnMap};
use crate::phone_normalizer::{sanitize_digits, PhoneNormalizer};
use bbk_contacts_areacode::AreaCodeLookup;
use bbk_contacts_csvs::InputTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fewest digits a mobile value must carry before any prefix is applied
pub const MIN_PHONE_DIGITS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactRole {
    Customer,
    Guarantor,
}

/// One handset contact extracted from a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Trimmed person name
    pub name: String,
    /// Digits only, after the prefix decision
    pub phone_digits: String,
    pub role: ContactRole,
    /// Row's manager, possibly empty
    pub manager_name: String,
    /// Zero-based data row index in the input
    pub source_row: usize,
}

/// Why a customer or guarantor slot produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingColumn,
    EmptyName,
    ShortNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub rows_read: usize,
    pub customers: usize,
    pub guarantors: usize,
    pub customers_skipped: usize,
    pub guarantors_skipped: usize,
}

impl ExtractionStats {
    pub fn total_records(&self) -> usize {
        self.customers + self.guarantors
    }

    fn record(&mut self, role: ContactRole, outcome: &Result<ContactRecord, SkipReason>) {
        match (role, outcome.is_ok()) {
            (ContactRole::Customer, true) => self.customers += 1,
            (ContactRole::Customer, false) => self.customers_skipped += 1,
            (ContactRole::Guarantor, true) => self.guarantors += 1,
            (ContactRole::Guarantor, false) => self.guarantors_skipped += 1,
        }
    }
}

/// Ordered records plus counts
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<ContactRecord>,
    pub stats: ExtractionStats,
}

/// Extract customer and guarantor records from every row, in row order
pub fn extract_records<L: AreaCodeLookup>(
    table: &InputTable,
    columns: &ColumnMap,
    normalizer: &PhoneNormalizer<L>,
) -> Extraction {
    let extractor = RowExtractor::new(table, columns);
    let mut extraction = Extraction::default();

    for row in 0..table.row_count() {
        extraction.stats.rows_read += 1;
        let manager = extractor.manager(row);

        for role in [ContactRole::Customer, ContactRole::Guarantor] {
            let outcome = extractor.contact(row, role, &manager, normalizer);
            extraction.stats.record(role, &outcome);

            match outcome {
                Ok(record) => extraction.records.push(record),
                Err(reason) if reason != SkipReason::MissingColumn => {
                    debug!(row, ?role, ?reason, "slot skipped");
                }
                Err(_) => {}
            }
        }
    }

    let stats = &extraction.stats;
    info!(
        rows = stats.rows_read,
        customers = stats.customers,
        guarantors = stats.guarantors,
        skipped = stats.customers_skipped + stats.guarantors_skipped,
        "extraction finished"
    );

    extraction
}

/// Column indices resolved once for the whole table
struct RowExtractor<'a> {
    table: &'a InputTable,
    manager: Option<usize>,
    customer: Option<(usize, usize)>,
    guarantor: Option<(usize, usize)>,
}

impl<'a> RowExtractor<'a> {
    fn new(table: &'a InputTable, columns: &ColumnMap) -> Self {
        let index = |field| columns.get(field).and_then(|h| table.column_index(h));
        let pair = |name, mobile| index(name).zip(index(mobile));

        Self {
            table,
            manager: index(CanonicalField::ManagerName),
            customer: pair(CanonicalField::CustomerName, CanonicalField::CustomerMobile),
            guarantor: pair(CanonicalField::GuarantorName, CanonicalField::GuarantorMobile),
        }
    }

    fn manager(&self, row: usize) -> String {
        self.manager
            .map(|col| self.table.cell(row, col).trim().to_string())
            .unwrap_or_default()
    }

    fn contact<L: AreaCodeLookup>(
        &self,
        row: usize,
        role: ContactRole,
        manager: &str,
        normalizer: &PhoneNormalizer<L>,
    ) -> Result<ContactRecord, SkipReason> {
        let columns = match role {
            ContactRole::Customer => self.customer,
            ContactRole::Guarantor => self.guarantor,
        };
        let (name_col, mobile_col) = columns.ok_or(SkipReason::MissingColumn)?;

        let name = self.table.cell(row, name_col).trim();
        if name.is_empty() {
            return Err(SkipReason::EmptyName);
        }

        let digits = sanitize_digits(self.table.cell(row, mobile_col));
        if digits.len() < MIN_PHONE_DIGITS {
            return Err(SkipReason::ShortNumber);
        }

        Ok(ContactRecord {
            name: name.to_string(),
            phone_digits: normalizer.apply(digits),
            role,
            manager_name: manager.to_string(),
            source_row: row,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_resolver::resolve_columns;
    use crate::phone_normalizer::HomeArea;
    use bbk_contacts_areacode::StaticAreaCodes;
    use bbk_contacts_csvs::InputEncoding;

    fn table(headers: &[&str], rows: &[&[&str]]) -> InputTable {
        InputTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
            encoding: InputEncoding::Utf8,
        }
    }

    fn normalizer() -> PhoneNormalizer<StaticAreaCodes> {
        let lookup = StaticAreaCodes::new()
            .with_prefix("1390000", "010", "北京")
            .with_prefix("1395580", "0558", "亳州");
        PhoneNormalizer::new(lookup, HomeArea::default())
    }

    const HEADERS: &[&str] = &["客户姓名", "手机号码", "担保人姓名", "手机号码.1", "客户经理"];

    fn extract(rows: &[&[&str]]) -> Extraction {
        let table = table(HEADERS, rows);
        let columns = resolve_columns(&table.headers);
        extract_records(&table, &columns, &normalizer())
    }

    #[test]
    fn test_customer_only_row() {
        let extraction = extract(&[&["张三", "13900000000", "", "", "李四"]]);

        assert_eq!(extraction.records.len(), 1);
        let record = &extraction.records[0];
        assert_eq!(record.name, "张三");
        assert_eq!(record.phone_digits, "013900000000");
        assert_eq!(record.role, ContactRole::Customer);
        assert_eq!(record.manager_name, "李四");
        assert_eq!(record.source_row, 0);
        assert_eq!(extraction.stats.guarantors_skipped, 1);
    }

    #[test]
    fn test_customer_then_guarantor_in_row_order() {
        let extraction = extract(&[
            &["张三", "13900000000", "王五", "13955801234", "李四"],
            &["赵六", "139-5580-0000", "孙七", "13900001111", ""],
        ]);

        let summary: Vec<_> = extraction
            .records
            .iter()
            .map(|r| (r.name.as_str(), r.role, r.source_row))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("张三", ContactRole::Customer, 0),
                ("王五", ContactRole::Guarantor, 0),
                ("赵六", ContactRole::Customer, 1),
                ("孙七", ContactRole::Guarantor, 1),
            ]
        );
        assert_eq!(extraction.records[1].phone_digits, "13955801234");
        assert_eq!(extraction.records[1].manager_name, "李四");
        assert_eq!(extraction.records[2].phone_digits, "13955800000");
        assert_eq!(extraction.records[3].manager_name, "");
        assert_eq!(extraction.stats.total_records(), 4);
    }

    #[test]
    fn test_guarantor_without_customer() {
        let extraction = extract(&[&["", "", "王五", "13900001111", "李四"]]);

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].role, ContactRole::Guarantor);
        assert_eq!(extraction.stats.customers_skipped, 1);
    }

    #[test]
    fn test_short_and_empty_values_skipped() {
        let extraction = extract(&[
            &["张三", "139000", "王五", "", "李四"],
            &["  ", "13900000000", "王五", "1390000", ""],
        ]);

        // Only the 7-digit guarantor number on row 1 survives
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].phone_digits, "01390000");
        assert_eq!(
            extraction.stats,
            ExtractionStats {
                rows_read: 2,
                customers: 0,
                guarantors: 1,
                customers_skipped: 2,
                guarantors_skipped: 1,
            }
        );
    }

    #[test]
    fn test_missing_guarantor_columns_yield_customers_only() {
        let table = table(&["客户姓名", "手机号码"], &[&["张三", "13955801234"], &["李四", "13900000000"]]);
        let columns = resolve_columns(&table.headers);
        let extraction = extract_records(&table, &columns, &normalizer());

        assert_eq!(extraction.records.len(), 2);
        assert!(extraction.records.iter().all(|r| r.role == ContactRole::Customer));
        assert!(extraction.records.iter().all(|r| r.manager_name.is_empty()));
    }

    #[test]
    fn test_missing_customer_mobile_column_yields_nothing() {
        let table = table(&["客户姓名", "客户经理"], &[&["张三", "李四"]]);
        let columns = resolve_columns(&table.headers);
        let extraction = extract_records(&table, &columns, &normalizer());

        assert!(extraction.records.is_empty());
        assert_eq!(extraction.stats.customers_skipped, 1);
    }

    #[test]
    fn test_ragged_row_reads_missing_cells_as_empty() {
        let extraction = extract(&[&["张三", "13955801234"]]);

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].manager_name, "");
    }

    #[test]
    fn test_names_and_managers_trimmed() {
        let extraction = extract(&[&[" 张三 ", "13955801234", "", "", " 李四\t"]]);

        assert_eq!(extraction.records[0].name, "张三");
        assert_eq!(extraction.records[0].manager_name, "李四");
    }
}

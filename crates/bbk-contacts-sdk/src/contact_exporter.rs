use crate::contacts_error::ContactsResult;
use crate::name_formatter::{format_display_name, FormatConfig};
use crate::record_extractor::ContactRecord;
use bbk_contacts_csvs::{write_contact_csv, ContactCsvRow};
use std::path::Path;
use tracing::info;

/// Format every record into a contact row; sequence numbers follow record order from 1
pub fn to_contact_rows(records: &[ContactRecord], config: &FormatConfig) -> Vec<ContactCsvRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            ContactCsvRow::new(format_display_name(record, i + 1, config), &record.phone_digits)
        })
        .collect()
}

/// Format and write the contact file, returning the rows written
pub fn export_contacts(
    path: &Path,
    records: &[ContactRecord],
    config: &FormatConfig,
) -> ContactsResult<Vec<ContactCsvRow>> {
    let rows = to_contact_rows(records, config);
    write_contact_csv(path, &rows)?;
    info!(path = %path.display(), rows = rows.len(), "contact file written");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_extractor::ContactRole;

    fn records() -> Vec<ContactRecord> {
        vec![
            ContactRecord {
                name: "张三".to_string(),
                phone_digits: "013900000000".to_string(),
                role: ContactRole::Customer,
                manager_name: "李四".to_string(),
                source_row: 0,
            },
            ContactRecord {
                name: "王五".to_string(),
                phone_digits: "13955801234".to_string(),
                role: ContactRole::Guarantor,
                manager_name: "李四".to_string(),
                source_row: 0,
            },
            ContactRecord {
                name: "赵六".to_string(),
                phone_digits: "13955800000".to_string(),
                role: ContactRole::Customer,
                manager_name: String::new(),
                source_row: 2,
            },
        ]
    }

    #[test]
    fn test_rows_numbered_in_order() {
        let rows = to_contact_rows(&records(), &FormatConfig::default());

        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "001.张三_013900000000_经办:李四",
                "002.王五_担保_13955801234_经办:李四",
                "003.赵六_13955800000",
            ]
        );
        assert_eq!(rows[0].mobile, "\t013900000000");
        assert!(rows.iter().all(|r| r.office_phone.is_empty() && r.home_phone.is_empty() && r.note.is_empty()));
    }

    #[test]
    fn test_export_writes_one_row_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("名片.csv");

        let rows = export_contacts(&path, &records(), &FormatConfig::default()).unwrap();
        assert_eq!(rows.len(), 3);

        let bytes = std::fs::read(&path).unwrap();
        let (text, _, had_errors) = encoding_rs::GB18030.decode(&bytes);
        assert!(!had_errors);
        assert_eq!(text.matches("\r\n").count(), 4);
        assert_eq!(text.lines().count(), 4);
    }
}

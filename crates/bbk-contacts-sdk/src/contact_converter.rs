/*!
# Contact Converter

Runs the whole transformation for one input file:

1. Read and decode the export (`bbk_contacts_csvs`)
2. Resolve variant headers to canonical fields, once
3. Extract customer/guarantor records, applying the long-distance prefix decision
4. Format display names in output order
5. Write the contact file atomically

The output file is either fully replaced or untouched: no records means no write.
*/

use crate::column_resolver::{resolve_columns, ColumnMap};
use crate::contact_exporter::export_contacts;
use crate::contacts_error::{ContactsError, ContactsResult};
use crate::name_formatter::FormatConfig;
use crate::phone_normalizer::{HomeArea, PhoneNormalizer};
use crate::record_extractor::{extract_records, ExtractionStats};
use bbk_contacts_areacode::{AreaCodeError, AreaCodeLookup, NoAreaCodes, PhoneDat};
use bbk_contacts_csvs::{read_input_csv, ContactCsvRow, InputEncoding};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoding: InputEncoding,
    pub columns: ColumnMap,
    pub stats: ExtractionStats,
    pub config: FormatConfig,
    /// Rows written, in output order
    pub contacts: Vec<ContactCsvRow>,
}

impl ConversionReport {
    pub fn record_count(&self) -> usize {
        self.contacts.len()
    }
}

/// Convert `input` into the contact file at `output`
pub fn convert_contacts<L: AreaCodeLookup>(
    input: &Path,
    output: &Path,
    lookup: L,
    home: HomeArea,
    config: FormatConfig,
) -> ContactsResult<ConversionReport> {
    // Step 1: Decode the export; a missing or undecodable file stops here
    let table = read_input_csv(input)?;
    info!(
        input = %input.display(),
        encoding = %table.encoding,
        rows = table.row_count(),
        "input loaded"
    );

    // Step 2: Resolve columns once for the whole run
    let columns = resolve_columns(&table.headers);
    for (field, header) in columns.iter() {
        info!(%field, header, "column resolved");
    }
    for field in columns.missing() {
        info!(%field, "column not present");
    }

    // Step 3: Extract records in row order
    let normalizer = PhoneNormalizer::new(lookup, home);
    let extraction = extract_records(&table, &columns, &normalizer);
    if extraction.records.is_empty() {
        return Err(ContactsError::NoRecords(input.to_path_buf()));
    }

    // Step 4 + 5: Format and write
    let contacts = export_contacts(output, &extraction.records, &config)?;

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        encoding: table.encoding,
        columns,
        stats: extraction.stats,
        config,
        contacts,
    })
}

/// Open the area-code database for a run.
///
/// A missing database is not fatal: the run goes ahead with no prefixes applied.
/// A database that exists but cannot be parsed is an error.
pub fn load_area_codes(path: &Path) -> ContactsResult<Box<dyn AreaCodeLookup>> {
    match PhoneDat::open(path) {
        Ok(dat) => {
            info!(path = %path.display(), version = dat.version(), prefixes = dat.len(), "area-code database loaded");
            Ok(Box::new(dat))
        }
        Err(AreaCodeError::NotFound(_)) => {
            warn!(path = %path.display(), "area-code database missing, long-distance prefixes disabled");
            Ok(Box::new(NoAreaCodes))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbk_contacts_areacode::StaticAreaCodes;
    use bbk_contacts_csvs::CsvError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_no_records_leaves_output_untouched() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("peopleList.csv");
        let output = dir.path().join("名片.csv");
        fs::write(&input, "客户姓名,手机号码\n张三,\n李四,123\n").unwrap();
        fs::write(&output, b"previous").unwrap();

        let result = convert_contacts(
            &input,
            &output,
            StaticAreaCodes::new(),
            HomeArea::default(),
            FormatConfig::default(),
        );

        assert!(matches!(result, Err(ContactsError::NoRecords(_))));
        assert_eq!(fs::read(&output).unwrap(), b"previous");
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempdir().unwrap();
        let result = convert_contacts(
            &dir.path().join("peopleList.csv"),
            &dir.path().join("名片.csv"),
            StaticAreaCodes::new(),
            HomeArea::default(),
            FormatConfig::default(),
        );

        assert!(matches!(
            result,
            Err(ContactsError::Csv(CsvError::InputNotFound(_)))
        ));
        assert!(!dir.path().join("名片.csv").exists());
    }

    #[test]
    fn test_missing_database_falls_back_to_no_prefix() {
        let dir = tempdir().unwrap();
        let lookup = load_area_codes(&dir.path().join("phone.dat")).unwrap();
        assert!(lookup.find("13900000000").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_database_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phone.dat");
        fs::write(&path, b"18").unwrap();

        assert!(matches!(
            load_area_codes(&path),
            Err(ContactsError::AreaCode(AreaCodeError::Truncated { .. }))
        ));
    }
}

/*!
# CSV Reading & Writing

Reading decodes the input export with encoding detection and normalizes its
header row. Writing produces the contact file atomically: the destination is
either fully replaced or left untouched.
*/

use crate::{
    encoding::{decode_input, detection_order_labels, encode_gb18030},
    errors::{CsvError, CsvResult},
    schemas::{ContactCsvRow, InputEncoding, InputTable},
};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

// ================================================================================================
// CSV Reading
// ================================================================================================

/// Read an input export, detecting its encoding
pub fn read_input_csv<P: AsRef<Path>>(path: P) -> CsvResult<InputTable> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CsvError::InputNotFound(path.to_path_buf()),
        _ => CsvError::Io(e),
    })?;

    let (text, encoding) = decode_input(&bytes).ok_or_else(|| CsvError::UndecodableInput {
        path: path.to_path_buf(),
        tried: detection_order_labels(),
    })?;
    debug!(path = %path.display(), %encoding, "decoded input");

    let table = parse_input_csv(&text, encoding)?;
    if table.headers.is_empty() {
        return Err(CsvError::MissingHeaderRow(path.to_path_buf()));
    }

    Ok(table)
}

/// Parse already-decoded CSV text into an input table
pub fn parse_input_csv(text: &str, encoding: InputEncoding) -> CsvResult<InputTable> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let raw_headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let headers = dedupe_headers(raw_headers);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(InputTable {
        headers,
        rows,
        encoding,
    })
}

// ================================================================================================
// CSV Writing
// ================================================================================================

/// Serialize contact rows (with the fixed header) to GB18030 bytes, CRLF-terminated
pub fn contact_csv_bytes(rows: &[ContactCsvRow]) -> CsvResult<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(vec![]);

    // Data rows (csv crate automatically writes headers)
    for row in rows {
        wtr.serialize(row)?;
    }
    if rows.is_empty() {
        wtr.write_record(crate::schemas::CONTACT_CSV_HEADERS)?;
    }

    let utf8 = wtr
        .into_inner()
        .map_err(|e| CsvError::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))?;
    let text = String::from_utf8(utf8)
        .map_err(|e| CsvError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    Ok(encode_gb18030(&text))
}

/// Write the contact file atomically
///
/// The content goes to a temporary file next to `path`, which is then renamed
/// over the destination. A destination held open by another program surfaces
/// as [`CsvError::WriteLocked`].
pub fn write_contact_csv<P: AsRef<Path>>(path: P, rows: &[ContactCsvRow]) -> CsvResult<()> {
    let path = path.as_ref();
    let bytes = contact_csv_bytes(rows)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| write_error(path, e))?;
    tmp.write_all(&bytes).map_err(|e| write_error(path, e))?;
    tmp.as_file().sync_all().map_err(|e| write_error(path, e))?;

    // Dropping the returned temp file on failure removes it
    tmp.persist(path).map_err(|e| write_error(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "contact file written");
    Ok(())
}

/// Classify a failed write to `path` as [`CsvError::WriteLocked`] or [`CsvError::WriteFailed`]
pub fn write_error(path: &Path, source: io::Error) -> CsvError {
    if is_file_busy(&source) {
        CsvError::WriteLocked {
            path: path.to_path_buf(),
            source,
        }
    } else {
        CsvError::WriteFailed {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Permission denied, or a Windows sharing/lock violation
fn is_file_busy(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
    cfg!(windows) && matches!(err.raw_os_error(), Some(32) | Some(33))
}

// ================================================================================================
// Header Normalization
// ================================================================================================

/// Rename repeated headers to `name.1`, `name.2`, ... in order of appearance.
///
/// Exports from the loan system repeat `手机号码` for the guarantor's number;
/// the second occurrence becomes `手机号码.1`.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        if seen.insert(header.clone()) {
            out.push(header);
            continue;
        }

        let mut n = 1;
        let renamed = loop {
            let candidate = format!("{header}.{n}");
            if !seen.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        seen.insert(renamed.clone());
        out.push(renamed);
    }

    out
}

// ================================================================================================
// Tests
// ================================================================================================

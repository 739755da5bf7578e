use bbk_contacts_areacode::AreaCodeError;
use bbk_contacts_csvs::CsvError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ContactsError {
    #[error(transparent)]
    AreaCode(#[from] AreaCodeError),

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error("No valid phone numbers found in {}", .0.display())]
    NoRecords(PathBuf),
}

pub type ContactsResult<T> = std::result::Result<T, ContactsError>;

/// How a failed run should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Nothing was read or written
    Fatal,
    /// The input held no usable contact
    NoRecords,
    /// Output held open or not writable; closing it elsewhere may help
    WriteLocked,
    WriteFailed,
}

impl ContactsError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ContactsError::Csv(CsvError::WriteLocked { .. }) => FailureKind::WriteLocked,
            ContactsError::Csv(CsvError::WriteFailed { .. }) => FailureKind::WriteFailed,
            ContactsError::NoRecords(_) => FailureKind::NoRecords,
            ContactsError::AreaCode(_) | ContactsError::Csv(_) => FailureKind::Fatal,
        }
    }
}

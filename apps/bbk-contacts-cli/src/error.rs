use bbk_contacts_sdk::{ContactsError, FailureKind};
use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Contacts(#[from] ContactsError),

    #[error(transparent)]
    AreaCode(#[from] bbk_contacts_areacode::AreaCodeError),

    #[error(transparent)]
    Csv(#[from] bbk_contacts_csvs::CsvError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not a phone number: '{0}'")]
    InvalidNumber(String),

    #[error("A conversion is already running for {} (remove the lock file if it is stale)", .0.display())]
    RunInProgress(PathBuf),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl CliError {
    /// Headline shown above the error message
    pub fn headline(&self) -> &'static str {
        match self {
            CliError::Contacts(e) => match e.kind() {
                FailureKind::Fatal => "Cannot read input",
                FailureKind::NoRecords => "Nothing to export",
                FailureKind::WriteLocked => "Output file is busy, close it in other programs and retry",
                FailureKind::WriteFailed => "Failed to write contact file",
            },
            CliError::Csv(_) | CliError::AreaCode(_) => "Cannot read input",
            CliError::Yaml(_) | CliError::InvalidConfig(_) => "Invalid configuration",
            CliError::InvalidNumber(_) => "Invalid argument",
            CliError::RunInProgress(_) => "Conversion already running",
            CliError::Io(_) | CliError::Unexpected(_) => "Unexpected failure",
        }
    }

    /// Process exit code
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Contacts(e) if e.kind() == FailureKind::WriteLocked => 3,
            CliError::Contacts(e) if e.kind() == FailureKind::NoRecords => 4,
            CliError::RunInProgress(_) => 5,
            _ => 1,
        }
    }
}

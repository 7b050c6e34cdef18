use crate::filesystem::error::FileSystemError;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum LnkError {
    NotALinkFile,
    TruncatedRecord,
    MalformedVolumeTable,
    UnresolvableTarget,
    FieldTooLarge,
    Io(FileSystemError),
}

impl std::error::Error for LnkError {}

impl fmt::Display for LnkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LnkError::NotALinkFile => write!(f, "Not shortcut data"),
            LnkError::TruncatedRecord => write!(f, "Shortcut data ended before a record was complete"),
            LnkError::MalformedVolumeTable => write!(f, "Volume table is smaller than its fixed size"),
            LnkError::UnresolvableTarget => write!(f, "Could not build shell items for the target"),
            LnkError::FieldTooLarge => write!(f, "Value too large for a shortcut size field"),
            LnkError::Io(err) => write!(f, "Shortcut file access failed: {err}"),
        }
    }
}

impl From<FileSystemError> for LnkError {
    fn from(err: FileSystemError) -> Self {
        LnkError::Io(err)
    }
}

impl<E> From<nom::Err<E>> for LnkError {
    fn from(_err: nom::Err<E>) -> Self {
        LnkError::TruncatedRecord
    }
}

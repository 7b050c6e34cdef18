use std::fmt;

#[derive(Debug, PartialEq)]
pub enum FileSystemError {
    NotFile,
    ReadFile,
    WriteFile,
    LargeFile,
    BadGlob,
}

impl std::error::Error for FileSystemError {}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::NotFile => write!(f, "Path is not a regular file"),
            FileSystemError::ReadFile => write!(f, "Failed to read file bytes"),
            FileSystemError::WriteFile => write!(f, "Failed to write file bytes"),
            FileSystemError::LargeFile => write!(f, "File exceeds the 2GB read limit"),
            FileSystemError::BadGlob => write!(f, "Invalid glob pattern"),
        }
    }
}

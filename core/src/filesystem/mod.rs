use self::error::FileSystemError;
use self::files::{get_file_size, is_directory, is_file, read_file, write_file};
use self::short_name::short_path_name;

pub mod error;
pub(crate) mod files;
pub(crate) mod short_name;

/**
 * File system operations needed to read and create `Shortcut` files
 * The codec never touches the disk directly, everything goes through this trait
 */
pub trait LinkFileSystem {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, FileSystemError>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<(), FileSystemError>;
    fn is_file(&self, path: &str) -> bool;
    fn is_directory(&self, path: &str) -> bool;
    fn file_size(&self, path: &str) -> u64;
    /// Get the 8.3 form of a path. Empty if unavailable
    fn short_path(&self, path: &str) -> String;

    /// Split a path into its components. Empty components are dropped
    fn split_path(&self, path: &str) -> Vec<String> {
        path.split(['\\', '/'])
            .filter(|component| !component.is_empty())
            .map(String::from)
            .collect()
    }
}

/// `LinkFileSystem` backed by the local disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LinkFileSystem for LocalFileSystem {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        read_file(path)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<(), FileSystemError> {
        write_file(path, data)
    }

    fn is_file(&self, path: &str) -> bool {
        is_file(path)
    }

    fn is_directory(&self, path: &str) -> bool {
        is_directory(path)
    }

    fn file_size(&self, path: &str) -> u64 {
        get_file_size(path)
    }

    fn short_path(&self, path: &str) -> String {
        short_path_name(path)
    }
}

use super::error::FileSystemError;
use log::error;
use std::{
    fs::{metadata, read, write},
    path::Path,
};

/// True for existing regular files
pub(crate) fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}

/// True for existing directories
pub(crate) fn is_directory(path: &str) -> bool {
    Path::new(path).is_dir()
}

/// Read a whole file. Files of 2GB or more are rejected
pub(crate) fn read_file(path: &str) -> Result<Vec<u8>, FileSystemError> {
    if !is_file(path) {
        return Err(FileSystemError::NotFile);
    }
    if file_too_large(path) {
        return Err(FileSystemError::LargeFile);
    }

    let read_result = read(path);
    match read_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[filesystem] Failed to read file {path}: {err:?}");
            Err(FileSystemError::ReadFile)
        }
    }
}

/// Write all bytes to a file in one call. Existing files are replaced
pub(crate) fn write_file(path: &str, data: &[u8]) -> Result<(), FileSystemError> {
    let write_result = write(path, data);
    match write_result {
        Ok(_) => Ok(()),
        Err(err) => {
            error!("[filesystem] Failed to write file {path}: {err:?}");
            Err(FileSystemError::WriteFile)
        }
    }
}

/// Get the file size. Returns 0 if the path is not a file
pub(crate) fn get_file_size(path: &str) -> u64 {
    if !is_file(path) {
        return 0;
    }

    let meta = metadata(path);
    match meta {
        Ok(result) => result.len(),
        Err(err) => {
            error!("[filesystem] Failed to get file size: {err:?}");
            0
        }
    }
}

/// Check if a provided file is larger than the default acceptable size (2GB)
fn file_too_large(path: &str) -> bool {
    let size = get_file_size(path);
    let max_size = 2147483648; // 2GB
    size >= max_size
}

/// Execute a provided Glob pattern (Ex: ./links/*.lnk) and return the matching files
pub(crate) fn glob_paths(glob_pattern: &str) -> Result<Vec<String>, FileSystemError> {
    let glob_results = glob::glob(glob_pattern);
    let paths = match glob_results {
        Ok(result) => result,
        Err(err) => {
            error!("[filesystem] Could not glob {glob_pattern}: {err:?}");
            return Err(FileSystemError::BadGlob);
        }
    };

    let mut files = Vec::new();
    for entry in paths.flatten() {
        if !entry.is_file() {
            continue;
        }
        files.push(entry.to_str().unwrap_or_default().to_string());
    }
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::{get_file_size, glob_paths, is_directory, is_file, read_file, write_file};
    use crate::filesystem::error::FileSystemError;
    use std::path::PathBuf;

    #[test]
    fn test_is_file() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("Cargo.toml");
        assert!(is_file(&test_location.display().to_string()));
        assert!(!is_directory(&test_location.display().to_string()));
    }

    #[test]
    fn test_is_directory() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests");
        assert!(is_directory(&test_location.display().to_string()));
        assert!(!is_file(&test_location.display().to_string()));
    }

    #[test]
    fn test_read_file() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/lnk/docs_example.lnk");

        let results = read_file(&test_location.display().to_string()).unwrap();
        assert_eq!(results.len(), 459);
        assert_eq!(
            get_file_size(&test_location.display().to_string()),
            459
        );
    }

    #[test]
    fn test_read_file_missing() {
        let result = read_file("/this/path/does/not/exist.lnk");
        assert_eq!(result, Err(FileSystemError::NotFile));
        assert_eq!(get_file_size("/this/path/does/not/exist.lnk"), 0);
    }

    #[test]
    fn test_write_file() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tmp");
        std::fs::create_dir_all(&test_location).unwrap();
        test_location.push("write_test.bin");

        let path = test_location.display().to_string();
        write_file(&path, &[76, 0, 0, 0]).unwrap();
        assert_eq!(read_file(&path).unwrap(), [76, 0, 0, 0]);
    }

    #[test]
    fn test_glob_paths() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/lnk/*.lnk");

        let results = glob_paths(&test_location.display().to_string()).unwrap();
        assert!(!results.is_empty());
        assert!(results[0].ends_with(".lnk"));
    }

    #[test]
    fn test_bad_glob() {
        let result = glob_paths("[[");
        assert_eq!(result, Err(FileSystemError::BadGlob));
    }
}

use std::fs;
use std::path::Path;

use crate::errors::LocalizeError;

// @module: Document loading and writing

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Read the whole document as UTF-8 text
    ///
    /// Fails with `NotFound` when the path is not a file. Undecodable
    /// content surfaces as a `Read` error of kind `InvalidData`.
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String, LocalizeError> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(LocalizeError::NotFound { path: path.to_path_buf() });
        }

        fs::read_to_string(path).map_err(|source| LocalizeError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrite the document in place, truncating prior content
    pub fn write_document<P: AsRef<Path>>(path: P, content: &str) -> Result<(), LocalizeError> {
        let path = path.as_ref();
        fs::write(path, content).map_err(|source| LocalizeError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

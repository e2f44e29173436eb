use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::errors::FileError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), FileError> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(|source| FileError::CreateDir {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    // @generates: Output path next to the input with a new extension
    // @example: talk.en.json3 -> talk.en.vtt
    pub fn default_output_path<P: AsRef<Path>>(input_file: P, extension: &str) -> PathBuf {
        input_file.as_ref().with_extension(extension)
    }

    /// Find files with a specific extension in a directory, recursively
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>, FileError> {
        let dir = dir.as_ref();
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| FileError::Read {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: e.into(),
            })?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(wanted) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, FileError> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(FileError::NotFound(path.to_path_buf()));
        }

        fs::read_to_string(path).map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a string to a file, all or nothing.
    ///
    /// Content goes to a temporary file in the destination directory which
    /// is then renamed over the target. On failure the temporary file is
    /// removed and any previous target is left untouched.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FileError> {
        let path = path.as_ref();
        let write_err = |source: std::io::Error| FileError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(parent)?;

        let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.persist(path).map_err(|e| write_err(e.error))?;

        Ok(())
    }
}

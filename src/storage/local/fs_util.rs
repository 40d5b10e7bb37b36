use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use tempfile::NamedTempFile;
use tracing::trace;

const KEY_DELIMITER: char = '/';

pub fn check_directory_traversal(key: &str) -> bool {
    let re = Regex::new(r"\.\.[/\\]").unwrap();
    re.is_match(key)
}

pub fn is_key_a_directory(key: &str) -> bool {
    key.ends_with(KEY_DELIMITER)
}

pub fn remove_root_slash(key: &str) -> String {
    let re = Regex::new(r"^/+").unwrap();
    re.replace(key, "").to_string()
}

/// Local path of the file for `key`: every segment of the key below `path`.
pub fn key_to_file_path(path: &Path, key: &str) -> PathBuf {
    remove_root_slash(key)
        .split(KEY_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .fold(path.to_path_buf(), |file_path, segment| file_path.join(segment))
}

/// Local directory that holds the file for `key`.
/// A key ending with the delimiter is a directory itself.
pub fn key_to_directory_without_filename(path: &Path, key: &str) -> PathBuf {
    let file_path = key_to_file_path(path, key);
    if is_key_a_directory(key) {
        return file_path;
    }

    match file_path.parent() {
        Some(parent) if file_path != path => parent.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

pub async fn create_directory_hierarchy_from_key(path: &Path, key: &str) -> Result<bool> {
    let directory_path = key_to_directory_without_filename(path, key);

    let result = directory_path.try_exists();
    if result.is_ok() && result? {
        return Ok(false);
    }

    tokio::fs::create_dir_all(&directory_path)
        .await
        .context("tokio::fs::create_dir_all() failed.")?;

    let directory = directory_path.to_string_lossy().to_string();
    trace!(key = key, directory = directory, "directory created.");

    Ok(true)
}

pub async fn create_temp_file_from_key(path: &Path, key: &str) -> Result<NamedTempFile> {
    create_directory_hierarchy_from_key(path, key).await?;

    let temp_directory_path = key_to_directory_without_filename(path, key);
    let file =
        NamedTempFile::new_in(temp_directory_path).context("NamedTempFile::new_in failed.")?;
    Ok(file)
}

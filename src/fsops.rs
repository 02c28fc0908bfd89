//! File mutation helpers for the application skeleton
//!
//! These are the side effects invoked from deferred callbacks: creating and
//! appending files, injecting snippets around markers, and commenting lines in
//! and out of existing configuration files.

use std::io::Write;
use std::path::Path;

use regex::Regex;

use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

/// Writes `content` to a new file, creating parent directories as needed.
///
/// Refuses to clobber an existing file unless `overwrite` is set.
pub fn create_file<P: AsRef<Path>>(path: P, content: &str, overwrite: bool) -> Result<()> {
    let path = path.as_ref();
    if path.exists() && !overwrite {
        return Err(Error::FileExistsError { path: path.display().to_string() });
    }
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    log::debug!("creating {}", path.display());
    std::fs::write(path, content).map_err(Error::IoError)
}

/// Appends `content` to a file, creating it when missing.
pub fn append_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(content.as_bytes()).map_err(Error::IoError)
}

/// Inserts `content` at the top of an existing file.
pub fn prepend_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let existing = std::fs::read_to_string(path)?;
    std::fs::write(path, format!("{content}{existing}")).map_err(Error::IoError)
}

/// Inserts `content` immediately after the first occurrence of `marker`.
pub fn inject_after_marker<P: AsRef<Path>>(path: P, marker: &str, content: &str) -> Result<()> {
    inject(path.as_ref(), marker, content, true)
}

/// Inserts `content` immediately before the first occurrence of `marker`.
pub fn inject_before_marker<P: AsRef<Path>>(path: P, marker: &str, content: &str) -> Result<()> {
    inject(path.as_ref(), marker, content, false)
}

fn inject(path: &Path, marker: &str, content: &str, after: bool) -> Result<()> {
    let existing = std::fs::read_to_string(path)?;
    let position = existing.find(marker).ok_or_else(|| Error::MarkerNotFoundError {
        path: path.display().to_string(),
        marker: marker.to_string(),
    })?;

    let split = if after { position + marker.len() } else { position };
    let mut updated = String::with_capacity(existing.len() + content.len());
    updated.push_str(&existing[..split]);
    updated.push_str(content);
    updated.push_str(&existing[split..]);
    std::fs::write(path, updated).map_err(Error::IoError)
}

/// Removes a file; missing files are tolerated.
pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("skipping removal of {}: not present", path.display());
        return Ok(());
    }
    std::fs::remove_file(path).map_err(Error::IoError)
}

/// Comments out every line matching `pattern`, preserving indentation.
/// Already commented lines are left alone.
pub fn comment_lines<P: AsRef<Path>>(path: P, pattern: &str) -> Result<()> {
    let re = Regex::new(pattern)?;
    rewrite_lines(path.as_ref(), |line| {
        if re.is_match(line) && !line.trim_start().starts_with('#') {
            let indent_len = line.len() - line.trim_start().len();
            Some(format!("{}# {}", &line[..indent_len], &line[indent_len..]))
        } else {
            None
        }
    })
}

/// Uncomments every commented line matching `pattern`, removing one leading
/// `#` (and one following space) after the indentation.
pub fn uncomment_lines<P: AsRef<Path>>(path: P, pattern: &str) -> Result<()> {
    let re = Regex::new(pattern)?;
    let comment = Regex::new(r"^([ \t]*)#[ \t]?").expect("static pattern");
    rewrite_lines(path.as_ref(), |line| {
        if re.is_match(line) && comment.is_match(line) {
            Some(comment.replace(line, "$1").into_owned())
        } else {
            None
        }
    })
}

/// Replaces every match of `pattern` in the file with `replacement`.
pub fn replace_in_file<P: AsRef<Path>>(path: P, pattern: &str, replacement: &str) -> Result<()> {
    let path = path.as_ref();
    let re = Regex::new(pattern)?;
    let existing = std::fs::read_to_string(path)?;
    let updated = re.replace_all(&existing, replacement);
    std::fs::write(path, updated.as_ref()).map_err(Error::IoError)
}

fn rewrite_lines(path: &Path, mut transform: impl FnMut(&str) -> Option<String>) -> Result<()> {
    let existing = std::fs::read_to_string(path)?;
    let mut updated = String::with_capacity(existing.len());
    for line in existing.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        match transform(body) {
            Some(replaced) => {
                updated.push_str(&replaced);
                updated.push_str(newline);
            }
            None => updated.push_str(line),
        }
    }
    std::fs::write(path, updated).map_err(Error::IoError)
}

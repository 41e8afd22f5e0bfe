//! Terminal input helpers.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use client::validation;
use rpassword::prompt_password;

/// Read one trimmed line from stdin. Blank input is returned as is so the
/// caller's validation can word the error.
pub fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("failed to read from stdin")?;
    Ok(input.trim().to_string())
}

/// `value` when given on the command line, otherwise ask for it.
pub fn value_or_prompt(value: Option<String>, message: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value.trim().to_string()),
        None => prompt(message),
    }
}

/// Read a password without echoing it.
pub fn secret(message: &str) -> Result<String> {
    prompt_password(message).context("failed to read password")
}

/// Yes/no question; anything but `y` or `yes` is a no.
pub fn confirm(message: &str) -> Result<bool> {
    let answer = prompt(&format!("{message} [y/N] "))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Load a listing photo. Type and size are checked from the file name and
/// metadata before any bytes are read.
pub fn read_photo(path: &Path) -> Result<(String, Vec<u8>)> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    let size = fs::metadata(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .len();
    validation::photo(&name, usize::try_from(size).unwrap_or(usize::MAX))?;

    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok((name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::validation::MAX_PHOTO_BYTES;
    use tempfile::TempDir;

    #[test]
    fn photo_within_limit_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("front.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let (name, bytes) = read_photo(&path).unwrap();
        assert_eq!(name, "front.png");
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn oversized_photo_is_rejected_from_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.jpg");
        let file = fs::File::create(&path).unwrap();
        file.set_len(u64::try_from(MAX_PHOTO_BYTES).unwrap() + 1).unwrap();

        let err = read_photo(&path).unwrap_err();
        assert_eq!(err.to_string(), "Each image must be less than 1MB");
    }

    #[test]
    fn unsupported_type_is_rejected_before_reading() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.pdf");
        fs::write(&path, b"%PDF").unwrap();

        let err = read_photo(&path).unwrap_err();
        assert_eq!(err.to_string(), "Please select JPEG, PNG images only");
    }

    #[test]
    fn missing_photo_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.jpg");

        let err = read_photo(&path).unwrap_err();
        assert!(err.to_string().contains("gone.jpg"));
    }
}

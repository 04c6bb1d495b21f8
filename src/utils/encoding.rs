//! Encoding detection for CSV exports.
//!
//! CRM and analytics exports arrive in whatever encoding the exporting tool
//! preferred. Strategy:
//! - BOM detection (UTF-8, UTF-16 LE/BE), with the BOM stripped
//! - UTF-8 fast-path with strict validation
//! - Fallback encoding detection using chardetng
//! - Decoding with replacement characters as a last resort

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::path::Path;

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Detect the encoding of a byte buffer.
///
/// Returns a normalized label such as `"utf-8"`, `"utf-8-sig"`,
/// `"utf-16-le"` or `"windows-1252"`.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "utf-8".to_string();
    }

    // Check for BOM markers first (most reliable)
    if bytes.starts_with(&[0xef, 0xbb, 0xbf]) {
        return "utf-8-sig".to_string();
    }
    if bytes.starts_with(&[0xff, 0xfe]) {
        return "utf-16-le".to_string();
    }
    if bytes.starts_with(&[0xfe, 0xff]) {
        return "utf-16-be".to_string();
    }

    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    let name = detector.guess(None, true).name().to_lowercase();
    if name.contains("utf-8") || name == "ascii" {
        "utf-8".to_string()
    } else {
        name
    }
}

/// Decode `bytes` to a string, returning `(content, encoding_used)`.
///
/// BOMs are stripped so the first CSV header is not polluted.
pub fn decode_bytes(bytes: &[u8]) -> (String, String) {
    let label = detect_encoding(bytes);
    let (encoding, body): (&'static Encoding, &[u8]) = match label.as_str() {
        "utf-8-sig" => (UTF_8, &bytes[3..]),
        "utf-16-le" => (UTF_16LE, &bytes[2..]),
        "utf-16-be" => (UTF_16BE, &bytes[2..]),
        "utf-8" => {
            if let Ok(text) = std::str::from_utf8(bytes) {
                return (text.to_string(), "utf-8".to_string());
            }
            (UTF_8, bytes)
        }
        other => (Encoding::for_label(other.as_bytes()).unwrap_or(UTF_8), bytes),
    };

    let (decoded, _) = encoding.decode_without_bom_handling(body);
    (decoded.into_owned(), label)
}

/// Read a whole file and decode it with [`decode_bytes`].
pub fn read_text_file(path: &Path) -> Result<(String, String)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(decode_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_utf8() {
        assert_eq!(detect_encoding("Hello, world!".as_bytes()), "utf-8");
    }

    #[test]
    fn test_detect_utf8_bom() {
        assert_eq!(detect_encoding(&[0xef, 0xbb, 0xbf, b'a']), "utf-8-sig");
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"Account.Name,channel_id\n");
        let (content, encoding) = decode_bytes(&bytes);
        assert_eq!(encoding, "utf-8-sig");
        assert!(content.starts_with("Account.Name"));
    }

    #[test]
    fn test_utf16_le_decodes() {
        let mut bytes = vec![0xff, 0xfe];
        for unit in "a,b".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (content, encoding) = decode_bytes(&bytes);
        assert_eq!(encoding, "utf-16-le");
        assert_eq!(content, "a,b");
    }

    #[test]
    fn test_legacy_encoding_falls_back() {
        // "Café" in windows-1252
        let (content, encoding) = decode_bytes(&[b'C', b'a', b'f', 0xe9]);
        assert_ne!(encoding, "utf-8");
        assert!(content.starts_with("Caf"));
        assert_eq!(content.chars().count(), 4);
    }

    #[test]
    fn test_read_text_file_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("Test content 🚀".as_bytes()).unwrap();
        file.flush().unwrap();

        let (content, encoding) = read_text_file(file.path()).unwrap();
        assert_eq!(content, "Test content 🚀");
        assert_eq!(encoding, "utf-8");
    }
}

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for file extensions kept on uploaded files
    /// Must be 1-16 ASCII alphanumerics, no dots or separators
    /// - Valid: "png", "JPG", "webp", "tar"
    /// - Invalid: "", "png/../x", "p g", "ñ"
    pub static ref EXTENSION_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{1,16}$").unwrap();
}

/// Extract a safe extension from an uploaded file's original name
pub fn sanitize_extension(original_filename: &str) -> Option<String> {
    let (_, ext) = original_filename.rsplit_once('.')?;
    EXTENSION_REGEX.is_match(ext).then(|| ext.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_regex_valid() {
        assert!(EXTENSION_REGEX.is_match("png"));
        assert!(EXTENSION_REGEX.is_match("JPG"));
        assert!(EXTENSION_REGEX.is_match("webp"));
    }

    #[test]
    fn test_extension_regex_invalid() {
        assert!(!EXTENSION_REGEX.is_match("")); // empty
        assert!(!EXTENSION_REGEX.is_match("png/../x")); // path separator
        assert!(!EXTENSION_REGEX.is_match("p g")); // space
        assert!(!EXTENSION_REGEX.is_match("abcdefghijklmnopq")); // too long
    }

    #[test]
    fn test_sanitize_extension() {
        assert_eq!(sanitize_extension("michi.PNG"), Some("PNG".to_string()));
        assert_eq!(sanitize_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(sanitize_extension("no_extension"), None);
        assert_eq!(sanitize_extension("evil./etc"), None);
        assert_eq!(sanitize_extension("trailing."), None);
    }
}

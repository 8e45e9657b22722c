//! Filename rules for uploaded files.

/// File extensions accepted for upload (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "txt", "py", "pdf", "docx", "xlsx", "csv", "md", "rtf",
    "mp3", "wav", "mp4", "avi", "mov", "zip", "rar", "7z",
];

/// Reduces a client-supplied filename to its last path component.
///
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();

    if name.is_empty() || name == "." || name == ".." {
        return None;
    }

    Some(name.to_string())
}

/// Returns true if `filename` ends in one of [`ALLOWED_EXTENSIONS`].
pub fn has_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(stem, ext)| {
            !stem.is_empty() && ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("report.pdf").as_deref(), Some("report.pdf"));
        assert_eq!(
            sanitize_filename("../../etc/passwd.txt").as_deref(),
            Some("passwd.txt")
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\photo.JPG").as_deref(),
            Some("photo.JPG")
        );
    }

    #[test]
    fn test_sanitize_rejects_empty_names() {
        assert!(sanitize_filename("").is_none());
        assert!(sanitize_filename("dir/").is_none());
        assert!(sanitize_filename("..").is_none());
        assert!(sanitize_filename("   ").is_none());
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(has_allowed_extension("photo.JPG"));
        assert!(has_allowed_extension("archive.tar.7z"));
        assert!(has_allowed_extension("notes.md"));
        assert!(!has_allowed_extension("script.sh"));
        assert!(!has_allowed_extension("README"));
        assert!(!has_allowed_extension(".png"));
    }
}

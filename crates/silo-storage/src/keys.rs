//! Storage key derivation.
//!
//! Keys look like `prefix/YYYY/MM/base-suffix.ext`: assets partition by
//! calendar month, the basename is reduced to storage- and URL-safe
//! characters, and a fresh 8-hex-char random suffix is the sole
//! collision-avoidance mechanism. There is no existence check before use, so
//! keys are probabilistically unique, not guaranteed unique. Everything here
//! is pure apart from drawing randomness.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

/// Month-partitioned directory: `base/YYYY/MM`, or `YYYY/MM` when the base
/// is empty. Zero-padded month, forward slashes regardless of host OS.
pub fn target_dir(base_dir: &str, at: DateTime<Utc>) -> String {
    let base = base_dir.trim_end_matches('/');
    if base.is_empty() {
        format!("{}/{:02}", at.year(), at.month())
    } else {
        format!("{}/{}/{:02}", base, at.year(), at.month())
    }
}

/// Derive `target_dir/sanitizedBase-<8hex><ext>` for an uploaded filename.
///
/// The extension is preserved verbatim, dot included, so content-type
/// inference downstream keeps working. Each call draws a new suffix from a
/// cryptographically secure source; deriving twice for the same logical file
/// yields two distinct keys.
pub fn unique_file_name(file_name: &str, target_dir: &str) -> String {
    let (base, ext) = split_extension(file_name);
    let base = sanitize_base(base);
    let suffix = random_suffix();
    let name = if base.is_empty() {
        format!("{suffix}{ext}")
    } else {
        format!("{base}-{suffix}{ext}")
    };
    format!("{}/{}", target_dir.trim_end_matches('/'), name)
}

/// Strip the leading path separator. Object stores reject or mis-route keys
/// that start with one.
pub fn normalize_key(key: &str) -> &str {
    key.trim_start_matches('/')
}

/// Join a directory and file name into a normalized object key.
pub fn object_key(dir: &str, file_name: &str) -> String {
    normalize_key(&format!(
        "{}/{}",
        dir.trim_end_matches('/'),
        file_name.trim_start_matches('/')
    ))
    .to_string()
}

/// Public URL for a stored object: asset host with any trailing slash
/// stripped, joined to the normalized key. No URL-encoding is performed;
/// sanitization already produced URL-safe characters.
pub fn public_url(asset_host: &str, key: &str) -> String {
    format!("{}/{}", asset_host.trim_end_matches('/'), normalize_key(key))
}

/// Replace every character outside `[A-Za-z0-9_@.]` with `-`, then trim
/// trailing dashes so the random suffix joins with exactly one. This keeps
/// path-traversal characters, spaces, and key-unsafe characters out of the
/// store.
fn sanitize_base(base: &str) -> String {
    let mapped: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    mapped.trim_end_matches('-').to_string()
}

/// Extension including the dot, taken from the last dot not at position
/// zero (`.gitignore` has no extension, `archive.tar.gz` has `.gz`).
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

fn random_suffix() -> String {
    hex::encode(rand::rng().random::<[u8; 4]>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use regex::Regex;

    #[test]
    fn target_dir_partitions_by_zero_padded_month() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(target_dir("ghost-media", at), "ghost-media/2024/03");
    }

    #[test]
    fn target_dir_without_base_is_year_month() {
        let at = Utc.with_ymd_and_hms(2024, 11, 30, 23, 59, 59).unwrap();
        assert_eq!(target_dir("", at), "2024/11");
        assert_eq!(target_dir("prefix/", at), "prefix/2024/11");
    }

    #[test]
    fn unique_name_sanitizes_base_and_preserves_extension() {
        let key = unique_file_name("My Photo!.PNG", "ghost-media/2024/03");
        let pattern = Regex::new(r"^ghost-media/2024/03/My-Photo-[0-9a-f]{8}\.PNG$").unwrap();
        assert!(pattern.is_match(&key), "unexpected key: {key}");
    }

    #[test]
    fn sanitized_base_contains_only_safe_characters() {
        let key = unique_file_name("weird névé name (1) [copy].jpeg", "d");
        let base = key
            .rsplit('/')
            .next()
            .unwrap()
            .strip_suffix(".jpeg")
            .unwrap();
        assert!(base
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '.' | '-')));
    }

    #[test]
    fn allowed_characters_survive_sanitization() {
        let key = unique_file_name("user@host_v1.2.txt", "d");
        let name = key.rsplit('/').next().unwrap();
        assert!(name.starts_with("user@host_v1.2-"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn successive_calls_yield_distinct_keys() {
        let first = unique_file_name("photo.jpg", "media/2024/03");
        let second = unique_file_name("photo.jpg", "media/2024/03");
        assert_ne!(first, second);
    }

    #[test]
    fn names_without_extension_get_no_dot() {
        let key = unique_file_name("README", "docs");
        let pattern = Regex::new(r"^docs/README-[0-9a-f]{8}$").unwrap();
        assert!(pattern.is_match(&key), "unexpected key: {key}");
    }

    #[test]
    fn leading_dot_names_are_not_treated_as_extensions() {
        let key = unique_file_name(".env", "d");
        let pattern = Regex::new(r"^d/\.env-[0-9a-f]{8}$").unwrap();
        assert!(pattern.is_match(&key), "unexpected key: {key}");
    }

    #[test]
    fn fully_illegal_base_reduces_to_suffix_only() {
        let key = unique_file_name("!!!.png", "d");
        let pattern = Regex::new(r"^d/[0-9a-f]{8}\.png$").unwrap();
        assert!(pattern.is_match(&key), "unexpected key: {key}");
    }

    #[test]
    fn normalize_key_strips_leading_separators() {
        assert_eq!(normalize_key("/media/2024/03/a.png"), "media/2024/03/a.png");
        assert_eq!(normalize_key("media/a.png"), "media/a.png");
    }

    #[test]
    fn object_key_joins_without_duplicate_separators() {
        assert_eq!(object_key("media/2024/03/", "/a.png"), "media/2024/03/a.png");
        assert_eq!(object_key("/media", "a.png"), "media/a.png");
    }

    #[test]
    fn public_url_has_no_double_slash() {
        let url = public_url("https://cdn.example.com/", "/media/2024/03/a.png");
        assert_eq!(url, "https://cdn.example.com/media/2024/03/a.png");
    }
}

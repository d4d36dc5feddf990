//! Filesystem path helpers.

use std::path::PathBuf;

use dirs_next::home_dir;

/// Expand a leading `~` to the user's home directory.
///
/// Unexpandable input comes back as-is so callers can surface the literal
/// path in their error message.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    if trimmed == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_paths_through() {
        assert_eq!(expand_tilde("/etc/steeple/defaults.json"), PathBuf::from("/etc/steeple/defaults.json"));
        assert_eq!(expand_tilde("relative/defaults.json"), PathBuf::from("relative/defaults.json"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(expand_tilde("  /tmp/defaults.json  "), PathBuf::from("/tmp/defaults.json"));
    }

    #[test]
    fn expands_home_prefix() {
        let expanded = expand_tilde("~/defaults.json");
        assert!(expanded.ends_with("defaults.json"));
        assert!(!expanded.to_string_lossy().starts_with('~') || home_dir().is_none());
    }
}

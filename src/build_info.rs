//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line version string for `--version`.
pub fn version_line() -> String {
    format!("flip-birds {} ({} {})", VERSION, BUILD_COMMIT, BUILD_DATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_format() {
        // YYYY-MM-DD
        assert!(BUILD_DATE.len() == 10 || BUILD_DATE == "unknown");
    }

    #[test]
    fn test_version_line_mentions_everything() {
        let line = version_line();
        assert!(line.starts_with("flip-birds "));
        assert!(line.contains(VERSION));
        assert!(line.contains(BUILD_COMMIT));
    }
}

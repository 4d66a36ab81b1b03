//! Build script to embed commit hash and build date at compile time.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    // Commit from env var (release CI) or git (local builds)
    let commit = env::var("FLIP_BIRDS_COMMIT").unwrap_or_else(|_| {
        Command::new("git")
            .args(["rev-parse", "--short=7", "HEAD"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    });

    let date = env::var("FLIP_BIRDS_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let Ok(out_dir) = env::var("OUT_DIR") else {
        panic!("OUT_DIR not set by cargo");
    };
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    let generated = format!(
        r#"pub const BUILD_COMMIT: &str = "{}";
pub const BUILD_DATE: &str = "{}";"#,
        commit, date
    );
    if let Err(e) = fs::write(&dest_path, generated) {
        panic!("failed to write {}: {}", dest_path.display(), e);
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=FLIP_BIRDS_COMMIT");
    println!("cargo:rerun-if-env-changed=FLIP_BIRDS_BUILD_DATE");
}

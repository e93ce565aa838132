//! Build script for the wrapcover CLI.
//!
//! Copies the `.env.example` configuration template into the user's local data
//! directory so the expected configuration file has a ready-to-edit sibling:
//! - Linux: `~/.local/share/wrapcover/.env.example`
//! - macOS: `~/Library/Application Support/wrapcover/.env.example`
//! - Windows: `%LOCALAPPDATA%/wrapcover/.env.example`
//!
//! A missing template only produces a cargo warning; failing to create the
//! directory or write the file fails the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("wrapcover");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        fs::copy(&env_example_path, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}

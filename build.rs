//! Build script for the HandMixed backend.
//!
//! Copies the `.env.example` configuration template from the crate root
//! into the platform-specific local data directory (`handmixed/`), so a
//! ready-to-edit template sits next to the `.env` file the server loads at
//! startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` to the local data directory.
///
/// The copy is best-effort: a missing template produces a cargo warning
/// instead of failing the build, while directory-creation or write failures
/// are treated as critical and abort it.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=env.example");

    // Where to copy FROM (crate root)
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    // Compute target dir (the local data dir) and ensure it exists
    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("handmixed");
    fs::create_dir_all(&out_dir)?;

    // Only copy if the source exists; otherwise warn instead of failing
    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}

//! Build script for checkupcli.
//!
//! Copies the `.env.example` template into the platform local data directory
//! (`~/.local/share/checkupcli/` on Linux) so a fresh install finds a
//! configuration template next to where `config::load_env` looks for `.env`.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("checkupcli");
    fs::create_dir_all(&out_dir)?;

    // Missing template only warns so packaging from a bare tree still builds.
    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}

// Licensed under the Apache-2.0 license

//! Generate tock-registers modules from an SVD file.
//!
//! Writes one `<peripheral>.rs` per selected peripheral plus a `lib.rs`
//! declaring them. Rust files left over from earlier runs are removed
//! first, so the output directory always matches the SVD.

use anyhow::{Context, Result};
use registers_generator::util::FILE_EXTENSION;
use registers_generator::{generate_from_file, output_file_names, render_lib_rs, GeneratedFile};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::GenerateConfig;

const HEADER: &str = "// Licensed under the Apache-2.0 license\n// Generated by xtask svd-gen\n\n";

pub fn generate(config: &GenerateConfig, dry_run: bool) -> Result<()> {
    let svd = config
        .svd
        .as_deref()
        .context("no SVD file given (--svd or `svd` in the config file)")?;
    let dest_dir = config
        .output
        .as_deref()
        .context("no output directory given (--output or `output` in the config file)")?;
    let filter = config.filter();

    println!("Generating registers from: {}", svd.display());

    if dry_run {
        let device = registers_svd::parse_file(svd)?;
        for file_name in output_file_names(&device, &filter) {
            println!("  {}", dest_dir.join(file_name).display());
        }
        return Ok(());
    }

    let files = generate_from_file(svd, &filter, &config.render_options())?;
    let written = write_files(dest_dir, &files)?;

    println!("\n=== Generation Summary ===");
    println!(
        "Generated: {} modules in {}",
        written.len() - 1,
        dest_dir.display()
    );

    Ok(())
}

/// Replaces the Rust files in `dest_dir` with `files` and their `lib.rs`.
/// Returns the written paths, `lib.rs` last.
fn write_files(dest_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("failed to create {}", dest_dir.display()))?;
    remove_stale_files(dest_dir)?;

    let mut written = Vec::new();
    for file in files {
        let path = dest_dir.join(&file.file_name);
        let content = format!("{HEADER}{}", file.code);
        fs::write(&path, &content).with_context(|| format!("failed to write {}", path.display()))?;
        println!("  ✓ Generated {} ({} bytes)", path.display(), content.len());
        written.push(path);
    }

    let modules: Vec<String> = files
        .iter()
        .map(|file| file.file_name.trim_end_matches(FILE_EXTENSION).to_string())
        .collect();
    let lib_path = dest_dir.join("lib.rs");
    fs::write(&lib_path, format!("{HEADER}{}", render_lib_rs(&modules)))
        .with_context(|| format!("failed to write {}", lib_path.display()))?;
    println!("  ✓ Generated {}", lib_path.display());
    written.push(lib_path);

    Ok(written)
}

fn remove_stale_files(dest_dir: &Path) -> Result<()> {
    for entry in WalkDir::new(dest_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let is_rust = entry.path().extension().is_some_and(|ext| ext == "rs");
        if entry.file_type().is_file() && is_rust {
            log::debug!("Removing {}", entry.path().display());
            fs::remove_file(entry.path())
                .with_context(|| format!("failed to remove {}", entry.path().display()))?;
        }
    }
    Ok(())
}

//! Validate command — structural checks for level files

use crate::level::LevelFile;
use anyhow::{bail, Context, Result};

pub fn run(level_path: &str) -> Result<()> {
    let level = LevelFile::load(level_path)
        .with_context(|| format!("Failed to load level '{}'", level_path))?;

    let violations = level.validate();
    if violations.is_empty() {
        println!(
            "OK: {} ({} rects, {} patrols)",
            level.level.name,
            level.rects.len(),
            level.patrols.len()
        );
        return Ok(());
    }

    for v in &violations {
        println!("violation: {}", v);
    }
    bail!("{} violation(s) in '{}'", violations.len(), level_path);
}

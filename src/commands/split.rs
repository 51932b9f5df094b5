//! Implementation of the `proofwatch split` command.

use std::fmt::Write;
use std::path::Path;

use crate::cli::SplitArgs;
use crate::diff::split_diff_into_files;
use crate::error::Result;

use super::read_diff;

/// Execute the `proofwatch split` command.
pub fn cmd_split(args: &SplitArgs) -> Result<()> {
    print!("{}", run_split(&args.diff)?);
    Ok(())
}

/// One `<path>: <n> lines` row per file section, in diff order.
pub fn run_split(path: &Path) -> Result<String> {
    let diff = read_diff(path)?;
    let sections = split_diff_into_files(&diff);

    let mut out = String::new();
    for (file, section) in &sections {
        let _ = writeln!(out, "{}: {} lines", file, section.lines().count());
    }
    if sections.is_empty() {
        out.push_str("No file sections found.\n");
    }
    Ok(out)
}

//! Workspace source conventions that rustfmt does not enforce on its own

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const MAX_WIDTH: usize = 100;

#[test]
fn test_workspace_sources_fit_rustfmt_width() {
    let crates = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crate lives under crates/");
    let mut too_wide = Vec::new();

    for entry in WalkDir::new(crates)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "rs"))
        .filter(|e| !e.path().components().any(|c| c.as_os_str() == "target"))
    {
        let content = fs::read_to_string(entry.path()).unwrap();
        for (index, line) in content.lines().enumerate() {
            let width = line.chars().count();
            if width > MAX_WIDTH {
                too_wide.push(format!("{}:{} ({})", entry.path().display(), index + 1, width));
            }
        }
    }

    assert!(too_wide.is_empty(), "lines over {} columns:\n{}", MAX_WIDTH, too_wide.join("\n"));
}

//! Architecture tests for crate layering and session-owned state.
//!
//! Invariants:
//! - `shortcuts-config` never depends on `shortcuts-core`.
//! - Library code in `shortcuts-core` keeps no process-wide state; every
//!   registry and tree lives in a `Session` the host passes around.
//! - Library code does not `unwrap()` or `expect()`.
//! - Tree mutations and dispatch are reachable from outside `shortcuts-core`
//!   only through `Session`, which forwards detachment to the registry.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Markers of process-wide mutable state.
const AMBIENT_STATE_MARKERS: &[&str] = &[
    "static mut",
    "thread_local!",
    "OnceLock",
    "LazyLock",
    "lazy_static!",
];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .find(|dir| {
            fs::read_to_string(dir.join("Cargo.toml"))
                .is_ok_and(|content| content.contains("[workspace]"))
        })
        .map(Path::to_path_buf)
        .expect("workspace root with [workspace] Cargo.toml")
}

/// Source lines of `src/` files with `#[cfg(test)]` modules and doc comments stripped.
fn library_lines(crate_dir: &Path) -> Vec<(PathBuf, usize, String)> {
    let mut lines = Vec::new();
    for entry in WalkDir::new(crate_dir.join("src"))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
    {
        let content = fs::read_to_string(entry.path()).unwrap_or_default();
        for (number, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            if line.trim_start().starts_with("//") {
                continue;
            }
            lines.push((entry.path().to_path_buf(), number + 1, line.to_string()));
        }
    }
    lines
}

#[test]
fn test_config_crate_does_not_depend_on_core() {
    let manifest = fs::read_to_string(workspace_root().join("crates/config/Cargo.toml"))
        .expect("config manifest");
    assert!(
        !manifest.contains("shortcuts-core"),
        "shortcuts-config must stay independent of shortcuts-core"
    );
}

#[test]
fn test_core_has_no_ambient_state() {
    let violations: Vec<String> = library_lines(&workspace_root().join("crates/core"))
        .into_iter()
        .filter(|(_, _, line)| AMBIENT_STATE_MARKERS.iter().any(|m| line.contains(m)))
        .map(|(path, number, line)| format!("{}:{}: {}", path.display(), number, line.trim()))
        .collect();

    assert!(
        violations.is_empty(),
        "Process-wide state found in shortcuts-core:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_tree_mutations_route_through_session() {
    let core_src = workspace_root().join("crates/core/src");
    let checks: [(&str, &[&str]); 2] = [
        ("component.rs", &["pub fn append(", "pub fn detach(", "pub fn destroy("]),
        ("registry.rs", &["pub fn dispatch(", "pub fn handle_detached("]),
    ];

    let mut violations = Vec::new();
    for (file, signatures) in checks {
        let content = fs::read_to_string(core_src.join(file)).expect("core source file");
        for signature in signatures {
            if content.contains(signature) {
                violations.push(format!("{file}: {signature}"));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Detachment must reach the registry through Session; these are public: {:?}",
        violations
    );
}

#[test]
fn test_library_code_does_not_panic_on_errors() {
    let root = workspace_root();
    let mut violations = Vec::new();
    for krate in ["crates/config", "crates/core"] {
        for (path, number, line) in library_lines(&root.join(krate)) {
            if line.contains(".unwrap()") || line.contains(".expect(") {
                violations.push(format!("{}:{}: {}", path.display(), number, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "unwrap()/expect() in library code; propagate the error instead:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_library_lines_skip_test_modules() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src/lib.rs"),
        concat!(
            "// comment with .unwrap()\n",
            "pub fn f() {}\n",
            "\n",
            "#[cfg(test)]\n",
            "mod tests {\n",
            "    fn g() { None::<u8>.unwrap(); }\n",
            "}\n",
        ),
    )
    .unwrap();

    let lines = library_lines(dir.path());
    assert!(lines.iter().all(|(_, _, line)| !line.contains("unwrap")));
    assert!(lines.iter().any(|(_, _, line)| line.contains("pub fn f")));
}

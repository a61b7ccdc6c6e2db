use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use stratum_cli::{Args, Command, GenerateArgs, ListArgs, run};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Collects all .json request files from a directory
fn collect_request_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn catalog_path() -> String {
    workspace_root()
        .join("assets")
        .join("library.json")
        .to_string_lossy()
        .to_string()
}

fn generate_args(request: &Path, output_dir: &Path) -> Args {
    Args {
        command: Command::Generate(GenerateArgs {
            request: request.to_string_lossy().to_string(),
            name: None,
            scale: None,
            prompt: None,
            output_dir: Some(output_dir.to_string_lossy().to_string()),
            catalog: catalog_path(),
        }),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_demo_requests() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().to_path_buf();

    let requests = collect_request_files(workspace_root().join("demos"));
    assert!(!requests.is_empty(), "No demo requests found in demos/");

    let mut failed = Vec::new();
    for request in &requests {
        if let Err(e) = run(&generate_args(request, &output_dir)) {
            failed.push((request.clone(), e));
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemo requests that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo request(s) failed unexpectedly", failed.len());
    }

    let artifacts: Vec<_> = fs::read_dir(&output_dir)
        .unwrap()
        .flatten()
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("drawio"))
        .collect();
    assert_eq!(artifacts.len(), requests.len());

    // The todo demo carries a prompt
    assert!(output_dir.join("prompts").join("todo_system_v1.0.0.md").is_file());

    println!("✅ All {} demo requests passed", requests.len());
}

#[test]
fn e2e_smoke_test_missing_request_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = generate_args(&temp_dir.path().join("missing.json"), temp_dir.path());

    assert!(run(&args).is_err());
}

#[test]
fn e2e_smoke_test_missing_catalog_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = Args {
        command: Command::List(ListArgs {
            category: None,
            catalog: temp_dir.path().join("none.json").to_string_lossy().to_string(),
        }),
        config: None,
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err());
}

#[test]
fn e2e_smoke_test_list_component_types() {
    let listing = stratum_cli::list(&ListArgs {
        category: Some("storage".to_string()),
        catalog: catalog_path(),
    })
    .unwrap();

    let types: serde_json::Value = serde_json::from_str(&listing).unwrap();
    let types = types.as_array().unwrap();
    assert!(types.iter().any(|t| t["id"] == "system_boundary"));
    assert!(types.iter().all(|t| t.get("styleString").is_some()));
}

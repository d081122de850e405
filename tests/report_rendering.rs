//! End-to-end rendering of the registry fixtures

use std::path::{Path, PathBuf};

use feature_parity::{
    compute_matrix, output_filename, render_matrix, render_pairwise, FeatureRegistry, Language,
    Matcher, ParityError, ReportType,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn load(name: &str) -> FeatureRegistry {
    FeatureRegistry::load(fixture(name)).unwrap()
}

fn render(base: &str, target: &str, report_type: ReportType) -> String {
    let base = load(base);
    let target = load(target);
    let result = Matcher::default().match_registries(&base, &target, 0.8).unwrap();
    render_pairwise(&result, report_type, None).unwrap()
}

#[test]
fn test_fixtures_load() {
    let python = load("python.json");
    assert_eq!(python.language(), Language::Python);
    assert_eq!(python.version(), Some("1.2.0"));
    assert_eq!(python.len(), 6);
    assert_eq!(python.features()[0].namespace(), ["google", "adk", "agents"]);
    assert_eq!(python.features()[5].member_of(), None);

    let go = load("go.json");
    assert_eq!(go.version(), None);
    assert_eq!(go.features()[1].display_name(), "LlmAgent.RunAsync");
}

#[test]
fn test_symmetric_report() {
    let out = render("python.json", "typescript.json", ReportType::Symmetric);
    assert!(out.contains("| Shared features | 5 |"));
    assert!(out.contains("| Exclusive to Python | 1 |"));
    assert!(out.contains("| Exclusive to TypeScript | 1 |"));
    assert!(out.contains("| Jaccard score | 71.43% (5 / 7) |"));
}

#[test]
fn test_directional_report() {
    let out = render("python.json", "typescript.json", ReportType::Directional);
    assert!(out.starts_with("# Directional Parity: TypeScript against Python\n"));
    assert!(out.contains("| Precision | 0.8333 |"));
    assert!(out.contains("| Recall | 0.8333 |"));
    assert!(out.contains("| F1 | 0.8333 |"));
}

#[test]
fn test_raw_report() {
    let out = render("python.json", "typescript.json", ReportType::Raw);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "registry,language,kind,namespace,name,status,counterpart,score");
    assert_eq!(
        lines[1],
        "base,py,class,google.adk.agents,LlmAgent,matched,adk.agents.LlmAgent,0.9700"
    );
    assert_eq!(lines[6], "base,py,function,google.adk.artifacts,delete_artifact,unmatched,,0.0000");
    assert_eq!(lines[12], "target,ts,class,adk.runners,Runner,unmatched,,0.0000");
}

#[test]
fn test_markdown_report() {
    let out = render("python.json", "typescript.json", ReportType::Markdown);

    assert!(out.starts_with("# Feature Matching Parity Report\n"));
    assert!(out.contains("| **Base** | Python | 1.2.0 |"));
    assert!(out.contains("| **Target** | TypeScript | 0.4.0 |"));
    assert!(out.contains("| **📊 Jaccard Score** | **71.43%** | Overall Parity (5 / 7) |"));
    assert!(out.contains("| `google.adk.agents` | 2 | 0 | 0 | 100.00% | ✅ |"));
    assert!(out.contains("| `adk.runners` | 0 | 0 | 1 | 0.00% | ❌ |"));
    assert!(out.contains("| method | `LlmAgent.run_async` | `LlmAgent.runAsync` | 0.97 |"));
    assert!(out.contains("| function | `delete_artifact` | TypeScript |"));
    assert!(out.contains("| class | `Runner` | Python |"));
}

#[test]
fn test_reports_are_idempotent() {
    let report_types =
        [ReportType::Symmetric, ReportType::Directional, ReportType::Raw, ReportType::Markdown];
    for report_type in report_types {
        assert_eq!(
            render("python.json", "go.json", report_type),
            render("python.json", "go.json", report_type)
        );
    }
}

#[test]
fn test_matrix_report() {
    let registries = vec![load("python.json"), load("typescript.json"), load("go.json")];
    let matrix = compute_matrix(&registries, &Matcher::default(), 0.8).unwrap();

    assert_eq!(matrix.labels, vec!["Python 1.2.0", "TypeScript 0.4.0", "Go"]);
    assert!((matrix.score(0, 1).unwrap() - 5.0 / 7.0).abs() < 1e-12);
    assert!((matrix.score(0, 2).unwrap() - 5.0 / 6.0).abs() < 1e-12);
    assert!((matrix.score(1, 2).unwrap() - 5.0 / 6.0).abs() < 1e-12);

    let out = render_matrix(&matrix);
    assert!(out.contains("| | **Python 1.2.0** | **TypeScript 0.4.0** | **Go** |"));
    assert!(out.contains("| **Go** | 83.33% ⚠️ | 83.33% ⚠️ | - |"));
    assert_eq!(out, render_matrix(&matrix));
}

#[test]
fn test_report_written_under_derived_name() {
    let dir = tempfile::tempdir().unwrap();
    let content = render("typescript.json", "python.json", ReportType::Raw);

    let languages = [Language::TypeScript, Language::Python];
    let path = dir.path().join(output_filename(&languages, ReportType::Raw));
    std::fs::write(&path, &content).unwrap();

    assert!(path.ends_with("ts_py.csv"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_missing_registry_reports_path() {
    let err = FeatureRegistry::load(fixture("missing.json")).unwrap_err();
    match err {
        ParityError::RegistryLoad { path, source } => {
            assert!(path.ends_with("missing.json"));
            assert!(matches!(*source, ParityError::Io(_)));
        }
        other => panic!("Expected RegistryLoad, got {:?}", other),
    }
}

#[test]
fn test_unknown_language_is_rejected() {
    let err = FeatureRegistry::from_json(r#"{ "language": "cobol", "features": [] }"#).unwrap_err();
    assert!(matches!(err, ParityError::UnknownLanguage(tag) if tag == "cobol"));
}

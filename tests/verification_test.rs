use notebook_quiz::core::classifier::KeywordTables;
use notebook_quiz::core::ConfigProvider;
use notebook_quiz::core::Pipeline;
use notebook_quiz::{
    DifficultyLevel, LocalStorage, MarkerConfig, Notebook, QuizPipeline, QuizSettings, Verifier,
};
use tempfile::TempDir;

fn sample_notebook() -> serde_json::Value {
    serde_json::json!({
        "nbformat": 4,
        "nbformat_minor": 5,
        "metadata": {},
        "cells": [
            {"cell_type": "markdown", "metadata": {}, "source": [
                "### ■ Problem001\n",
                "Wire up the graph.\n"
            ]},
            {"cell_type": "code", "metadata": {}, "outputs": [], "execution_count": null, "source": [
                "# Answer001 - construction\n",
                "workflow = StateGraph(State)\n",
                "workflow.add_node(\"run\", run_node)\n"
            ]},
            {"cell_type": "code", "metadata": {}, "outputs": [], "execution_count": null, "source": [
                "# Answer001 - execution\n",
                "graph = workflow.compile()\n"
            ]},
            {"cell_type": "markdown", "metadata": {}, "source": ["### ■ Problem002\n"]},
            {"cell_type": "code", "metadata": {}, "outputs": [], "execution_count": null, "source": [
                "# Answer002\n",
                "result = graph.invoke(payload)\n"
            ]},
            {"cell_type": "code", "metadata": {}, "outputs": [], "execution_count": null, "source": [
                "scratch = 1\n"
            ]}
        ]
    })
}

fn generate(blanks: usize) -> (Notebook, Notebook) {
    let dir = TempDir::new().unwrap();
    let notebook_path = dir.path().join("lesson.ipynb");
    std::fs::write(&notebook_path, serde_json::to_vec(&sample_notebook()).unwrap()).unwrap();

    let settings = QuizSettings::new(
        notebook_path.to_string_lossy().into_owned(),
        dir.path().join("out").to_string_lossy().into_owned(),
        MarkerConfig::default(),
        KeywordTables::default(),
        vec![DifficultyLevel::new("only", blanks)],
    );
    let pipeline = QuizPipeline::new(LocalStorage::new(".".to_string()), settings);

    let original = pipeline.extract().unwrap();
    let generated = pipeline.transform(&original, blanks).unwrap();
    (original, generated)
}

#[test]
fn test_generated_notebook_passes_verification() {
    let (original, generated) = generate(5);

    let markers = MarkerConfig::default();
    let report = Verifier::new(&markers).verify(&original, &generated, 5);

    assert!(report.passed(), "mismatches: {:?}", report.mismatches);
    // Problem001 owns two parts, Problem002 one.
    assert_eq!(report.checks.len(), 3);
    assert!(report.checks.iter().all(|c| c.blanks_found >= 1));
    assert!(report.checks.iter().all(|c| c.blanks_found <= 5));
}

#[test]
fn test_verifier_rederives_answer_map_per_problem() {
    let (original, generated) = generate(3);

    let markers = MarkerConfig::default();
    let report = Verifier::new(&markers).verify(&original, &generated, 3);

    let problems: Vec<&str> = report.checks.iter().map(|c| c.problem.as_str()).collect();
    assert_eq!(problems, vec!["001", "001", "002"]);
    assert_eq!(report.checks[0].part, 1);
    assert_eq!(report.checks[1].part, 2);
}

#[test]
fn test_tampered_generated_notebook_fails() {
    let (original, mut generated) = generate(5);
    generated.cells[5].source = vec!["scratch = 999\n".to_string()];

    let markers = MarkerConfig::default();
    let report = Verifier::new(&markers).verify(&original, &generated, 5);

    assert!(!report.passed());
    assert!(report
        .mismatches
        .iter()
        .any(|m| m.contains("outside an answer region")));
}

#[test]
fn test_verification_against_wrong_target_fails_without_panicking() {
    // Generated with 5 blanks but verified against a target of 1.
    let (original, generated) = generate(5);

    let markers = MarkerConfig::default();
    let report = Verifier::new(&markers).verify(&original, &generated, 1);

    assert!(!report.passed());
    assert!(report.checks.iter().any(|c| !c.passed));
}

#[test]
fn test_settings_difficulties_reach_pipeline() {
    let settings = QuizSettings::new(
        "lesson.ipynb".to_string(),
        "out".to_string(),
        MarkerConfig::default(),
        KeywordTables::default(),
        DifficultyLevel::default_levels(),
    );
    let blanks: Vec<usize> = settings.difficulties().iter().map(|d| d.blanks).collect();
    assert_eq!(blanks, vec![5, 10, 20]);
}

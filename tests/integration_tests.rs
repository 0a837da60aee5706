//! Integration tests for input loading and offline rendering

use resume_match::cli;
use resume_match::config::OutputFormat;
use resume_match::input::file_detector::FileType;
use resume_match::input::InputManager;
use resume_match::model::{AnalysisResult, Suggestions};
use resume_match::output::{ReportGenerator, ReportView, Tier};
use resume_match::ResumeMatchError;
use std::fs;
use tempfile::TempDir;

/// Result without a seven-factor block whose suggestions are a flat list of strings
const PLAIN_SUGGESTIONS_RESULT: &str = r#"{
    "match_score": 45.0,
    "match_classification": "Weak Match",
    "resume_skills": ["html", "css"],
    "job_skills": ["react", "typescript", "html"],
    "missing_skills": ["react", "typescript"],
    "matched_skills": ["html"],
    "scoring_breakdown": {"final_score": 45.0},
    "skill_match_percentage": 33.3,
    "bonus_percentage": 0.0,
    "suggestions": ["Build a React portfolio site", "Learn TypeScript basics"]
}"#;

#[tokio::test]
async fn test_load_pdf_resume_keeps_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jane_doe.pdf");
    fs::write(&path, b"%PDF-1.4\n%binary\xff\xfe").unwrap();

    let upload = InputManager::new().load_resume(&path).await.unwrap();

    assert_eq!(upload.file_name, "jane_doe.pdf");
    assert_eq!(upload.file_type, FileType::Pdf);
    assert_eq!(upload.bytes, b"%PDF-1.4\n%binary\xff\xfe".to_vec());
}

#[tokio::test]
async fn test_non_pdf_resume_is_still_uploaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.txt");
    fs::write(&path, "Jane Doe\nPython, SQL").unwrap();

    let upload = InputManager::new().load_resume(&path).await.unwrap();
    assert_eq!(upload.file_type, FileType::Text);
    assert_eq!(upload.len(), 20);
}

#[tokio::test]
async fn test_unknown_resume_type_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.xyz");
    fs::write(&path, "content").unwrap();

    let err = InputManager::new().load_resume(&path).await.unwrap_err();
    assert!(matches!(err, ResumeMatchError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_missing_resume_is_validation_error() {
    let err = InputManager::new()
        .load_resume(std::path::Path::new("does/not/exist.pdf"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_empty_resume_is_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.pdf");
    fs::write(&path, b"").unwrap();

    let err = InputManager::new().load_resume(&path).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_markdown_job_description_is_flattened() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.md");
    fs::write(&path, "# Backend Engineer\n\n## Requirements\n\n- **Python**\n- SQL\n").unwrap();

    let text = InputManager::new().load_job_description(&path).await.unwrap();

    assert!(text.contains("Backend Engineer"));
    assert!(text.contains("Python"));
    assert!(text.contains("SQL"));
    assert!(!text.contains("**"));
    assert!(!text.contains('#'));
}

#[tokio::test]
async fn test_markdown_extension_accepted_for_job() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.markdown");
    fs::write(&path, "**Python** developer").unwrap();

    assert!(cli::validate_file_extension(&path, cli::JOB_DESCRIPTION_EXTENSIONS).is_ok());
    let text = InputManager::new().load_job_description(&path).await.unwrap();
    assert_eq!(text, "Python developer");
}

#[tokio::test]
async fn test_pdf_job_description_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("job.pdf");
    fs::write(&path, b"%PDF-1.4").unwrap();

    let err = InputManager::new().load_job_description(&path).await.unwrap_err();
    assert!(matches!(err, ResumeMatchError::UnsupportedFormat(_)));
}

#[test]
fn test_plain_suggestions_result_renders() {
    let result = AnalysisResult::from_json(PLAIN_SUGGESTIONS_RESULT).unwrap();
    assert!(matches!(result.suggestions, Some(Suggestions::Plain(ref items)) if items.len() == 2));
    assert!(result.critical_missing_skills.is_empty());

    let view = ReportView::from_result(&result, false);
    assert_eq!(view.banner().unwrap().tier, Tier::Danger);
    assert!(view.critical_gap_alert().is_none());
    assert!(view.score_breakdown().unwrap().factors.is_none());

    let markdown = ReportGenerator::with_options(false, true, false, false)
        .generate_report(&view, &OutputFormat::Markdown)
        .unwrap();
    assert!(markdown.contains("## 🔴 Weak Match"));
    assert!(markdown.contains("- Build a React portfolio site"));
    assert!(!markdown.contains("Bonus Skills"));
}

#[test]
fn test_json_output_can_be_rendered_again() {
    let result = AnalysisResult::from_json(PLAIN_SUGGESTIONS_RESULT).unwrap();
    let view = ReportView::from_result(&result, true);

    let json = ReportGenerator::new()
        .generate_report(&view, &OutputFormat::Json)
        .unwrap();

    assert_eq!(AnalysisResult::from_json(&json).unwrap(), result);
}

#[test]
fn test_malformed_result_file() {
    let err = AnalysisResult::from_json(r#"{"match_score": "high"}"#).unwrap_err();
    assert!(matches!(err, ResumeMatchError::Serialization(_)));
}

//! Input manager for loading the resume upload and the job description

use crate::error::{Result, ResumeMatchError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::model::ResumeUpload;
use log::{info, warn};
use std::path::Path;

pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a resume file into memory for upload. The bytes are sent as-is.
    pub async fn load_resume(&self, path: &Path) -> Result<ResumeUpload> {
        if !path.exists() {
            return Err(ResumeMatchError::Validation(
                format!("Resume file does not exist: {}", path.display())
            ));
        }

        let file_type = FileType::from_path(path);
        match file_type {
            FileType::Pdf => {}
            FileType::Unknown => {
                return Err(ResumeMatchError::UnsupportedFormat(
                    format!("Unsupported resume file type: {}", path.display())
                ));
            }
            other => warn!("Resume {} is {:?}, the analysis service expects a PDF", path.display(), other),
        }

        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Err(ResumeMatchError::Validation(
                format!("Resume file is empty: {}", path.display())
            ));
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume.pdf".to_string());

        info!("Loaded resume {} ({} bytes)", file_name, bytes.len());

        Ok(ResumeUpload {
            file_name,
            bytes,
            file_type,
        })
    }

    /// Read a job description file as plain text.
    pub async fn load_job_description(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ResumeMatchError::Validation(
                format!("Job description file does not exist: {}", path.display())
            ));
        }

        let text = match FileType::from_path(path) {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            },
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            },
            _ => {
                return Err(ResumeMatchError::UnsupportedFormat(
                    format!("Job description must be .txt, .md or .markdown: {}", path.display())
                ));
            }
        };

        Ok(text)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

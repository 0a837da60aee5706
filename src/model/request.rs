//! Outgoing analysis request

use crate::input::file_detector::FileType;

/// Multipart part names expected by the analysis endpoint.
pub const RESUME_PART: &str = "resume";
pub const JOB_DESCRIPTION_PART: &str = "job_description";

/// A resume file held in memory, ready to upload.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub file_type: FileType,
}

impl ResumeUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let file_type = FileType::from_path(std::path::Path::new(&file_name));
        Self { file_name, bytes, file_type }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Both inputs of one submission. Only built after validation succeeded.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: ResumeUpload,
    pub job_description: String,
}

//! Multipart HTTP client for the analysis endpoint

use crate::config::Config;
use crate::error::{Result, ResumeMatchError};
use crate::model::request::{JOB_DESCRIPTION_PART, RESUME_PART};
use crate::model::{AnalysisRequest, AnalysisResult};
use crate::service::AnalysisService;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

/// Error body the service sends with 4xx responses
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}

/// One POST per analysis, no retry and no client-side timeout.
#[derive(Clone)]
pub struct HttpAnalysisService {
    client: Client,
    base_url: String,
    analyze_url: String,
}

impl HttpAnalysisService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ResumeMatchError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            analyze_url: config.analyze_url(),
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// GET the service root and return its banner text.
    pub async fn health_check(&self) -> Result<String> {
        let url = format!("{}/", self.base_url);
        debug!("Probing analysis service at {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            ResumeMatchError::Network(format!("Failed to reach analysis service at {}: {}", url, e))
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ResumeMatchError::Network(format!(
                "Analysis service health check returned {}",
                status
            )));
        }

        Ok(body.trim().to_string())
    }

    fn build_form(request: &AnalysisRequest) -> Result<Form> {
        let resume_part = Part::bytes(request.resume.bytes.clone())
            .file_name(request.resume.file_name.clone())
            .mime_str(request.resume.file_type.mime_type())
            .map_err(|e| ResumeMatchError::UnsupportedFormat(format!("Invalid resume content type: {}", e)))?;

        Ok(Form::new()
            .part(RESUME_PART, resume_part)
            .text(JOB_DESCRIPTION_PART, request.job_description.clone()))
    }
}

/// Prefer the service's own `{"error": ...}` message over the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().chars().take(200).collect(),
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let form = Self::build_form(request)?;

        info!(
            "Submitting {} ({} bytes) and a {}-character job description to {}",
            request.resume.file_name,
            request.resume.len(),
            request.job_description.chars().count(),
            self.analyze_url
        );

        let response = self
            .client
            .post(&self.analyze_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                ResumeMatchError::Network(format!(
                    "Failed to reach analysis service at {}: {}",
                    self.analyze_url, e
                ))
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Analysis service returned {}", status);
            return Err(ResumeMatchError::Network(format!(
                "Analysis service returned {}: {}",
                status,
                error_message(&body)
            )));
        }

        debug!("Received {} bytes of analysis JSON", body.len());

        serde_json::from_str::<AnalysisResult>(&body)
            .map_err(|e| ResumeMatchError::Network(format!("Malformed analysis response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_service_field() {
        assert_eq!(error_message(r#"{"error": "Resume file is required"}"#), "Resume file is required");
        assert_eq!(error_message("  "), "no response body");
        assert_eq!(error_message("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn test_urls_follow_config() {
        let config = Config::default().with_base_url("http://10.0.0.5:5000/").unwrap();
        let service = HttpAnalysisService::new(&config).unwrap();
        assert_eq!(service.analyze_url(), "http://10.0.0.5:5000/analyze");
        assert_eq!(service.base_url, "http://10.0.0.5:5000");
    }
}

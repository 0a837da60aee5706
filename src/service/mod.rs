//! Boundary to the remote analysis service

pub mod http;

use crate::error::Result;
use crate::model::{AnalysisRequest, AnalysisResult};
use async_trait::async_trait;

pub use http::HttpAnalysisService;

/// Something that turns a resume and job description into an [`AnalysisResult`].
///
/// The scoring itself happens behind this trait; the client only transports and renders.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}

//! Data exchanged with the analysis service

pub mod request;
pub mod result;

pub use request::{AnalysisRequest, ResumeUpload};
pub use result::{
    AnalysisResult, LearningProject, ResumePositioning, ScoringBreakdown, SevenFactorBreakdown,
    StructuredSuggestions, Suggestions,
};

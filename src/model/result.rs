//! Analysis result returned by the matching service

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// Full matching report for one resume / job description pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Headline match score (0-100)
    pub match_score: f64,

    /// Service verdict, e.g. "Strong Match"
    pub match_classification: String,

    /// Role the service inferred from the job description
    #[serde(default)]
    pub detected_role: Option<String>,

    pub resume_skills: Vec<String>,

    pub job_skills: Vec<String>,

    /// Job skills absent from the resume
    pub missing_skills: Vec<String>,

    /// Job skills present in the resume
    pub matched_skills: Vec<String>,

    /// Resume skills the job did not ask for
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bonus_skills: Vec<String>,

    /// Missing skills the service considers must-haves for the role
    #[serde(default, deserialize_with = "null_as_empty")]
    pub critical_missing_skills: Vec<String>,

    #[serde(default)]
    pub score_breakdown_7_factor: Option<SevenFactorBreakdown>,

    pub scoring_breakdown: ScoringBreakdown,

    pub skill_match_percentage: f64,

    pub bonus_percentage: f64,

    #[serde(default)]
    pub suggestions: Option<Suggestions>,
}

/// Optional lists arrive as `null` from the service as often as they are left out.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringBreakdown {
    /// Weighted aggregate of the seven factors (0-100)
    pub final_score: f64,
}

/// Weighted sub-scores behind the final score, each nominally 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SevenFactorBreakdown {
    pub required_skill_coverage: f64,
    pub skill_relevance: f64,
    pub skill_depth_signals: f64,
    pub experience_level_alignment: f64,
    pub domain_context: f64,
    pub ats_optimization: f64,
    pub signal_vs_noise_ratio: f64,
}

/// One of the seven scoring factors, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    RequiredSkillCoverage,
    SkillRelevance,
    SkillDepthSignals,
    ExperienceLevelAlignment,
    DomainContext,
    AtsOptimization,
    SignalVsNoiseRatio,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::RequiredSkillCoverage,
        Factor::SkillRelevance,
        Factor::SkillDepthSignals,
        Factor::ExperienceLevelAlignment,
        Factor::DomainContext,
        Factor::AtsOptimization,
        Factor::SignalVsNoiseRatio,
    ];

    /// Share of the final score, in percent. The seven weights sum to 100.
    pub fn weight_percent(&self) -> u8 {
        match self {
            Factor::RequiredSkillCoverage => 40,
            Factor::SkillRelevance => 25,
            Factor::SkillDepthSignals => 15,
            Factor::ExperienceLevelAlignment => 10,
            Factor::DomainContext => 5,
            Factor::AtsOptimization => 3,
            Factor::SignalVsNoiseRatio => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Factor::RequiredSkillCoverage => "Required Skill Coverage",
            Factor::SkillRelevance => "Skill Relevance",
            Factor::SkillDepthSignals => "Skill Depth Signals",
            Factor::ExperienceLevelAlignment => "Experience Level Alignment",
            Factor::DomainContext => "Domain Context",
            Factor::AtsOptimization => "ATS Optimization",
            Factor::SignalVsNoiseRatio => "Signal vs Noise Ratio",
        }
    }

    /// Field name in the JSON payload
    pub fn key(&self) -> &'static str {
        match self {
            Factor::RequiredSkillCoverage => "required_skill_coverage",
            Factor::SkillRelevance => "skill_relevance",
            Factor::SkillDepthSignals => "skill_depth_signals",
            Factor::ExperienceLevelAlignment => "experience_level_alignment",
            Factor::DomainContext => "domain_context",
            Factor::AtsOptimization => "ats_optimization",
            Factor::SignalVsNoiseRatio => "signal_vs_noise_ratio",
        }
    }
}

impl SevenFactorBreakdown {
    pub fn score(&self, factor: Factor) -> f64 {
        match factor {
            Factor::RequiredSkillCoverage => self.required_skill_coverage,
            Factor::SkillRelevance => self.skill_relevance,
            Factor::SkillDepthSignals => self.skill_depth_signals,
            Factor::ExperienceLevelAlignment => self.experience_level_alignment,
            Factor::DomainContext => self.domain_context,
            Factor::AtsOptimization => self.ats_optimization,
            Factor::SignalVsNoiseRatio => self.signal_vs_noise_ratio,
        }
    }

    /// Recompute the weighted aggregate from the fixed factor weights.
    pub fn weighted_total(&self) -> f64 {
        Factor::ALL
            .iter()
            .map(|factor| self.score(*factor) * f64::from(factor.weight_percent()) / 100.0)
            .sum()
    }
}

/// Advice attached to a result: either a flat list of strings or a structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suggestions {
    Plain(Vec<String>),
    Structured(StructuredSuggestions),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredSuggestions {
    #[serde(default)]
    pub overall_verdict: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub strategic_recommendations: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub learning_projects: Vec<LearningProject>,

    #[serde(default)]
    pub resume_positioning: Option<ResumePositioning>,

    #[serde(default)]
    pub encouragement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProject {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills_covered: Vec<String>,

    /// Free-form effort estimate, e.g. "2-3 weeks"
    #[serde(default)]
    pub effort: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumePositioning {
    #[serde(default)]
    pub headline: String,

    #[serde(default)]
    pub project_section_tip: String,

    #[serde(default)]
    pub skill_listing_tip: String,

    #[serde(default)]
    pub bonus_skills_mention: Option<String>,
}

impl AnalysisResult {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn final_score(&self) -> f64 {
        self.scoring_breakdown.final_score
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A complete result as the current service revision sends it.
    pub fn sample_result() -> AnalysisResult {
        AnalysisResult {
            match_score: 72.5,
            match_classification: "Moderate Match".to_string(),
            detected_role: Some("Backend Developer".to_string()),
            resume_skills: vec!["python".into(), "docker".into(), "git".into(), "figma".into()],
            job_skills: vec!["python".into(), "docker".into(), "sql".into(), "kubernetes".into()],
            missing_skills: vec!["sql".into(), "kubernetes".into()],
            matched_skills: vec!["python".into(), "docker".into()],
            bonus_skills: vec!["git".into(), "figma".into()],
            critical_missing_skills: vec!["sql".into()],
            score_breakdown_7_factor: Some(SevenFactorBreakdown {
                required_skill_coverage: 60.0,
                skill_relevance: 70.0,
                skill_depth_signals: 85.0,
                experience_level_alignment: 75.0,
                domain_context: 50.0,
                ats_optimization: 90.0,
                signal_vs_noise_ratio: 50.0,
            }),
            scoring_breakdown: ScoringBreakdown { final_score: 67.95 },
            skill_match_percentage: 50.0,
            bonus_percentage: 50.0,
            suggestions: Some(Suggestions::Structured(StructuredSuggestions {
                overall_verdict: Some("Solid foundation with a few gaps".to_string()),
                strategic_recommendations: vec!["Add a SQL-heavy project".to_string()],
                learning_projects: vec![LearningProject {
                    title: "Inventory API".to_string(),
                    description: "REST service backed by PostgreSQL".to_string(),
                    skills_covered: vec!["sql".into(), "docker".into()],
                    effort: Some("2 weeks".to_string()),
                }],
                resume_positioning: Some(ResumePositioning {
                    headline: "Backend Developer | Python".to_string(),
                    project_section_tip: "Lead with deployed projects".to_string(),
                    skill_listing_tip: "Group skills by category".to_string(),
                    bonus_skills_mention: None,
                }),
                encouragement: Some("You are close.".to_string()),
            })),
        }
    }
}

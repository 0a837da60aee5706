//! Display model for an analysis result
//!
//! `ReportView::from_result` maps the service payload onto an ordered list of
//! sections. Every formatter walks the same list, so which sections appear and
//! in what order is decided here and nowhere else.

use crate::model::result::Factor;
use crate::model::{AnalysisResult, LearningProject, ResumePositioning, Suggestions};
use crate::output::tier::{classification_tier, score_tier, Tier};
use log::warn;
use serde::Serialize;
use std::time::SystemTime;

pub const NO_MATCHED_SKILLS: &str = "No matching skills found.";
pub const NO_MISSING_SKILLS: &str = "No missing skills. Great job!";

/// Tolerance between the service's final score and the recomputed weighted total
const FINAL_SCORE_TOLERANCE: f64 = 0.5;

/// Rendered report: ordered sections plus the raw result they came from
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub sections: Vec<ReportSection>,

    pub metadata: ReportMetadata,

    /// Original payload (for JSON output)
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,

    pub client_version: String,

    /// Resume file the result belongs to, when known
    pub resume_file: Option<String>,

    /// Endpoint or file the result was read from
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub enum ReportSection {
    ClassificationBanner(ClassificationBanner),
    CriticalGapAlert(CriticalGapAlert),
    ScoreBreakdown(ScoreBreakdownGrid),
    SkillPanels(SkillPanels),
    BonusSkills(BonusSkillsPanel),
    Suggestions(SuggestionsPanel),
    SkillInventory(SkillInventory),
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationBanner {
    pub classification: String,
    pub tier: Tier,
    pub match_score: f64,
    pub score_tier: Tier,
    pub detected_role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriticalGapAlert {
    /// Skill names with their first letter capitalized
    pub skills: Vec<String>,
}

impl CriticalGapAlert {
    pub fn joined(&self) -> String {
        self.skills.join(", ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdownGrid {
    /// Present only when the service sent the seven-factor breakdown
    pub factors: Option<Vec<FactorTile>>,
    pub final_score: ScoreTile,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorTile {
    pub key: &'static str,
    pub label: &'static str,
    pub weight_percent: u8,
    pub score: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreTile {
    pub score: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillPanels {
    pub matched: SkillPanel,
    pub missing: SkillPanel,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillPanel {
    pub title: &'static str,
    pub skills: Vec<String>,
    pub empty_text: &'static str,
}

impl SkillPanel {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Comma-joined skills, or the empty-state text.
    pub fn display_text(&self) -> String {
        if self.skills.is_empty() {
            self.empty_text.to_string()
        } else {
            self.skills.join(", ")
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BonusSkillsPanel {
    pub skills: Vec<String>,
    pub bonus_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsPanel {
    pub blocks: Vec<SuggestionBlock>,
}

/// Sub-sections of the suggestions panel, each emitted only when it has content
#[derive(Debug, Clone, Serialize)]
pub enum SuggestionBlock {
    Verdict {
        verdict: Option<String>,
        metrics: SuggestionMetrics,
    },
    Roadmap(Vec<String>),
    LearningProjects(Vec<LearningProject>),
    Positioning(ResumePositioning),
    Encouragement(String),
    /// Flat advice list from the older service revision
    Advice(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionMetrics {
    pub match_score: f64,
    pub skill_match_percentage: f64,
    pub bonus_percentage: f64,
    pub matched_count: usize,
    pub required_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillInventory {
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
}

/// Uppercase the first character and keep the rest as sent.
pub fn capitalize_first(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn non_blank(text: &Option<String>) -> Option<String> {
    text.as_ref()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

impl ReportView {
    pub fn from_result(result: &AnalysisResult, detailed: bool) -> Self {
        let mut sections = vec![ReportSection::ClassificationBanner(Self::create_banner(result))];

        if !result.critical_missing_skills.is_empty() {
            sections.push(ReportSection::CriticalGapAlert(CriticalGapAlert {
                skills: result
                    .critical_missing_skills
                    .iter()
                    .map(|s| capitalize_first(s))
                    .collect(),
            }));
        }

        sections.push(ReportSection::ScoreBreakdown(Self::create_breakdown(result)));

        sections.push(ReportSection::SkillPanels(SkillPanels {
            matched: SkillPanel {
                title: "Matched Skills",
                skills: result.matched_skills.clone(),
                empty_text: NO_MATCHED_SKILLS,
            },
            missing: SkillPanel {
                title: "Missing Skills",
                skills: result.missing_skills.clone(),
                empty_text: NO_MISSING_SKILLS,
            },
        }));

        if !result.bonus_skills.is_empty() {
            sections.push(ReportSection::BonusSkills(BonusSkillsPanel {
                skills: result.bonus_skills.clone(),
                bonus_percentage: result.bonus_percentage,
            }));
        }

        if let Some(panel) = Self::create_suggestions(result) {
            sections.push(ReportSection::Suggestions(panel));
        }

        if detailed {
            sections.push(ReportSection::SkillInventory(SkillInventory {
                resume_skills: result.resume_skills.clone(),
                job_skills: result.job_skills.clone(),
            }));
        }

        Self {
            sections,
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                client_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: None,
                source: None,
            },
            result: result.clone(),
        }
    }

    pub fn with_resume_file(mut self, resume_file: impl Into<String>) -> Self {
        self.metadata.resume_file = Some(resume_file.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }

    fn create_banner(result: &AnalysisResult) -> ClassificationBanner {
        ClassificationBanner {
            classification: result.match_classification.clone(),
            tier: classification_tier(&result.match_classification),
            match_score: result.match_score,
            score_tier: score_tier(result.match_score),
            detected_role: non_blank(&result.detected_role),
        }
    }

    fn create_breakdown(result: &AnalysisResult) -> ScoreBreakdownGrid {
        let final_score = result.final_score();

        let factors = result.score_breakdown_7_factor.as_ref().map(|breakdown| {
            let recomputed = breakdown.weighted_total();
            if (recomputed - final_score).abs() > FINAL_SCORE_TOLERANCE {
                warn!(
                    "Final score {:.2} differs from weighted factor total {:.2}",
                    final_score, recomputed
                );
            }

            Factor::ALL
                .iter()
                .map(|factor| {
                    let score = breakdown.score(*factor);
                    FactorTile {
                        key: factor.key(),
                        label: factor.label(),
                        weight_percent: factor.weight_percent(),
                        score,
                        tier: score_tier(score),
                    }
                })
                .collect()
        });

        ScoreBreakdownGrid {
            factors,
            final_score: ScoreTile {
                score: final_score,
                tier: score_tier(final_score),
            },
        }
    }

    fn create_suggestions(result: &AnalysisResult) -> Option<SuggestionsPanel> {
        let blocks = match result.suggestions.as_ref()? {
            Suggestions::Plain(advice) => {
                if advice.is_empty() {
                    return None;
                }
                vec![SuggestionBlock::Advice(advice.clone())]
            }
            Suggestions::Structured(suggestions) => {
                let mut blocks = vec![SuggestionBlock::Verdict {
                    verdict: non_blank(&suggestions.overall_verdict),
                    metrics: SuggestionMetrics {
                        match_score: result.match_score,
                        skill_match_percentage: result.skill_match_percentage,
                        bonus_percentage: result.bonus_percentage,
                        matched_count: result.matched_skills.len(),
                        required_count: result.job_skills.len(),
                    },
                }];

                if !suggestions.strategic_recommendations.is_empty() {
                    blocks.push(SuggestionBlock::Roadmap(suggestions.strategic_recommendations.clone()));
                }
                if !suggestions.learning_projects.is_empty() {
                    blocks.push(SuggestionBlock::LearningProjects(suggestions.learning_projects.clone()));
                }
                if let Some(positioning) = &suggestions.resume_positioning {
                    blocks.push(SuggestionBlock::Positioning(positioning.clone()));
                }
                if let Some(encouragement) = non_blank(&suggestions.encouragement) {
                    blocks.push(SuggestionBlock::Encouragement(encouragement));
                }
                blocks
            }
        };

        Some(SuggestionsPanel { blocks })
    }

    pub fn banner(&self) -> Option<&ClassificationBanner> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::ClassificationBanner(banner) => Some(banner),
            _ => None,
        })
    }

    pub fn critical_gap_alert(&self) -> Option<&CriticalGapAlert> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::CriticalGapAlert(alert) => Some(alert),
            _ => None,
        })
    }

    pub fn score_breakdown(&self) -> Option<&ScoreBreakdownGrid> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::ScoreBreakdown(grid) => Some(grid),
            _ => None,
        })
    }

    pub fn skill_panels(&self) -> Option<&SkillPanels> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::SkillPanels(panels) => Some(panels),
            _ => None,
        })
    }

    pub fn suggestions(&self) -> Option<&SuggestionsPanel> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Suggestions(panel) => Some(panel),
            _ => None,
        })
    }
}

impl ReportSection {
    /// Stable name, used by tests and HTML anchors
    pub fn name(&self) -> &'static str {
        match self {
            ReportSection::ClassificationBanner(_) => "classification",
            ReportSection::CriticalGapAlert(_) => "critical-gaps",
            ReportSection::ScoreBreakdown(_) => "score-breakdown",
            ReportSection::SkillPanels(_) => "skills",
            ReportSection::BonusSkills(_) => "bonus-skills",
            ReportSection::Suggestions(_) => "suggestions",
            ReportSection::SkillInventory(_) => "skill-inventory",
        }
    }
}

impl SuggestionBlock {
    pub fn name(&self) -> &'static str {
        match self {
            SuggestionBlock::Verdict { .. } => "verdict",
            SuggestionBlock::Roadmap(_) => "roadmap",
            SuggestionBlock::LearningProjects(_) => "learning-projects",
            SuggestionBlock::Positioning(_) => "positioning",
            SuggestionBlock::Encouragement(_) => "encouragement",
            SuggestionBlock::Advice(_) => "advice",
        }
    }
}

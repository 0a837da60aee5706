//! Output formatters: console, JSON, Markdown and HTML renderings of a report

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatchError};
use crate::output::report::*;
use crate::output::tier::Tier;
use askama::Template;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ReportView) -> Result<String>;
}

/// Console formatter with tier colours
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter; emits the service payload so it can be rendered again later
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with tier-coloured tiles
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

fn format_timestamp(report: &ReportView) -> String {
    chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .section { margin: 25px 0; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .banner { padding: 20px; border-radius: 8px; color: white; text-align: center; }
        .alert { padding: 15px; border-radius: 6px; border-left: 4px solid #dc3545; background: #fdecea; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 15px; }
        .tile { padding: 15px; border-radius: 6px; color: white; }
        .tile h4 { margin: 0 0 6px 0; }
        .panels { display: grid; grid-template-columns: 1fr 1fr; gap: 15px; }
        .panel { background: #f8f9fa; padding: 15px; border-radius: 6px; }
        .empty { color: #6c757d; font-style: italic; }
        .project { background: #f8f9fa; padding: 15px; margin: 10px 0; border-radius: 6px; border-left: 4px solid #17a2b8; }
        .tier-success { background: #28a745; }
        .tier-warning { background: #ffc107; color: #000; }
        .tier-attention { background: #fd7e14; }
        .tier-danger { background: #dc3545; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="section" id="classification">
            <div class="banner tier-{{ classification_tier }}">
                <h1>{{ classification }}</h1>
                <p>Match Score: <span class="tier-{{ match_score_tier }}">{{ match_score }}%</span></p>
                {% if has_detected_role %}<p>Detected role: {{ detected_role }}</p>{% endif %}
            </div>
        </div>

        {% if has_critical_gaps %}
        <div class="section" id="critical-gaps">
            <div class="alert"><strong>Critical skills gap:</strong> {{ critical_gaps }}</div>
        </div>
        {% endif %}

        <div class="section" id="score-breakdown">
            <h2>Score Breakdown</h2>
            <div class="grid">
                {% for tile in factors %}
                <div class="tile tier-{{ tile.tier }}">
                    <h4>{{ tile.label }}</h4>
                    <p><strong>{{ tile.score }}</strong> (weight: {{ tile.weight }}%)</p>
                </div>
                {% endfor %}
                <div class="tile tier-{{ final_score_tier }}">
                    <h4>Final Score</h4>
                    <p><strong>{{ final_score }}</strong></p>
                </div>
            </div>
        </div>

        <div class="section" id="skills">
            <div class="panels">
                <div class="panel">
                    <h2>Matched Skills</h2>
                    {% if matched_skills.is_empty() %}<p class="empty">{{ matched_empty }}</p>{% else %}
                    <ul>{% for skill in matched_skills %}<li>{{ skill }}</li>{% endfor %}</ul>{% endif %}
                </div>
                <div class="panel">
                    <h2>Missing Skills</h2>
                    {% if missing_skills.is_empty() %}<p class="empty">{{ missing_empty }}</p>{% else %}
                    <ul>{% for skill in missing_skills %}<li>{{ skill }}</li>{% endfor %}</ul>{% endif %}
                </div>
            </div>
        </div>

        {% if !bonus_skills.is_empty() %}
        <div class="section" id="bonus-skills">
            <h2>Bonus Skills ({{ bonus_percentage }}%)</h2>
            <ul>{% for skill in bonus_skills %}<li>{{ skill }}</li>{% endfor %}</ul>
        </div>
        {% endif %}

        {% if has_suggestions %}
        <div class="section" id="suggestions">
            <h2>Suggestions</h2>
            {% if has_verdict_block %}
            <p><strong>{{ verdict }}</strong></p>
            <p>Match score {{ match_score }}% | Skill match {{ skill_match_percentage }}% ({{ matched_count }}/{{ required_count }}) | Bonus {{ bonus_percentage }}%</p>
            {% endif %}
            {% if !roadmap.is_empty() %}
            <h3>Strategic Roadmap</h3>
            <ol>{% for step in roadmap %}<li>{{ step }}</li>{% endfor %}</ol>
            {% endif %}
            {% if !projects.is_empty() %}
            <h3>Learning Projects</h3>
            {% for project in projects %}
            <div class="project">
                <h4>{{ project.title }}</h4>
                <p>{{ project.description }}</p>
                {% if !project.skills.is_empty() %}<p><strong>Skills:</strong> {{ project.skills }}</p>{% endif %}
                {% if !project.effort.is_empty() %}<p><strong>Effort:</strong> {{ project.effort }}</p>{% endif %}
            </div>
            {% endfor %}
            {% endif %}
            {% if has_positioning %}
            <h3>Resume Positioning</h3>
            <ul>
                <li><strong>Headline:</strong> {{ headline }}</li>
                <li><strong>Projects:</strong> {{ project_section_tip }}</li>
                <li><strong>Skills:</strong> {{ skill_listing_tip }}</li>
                {% if !bonus_skills_mention.is_empty() %}<li><strong>Bonus skills:</strong> {{ bonus_skills_mention }}</li>{% endif %}
            </ul>
            {% endif %}
            {% if !encouragement.is_empty() %}<blockquote>{{ encouragement }}</blockquote>{% endif %}
            {% if !advice.is_empty() %}
            <ul>{% for item in advice %}<li>{{ item }}</li>{% endfor %}</ul>
            {% endif %}
        </div>
        {% endif %}

        {% if has_inventory %}
        <div class="section" id="skill-inventory">
            <h2>Skill Inventory</h2>
            <p><strong>Resume:</strong> {{ resume_skills }}</p>
            <p><strong>Job:</strong> {{ job_skills }}</p>
        </div>
        {% endif %}

        <div class="metadata">
            <p><strong>Generated by resume-match v{{ version }}</strong> | {{ generated_at }}</p>
            {% if !source.is_empty() %}<p><strong>Source:</strong> {{ source }}</p>{% endif %}
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    version: String,
    source: String,
    classification: String,
    classification_tier: &'static str,
    match_score: String,
    match_score_tier: &'static str,
    detected_role: String,
    has_detected_role: bool,
    critical_gaps: String,
    has_critical_gaps: bool,
    factors: Vec<HtmlFactor>,
    final_score: String,
    final_score_tier: &'static str,
    matched_skills: Vec<String>,
    matched_empty: &'static str,
    missing_skills: Vec<String>,
    missing_empty: &'static str,
    bonus_skills: Vec<String>,
    bonus_percentage: String,
    has_suggestions: bool,
    has_verdict_block: bool,
    verdict: String,
    skill_match_percentage: String,
    matched_count: usize,
    required_count: usize,
    roadmap: Vec<String>,
    projects: Vec<HtmlProject>,
    has_positioning: bool,
    headline: String,
    project_section_tip: String,
    skill_listing_tip: String,
    bonus_skills_mention: String,
    encouragement: String,
    advice: Vec<String>,
    has_inventory: bool,
    resume_skills: String,
    job_skills: String,
}

#[derive(Debug, Clone)]
struct HtmlFactor {
    label: &'static str,
    weight: u8,
    score: String,
    tier: &'static str,
}

#[derive(Debug, Clone)]
struct HtmlProject {
    title: String,
    description: String,
    skills: String,
    effort: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn tier_color(tier: Tier) -> Color {
        match tier {
            Tier::Success => Color::Green,
            Tier::Warning => Color::Yellow,
            Tier::Attention => Color::TrueColor { r: 255, g: 140, b: 0 },
            Tier::Danger => Color::Red,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn tiered(&self, text: &str, tier: Tier) -> String {
        if self.use_colors {
            text.color(Self::tier_color(tier)).bold().to_string()
        } else {
            format!("{} [{}]", text, tier.as_str().to_uppercase())
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn icon(&self, emoji: &'static str, text_icon: &'static str) -> &'static str {
        if self.use_colors {
            emoji
        } else {
            text_icon
        }
    }

    fn format_skill_panel(&self, output: &mut String, icon: &str, panel: &SkillPanel) {
        output.push_str(&self.format_header(&format!("{} {}", icon, panel.title), 3));
        if panel.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize(panel.empty_text, Color::BrightBlack)));
        } else {
            output.push_str(&format!("  {}\n", panel.display_text()));
        }
    }

    fn format_suggestion_block(&self, output: &mut String, block: &SuggestionBlock) {
        match block {
            SuggestionBlock::Verdict { verdict, metrics } => {
                if let Some(verdict) = verdict {
                    output.push_str(&format!("Verdict: {}\n", self.colorize(verdict, Color::Cyan)));
                }
                output.push_str(&format!(
                    "Match: {:.1}% | Skill match: {:.1}% ({}/{}) | Bonus: {:.1}%\n",
                    metrics.match_score,
                    metrics.skill_match_percentage,
                    metrics.matched_count,
                    metrics.required_count,
                    metrics.bonus_percentage
                ));
            }
            SuggestionBlock::Roadmap(steps) => {
                output.push_str(&self.format_header("Strategic Roadmap", 4));
                for (i, step) in steps.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, step));
                }
            }
            SuggestionBlock::LearningProjects(projects) => {
                output.push_str(&self.format_header("Learning Projects", 4));
                for project in projects {
                    output.push_str(&format!("  {} {}", self.icon("🛠️", "[*]"), self.colorize(&project.title, Color::Cyan)));
                    if let Some(effort) = &project.effort {
                        output.push_str(&format!(" ({})", effort));
                    }
                    output.push('\n');
                    if !project.description.is_empty() {
                        output.push_str(&format!("     {}\n", project.description));
                    }
                    if !project.skills_covered.is_empty() {
                        output.push_str(&format!("     Skills: {}\n", project.skills_covered.join(", ")));
                    }
                }
            }
            SuggestionBlock::Positioning(positioning) => {
                output.push_str(&self.format_header("Resume Positioning", 4));
                output.push_str(&format!("  • Headline: {}\n", positioning.headline));
                output.push_str(&format!("  • Projects: {}\n", positioning.project_section_tip));
                output.push_str(&format!("  • Skills: {}\n", positioning.skill_listing_tip));
                if let Some(mention) = &positioning.bonus_skills_mention {
                    output.push_str(&format!("  • Bonus skills: {}\n", mention));
                }
            }
            SuggestionBlock::Encouragement(text) => {
                output.push_str(&format!("\n{} {}\n", self.icon("💪", "[+]"), self.colorize(text, Color::Green)));
            }
            SuggestionBlock::Advice(items) => {
                for item in items {
                    output.push_str(&format!("  • {}\n", item));
                }
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ReportView) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME MATCH REPORT", 1));
        output.push_str(&format!("Generated: {} | resume-match v{}\n", format_timestamp(report), report.metadata.client_version));
        if let Some(resume_file) = &report.metadata.resume_file {
            output.push_str(&format!("Resume: {}\n", resume_file));
        }

        for section in &report.sections {
            match section {
                ReportSection::ClassificationBanner(banner) => {
                    output.push_str(&self.format_header(&self.tiered(&banner.classification, banner.tier), 2));
                    output.push_str(&format!(
                        "Match Score: {}\n",
                        self.tiered(&format!("{:.1}%", banner.match_score), banner.score_tier)
                    ));
                    if let Some(role) = &banner.detected_role {
                        output.push_str(&format!("Detected Role: {}\n", role));
                    }
                }
                ReportSection::CriticalGapAlert(alert) => {
                    output.push_str(&format!(
                        "\n{} {} {}\n",
                        self.icon("🚨", "[!]"),
                        self.colorize("Critical skills gap:", Color::Red),
                        alert.joined()
                    ));
                }
                ReportSection::ScoreBreakdown(grid) => {
                    output.push_str(&self.format_header("Score Breakdown", 3));
                    if let Some(factors) = &grid.factors {
                        for tile in factors {
                            output.push_str(&format!(
                                "  {:<28} {:>3}%  {}\n",
                                tile.label,
                                tile.weight_percent,
                                self.tiered(&format!("{:.1}", tile.score), tile.tier)
                            ));
                        }
                    }
                    output.push_str(&format!(
                        "  {:<28}       {}\n",
                        "Final Score",
                        self.tiered(&format!("{:.1}", grid.final_score.score), grid.final_score.tier)
                    ));
                }
                ReportSection::SkillPanels(panels) => {
                    self.format_skill_panel(&mut output, self.icon("✅", "[+]"), &panels.matched);
                    self.format_skill_panel(&mut output, self.icon("⚠️", "[-]"), &panels.missing);
                }
                ReportSection::BonusSkills(bonus) => {
                    output.push_str(&self.format_header(
                        &format!("{} Bonus Skills ({:.1}%)", self.icon("⭐", "[*]"), bonus.bonus_percentage),
                        3,
                    ));
                    output.push_str(&format!("  {}\n", bonus.skills.join(", ")));
                }
                ReportSection::Suggestions(panel) => {
                    output.push_str(&self.format_header(&format!("{} Suggestions", self.icon("💡", "[?]")), 3));
                    for block in &panel.blocks {
                        self.format_suggestion_block(&mut output, block);
                    }
                }
                ReportSection::SkillInventory(inventory) => {
                    output.push_str(&self.format_header("Skill Inventory", 3));
                    output.push_str(&format!("  Resume: {}\n", inventory.resume_skills.join(", ")));
                    output.push_str(&format!("  Job: {}\n", inventory.job_skills.join(", ")));
                }
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ReportView) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&report.result)?)
        } else {
            Ok(serde_json::to_string(&report.result)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_tier_badge(tier: Tier) -> &'static str {
        match tier {
            Tier::Success => "🟢",
            Tier::Warning => "🟡",
            Tier::Attention => "🟠",
            Tier::Danger => "🔴",
        }
    }

    fn skill_list(output: &mut String, panel: &SkillPanel) {
        output.push_str(&format!("### {}\n\n", panel.title));
        if panel.is_empty() {
            output.push_str(&format!("_{}_\n\n", panel.empty_text));
        } else {
            for skill in &panel.skills {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ReportView) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📊 Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!("**Generated:** {}\n", format_timestamp(report)));
            if let Some(resume_file) = &report.metadata.resume_file {
                output.push_str(&format!("**Resume:** `{}`\n", resume_file));
            }
            output.push('\n');
        }

        for section in &report.sections {
            match section {
                ReportSection::ClassificationBanner(banner) => {
                    output.push_str(&format!(
                        "## {} {}\n\n",
                        Self::markdown_tier_badge(banner.tier),
                        banner.classification
                    ));
                    output.push_str(&format!(
                        "**Match Score:** {:.1}% {}\n\n",
                        banner.match_score,
                        Self::markdown_tier_badge(banner.score_tier)
                    ));
                    if let Some(role) = &banner.detected_role {
                        output.push_str(&format!("**Detected Role:** {}\n\n", role));
                    }
                }
                ReportSection::CriticalGapAlert(alert) => {
                    output.push_str(&format!("> 🚨 **Critical skills gap:** {}\n\n", alert.joined()));
                }
                ReportSection::ScoreBreakdown(grid) => {
                    output.push_str("## Score Breakdown\n\n");
                    output.push_str("| Factor | Weight | Score |\n");
                    output.push_str("|--------|--------|-------|\n");
                    if let Some(factors) = &grid.factors {
                        for tile in factors {
                            output.push_str(&format!(
                                "| {} | {}% | {} {:.1} |\n",
                                tile.label,
                                tile.weight_percent,
                                Self::markdown_tier_badge(tile.tier),
                                tile.score
                            ));
                        }
                    }
                    output.push_str(&format!(
                        "| **Final Score** | | {} **{:.1}** |\n\n",
                        Self::markdown_tier_badge(grid.final_score.tier),
                        grid.final_score.score
                    ));
                }
                ReportSection::SkillPanels(panels) => {
                    Self::skill_list(&mut output, &panels.matched);
                    Self::skill_list(&mut output, &panels.missing);
                }
                ReportSection::BonusSkills(bonus) => {
                    output.push_str(&format!("### ⭐ Bonus Skills ({:.1}%)\n\n", bonus.bonus_percentage));
                    output.push_str(&format!("`{}`\n\n", bonus.skills.join("`, `")));
                }
                ReportSection::Suggestions(panel) => {
                    output.push_str("## 💡 Suggestions\n\n");
                    for block in &panel.blocks {
                        match block {
                            SuggestionBlock::Verdict { verdict, metrics } => {
                                if let Some(verdict) = verdict {
                                    output.push_str(&format!("**Verdict:** {}\n\n", verdict));
                                }
                                output.push_str(&format!(
                                    "Match {:.1}% · Skill match {:.1}% ({}/{}) · Bonus {:.1}%\n\n",
                                    metrics.match_score,
                                    metrics.skill_match_percentage,
                                    metrics.matched_count,
                                    metrics.required_count,
                                    metrics.bonus_percentage
                                ));
                            }
                            SuggestionBlock::Roadmap(steps) => {
                                output.push_str("### Strategic Roadmap\n\n");
                                for (i, step) in steps.iter().enumerate() {
                                    output.push_str(&format!("{}. {}\n", i + 1, step));
                                }
                                output.push('\n');
                            }
                            SuggestionBlock::LearningProjects(projects) => {
                                output.push_str("### Learning Projects\n\n");
                                for project in projects {
                                    output.push_str(&format!("#### {}\n\n", project.title));
                                    if !project.description.is_empty() {
                                        output.push_str(&format!("{}\n\n", project.description));
                                    }
                                    if !project.skills_covered.is_empty() {
                                        output.push_str(&format!("**Skills:** `{}`\n", project.skills_covered.join("`, `")));
                                    }
                                    if let Some(effort) = &project.effort {
                                        output.push_str(&format!("**Effort:** {}\n", effort));
                                    }
                                    output.push('\n');
                                }
                            }
                            SuggestionBlock::Positioning(positioning) => {
                                output.push_str("### Resume Positioning\n\n");
                                output.push_str(&format!("- **Headline:** {}\n", positioning.headline));
                                output.push_str(&format!("- **Projects:** {}\n", positioning.project_section_tip));
                                output.push_str(&format!("- **Skills:** {}\n", positioning.skill_listing_tip));
                                if let Some(mention) = &positioning.bonus_skills_mention {
                                    output.push_str(&format!("- **Bonus skills:** {}\n", mention));
                                }
                                output.push('\n');
                            }
                            SuggestionBlock::Encouragement(text) => {
                                output.push_str(&format!("> 💪 {}\n\n", text));
                            }
                            SuggestionBlock::Advice(items) => {
                                for item in items {
                                    output.push_str(&format!("- {}\n", item));
                                }
                                output.push('\n');
                            }
                        }
                    }
                }
                ReportSection::SkillInventory(inventory) => {
                    output.push_str("## Skill Inventory\n\n");
                    output.push_str(&format!("**Resume:** {}\n\n", inventory.resume_skills.join(", ")));
                    output.push_str(&format!("**Job:** {}\n\n", inventory.job_skills.join(", ")));
                }
            }
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by resume-match v{}*\n", report.metadata.client_version));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ReportView) -> HtmlTemplate {
        let result = &report.result;
        let mut template = HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: format_timestamp(report),
            version: report.metadata.client_version.clone(),
            source: report.metadata.source.clone().unwrap_or_default(),
            classification: String::new(),
            classification_tier: Tier::Danger.as_str(),
            match_score: format!("{:.1}", result.match_score),
            match_score_tier: Tier::Danger.as_str(),
            detected_role: String::new(),
            has_detected_role: false,
            critical_gaps: String::new(),
            has_critical_gaps: false,
            factors: Vec::new(),
            final_score: String::new(),
            final_score_tier: Tier::Danger.as_str(),
            matched_skills: Vec::new(),
            matched_empty: NO_MATCHED_SKILLS,
            missing_skills: Vec::new(),
            missing_empty: NO_MISSING_SKILLS,
            bonus_skills: Vec::new(),
            bonus_percentage: format!("{:.1}", result.bonus_percentage),
            has_suggestions: false,
            has_verdict_block: false,
            verdict: String::new(),
            skill_match_percentage: format!("{:.1}", result.skill_match_percentage),
            matched_count: 0,
            required_count: 0,
            roadmap: Vec::new(),
            projects: Vec::new(),
            has_positioning: false,
            headline: String::new(),
            project_section_tip: String::new(),
            skill_listing_tip: String::new(),
            bonus_skills_mention: String::new(),
            encouragement: String::new(),
            advice: Vec::new(),
            has_inventory: false,
            resume_skills: String::new(),
            job_skills: String::new(),
        };

        for section in &report.sections {
            match section {
                ReportSection::ClassificationBanner(banner) => {
                    template.classification = banner.classification.clone();
                    template.classification_tier = banner.tier.as_str();
                    template.match_score = format!("{:.1}", banner.match_score);
                    template.match_score_tier = banner.score_tier.as_str();
                    if let Some(role) = &banner.detected_role {
                        template.detected_role = role.clone();
                        template.has_detected_role = true;
                    }
                }
                ReportSection::CriticalGapAlert(alert) => {
                    template.critical_gaps = alert.joined();
                    template.has_critical_gaps = true;
                }
                ReportSection::ScoreBreakdown(grid) => {
                    template.factors = grid
                        .factors
                        .iter()
                        .flatten()
                        .map(|tile| HtmlFactor {
                            label: tile.label,
                            weight: tile.weight_percent,
                            score: format!("{:.1}", tile.score),
                            tier: tile.tier.as_str(),
                        })
                        .collect();
                    template.final_score = format!("{:.1}", grid.final_score.score);
                    template.final_score_tier = grid.final_score.tier.as_str();
                }
                ReportSection::SkillPanels(panels) => {
                    template.matched_skills = panels.matched.skills.clone();
                    template.missing_skills = panels.missing.skills.clone();
                }
                ReportSection::BonusSkills(bonus) => {
                    template.bonus_skills = bonus.skills.clone();
                }
                ReportSection::Suggestions(panel) => {
                    template.has_suggestions = true;
                    for block in &panel.blocks {
                        match block {
                            SuggestionBlock::Verdict { verdict, metrics } => {
                                template.has_verdict_block = true;
                                template.verdict = verdict.clone().unwrap_or_default();
                                template.matched_count = metrics.matched_count;
                                template.required_count = metrics.required_count;
                            }
                            SuggestionBlock::Roadmap(steps) => template.roadmap = steps.clone(),
                            SuggestionBlock::LearningProjects(projects) => {
                                template.projects = projects
                                    .iter()
                                    .map(|project| HtmlProject {
                                        title: project.title.clone(),
                                        description: project.description.clone(),
                                        skills: project.skills_covered.join(", "),
                                        effort: project.effort.clone().unwrap_or_default(),
                                    })
                                    .collect();
                            }
                            SuggestionBlock::Positioning(positioning) => {
                                template.has_positioning = true;
                                template.headline = positioning.headline.clone();
                                template.project_section_tip = positioning.project_section_tip.clone();
                                template.skill_listing_tip = positioning.skill_listing_tip.clone();
                                template.bonus_skills_mention =
                                    positioning.bonus_skills_mention.clone().unwrap_or_default();
                            }
                            SuggestionBlock::Encouragement(text) => template.encouragement = text.clone(),
                            SuggestionBlock::Advice(items) => template.advice = items.clone(),
                        }
                    }
                }
                ReportSection::SkillInventory(inventory) => {
                    template.has_inventory = true;
                    template.resume_skills = inventory.resume_skills.join(", ");
                    template.job_skills = inventory.job_skills.join(", ");
                }
            }
        }

        template
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ReportView) -> Result<String> {
        let template_data = self.create_template_data(report);
        template_data
            .render()
            .map_err(|e| ResumeMatchError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool, include_html_styles: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &ReportView, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Resolve `--save`: a directory gets a generated file name inside it.
pub fn resolve_save_path(path: &Path, format: &OutputFormat, resume_name: Option<&str>) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, resume_name.unwrap_or("resume"), true))
    } else {
        path.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}_match{}.html", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::result::fixtures::sample_result;
    use crate::model::AnalysisResult;

    fn view() -> ReportView {
        ReportView::from_result(&sample_result(), false).with_resume_file("cv.pdf")
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack.find(needle).unwrap_or_else(|| panic!("'{}' not found", needle))
    }

    #[test]
    fn test_console_without_colors_has_tier_labels() {
        let output = ConsoleFormatter::new(false).format_report(&view()).unwrap();

        assert!(output.contains("Moderate Match [WARNING]"));
        assert!(output.contains("[!] Critical skills gap: Sql"));
        assert!(output.contains("60.0 [WARNING]"));
        assert!(output.contains("90.0 [SUCCESS]"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_sections_follow_report_order() {
        let output = ConsoleFormatter::new(false).format_report(&view()).unwrap();

        let banner = position(&output, "Moderate Match");
        let alert = position(&output, "Critical skills gap");
        let breakdown = position(&output, "Score Breakdown");
        let matched = position(&output, "Matched Skills");
        let missing = position(&output, "Missing Skills");
        let bonus = position(&output, "Bonus Skills");
        let suggestions = position(&output, "Suggestions");
        assert!(banner < alert && alert < breakdown && breakdown < matched);
        assert!(matched < missing && missing < bonus && bonus < suggestions);
    }

    #[test]
    fn test_console_empty_panels() {
        let mut result = sample_result();
        result.matched_skills.clear();
        let view = ReportView::from_result(&result, false);

        let output = ConsoleFormatter::new(false).format_report(&view).unwrap();
        assert!(output.contains(NO_MATCHED_SKILLS));
    }

    #[test]
    fn test_json_emits_service_payload() {
        let output = JsonFormatter::new(false).format_report(&view()).unwrap();
        let parsed = AnalysisResult::from_json(&output).unwrap();
        assert_eq!(parsed, sample_result());
    }

    #[test]
    fn test_markdown_omits_empty_sections() {
        let mut result = sample_result();
        result.critical_missing_skills.clear();
        result.bonus_skills.clear();
        result.suggestions = None;
        result.scoring_breakdown.final_score = 70.0;
        let view = ReportView::from_result(&result, false);

        let output = MarkdownFormatter::new(false).format_report(&view).unwrap();
        assert!(!output.contains("Critical skills gap"));
        assert!(!output.contains("Bonus Skills"));
        assert!(!output.contains("Suggestions"));
        assert!(output.contains("| Required Skill Coverage | 40% | 🟡 60.0 |"));
        assert!(output.contains("| **Final Score** | | 🟡 **70.0** |"));
    }

    #[test]
    fn test_html_escapes_service_text() {
        let mut result = sample_result();
        result.matched_skills = vec!["<script>alert(1)</script>".to_string()];
        let view = ReportView::from_result(&result, false);

        let output = HtmlFormatter::new(false).format_report(&view).unwrap();
        assert!(!output.contains("<script>alert(1)</script>"));
        assert!(output.contains("&#60;script&#62;alert(1)&#60;/script&#62;"));
    }

    #[test]
    fn test_html_tiers_and_sections() {
        let output = HtmlFormatter::new(true).format_report(&view()).unwrap();

        assert!(output.contains("banner tier-warning"));
        assert!(output.contains("id=\"critical-gaps\""));
        assert!(output.contains("Critical skills gap:</strong> Sql"));
        assert!(output.contains("Inventory API"));
        assert!(!output.contains("id=\"skill-inventory\""));
    }

    #[test]
    fn test_html_empty_state_and_omitted_alert() {
        let mut result = sample_result();
        result.critical_missing_skills.clear();
        result.missing_skills.clear();
        let view = ReportView::from_result(&result, false);

        let output = HtmlFormatter::new(false).format_report(&view).unwrap();
        assert!(!output.contains("id=\"critical-gaps\""));
        assert!(output.contains(NO_MISSING_SKILLS));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Html, "/tmp/jane_cv.pdf", false), "jane_cv_match.html");
        assert!(suggest_filename(&OutputFormat::Json, "cv.pdf", true).starts_with("cv_match_"));
    }

    #[test]
    fn test_save_path_inside_directory() {
        let dir = tempfile::tempdir().unwrap();

        let path = resolve_save_path(dir.path(), &OutputFormat::Markdown, Some("/home/jane/cv.pdf"));
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("cv_match_") && name.ends_with(".md"), "{}", name);

        let unnamed = resolve_save_path(dir.path(), &OutputFormat::Json, None);
        assert!(unnamed.file_name().unwrap().to_string_lossy().starts_with("resume_match_"));

        let file = dir.path().join("out.html");
        assert_eq!(resolve_save_path(&file, &OutputFormat::Html, Some("cv.pdf")), file);
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("cv_match.md");
        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# report");
    }
}

//! CLI interface for the resume match client

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-match")]
#[command(about = "Match a resume against a job description using a remote analysis service")]
#[command(long_about = "Upload a resume and a job description to the analysis service and render the matching report: score, skill gaps, seven-factor breakdown and suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis service base URL (overrides configuration)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a resume and job description for analysis
    Analyze {
        /// Path to resume file (PDF expected)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description text
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include every skill list in the report
        #[arg(short, long)]
        detailed: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Render a previously saved JSON analysis result
    Render {
        /// Path to a JSON analysis result
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include every skill list in the report
        #[arg(short, long)]
        detailed: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Check that the analysis service is reachable
    Ping,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Extensions accepted for `--job`
pub const JOB_DESCRIPTION_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("job.MD"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("job.docx"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("job"), &["txt"]).is_err());
    }

    #[test]
    fn test_job_extensions_are_readable_text() {
        use crate::input::file_detector::FileType;
        for ext in JOB_DESCRIPTION_EXTENSIONS {
            assert!(matches!(FileType::from_extension(ext), FileType::Text | FileType::Markdown), "{}", ext);
        }
        assert!(validate_file_extension(Path::new("job.markdown"), JOB_DESCRIPTION_EXTENSIONS).is_ok());
    }

    #[test]
    fn test_job_and_job_text_conflict() {
        let parsed = Cli::try_parse_from([
            "resume-match", "analyze", "--resume", "cv.pdf", "--job", "jd.txt", "--job-text", "Rust",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_analyze_accepts_inline_text() {
        let cli = Cli::try_parse_from([
            "resume-match", "--endpoint", "http://localhost:9000", "analyze", "-r", "cv.pdf", "--job-text", "Rust, SQL",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Commands::Analyze { resume, job_text, .. } => {
                assert_eq!(resume, Some(PathBuf::from("cv.pdf")));
                assert_eq!(job_text.as_deref(), Some("Rust, SQL"));
            }
            _ => panic!("expected analyze"),
        }
    }
}

//! Resume match: submit a resume and job description to the analysis service and render the report

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_match::cli::{self, Cli, Commands, ConfigAction};
use resume_match::config::OutputFormat;
use resume_match::input::InputManager;
use resume_match::model::AnalysisResult;
use resume_match::output::{resolve_save_path, save_report_to_file, ReportGenerator, ReportView};
use resume_match::service::HttpAnalysisService;
use resume_match::session::SubmissionController;
use resume_match::{Config, Result, ResumeMatchError};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref(), cli.endpoint.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>, endpoint: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match endpoint {
        Some(endpoint) => config.with_base_url(endpoint),
        None => Ok(config),
    }
}

/// Options shared by every command that prints a report
struct ReportOptions {
    output: Option<String>,
    save: Option<PathBuf>,
    detailed: bool,
    no_color: bool,
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
            no_color,
        } => {
            let options = ReportOptions { output, save, detailed, no_color };
            let format = resolve_format(&options, &config)?;

            let input_manager = InputManager::new();

            let resume_upload = match &resume {
                Some(path) => Some(input_manager.load_resume(path).await?),
                None => None,
            };

            let job_description = match &job {
                Some(path) => {
                    cli::validate_file_extension(path, cli::JOB_DESCRIPTION_EXTENSIONS)
                        .map_err(|e| ResumeMatchError::UnsupportedFormat(format!("Job description file: {}", e)))?;
                    input_manager.load_job_description(path).await?
                }
                None => job_text.unwrap_or_default(),
            };

            let service = Arc::new(HttpAnalysisService::new(&config)?);
            let endpoint = service.analyze_url().to_string();
            let controller = SubmissionController::new(service);

            info!("Submitting to {}", endpoint);
            let spinner = (format == OutputFormat::Console && options.save.is_none())
                .then(|| start_spinner("Analyzing resume against job description..."));

            let outcome = controller.submit(resume_upload, &job_description).await;

            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            let result = outcome?;

            let mut view = ReportView::from_result(&result, options.detailed || config.output.detailed)
                .with_source(endpoint);
            if let Some(path) = &resume {
                view = view.with_resume_file(path.display().to_string());
            }

            emit_report(&view, format, &options, &config)?;
        }

        Commands::Render {
            input,
            output,
            save,
            detailed,
            no_color,
        } => {
            let options = ReportOptions { output, save, detailed, no_color };
            let format = resolve_format(&options, &config)?;

            info!("Rendering saved result from {}", input.display());
            let json = tokio::fs::read_to_string(&input).await?;
            let result = AnalysisResult::from_json(&json)?;

            let view = ReportView::from_result(&result, options.detailed || config.output.detailed)
                .with_source(input.display().to_string());

            emit_report(&view, format, &options, &config)?;
        }

        Commands::Ping => {
            let service = HttpAnalysisService::new(&config)?;
            let banner = service.health_check().await?;
            println!("✅ Analysis service reachable at {}", config.base_url());
            if !banner.is_empty() {
                println!("{}", banner);
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Service URL: {}", config.base_url());
                    println!("Analyze Endpoint: {}", config.analyze_url());
                    println!("\nOutput:");
                    println!("  Format: {:?}", config.output.format);
                    println!("  Detailed: {}", config.output.detailed);
                    println!("  Colors: {}", config.output.color_output);
                    println!("  Pretty JSON: {}", config.output.pretty_json);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn resolve_format(options: &ReportOptions, config: &Config) -> Result<OutputFormat> {
    match &options.output {
        Some(output) => cli::parse_output_format(output).map_err(ResumeMatchError::Validation),
        None => Ok(config.output.format),
    }
}

fn start_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn emit_report(view: &ReportView, format: OutputFormat, options: &ReportOptions, config: &Config) -> Result<()> {
    // Escape codes never go to a file
    let use_colors = config.output.color_output && !options.no_color && options.save.is_none();
    let generator = ReportGenerator::with_options(use_colors, config.output.pretty_json, true, true);
    let report = generator.generate_report(view, &format)?;

    match &options.save {
        Some(path) => {
            let path = resolve_save_path(path, &format, view.metadata.resume_file.as_deref());
            save_report_to_file(&report, &path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", report),
    }

    Ok(())
}

//! ATS optimizer: resume keyword extraction and job description matching

use anyhow::{Context, Result};
use ats_optimizer::analysis::AnalysisEngine;
use ats_optimizer::cli::{self, Cli, Commands, ConfigAction};
use ats_optimizer::config::Config;
use ats_optimizer::input::InputManager;
use ats_optimizer::keywords::extract_keywords;
use ats_optimizer::matching::match_keywords;
use ats_optimizer::output::formatter::ConsoleFormatter;
use ats_optimizer::output::{save_report_to_file, ReportGenerator};
use ats_optimizer::suggestions::HttpSuggester;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            detailed,
            no_suggestions,
            no_color,
        } => {
            let output_format = output.unwrap_or(config.output.format);
            config.output.detailed |= detailed;
            if no_color || save.is_some() {
                config.output.color_output = false;
            }

            let (resume_text, job_text) = read_inputs(&resume, &job).await?;
            let engine = AnalysisEngine::new(&config);

            let report = if no_suggestions || !config.suggestions.enabled {
                info!("Placement suggestions disabled");
                engine.analyze(&resume_text, &job_text)?
            } else {
                let suggester = HttpSuggester::new(&config.suggestions)
                    .context("Failed to create suggestion client")?;
                let spinner = spinner("Generating keyword placement suggestions...");
                let report = engine
                    .analyze_with_suggestions(&resume_text, &job_text, &suggester)
                    .await;
                spinner.finish_and_clear();
                report?
            };
            let report = report.with_files(resume.display().to_string(), job.display().to_string());

            if let Some(error) = &report.suggestion_error {
                warn!("{}", error);
            }

            let rendered = ReportGenerator::from_config(&config.output).generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Keywords { file, json } => {
            validate_input_path(&file, "Input file")?;
            let text = InputManager::new().extract_text(&file).await?;
            let keywords = extract_keywords(&text);
            info!("Extracted {} keywords from {}", keywords.len(), file.display());

            if json {
                println!("{}", serde_json::to_string_pretty(&keywords)?);
            } else {
                for keyword in &keywords {
                    println!("{}", keyword);
                }
            }
        }

        Commands::Highlight { resume, job, no_color } => {
            let (resume_text, job_text) = read_inputs(&resume, &job).await?;
            let result = match_keywords(&extract_keywords(&resume_text), &extract_keywords(&job_text));
            let formatter = ConsoleFormatter::new(config.output.color_output && !no_color, true);
            println!("{}", formatter.format_segments(&result.highlight(&resume_text)));
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                print!("{}", toml::to_string_pretty(&config).context("Failed to serialize configuration")?);
            }

            Some(ConfigAction::Path) => println!("{}", config_path.display()),

            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset to defaults");
            }

            Some(ConfigAction::Set { key, value }) => {
                config.set_value(&key, &value)?;
                config.save_to(&config_path)?;
                println!("✅ {} = {}", key, value);
            }
        },
    }

    Ok(())
}

fn validate_input_path(path: &Path, label: &str) -> Result<()> {
    cli::validate_file_extension(path, cli::SUPPORTED_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("{}: {}", label, e))
}

async fn read_inputs(resume: &Path, job: &Path) -> Result<(String, String)> {
    validate_input_path(resume, "Resume file")?;
    validate_input_path(job, "Job description file")?;

    let mut input_manager = InputManager::new();
    let resume_text = input_manager
        .extract_text(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let job_text = input_manager
        .extract_text(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;

    Ok((resume_text, job_text))
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

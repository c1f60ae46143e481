//! CLI interface for the ATS optimizer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions accepted for resume and job description files.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "ats-optimizer")]
#[command(version)]
#[command(about = "Resume keyword extraction and ATS job description matching")]
#[command(long_about = "Compare a resume with a job description the way an Applicant Tracking System does: extract keywords, score the match, highlight matched and missing keywords, and ask a language model where the missing ones belong")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show the full highlighted resume
        #[arg(short, long)]
        detailed: bool,

        /// Skip placement suggestions (keyword analysis only)
        #[arg(long)]
        no_suggestions: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// List the keywords extracted from a file
    Keywords {
        /// Path to a resume or job description file
        file: PathBuf,

        /// Print the keywords as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print the resume with job description keywords highlighted
    Highlight {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.good_threshold")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse::<OutputFormat>().map_err(|e| e.to_string())
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
        None => Err(format!("File has no extension: {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "ats-optimizer", "-v", "analyze", "-r", "resume.pdf", "-j", "job.txt", "-o", "json", "--no-suggestions",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze {
                resume,
                output,
                no_suggestions,
                detailed,
                ..
            } => {
                assert_eq!(resume, PathBuf::from("resume.pdf"));
                assert_eq!(output, Some(OutputFormat::Json));
                assert!(no_suggestions);
                assert!(!detailed);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_rejects_unknown_output_format() {
        let result = Cli::try_parse_from(["ats-optimizer", "analyze", "-r", "a.txt", "-j", "b.txt", "-o", "pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), SUPPORTED_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), SUPPORTED_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), SUPPORTED_EXTENSIONS).is_err());
    }
}

//! Output formatters - console, JSON, Markdown and HTML renderings of an analysis report

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{AtsOptimizerError, Result};
use crate::highlight::HighlightSegment;
use crate::keywords::KeywordSet;
use crate::matching::{MatchClass, ScoreTier};
use crate::output::report::AnalysisReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Graphemes of resume text shown in the non-detailed console preview.
const PREVIEW_GRAPHEMES: usize = 400;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and highlighted resume text
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing and documentation
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with inline styling
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that dispatches to the configured formatter
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Keyword Analysis Report</title>
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
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .tier-excellent { background: #28a745; }
        .tier-good { background: #17a2b8; }
        .tier-needs-work { background: #dc3545; }
        .section { margin: 25px 0; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .keyword {
            display: inline-block;
            padding: 2px 10px;
            margin: 3px;
            border-radius: 12px;
            font-size: 0.9em;
        }
        .keyword.matched, mark.matched { background: #d4edda; color: #155724; }
        .keyword.missing, mark.missing { background: #ffe5b4; color: #8a4b00; }
        mark { padding: 0 2px; border-radius: 3px; }
        .suggestion {
            background: #f8f9fa;
            padding: 12px 15px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #17a2b8;
        }
        .error {
            background: #f8d7da;
            color: #721c24;
            padding: 12px 15px;
            border-radius: 6px;
        }
        .resume {
            white-space: pre-wrap;
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            font-family: 'SFMono-Regular', Consolas, monospace;
            font-size: 0.9em;
        }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Keyword Analysis Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Match Score</h2>
            <h3>{{ percentage }}% <span class="score-badge {{ tier_class }}">{{ tier_label }}</span></h3>
            <p>{{ score_message }}</p>
        </div>

        <div class="section">
            <h2>Matched Keywords ({{ matched.len() }})</h2>
            {% for keyword in matched %}<span class="keyword matched">{{ keyword }}</span>{% endfor %}
            {% if matched.is_empty() %}<p>None of the job description keywords were found.</p>{% endif %}
        </div>

        <div class="section">
            <h2>Missing Keywords ({{ missing.len() }})</h2>
            {% for keyword in missing %}<span class="keyword missing">{{ keyword }}</span>{% endfor %}
            {% if missing.is_empty() %}<p>Every job description keyword appears in the resume.</p>{% endif %}
        </div>

        {% if has_suggestion_error %}
        <div class="section">
            <h2>Placement Suggestions</h2>
            <p class="error">{{ suggestion_error }}</p>
        </div>
        {% endif %}

        {% if !suggestions.is_empty() %}
        <div class="section">
            <h2>Placement Suggestions</h2>
            {% for suggestion in suggestions %}
            <div class="suggestion"><strong>{{ suggestion.keyword }}</strong>: {{ suggestion.placement_suggestion }}</div>
            {% endfor %}
        </div>
        {% endif %}

        <div class="section">
            <h2>Resume</h2>
            <p>Matched keywords are green, missing keywords are orange.</p>
            <div class="resume">{% for segment in segments %}{% if segment.class.is_empty() %}{{ segment.text }}{% else %}<mark class="{{ segment.class }}">{{ segment.text }}</mark>{% endif %}{% endfor %}</div>
        </div>

        <div class="metadata">
            <p><strong>Generated by ATS Optimizer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_file }} | <strong>Suggestions:</strong> {{ suggester_model }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    percentage: u8,
    tier_class: &'static str,
    tier_label: &'static str,
    score_message: &'a str,
    matched: &'a [String],
    missing: &'a [String],
    suggestions: &'a [crate::suggestions::Suggestion],
    has_suggestion_error: bool,
    suggestion_error: &'a str,
    segments: Vec<HtmlSegment<'a>>,
    version: &'a str,
    resume_file: &'a str,
    job_file: &'a str,
    suggester_model: &'a str,
}

struct HtmlSegment<'a> {
    text: &'a str,
    /// CSS class of the `<mark>`, empty for plain text
    class: &'static str,
}

fn class_name(class: Option<MatchClass>) -> &'static str {
    match class {
        Some(MatchClass::Matched) => "matched",
        Some(MatchClass::Missing) => "missing",
        None => "",
    }
}

fn tier_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::Excellent => Color::Green,
        ScoreTier::Good => Color::Yellow,
        ScoreTier::NeedsWork => Color::Red,
    }
}

/// First `max` grapheme clusters of `text`, with an ellipsis when cut.
pub fn truncate_graphemes(text: &str, max: usize) -> (&str, bool) {
    match text.grapheme_indices(true).nth(max) {
        Some((cut, _)) => (&text[..cut], true),
        None => (text, false),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        let underline = "─".repeat(title.graphemes(true).count() + 2);

        if self.use_colors {
            format!(
                "\n{} {}\n{}\n",
                prefix.color(color).bold(),
                title.color(color).bold(),
                underline.color(Color::BrightBlack)
            )
        } else {
            format!("\n{} {}\n{}\n", prefix, title, underline)
        }
    }

    fn format_score_badge(&self, tier: ScoreTier) -> String {
        if self.use_colors {
            format!("[{}]", tier.label().color(tier_color(tier)).bold())
        } else {
            format!("[{}]", tier.label())
        }
    }

    fn format_keyword_list(&self, keywords: &KeywordSet, color: Color) -> String {
        if keywords.is_empty() {
            return format!("  {}\n", self.colorize("(none)", Color::BrightBlack));
        }
        let joined = keywords
            .iter()
            .map(|keyword| self.colorize(keyword, color))
            .collect::<Vec<_>>()
            .join(", ");
        format!("  {}\n", joined)
    }

    /// Render highlight segments: background colors, or `[+kw]` / `[-kw]`
    /// markers when colors are off.
    pub fn format_segments(&self, segments: &[HighlightSegment<'_>]) -> String {
        segments
            .iter()
            .map(|segment| match (segment.match_class, self.use_colors) {
                (Some(MatchClass::Matched), true) => segment.text.black().on_green().to_string(),
                (Some(MatchClass::Missing), true) => segment.text.black().on_yellow().to_string(),
                (Some(MatchClass::Matched), false) => format!("[+{}]", segment.text),
                (Some(MatchClass::Missing), false) => format!("[-{}]", segment.text),
                (None, _) => segment.text.to_string(),
            })
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.match_result;

        output.push_str(&self.format_header("📊 ATS KEYWORD ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Match Score", 2));
        output.push_str(&format!(
            "Score: {}% {}  ({} of {} job keywords found)\n",
            report.score.percentage,
            self.format_score_badge(report.score.tier),
            result.matched_keywords.len(),
            result.job_keyword_count()
        ));
        output.push_str(&format!("{}\n", self.colorize(&report.score.message, Color::Cyan)));

        output.push_str(&self.format_header(
            &format!("✅ Matched Keywords ({})", result.matched_keywords.len()),
            3,
        ));
        output.push_str(&self.format_keyword_list(&result.matched_keywords, Color::Green));

        output.push_str(&self.format_header(
            &format!("⚠️  Missing Keywords ({})", result.missing_keywords.len()),
            3,
        ));
        output.push_str(&self.format_keyword_list(&result.missing_keywords, Color::Yellow));

        if let Some(error) = &report.suggestion_error {
            output.push_str(&self.format_header("💡 Placement Suggestions", 2));
            output.push_str(&format!("{}\n", self.colorize(error, Color::Red)));
        } else if report.has_suggestions() {
            output.push_str(&self.format_header("💡 Placement Suggestions", 2));
            for (i, suggestion) in report.suggestions.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {}\n   {}\n",
                    i + 1,
                    self.colorize(&suggestion.keyword, Color::White),
                    suggestion.placement_suggestion
                ));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("📄 Highlighted Resume", 2));
            output.push_str(&format!(
                "Legend: {} matched, {} missing\n\n",
                self.format_segments(&[HighlightSegment::keyword("keyword", MatchClass::Matched)]),
                self.format_segments(&[HighlightSegment::keyword("keyword", MatchClass::Missing)])
            ));
            output.push_str(&self.format_segments(&report.highlighted_resume()));
            output.push('\n');

            output.push_str(&self.format_header("Extracted Keywords", 3));
            output.push_str(&format!(
                "Resume: {} keywords | Job description: {} keywords\n",
                report.resume_keywords.len(),
                report.job_keywords.len()
            ));
        } else if !report.resume_text.trim().is_empty() {
            let (preview, truncated) = truncate_graphemes(&report.resume_text, PREVIEW_GRAPHEMES);
            output.push_str(&self.format_header("📄 Resume Preview", 3));
            output.push_str(&self.format_segments(&result.highlight(preview)));
            if truncated {
                output.push_str(&self.colorize(" … (use --detailed for the full text)", Color::BrightBlack));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{} Generated by ATS Optimizer v{}{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.optimizer_version,
            report
                .metadata
                .suggester_model
                .as_deref()
                .map(|model| format!(" | Suggestions: {}", model))
                .unwrap_or_default()
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(tier: ScoreTier) -> &'static str {
        match tier {
            ScoreTier::Excellent => "🟢 Excellent",
            ScoreTier::Good => "🟡 Good",
            ScoreTier::NeedsWork => "🔴 Needs work",
        }
    }

    fn keyword_line(keywords: &KeywordSet) -> String {
        if keywords.is_empty() {
            "_None_\n\n".to_string()
        } else {
            format!("`{}`\n\n", keywords.as_slice().join("`, `"))
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.match_result;

        output.push_str("# ATS Keyword Analysis Report\n\n");
        output.push_str(&format!(
            "**Generated:** {}\n\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str("## Match Score\n\n");
        output.push_str(&format!(
            "**{}%** {} ({} of {} job keywords found)\n\n",
            report.score.percentage,
            Self::markdown_score_badge(report.score.tier),
            result.matched_keywords.len(),
            result.job_keyword_count()
        ));
        output.push_str(&format!("> {}\n\n", report.score.message));

        output.push_str(&format!("## ✅ Matched Keywords ({})\n\n", result.matched_keywords.len()));
        output.push_str(&Self::keyword_line(&result.matched_keywords));

        output.push_str(&format!("## ⚠️ Missing Keywords ({})\n\n", result.missing_keywords.len()));
        output.push_str(&Self::keyword_line(&result.missing_keywords));

        if let Some(error) = &report.suggestion_error {
            output.push_str("## 💡 Placement Suggestions\n\n");
            output.push_str(&format!("**{}**\n\n", error));
        } else if report.has_suggestions() {
            output.push_str("## 💡 Placement Suggestions\n\n");
            for (i, suggestion) in report.suggestions.iter().enumerate() {
                output.push_str(&format!(
                    "{}. **{}**: {}\n",
                    i + 1,
                    suggestion.keyword.trim(),
                    suggestion.placement_suggestion.trim()
                ));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by ATS Optimizer v{} in {}ms*",
                report.metadata.optimizer_version, report.metadata.processing_time_ms
            ));
            if let (Some(resume), Some(job)) = (&report.metadata.resume_file, &report.metadata.job_file) {
                output.push_str(&format!(" *| Resume: `{}` | Job: `{}`*", resume, job));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data<'a>(&self, report: &'a AnalysisReport) -> HtmlTemplate<'a> {
        let tier_class = match report.score.tier {
            ScoreTier::Excellent => "tier-excellent",
            ScoreTier::Good => "tier-good",
            ScoreTier::NeedsWork => "tier-needs-work",
        };

        let segments = report
            .highlighted_resume()
            .into_iter()
            .map(|segment| HtmlSegment {
                text: segment.text,
                class: class_name(segment.match_class),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            percentage: report.score.percentage,
            tier_class,
            tier_label: report.score.tier.label(),
            score_message: &report.score.message,
            matched: report.match_result.matched_keywords.as_slice(),
            missing: report.match_result.missing_keywords.as_slice(),
            suggestions: &report.suggestions,
            has_suggestion_error: report.suggestion_error.is_some(),
            suggestion_error: report.suggestion_error.as_deref().unwrap_or_default(),
            segments,
            version: &report.metadata.optimizer_version,
            resume_file: report.metadata.resume_file.as_deref().unwrap_or("-"),
            job_file: report.metadata.job_file.as_deref().unwrap_or("-"),
            suggester_model: report.metadata.suggester_model.as_deref().unwrap_or("disabled"),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| AtsOptimizerError::OutputFormatting(format!("Failed to render HTML report: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default())
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::with_options(output.color_output, output.detailed, output.pretty_json, true, true)
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
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

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{match_texts, ScoreSummary, ScoreThresholds};
    use crate::output::report::ReportMetadata;
    use crate::keywords::extract_keywords;
    use crate::suggestions::Suggestion;

    fn sample_report() -> AnalysisReport {
        let resume = "Senior Rust engineer. Built <script> tooling & services on Linux.";
        let job = "Rust engineer with Docker and Linux experience";
        let match_result = match_texts(resume, job);
        AnalysisReport {
            metadata: ReportMetadata::new(12, Some("test-model".to_string())),
            resume_keywords: extract_keywords(resume),
            job_keywords: extract_keywords(job),
            score: ScoreSummary::new(match_result.match_score, &ScoreThresholds::default()),
            match_result,
            suggestions: vec![Suggestion {
                keyword: "docker".to_string(),
                placement_suggestion: "Mention containerized deployments in Experience.".to_string(),
            }],
            suggestion_error: None,
            resume_text: resume.to_string(),
        }
        .with_files("resume.txt", "job.txt")
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();
        assert!(output.contains("Score: 60% [NEEDS WORK]"));
        assert!(output.contains("rust, engineer, linux"));
        assert!(output.contains("docker, experience"));
        assert!(output.contains("1. docker"));
        assert!(output.contains("[+Rust]"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_shows_suggestion_error() {
        let mut report = sample_report();
        report.suggestions.clear();
        report.suggestion_error = Some("Failed to generate suggestions. Please try again.".to_string());
        let output = ConsoleFormatter::new(false, false).format_report(&report).unwrap();
        assert!(output.contains("Failed to generate suggestions. Please try again."));
    }

    #[test]
    fn test_json_output() {
        let report = sample_report();
        let output = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["match_result"]["matchedKeywords"][0], "rust");
        assert_eq!(value["score"]["percentage"], 60);
        assert_eq!(value["suggestions"][0]["placementSuggestion"], "Mention containerized deployments in Experience.");
        assert!(value.get("suggestion_error").is_none());
    }

    #[test]
    fn test_markdown_output() {
        let report = sample_report();
        let output = MarkdownFormatter::new(true).format_report(&report).unwrap();
        assert!(output.contains("**60%** 🔴 Needs work"));
        assert!(output.contains("`rust`, `engineer`, `linux`"));
        assert!(output.contains("1. **docker**: Mention containerized"));
        assert!(output.contains("Resume: `resume.txt`"));
    }

    #[test]
    fn test_html_escapes_and_marks() {
        let report = sample_report();
        let output = HtmlFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains(r#"<mark class="matched">Rust</mark>"#));
        assert!(output.contains("&lt;script&gt;"));
        assert!(!output.contains("<script>"));
        assert!(output.contains(r#"<span class="keyword missing">docker</span>"#));
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("héllo", 10), ("héllo", false));
        assert_eq!(truncate_graphemes("héllo", 2), ("hé", true));
        assert_eq!(truncate_graphemes("👍🏽👍🏽", 1), ("👍🏽", true));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Html, "docs/resume.pdf", false), "resume_ats.html");
        assert!(suggest_filename(OutputFormat::Json, "resume.md", true).ends_with(".json"));
    }
}

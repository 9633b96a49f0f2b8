use crate::infra::{evaluation_timestamp, grade_icon};
use clap::{Args, ValueEnum};
use marking_engine::config::AppConfig;
use marking_engine::error::AppError;
use marking_engine::marking::{
    export_file_name, ExportFormat, MarkingEngine, MarkingReport, MarkingRequest,
};
use marking_engine::telemetry;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding the grader's selections ("-" reads stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// How to print the result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Also save export files into this directory (CSV and JSON for text output)
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let request = read_request(&args.input)?;
    let engine = MarkingEngine::standard(config.grading);
    engine.catalogue().validate_request(&request)?;

    let report = engine.evaluate(&request, evaluation_timestamp());
    for advisory in &report.advisories {
        warn!(category = %advisory.category, grade = advisory.grade.label(), "{}", advisory.message);
    }

    let rendered = match args.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => ExportFormat::Json.render(&report)?,
        OutputFormat::Csv => ExportFormat::Csv.render(&report)?,
    };
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    if let Some(dir) = args.out_dir {
        let formats: &[ExportFormat] = match args.format {
            OutputFormat::Text => &[ExportFormat::Csv, ExportFormat::Json],
            OutputFormat::Json => &[ExportFormat::Json],
            OutputFormat::Csv => &[ExportFormat::Csv],
        };
        for path in write_exports(&report, &dir, formats)? {
            info!(path = %path.display(), "export written");
        }
    }

    Ok(())
}

fn read_request(input: &Path) -> Result<MarkingRequest, AppError> {
    let raw = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn write_exports(
    report: &MarkingReport,
    dir: &Path,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)?;
    formats
        .iter()
        .map(|format| -> Result<PathBuf, AppError> {
            let path = dir.join(export_file_name(*format, report.evaluated_at));
            fs::write(&path, format.render(report)?)?;
            Ok(path)
        })
        .collect()
}

pub(crate) fn render_text(report: &MarkingReport) -> String {
    let summary = report.summary();
    let mut out = String::new();

    match &summary.student_id {
        Some(student) => out.push_str(&format!("Marking summary for {student}\n")),
        None => out.push_str("Marking summary\n"),
    }
    out.push_str(&format!("Evaluated {}\n", summary.evaluation_date));

    out.push_str("\nOverall grades & marks\n");
    for row in &summary.rows {
        out.push_str(&format!(
            "- {}: {} {} ({})\n",
            row.category,
            grade_icon(row.grade),
            row.grade_label,
            row.mark
        ));
    }
    out.push_str(&format!(
        "TOTAL MARKS: {}/{}\n",
        summary.total_mark, summary.max_mark
    ));

    out.push_str("\nQuick stats\n");
    for entry in &summary.grade_counts {
        out.push_str(&format!("- {}: {} lab(s)\n", entry.grade_label, entry.count));
    }

    if !summary.advisories.is_empty() {
        out.push_str("\nAdvisories\n");
        for advisory in &summary.advisories {
            out.push_str(&format!("- {advisory}\n"));
        }
    }

    out.push_str("\nGenerated feedback\n");
    out.push_str(&report.feedback_text());
    out
}

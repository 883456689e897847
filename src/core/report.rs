// src/core/report.rs
//! Human-readable and JSON renditions of the analysis results.

use std::fmt::Write as _;
use std::path::Path;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::error::Result;
use super::metrics::ProjectStatistics;
use super::engine::GraphArtifacts;

#[derive(Debug, Serialize)]
pub struct StatisticsReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub project: &'a Path,
    pub statistics: &'a ProjectStatistics,
}

/// Serialize statistics for machine consumption; undefined averages become `null`
pub fn statistics_json(project: &Path, statistics: &ProjectStatistics) -> Result<String> {
    let report = StatisticsReport {
        generated_at: Utc::now(),
        project,
        statistics,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn format_statistics(stats: &ProjectStatistics) -> String {
    let totals = &stats.totals;
    let averages = &stats.averages;
    let outliers = &stats.outliers;
    let mut out = String::new();

    let _ = writeln!(out, "\n{}\n", "Statistics:".green().bold());
    push_line(&mut out, "Number of classes", totals.classes.to_string());
    push_line(&mut out, "Number of lines of code", totals.lines.to_string());
    push_line(&mut out, "Total number of methods", totals.methods.to_string());
    push_line(&mut out, "Total number of packages", totals.package_count().to_string());
    push_line(&mut out, "Average methods per class", average(averages.methods_per_class, "no classes found"));
    push_line(&mut out, "Average lines of code per method", average(averages.lines_per_method, "no methods found"));
    push_line(&mut out, "Average attributes per class", average(averages.attributes_per_class, "no classes found"));
    push_line(&mut out, "Maximum parameters of any method", totals.max_parameters.to_string());

    push_line(
        &mut out,
        &format!("{}% of classes with the most methods", outliers.percent),
        outliers.top_by_methods.join(" "),
    );
    push_line(
        &mut out,
        &format!("{}% of classes with the most attributes", outliers.percent),
        outliers.top_by_attributes.join(" "),
    );
    push_line(&mut out, "Classes in both categories", outliers.top_in_both.join(" "));
    push_line(
        &mut out,
        &format!("Classes with more than {} methods", outliers.threshold),
        outliers.more_methods_than_threshold.join(" "),
    );

    out
}

pub fn format_graph_summary(artifacts: &GraphArtifacts) -> String {
    let mut out = String::new();
    let stats = &artifacts.stats;

    push_line(&mut out, "Call edges", stats.total_calls.to_string());
    push_line(
        &mut out,
        "Nodes (class-like / method-like)",
        format!("{} ({} / {})", stats.total_nodes, stats.class_like, stats.method_like),
    );
    push_line(&mut out, "Graph description", artifacts.dot_path.display().to_string());

    match &artifacts.image_path {
        Some(image) => push_line(&mut out, "Call graph generated", image.display().to_string()),
        None => {
            let _ = writeln!(
                out,
                "{}",
                "[!] Image rendering failed, the graph description is still available".yellow()
            );
        }
    }

    out
}

fn push_line(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "[*] {}: {}", label, value.as_str().cyan());
}

fn average(value: Option<usize>, reason: &str) -> String {
    match value {
        Some(v) => v.to_string(),
        None => format!("undefined ({})", reason),
    }
}

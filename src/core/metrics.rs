// src/core/metrics.rs
//! Structural metrics folded over every source unit of a project.

use std::collections::BTreeSet;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::MetricsError;
use super::syntax::SourceUnit;
use super::walker;

/// Class name -> metric value, in first-insertion order.
///
/// Class names are not package-qualified: a later class with the same simple
/// name overwrites the value while keeping the original position.
pub type ClassMetricMap = IndexMap<String, usize>;

/// Running totals across all units seen so far
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricTotals {
    pub classes: usize,
    /// Sum over units of the end line of their last type declaration
    pub lines: usize,
    pub methods: usize,
    pub packages: BTreeSet<String>,
    /// Sum over methods of `end_line - start_line`
    pub method_lines: usize,
    pub attributes: usize,
    pub max_parameters: usize,
}

impl MetricTotals {
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn average_methods_per_class(&self) -> Result<usize, MetricsError> {
        ceil_div(self.methods, self.classes, "average methods per class")
    }

    pub fn average_lines_per_method(&self) -> Result<usize, MetricsError> {
        ceil_div(self.method_lines, self.methods, "average lines per method")
    }

    pub fn average_attributes_per_class(&self) -> Result<usize, MetricsError> {
        ceil_div(self.attributes, self.classes, "average attributes per class")
    }
}

/// Averages after the divide-by-zero guard; `None` means undefined
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Averages {
    pub methods_per_class: Option<usize>,
    pub lines_per_method: Option<usize>,
    pub attributes_per_class: Option<usize>,
}

/// Outlier classes, see [`classes_with_more_percent`] and friends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outliers {
    pub percent: f64,
    pub threshold: usize,
    pub top_by_methods: Vec<String>,
    pub top_by_attributes: Vec<String>,
    pub top_in_both: Vec<String>,
    pub more_methods_than_threshold: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatistics {
    pub files: usize,
    pub totals: MetricTotals,
    pub averages: Averages,
    pub outliers: Outliers,
}

impl ProjectStatistics {
    pub fn class_count(&self) -> usize {
        self.totals.classes
    }

    pub fn method_count(&self) -> usize {
        self.totals.methods
    }
}

/// Selection parameters for the outlier report
#[derive(Debug, Clone, Copy)]
pub struct SelectionOptions {
    pub percent: f64,
    pub threshold: usize,
}

#[derive(Debug, Default)]
pub struct MetricsAggregator {
    files: usize,
    totals: MetricTotals,
    class_methods: ClassMetricMap,
    class_attributes: ClassMetricMap,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parsed file into the running totals
    pub fn accumulate(&mut self, unit: &SourceUnit) {
        let types = walker::types(unit);
        let methods = walker::declarations(unit);

        self.files += 1;
        self.totals.classes += types.len();
        self.totals.lines += types.last().map_or(0, |ty| ty.span().end_line);
        self.totals.methods += methods.len();
        self.totals.packages.extend(walker::packages(unit).into_iter().map(str::to_string));

        for method in &methods {
            self.totals.method_lines += method.span().line_delta();
            self.totals.max_parameters = self.totals.max_parameters.max(method.parameter_count());
        }

        for ty in &types {
            let attributes = ty.fields().count();
            self.totals.attributes += attributes;
            self.class_methods.insert(ty.name().to_string(), ty.methods().count());
            self.class_attributes.insert(ty.name().to_string(), attributes);
        }

        debug!(
            "Accumulated {}: {} types, {} methods",
            unit.path().display(),
            types.len(),
            methods.len()
        );
    }

    pub fn totals(&self) -> &MetricTotals {
        &self.totals
    }

    pub fn class_methods(&self) -> &ClassMetricMap {
        &self.class_methods
    }

    pub fn class_attributes(&self) -> &ClassMetricMap {
        &self.class_attributes
    }

    /// Compute averages and outliers from the accumulated totals
    pub fn finalize(&self, options: SelectionOptions) -> Result<ProjectStatistics, MetricsError> {
        let averages = Averages {
            methods_per_class: self.totals.average_methods_per_class().ok(),
            lines_per_method: self.totals.average_lines_per_method().ok(),
            attributes_per_class: self.totals.average_attributes_per_class().ok(),
        };

        let top_by_methods = classes_with_more_percent(&self.class_methods, options.percent)?;
        let top_by_attributes = classes_with_more_percent(&self.class_attributes, options.percent)?;
        let top_in_both = in_both(&top_by_methods, &top_by_attributes);
        let more_methods_than_threshold =
            classes_with_more_than(&self.class_methods, options.threshold);

        Ok(ProjectStatistics {
            files: self.files,
            totals: self.totals.clone(),
            averages,
            outliers: Outliers {
                percent: options.percent,
                threshold: options.threshold,
                top_by_methods,
                top_by_attributes,
                top_in_both,
                more_methods_than_threshold,
            },
        })
    }
}

fn ceil_div(numerator: usize, denominator: usize, what: &'static str) -> Result<usize, MetricsError> {
    if denominator == 0 {
        return Err(MetricsError::DivideByZero(what));
    }
    Ok(numerator.div_ceil(denominator))
}

/// Classes in the top `percent` of `metrics`.
///
/// Takes `k = ceil(len * percent / 100)` and then repeatedly moves the whole
/// group sharing the current maximum into the result until it holds at least
/// `k` names. A tie-group is never split, so the result may exceed `k`.
pub fn classes_with_more_percent(
    metrics: &ClassMetricMap,
    percent: f64,
) -> Result<Vec<String>, MetricsError> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(MetricsError::InvalidPercentage(percent));
    }

    let keep = (metrics.len() as f64 * percent / 100.0).ceil() as usize;
    let mut pool: Vec<(&String, usize)> = metrics.iter().map(|(name, value)| (name, *value)).collect();
    let mut selected = Vec::new();

    while selected.len() < keep {
        let Some(max) = pool.iter().map(|(_, value)| *value).max() else {
            break;
        };
        let (group, rest): (Vec<_>, Vec<_>) = pool.into_iter().partition(|(_, value)| *value == max);
        selected.extend(group.into_iter().map(|(name, _)| name.clone()));
        pool = rest;
    }

    Ok(selected)
}

/// Classes whose metric is strictly greater than `threshold`
pub fn classes_with_more_than(metrics: &ClassMetricMap, threshold: usize) -> Vec<String> {
    metrics
        .iter()
        .filter(|(_, value)| **value > threshold)
        .map(|(name, _)| name.clone())
        .collect()
}

/// Names present in both lists, in the order of the shorter one
pub fn in_both(first: &[String], second: &[String]) -> Vec<String> {
    let (shorter, longer) = if first.len() <= second.len() {
        (first, second)
    } else {
        (second, first)
    };

    shorter
        .iter()
        .filter(|name| longer.contains(name))
        .cloned()
        .collect()
}

use crate::batch::{BatchReport, ItemFailure, RenamedItem, ValidationReport};
use crate::pipeline::{PreviewLine, RulePipeline};
use crate::rule::{RenameRule, RuleId};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// A failed item, flattened for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    pub index: usize,
    pub item: Option<String>,
    pub error: String,
}

impl From<&ItemFailure> for FailureEntry {
    fn from(failure: &ItemFailure) -> Self {
        Self {
            index: failure.index,
            item: failure.original_name.clone(),
            error: failure.error.to_string(),
        }
    }
}

/// Result of a preview operation
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub previews: Vec<PreviewLine>,
    pub changed: usize,
    pub warnings: usize,
    pub failures: Vec<FailureEntry>,
    pub skipped_empty: usize,
    pub validation: ValidationReport,
}

impl PreviewResult {
    pub fn new(pipeline: &RulePipeline, report: &BatchReport, validation: ValidationReport) -> Self {
        let previews = pipeline.previews().to_vec();
        Self {
            changed: previews.iter().filter(|line| line.changed()).count(),
            warnings: previews.iter().map(|line| line.warnings.len()).sum(),
            previews,
            failures: report.failures.iter().map(FailureEntry::from).collect(),
            skipped_empty: report.skipped_empty,
            validation,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of an apply operation
#[derive(Debug, Serialize)]
pub struct ApplyResult {
    pub renamed: Vec<RenamedItem>,
    pub unchanged: usize,
    pub failures: Vec<FailureEntry>,
    pub skipped_empty: usize,
    pub validation: ValidationReport,
}

impl ApplyResult {
    pub fn new(report: &BatchReport, validation: ValidationReport) -> Self {
        let renamed: Vec<RenamedItem> = report
            .items
            .iter()
            .filter(|item| item.changed())
            .cloned()
            .collect();
        Self {
            unchanged: report.items.len() - renamed.len(),
            renamed,
            failures: report.failures.iter().map(FailureEntry::from).collect(),
            skipped_empty: report.skipped_empty,
            validation,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One rule as shown by `rules list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    pub position: usize,
    pub id: u64,
    pub label: String,
    pub enabled: bool,
    pub description: String,
}

impl RuleEntry {
    pub fn new(position: usize, rule: &RenameRule) -> Self {
        Self {
            position,
            id: rule.id().0,
            label: rule.display_label().to_string(),
            enabled: rule.enabled,
            description: rule.edit.describe(),
        }
    }
}

/// Result of a rules command
#[derive(Debug, Serialize, Deserialize)]
pub struct RulesResult {
    pub action: String,
    pub rules: Vec<RuleEntry>,
    /// Rule the action touched, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected: Option<u64>,
}

impl RulesResult {
    pub fn new(action: &str, pipeline: &RulePipeline, affected: Option<RuleId>) -> Self {
        Self {
            action: action.to_string(),
            rules: pipeline
                .rules()
                .iter()
                .enumerate()
                .map(|(position, rule)| RuleEntry::new(position, rule))
                .collect(),
            affected: affected.map(|id| id.0),
        }
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn write_failures(output: &mut String, failures: &[FailureEntry]) {
    for failure in failures {
        match &failure.item {
            Some(item) => writeln!(
                output,
                "✗ Element {} ({}): {}",
                failure.index, item, failure.error
            )
            .unwrap(),
            None => writeln!(output, "✗ Element {}: {}", failure.index, failure.error).unwrap(),
        }
    }
}

fn write_validation(output: &mut String, validation: &ValidationReport, skipped_empty: usize) {
    if validation.duplicates > 0 {
        writeln!(output, "! {} duplicate item(s) in the list", validation.duplicates).unwrap();
    }
    if skipped_empty > 0 {
        writeln!(output, "! Skipped {} empty entries", skipped_empty).unwrap();
    }
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.is_success(),
            "operation": "preview",
            "summary": {
                "items": self.previews.len(),
                "changed": self.changed,
                "warnings": self.warnings,
                "failed": self.failures.len(),
                "skipped_empty": self.skipped_empty,
                "duplicates": self.validation.duplicates,
            },
            "previews": self.previews,
            "failures": self.failures,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!(
            "Preview: {} items, {} would change",
            self.previews.len(),
            self.changed
        );
        if self.warnings > 0 {
            write!(output, ", {} warning(s)", self.warnings).unwrap();
        }
        output.push('\n');

        write_validation(&mut output, &self.validation, self.skipped_empty);
        write_failures(&mut output, &self.failures);

        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.is_success(),
            "operation": "apply",
            "summary": {
                "renamed": self.renamed.len(),
                "unchanged": self.unchanged,
                "failed": self.failures.len(),
                "skipped_empty": self.skipped_empty,
                "duplicates": self.validation.duplicates,
            },
            "renamed": self.renamed,
            "failures": self.failures,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        for item in &self.renamed {
            writeln!(output, "{} -> {}", item.original, item.renamed).unwrap();
        }

        writeln!(output, "✓ Renamed {} items", self.renamed.len()).unwrap();
        if self.unchanged > 0 {
            writeln!(output, "✓ {} items already had their new name", self.unchanged).unwrap();
        }

        write_validation(&mut output, &self.validation, self.skipped_empty);

        if !self.failures.is_empty() {
            writeln!(output, "✗ {} items failed", self.failures.len()).unwrap();
            write_failures(&mut output, &self.failures);
        }

        output
    }
}

impl OutputFormatter for RulesResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.rules.is_empty() {
            return "No rules configured\n".to_string();
        }

        let mut output = String::new();
        for entry in &self.rules {
            let marker = if Some(entry.id) == self.affected {
                "*"
            } else {
                " "
            };
            writeln!(
                output,
                "{}{:>2}. [{}] {:<7} {}",
                marker,
                entry.position,
                if entry.enabled { "x" } else { " " },
                entry.label,
                entry.description
            )
            .unwrap();
        }

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

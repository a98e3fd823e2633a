//! Output formatting and writing utilities
//!
//! Results are written in the format chosen with `--output`: human-readable
//! text, JSON, pretty JSON, or YAML. Progress indicators only appear on an
//! interactive terminal.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use ledgerline_schemas::{RecordKind, SchemaCategory, ValidationError};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, trace};

/// Outcome of `ledgerline validate`
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// File the records were read from
    pub file: String,
    /// Schema family the records were checked against
    pub kind: RecordKind,
    /// Number of records in the file
    pub records: usize,
    /// Whether every record passed
    pub valid: bool,
    /// Rejections and faults, with paths rooted at the record (`$[i]` for arrays)
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Number of errors that reject a record, as opposed to internal faults
    pub fn rejected(&self) -> usize {
        self.errors.iter().filter(|e| !e.is_internal_fault()).count()
    }

    /// First internal fault, if any
    pub fn fault(&self) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.is_internal_fault())
    }
}

/// One loaded schema, as listed by `ledgerline schemas check`
#[derive(Debug, Clone, Serialize)]
pub struct SchemaEntry {
    pub category: SchemaCategory,
    pub title: Option<String>,
    pub location: String,
}

/// Outcome of `ledgerline schemas check`
#[derive(Debug, Clone, Serialize)]
pub struct SchemaReport {
    /// Where the definitions were loaded from
    pub source: String,
    pub schemas: Vec<SchemaEntry>,
}

/// Trait for formatting output with specialized support for report types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the result of validating a file
    fn format_validation_report(&self, report: &ValidationReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Pretty JSON reads well enough for plain data
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_validation_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_errors_human(&report.errors)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && format == OutputFormat::Human && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            // No progress bars with custom writers
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write an error message
    ///
    /// Errors are shown even in quiet mode.
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if self.format == OutputFormat::Human {
            self.writeln(&formatted)
        } else {
            // Machine formats end with exactly one newline
            self.writeln(formatted.trim_end())
        }
    }

    /// Write the result of validating a file
    pub fn validation_report(&mut self, report: &ValidationReport) -> Result<()> {
        if self.format != OutputFormat::Human {
            let formatted = self.format.format_validation_report(report)?;
            return self.writeln(formatted.trim_end());
        }

        let noun = match report.kind {
            RecordKind::Transaction => "transaction",
            RecordKind::Vote => "vote",
        };

        if report.valid {
            return self.success(&format!(
                "✓ {} {} record(s) valid ({})",
                report.records, noun, report.file
            ));
        }

        self.error(&format!(
            "✗ {} of {} {} record(s) rejected ({})",
            report.rejected(),
            report.records,
            noun,
            report.file
        ))?;
        // Details stay visible in quiet mode; they are the point of the command
        let details = self.format.format_validation_report(report)?;
        self.writeln(details.trim_end())
    }

    /// Write the list of loaded schemas
    pub fn schema_report(&mut self, report: &SchemaReport) -> Result<()> {
        if self.format != OutputFormat::Human {
            return self.data(report);
        }

        self.success(&format!(
            "✓ {} schema(s) loaded from {}",
            report.schemas.len(),
            report.source
        ))?;
        self.section("Schemas")?;

        let rows = report
            .schemas
            .iter()
            .map(|entry| {
                vec![
                    entry.category.to_string(),
                    entry.title.clone().unwrap_or_default(),
                    entry.location.clone(),
                ]
            })
            .collect();
        self.table(&["CATEGORY", "TITLE", "LOCATION"], rows)
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => format!("{:width$}", cell, width = *width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

/// Spinner style used while schemas load
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Format validation errors for human reading
fn format_validation_errors_human(errors: &[ValidationError]) -> String {
    let mut output = String::new();

    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, format_validation_error_human(error)));
    }

    output
}

/// Format a single validation error for human reading
fn format_validation_error_human(error: &ValidationError) -> String {
    let mut output = String::new();

    match error {
        ValidationError::Schema(rejection) => {
            output.push_str(&format!("[{}] {}\n", rejection.category(), rejection.path()));
            output.push_str(&format!("   {}\n", rejection.message()));

            for violation in rejection.violations() {
                output.push_str(&format!(
                    "   • {}: {} (schema {})\n",
                    violation.instance_path, violation.message, violation.schema_path
                ));
            }
        }
        ValidationError::EngineDisagreement(fault) => {
            output.push_str(&format!("[{}] INTERNAL FAULT\n", fault.category));
            output.push_str(&format!("   {}\n", fault));
        }
    }

    output
}

//! Document export port.
//!
//! [`FileExporter`] writes the report to a temporary file next to the target and
//! renames it into place, so a failed export never leaves a partial document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};

use super::{BreakdownLine, breakdown_lines, render_text};
use crate::types::{ZakatError, ZakatReport};

pub const DEFAULT_REPORT_STEM: &str = "Zakat_Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }

    pub fn default_file_name(&self) -> String {
        format!("{}.{}", DEFAULT_REPORT_STEM, self.extension())
    }
}

/// Something that persists a finished report.
pub trait ReportExporter {
    /// Returns where the document was written.
    fn export(&self, report: &ZakatReport) -> Result<PathBuf, ZakatError>;
}

#[derive(Serialize)]
struct ExportedReport<'a> {
    title: &'static str,
    generated_at: DateTime<Utc>,
    lines: Vec<BreakdownLine>,
    report: &'a ZakatReport,
}

/// Renders the document body for the given format.
pub fn render(report: &ZakatReport, format: ExportFormat) -> Result<String, ZakatError> {
    match format {
        ExportFormat::Text => Ok(render_text(report)),
        ExportFormat::Json => {
            let doc = ExportedReport {
                title: super::REPORT_TITLE,
                generated_at: Utc::now(),
                lines: breakdown_lines(report),
                report,
            };
            serde_json::to_string_pretty(&doc).map_err(|e| ZakatError::Serialization(e.to_string()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileExporter {
    pub path: PathBuf,
    pub format: ExportFormat,
}

impl FileExporter {
    pub fn new(path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// `Zakat_Report.<ext>` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, format: ExportFormat) -> Self {
        Self::new(dir.as_ref().join(format.default_file_name()), format)
    }

    fn write_atomic(&self, contents: &[u8]) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Default for FileExporter {
    fn default() -> Self {
        Self::new(ExportFormat::Text.default_file_name(), ExportFormat::Text)
    }
}

impl ReportExporter for FileExporter {
    fn export(&self, report: &ZakatReport) -> Result<PathBuf, ZakatError> {
        let body = render(report, self.format)?;

        match self.write_atomic(body.as_bytes()) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), format = %self.format, "report exported");
                Ok(self.path.clone())
            }
            Err(source) => {
                tracing::warn!(path = %self.path.display(), error = %source, "report export failed");
                Err(ZakatError::Export {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_parsing_and_names() {
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::Text.to_string(), "text");
        assert_eq!(ExportFormat::Text.default_file_name(), "Zakat_Report.txt");
    }

    #[test]
    fn test_default_exporter_targets_working_dir() {
        let exporter = FileExporter::default();
        assert_eq!(exporter.path, PathBuf::from("Zakat_Report.txt"));
        assert_eq!(exporter.format, ExportFormat::Text);
    }
}

//! Output formatting for path results, records and history pages.
//!
//! Renderers return strings; the command handlers decide where they go.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use geopath_lib::{HistoryPage, PathRecord, PathResult, Point};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Pretty-printed JSON using the library's wire names.
    Json,
}

/// Renders values in the selected format.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
    palette: ColorPalette,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_palette(format, ColorPalette::detect())
    }

    pub fn with_palette(format: OutputFormat, palette: ColorPalette) -> Self {
        Self { format, palette }
    }

    pub fn result(&self, result: &PathResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(result),
            OutputFormat::Text => Ok(self.result_text(result)),
        }
    }

    pub fn batch(&self, results: &[PathResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&results),
            OutputFormat::Text => Ok(self.batch_text(results)),
        }
    }

    pub fn record(&self, record: &PathRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(record),
            OutputFormat::Text => Ok(self.record_text(record)),
        }
    }

    pub fn history(&self, page: &HistoryPage, page_number: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(page),
            OutputFormat::Text => Ok(self.history_text(page, page_number)),
        }
    }

    pub fn deleted(&self, id: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&serde_json::json!({ "deleted": id })),
            OutputFormat::Text => Ok(format!("Deleted path {id}")),
        }
    }

    fn result_text(&self, result: &PathResult) -> String {
        let p = self.palette;
        let mut out = format!(
            "Path {}{}{} ({} points; algorithm: {})\n",
            p.white_bold,
            result.id,
            p.reset,
            result.path.len(),
            result.metadata.algorithm,
        );
        self.push_points(&mut out, &result.path);
        let _ = writeln!(out, "\nTotal distance: {:.3} km", result.distance);
        let _ = write!(
            out,
            "{}Explored {} nodes in {} ms{}",
            p.gray, result.metadata.nodes_explored, result.duration_ms, p.reset
        );
        out
    }

    fn batch_text(&self, results: &[PathResult]) -> String {
        let p = self.palette;
        let failures = results.iter().filter(|r| r.is_failure()).count();
        let mut out = format!(
            "Batch of {} ({} succeeded, {} failed):",
            results.len(),
            results.len() - failures,
            failures
        );
        for (index, result) in results.iter().enumerate() {
            if let Some(error) = &result.metadata.error {
                let kind = result.metadata.error_kind.as_deref().unwrap_or("error");
                let _ = write!(
                    out,
                    "\n{:>3}. {}failed{} [{}] {}",
                    index + 1,
                    p.red,
                    p.reset,
                    kind,
                    error
                );
            } else {
                let _ = write!(
                    out,
                    "\n{:>3}. {}ok{} {} {:.3} km via {} ({} points)",
                    index + 1,
                    p.green,
                    p.reset,
                    result.id,
                    result.distance,
                    result.metadata.algorithm,
                    result.path.len()
                );
            }
        }
        out
    }

    fn record_text(&self, record: &PathRecord) -> String {
        let p = self.palette;
        let mut out = format!(
            "Path {}{}{} owned by {}{}\n",
            p.white_bold,
            record.id,
            p.reset,
            record.owner_id,
            if record.is_public { " (public)" } else { "" }
        );
        let _ = writeln!(
            out,
            "Created {}; algorithm: {}",
            record.created_at.to_rfc3339(),
            record.algorithm
        );
        self.push_points(&mut out, &record.path);
        let _ = write!(out, "\nTotal distance: {:.3} km", record.distance);
        out
    }

    fn history_text(&self, page: &HistoryPage, page_number: usize) -> String {
        let p = self.palette;
        if page.records.is_empty() {
            return format!("No stored paths on page {page_number} ({} total)", page.total);
        }
        let mut out = format!(
            "Page {page_number}: {} of {} stored paths",
            page.records.len(),
            page.total
        );
        for record in &page.records {
            let _ = write!(
                out,
                "\n{}{}{}  {:<8} {:>10.3} km  {}{}{}",
                p.white_bold,
                record.id,
                p.reset,
                record.algorithm.id(),
                record.distance,
                p.gray,
                record.created_at.format("%Y-%m-%d %H:%M:%S"),
                p.reset
            );
        }
        out
    }

    fn push_points(&self, out: &mut String, points: &[Point]) {
        let p = self.palette;
        let last = points.len().saturating_sub(1);
        for (index, point) in points.iter().enumerate() {
            let tag = match index {
                0 => "STRT",
                i if i == last => "GOAL",
                _ => "    ",
            };
            let _ = writeln!(
                out,
                " {tag} {}{:>10.5}, {:>11.5}{}",
                p.cyan, point.lat, point.lng, p.reset
            );
        }
        if out.ends_with('\n') {
            out.pop();
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

//! PDF report rendering.
//!
//! The renderer is the seam to the rendering collaborator: handlers only
//! depend on the trait, so tests can substitute a double and the
//! rendering backend can change without touching the API layer.

use anyhow::Result;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

use crate::records::{ReportRequest, TestRecord};

/// Renders stored data into PDF documents.
pub trait ReportRenderer: Send + Sync {
    /// Render a table of all records into a summary report.
    fn render_summary(&self, records: &[TestRecord]) -> Result<Vec<u8>>;

    /// Render a standalone one-record report.
    fn render_single(&self, report: &ReportRequest) -> Result<Vec<u8>>;
}

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;

/// Default renderer drawing directly with printpdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn render_summary(&self, records: &[TestRecord]) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            "Aerospace Test Report",
            Mm(PAGE_WIDTH_MM as _),
            Mm(PAGE_HEIGHT_MM as _),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow::anyhow!("adding builtin font: {e}"))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow::anyhow!("adding builtin font: {e}"))?;

        let mut layer_ref = doc.get_page(page).get_layer(layer);

        layer_ref.use_text("Aerospace Test Report", 18.0, Mm(68.0), Mm(280.0), &bold);

        // Header row.
        let columns = [
            (15.0, "ID"),
            (35.0, "Test Name"),
            (95.0, "Temperature"),
            (125.0, "Speed"),
            (150.0, "Altitude"),
            (180.0, "Status"),
        ];
        for (x, label) in columns {
            layer_ref.use_text(label, 11.0, Mm(x as _), Mm(268.0), &bold);
        }

        let mut y = 260.0;
        for record in records {
            if y < 20.0 {
                let (next_page, next_layer) = doc.add_page(
                    Mm(PAGE_WIDTH_MM as _),
                    Mm(PAGE_HEIGHT_MM as _),
                    "Layer 1",
                );
                layer_ref = doc.get_page(next_page).get_layer(next_layer);
                y = 280.0;
            }

            let status = if record.passed { "Passed" } else { "Failed" };
            let cells = [
                (15.0, record.id.to_string()),
                (35.0, record.test_name.clone()),
                (95.0, format!("{}", record.temperature)),
                (125.0, format!("{}", record.speed)),
                (150.0, format!("{}", record.altitude)),
                (180.0, status.to_string()),
            ];
            for (x, text) in cells {
                layer_ref.use_text(text, 10.0, Mm(x as _), Mm(y as _), &font);
            }
            y -= 8.0;
        }

        save_to_bytes(doc)
    }

    fn render_single(&self, report: &ReportRequest) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            "Test Report",
            Mm(PAGE_WIDTH_MM as _),
            Mm(PAGE_HEIGHT_MM as _),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow::anyhow!("adding builtin font: {e}"))?;

        let layer_ref = doc.get_page(page).get_layer(layer);

        let lines = [
            format!("Test Report: {}", report.test_name),
            format!("Temperature: {}\u{b0}C", report.temperature),
            format!("Speed: {} m/s", report.speed),
            format!("Altitude: {} m", report.altitude),
        ];
        let mut y = 265.0;
        for line in lines {
            layer_ref.use_text(line, 12.0, Mm(35.0), Mm(y as _), &font);
            y -= 7.0;
        }

        save_to_bytes(doc)
    }
}

fn save_to_bytes(doc: printpdf::PdfDocumentReference) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| anyhow::anyhow!("saving PDF: {e}"))?;
    }
    Ok(bytes)
}

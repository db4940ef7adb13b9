use unicode_normalization::UnicodeNormalization;

use crate::config::FormConfig;
use crate::datetime;
use crate::page::Page;

pub(crate) const ENGINE_MISSING_STATUS: &str =
    "PDF generator failed to load. Please refresh the page and try again.";
pub(crate) const GENERATED_STATUS: &str = "Your order PDF has been generated.";

const FOOTER_LINE: &str =
    "Email this document to the fabrication team to complete your request.";

// US letter, points.
const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 54.0;
const FOOTER_Y: f64 = 36.0;
const LINE_HEIGHT: f64 = 16.0;

/// Client-side document generator for the PDF revisions. The original
/// page depended on a CDN-loaded library that could fail to appear;
/// the controller therefore holds this engine as an optional slot and
/// surfaces a blocking status when it is absent.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DocumentEngine;

impl DocumentEngine {
    /// Render the order as a paginated US-letter document and name it
    /// after the customer and the generation date.
    pub(crate) fn render(
        &self,
        page: &Page,
        config: &FormConfig,
        now_ms: i64,
        drawn: bool,
    ) -> (String, Vec<u8>) {
        let filename = format!(
            "Custom3DOrder_{}_{}.pdf",
            sanitize_name(&page.full_name.value),
            datetime::format_compact_date(now_ms)
        );

        let mut writer = PdfWriter::new();
        writer.title("Custom 3D Print Order Request");
        writer.body_line(&format!(
            "Generated: {}",
            datetime::format_us_locale(now_ms)
        ));
        writer.gap();

        writer.heading("1. Customer Information");
        writer.labeled("Full Name", &page.full_name.value);
        writer.labeled("Email", &page.email.value);
        if config.phone_field && !page.phone.value.is_empty() {
            writer.labeled("Phone", &page.phone.value);
        }
        writer.gap();

        writer.heading("2. Order Details");
        writer.labeled_multiline("Item Description", &page.item_description.value);
        writer.labeled("Quantity", &page.quantity.value);
        writer.labeled("Preferred Colors", &page.selected_colors().join(", "));
        writer.gap();

        writer.heading("3. File / Image Instructions");
        match &page.upload.filename {
            Some(filename) => writer.labeled("Uploaded File", filename),
            None => writer.body_line("No file attached."),
        }
        let instructions = if page.instructions.value.is_empty() {
            "None"
        } else {
            page.instructions.value.as_str()
        };
        writer.labeled_multiline("Special Instructions", instructions);
        writer.gap();

        writer.heading("4. Terms & Signature");
        writer.labeled("Terms Accepted", "Yes");
        writer.labeled("Typed Signature", &page.typed_signature.value);
        if config.signature_pad {
            let noted = if drawn { "Provided" } else { "Not provided" };
            writer.labeled("Drawn Signature", noted);
        }
        writer.labeled("Agreement Timestamp", &page.agreement_timestamp);
        writer.labeled("Agreement Timestamp (ISO)", &page.agreement_timestamp_iso);

        (filename, writer.finish())
    }
}

/// Strip the customer name down to a filename-safe token: NFKD
/// normalize, drop combining marks, keep ASCII alphanumerics, squeeze
/// everything else into single underscores.
pub(crate) fn sanitize_name(name: &str) -> String {
    let mut out = String::new();
    let mut gap_pending = false;
    for ch in name.nfkd() {
        if ch.is_ascii_alphanumeric() {
            if gap_pending && !out.is_empty() {
                out.push('_');
            }
            gap_pending = false;
            out.push(ch);
        } else if !is_combining_mark(ch) {
            gap_pending = true;
        }
    }
    if out.is_empty() {
        "Customer".to_string()
    } else {
        out
    }
}

fn is_combining_mark(ch: char) -> bool {
    matches!(u32::from(ch), 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x20D0..=0x20FF)
}

/// Minimal multi-page PDF assembler: Helvetica text runs, one content
/// stream per page, offsets and xref computed at serialization.
struct PdfWriter {
    pages: Vec<String>,
    current: String,
    y: f64,
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: String::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn title(&mut self, text: &str) {
        self.ensure_room(2.0 * LINE_HEIGHT);
        self.y -= 6.0;
        self.text_run("F2", 18.0, MARGIN, self.y, text);
        self.y -= 1.5 * LINE_HEIGHT;
    }

    fn heading(&mut self, text: &str) {
        // Keep a heading attached to at least one following line.
        self.ensure_room(2.0 * LINE_HEIGHT);
        self.text_run("F2", 13.0, MARGIN, self.y, text);
        self.y -= LINE_HEIGHT;
    }

    fn body_line(&mut self, text: &str) {
        self.ensure_room(LINE_HEIGHT);
        self.text_run("F1", 11.0, MARGIN, self.y, text);
        self.y -= LINE_HEIGHT;
    }

    fn labeled(&mut self, label: &str, value: &str) {
        self.body_line(&format!("{label}: {value}"));
    }

    /// Multiline field values keep their line breaks; continuation
    /// lines are indented under the label and may spill onto the next
    /// page.
    fn labeled_multiline(&mut self, label: &str, value: &str) {
        let mut lines = value.lines();
        self.labeled(label, lines.next().unwrap_or_default());
        for line in lines {
            self.body_line(&format!("    {line}"));
        }
    }

    fn gap(&mut self) {
        self.y -= LINE_HEIGHT / 2.0;
    }

    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        let content = std::mem::take(&mut self.current);
        self.pages.push(content);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn text_run(&mut self, font: &str, size: f64, x: f64, y: f64, text: &str) {
        self.current.push_str(&format!(
            "BT /{font} {size:.0} Tf {x:.0} {y:.0} Td ({}) Tj ET\n",
            escape_pdf_text(text)
        ));
    }

    fn finish(mut self) -> Vec<u8> {
        self.break_page();

        // Footer instruction line on every page.
        let page_count = self.pages.len();
        for content in &mut self.pages {
            content.push_str(&format!(
                "BT /F1 10 Tf {MARGIN:.0} {FOOTER_Y:.0} Td ({}) Tj ET\n",
                escape_pdf_text(FOOTER_LINE)
            ));
        }

        // Fixed low object ids, then two objects per page.
        let mut objects: Vec<String> = Vec::with_capacity(4 + 2 * page_count);
        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", 5 + 2 * i))
            .collect();
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {page_count} /MediaBox [0 0 {PAGE_WIDTH:.0} {PAGE_HEIGHT:.0}] >>",
            kids.join(" ")
        ));
        objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());
        objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string());
        for (i, content) in self.pages.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                6 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}endstream",
                content.len()
            ));
        }

        assemble(&objects)
    }
}

fn escape_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            // Helvetica text runs carry Latin-1 only; anything wider
            // degrades to a placeholder.
            _ if (ch as u32) < 0x100 => out.push(ch),
            _ => out.push('?'),
        }
    }
    out
}

fn assemble(objects: &[String]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

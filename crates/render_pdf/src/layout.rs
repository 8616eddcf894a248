//! Page assembly primitives
//!
//! Thin helpers over printpdf: a cursor that walks down the page and starts
//! a new one when the content runs out of room, font loading with builtin
//! fallback, and text utilities shared by both layouts.

use std::fs::File;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocumentReference, PdfLayerReference, Point,
};
use tracing::warn;

use core_kernel::Money;

use crate::error::RenderError;
use crate::FontConfig;

/// Regular/bold font pair used throughout a document
pub(crate) struct FontSet {
    pub regular: IndirectFontRef,
    pub bold: IndirectFontRef,
}

/// Loads the configured TTF fonts, falling back to builtin Helvetica.
///
/// Asset problems are non-fatal: a missing or unreadable font file degrades
/// to the builtin pair with a warning. Note the builtin fonts only cover
/// WinAnsi glyphs, so Polish diacritics need the external fonts configured.
pub(crate) fn load_fonts(
    doc: &PdfDocumentReference,
    config: &FontConfig,
) -> Result<FontSet, RenderError> {
    let external = |path: &Path| -> Option<IndirectFontRef> {
        match File::open(path).map(|file| doc.add_external_font(file)) {
            Ok(Ok(font)) => Some(font),
            Ok(Err(error)) => {
                warn!(path = %path.display(), %error, "failed to embed font, using builtin");
                None
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "font file not readable, using builtin");
                None
            }
        }
    };

    let regular = config
        .regular
        .as_deref()
        .and_then(external)
        .map_or_else(
            || doc.add_builtin_font(BuiltinFont::Helvetica).map_err(RenderError::pdf),
            Ok,
        )?;
    let bold = config
        .bold
        .as_deref()
        .and_then(external)
        .map_or_else(
            || doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(RenderError::pdf),
            Ok,
        )?;

    Ok(FontSet { regular, bold })
}

/// A top-down cursor over the pages of a document
///
/// Coordinates are millimetres with the printpdf convention: the origin is
/// the bottom-left corner, so the cursor starts high and decreases.
pub(crate) struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    page_width: f32,
    page_height: f32,
    top_start: f32,
    margin_bottom: f32,
    y: f32,
}

impl<'a> PageWriter<'a> {
    pub fn new(
        doc: &'a PdfDocumentReference,
        layer: PdfLayerReference,
        page_width: f32,
        page_height: f32,
        top_start: f32,
        margin_bottom: f32,
    ) -> Self {
        Self {
            doc,
            layer,
            page_width,
            page_height,
            top_start,
            margin_bottom,
            y: top_start,
        }
    }

    /// Current vertical position
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Moves the cursor down
    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// Starts a new page if fewer than `needed` millimetres remain.
    ///
    /// Returns true when a page break happened.
    pub fn ensure_room(&mut self, needed: f32) -> bool {
        if self.y - needed >= self.margin_bottom {
            return false;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(self.page_width), Mm(self.page_height), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.top_start;
        true
    }

    /// Writes text at the cursor height
    pub fn text(&self, text: &str, font: &IndirectFontRef, size: f32, x: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    /// Writes text at an absolute position on the current page
    pub fn text_at(&self, text: &str, font: &IndirectFontRef, size: f32, x: f32, y: f32) {
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    /// Draws a horizontal rule at the cursor height
    pub fn rule(&self, x1: f32, x2: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.y)), false),
                (Point::new(Mm(x2), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    /// The layer of the current page
    pub fn layer(&self) -> &PdfLayerReference {
        &self.layer
    }
}

/// Formats an amount with its currency symbol, e.g. "$1234.56"
pub(crate) fn format_money(amount: Money) -> String {
    amount.to_string()
}

/// Formats an amount the Polish way, e.g. "1234.56 zł"
pub(crate) fn format_zloty(amount: Money) -> String {
    format!("{:.2} zł", amount.to_decimal())
}

/// Greedy word wrap for table cells.
///
/// Splits on whitespace; single words longer than the limit get a line of
/// their own rather than being broken mid-word.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

//! PDF Document Renderer
//!
//! Renders a priced invoice into a paginated PDF in one of two locale
//! templates:
//!
//! - **Generic/English**: letter page with header block, bill-to block,
//!   items table, and subtotal/tax/total rows.
//! - **Polish "Faktura"**: A4 page with an optional header-image banner,
//!   seller/buyer columns, a VAT items table, summary, and signature block.
//!
//! Rendering is a pure function of its inputs: the caller supplies the
//! invoice, the customer, the line items, and a [`RenderContext`] carrying
//! the locale, the seller profile, asset paths, and the generation
//! timestamp. No network calls, no persistence, no environment reads.
//! Missing assets degrade the layout instead of failing it.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_billing::{Invoice, InvoiceLineItem};
use domain_customer::Customer;

pub mod dates;
pub mod error;
pub mod labels;
pub mod seller;
pub mod units;

mod english;
mod layout;
mod polish;

pub use error::RenderError;
pub use seller::{BrandHeader, SellerProfile};
pub use units::{infer_unit, UnitOfMeasure};

/// The locale template to render with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Generic/English layout on a letter page
    Generic,
    /// Polish "Faktura" layout on an A4 page
    Polish,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "english" | "en" => Ok(Locale::Generic),
            "polish" | "pl" => Ok(Locale::Polish),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}

/// External font files to embed
///
/// The builtin Helvetica pair only covers WinAnsi glyphs; Polish diacritics
/// need an external TTF (e.g. DejaVu Sans). Missing files fall back to the
/// builtin fonts with a warning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontConfig {
    /// Regular weight TTF
    pub regular: Option<PathBuf>,
    /// Bold weight TTF
    pub bold: Option<PathBuf>,
}

/// Everything the renderer needs besides the invoice data itself
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Which locale template to use
    pub locale: Locale,
    /// The issuing business, passed explicitly at call time
    pub seller: SellerProfile,
    /// Optional header/background image for the Polish banner
    pub header_image: Option<PathBuf>,
    /// Optional external fonts
    pub fonts: FontConfig,
    /// Timestamp printed in the document footer
    pub generated_at: DateTime<Utc>,
}

/// Renders the invoice into PDF bytes
pub fn render_document(
    invoice: &Invoice,
    customer: &Customer,
    line_items: &[InvoiceLineItem],
    ctx: &RenderContext,
) -> Result<Vec<u8>, RenderError> {
    match ctx.locale {
        Locale::Generic => english::render(invoice, customer, line_items, ctx),
        Locale::Polish => polish::render(invoice, customer, line_items, ctx),
    }
}

/// Renders the invoice and writes the document to `path`.
///
/// Parent directories are created as needed.
pub fn render_to_file(
    path: &Path,
    invoice: &Invoice,
    customer: &Customer,
    line_items: &[InvoiceLineItem],
    ctx: &RenderContext,
) -> Result<(), RenderError> {
    let bytes = render_document(invoice, customer, line_items, ctx)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

//! Polish "Faktura" invoice layout
//!
//! A4 page with an optional full-width header image used as a top banner.
//! When no image is configured (or it cannot be read) the layout falls back
//! to a generated text banner from the seller's brand strings, or to the
//! plain layout when no brand is configured either. The items table carries
//! the VAT columns: net amount, VAT %, VAT amount, and gross per line, with
//! a unit-of-measure column inferred from the description.
//!
//! Per-line VAT is computed independently per row from the invoice's tax
//! rate; the RAZEM row sums the per-line values.

use std::path::Path;

use printpdf::image_crate::io::Reader as ImageReader;
use printpdf::image_crate::GenericImageView;
use printpdf::{Color, Image, ImageTransform, Mm, PdfDocument, PdfLayerReference, Rgb};
use tracing::warn;

use core_kernel::Money;
use domain_billing::{Invoice, InvoiceLineItem};
use domain_customer::Customer;

use crate::dates::{polish_long_date, polish_timestamp};
use crate::error::RenderError;
use crate::labels::PolishLabels;
use crate::layout::{format_zloty, load_fonts, wrap_text, FontSet, PageWriter};
use crate::units::infer_unit;
use crate::RenderContext;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const RIGHT_EDGE: f32 = PAGE_WIDTH - MARGIN;
const BANNER_HEIGHT: f32 = 40.0;
const RIGHT_COLUMN: f32 = 110.0;

// Items table column positions
const X_LP: f32 = MARGIN;
const X_DESC: f32 = 28.0;
const X_QTY: f32 = 92.0;
const X_UNIT: f32 = 104.0;
const X_NET: f32 = 118.0;
const X_VAT_RATE: f32 = 140.0;
const X_VAT_AMOUNT: f32 = 152.0;
const X_GROSS: f32 = 172.0;
const DESC_WRAP: usize = 38;

const BRAND_ORANGE: (f32, f32, f32) = (1.0, 0.42, 0.21);
const GREY: (f32, f32, f32) = (0.5, 0.5, 0.5);

fn fill_color(layer: &PdfLayerReference, (r, g, b): (f32, f32, f32)) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

/// Draws the configured header image as a full-width top banner.
///
/// Returns false (and logs) when the image cannot be read or decoded, so
/// the caller can fall back to the text banner.
fn draw_header_image(layer: &PdfLayerReference, path: &Path) -> bool {
    let reader = match ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => reader,
        Err(error) => {
            warn!(path = %path.display(), %error, "header image not readable, using text banner");
            return false;
        }
    };
    let dynamic = match reader.decode() {
        Ok(image) => image,
        Err(error) => {
            warn!(path = %path.display(), %error, "header image not decodable, using text banner");
            return false;
        }
    };

    let (px_w, px_h) = dynamic.dimensions();
    if px_w == 0 || px_h == 0 {
        warn!(path = %path.display(), "header image has zero dimension, using text banner");
        return false;
    }

    // Stretch to full page width and the fixed banner height.
    const DPI: f32 = 300.0;
    let natural_w = px_w as f32 * 25.4 / DPI;
    let natural_h = px_h as f32 * 25.4 / DPI;

    let image = Image::from_dynamic_image(&dynamic);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(PAGE_HEIGHT - BANNER_HEIGHT)),
            scale_x: Some(PAGE_WIDTH / natural_w),
            scale_y: Some(BANNER_HEIGHT / natural_h),
            dpi: Some(DPI),
            ..Default::default()
        },
    );
    true
}

/// One line of the seller/buyer two-column block
struct BlockLine {
    text: String,
    bold: bool,
}

fn block_line(text: impl Into<String>, bold: bool) -> BlockLine {
    BlockLine {
        text: text.into(),
        bold,
    }
}

fn seller_block(ctx: &RenderContext, labels: &PolishLabels) -> Vec<BlockLine> {
    let seller = &ctx.seller;
    let mut lines = vec![
        block_line(labels.seller, true),
        block_line(&seller.name, true),
    ];
    if let Some(business_type) = &seller.business_type {
        lines.push(block_line(business_type, true));
    }
    lines.push(block_line(format!("{}, {}", seller.city, seller.address), false));
    lines.push(block_line(format!("{} {}", labels.nip, seller.tax_id), false));
    if let Some(regon) = &seller.regon {
        lines.push(block_line(format!("{} {}", labels.regon, regon), false));
    }
    if let (Some(bank_name), Some(account)) = (&seller.bank_name, &seller.bank_account) {
        lines.push(block_line(
            format!("{} {} {} {}", labels.bank, bank_name, labels.bank_account_no, account),
            false,
        ));
    }
    if let Some(phone) = &seller.phone {
        lines.push(block_line(format!("{} {}", labels.phone, phone), false));
    }
    if let Some(email) = &seller.email {
        lines.push(block_line(format!("{} {}", labels.email, email), false));
    }
    lines
}

fn buyer_block(customer: &Customer, labels: &PolishLabels) -> Vec<BlockLine> {
    let mut lines = vec![
        block_line(labels.buyer, true),
        block_line(&customer.name, true),
    ];
    if let Some(contact) = &customer.contact_person {
        lines.push(block_line(contact, false));
    }
    let address = customer.formatted_address();
    if !address.is_empty() {
        lines.push(block_line(address, false));
    }
    lines.push(block_line(
        format!(
            "{} {}",
            labels.nip,
            customer.tax_id.as_deref().unwrap_or(labels.not_provided)
        ),
        false,
    ));
    if let Some(phone) = &customer.phone {
        lines.push(block_line(format!("{} {}", labels.phone, phone), false));
    }
    if let Some(email) = &customer.email {
        lines.push(block_line(format!("{} {}", labels.email, email), false));
    }
    lines
}

fn write_block(page: &PageWriter<'_>, fonts: &FontSet, lines: &[BlockLine], x: f32, top: f32) {
    let mut y = top;
    for line in lines {
        let font = if line.bold { &fonts.bold } else { &fonts.regular };
        page.text_at(&line.text, font, 10.0, x, y);
        y -= 5.0;
    }
}

pub(crate) fn render(
    invoice: &Invoice,
    customer: &Customer,
    line_items: &[InvoiceLineItem],
    ctx: &RenderContext,
) -> Result<Vec<u8>, RenderError> {
    let labels = PolishLabels::new();

    let (doc, page_idx, layer_idx) = PdfDocument::new(
        labels.title,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let layer = doc.get_page(page_idx).get_layer(layer_idx);
    let fonts = load_fonts(&doc, &ctx.fonts)?;

    let has_banner = ctx
        .header_image
        .as_deref()
        .map(|path| draw_header_image(&layer, path))
        .unwrap_or(false);

    let top_start = if has_banner {
        PAGE_HEIGHT - BANNER_HEIGHT - 10.0
    } else {
        PAGE_HEIGHT - MARGIN
    };

    let mut page = PageWriter::new(&doc, layer, PAGE_WIDTH, PAGE_HEIGHT, top_start, MARGIN);

    // Generated text banner when no image is available
    if !has_banner {
        if let Some(brand) = &ctx.seller.brand {
            fill_color(page.layer(), BRAND_ORANGE);
            page.text(&brand.title, &fonts.bold, 24.0, 150.0);
            page.advance(9.0);
            page.text(&brand.subtitle, &fonts.regular, 14.0, 150.0);
            page.advance(8.0);
            fill_color(page.layer(), GREY);
            page.text(&brand.description, &fonts.regular, 8.0, MARGIN);
            page.advance(12.0);
            fill_color(page.layer(), (0.0, 0.0, 0.0));
        }
    }

    // Title
    page.text(labels.title, &fonts.bold, 20.0, 90.0);
    page.advance(12.0);

    // Invoice number and issue date, right-aligned block
    let number_line = format!(
        "{} {}/{}",
        labels.vat_invoice_no, invoice.invoice_number, labels.original
    );
    page.text(&number_line, &fonts.bold, 12.0, RIGHT_COLUMN);
    page.advance(6.0);
    page.text(
        &polish_long_date(invoice.invoice_date),
        &fonts.bold,
        12.0,
        RIGHT_COLUMN,
    );
    page.advance(12.0);

    // Seller and buyer two-column block
    let seller_lines = seller_block(ctx, &labels);
    let buyer_lines = buyer_block(customer, &labels);
    write_block(&page, &fonts, &seller_lines, MARGIN, page.y());
    write_block(&page, &fonts, &buyer_lines, RIGHT_COLUMN, page.y());
    let block_height = 5.0 * seller_lines.len().max(buyer_lines.len()) as f32;
    page.advance(block_height + 8.0);

    // Items table
    page.text(labels.items_header, &fonts.bold, 12.0, MARGIN);
    page.advance(8.0);

    page.text(labels.th_item_no, &fonts.bold, 8.0, X_LP);
    page.text(labels.th_description, &fonts.bold, 8.0, X_DESC);
    page.text(labels.th_quantity, &fonts.bold, 8.0, X_QTY);
    page.text(labels.th_unit, &fonts.bold, 8.0, X_UNIT);
    page.text(labels.th_net_price, &fonts.bold, 8.0, X_NET);
    page.text(labels.th_vat_rate, &fonts.bold, 8.0, X_VAT_RATE);
    page.text(labels.th_vat_amount, &fonts.bold, 8.0, X_VAT_AMOUNT);
    page.text(labels.th_gross_amount, &fonts.bold, 8.0, X_GROSS);
    page.advance(2.0);
    page.rule(MARGIN, RIGHT_EDGE);
    page.advance(5.0);

    let vat_rate_display = format!("{:.0}%", invoice.tax_rate.as_percentage());

    let mut net_total = Money::zero(invoice.currency);
    let mut vat_total = Money::zero(invoice.currency);
    let mut gross_total = Money::zero(invoice.currency);

    for (index, item) in line_items.iter().enumerate() {
        // VAT computed independently per row from the invoice's single rate
        let net = item.total_amount;
        let vat = invoice.tax_rate.apply(net)?;
        let gross = net.checked_add(&vat)?;

        net_total = net_total.checked_add(&net)?;
        vat_total = vat_total.checked_add(&vat)?;
        gross_total = gross_total.checked_add(&gross)?;

        let desc_lines = wrap_text(&item.description, DESC_WRAP);
        let row_height = 5.0 * desc_lines.len() as f32;
        page.ensure_room(row_height + 4.0);

        for (i, line) in desc_lines.iter().enumerate() {
            if i == 0 {
                page.text(&format!("{}", index + 1), &fonts.regular, 8.0, X_LP);
                page.text(&format!("{:.2}", item.quantity), &fonts.regular, 8.0, X_QTY);
                page.text(
                    infer_unit(&item.description).polish_abbrev(),
                    &fonts.regular,
                    8.0,
                    X_UNIT,
                );
                page.text(&format_zloty(net), &fonts.regular, 8.0, X_NET);
                page.text(&vat_rate_display, &fonts.regular, 8.0, X_VAT_RATE);
                page.text(&format_zloty(vat), &fonts.regular, 8.0, X_VAT_AMOUNT);
                page.text(&format_zloty(gross), &fonts.regular, 8.0, X_GROSS);
            }
            page.text(line, &fonts.regular, 8.0, X_DESC);
            page.advance(5.0);
        }
    }

    page.advance(1.0);
    page.rule(MARGIN, RIGHT_EDGE);
    page.advance(6.0);

    // RAZEM row: sums of the per-line values
    page.ensure_room(12.0);
    page.text(labels.total_row, &fonts.bold, 9.0, X_DESC);
    page.text(&format_zloty(net_total), &fonts.bold, 9.0, X_NET);
    page.text(&format_zloty(vat_total), &fonts.bold, 9.0, X_VAT_AMOUNT);
    page.text(&format_zloty(gross_total), &fonts.bold, 9.0, X_GROSS);
    page.advance(12.0);

    // Details block
    let due_date_display = invoice
        .due_date
        .map(polish_long_date)
        .unwrap_or_else(|| labels.not_specified.to_string());
    let mut details = vec![
        (labels.sale_date, polish_long_date(invoice.invoice_date)),
        (labels.payment_method, labels.payment_method_transfer.to_string()),
        (labels.payment_deadline, due_date_display),
    ];
    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        details.push((labels.notes, notes.to_string()));
    }

    page.ensure_room(6.0 * details.len() as f32 + 6.0);
    for (label, value) in &details {
        page.text(label, &fonts.bold, 10.0, MARGIN);
        page.text(value, &fonts.regular, 10.0, 62.0);
        page.advance(6.0);
    }
    page.advance(6.0);

    // Summary block
    page.ensure_room(26.0);
    page.text(labels.summary, &fonts.bold, 11.0, MARGIN);
    page.advance(6.0);
    page.text(
        &format!("{} {}", labels.net_value, format_zloty(net_total)),
        &fonts.regular,
        10.0,
        MARGIN,
    );
    page.advance(5.0);
    page.text(
        &format!("{} {}", labels.vat_value, format_zloty(vat_total)),
        &fonts.regular,
        10.0,
        MARGIN,
    );
    page.advance(5.0);
    page.text(
        &format!("{} {}", labels.to_pay, format_zloty(gross_total)),
        &fonts.bold,
        11.0,
        MARGIN,
    );
    page.advance(14.0);

    // Simplified signature block
    page.ensure_room(24.0);
    page.text(labels.no_recipient_signature, &fonts.regular, 9.0, MARGIN);
    page.text(labels.issuer_signature, &fonts.regular, 9.0, RIGHT_COLUMN);
    page.advance(15.0);
    page.text(&ctx.seller.name, &fonts.regular, 9.0, RIGHT_COLUMN + 10.0);

    // Footer with localized generation timestamp
    let footer = format!("{} {}", labels.generated_on, polish_timestamp(ctx.generated_at));
    page.text_at(&footer, &fonts.regular, 9.0, 138.0, 12.0);
    drop(page);

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(RenderError::pdf)?;
    writer
        .into_inner()
        .map_err(|e| RenderError::pdf(e.to_string()))
}

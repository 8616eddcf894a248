//! Generic/English invoice layout
//!
//! Letter-sized page: title, header block (number, dates, status), bill-to
//! block, line-item table, subtotal/tax/total rows, optional notes and
//! terms, and a generation-timestamp footer.

use printpdf::{Mm, PdfDocument};

use domain_billing::{Invoice, InvoiceLineItem, InvoiceStatus};
use domain_customer::Customer;

use crate::dates::{iso_date, iso_timestamp};
use crate::error::RenderError;
use crate::labels::EnglishLabels;
use crate::layout::{format_money, load_fonts, wrap_text, PageWriter};
use crate::RenderContext;

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 25.4;
const RIGHT_EDGE: f32 = PAGE_WIDTH - MARGIN;

// Table column positions
const X_DESC: f32 = MARGIN;
const X_QTY: f32 = 120.0;
const X_RATE: f32 = 145.0;
const X_AMOUNT: f32 = 172.0;
const DESC_WRAP: usize = 52;

fn status_label(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Draft => "Draft",
        InvoiceStatus::Sent => "Sent",
        InvoiceStatus::Paid => "Paid",
        InvoiceStatus::Cancelled => "Cancelled",
    }
}

pub(crate) fn render(
    invoice: &Invoice,
    customer: &Customer,
    line_items: &[InvoiceLineItem],
    ctx: &RenderContext,
) -> Result<Vec<u8>, RenderError> {
    let labels = EnglishLabels::new();

    let (doc, page, layer) = PdfDocument::new(
        labels.title,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let layer = doc.get_page(page).get_layer(layer);
    let fonts = load_fonts(&doc, &ctx.fonts)?;

    let mut page = PageWriter::new(
        &doc,
        layer,
        PAGE_WIDTH,
        PAGE_HEIGHT,
        PAGE_HEIGHT - MARGIN,
        MARGIN * 0.75,
    );

    // Title
    page.text(labels.title, &fonts.bold, 24.0, 88.0);
    page.advance(14.0);

    // Header block: label column right-ish of the left margin, values beside
    let header_rows = [
        (labels.invoice_number, invoice.invoice_number.clone()),
        (labels.invoice_date, iso_date(invoice.invoice_date)),
        (
            labels.due_date,
            invoice
                .due_date
                .map(iso_date)
                .unwrap_or_else(|| labels.not_applicable.to_string()),
        ),
        (labels.status, status_label(invoice.status).to_string()),
    ];
    for (label, value) in header_rows {
        page.text(label, &fonts.bold, 10.0, MARGIN);
        page.text(&value, &fonts.regular, 10.0, MARGIN + 40.0);
        page.advance(6.0);
    }
    page.advance(8.0);

    // Bill To block
    page.text(labels.bill_to, &fonts.bold, 13.0, MARGIN);
    page.advance(7.0);
    page.text(&customer.name, &fonts.bold, 10.0, MARGIN);
    page.advance(5.0);
    for line in [
        customer.contact_person.as_deref(),
        customer.email.as_deref(),
        customer.phone.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        page.text(line, &fonts.regular, 10.0, MARGIN);
        page.advance(5.0);
    }
    let address = customer.formatted_address();
    if !address.is_empty() {
        page.text(&address, &fonts.regular, 10.0, MARGIN);
        page.advance(5.0);
    }
    page.advance(8.0);

    // Items table
    page.text(labels.items_header, &fonts.bold, 13.0, MARGIN);
    page.advance(7.0);

    page.text(labels.th_description, &fonts.bold, 10.0, X_DESC);
    page.text(labels.th_quantity, &fonts.bold, 10.0, X_QTY);
    page.text(labels.th_rate, &fonts.bold, 10.0, X_RATE);
    page.text(labels.th_amount, &fonts.bold, 10.0, X_AMOUNT);
    page.advance(2.0);
    page.rule(MARGIN, RIGHT_EDGE);
    page.advance(6.0);

    for item in line_items {
        let desc_lines = wrap_text(&item.description, DESC_WRAP);
        let row_height = 6.0 * desc_lines.len() as f32;
        page.ensure_room(row_height + 4.0);

        for (i, line) in desc_lines.iter().enumerate() {
            if i == 0 {
                page.text(&format!("{:.2}", item.quantity), &fonts.regular, 10.0, X_QTY);
                page.text(&format_money(item.unit_price), &fonts.regular, 10.0, X_RATE);
                page.text(&format_money(item.total_amount), &fonts.regular, 10.0, X_AMOUNT);
            }
            page.text(line, &fonts.regular, 10.0, X_DESC);
            page.advance(6.0);
        }
    }

    page.advance(1.0);
    page.rule(MARGIN, RIGHT_EDGE);
    page.advance(7.0);

    // Totals block
    page.ensure_room(30.0);
    page.text(labels.subtotal, &fonts.bold, 10.0, X_RATE);
    page.text(&format_money(invoice.subtotal), &fonts.bold, 10.0, X_AMOUNT);
    page.advance(6.0);

    if invoice.tax_amount.is_positive() {
        let tax_label = format!("{} ({}):", labels.tax, invoice.tax_rate);
        page.text(&tax_label, &fonts.bold, 10.0, X_RATE);
        page.text(&format_money(invoice.tax_amount), &fonts.bold, 10.0, X_AMOUNT);
        page.advance(6.0);
    }

    page.text(labels.total, &fonts.bold, 11.0, X_RATE);
    page.text(&format_money(invoice.total_amount), &fonts.bold, 11.0, X_AMOUNT);
    page.advance(12.0);

    // Notes and terms
    for (heading, body) in [
        (labels.notes, invoice.notes.as_deref()),
        (labels.terms, invoice.terms.as_deref()),
    ] {
        let Some(body) = body else { continue };
        let lines: Vec<String> = body
            .lines()
            .flat_map(|l| wrap_text(l, 90))
            .collect();
        page.ensure_room(8.0 + 5.0 * lines.len() as f32);
        page.text(heading, &fonts.bold, 12.0, MARGIN);
        page.advance(6.0);
        for line in &lines {
            page.text(line, &fonts.regular, 10.0, MARGIN);
            page.advance(5.0);
        }
        page.advance(6.0);
    }

    // Footer with generation timestamp, bottom right of the last page
    let footer = format!("{} {}", labels.generated_on, iso_timestamp(ctx.generated_at));
    page.text_at(&footer, &fonts.regular, 9.0, X_RATE - 10.0, 12.0);
    drop(page);

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(RenderError::pdf)?;
    writer
        .into_inner()
        .map_err(|e| RenderError::pdf(e.to_string()))
}

//! Document labels per locale template
//!
//! The two templates differ structurally (the Polish layout carries VAT
//! columns and a signature block the generic one does not have), so each
//! keeps its own label set instead of sharing one translation table.

/// Labels for the generic/English layout
pub struct EnglishLabels {
    pub title: &'static str,
    pub invoice_number: &'static str,
    pub invoice_date: &'static str,
    pub due_date: &'static str,
    pub status: &'static str,
    pub bill_to: &'static str,
    pub items_header: &'static str,
    pub th_description: &'static str,
    pub th_quantity: &'static str,
    pub th_rate: &'static str,
    pub th_amount: &'static str,
    pub subtotal: &'static str,
    pub tax: &'static str,
    pub total: &'static str,
    pub notes: &'static str,
    pub terms: &'static str,
    pub generated_on: &'static str,
    pub not_applicable: &'static str,
}

impl EnglishLabels {
    pub fn new() -> Self {
        Self {
            title: "INVOICE",
            invoice_number: "Invoice Number:",
            invoice_date: "Invoice Date:",
            due_date: "Due Date:",
            status: "Status:",
            bill_to: "Bill To:",
            items_header: "Invoice Items:",
            th_description: "Description",
            th_quantity: "Quantity",
            th_rate: "Rate",
            th_amount: "Amount",
            subtotal: "Subtotal:",
            tax: "Tax",
            total: "Total:",
            notes: "Notes:",
            terms: "Terms:",
            generated_on: "Generated on",
            not_applicable: "N/A",
        }
    }
}

impl Default for EnglishLabels {
    fn default() -> Self {
        Self::new()
    }
}

/// Labels for the Polish "Faktura" layout
pub struct PolishLabels {
    pub title: &'static str,
    pub vat_invoice_no: &'static str,
    pub original: &'static str,
    pub seller: &'static str,
    pub buyer: &'static str,
    pub items_header: &'static str,
    pub th_item_no: &'static str,
    pub th_description: &'static str,
    pub th_quantity: &'static str,
    pub th_unit: &'static str,
    pub th_net_price: &'static str,
    pub th_vat_rate: &'static str,
    pub th_vat_amount: &'static str,
    pub th_gross_amount: &'static str,
    pub total_row: &'static str,
    pub sale_date: &'static str,
    pub payment_method: &'static str,
    pub payment_method_transfer: &'static str,
    pub payment_deadline: &'static str,
    pub notes: &'static str,
    pub summary: &'static str,
    pub net_value: &'static str,
    pub vat_value: &'static str,
    pub to_pay: &'static str,
    pub no_recipient_signature: &'static str,
    pub issuer_signature: &'static str,
    pub generated_on: &'static str,
    pub nip: &'static str,
    pub regon: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub bank: &'static str,
    pub bank_account_no: &'static str,
    pub not_specified: &'static str,
    pub not_provided: &'static str,
}

impl PolishLabels {
    pub fn new() -> Self {
        Self {
            title: "FAKTURA",
            vat_invoice_no: "Faktura VAT nr",
            original: "oryginał",
            seller: "Sprzedawca:",
            buyer: "Nabywca:",
            items_header: "POZYCJE FAKTURY:",
            th_item_no: "Lp.",
            th_description: "Nazwa towaru/usługi",
            th_quantity: "Ilość",
            th_unit: "J.m.",
            th_net_price: "Cena netto",
            th_vat_rate: "VAT %",
            th_vat_amount: "Kwota VAT",
            th_gross_amount: "Wartość brutto",
            total_row: "RAZEM:",
            sale_date: "Data sprzedaży:",
            payment_method: "Sposób zapłaty:",
            payment_method_transfer: "Przelew",
            payment_deadline: "Termin płatności:",
            notes: "Uwagi:",
            summary: "PODSUMOWANIE:",
            net_value: "Wartość netto:",
            vat_value: "VAT:",
            to_pay: "Do zapłaty:",
            no_recipient_signature: "Faktura bez podpisu odbiorcy",
            issuer_signature: "Osoba upoważniona do wystawienia faktury VAT",
            generated_on: "Faktura wygenerowana:",
            nip: "NIP:",
            regon: "REGON:",
            phone: "Tel:",
            email: "Email:",
            bank: "Bank:",
            bank_account_no: "Nr rachunku:",
            not_specified: "Nie określono",
            not_provided: "Nie podano",
        }
    }
}

impl Default for PolishLabels {
    fn default() -> Self {
        Self::new()
    }
}

//! Seller configuration
//!
//! The seller (the business issuing the invoice) is an explicit value passed
//! to the renderer at call time. The renderer never reads environment
//! variables or global state; configuration assembly happens in the caller.

use serde::{Deserialize, Serialize};

/// Brand strings for the generated text banner
///
/// Used by the Polish layout when no header image is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandHeader {
    /// Large banner title (e.g. the brand name)
    pub title: String,
    /// Banner subtitle
    pub subtitle: String,
    /// Small descriptive line
    pub description: String,
}

/// The issuing business, as printed on documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerProfile {
    /// Legal name
    pub name: String,
    /// Business type / activity line, printed under the name
    pub business_type: Option<String>,
    /// Street address
    pub address: String,
    /// Postal code and city (e.g. "02-691 Warszawa")
    pub city: String,
    /// Tax identifier (NIP / EIN / VAT ID)
    pub tax_id: String,
    /// Statistical business number, where applicable
    pub regon: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Bank name
    pub bank_name: Option<String>,
    /// Bank account number
    pub bank_account: Option<String>,
    /// Brand strings for the text banner
    pub brand: Option<BrandHeader>,
}

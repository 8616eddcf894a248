//! Application configuration
//!
//! Loaded from an optional `timebill.toml` file and `TIMEBILL_`-prefixed
//! environment variables (nested keys use `__`, e.g.
//! `TIMEBILL_SELLER__NAME`). Every field has a default so the binary runs
//! with no configuration at all. The seller profile assembled here is
//! passed explicitly to the renderer; nothing downstream reads the
//! environment.

use std::path::PathBuf;

use serde::Deserialize;

use render_pdf::SellerProfile;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database URL
    pub database_url: String,
    /// Directory generated documents are written into
    pub invoices_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Default tax rate, percent with two-decimal precision
    pub default_tax_rate_percent: f64,
    /// Default payment term, days after the issue date
    pub default_due_days: u64,
    /// Optional document assets
    pub assets: AssetConfig,
    /// The issuing business printed on documents
    pub seller: SellerProfile,
}

/// Optional document assets
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Header/background image for the Polish banner
    pub header_image: Option<PathBuf>,
    /// Regular-weight TTF with full diacritic coverage
    pub font_regular: Option<PathBuf>,
    /// Bold-weight TTF with full diacritic coverage
    pub font_bold: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/invoicing.db".to_string(),
            invoices_dir: PathBuf::from("invoices"),
            log_level: "info".to_string(),
            default_tax_rate_percent: 0.0,
            default_due_days: 30,
            assets: AssetConfig::default(),
            seller: default_seller(),
        }
    }
}

fn default_seller() -> SellerProfile {
    SellerProfile {
        name: "Your Business Name".to_string(),
        business_type: None,
        address: "123 Business Street, Suite 100".to_string(),
        city: "Your City".to_string(),
        tax_id: "12-3456789".to_string(),
        regon: None,
        phone: None,
        email: None,
        bank_name: None,
        bank_account: None,
        brand: None,
    }
}

impl AppConfig {
    /// Loads configuration from the optional file and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("timebill").required(false))
            .add_source(config::Environment::with_prefix("TIMEBILL").separator("__"))
            .build()?
            .try_deserialize()
    }
}

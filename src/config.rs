use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::TransactionKind;

/// Column headers and transaction vocabulary of the export being read.
/// Defaults describe the Nordnet transaction export (Norwegian locale).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub columns: Columns,
    pub purchase_types: Vec<String>,
    pub sale_types: Vec<String>,
    /// chrono format strings, tried in order.
    pub date_formats: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Columns {
    pub transaction_type: String,
    pub security_name: String,
    pub isin: String,
    pub quantity: String,
    pub amount: String,
    pub currency: String,
    pub trade_date: String,
    /// Quoted price per share. Only traced next to the derived price;
    /// unit prices always come from amount / quantity.
    pub unit_price: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: Columns::default(),
            purchase_types: vec!["KJØPT".to_string(), "KJØP, BYTTE AV FOND".to_string()],
            sale_types: vec!["SALG".to_string(), "SALG, BYTTE AV FOND".to_string()],
            date_formats: vec!["%Y-%m-%d".to_string(), "%d.%m.%Y".to_string()],
        }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            transaction_type: "Transaksjonstype".to_string(),
            security_name: "Verdipapir".to_string(),
            isin: "ISIN".to_string(),
            quantity: "Antall".to_string(),
            amount: "Beløp".to_string(),
            currency: "Valuta".to_string(),
            trade_date: "Handelsdag".to_string(),
            unit_price: "Kurs".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at path: {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Exact, case-sensitive match against the configured vocabulary.
    pub fn classify(&self, transaction_type: &str) -> TransactionKind {
        if self.purchase_types.iter().any(|t| t == transaction_type) {
            TransactionKind::Purchase
        } else if self.sale_types.iter().any(|t| t == transaction_type) {
            TransactionKind::Sale
        } else {
            TransactionKind::Ignored
        }
    }
}

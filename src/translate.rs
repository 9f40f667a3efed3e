use std::collections::HashMap;

/// Canonical column names that the rest of the pipeline keys its behaviour on.
pub mod column {
    pub const CURRENCY: &str = "Currency";
    pub const LOCATION: &str = "Location";
    pub const CARDHOLDER: &str = "Cardholder";
    pub const INVOICE_AMOUNT: &str = "Invoice Amount";
    pub const DETAILS: &str = "Details";
    pub const TRANSACTION_AMOUNT: &str = "Transaction Amount";
    pub const SOURCE_FILE: &str = "Source File";
    pub const DATE: &str = "Date";
    pub const PURCHASE_DATE: &str = "Purchase Date";
    pub const POSTING_DATE: &str = "Posting Date";
}

/// A lookup from localized header names to canonical column names.
///
/// The default is the table matching the Swedish exports of the expense tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    map: HashMap<String, String>,
}

impl Translations {
    /// Create a table from `(localized, canonical)` pairs. Later pairs win over earlier ones.
    pub fn new<L, C>(pairs: impl IntoIterator<Item = (L, C)>) -> Self
    where
        L: Into<String>,
        C: Into<String>,
    {
        Translations {
            map: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    /// Return the canonical name for `name`, or `name` itself if it isn't in the table.
    pub fn translate<'a>(&'a self, name: &'a str) -> &'a str {
        self.map.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Translations {
    fn default() -> Self {
        Translations::new([
            ("Valuta", column::CURRENCY),
            ("Plats", column::LOCATION),
            ("Kortinnehavare", column::CARDHOLDER),
            ("Fakturabelopp", column::INVOICE_AMOUNT),
            ("Detaljer", column::DETAILS),
            ("Transaktionsbelopp", column::TRANSACTION_AMOUNT),
            ("Source File", column::SOURCE_FILE),
            ("Datum", column::DATE),
            ("Köpdatum", column::PURCHASE_DATE),
            ("Bokföringsdatum", column::POSTING_DATE),
        ])
    }
}

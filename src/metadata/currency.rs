//! `currency` table reads: numeric-to-alphabetic currency code lookup for
//! the `source_currency_code_alphabetic` derived attribute.

use crate::errors::AppResult;
use crate::metadata::MetadataStore;
use std::collections::HashMap;

pub struct CurrencyTable {
    alpha_by_numeric: HashMap<String, String>,
}

impl CurrencyTable {
    pub fn alphabetic_of(&self, numeric_code: &str) -> Option<&str> {
        self.alpha_by_numeric.get(numeric_code).map(|s| s.as_str())
    }
}

impl MetadataStore {
    pub fn read_currency_table(&self) -> AppResult<CurrencyTable> {
        let conn = self.connection();
        let mut stmt =
            conn.prepare("SELECT currency_numeric_code, currency_alphabetic_code FROM currency")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut alpha_by_numeric = HashMap::new();
        for row in rows {
            let (numeric, alpha) = row?;
            alpha_by_numeric.insert(numeric, alpha);
        }
        Ok(CurrencyTable { alpha_by_numeric })
    }
}

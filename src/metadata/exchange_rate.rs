//! `exchange_rate` table reads, used by the amount-currency criterion group.

use crate::errors::AppResult;
use crate::metadata::MetadataStore;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Exchange rates for one `(brand, rate_date)`, keyed by `(from, to)`.
pub struct ExchangeRateTable {
    rates: HashMap<(String, String), f64>,
}

impl ExchangeRateTable {
    pub fn rate(&self, currency_from: &str, currency_to: &str) -> Option<f64> {
        self.rates
            .get(&(currency_from.to_string(), currency_to.to_string()))
            .copied()
    }

    #[cfg(test)]
    pub fn for_test(pairs: &[(&str, &str, f64)]) -> Self {
        Self {
            rates: pairs
                .iter()
                .map(|(from, to, rate)| ((from.to_string(), to.to_string()), *rate))
                .collect(),
        }
    }
}

impl MetadataStore {
    pub fn read_exchange_rates(
        &self,
        brand: &str,
        rate_date: NaiveDate,
    ) -> AppResult<ExchangeRateTable> {
        let conn = self.connection();
        let mut stmt = conn.prepare(
            "SELECT currency_from_code, currency_to, exchange_value FROM exchange_rate \
             WHERE brand = ?1 AND rate_date = ?2",
        )?;
        let rows = stmt.query_map(
            rusqlite::params![brand, rate_date.format("%Y-%m-%d").to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            },
        )?;
        let mut rates = HashMap::new();
        for row in rows {
            let (from, to, value) = row?;
            rates.insert((from, to), value);
        }
        Ok(ExchangeRateTable { rates })
    }
}

//! `client` table reads: per-client BIN lists used by the jurisdiction
//! classifier.

use crate::errors::{AppError, AppResult};
use crate::metadata::MetadataStore;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Client {
    pub client_id: String,
    pub issuing_bins_6_digits: HashSet<String>,
    pub issuing_bins_8_digits: HashSet<String>,
    pub acquiring_bins: HashSet<String>,
}

fn split_bins(csv: &str) -> HashSet<String> {
    csv.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl MetadataStore {
    pub fn read_client(&self, client_id: &str) -> AppResult<Client> {
        let conn = self.connection();
        let mut stmt = conn.prepare(
            "SELECT client_id, issuing_bins_6_digits, issuing_bins_8_digits, acquiring_bins \
             FROM client WHERE client_id = ?1",
        )?;
        let mut rows = stmt.query(rusqlite::params![client_id])?;
        let row = rows.next()?.ok_or_else(|| {
            AppError::Config(format!("no client row found for client_id {client_id}"))
        })?;
        Ok(Client {
            client_id: row.get(0)?,
            issuing_bins_6_digits: split_bins(&row.get::<_, String>(1)?),
            issuing_bins_8_digits: split_bins(&row.get::<_, String>(2)?),
            acquiring_bins: split_bins(&row.get::<_, String>(3)?),
        })
    }
}

//! `file_control` table reads: brand/type/processing-date/landing-filename
//! lookup keyed by `(client_id, file_id)`, used to resolve artifact paths
//! and the processing date cleaning and rule validity are measured against.

use crate::errors::{AppError, AppResult};
use crate::metadata::MetadataStore;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct FileControl {
    pub client_id: String,
    pub file_id: String,
    pub brand_id: String,
    pub file_type: String,
    pub file_processing_date: NaiveDate,
    pub landing_file_name: String,
}

impl MetadataStore {
    pub fn read_file_control(&self, client_id: &str, file_id: &str) -> AppResult<FileControl> {
        let conn = self.connection();
        let mut stmt = conn.prepare(
            "SELECT client_id, file_id, brand_id, file_type, file_processing_date, \
             landing_file_name FROM file_control WHERE client_id = ?1 AND file_id = ?2",
        )?;
        let mut rows = stmt.query(rusqlite::params![client_id, file_id])?;
        let row = rows.next()?.ok_or_else(|| {
            AppError::Config(format!(
                "no file_control row for client {client_id} file {file_id}"
            ))
        })?;
        let date_str: String = row.get(4)?;
        let file_processing_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|_| AppError::Config(format!("invalid file_processing_date {date_str}")))?;
        Ok(FileControl {
            client_id: row.get(0)?,
            file_id: row.get(1)?,
            brand_id: row.get(2)?,
            file_type: row.get(3)?,
            file_processing_date,
            landing_file_name: row.get(5)?,
        })
    }
}

//! `visa_ardef` table reads. Filtering, deduplication, and interval
//! construction happen in `pipeline::ardef_resolver`; this module only
//! reads the raw rows.

use crate::errors::AppResult;
use crate::metadata::MetadataStore;
use crate::types::ardef::ArdefRecord;
use chrono::NaiveDate;

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

impl MetadataStore {
    pub fn read_ardef_records(&self) -> AppResult<Vec<ArdefRecord>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(
            "SELECT low_key, table_key, effective_date, valid_until, delete_indicator, \
             funding_source, issuer_country, issuer_region, product_id, product_subtype, \
             ardef_country, b2b_program_id, fast_funds, nnss_indicator, technology_indicator, \
             travel_indicator FROM visa_ardef",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ArdefRecord {
                low_key: row.get(0)?,
                table_key: row.get(1)?,
                effective_date: parse_date(&row.get::<_, String>(2)?)
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()),
                valid_until: row
                    .get::<_, Option<String>>(3)?
                    .and_then(|s| parse_date(&s)),
                delete_indicator: row
                    .get::<_, String>(4)?
                    .chars()
                    .next()
                    .unwrap_or(' '),
                funding_source: row.get(5)?,
                issuer_country: row.get(6)?,
                issuer_region: row.get(7)?,
                product_id: row.get(8)?,
                product_subtype: row.get(9)?,
                ardef_country: row.get(10)?,
                b2b_program_id: row.get(11)?,
                fast_funds: row.get(12)?,
                nnss_indicator: row.get(13)?,
                technology_indicator: row.get(14)?,
                travel_indicator: row.get(15)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

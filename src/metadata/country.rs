//! `country` table reads: country-to-region classification used by the
//! jurisdiction classifier.

use crate::errors::AppResult;
use crate::metadata::MetadataStore;
use std::collections::HashMap;

/// A country code → Visa region code map, read once per stage.
pub struct CountryTable {
    region_by_country: HashMap<String, String>,
}

impl CountryTable {
    pub fn region_of(&self, country_code: &str) -> Option<&str> {
        self.region_by_country
            .get(country_code)
            .map(|s| s.as_str())
    }

    #[cfg(test)]
    pub fn for_test(pairs: &[(&str, &str)]) -> Self {
        Self {
            region_by_country: pairs
                .iter()
                .map(|(country, region)| (country.to_string(), region.to_string()))
                .collect(),
        }
    }
}

impl MetadataStore {
    pub fn read_country_table(&self) -> AppResult<CountryTable> {
        let conn = self.connection();
        let mut stmt = conn.prepare("SELECT country_code, visa_region_code FROM country")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut region_by_country = HashMap::new();
        for row in rows {
            let (country_code, region) = row?;
            region_by_country.insert(country_code, region);
        }
        Ok(CountryTable { region_by_country })
    }
}

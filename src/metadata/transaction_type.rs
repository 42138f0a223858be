//! `visa_transaction_type` table reads: business transaction type id to
//! transaction type id mapping.

use crate::errors::AppResult;
use crate::metadata::MetadataStore;
use std::collections::HashMap;

pub struct TransactionTypeTable {
    type_id_by_business_type: HashMap<i64, String>,
}

impl TransactionTypeTable {
    pub fn transaction_type_of(&self, business_transaction_type_id: i64) -> Option<&str> {
        self.type_id_by_business_type
            .get(&business_transaction_type_id)
            .map(|s| s.as_str())
    }
}

impl MetadataStore {
    pub fn read_transaction_type_table(&self) -> AppResult<TransactionTypeTable> {
        let conn = self.connection();
        let mut stmt = conn
            .prepare("SELECT business_transaction_type_id, transaction_type_id FROM visa_transaction_type")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut type_id_by_business_type = HashMap::new();
        for row in rows {
            let (business_type, type_id) = row?;
            type_id_by_business_type.insert(business_type, type_id);
        }
        Ok(TransactionTypeTable {
            type_id_by_business_type,
        })
    }
}

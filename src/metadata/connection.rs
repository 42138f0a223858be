//! Metadata store connection management.
//!
//! The metadata store (clients, country codes, field definitions, ARDEF
//! records, fee rules, exchange rates) is an embedded SQL store the core
//! only ever reads. A `MetadataStore` is opened once per stage invocation,
//! used for every read that stage needs, and dropped — see spec.md §5.

use crate::errors::AppResult;
use rusqlite::Connection;

pub struct MetadataStore {
    connection: Connection,
}

impl MetadataStore {
    pub fn open(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;
        Ok(Self { connection })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

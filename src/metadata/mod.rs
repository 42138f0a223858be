//! Read-only access to the metadata store (spec.md §6): clients, countries,
//! file control, ARDEF, field definitions, fee rules, exchange rates, and
//! currency codes. Each table gets a typed reader implemented as a method on
//! `MetadataStore`; the core never writes to these tables.

pub mod ardef;
pub mod client;
pub mod connection;
pub mod country;
pub mod currency;
pub mod exchange_rate;
pub mod fields;
pub mod file_control;
pub mod rules;
pub mod schema;
pub mod transaction_type;

pub use connection::MetadataStore;

//! Account Range Definition records and the disjoint-interval index the
//! ARDEF resolver builds from them.

use chrono::NaiveDate;

/// One raw `visa_ardef` row, as read from the metadata store, before the
/// resolver filters, dedupes, and sorts it into an interval index.
#[derive(Debug, Clone)]
pub struct ArdefRecord {
    pub low_key: i64,
    pub table_key: i64,
    pub effective_date: NaiveDate,
    /// `None` means "open-ended" — the resolver treats it as the file's
    /// processing date when filtering for temporal validity.
    pub valid_until: Option<NaiveDate>,
    pub delete_indicator: char,
    pub funding_source: Option<String>,
    pub issuer_country: Option<String>,
    pub issuer_region: Option<String>,
    pub product_id: Option<String>,
    pub product_subtype: Option<String>,
    pub ardef_country: Option<String>,
    pub b2b_program_id: Option<String>,
    pub fast_funds: Option<String>,
    pub nnss_indicator: Option<String>,
    pub technology_indicator: Option<String>,
    pub travel_indicator: Option<String>,
}

impl ArdefRecord {
    /// The sentinel empty interval bound to transactions whose PAN matches
    /// no surviving ARDEF interval. All domain attributes are null.
    pub fn sentinel() -> Self {
        Self {
            low_key: 0,
            table_key: 0,
            effective_date: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap(),
            valid_until: None,
            delete_indicator: ' ',
            funding_source: None,
            issuer_country: None,
            issuer_region: None,
            product_id: None,
            product_subtype: None,
            ardef_country: None,
            b2b_program_id: None,
            fast_funds: None,
            nnss_indicator: None,
            technology_indicator: None,
            travel_indicator: None,
        }
    }
}

/// A sorted vector of pairwise-disjoint closed intervals `[low_key,
/// table_key]`, immutable after construction, searchable in O(log n).
pub struct ArdefIndex {
    records: Vec<ArdefRecord>,
}

impl ArdefIndex {
    pub fn new(records: Vec<ArdefRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ArdefRecord] {
        &self.records
    }

    /// Binary search for the interval containing `account9`. Returns the
    /// sentinel `[0,0]` record when no interval matches.
    pub fn lookup(&self, account9: i64) -> &ArdefRecord {
        let mut lo = 0usize;
        let mut hi = self.records.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let rec = &self.records[mid];
            if account9 < rec.low_key {
                hi = mid;
            } else if account9 > rec.table_key {
                lo = mid + 1;
            } else {
                return rec;
            }
        }
        self.sentinel_ref()
    }

    fn sentinel_ref(&self) -> &'static ArdefRecord {
        use std::sync::OnceLock;
        static SENTINEL: OnceLock<ArdefRecord> = OnceLock::new();
        SENTINEL.get_or_init(ArdefRecord::sentinel)
    }
}

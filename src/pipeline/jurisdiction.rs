//! Jurisdiction classification (spec.md §4.5): on-us / off-us /
//! intraregional / interregional, plus the `jurisdiction_assigned` code
//! the rule engine narrows rules by.

use crate::metadata::client::Client;
use crate::metadata::country::CountryTable;
use crate::types::ardef::ArdefRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jurisdiction {
    OnUs,
    OffUs,
    Intraregional,
    Interregional,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::OnUs => "on-us",
            Jurisdiction::OffUs => "off-us",
            Jurisdiction::Intraregional => "intraregional",
            Jurisdiction::Interregional => "interregional",
        }
    }
}

pub struct JurisdictionResult {
    pub jurisdiction: Jurisdiction,
    /// The code the rule engine narrows rules by: merchant country when
    /// same-country, issuer region when same-region, `"9"` otherwise.
    pub jurisdiction_assigned: String,
}

/// Classifies one transaction's jurisdiction.
///
/// `issuer_bin` is the 6- or 8-digit issuer BIN slice used for the on-us
/// BIN-list test; `acquirer_bin` is the 6-digit acquirer BIN slice.
pub fn classify(
    merchant_country: &str,
    ardef: &ArdefRecord,
    client: &Client,
    country_table: &CountryTable,
    issuer_bin: &str,
    acquirer_bin: &str,
) -> JurisdictionResult {
    let issuer_country = ardef.issuer_country.as_deref().unwrap_or("");
    let issuer_region = ardef.issuer_region.as_deref().unwrap_or("");
    let merchant_region = country_table.region_of(merchant_country).unwrap_or("");

    let same_country = !merchant_country.is_empty() && merchant_country == issuer_country;
    let same_region = !merchant_region.is_empty() && merchant_region == issuer_region;

    let bin_is_own = client.issuing_bins_6_digits.contains(issuer_bin)
        || client.issuing_bins_8_digits.contains(issuer_bin)
        || client.acquiring_bins.contains(acquirer_bin);

    let jurisdiction = if same_country && bin_is_own {
        Jurisdiction::OnUs
    } else if same_country {
        Jurisdiction::OffUs
    } else if same_region {
        Jurisdiction::Intraregional
    } else {
        Jurisdiction::Interregional
    };

    let jurisdiction_assigned = if same_country {
        merchant_country.to_string()
    } else if same_region {
        issuer_region.to_string()
    } else {
        "9".to_string()
    };

    JurisdictionResult {
        jurisdiction,
        jurisdiction_assigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn client_with_bins(issuer6: &[&str]) -> Client {
        Client {
            client_id: "C1".to_string(),
            issuing_bins_6_digits: issuer6.iter().map(|s| s.to_string()).collect(),
            issuing_bins_8_digits: HashSet::new(),
            acquiring_bins: HashSet::new(),
        }
    }

    fn ardef_with(issuer_country: &str, issuer_region: &str) -> ArdefRecord {
        let mut r = ArdefRecord::sentinel();
        r.issuer_country = Some(issuer_country.to_string());
        r.issuer_region = Some(issuer_region.to_string());
        r
    }

    #[test]
    fn same_country_and_own_bin_is_on_us() {
        let client = client_with_bins(&["123456"]);
        let table = CountryTable::for_test(&[("US", "R1")]);
        let ardef = ardef_with("US", "R1");
        let result = classify("US", &ardef, &client, &table, "123456", "000000");
        assert_eq!(result.jurisdiction, Jurisdiction::OnUs);
        assert_eq!(result.jurisdiction_assigned, "US");
    }

    #[test]
    fn same_country_foreign_bin_is_off_us() {
        let client = client_with_bins(&["999999"]);
        let table = CountryTable::for_test(&[("US", "R1")]);
        let ardef = ardef_with("US", "R1");
        let result = classify("US", &ardef, &client, &table, "123456", "000000");
        assert_eq!(result.jurisdiction, Jurisdiction::OffUs);
    }

    #[test]
    fn same_region_different_country_is_intraregional() {
        let client = client_with_bins(&[]);
        let table = CountryTable::for_test(&[("US", "R1"), ("CA", "R1")]);
        let ardef = ardef_with("CA", "R1");
        let result = classify("US", &ardef, &client, &table, "000000", "000000");
        assert_eq!(result.jurisdiction, Jurisdiction::Intraregional);
        assert_eq!(result.jurisdiction_assigned, "R1");
    }

    #[test]
    fn different_region_is_interregional() {
        let client = client_with_bins(&[]);
        let table = CountryTable::for_test(&[("US", "R1"), ("FR", "R2")]);
        let ardef = ardef_with("FR", "R2");
        let result = classify("US", &ardef, &client, &table, "000000", "000000");
        assert_eq!(result.jurisdiction, Jurisdiction::Interregional);
        assert_eq!(result.jurisdiction_assigned, "9");
    }
}

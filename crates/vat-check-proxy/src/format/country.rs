//! Jurisdictions and their VAT identifier patterns.

use regex::Regex;
use std::sync::LazyLock;

/// A jurisdiction whose VAT identifiers can be checked through VIES.
///
/// The 27 EU member states plus Northern Ireland (`XI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Austria,
    Belgium,
    Bulgaria,
    Cyprus,
    Czechia,
    Germany,
    Denmark,
    Estonia,
    Greece,
    Spain,
    Finland,
    France,
    Croatia,
    Hungary,
    Ireland,
    Italy,
    Lithuania,
    Luxembourg,
    Latvia,
    Malta,
    Netherlands,
    Poland,
    Portugal,
    Romania,
    Sweden,
    Slovenia,
    Slovakia,
    NorthernIreland,
}

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    Country::ALL
        .iter()
        .map(|country| Regex::new(country.pattern_source()).expect("VAT patterns are valid"))
        .collect()
});

impl Country {
    /// Every supported jurisdiction, in declaration order.
    pub const ALL: [Country; 28] = [
        Country::Austria,
        Country::Belgium,
        Country::Bulgaria,
        Country::Cyprus,
        Country::Czechia,
        Country::Germany,
        Country::Denmark,
        Country::Estonia,
        Country::Greece,
        Country::Spain,
        Country::Finland,
        Country::France,
        Country::Croatia,
        Country::Hungary,
        Country::Ireland,
        Country::Italy,
        Country::Lithuania,
        Country::Luxembourg,
        Country::Latvia,
        Country::Malta,
        Country::Netherlands,
        Country::Poland,
        Country::Portugal,
        Country::Romania,
        Country::Sweden,
        Country::Slovenia,
        Country::Slovakia,
        Country::NorthernIreland,
    ];

    /// Resolve an uppercase two-letter prefix.
    ///
    /// Greece is reachable both as `EL` (the VIES code) and `GR` (ISO 3166).
    pub fn from_code(code: &str) -> Option<Self> {
        let country = match code {
            "AT" => Country::Austria,
            "BE" => Country::Belgium,
            "BG" => Country::Bulgaria,
            "CY" => Country::Cyprus,
            "CZ" => Country::Czechia,
            "DE" => Country::Germany,
            "DK" => Country::Denmark,
            "EE" => Country::Estonia,
            "EL" | "GR" => Country::Greece,
            "ES" => Country::Spain,
            "FI" => Country::Finland,
            "FR" => Country::France,
            "HR" => Country::Croatia,
            "HU" => Country::Hungary,
            "IE" => Country::Ireland,
            "IT" => Country::Italy,
            "LT" => Country::Lithuania,
            "LU" => Country::Luxembourg,
            "LV" => Country::Latvia,
            "MT" => Country::Malta,
            "NL" => Country::Netherlands,
            "PL" => Country::Poland,
            "PT" => Country::Portugal,
            "RO" => Country::Romania,
            "SE" => Country::Sweden,
            "SI" => Country::Slovenia,
            "SK" => Country::Slovakia,
            "XI" => Country::NorthernIreland,
            _ => return None,
        };
        Some(country)
    }

    /// The code VIES expects in its lookup path.
    pub fn registry_code(self) -> &'static str {
        match self {
            Country::Austria => "AT",
            Country::Belgium => "BE",
            Country::Bulgaria => "BG",
            Country::Cyprus => "CY",
            Country::Czechia => "CZ",
            Country::Germany => "DE",
            Country::Denmark => "DK",
            Country::Estonia => "EE",
            Country::Greece => "EL",
            Country::Spain => "ES",
            Country::Finland => "FI",
            Country::France => "FR",
            Country::Croatia => "HR",
            Country::Hungary => "HU",
            Country::Ireland => "IE",
            Country::Italy => "IT",
            Country::Lithuania => "LT",
            Country::Luxembourg => "LU",
            Country::Latvia => "LV",
            Country::Malta => "MT",
            Country::Netherlands => "NL",
            Country::Poland => "PL",
            Country::Portugal => "PT",
            Country::Romania => "RO",
            Country::Sweden => "SE",
            Country::Slovenia => "SI",
            Country::Slovakia => "SK",
            Country::NorthernIreland => "XI",
        }
    }

    /// Pattern for the full identifier, country prefix included.
    fn pattern_source(self) -> &'static str {
        match self {
            Country::Austria => r"^ATU\d{8}$",
            // Ten digits, or the older nine-digit body behind a leading zero.
            Country::Belgium => r"^BE(0\d{9}|\d{10})$",
            Country::Bulgaria => r"^BG\d{9,10}$",
            Country::Cyprus => r"^CY\d{8}[A-Z]$",
            Country::Czechia => r"^CZ\d{8,10}$",
            Country::Germany => r"^DE\d{9}$",
            Country::Denmark => r"^DK\d{8}$",
            Country::Estonia => r"^EE\d{9}$",
            Country::Greece => r"^(EL|GR)\d{9}$",
            Country::Spain => r"^ES[A-Z0-9]\d{7}[A-Z0-9]$",
            Country::Finland => r"^FI\d{8}$",
            // I and O are never issued as check characters.
            Country::France => r"^FR[A-HJ-NP-Z0-9]{2}\d{9}$",
            Country::Croatia => r"^HR\d{11}$",
            Country::Hungary => r"^HU\d{8}$",
            Country::Ireland => r"^IE(\d{7}[A-WY][A-I]?|\d[A-Z+*]\d{5}[A-W])$",
            Country::Italy => r"^IT\d{11}$",
            Country::Lithuania => r"^LT(\d{9}|\d{12})$",
            Country::Luxembourg => r"^LU\d{8}$",
            Country::Latvia => r"^LV\d{11}$",
            Country::Malta => r"^MT\d{8}$",
            Country::Netherlands => r"^NL\d{9}B\d{2}$",
            Country::Poland => r"^PL\d{10}$",
            Country::Portugal => r"^PT\d{9}$",
            Country::Romania => r"^RO\d{2,10}$",
            Country::Sweden => r"^SE\d{10}01$",
            Country::Slovenia => r"^SI\d{8}$",
            Country::Slovakia => r"^SK\d{10}$",
            Country::NorthernIreland => r"^XI(\d{9}|\d{12}|GD\d{3}|HA\d{3})$",
        }
    }

    /// Test a normalized identifier against this jurisdiction's pattern.
    pub fn matches(self, identifier: &str) -> bool {
        PATTERNS[self as usize].is_match(identifier)
    }
}

//! VAT identifier normalization and per-country format validation.
//!
//! Format validation is purely syntactic. It says nothing about whether the
//! number is actually registered; that is what the VIES lookup is for.

mod country;

pub use country::Country;

use thiserror::Error;

/// Why an identifier failed format validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown country code '{0}'")]
    UnknownCountry(String),

    #[error("invalid VAT number format for country {0}")]
    InvalidFormat(String),
}

/// Strip all whitespace and uppercase.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A normalized VAT identifier split into prefix and local number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatIdentifier {
    value: String,
    split: usize,
}

impl VatIdentifier {
    /// Normalize raw user input.
    pub fn parse(raw: &str) -> Self {
        let value = normalize(raw);
        let split = value
            .char_indices()
            .nth(2)
            .map(|(idx, _)| idx)
            .unwrap_or(value.len());

        Self { value, split }
    }

    /// The full normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// First two characters.
    pub fn country_code(&self) -> &str {
        &self.value[..self.split]
    }

    /// Everything after the country code.
    pub fn local_number(&self) -> &str {
        &self.value[self.split..]
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Check the identifier against its country's pattern.
    pub fn validate(&self) -> Result<Country, FormatError> {
        let code = self.country_code();
        let country = Country::from_code(code)
            .ok_or_else(|| FormatError::UnknownCountry(code.to_string()))?;

        if country.matches(&self.value) {
            Ok(country)
        } else {
            Err(FormatError::InvalidFormat(code.to_string()))
        }
    }
}

impl std::fmt::Display for VatIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Outcome of [`validate_format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCheck {
    pub country_code: String,
    pub local_number: String,
    pub format_valid: bool,
    pub reason: Option<String>,
}

/// Validate an already-normalized identifier.
pub fn validate_format(identifier: &str) -> FormatCheck {
    let vat_id = VatIdentifier::parse(identifier);
    let reason = vat_id.validate().err().map(|e| e.to_string());

    FormatCheck {
        country_code: vat_id.country_code().to_string(),
        local_number: vat_id.local_number().to_string(),
        format_valid: reason.is_none(),
        reason,
    }
}

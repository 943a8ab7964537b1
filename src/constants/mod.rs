//! Per-standard defaults that model objects fall back to when their
//! configuration leaves a field unset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CmiError;

/// Error codes a model object may raise. Which numeric value each maps to
/// depends on the standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCodes {
    pub invalid_set_value: u16,
    pub type_mismatch: u16,
    pub value_out_of_range: u16,
    pub undefined_data_model: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    pub score_children: &'static str,
    pub cmi_decimal: &'static str,
    /// Range applied when a score asks for the standard's range.
    pub score_range: &'static str,
    pub error_codes: ErrorCodes,
}

pub const SCORM12: Catalog = Catalog {
    score_children: "raw,min,max",
    cmi_decimal: r"^-?([0-9]{0,3})(\.[0-9]*)?$",
    score_range: "0#100",
    error_codes: ErrorCodes {
        invalid_set_value: 402,
        type_mismatch: 405,
        value_out_of_range: 407,
        undefined_data_model: 401,
    },
};

pub const SCORM2004: Catalog = Catalog {
    score_children: "scaled,raw,min,max",
    cmi_decimal: r"^-?([0-9]{1,5})(\.[0-9]{1,18})?$",
    score_range: "0#*",
    error_codes: ErrorCodes {
        // 2004 has no separate "invalid set" code; writes to
        // read-only keywords report 404 (read-only element)
        invalid_set_value: 404,
        type_mismatch: 406,
        value_out_of_range: 407,
        undefined_data_model: 401,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standard {
    #[default]
    Scorm12,
    Scorm2004,
}

impl Standard {
    pub fn catalog(self) -> &'static Catalog {
        match self {
            Standard::Scorm12 => &SCORM12,
            Standard::Scorm2004 => &SCORM2004,
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standard::Scorm12 => write!(f, "scorm12"),
            Standard::Scorm2004 => write!(f, "scorm2004"),
        }
    }
}

impl FromStr for Standard {
    type Err = CmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scorm12" | "1.2" => Ok(Standard::Scorm12),
            "scorm2004" | "2004" => Ok(Standard::Scorm2004),
            other => Err(CmiError::InvalidConfigValueError {
                field: "standard".to_string(),
                value: other.to_string(),
                reason: "Valid standards: scorm12, scorm2004".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::ScoreRange;
    use regex::Regex;

    #[test]
    fn test_catalog_patterns_compile() {
        for standard in [Standard::Scorm12, Standard::Scorm2004] {
            let catalog = standard.catalog();
            assert!(Regex::new(catalog.cmi_decimal).is_ok(), "{standard}");
            assert!(catalog.score_range.parse::<ScoreRange>().is_ok(), "{standard}");
        }
    }

    #[test]
    fn test_scorm12_decimal() {
        let decimal = Regex::new(SCORM12.cmi_decimal).unwrap();
        assert!(decimal.is_match("85"));
        assert!(decimal.is_match("-12.5"));
        assert!(!decimal.is_match("1000"));
        assert!(!decimal.is_match("abc"));
    }

    #[test]
    fn test_standard_from_str() {
        assert_eq!("SCORM12".parse::<Standard>().unwrap(), Standard::Scorm12);
        assert_eq!("2004".parse::<Standard>().unwrap(), Standard::Scorm2004);
        assert!("aicc".parse::<Standard>().is_err());
    }
}

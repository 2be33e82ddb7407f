//! Instance-family token helpers used by the family resolver.
//!
//! A family is the part of an instance type before the size, e.g. `g6` for
//! `g6.xlarge`.

use once_cell::sync::Lazy;
use regex::Regex;

static SIZE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\d+.*$").unwrap());

/// Strip an accidental size suffix from a family token.
///
/// - Only a `.` followed by a digit starts a suffix (`g6.2xlarge` -> `g6`)
/// - Tokens whose suffix starts with a letter are returned unchanged (`m5.large`)
pub fn normalize_family(token: &str) -> String {
    SIZE_SUFFIX.replace(token, "").into_owned()
}

/// Name filter selecting every size of a family (`g6` -> `g6.*`).
pub fn family_name_pattern(family: &str) -> String {
    format!("{}.*", family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_numeric_size_suffix() {
        assert_eq!(normalize_family("g6.2xlarge"), "g6");
        assert_eq!(normalize_family("m5.12xlarge"), "m5");
        assert_eq!(normalize_family("c7g.4xlarge"), "c7g");
        assert_eq!(normalize_family(" c7g.4xlarge"), " c7g");
    }

    #[test]
    fn leaves_bare_and_alpha_suffixes() {
        assert_eq!(normalize_family("g6"), "g6");
        assert_eq!(normalize_family("m5.large"), "m5.large");
        assert_eq!(normalize_family("r6i.metal"), "r6i.metal");
    }

    #[test]
    fn family_pattern_selects_all_sizes() {
        assert_eq!(family_name_pattern("g6"), "g6.*");
        assert_eq!(family_name_pattern(&normalize_family("g6.2xlarge")), "g6.*");
    }
}

use std::{fmt, str::FromStr};

/// An ID prefix marking a need as derived from a standard.
///
/// Needs whose IDs start with one of these prefixes are "standard" items: a
/// standard requirement if the ID also contains `RQ`, a standard work product
/// if it contains `WP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardPrefix {
    /// ISO/IEC 21434, road vehicles cybersecurity engineering.
    Iso2143,
    /// ISO 26262, road vehicles functional safety.
    Iso26262,
    /// ISO/PAS 8926, pre-existing software architectural elements.
    IsoPas8926,
}

impl StandardPrefix {
    /// All known standard prefixes.
    pub const ALL: [Self; 3] = [Self::Iso2143, Self::Iso26262, Self::IsoPas8926];

    /// The ID prefix string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iso2143 => "R_ISO2143",
            Self::Iso26262 => "R_ISO26262",
            Self::IsoPas8926 => "R_ISOPAS8926",
        }
    }
}

impl fmt::Display for StandardPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that is not a known prefix.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown standard prefix '{0}'")]
pub struct UnknownPrefixError(String);

impl FromStr for StandardPrefix {
    type Err = UnknownPrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|prefix| prefix.as_str() == s)
            .ok_or_else(|| UnknownPrefixError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_prefixes() {
        for prefix in StandardPrefix::ALL {
            assert_eq!(prefix.as_str().parse::<StandardPrefix>(), Ok(prefix));
        }
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert_eq!(
            "R_ISO9001".parse::<StandardPrefix>(),
            Err(UnknownPrefixError("R_ISO9001".to_string()))
        );
    }
}

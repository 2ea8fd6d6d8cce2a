use crate::error::DigipinError;
use crate::index::constants::{CODE_LENGTH, GROUPS, SEPARATOR};
use crate::index::grid::position_of;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated 10-symbol DIGIPIN code in canonical (uppercase, unseparated)
/// form.
///
/// Parsing strips any non-alphanumeric separators and accepts lowercase
/// letters, so `"39j-49l-l8t4"` and `"39J49LL8T4"` parse to the same value.
///
/// # Example
/// ```
/// use digipin_rs::DigiPin;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let code: DigiPin = "39J-49L-L8T4".parse()?;
/// assert_eq!(code.as_str(), "39J49LL8T4");
/// assert_eq!(code.grouped(), "39J-49L-L8T4");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DigiPin([u8; CODE_LENGTH]);

impl DigiPin {
    /// Builds a code from symbols that are already known to be canonical.
    pub(crate) fn from_symbols(symbols: [u8; CODE_LENGTH]) -> Self {
        Self(symbols)
    }

    /// Parses a code, stripping separators and validating every symbol.
    ///
    /// # Errors
    ///
    /// - [`DigipinError::InvalidLength`] - not 10 symbols after stripping separators
    /// - [`DigipinError::InvalidSymbol`] - a character outside the alphabet
    pub fn parse(code: &str) -> Result<Self, DigipinError> {
        let normalized: Vec<char> = code.chars().filter(|c| c.is_alphanumeric()).collect();
        if normalized.len() != CODE_LENGTH {
            return Err(DigipinError::InvalidLength(normalized.len()));
        }

        let mut symbols = [0u8; CODE_LENGTH];
        for (i, &c) in normalized.iter().enumerate() {
            position_of(c).map_err(|_| DigipinError::InvalidSymbol {
                symbol: c,
                position: i + 1,
            })?;
            symbols[i] = c.to_ascii_uppercase() as u8;
        }

        Ok(Self(symbols))
    }

    /// The canonical 10-character form.
    pub fn as_str(&self) -> &str {
        // Only ASCII symbols are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// The grouped display form, `XXX-XXX-XXXX`.
    pub fn grouped(&self) -> String {
        let mut out = String::with_capacity(CODE_LENGTH + GROUPS.len() - 1);
        let mut start = 0;
        for (i, len) in GROUPS.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(&self.as_str()[start..start + len]);
            start += len;
        }
        out
    }

    /// Iterates over the symbols from the coarsest level to the finest.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| b as char)
    }
}

impl FromStr for DigiPin {
    type Err = DigipinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DigiPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for DigiPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigiPin({})", self.as_str())
    }
}

impl AsRef<str> for DigiPin {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for DigiPin {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for DigiPin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DigiPin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

use thiserror::Error;

use crate::key::Key;

/// Why a required value counts as not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MissingCause {
    /// The key is not present in any source.
    Absent,
    /// The key is present with an empty value.
    Empty,
    /// The value was copied unchanged from the template.
    Placeholder,
}

/// Why a supplied value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidReason {
    TooLong,
    TooShort,
    NotANumber,
    OctetOutOfRange,
    WrongOctetCount,
    PrefixOutOfRange,
    /// Contains `\r` or `\n`, which cannot be written back as one line.
    LineBreak,
}

/// Error returned by every loading operation.
///
/// Values that were never filled in (absent, empty or still the template
/// placeholder) are `MissingConfiguration`; values that were filled in but
/// cannot be used are `InvalidValue`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("missing configuration for {key} ({cause:?})")]
    MissingConfiguration { key: Key, cause: MissingCause },
    #[error("invalid value for {key} ({reason:?})")]
    InvalidValue { key: Key, reason: InvalidReason },
}

impl ConfigError {
    /// True when the real value was never supplied.
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::MissingConfiguration { .. })
    }

    /// Key the error refers to.
    pub fn key(&self) -> Key {
        match self {
            ConfigError::MissingConfiguration { key, .. } => *key,
            ConfigError::InvalidValue { key, .. } => *key,
        }
    }
}

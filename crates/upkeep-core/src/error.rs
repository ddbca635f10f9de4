//! Error types for `upkeep-core`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("frequency is custom but no custom interval was given")]
  MissingCustomInterval,

  #[error("custom interval must be 1-365 days, got {0}")]
  CustomIntervalOutOfRange(u32),

  #[error("date arithmetic left the supported calendar range")]
  DateOverflow,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error type for `upkeep-store-http`.

use thiserror::Error;
use upkeep_core::store::StoreFailure;

#[derive(Debug, Error)]
pub enum Error {
  /// Transport-level failure: connect, timeout, TLS, or body decode.
  #[error("http transport error: {0}")]
  Http(#[from] reqwest::Error),

  /// The upstream facilities API answered with a non-success status. The
  /// status is forwarded to dashboard clients unchanged.
  #[error("upstream responded {status}: {message}")]
  Upstream { status: u16, message: String },
}

impl StoreFailure for Error {
  fn upstream_status(&self) -> Option<u16> {
    match self {
      Error::Upstream { status, .. } => Some(*status),
      Error::Http(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

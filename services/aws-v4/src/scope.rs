use crate::constants::AWS4_REQUEST;
use blobgate_core::time::{format_date, DateTime};
use std::fmt;
use std::fmt::Display;

/// Credential scope: the date/region/service tuple that narrows a derived
/// signing key to one day, one region and one service.
///
/// The date is always derived from the signing timestamp, never recomputed,
/// so it cannot drift from the string-to-sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    date: String,
    region: String,
    service: String,
}

impl Scope {
    /// Build a scope from the signing timestamp, region and service.
    pub fn new(time: DateTime, region: &str, service: &str) -> Self {
        Self {
            date: format_date(time),
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    /// The 8-digit `YYYYMMDD` scope date.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The scope region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The scope service.
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl Display for Scope {
    // "20220313/<region>/<service>/aws4_request"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.date, self.region, self.service, AWS4_REQUEST
        )
    }
}

//! Date-based per-host credentials
//!
//! Fleet hosts accept a password that is recomputed every day from the
//! calendar date and the host's index, so nothing secret is ever stored:
//!
//! 1. day of month, zero-padded to two digits (`03`)
//! 2. followed by the month number without padding (`1`, ..., `12`)
//! 3. the concatenation is read as a decimal integer (`"031"` → 31)
//! 4. the host index is added and the sum is prefixed with `pdv@`
//!
//! The concatenation changes width between September and October and is
//! not injective (1 November and 11 January both give `111`). Hosts expect
//! exactly this formula, so it is reproduced as is.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::types::HostIndex;

/// Fixed prefix of every derived password
pub const PASSWORD_PREFIX: &str = "pdv@";

/// A password derived for one host on one day
///
/// Lives only as long as a single execution. `Debug` is redacted so it
/// cannot end up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    password: String,
}

impl Credential {
    /// The password to send to the SSH server
    pub fn expose(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Derive the password for `host` on `date`
pub fn derive(host: HostIndex, date: NaiveDate) -> Credential {
    let base = date_base(date.day(), date.month());
    Credential {
        password: format!("{}{}", PASSWORD_PREFIX, base + u32::from(host.get())),
    }
}

/// Integer value of `format!("{:02}{}", day, month)`
fn date_base(day: u32, month: u32) -> u32 {
    let month_width = if month >= 10 { 100 } else { 10 };
    day * month_width + month
}

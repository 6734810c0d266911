//! Time utilities: timezone-aware "today".

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Resolve the current calendar date in an IANA timezone like "Asia/Seoul".
pub fn today_in_tz(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seoul_resolves() {
        assert!(today_in_tz("Asia/Seoul").is_ok());
    }

    #[test]
    fn garbage_timezone_errors() {
        assert!(today_in_tz("Mars/OlympusMons").is_err());
    }
}

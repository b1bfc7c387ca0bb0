//! Physical units attached to axis values.
//!
//! Values are carried as plain `f64`; the unit only decides how ranges are
//! divided into ticks and how values are printed.

use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// Units of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Units {
    /// Plain numbers.
    #[default]
    Dimensionless,
    /// Seconds since 1970-01-01T00:00:00Z.
    Seconds,
}

impl Units {
    /// Returns true for time location units.
    pub fn is_time(&self) -> bool {
        matches!(self, Units::Seconds)
    }

    /// Formats a value for labels and feedback text.
    ///
    /// # Examples
    /// ```
    /// use rdas::Units;
    /// assert_eq!(Units::Seconds.format(0.0), "1970-01-01 00:00:00");
    /// assert_eq!(Units::Dimensionless.format(2.5), "2.5");
    /// ```
    pub fn format(&self, value: f64) -> String {
        match self {
            Units::Dimensionless => format_number(value),
            Units::Seconds => format_time(value),
        }
    }
}

/// Compact general-purpose number formatting.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e6).contains(&magnitude) {
        return format!("{:.3e}", value);
    }
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Formats seconds since epoch as `YYYY-MM-DD HH:MM:SS`, adding milliseconds
/// when the value is not on a whole second.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return seconds.to_string();
    }
    let whole = seconds.floor();
    let mut millis = ((seconds - whole) * 1000.0).round() as i64;
    let mut secs = whole as i64;
    if millis >= 1000 {
        secs += 1;
        millis -= 1000;
    }
    let days = secs.div_euclid(SECONDS_PER_DAY);
    let sod = secs.rem_euclid(SECONDS_PER_DAY);
    let (year, month, day) = civil_from_days(days);
    let (h, m, s) = (sod / 3600, (sod % 3600) / 60, sod % 60);
    if millis == 0 {
        format!("{year:04}-{month:02}-{day:02} {h:02}:{m:02}:{s:02}")
    } else {
        format!("{year:04}-{month:02}-{day:02} {h:02}:{m:02}:{s:02}.{millis:03}")
    }
}

/// Converts days since the epoch to a proleptic Gregorian (year, month, day).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

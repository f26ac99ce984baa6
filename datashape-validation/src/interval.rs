//! Interval expressions added to a point in time.
//!
//! Two notations are accepted:
//! - ISO-8601 durations with an optional sign: `P1D`, `PT30M`, `-P1Y2M`
//! - relative phrases: `+1 day`, `2 weeks 3 hours`, `-30 minutes`, `1 month ago`

use chrono::{Months, NaiveDateTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([+-])?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$",
    )
    .unwrap()
});

static RELATIVE_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*([+-]?)\s*(\d+)\s*([a-z]+)\s*").unwrap());

/// A calendar-aware offset.
///
/// Months are applied first (clamping to the end of shorter months), then
/// days and seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interval {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
}

impl Interval {
    /// Parse either notation; `None` for anything else.
    ///
    /// ```
    /// use datashape_validation::Interval;
    ///
    /// let iso = Interval::parse("P1DT2H").unwrap();
    /// let phrase = Interval::parse("+1 day 2 hours").unwrap();
    /// assert_eq!(iso, phrase);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Self::parse_iso(&raw.to_uppercase()).or_else(|| Self::parse_relative(&raw.to_lowercase()))
    }

    fn parse_iso(raw: &str) -> Option<Self> {
        if raw.ends_with('T') {
            return None;
        }
        let caps = ISO_DURATION.captures(raw)?;

        let part = |index: usize| -> Option<Option<i64>> {
            caps.get(index)
                .map(|m| m.as_str().parse::<i64>().ok())
                .map_or(Some(None), |n| n.map(Some))
        };

        let parts = [part(2)?, part(3)?, part(4)?, part(5)?, part(6)?, part(7)?, part(8)?];
        if parts.iter().all(Option::is_none) {
            return None;
        }
        let [years, months, weeks, days, hours, minutes, seconds] = parts.map(|p| p.unwrap_or(0));

        let interval = Interval {
            months: years.checked_mul(12)?.checked_add(months)?,
            days: weeks.checked_mul(7)?.checked_add(days)?,
            seconds: hours
                .checked_mul(3600)?
                .checked_add(minutes.checked_mul(60)?)?
                .checked_add(seconds)?,
        };

        match caps.get(1).map(|m| m.as_str()) {
            Some("-") => interval.negated(),
            _ => Some(interval),
        }
    }

    fn parse_relative(raw: &str) -> Option<Self> {
        let (body, ago) = match raw.strip_suffix("ago") {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let mut interval = Interval::default();
        let mut consumed = 0;

        for caps in RELATIVE_PART.captures_iter(body) {
            let whole = caps.get(0)?;
            if whole.start() != consumed {
                return None;
            }
            consumed = whole.end();

            let mut amount: i64 = caps[2].parse().ok()?;
            if &caps[1] == "-" {
                amount = -amount;
            }
            interval.add_unit(amount, &caps[3])?;
        }

        if consumed == 0 || consumed != body.len() {
            return None;
        }

        if ago { interval.negated() } else { Some(interval) }
    }

    fn add_unit(&mut self, amount: i64, unit: &str) -> Option<()> {
        let (slot, factor) = match unit {
            "sec" | "secs" | "second" | "seconds" => (&mut self.seconds, 1),
            "min" | "mins" | "minute" | "minutes" => (&mut self.seconds, 60),
            "hour" | "hours" => (&mut self.seconds, 3600),
            "day" | "days" => (&mut self.days, 1),
            "week" | "weeks" => (&mut self.days, 7),
            "fortnight" | "fortnights" => (&mut self.days, 14),
            "month" | "months" => (&mut self.months, 1),
            "year" | "years" => (&mut self.months, 12),
            _ => return None,
        };
        *slot = slot.checked_add(amount.checked_mul(factor)?)?;
        Some(())
    }

    fn negated(self) -> Option<Self> {
        Some(Interval {
            months: self.months.checked_neg()?,
            days: self.days.checked_neg()?,
            seconds: self.seconds.checked_neg()?,
        })
    }

    /// `base` shifted by this interval; `None` on overflow.
    pub fn apply(&self, base: NaiveDateTime) -> Option<NaiveDateTime> {
        let months = Months::new(u32::try_from(self.months.unsigned_abs()).ok()?);
        let shifted = if self.months >= 0 {
            base.checked_add_months(months)?
        } else {
            base.checked_sub_months(months)?
        };

        shifted
            .checked_add_signed(TimeDelta::try_days(self.days)?)?
            .checked_add_signed(TimeDelta::try_seconds(self.seconds)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_iso_durations() {
        assert_eq!(
            Interval::parse("P1Y2M3W4DT5H6M7S"),
            Some(Interval {
                months: 14,
                days: 25,
                seconds: 5 * 3600 + 6 * 60 + 7,
            })
        );
        assert_eq!(
            Interval::parse("-pt30m"),
            Some(Interval {
                seconds: -1800,
                ..Interval::default()
            })
        );
        assert!(Interval::parse("P").is_none());
        assert!(Interval::parse("P1DT").is_none());
        assert!(Interval::parse("P1H").is_none());
    }

    #[test]
    fn test_relative_phrases() {
        assert_eq!(
            Interval::parse("+1 day 2 hours"),
            Some(Interval {
                days: 1,
                seconds: 7200,
                ..Interval::default()
            })
        );
        assert_eq!(
            Interval::parse("2 weeks -1 day"),
            Some(Interval {
                days: 13,
                ..Interval::default()
            })
        );
        assert_eq!(
            Interval::parse("3 months ago"),
            Some(Interval {
                months: -3,
                ..Interval::default()
            })
        );
        assert!(Interval::parse("tomorrow").is_none());
        assert!(Interval::parse("1 day and 2 hours").is_none());
        assert!(Interval::parse("5 parsecs").is_none());
    }

    #[test]
    fn test_apply_clamps_month_end() {
        let next = Interval::parse("+1 month").unwrap().apply(base()).unwrap();
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let earlier = Interval::parse("-P1D").unwrap().apply(base()).unwrap();
        assert_eq!(earlier.date(), NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
    }

    #[test]
    fn test_apply_overflow_is_none() {
        let huge = Interval {
            months: i64::from(u32::MAX) * 4,
            ..Interval::default()
        };
        assert!(huge.apply(base()).is_none());
    }
}

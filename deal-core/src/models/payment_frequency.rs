use serde::{Deserialize, Serialize};

/// How often the buyer makes a payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Weekly,
    BiWeekly,
    SemiMonthly,
    #[default]
    Monthly,
}

/// Days in one payment period, as the exact fraction `days / per`.
///
/// Semi-monthly and monthly periods use the average length derived from a
/// 365-day year rather than calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub days: u32,
    pub per: u32,
}

impl PaymentFrequency {
    pub fn all() -> &'static [PaymentFrequency] {
        &[
            PaymentFrequency::Weekly,
            PaymentFrequency::BiWeekly,
            PaymentFrequency::SemiMonthly,
            PaymentFrequency::Monthly,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "biweekly",
            Self::SemiMonthly => "semimonthly",
            Self::Monthly => "monthly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::BiWeekly),
            "semimonthly" => Some(Self::SemiMonthly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-Weekly",
            Self::SemiMonthly => "Semi-Monthly",
            Self::Monthly => "Monthly",
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Weekly => 52,
            Self::BiWeekly => 26,
            Self::SemiMonthly => 24,
            Self::Monthly => 12,
        }
    }

    pub fn day_count(&self) -> DayCount {
        match self {
            Self::Weekly => DayCount { days: 7, per: 1 },
            Self::BiWeekly => DayCount { days: 14, per: 1 },
            Self::SemiMonthly => DayCount { days: 365, per: 24 },
            Self::Monthly => DayCount { days: 365, per: 12 },
        }
    }

    /// Number of payment periods covering `months`, rounded up.
    pub fn periods_for_months(&self, months: u32) -> u32 {
        months.saturating_mul(self.periods_per_year()).div_ceil(12)
    }

    /// Number of whole months needed to contain `periods` payments, rounded up.
    pub fn months_for_periods(&self, periods: u32) -> u32 {
        periods.saturating_mul(12).div_ceil(self.periods_per_year())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_ignores_case_and_separators() {
        assert_eq!(PaymentFrequency::parse("Bi-Weekly"), Some(PaymentFrequency::BiWeekly));
        assert_eq!(PaymentFrequency::parse("semi_monthly"), Some(PaymentFrequency::SemiMonthly));
        assert_eq!(PaymentFrequency::parse("MONTHLY"), Some(PaymentFrequency::Monthly));
        assert_eq!(PaymentFrequency::parse("daily"), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for frequency in PaymentFrequency::all() {
            assert_eq!(PaymentFrequency::parse(frequency.as_str()), Some(*frequency));
        }
    }

    #[test]
    fn periods_for_months_rounds_up() {
        assert_eq!(PaymentFrequency::Monthly.periods_for_months(60), 60);
        assert_eq!(PaymentFrequency::SemiMonthly.periods_for_months(60), 120);
        assert_eq!(PaymentFrequency::BiWeekly.periods_for_months(60), 130);
        assert_eq!(PaymentFrequency::Weekly.periods_for_months(60), 260);
        // 7 months of weekly payments is 30.33 periods
        assert_eq!(PaymentFrequency::Weekly.periods_for_months(7), 31);
    }

    #[test]
    fn months_for_periods_rounds_up() {
        assert_eq!(PaymentFrequency::Monthly.months_for_periods(59), 59);
        assert_eq!(PaymentFrequency::Weekly.months_for_periods(260), 60);
        assert_eq!(PaymentFrequency::Weekly.months_for_periods(259), 60);
        assert_eq!(PaymentFrequency::BiWeekly.months_for_periods(27), 13);
        assert_eq!(PaymentFrequency::SemiMonthly.months_for_periods(0), 0);
    }

    #[test]
    fn day_count_matches_periods_per_year() {
        for frequency in PaymentFrequency::all() {
            let count = frequency.day_count();
            // days/per * periods_per_year is 364 for weekly schedules and 365 otherwise
            let year = count.days * frequency.periods_per_year() / count.per;
            assert!(year == 364 || year == 365, "{frequency:?} covers {year} days");
        }
    }
}

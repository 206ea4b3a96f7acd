//! Recurrence calculator
//!
//! Pure date arithmetic: given the current occurrence date and a policy,
//! compute the date of the following occurrence. No I/O, no clock.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::domain::value_objects::{RecurrenceError, RecurrenceKind, RecurrencePolicy};

pub struct RecurrenceCalculator;

impl RecurrenceCalculator {
    /// Date of the occurrence after `current`. Always strictly later than `current`.
    ///
    /// - daily: `interval` days ahead
    /// - weekly without weekdays: `interval` weeks ahead
    /// - weekly with weekdays: the next selected weekday later this week, or
    ///   else the earliest selected weekday `interval` weeks on
    /// - monthly / yearly: calendar addition, clamping the day to the end of
    ///   a shorter month (Jan 31 + 1 month = Feb 28/29)
    pub fn next_date(current: NaiveDate, policy: &RecurrencePolicy) -> Result<NaiveDate, RecurrenceError> {
        policy.validate()?;
        let interval = policy.interval();

        let next = match policy.kind() {
            RecurrenceKind::Daily => current.checked_add_days(Days::new(u64::from(interval))),
            RecurrenceKind::Weekly if policy.weekdays().is_empty() => {
                current.checked_add_days(Days::new(7 * u64::from(interval)))
            }
            RecurrenceKind::Weekly => Self::next_selected_weekday(current, policy),
            RecurrenceKind::Monthly => current.checked_add_months(Months::new(interval)),
            RecurrenceKind::Yearly => interval
                .checked_mul(12)
                .and_then(|months| current.checked_add_months(Months::new(months))),
        };

        next.ok_or(RecurrenceError::DateOutOfRange(current))
    }

    /// Up to `count` dates following `start`, stopping early at the policy's
    /// end date. Occurrence limits are not consulted.
    pub fn preview(start: NaiveDate, policy: &RecurrencePolicy, count: usize) -> Result<Vec<NaiveDate>, RecurrenceError> {
        let mut dates = Vec::with_capacity(count);
        let mut cursor = start;

        while dates.len() < count {
            cursor = Self::next_date(cursor, policy)?;
            if policy.end_date().is_some_and(|end| cursor > end) {
                break;
            }
            dates.push(cursor);
        }

        Ok(dates)
    }

    fn next_selected_weekday(current: NaiveDate, policy: &RecurrencePolicy) -> Option<NaiveDate> {
        let weekdays = policy.weekdays();
        let today = current.weekday();

        // Later this week
        if let Some(day) = weekdays.next_in_week_after(today) {
            let offset = day.num_days_from_monday() - today.num_days_from_monday();
            return current.checked_add_days(Days::new(u64::from(offset)));
        }

        // Earliest selected day, `interval` weeks on from this week's Monday
        let first = weekdays.first()?;
        let to_next_monday = 7 - today.num_days_from_monday();
        let offset = u64::from(to_next_monday)
            + 7 * (u64::from(policy.interval()) - 1)
            + u64::from(first.num_days_from_monday());

        current.checked_add_days(Days::new(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::WeekdaySet;
    use chrono::Weekday;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_on(interval: u32, days: &str) -> RecurrencePolicy {
        RecurrencePolicy::weekly(interval)
            .unwrap()
            .on_weekdays(days.parse().unwrap())
    }

    #[test]
    fn test_daily() {
        let policy = RecurrencePolicy::daily(3).unwrap();
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 12, 30), &policy).unwrap(),
            date(2026, 1, 2)
        );
    }

    #[test]
    fn test_weekly_without_weekdays() {
        let policy = RecurrencePolicy::weekly(2).unwrap();
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 11, 21), &policy).unwrap(),
            date(2025, 12, 5)
        );
    }

    #[test]
    fn test_weekly_later_in_same_week() {
        // Friday -> Sunday
        let policy = weekly_on(1, "fri,sun");
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 11, 21), &policy).unwrap(),
            date(2025, 11, 23)
        );
    }

    #[test]
    fn test_weekly_single_sunday_from_friday() {
        let policy = weekly_on(1, "sun");
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 11, 21), &policy).unwrap(),
            date(2025, 11, 23)
        );
    }

    #[test]
    fn test_weekly_wraps_to_earliest_day_next_week() {
        // Sunday Nov 23 -> Friday Nov 28
        let policy = weekly_on(1, "fri,sun");
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 11, 23), &policy).unwrap(),
            date(2025, 11, 28)
        );
    }

    #[test]
    fn test_weekly_only_day_earlier_than_current() {
        // Wednesday Nov 19, only Monday selected -> Monday Nov 24, not Monday Nov 17
        let policy = weekly_on(1, "mon");
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 11, 19), &policy).unwrap(),
            date(2025, 11, 24)
        );
    }

    #[test]
    fn test_biweekly_skips_alternate_week() {
        // Every 2 weeks on Mon/Wed, starting Monday Nov 17
        let policy = weekly_on(2, "mon,wed");
        let dates = RecurrenceCalculator::preview(date(2025, 11, 17), &policy, 4).unwrap();
        assert_eq!(
            dates,
            vec![
                date(2025, 11, 19),
                date(2025, 12, 1),
                date(2025, 12, 3),
                date(2025, 12, 15),
            ]
        );
    }

    #[test]
    fn test_monthly_clamps_to_end_of_february() {
        let policy = RecurrencePolicy::monthly(1).unwrap();
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 1, 31), &policy).unwrap(),
            date(2025, 2, 28)
        );
        assert_eq!(
            RecurrenceCalculator::next_date(date(2024, 1, 31), &policy).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_quarterly() {
        let policy = RecurrencePolicy::monthly(3).unwrap();
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 11, 30), &policy).unwrap(),
            date(2026, 2, 28)
        );
    }

    #[test]
    fn test_yearly_from_leap_day() {
        let policy = RecurrencePolicy::yearly(1).unwrap();
        assert_eq!(
            RecurrenceCalculator::next_date(date(2024, 2, 29), &policy).unwrap(),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn test_invalid_stored_policy_is_rejected() {
        let policy: RecurrencePolicy =
            serde_json::from_str(r#"{"kind":"weekly","interval":0,"end_date":null,"occurrence_limit":null}"#)
                .unwrap();
        assert_eq!(
            RecurrenceCalculator::next_date(date(2025, 1, 1), &policy),
            Err(RecurrenceError::NonPositiveInterval)
        );
    }

    #[test]
    fn test_out_of_range() {
        let policy = RecurrencePolicy::yearly(1).unwrap();
        assert!(matches!(
            RecurrenceCalculator::next_date(NaiveDate::MAX, &policy),
            Err(RecurrenceError::DateOutOfRange(_))
        ));
    }

    #[test]
    fn test_preview_stops_at_end_date() {
        let policy = RecurrencePolicy::daily(1).unwrap().until(date(2025, 1, 3));
        let dates = RecurrenceCalculator::preview(date(2025, 1, 1), &policy, 10).unwrap();
        assert_eq!(dates, vec![date(2025, 1, 2), date(2025, 1, 3)]);
    }

    fn any_policy() -> impl Strategy<Value = RecurrencePolicy> {
        (0usize..4, 1u32..6, 0u8..128).prop_map(|(kind, interval, mask)| {
            let policy = match kind {
                0 => RecurrencePolicy::daily(interval),
                1 => RecurrencePolicy::weekly(interval),
                2 => RecurrencePolicy::monthly(interval),
                _ => RecurrencePolicy::yearly(interval),
            }
            .unwrap();
            let days: WeekdaySet = (0..7)
                .filter(|bit| mask & (1 << bit) != 0)
                .filter_map(|bit| Weekday::try_from(bit as u8).ok())
                .collect();
            policy.on_weekdays(days)
        })
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1990i32..2100, 1u32..366).prop_filter_map("valid ordinal", |(year, ordinal)| {
            NaiveDate::from_yo_opt(year, ordinal)
        })
    }

    proptest! {
        #[test]
        fn prop_next_date_moves_strictly_forward(start in any_date(), policy in any_policy()) {
            let next = RecurrenceCalculator::next_date(start, &policy).unwrap();
            prop_assert!(next > start);
        }

        #[test]
        fn prop_weekly_follows_sorted_weekday_cycle(start in any_date(), mask in 1u8..128) {
            let days: WeekdaySet = (0..7)
                .filter(|bit| mask & (1 << bit) != 0)
                .filter_map(|bit| Weekday::try_from(bit as u8).ok())
                .collect();
            let policy = RecurrencePolicy::weekly(1).unwrap().on_weekdays(days);
            let cycle: Vec<Weekday> = days.iter().collect();

            let dates = RecurrenceCalculator::preview(start, &policy, 3 * cycle.len()).unwrap();

            for pair in dates.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for date in &dates {
                prop_assert!(days.contains(date.weekday()));
            }
            // From the first date on, labels repeat the sorted set cyclically
            let offset = cycle.iter().position(|d| *d == dates[0].weekday()).unwrap();
            for (i, date) in dates.iter().enumerate() {
                prop_assert_eq!(date.weekday(), cycle[(offset + i) % cycle.len()]);
            }
            // Interval 1 never skips a week
            for pair in dates.windows(2) {
                prop_assert!((pair[1] - pair[0]).num_days() <= 7);
            }
        }
    }
}

//! Weekday set value object
//!
//! A small set of weekdays backed by a 7-bit mask (bit 0 = Monday). Iteration
//! is always Monday-first regardless of insertion order.
//!
//! The storage form is a comma-delimited list of labels (`"mon,wed,fri"`);
//! parsing accepts short or full English names in any case.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selected days, Monday first
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_DAYS.into_iter().filter(|d| self.contains(*d))
    }

    /// Earliest selected day in a Monday-based week
    pub fn first(&self) -> Option<Weekday> {
        self.iter().next()
    }

    /// First selected day strictly after `day` in the same Monday-based week
    pub fn next_in_week_after(&self, day: Weekday) -> Option<Weekday> {
        let from = day.num_days_from_monday() as usize + 1;
        ALL_DAYS[from.min(7)..].iter().copied().find(|d| self.contains(*d))
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl FromStr for WeekdaySet {
    type Err = WeekdayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(|label| {
                label
                    .parse::<Weekday>()
                    .map_err(|_| WeekdayParseError(label.to_string()))
            })
            .collect()
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.iter().map(|d| d.to_string().to_lowercase()).collect();
        f.write_str(&labels.join(","))
    }
}

impl TryFrom<String> for WeekdaySet {
    type Error = WeekdayParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekdaySet> for String {
    fn from(set: WeekdaySet) -> Self {
        set.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday label: {0}")]
pub struct WeekdayParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_monday_first() {
        let set: WeekdaySet = [Weekday::Sun, Weekday::Wed, Weekday::Mon].into_iter().collect();
        let days: Vec<Weekday> = set.iter().collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Sun]);
        assert_eq!(set.first(), Some(Weekday::Mon));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_next_in_week_after() {
        let set = WeekdaySet::new().with(Weekday::Fri).with(Weekday::Sun);
        assert_eq!(set.next_in_week_after(Weekday::Fri), Some(Weekday::Sun));
        assert_eq!(set.next_in_week_after(Weekday::Mon), Some(Weekday::Fri));
        assert_eq!(set.next_in_week_after(Weekday::Sun), None);
    }

    #[test]
    fn test_parse_storage_form() {
        let set: WeekdaySet = "Mon, wednesday,FRI".parse().unwrap();
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Wed));
        assert!(set.contains(Weekday::Fri));
        assert_eq!(set.to_string(), "mon,wed,fri");
    }

    #[test]
    fn test_parse_empty_and_duplicates() {
        assert!("".parse::<WeekdaySet>().unwrap().is_empty());
        assert_eq!("tue,tue".parse::<WeekdaySet>().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        assert_eq!(
            "mon,funday".parse::<WeekdaySet>(),
            Err(WeekdayParseError("funday".into()))
        );
    }

    #[test]
    fn test_serde_uses_storage_form() {
        let set = WeekdaySet::new().with(Weekday::Sat).with(Weekday::Tue);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "\"tue,sat\"");
        assert_eq!(serde_json::from_str::<WeekdaySet>(&json).unwrap(), set);
    }
}

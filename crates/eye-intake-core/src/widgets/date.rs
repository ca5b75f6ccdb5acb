//! Compound date-of-birth selector.

use chrono::{Datelike, Local};

use crate::models::{PartialDate, MIN_BIRTH_YEAR};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month number (1-12) for a month name.
pub fn month_from_name(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

/// Month name for a month number (1-12).
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Three pickers: year, month, day.
///
/// Each setter changes only its own part. In particular, moving from
/// January to February keeps day 31 selected; validation reports it.
#[derive(Debug, Clone, Copy)]
pub struct DateSelector {
    current_year: i32,
}

impl DateSelector {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn for_today() -> Self {
        Self::new(Local::now().year())
    }

    /// Current year down to 1920.
    pub fn year_options(&self) -> Vec<i32> {
        (MIN_BIRTH_YEAR..=self.current_year).rev().collect()
    }

    pub fn month_options(&self) -> Vec<(u32, &'static str)> {
        (1u32..).zip(MONTH_NAMES).collect()
    }

    /// Day numbers for the selected year and month.
    pub fn day_options(&self, value: &PartialDate) -> Vec<u32> {
        (1..=value.day_count()).collect()
    }

    pub fn set_year(&self, value: &PartialDate, year: i32) -> PartialDate {
        PartialDate {
            year: Some(year),
            ..*value
        }
    }

    pub fn set_month(&self, value: &PartialDate, month: u32) -> PartialDate {
        PartialDate {
            month: Some(month),
            ..*value
        }
    }

    /// Set the month from its picker label; unknown names are ignored.
    pub fn set_month_name(&self, value: &PartialDate, name: &str) -> PartialDate {
        match month_from_name(name) {
            Some(month) => self.set_month(value, month),
            None => *value,
        }
    }

    pub fn set_day(&self, value: &PartialDate, day: u32) -> PartialDate {
        PartialDate {
            day: Some(day),
            ..*value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_options_descend_to_1920() {
        let years = DateSelector::new(2026).year_options();
        assert_eq!(years.first(), Some(&2026));
        assert_eq!(years.last(), Some(&1920));
        assert_eq!(years.len(), 107);
    }

    #[test]
    fn test_february_day_counts() {
        let selector = DateSelector::new(2026);
        let leap = PartialDate {
            year: Some(2024),
            month: Some(2),
            day: None,
        };
        assert_eq!(selector.day_options(&leap).len(), 29);

        let common = selector.set_year(&leap, 2023);
        assert_eq!(selector.day_options(&common).len(), 28);
    }

    #[test]
    fn test_unset_parts_default_to_31_days() {
        let selector = DateSelector::new(2026);
        let value = selector.set_month(&PartialDate::default(), 2);
        assert_eq!(selector.day_options(&value).len(), 31);
    }

    #[test]
    fn test_day_not_clamped_on_month_change() {
        let selector = DateSelector::new(2026);
        let value = PartialDate::new(2023, 1, 31);
        let moved = selector.set_month_name(&value, "February");
        assert_eq!(moved.month, Some(2));
        assert_eq!(moved.day, Some(31));
        assert!(moved.to_date().is_none());
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_from_name("March"), Some(3));
        assert_eq!(month_from_name("march"), None);
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(DateSelector::new(2026).month_options()[0], (1, "January"));
    }
}

use crate::model::id::RoomId;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use std::collections::{BTreeMap, HashSet};

/// Per-day occupancy for one room over one month.
///
/// Both maps hold an entry for every calendar day of the month, including
/// the final day. A zero value means the day is free; in `reservation_map`
/// a non-zero value is the occupying reservation's id, in `block_map` it is
/// the id of the restriction row backing a manual block (marked on the
/// block's start day only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub reservation_map: BTreeMap<NaiveDate, i64>,
    pub block_map: BTreeMap<NaiveDate, i64>,
}

/// First and last calendar day of a month, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Month {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            AppError::UnprocessableEntity(format!("invalid calendar month {year}-{month}"))
        })?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| {
            AppError::UnprocessableEntity(format!("invalid calendar month {year}-{month}"))
        })?;
        Ok(Self {
            first,
            last: next_first - Duration::days(1),
        })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Every day of the month, first through last inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first;
        let len = (self.last - self.first).num_days() + 1;
        (0..len).map(move |offset| first + Duration::days(offset))
    }
}

/// The admin calendar edit form, decoded from dynamically named fields.
///
/// The form only submits changed checkboxes, never the full grid:
/// `keep_block_{room}_{date}` marks an existing block the admin left in
/// place, `add_block_{room}_{date}` requests a new one-day block. Fields
/// matching neither convention are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CalendarEditForm {
    pub keeps: HashSet<(RoomId, NaiveDate)>,
    pub adds: Vec<(RoomId, NaiveDate)>,
}

impl CalendarEditForm {
    const KEEP_PREFIX: &'static str = "keep_block_";
    const ADD_PREFIX: &'static str = "add_block_";

    pub fn parse<'a>(fields: impl Iterator<Item = &'a str>) -> AppResult<Self> {
        let mut form = Self::default();
        for field in fields {
            if let Some(rest) = field.strip_prefix(Self::KEEP_PREFIX) {
                form.keeps.insert(Self::parse_room_day(field, rest)?);
            } else if let Some(rest) = field.strip_prefix(Self::ADD_PREFIX) {
                form.adds.push(Self::parse_room_day(field, rest)?);
            }
        }
        Ok(form)
    }

    fn parse_room_day(field: &str, rest: &str) -> AppResult<(RoomId, NaiveDate)> {
        let bad_field =
            || AppError::UnprocessableEntity(format!("malformed calendar field {field}"));
        let (room, date) = rest.split_once('_').ok_or_else(bad_field)?;
        let room_id = room.parse::<RoomId>().map_err(|_| bad_field())?;
        let date = date.parse::<NaiveDate>().map_err(|_| bad_field())?;
        Ok((room_id, date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_includes_first_and_last_day() {
        let month = Month::new(2024, 2).unwrap();
        let days: Vec<_> = month.days().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first().unwrap().to_string(), "2024-02-01");
        assert_eq!(days.last().unwrap().to_string(), "2024-02-29");

        let december = Month::new(2024, 12).unwrap();
        assert_eq!(december.last.to_string(), "2024-12-31");
    }

    #[test]
    fn month_rejects_out_of_range_input() {
        assert!(Month::new(2024, 0).is_err());
        assert!(Month::new(2024, 13).is_err());
    }

    #[test]
    fn edit_form_parses_keep_and_add_fields() {
        let fields = [
            "keep_block_1_2024-03-05",
            "add_block_2_2024-03-07",
            "csrf_token",
        ];
        let form = CalendarEditForm::parse(fields.into_iter()).unwrap();
        assert!(form
            .keeps
            .contains(&(RoomId::new(1), "2024-03-05".parse().unwrap())));
        assert_eq!(
            form.adds,
            vec![(RoomId::new(2), "2024-03-07".parse().unwrap())]
        );
    }

    #[test]
    fn edit_form_rejects_malformed_fields() {
        assert!(CalendarEditForm::parse(["add_block_x_2024-03-07"].into_iter()).is_err());
        assert!(CalendarEditForm::parse(["keep_block_1_notadate"].into_iter()).is_err());
    }
}

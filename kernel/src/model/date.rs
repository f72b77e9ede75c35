use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

/// A half-open stay interval `[start, end)`.
///
/// The end date is the checkout day and is exclusive: a stay ending on day D
/// and another starting on day D do not conflict. `new` rejects empty or
/// inverted spans, so every constructed span satisfies `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::UnprocessableEntity(format!(
                "start date {start} must be before end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Strict half-open overlap: `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Every night of the stay, i.e. `start..end` (checkout day excluded).
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        let nights = self.nights();
        (0..nights).map(move |offset| start + Duration::days(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn span(start: &str, end: &str) -> DateSpan {
        DateSpan::new(date(start), date(end)).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_spans() {
        assert!(DateSpan::new(date("2024-01-02"), date("2024-01-02")).is_err());
        assert!(DateSpan::new(date("2024-01-03"), date("2024-01-02")).is_err());
    }

    #[test]
    fn overlap_is_strict_on_both_boundaries() {
        let restriction = span("2024-01-01", "2024-01-03");
        assert!(restriction.overlaps(&span("2024-01-02", "2024-01-05")));
        // checkout on the 3rd, checkin on the 3rd: no conflict
        assert!(!restriction.overlaps(&span("2024-01-03", "2024-01-05")));
        // symmetric case on the other boundary
        assert!(!span("2024-01-03", "2024-01-05").overlaps(&restriction));
    }

    #[test]
    fn days_excludes_the_checkout_day() {
        let s = span("2024-01-01", "2024-01-03");
        let days: Vec<_> = s.days().collect();
        assert_eq!(days, vec![date("2024-01-01"), date("2024-01-02")]);
        assert_eq!(s.nights(), 2);
    }
}

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Create a link stamped with the current time
    pub fn new(id: u64, url: String, title: String, description: String) -> Self {
        Self::with_created_at(id, url, title, description, Utc::now())
    }

    pub fn with_created_at(
        id: u64,
        url: String,
        title: String,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Link {
            id,
            url,
            title,
            description,
            created_at,
        }
    }

    /// Creation date in the viewer's local time, day.month.year
    pub fn display_date(&self) -> String {
        format_ru_date(&self.created_at.with_timezone(&Local))
    }
}

/// Formats a date the way the ru-RU locale prints short dates (`15.01.2024`).
pub fn format_ru_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn formats_day_month_year_with_leading_zeros() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(format_ru_date(&date), "15.01.2024");
    }

    #[test]
    fn formats_in_the_given_offset() {
        // 23:30 UTC on the 9th is already the 10th in Moscow
        let utc = Utc.with_ymd_and_hms(2024, 1, 9, 23, 30, 0).unwrap();
        let moscow = utc.with_timezone(&FixedOffset::east_opt(3 * 3600).unwrap());
        assert_eq!(format_ru_date(&moscow), "10.01.2024");
    }

    #[test]
    fn new_link_is_stamped_now() {
        let before = Utc::now();
        let link = Link::new(7, "https://a.com".into(), "A".into(), String::new());
        assert!(link.created_at >= before);
        assert_eq!(link.id, 7);
        assert!(link.description.is_empty());
    }
}

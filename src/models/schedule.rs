use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The five schedule controls exactly as the form holds them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScheduleFields {
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub slot_duration: String,
}

/// A date range plus a same-day time window that slots recur in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    slot_duration_minutes: u32,
}

impl ScheduleWindow {
    /// Returns `None` for anything incomplete, malformed or out of order.
    pub fn parse(raw: &RawScheduleFields) -> Option<Self> {
        let start_date = parse_date(&raw.start_date)?;
        let end_date = parse_date(&raw.end_date)?;
        let start_time = parse_time(&raw.start_time)?;
        let end_time = parse_time(&raw.end_time)?;
        let slot_duration_minutes = parse_duration(&raw.slot_duration)?;
        Self::new(start_date, end_date, start_time, end_time, slot_duration_minutes)
    }

    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        slot_duration_minutes: u32,
    ) -> Option<Self> {
        if slot_duration_minutes == 0 || end_date < start_date || end_time <= start_time {
            return None;
        }
        Some(Self {
            start_date,
            end_date,
            start_time,
            end_time,
            slot_duration_minutes,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn slot_duration_minutes(&self) -> u32 {
        self.slot_duration_minutes
    }

    /// Inclusive of both endpoints.
    pub fn days_in_range(&self) -> u64 {
        let days = (self.end_date - self.start_date).num_days();
        days.max(0) as u64 + 1
    }

    pub fn daily_window_minutes(&self) -> u64 {
        (self.end_time - self.start_time).num_minutes().max(0) as u64
    }

    /// Whole slots only; a trailing partial slot is dropped.
    pub fn slots_per_day(&self) -> u64 {
        self.daily_window_minutes() / u64::from(self.slot_duration_minutes)
    }

    pub fn total_slots(&self) -> u64 {
        self.days_in_range() * self.slots_per_day()
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

// Browsers send HH:MM, or HH:MM:SS when the control has a seconds step.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

fn parse_duration(raw: &str) -> Option<u32> {
    let value = raw.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok().filter(|minutes| *minutes > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(
        start_date: &str,
        end_date: &str,
        start_time: &str,
        end_time: &str,
        slot_duration: &str,
    ) -> RawScheduleFields {
        RawScheduleFields {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            slot_duration: slot_duration.to_string(),
        }
    }

    #[test]
    fn parse_accepts_browser_encodings() {
        let window = ScheduleWindow::parse(&fields(
            "2024-03-01",
            "2024-03-03",
            "08:00",
            "12:00:00",
            " 30 ",
        ))
        .expect("valid window");
        assert_eq!(window.days_in_range(), 3);
        assert_eq!(window.daily_window_minutes(), 240);
        assert_eq!(window.slots_per_day(), 8);
        assert_eq!(window.total_slots(), 24);
    }

    #[test]
    fn parse_rejects_loose_numbers() {
        for duration in ["30.5", "-15", "0", "abc", "", "3O", "+30"] {
            let raw = fields("2024-03-01", "2024-03-01", "08:00", "12:00", duration);
            assert!(ScheduleWindow::parse(&raw).is_none(), "duration {:?}", duration);
        }
    }

    #[test]
    fn parse_rejects_malformed_dates_and_times() {
        for (start_date, start_time, end_time) in [
            ("2024-02-30", "08:00", "12:00"),
            ("01/03/2024", "08:00", "12:00"),
            ("2024-03-01", "8h", "12:00"),
            ("2024-03-01", "08:00", "24:30"),
        ] {
            let raw = fields(start_date, "2024-03-01", start_time, end_time, "30");
            assert!(ScheduleWindow::parse(&raw).is_none(), "{:?}", raw);
        }
    }

    #[test]
    fn parse_rejects_reversed_ranges() {
        for (start_date, start_time, end_time) in [
            ("2024-03-03", "08:00", "12:00"),
            ("2024-03-01", "12:00", "12:00"),
            ("2024-03-01", "13:00", "09:00"),
        ] {
            let raw = fields(start_date, "2024-03-01", start_time, end_time, "30");
            assert!(ScheduleWindow::parse(&raw).is_none(), "{:?}", raw);
        }
    }

    #[test]
    fn duration_longer_than_window_yields_zero_slots() {
        let raw = fields("2024-03-01", "2024-03-05", "08:00", "08:20", "30");
        let window = ScheduleWindow::parse(&raw).expect("valid window");
        assert_eq!(window.slots_per_day(), 0);
        assert_eq!(window.total_slots(), 0);
    }

    #[test]
    fn range_crossing_month_end_counts_every_day() {
        let raw = fields("2024-02-28", "2024-03-01", "09:00", "10:00", "15");
        let window = ScheduleWindow::parse(&raw).expect("valid window");
        assert_eq!(window.days_in_range(), 3);
        assert_eq!(window.total_slots(), 12);
    }
}

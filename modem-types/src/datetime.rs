use super::*;

const MONTH_DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Modem real time clock value as used by `+CCLK` and `+CMGR`.
///
/// Text form is `yy/MM/dd,hh:mm:ss±zz`, `zone` is the offset from GMT in quarters of an
/// hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct DateTime {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub zone: i8,
}

impl DateTime {
    /// Every fourth year, except year 00.
    ///
    /// Two digit years carry no century, so the 100/400 rule is not applied.
    pub fn is_leap_year(year: u8) -> bool {
        year % 4 == 0 && year != 0
    }

    pub fn days_in_month(year: u8, month: u8) -> Option<u8> {
        let days = *MONTH_DAYS.get(usize::from(month).checked_sub(1)?)?;
        Some(days + u8::from(month == 2 && Self::is_leap_year(year)))
    }

    pub fn is_valid(&self) -> bool {
        let Some(days) = Self::days_in_month(self.year, self.month) else {
            return false;
        };

        self.year <= 99
            && (1..=days).contains(&self.day)
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 60
            && (-47..=48).contains(&self.zone)
    }

    /// Parses `"yy/MM/dd,hh:mm:ss±zz"`, surrounding quotes are optional.
    ///
    /// Returns `None` for malformed text and for values that fail [`DateTime::is_valid`].
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = match text.strip_prefix('"') {
            Some(inner) => inner.strip_suffix('"')?,
            None => text,
        };

        let (date, time) = text.split_once(',')?;

        let mut date = date.split('/');
        let year = two_digits(date.next()?)?;
        let month = two_digits(date.next()?)?;
        let day = two_digits(date.next()?)?;
        if date.next().is_some() {
            return None;
        }

        let sign = time.find(|c| c == '+' || c == '-')?;
        let (clock, zone) = time.split_at(sign);

        let mut clock = clock.split(':');
        let hour = two_digits(clock.next()?)?;
        let minute = two_digits(clock.next()?)?;
        let second = two_digits(clock.next()?)?;
        if clock.next().is_some() {
            return None;
        }

        // sign plus at most two digits
        if !(2..=3).contains(&zone.len()) || !zone[1..].bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let zone = zone.parse().ok()?;

        let dt = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            zone,
        };
        dt.is_valid().then_some(dt)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:02},{:02}:{:02}:{:02}{:+03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.zone
        )
    }
}

fn two_digits(field: &str) -> Option<u8> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

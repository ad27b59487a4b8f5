//! Collection days as the calendar page hands them over.

use bitmask_enum::bitmask;
use chrono::Weekday;

use crate::error::InitError;

static WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A day of the week on which the bins are collected.
///
/// The index counts from Monday, so `0` is Monday and `6` is Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionDay(u8);

impl CollectionDay {
    /// The position of the day cell within its week.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn weekday(self) -> Weekday {
        WEEKDAYS[self.index()]
    }

    /// Validate all day indices of the page.
    ///
    /// A single bad index rejects the whole list.
    pub fn parse_all<T>(days: &[T]) -> Result<Vec<CollectionDay>, InitError>
    where
        T: Copy,
        CollectionDay: TryFrom<T, Error = InitError>,
    {
        days.iter().map(|day| CollectionDay::try_from(*day)).collect()
    }
}

impl TryFrom<i64> for CollectionDay {
    type Error = InitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(day) if usize::from(day) < WEEKDAYS.len() => Ok(CollectionDay(day)),
            _ => Err(InitError::DayOutOfRange(value)),
        }
    }
}

/// Page scripts hand over plain numbers; only whole ones can name a day.
impl TryFrom<f64> for CollectionDay {
    type Error = InitError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(InitError::DayOutOfRange(-1));
        }
        CollectionDay::try_from(value as i64)
    }
}

impl From<Weekday> for CollectionDay {
    fn from(value: Weekday) -> Self {
        CollectionDay(value.num_days_from_monday() as u8)
    }
}

#[bitmask(u8)]
pub enum WeekdayBitmask {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for WeekdayBitmask {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => WeekdayBitmask::Monday,
            Weekday::Tue => WeekdayBitmask::Tuesday,
            Weekday::Wed => WeekdayBitmask::Wednesday,
            Weekday::Thu => WeekdayBitmask::Thursday,
            Weekday::Fri => WeekdayBitmask::Friday,
            Weekday::Sat => WeekdayBitmask::Saturday,
            Weekday::Sun => WeekdayBitmask::Sunday,
        }
    }
}

impl WeekdayBitmask {
    /// The selected days from Monday to Sunday.
    pub fn collection_days(self) -> Vec<CollectionDay> {
        WEEKDAYS
            .into_iter()
            .filter(|weekday| self.contains(WeekdayBitmask::from(*weekday)))
            .map(CollectionDay::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use crate::{
        day::{CollectionDay, WeekdayBitmask},
        error::InitError,
    };

    #[test]
    fn test_try_from() {
        assert_eq!(CollectionDay::try_from(0_i64).unwrap().weekday(), Weekday::Mon);
        assert_eq!(CollectionDay::try_from(6_i64).unwrap().weekday(), Weekday::Sun);
        assert_eq!(CollectionDay::try_from(7_i64), Err(InitError::DayOutOfRange(7)));
        assert_eq!(CollectionDay::try_from(-1_i64), Err(InitError::DayOutOfRange(-1)));
        assert_eq!(
            CollectionDay::try_from(256_i64),
            Err(InitError::DayOutOfRange(256))
        );
    }

    #[test]
    fn test_parse_all() {
        let days = CollectionDay::parse_all(&[1_i64, 3, 5]).unwrap();
        let weekdays: Vec<Weekday> = days.into_iter().map(CollectionDay::weekday).collect();
        assert_eq!(weekdays, vec![Weekday::Tue, Weekday::Thu, Weekday::Sat]);
        assert_eq!(
            CollectionDay::parse_all(&[1_i64, 9, -2]),
            Err(InitError::DayOutOfRange(9))
        );
        assert_eq!(CollectionDay::parse_all::<i64>(&[]), Ok(vec![]));
    }

    #[test]
    fn test_try_from_number() {
        assert_eq!(CollectionDay::try_from(3.0_f64).unwrap().weekday(), Weekday::Thu);
        assert_eq!(CollectionDay::try_from(-0.0_f64).unwrap().weekday(), Weekday::Mon);
        assert_eq!(CollectionDay::try_from(2.7_f64), Err(InitError::DayOutOfRange(-1)));
        assert_eq!(
            CollectionDay::try_from(f64::NAN),
            Err(InitError::DayOutOfRange(-1))
        );
        assert_eq!(
            CollectionDay::try_from(f64::INFINITY),
            Err(InitError::DayOutOfRange(-1))
        );
        assert_eq!(CollectionDay::try_from(7.0_f64), Err(InitError::DayOutOfRange(7)));
        assert_eq!(
            CollectionDay::parse_all(&[1.0_f64, f64::NAN, 5.0]),
            Err(InitError::DayOutOfRange(-1))
        );
    }

    #[test]
    fn test_from_weekday() {
        assert_eq!(CollectionDay::from(Weekday::Wed).index(), 2);
        assert_eq!(WeekdayBitmask::from(Weekday::Sun), WeekdayBitmask::Sunday);
    }

    #[test]
    fn test_collection_days() {
        assert_eq!(WeekdayBitmask::none().collection_days(), vec![]);
        let days = (WeekdayBitmask::Saturday | WeekdayBitmask::Tuesday | WeekdayBitmask::Thursday)
            .collection_days();
        let indices: Vec<usize> = days.into_iter().map(CollectionDay::index).collect();
        assert_eq!(indices, vec![1, 3, 5]);
    }
}

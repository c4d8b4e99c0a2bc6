use chrono::{Local, NaiveDateTime};

/// Supplies the wall-clock instant a render is based on.
///
/// Returned values are host-local and carry no timezone; the widget formats
/// exactly what it is given.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimeSource(pub NaiveDateTime);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<F> TimeSource for F
where
    F: Fn() -> NaiveDateTime + Send + Sync,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, TimeZone, Timelike};

    use super::*;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|date| date.and_hms_opt(9, 7, 2))
            .expect("valid instant")
    }

    #[test]
    fn fixed_source_repeats_its_instant() {
        let source = FixedTimeSource(instant());
        assert_eq!(source.now(), instant());
        assert_eq!(source.now(), source.now());
    }

    #[test]
    fn closures_act_as_sources() {
        let source = instant;
        assert_eq!(TimeSource::now(&source).second(), 2);
    }

    #[test]
    fn system_source_tracks_local_clock() {
        let before = Local::now();
        let sampled = SystemTimeSource.now();
        let after = Local::now();

        // Around a fall-back transition the naive sample maps to two instants.
        let candidates = Local.from_local_datetime(&sampled);
        let within = |instant: DateTime<Local>| before <= instant && instant <= after;

        assert!(
            candidates.earliest().is_some_and(within) || candidates.latest().is_some_and(within),
            "{sampled} not between {before} and {after}"
        );
    }
}

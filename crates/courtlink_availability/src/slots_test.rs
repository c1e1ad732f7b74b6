// --- File: crates/courtlink_availability/src/slots_test.rs ---
#[cfg(test)]
mod tests {
    use crate::finder::AvailabilityOptions;
    use crate::slots::{clamp_window, generate_slots, DayPart};
    use chrono::{Duration, NaiveTime};

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn tiles_the_day_window_in_step_increments() {
        let slots = generate_slots(
            time(9, 0),
            time(16, 0),
            Duration::minutes(15),
            Duration::minutes(30),
        );

        // Starts 09:00 through 15:30, every 15 minutes
        assert_eq!(slots.len(), 27);
        assert_eq!(slots[0].start, time(9, 0));
        assert_eq!(slots[0].end, time(9, 30));
        assert_eq!(slots.last().unwrap().start, time(15, 30));
        assert_eq!(slots.last().unwrap().end, time(16, 0));

        for pair in slots.windows(2) {
            assert_eq!(pair[1].start - pair[0].start, Duration::minutes(15));
        }
    }

    #[test]
    fn final_slot_may_touch_the_window_end() {
        let slots = generate_slots(
            time(9, 0),
            time(10, 5),
            Duration::minutes(30),
            Duration::minutes(30),
        );

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].start, time(9, 30));
        assert_eq!(slots[1].end, time(10, 0));
    }

    #[test]
    fn slot_longer_than_the_window_yields_nothing() {
        let slots = generate_slots(
            time(9, 0),
            time(10, 0),
            Duration::minutes(15),
            Duration::minutes(120),
        );

        assert!(slots.is_empty());
    }

    #[test]
    fn degenerate_parameters_yield_nothing() {
        assert!(generate_slots(
            time(9, 0),
            time(16, 0),
            Duration::minutes(0),
            Duration::minutes(30)
        )
        .is_empty());
        assert!(generate_slots(
            time(9, 0),
            time(16, 0),
            Duration::minutes(15),
            Duration::minutes(-30)
        )
        .is_empty());
        assert!(generate_slots(
            time(16, 0),
            time(9, 0),
            Duration::minutes(15),
            Duration::minutes(30)
        )
        .is_empty());
    }

    #[test]
    fn day_part_windows_clamp_to_the_operating_day() {
        let options = AvailabilityOptions::default();

        assert_eq!(
            options.day_part_window(DayPart::Morning),
            Some((time(9, 0), time(12, 0)))
        );
        assert_eq!(
            options.day_part_window(DayPart::Afternoon),
            Some((time(12, 0), time(16, 0)))
        );

        // A prison whose day starts after midday has no morning slots at all.
        let afternoon_only = AvailabilityOptions {
            day_start: time(13, 0),
            ..AvailabilityOptions::default()
        };
        assert_eq!(afternoon_only.day_part_window(DayPart::Morning), None);
        assert_eq!(
            afternoon_only.day_part_window(DayPart::Afternoon),
            Some((time(13, 0), time(16, 0)))
        );

        let morning_only = AvailabilityOptions {
            day_end: time(11, 0),
            ..AvailabilityOptions::default()
        };
        assert_eq!(
            morning_only.day_part_window(DayPart::Morning),
            Some((time(9, 0), time(11, 0)))
        );
        assert_eq!(morning_only.day_part_window(DayPart::Afternoon), None);
    }

    #[test]
    fn clamp_window_is_empty_when_windows_do_not_meet() {
        assert_eq!(
            clamp_window((time(9, 0), time(12, 0)), (time(12, 0), time(16, 0))),
            None
        );
        assert_eq!(
            clamp_window((time(9, 0), time(16, 0)), (time(10, 0), time(11, 0))),
            Some((time(10, 0), time(11, 0)))
        );
    }
}

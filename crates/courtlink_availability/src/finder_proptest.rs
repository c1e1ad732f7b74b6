// --- File: crates/courtlink_availability/src/finder_proptest.rs ---
#[cfg(test)]
mod tests {
    use crate::booked::{BookedLocation, BookedLocations};
    use crate::finder::{
        check_availability, AvailabilityOptions, AvailabilityRequest, BookingType,
    };
    use crate::interval::{Interval, LocationInterval};
    use chrono::{Duration, NaiveDate, NaiveTime};
    use proptest::prelude::*;

    const ROOM: &str = "VCC-A";

    // Bookings and requests are generated on the 15-minute grid from 09:00,
    // the shape real traffic has.
    fn slot_time(slot: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap() + Duration::minutes(i64::from(slot) * 15)
    }

    fn grid_interval(start_slot: u32, len_slots: u32) -> Interval {
        Interval::new(slot_time(start_slot), slot_time(start_slot + len_slots)).unwrap()
    }

    fn booked_from(slots: &[(u32, u32)]) -> BookedLocations {
        BookedLocations::new(
            vec![ROOM.to_string()],
            slots
                .iter()
                .map(|(start, len)| BookedLocation {
                    location_key: ROOM.to_string(),
                    interval: grid_interval(*start, *len),
                })
                .collect(),
        )
    }

    fn request_for(main: Interval) -> AvailabilityRequest {
        AvailabilityRequest {
            booking_type: BookingType::Court,
            requester_code: "YRKCC".to_string(),
            prison_code: "BMI".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
            pre: None,
            main: LocationInterval::new(ROOM, main),
            post: None,
            exclude_booking_id: None,
        }
    }

    proptest! {
        #[test]
        fn responses_respect_the_cap_ordering_and_overlap_rules(
            booked_slots in proptest::collection::vec((0u32..28, 1u32..5), 0..6),
            start_slot in 0u32..28,
            len_slots in 1u32..5,
        ) {
            let booked = booked_from(&booked_slots);
            let request = request_for(grid_interval(start_slot, len_slots));
            let options = AvailabilityOptions::default();

            let response = check_availability(&request, &booked, &options).unwrap();

            // The direct answer is exactly the plain overlap test
            prop_assert_eq!(
                response.availability_ok,
                !booked.is_booked(ROOM, &request.main.interval)
            );
            if response.availability_ok {
                prop_assert!(response.alternatives.is_empty());
            }
            prop_assert!(response.alternatives.len() <= options.max_alternatives);

            let requested_start = request.main.interval.start;
            let mut previous_offset = None;
            for option in &response.alternatives {
                // Every alternative is genuinely free, keeps the requested
                // duration, and never moves earlier than the requested start
                prop_assert!(!booked.is_booked(ROOM, &option.main.interval));
                prop_assert_eq!(
                    option.main.interval.duration(),
                    request.main.interval.duration()
                );
                prop_assert!(option.main.interval.start >= requested_start);

                let offset = (option.main.interval.start - requested_start).num_minutes().abs();
                if let Some(previous) = previous_offset {
                    prop_assert!(offset >= previous, "offsets must be non-decreasing");
                }
                previous_offset = Some(offset);
            }
        }

        #[test]
        fn pre_and_post_segments_move_as_a_block(
            booked_slots in proptest::collection::vec((0u32..28, 1u32..5), 1..6),
            start_slot in 1u32..23,
            len_slots in 1u32..4,
        ) {
            let booked = booked_from(&booked_slots);
            let main = grid_interval(start_slot, len_slots);
            let request = AvailabilityRequest {
                pre: Some(LocationInterval::new(
                    ROOM,
                    grid_interval(start_slot - 1, 1),
                )),
                post: Some(LocationInterval::new(
                    ROOM,
                    grid_interval(start_slot + len_slots, 1),
                )),
                ..request_for(main)
            };

            let response = check_availability(&request, &booked, &AvailabilityOptions::default()).unwrap();

            for option in &response.alternatives {
                let pre = option.pre.as_ref().unwrap();
                let post = option.post.as_ref().unwrap();
                // The requested adjacency is preserved at the new time
                prop_assert_eq!(pre.interval.end, option.main.interval.start);
                prop_assert_eq!(post.interval.start, option.main.interval.end);
                // And every segment in the combination is free
                prop_assert!(!booked.is_booked(ROOM, &pre.interval));
                prop_assert!(!booked.is_booked(ROOM, &option.main.interval));
                prop_assert!(!booked.is_booked(ROOM, &post.interval));
            }
        }
    }
}

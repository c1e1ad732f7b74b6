use chrono::{NaiveDate, NaiveTime};
use courtlink_availability::{
    check_availability, AvailabilityOptions, AvailabilityRequest, BookedLocation, BookedLocations,
    BookingType, Interval, LocationInterval,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const ROOM: &str = "VCC-A";

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn interval(start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(time(start.0, start.1), time(end.0, end.1)).unwrap()
}

// Helper function to create a booked index with evenly spaced appointments
fn create_booked_index(count: usize, duration_minutes: u32, gap_minutes: u32) -> BookedLocations {
    let mut booked = Vec::new();
    let mut start_minutes = 9 * 60u32;

    for _ in 0..count {
        let end_minutes = start_minutes + duration_minutes;
        booked.push(BookedLocation {
            location_key: ROOM.to_string(),
            interval: interval(
                (start_minutes / 60, start_minutes % 60),
                (end_minutes / 60, end_minutes % 60),
            ),
        });
        start_minutes = end_minutes + gap_minutes;
    }

    BookedLocations::new(vec![ROOM.to_string()], booked)
}

fn create_request(start: (u32, u32), end: (u32, u32)) -> AvailabilityRequest {
    AvailabilityRequest {
        booking_type: BookingType::Court,
        requester_code: "YRKCC".to_string(),
        prison_code: "BMI".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(),
        pre: None,
        main: LocationInterval::new(ROOM, interval(start, end)),
        post: None,
        exclude_booking_id: None,
    }
}

fn benchmark_check_availability(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_availability");

    // The request is free: the direct check short-circuits
    group.bench_function("free_request", |b| {
        b.iter(|| {
            let booked = create_booked_index(0, 30, 30);
            let request = create_request((11, 0), (11, 30));
            check_availability(
                black_box(&request),
                black_box(&booked),
                black_box(&AvailabilityOptions::default()),
            )
        })
    });

    // A handful of bookings forces a full alternative search
    group.bench_function("conflict_with_sparse_bookings", |b| {
        b.iter(|| {
            let booked = create_booked_index(4, 30, 60);
            let request = create_request((9, 0), (9, 30));
            check_availability(
                black_box(&request),
                black_box(&booked),
                black_box(&AvailabilityOptions::default()),
            )
        })
    });

    // Back-to-back bookings all day: every candidate is rejected
    group.bench_function("conflict_fully_booked_day", |b| {
        b.iter(|| {
            let booked = create_booked_index(14, 30, 0);
            let request = create_request((9, 0), (9, 30));
            check_availability(
                black_box(&request),
                black_box(&booked),
                black_box(&AvailabilityOptions::default()),
            )
        })
    });

    // Three segments per candidate: the most queries per slot
    group.bench_function("multi_segment_conflict", |b| {
        b.iter(|| {
            let booked = create_booked_index(4, 30, 60);
            let mut request = create_request((9, 0), (10, 0));
            request.pre = Some(LocationInterval::new(ROOM, interval((8, 45), (9, 0))));
            request.post = Some(LocationInterval::new(ROOM, interval((10, 0), (10, 15))));
            check_availability(
                black_box(&request),
                black_box(&booked),
                black_box(&AvailabilityOptions::default()),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_check_availability);
criterion_main!(benches);

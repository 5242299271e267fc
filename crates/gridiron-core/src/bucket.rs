// Bucketing rules shared by several reports.

/// Spread magnitude buckets, in display order.
pub const SPREAD_BUCKETS: [&str; 4] = ["PK-3", "3-7", "7-10", "10+"];

/// Lead-size buckets, in display order.
pub const LEAD_BUCKETS: [&str; 5] = ["1-3", "4-7", "8-14", "15-21", "22+"];

/// Bucket a line by magnitude. Upper bounds are inclusive: a 3-point line is
/// `PK-3`, a 7-point line is `3-7`, a 10-point line is `7-10`.
pub fn spread_bucket(spread: f64) -> &'static str {
    let magnitude = spread.abs();
    if magnitude <= 3.0 {
        SPREAD_BUCKETS[0]
    } else if magnitude <= 7.0 {
        SPREAD_BUCKETS[1]
    } else if magnitude <= 10.0 {
        SPREAD_BUCKETS[2]
    } else {
        SPREAD_BUCKETS[3]
    }
}

/// Bucket a positive lead. A zero lead has no bucket.
pub fn lead_bucket(lead: u32) -> Option<&'static str> {
    match lead {
        0 => None,
        1..=3 => Some(LEAD_BUCKETS[0]),
        4..=7 => Some(LEAD_BUCKETS[1]),
        8..=14 => Some(LEAD_BUCKETS[2]),
        15..=21 => Some(LEAD_BUCKETS[3]),
        _ => Some(LEAD_BUCKETS[4]),
    }
}

/// Position of a bucket label within its bucket list.
pub fn bucket_index(buckets: &[&str], label: &str) -> Option<usize> {
    buckets.iter().position(|b| *b == label)
}

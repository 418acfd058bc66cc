//! Client-side record ids and dates.
//!
//! Ids carry no uniqueness guarantee: random suffixes and millisecond
//! timestamps can collide.

use chrono::{Datelike, Utc};
use rand::Rng;

fn random_in(low: u32, high: u32) -> u32 {
    rand::thread_rng().gen_range(low..=high)
}

/// `P1000`..`P9999`
pub fn patient_id() -> String {
    format!("P{}", random_in(1000, 9999))
}

/// `D1000`..`D9999`
pub fn doctor_id() -> String {
    format!("D{}", random_in(1000, 9999))
}

/// `A<epoch-ms>`
pub fn appointment_id() -> String {
    format!("A{}", Utc::now().timestamp_millis())
}

/// `INV-<year>-100`..`INV-<year>-999`
pub fn invoice_id() -> String {
    format!("INV-{}-{}", Utc::now().year(), random_in(100, 999))
}

/// `N<epoch-ms>`
pub fn note_id() -> String {
    format!("N{}", Utc::now().timestamp_millis())
}

/// Today's date as `YYYY-MM-DD` (UTC).
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_stay_in_range() {
        for _ in 0..200 {
            let id = patient_id();
            let n: u32 = id[1..].parse().unwrap();
            assert!((1000..=9999).contains(&n));

            let inv = invoice_id();
            let suffix: u32 = inv.rsplit('-').next().unwrap().parse().unwrap();
            assert!((100..=999).contains(&suffix));
        }
        assert!(doctor_id().starts_with('D'));
    }

    #[test]
    fn test_today_format() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_ok());
    }
}

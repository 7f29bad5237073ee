// src/utils/id_generator.rs
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdType {
    Person,
    Driver,
    Ride,
    Payment,
}

impl IdType {
    pub fn to_prefix(&self) -> &'static str {
        match self {
            IdType::Person => "usr",
            IdType::Driver => "drv",
            IdType::Ride => "rid",
            IdType::Payment => "pay",
        }
    }
}

pub struct IdGenerator;

impl IdGenerator {
    /// Generate a unique ID with format: {prefix}-{date}-{random_suffix}
    pub fn generate(id_type: IdType) -> String {
        Self::generate_with_timestamp(id_type, Utc::now())
    }

    /// Generate ID with a specific timestamp (useful for testing)
    pub fn generate_with_timestamp(id_type: IdType, timestamp: DateTime<Utc>) -> String {
        let date_part = timestamp.format("%y%m%d").to_string(); // YYMMDD format
        let random_suffix = Self::generate_random_suffix();

        format!("{}-{}-{}", id_type.to_prefix(), date_part, random_suffix)
    }

    /// Generate the random suffix (5 characters mixing hex and alphanumeric)
    fn generate_random_suffix() -> String {
        if rand::random::<bool>() {
            format!(
                "{}{}",
                Self::generate_hex_chars(3),
                Self::generate_alphanumeric_chars(2)
            )
        } else {
            format!(
                "{}{}",
                Self::generate_alphanumeric_chars(3),
                Self::generate_hex_chars(2)
            )
        }
    }

    /// Generate n hexadecimal characters (0-9, a-f)
    fn generate_hex_chars(n: usize) -> String {
        const HEX_CHARS: &[u8] = b"0123456789abcdef";
        Self::generate_from_chars(HEX_CHARS, n)
    }

    /// Generate n alphanumeric characters (a-z, A-Z, 0-9)
    fn generate_alphanumeric_chars(n: usize) -> String {
        const ALPHANUMERIC_CHARS: &[u8] =
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        Self::generate_from_chars(ALPHANUMERIC_CHARS, n)
    }

    fn generate_from_chars(charset: &[u8], n: usize) -> String {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        (0..n)
            .map(|_| {
                let idx = rng.gen_range(0..charset.len());
                charset[idx] as char
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_generation() {
        let person_id = IdGenerator::generate(IdType::Person);
        assert!(person_id.starts_with("usr-"));
        assert_eq!(person_id.split('-').count(), 3);

        let ride_id = IdGenerator::generate(IdType::Ride);
        assert!(ride_id.starts_with("rid-"));
    }

    #[test]
    fn test_prefix_per_type() {
        assert_eq!(IdType::Person.to_prefix(), "usr");
        assert_eq!(IdType::Driver.to_prefix(), "drv");
        assert_eq!(IdType::Ride.to_prefix(), "rid");
        assert_eq!(IdType::Payment.to_prefix(), "pay");
    }

    #[test]
    fn test_date_part_from_timestamp() {
        let test_date = Utc.with_ymd_and_hms(2025, 12, 7, 0, 0, 0).unwrap();
        let id = IdGenerator::generate_with_timestamp(IdType::Driver, test_date);

        assert_eq!(id.split('-').nth(1), Some("251207"));
    }

    #[test]
    fn test_random_suffix_length() {
        for _ in 0..100 {
            let id = IdGenerator::generate(IdType::Ride);
            let suffix = id.split('-').nth(2).unwrap();
            assert_eq!(suffix.len(), 5);
        }
    }
}

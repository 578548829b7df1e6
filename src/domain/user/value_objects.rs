// src/domain/user/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("user id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("name cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique external handle of a user. Lookups, updates and deletes are keyed on
/// it rather than on [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("nickname cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Nickname> for String {
    fn from(value: Nickname) -> Self {
        value.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative counter stored in an `INTEGER` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Counter(i32);

impl Counter {
    pub fn new(value: i64, field: &str) -> DomainResult<Self> {
        if value < 0 {
            return Err(DomainError::Validation(format!(
                "{field} cannot be negative"
            )));
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::Validation(format!("{field} is too large")))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<Counter> for i32 {
    fn from(value: Counter) -> Self {
        value.0
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `likes / viewers` rounded half away from zero to three decimals, or zero
/// when there are no viewers. Held as thousandths so comparisons are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rating(i64);

impl Rating {
    pub fn derive(likes: Counter, viewers: Counter) -> Self {
        let likes = i64::from(likes.value());
        let viewers = i64::from(viewers.value());
        if viewers == 0 {
            return Self(0);
        }
        Self((likes * 2000 + viewers) / (2 * viewers))
    }

    /// Rebuild from the generated column, read back scaled to thousandths.
    pub const fn from_thousandths(value: i64) -> Self {
        Self(value)
    }

    pub fn thousandths(self) -> i64 {
        self.0
    }

    // Thousandths of an i32 ratio stay well inside f64's 53-bit mantissa.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.as_f64())
    }
}

/// Listing order by rating. The empty token keeps insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Natural,
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(SortOrder::Natural),
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::InvalidSort(format!(
                "unsupported sort '{other}', expected 'asc' or 'desc'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub sort: SortOrder,
    pub limit: u32,
    pub offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(v: i64) -> Counter {
        Counter::new(v, "value").unwrap()
    }

    #[test]
    fn rating_rounds_to_three_decimals() {
        assert_eq!(Rating::derive(counter(3), counter(10)).thousandths(), 300);
        assert_eq!(Rating::derive(counter(1), counter(3)).thousandths(), 333);
        assert_eq!(Rating::derive(counter(2), counter(3)).thousandths(), 667);
        // 1/1600 = 0.000625 -> 0.001
        assert_eq!(Rating::derive(counter(1), counter(1600)).thousandths(), 1);
        assert_eq!(Rating::derive(counter(5), counter(5)).thousandths(), 1000);
    }

    #[test]
    fn rating_is_zero_without_viewers() {
        assert_eq!(Rating::derive(counter(0), counter(0)), Rating::default());
    }

    #[test]
    fn rating_from_stored_matches_derived() {
        let derived = Rating::derive(counter(2), counter(3));
        assert_eq!(Rating::from_thousandths(667), derived);
        assert_eq!(derived.as_f64(), 0.667);
        assert_eq!(derived.to_string(), "0.667");
    }

    #[test]
    fn counter_rejects_negative_and_oversized_values() {
        assert!(matches!(
            Counter::new(-1, "likes"),
            Err(DomainError::Validation(msg)) if msg == "likes cannot be negative"
        ));
        assert!(Counter::new(i64::from(i32::MAX) + 1, "viewers").is_err());
        assert_eq!(counter(0), Counter::default());
    }

    #[test]
    fn names_reject_blank_values() {
        assert!(DisplayName::new("").is_err());
        assert!(Nickname::new("   ").is_err());
        assert_eq!(Nickname::new("ann1").unwrap().as_str(), "ann1");
    }

    #[test]
    fn sort_order_accepts_only_known_tokens() {
        assert_eq!("".parse::<SortOrder>().unwrap(), SortOrder::Natural);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!(matches!(
            "DESC".parse::<SortOrder>(),
            Err(DomainError::InvalidSort(_))
        ));
        assert!(matches!(
            "rating".parse::<SortOrder>(),
            Err(DomainError::InvalidSort(_))
        ));
    }
}

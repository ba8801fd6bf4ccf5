//! Offer Ordering
//!
//! The precedence policy shared by every query that returns more than one offer: highest
//! priority first, then most recently created, then identifier as a final stable key.
//! Storage backends that sort on their own side must mirror this order.

use std::cmp::Ordering;

use jiff::Timestamp;
use uuid::Uuid;

/// Anything that can be ranked by the precedence policy.
pub trait Ranked {
    /// Priority; higher ranks first.
    fn priority(&self) -> u32;

    /// Creation instant; later ranks first among equal priorities.
    fn created_at(&self) -> Timestamp;

    /// Final tie-breaker; greater ranks first.
    fn tie_breaker(&self) -> Uuid;
}

/// Compare two ranked values so that the preferred one sorts first.
pub fn by_precedence<T: Ranked>(a: &T, b: &T) -> Ordering {
    b.priority()
        .cmp(&a.priority())
        .then_with(|| b.created_at().cmp(&a.created_at()))
        .then_with(|| b.tie_breaker().cmp(&a.tie_breaker()))
}

/// Sort ranked values in place, preferred first.
pub fn sort_by_precedence<T: Ranked>(values: &mut [T]) {
    values.sort_by(by_precedence);
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Entry {
        priority: u32,
        created_at: Timestamp,
        uuid: Uuid,
    }

    impl Ranked for Entry {
        fn priority(&self) -> u32 {
            self.priority
        }

        fn created_at(&self) -> Timestamp {
            self.created_at
        }

        fn tie_breaker(&self) -> Uuid {
            self.uuid
        }
    }

    #[test]
    fn higher_priority_sorts_first() -> TestResult {
        let at: Timestamp = "2026-03-01T00:00:00Z".parse()?;

        let low = Entry {
            priority: 1,
            created_at: at + SignedDuration::from_hours(1),
            uuid: Uuid::from_u128(1),
        };

        let high = Entry {
            priority: 5,
            created_at: at,
            uuid: Uuid::from_u128(2),
        };

        let mut entries = vec![low, high];

        sort_by_precedence(&mut entries);

        assert_eq!(entries, vec![high, low]);

        Ok(())
    }

    #[test]
    fn newer_wins_between_equal_priorities() -> TestResult {
        let at: Timestamp = "2026-03-01T00:00:00Z".parse()?;

        let older = Entry {
            priority: 3,
            created_at: at,
            uuid: Uuid::from_u128(9),
        };

        let newer = Entry {
            priority: 3,
            created_at: at + SignedDuration::from_secs(1),
            uuid: Uuid::from_u128(1),
        };

        assert_eq!(by_precedence(&newer, &older), Ordering::Less);
        assert_eq!(by_precedence(&older, &newer), Ordering::Greater);

        Ok(())
    }

    #[test]
    fn identifier_breaks_remaining_ties() -> TestResult {
        let at: Timestamp = "2026-03-01T00:00:00Z".parse()?;

        let a = Entry {
            priority: 0,
            created_at: at,
            uuid: Uuid::from_u128(1),
        };

        let b = Entry {
            uuid: Uuid::from_u128(2),
            ..a
        };

        let mut entries = vec![a, b];

        sort_by_precedence(&mut entries);

        assert_eq!(entries, vec![b, a]);

        Ok(())
    }
}

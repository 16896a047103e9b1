//! Sources of the timestamp and unique token in derived save names.

use chrono::Utc;
use uuid::Uuid;

/// Produces a fresh opaque token on every call.
pub trait TokenSource {
    /// Returns a new token.
    fn next_token(&self) -> String;
}

impl<F> TokenSource for F
where
    F: Fn() -> String,
{
    fn next_token(&self) -> String {
        self()
    }
}

/// Tokens cut from random (v4) UUIDs, as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UuidTokens {
    length: usize,
}

impl UuidTokens {
    /// Tokens of `length` hex characters; at most 32 are available.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for UuidTokens {
    fn default() -> Self {
        Self::new(6)
    }
}

impl TokenSource for UuidTokens {
    fn next_token(&self) -> String {
        Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(self.length)
            .collect()
    }
}

/// Reads the current time as milliseconds since the Unix epoch.
pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> i64;
}

impl<F> Clock for F
where
    F: Fn() -> i64,
{
    fn now_millis(&self) -> i64 {
        self()
    }
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(6)]
    #[case(32)]
    fn uuid_tokens_have_requested_length(#[case] length: usize) {
        let token = UuidTokens::new(length).next_token();
        assert_eq!(token.len(), length);
        assert!(token.chars().all(|character| character.is_ascii_hexdigit()));
    }

    #[rstest]
    fn uuid_tokens_differ_between_calls() {
        let tokens = UuidTokens::new(32);
        assert_ne!(tokens.next_token(), tokens.next_token());
    }

    #[rstest]
    fn closures_are_sources() {
        let token = || "abc123".to_string();
        let clock = || 1_700_000_000_000_i64;
        assert_eq!(token.next_token(), "abc123");
        assert_eq!(clock.now_millis(), 1_700_000_000_000);
    }

    #[rstest]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}

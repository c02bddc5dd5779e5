//! Wall-clock access behind a trait so room timestamps can be pinned in tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Source of "now" in Unix milliseconds (UTC)
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Reads the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Manually driven clock for tests.
///
/// Stays at the same instant until [`FixedClock::advance`] is called.
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(start_millis),
        }
    }

    /// Move the clock forward by `delta_millis`
    pub fn advance(&self, delta_millis: i64) {
        self.millis.fetch_add(delta_millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Current Unix timestamp in UTC (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render Unix milliseconds as an RFC 3339 string in UTC.
///
/// Out-of-range timestamps fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or_default()
        .to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_close_to_chrono_now() {
        // テスト項目: SystemClock の値が chrono の現在時刻と 1 秒以内で一致する
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let before = Utc::now().timestamp_millis();
        let now = clock.now_millis();
        let after = Utc::now().timestamp_millis();

        // then (期待する結果):
        assert!(before <= now && now <= after + 1000);
    }

    #[test]
    fn test_fixed_clock_only_moves_when_advanced() {
        // テスト項目: FixedClock は advance を呼ぶまで同じ時刻を返し、呼ぶと進む
        // given (前提条件):
        let clock = FixedClock::new(1_000);
        assert_eq!(clock.now_millis(), 1_000);
        assert_eq!(clock.now_millis(), 1_000);

        // when (操作):
        clock.advance(250);

        // then (期待する結果):
        assert_eq!(clock.now_millis(), 1_250);
    }

    #[test]
    fn test_timestamp_to_rfc3339_is_utc_with_millis() {
        // テスト項目: ミリ秒付きのタイムスタンプが UTC の RFC 3339 文字列になる
        // given (前提条件): 2023-01-01 00:00:00.123 UTC
        let timestamp = 1_672_531_200_123;

        // when (操作):
        let result = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(result, "2023-01-01T00:00:00.123+00:00");
    }

    #[test]
    fn test_timestamp_to_rfc3339_out_of_range_falls_back_to_epoch() {
        // テスト項目: 表現できないタイムスタンプは UNIX エポックになる
        // given (前提条件):
        let timestamp = i64::MAX;

        // when (操作):
        let result = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert!(result.starts_with("1970-01-01T00:00:00"));
    }
}

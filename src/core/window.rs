//! Date window resolution
//!
//! Turns the `date_ranges` policy into concrete [`DateWindow`]s for a given
//! "today". Manual overrides replace the computed pair for their window
//! entirely; otherwise each bound is `today + offset`.

use crate::config::DateRangesConfig;
use crate::domain::{DateWindow, FeedError, Result, WindowName};
use chrono::{Duration, NaiveDate};

/// Resolves the `history` and `onhand` windows
#[derive(Debug, Clone)]
pub struct DateRangeResolver {
    config: DateRangesConfig,
}

impl DateRangeResolver {
    pub fn new(config: DateRangesConfig) -> Self {
        Self { config }
    }

    /// Resolves one window relative to `today`
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Configuration` for a partial manual override,
    /// a reversed range, or a date out of range.
    pub fn resolve(&self, window: WindowName, today: NaiveDate) -> Result<DateWindow> {
        if let Some(manual) = self.config.manual(window) {
            let (Some(start), Some(end)) = (manual.start, manual.end) else {
                return Err(FeedError::Configuration(format!(
                    "date_ranges.manual.{window} must set both start and end"
                )));
            };
            tracing::debug!(window = %window, "Using manual date override");
            return DateWindow::new(window, start, end);
        }

        let (start_offset, end_offset) = self.config.offsets(window);
        let start = shift(today, start_offset)?;
        let end = shift(today, end_offset)?;
        DateWindow::new(window, start, end)
    }

    /// Resolves both windows in export order
    pub fn resolve_all(&self, today: NaiveDate) -> Result<Vec<DateWindow>> {
        WindowName::ALL
            .iter()
            .map(|window| self.resolve(*window, today))
            .collect()
    }
}

fn shift(today: NaiveDate, days: i64) -> Result<NaiveDate> {
    Duration::try_days(days)
        .and_then(|delta| today.checked_add_signed(delta))
        .ok_or_else(|| {
            FeedError::Configuration(format!("Offset of {days} days from {today} is out of range"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ManualRangeConfig, OffsetConfig};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_windows_for_fixed_today() {
        let resolver = DateRangeResolver::new(DateRangesConfig::default());
        let today = date(2024, 1, 10);

        let history = resolver.resolve(WindowName::History, today).unwrap();
        assert_eq!(history.start(), date(2024, 1, 8));
        assert_eq!(history.end(), date(2024, 1, 8));

        let onhand = resolver.resolve(WindowName::Onhand, today).unwrap();
        assert_eq!(onhand.start(), date(2024, 1, 9));
        assert_eq!(onhand.end(), date(2024, 7, 6));
    }

    #[test]
    fn test_manual_override_replaces_defaults() {
        let mut config = DateRangesConfig::default();
        config.manual.history = Some(ManualRangeConfig {
            start: Some(date(2023, 12, 1)),
            end: Some(date(2023, 12, 31)),
        });
        let resolver = DateRangeResolver::new(config);
        let today = date(2024, 1, 10);

        let history = resolver.resolve(WindowName::History, today).unwrap();
        assert_eq!(history.start(), date(2023, 12, 1));
        assert_eq!(history.end(), date(2023, 12, 31));

        // The other window still uses its offsets
        let onhand = resolver.resolve(WindowName::Onhand, today).unwrap();
        assert_eq!(onhand.start(), date(2024, 1, 9));
    }

    #[test]
    fn test_manual_override_ignores_offsets() {
        let mut config = DateRangesConfig::default();
        config.onhand = OffsetConfig {
            start_offset_days: Some(-100),
            end_offset_days: Some(100),
        };
        config.manual.onhand = Some(ManualRangeConfig {
            start: Some(date(2024, 5, 1)),
            end: Some(date(2024, 5, 2)),
        });
        let resolver = DateRangeResolver::new(config);

        let onhand = resolver.resolve(WindowName::Onhand, date(2024, 1, 10)).unwrap();
        assert_eq!(onhand.start(), date(2024, 5, 1));
        assert_eq!(onhand.end(), date(2024, 5, 2));
    }

    #[test]
    fn test_reversed_manual_override_fails() {
        let mut config = DateRangesConfig::default();
        config.manual.history = Some(ManualRangeConfig {
            start: Some(date(2024, 2, 1)),
            end: Some(date(2024, 1, 1)),
        });
        let resolver = DateRangeResolver::new(config);

        let result = resolver.resolve(WindowName::History, date(2024, 1, 10));
        assert!(matches!(result, Err(FeedError::Configuration(_))));
    }

    #[test]
    fn test_partial_manual_override_fails() {
        let mut config = DateRangesConfig::default();
        config.manual.onhand = Some(ManualRangeConfig {
            start: None,
            end: Some(date(2024, 1, 1)),
        });
        let resolver = DateRangeResolver::new(config);

        assert!(resolver.resolve(WindowName::Onhand, date(2024, 1, 10)).is_err());
    }

    #[test]
    fn test_windows_are_ordered_for_many_offsets() {
        let today = date(2024, 2, 29);
        for start in -30..=5 {
            for end in start..=start + 200 {
                let config = DateRangesConfig {
                    history: OffsetConfig {
                        start_offset_days: Some(start),
                        end_offset_days: Some(end),
                    },
                    ..Default::default()
                };
                let resolver = DateRangeResolver::new(config);
                for window in resolver.resolve_all(today).unwrap() {
                    assert!(window.start() <= window.end());
                }
            }
        }
    }

    #[test]
    fn test_resolve_all_order() {
        let resolver = DateRangeResolver::new(DateRangesConfig::default());
        let windows = resolver.resolve_all(date(2024, 1, 10)).unwrap();
        let names: Vec<WindowName> = windows.iter().map(|w| w.name()).collect();
        assert_eq!(names, vec![WindowName::History, WindowName::Onhand]);
    }
}

//! Validation for the layout and readiness sections.

use crate::schema::TabSplitConfig;

use super::helpers::{validate_at_least, validate_range};

pub(crate) fn validate_layout(errors: &mut Vec<String>, config: &TabSplitConfig) {
    let layout = &config.layout;
    validate_range(errors, "layout.overlap", layout.overlap.into(), 0, 64);
    validate_range(errors, "layout.min_width", layout.min_width.into(), 1, 10_000);
    validate_range(errors, "layout.min_height", layout.min_height.into(), 1, 10_000);
    validate_at_least(
        errors,
        "layout.fallback_width",
        layout.fallback_width.into(),
        layout.min_width.into(),
    );
    validate_at_least(
        errors,
        "layout.fallback_height",
        layout.fallback_height.into(),
        layout.min_height.into(),
    );
}

pub(crate) fn validate_readiness(errors: &mut Vec<String>, config: &TabSplitConfig) {
    let readiness = &config.readiness;
    let interval = i64::try_from(readiness.poll_interval_ms).unwrap_or(i64::MAX);
    let timeout = i64::try_from(readiness.timeout_ms).unwrap_or(i64::MAX);
    validate_range(errors, "readiness.poll_interval_ms", interval, 10, 5_000);
    validate_range(errors, "readiness.timeout_ms", timeout, interval, 60_000);
}

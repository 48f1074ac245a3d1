//! Risk scoring over a record's signals

use scrub_core::SignalSet;

use crate::classifier::Classification;

/// Indirect indicators needed to flag a record with no direct identifier
pub const PII_SCORE_THRESHOLD: u8 = 2;

/// Number of indirect indicators present, each counted once
pub fn score(signals: &SignalSet) -> u8 {
    [
        signals.identity(),
        signals.email(),
        signals.address(),
        signals.device_or_network(),
    ]
    .into_iter()
    .map(u8::from)
    .sum()
}

pub fn is_pii(classification: &Classification) -> bool {
    classification.direct || score(&classification.signals) >= PII_SCORE_THRESHOLD
}

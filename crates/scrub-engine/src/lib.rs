//! Row pipeline: normalize each payload, scan it, write the redacted JSON back out

use std::collections::BTreeMap;
use std::io;

use scrub_core::{Category, Record, Verdict};
use scrub_security::Scanner;
use scrub_sources::{PayloadNormalizer, RowInput, RowOutput};
use serde::Serialize;
use serde_json::ser::Formatter;

/// Counts for one run, for the operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub flagged: usize,
    /// Flagged rows that carried a direct identifier
    pub direct: usize,
    /// Rows whose payload no parser accepted
    pub unparsed: usize,
    pub redactions: BTreeMap<Category, usize>,
}

impl RunSummary {
    fn record(&mut self, parsed: bool, verdict: &Verdict) {
        self.rows += 1;
        if !parsed {
            self.unparsed += 1;
        }
        if verdict.is_pii {
            self.flagged += 1;
            if verdict.direct {
                self.direct += 1;
            }
        }
        for info in &verdict.redactions {
            *self.redactions.entry(info.rule.category()).or_default() += 1;
        }
    }
}

/// Runs rows through normalize, scan and re-serialize
pub struct Engine {
    normalizer: PayloadNormalizer,
    scanner: Scanner,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            normalizer: PayloadNormalizer::new(),
            scanner: Scanner::new(),
        }
    }

    /// Scan a raw payload; unparseable text scans as an empty record
    pub fn scan_payload(&self, payload: &str) -> Verdict {
        self.scanner.scan(&self.normalizer.normalize(payload))
    }

    fn process(&self, row: &RowInput) -> (RowOutput, bool, Verdict) {
        let _span = tracing::debug_span!("row", id = %row.record_id).entered();

        let parsed = self.normalizer.try_normalize(&row.payload);
        let is_parsed = parsed.is_some();
        let record = parsed.unwrap_or_default();
        let verdict = self.scanner.scan(&record);

        tracing::debug!(
            is_pii = verdict.is_pii,
            direct = verdict.direct,
            score = verdict.score,
            redactions = verdict.redactions.len(),
            "scanned"
        );

        let output = RowOutput {
            record_id: row.record_id.clone(),
            redacted_data_json: serialize(&verdict.redacted),
            is_pii: verdict.is_pii,
        };
        (output, is_parsed, verdict)
    }

    pub fn process_row(&self, row: &RowInput) -> RowOutput {
        self.process(row).0
    }

    /// Process rows in order and tally the run
    pub fn process_rows<I>(&self, rows: I) -> (Vec<RowOutput>, RunSummary)
    where
        I: IntoIterator<Item = RowInput>,
    {
        let mut summary = RunSummary::default();
        let outputs = rows
            .into_iter()
            .map(|row| {
                let (output, parsed, verdict) = self.process(&row);
                summary.record(parsed, &verdict);
                output
            })
            .collect();

        tracing::info!(
            rows = summary.rows,
            flagged = summary.flagged,
            unparsed = summary.unparsed,
            "run complete"
        );
        (outputs, summary)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-line JSON with `", "` and `": "` separators; non-ASCII is written as-is
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn to_spaced_json(record: &Record) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
    record.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn serialize(record: &Record) -> String {
    match to_spaced_json(record) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize record");
            "{}".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, payload: &str) -> RowInput {
        RowInput {
            record_id: id.to_string(),
            payload: payload.to_string(),
        }
    }

    #[test]
    fn test_process_row_redacts() {
        let engine = Engine::new();
        let out = engine.process_row(&row("1", r#"{"phone": "9876543210", "note": "ok"}"#));

        assert_eq!(out.record_id, "1");
        assert!(out.is_pii);
        assert_eq!(out.redacted_data_json, r#"{"phone": "98XXXXXX10", "note": "ok"}"#);
    }

    #[test]
    fn test_process_row_passes_through() {
        let engine = Engine::new();
        let out = engine.process_row(&row("2", r#"{"product": "Desk", "qty": 2}"#));

        assert!(!out.is_pii);
        assert_eq!(out.redacted_data_json, r#"{"product": "Desk", "qty": 2}"#);
    }

    #[test]
    fn test_unparseable_payload() {
        let engine = Engine::new();
        let (outputs, summary) = engine.process_rows(vec![row("3", "{oops"), row("4", "")]);

        assert_eq!(outputs[0].redacted_data_json, "{}");
        assert!(!outputs[0].is_pii);
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.unparsed, 1);
    }

    #[test]
    fn test_non_ascii_kept() {
        let engine = Engine::new();
        let out = engine.process_row(&row("5", r#"{"city": "Zürich"}"#));
        assert_eq!(out.redacted_data_json, r#"{"city": "Zürich"}"#);
    }

    #[test]
    fn test_nested_values_use_spaced_separators() {
        let engine = Engine::new();
        let payload = r#"{"tags": ["a", "b"], "meta": {"k": null}, "e": {}}"#;
        let out = engine.process_row(&row("6", payload));
        assert_eq!(out.redacted_data_json, payload);
    }

    #[test]
    fn test_deeply_nested_payload_is_empty() {
        let engine = Engine::new();
        let payload = format!("{{'a': {}", "[".repeat(20_000));
        let (outputs, summary) = engine.process_rows(vec![row("7", &payload)]);

        assert_eq!(outputs[0].redacted_data_json, "{}");
        assert!(!outputs[0].is_pii);
        assert_eq!(summary.unparsed, 1);
    }

    #[test]
    fn test_summary_counts() {
        let engine = Engine::new();
        let (outputs, summary) = engine.process_rows(vec![
            row("1", r#"{"phone": "9876543210"}"#),
            row("2", r#"{"name": "John Smith", "email": "john.smith@example.com"}"#),
            row("3", r#"{"email": "john.smith@example.com"}"#),
        ]);

        let ids: Vec<_> = outputs.iter().map(|o| o.record_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(summary.flagged, 2);
        assert_eq!(summary.direct, 1);
        assert_eq!(summary.redactions.get(&Category::Phone), Some(&1));
        assert_eq!(summary.redactions.get(&Category::FullName), Some(&1));
        assert_eq!(summary.redactions.get(&Category::Email), Some(&1));
    }

    #[test]
    fn test_scan_payload() {
        let verdict = Engine::new().scan_payload("{'upi_id': 'ab12@upi'}");
        assert!(verdict.is_pii);
        assert_eq!(verdict.redacted["upi_id"], "ab****@upi");
    }
}

//! CSV rows in, CSV rows out

use scrub_core::{Error, Result};

pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

/// Which columns hold the record id and the payload
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub id_column: String,
    /// Accepted payload column names, in order of preference
    pub payload_columns: Vec<String>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            id_column: "record_id".to_string(),
            payload_columns: vec!["Data_json".to_string(), "data_json".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowInput {
    pub record_id: String,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutput {
    pub record_id: String,
    pub redacted_data_json: String,
    pub is_pii: bool,
}

impl RowOutput {
    pub fn verdict_text(&self) -> &'static str {
        if self.is_pii { "True" } else { "False" }
    }
}

/// Read every row of a CSV document.
///
/// The payload is taken from the first payload column with a non-empty cell.
/// Fails only if the header has none of the payload columns.
pub fn read_rows(data: &[u8], layout: &TableLayout) -> Result<Vec<RowInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let id_index = position(layout.id_column.as_str());
    let payload_indices: Vec<usize> = layout
        .payload_columns
        .iter()
        .filter_map(|c| position(c.as_str()))
        .collect();

    if payload_indices.is_empty() {
        return Err(Error::MissingColumn(layout.payload_columns.clone()));
    }
    if id_index.is_none() {
        tracing::warn!(column = %layout.id_column, "id column missing, record ids will be empty");
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let record_id = id_index
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_string();
        let payload = payload_indices
            .iter()
            .filter_map(|i| record.get(*i))
            .find(|cell| !cell.is_empty())
            .unwrap_or_default()
            .to_string();

        rows.push(RowInput { record_id, payload });
    }

    Ok(rows)
}

/// Write rows under the fixed output header
pub fn write_rows(rows: &[RowOutput]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(OUTPUT_HEADER)?;

    for row in rows {
        writer.write_record([
            row.record_id.as_str(),
            row.redacted_data_json.as_str(),
            row.verdict_text(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows() {
        let csv = "record_id,Data_json\n1,\"{\"\"phone\"\": \"\"9876543210\"\"}\"\n2,{}\n";
        let rows = read_rows(csv.as_bytes(), &TableLayout::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record_id, "1");
        assert_eq!(rows[0].payload, r#"{"phone": "9876543210"}"#);
        assert_eq!(rows[1].payload, "{}");
    }

    #[test]
    fn test_payload_column_alias() {
        let csv = "data_json,record_id\n\"{'a': 1}\",7\n";
        let rows = read_rows(csv.as_bytes(), &TableLayout::default()).unwrap();

        assert_eq!(rows[0].record_id, "7");
        assert_eq!(rows[0].payload, "{'a': 1}");
    }

    #[test]
    fn test_first_non_empty_payload_column() {
        let csv = "record_id,Data_json,data_json\n1,,\"{}\"\n";
        let rows = read_rows(csv.as_bytes(), &TableLayout::default()).unwrap();
        assert_eq!(rows[0].payload, "{}");
    }

    #[test]
    fn test_missing_payload_column() {
        let csv = "record_id,payload\n1,{}\n";
        let err = read_rows(csv.as_bytes(), &TableLayout::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(_)));
    }

    #[test]
    fn test_short_rows_and_missing_id() {
        let csv = "Data_json,extra\n\"{}\"\n";
        let rows = read_rows(csv.as_bytes(), &TableLayout::default()).unwrap();
        assert_eq!(rows[0].record_id, "");
        assert_eq!(rows[0].payload, "{}");
    }

    #[test]
    fn test_write_rows() {
        let rows = vec![
            RowOutput {
                record_id: "1".to_string(),
                redacted_data_json: r#"{"phone": "98XXXXXX10"}"#.to_string(),
                is_pii: true,
            },
            RowOutput {
                record_id: "2".to_string(),
                redacted_data_json: "{}".to_string(),
                is_pii: false,
            },
        ];

        let out = String::from_utf8(write_rows(&rows).unwrap()).unwrap();
        assert_eq!(
            out,
            "record_id,redacted_data_json,is_pii\n1,\"{\"\"phone\"\": \"\"98XXXXXX10\"\"}\",True\n2,{},False\n"
        );
    }
}

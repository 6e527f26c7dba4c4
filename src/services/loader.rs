//! Table loading service
//!
//! Builds the table model from a data file. JSON and YAML documents can
//! carry structural markers on cells; CSV files are text only.

use crate::error::GuideError;
use crate::model::table::{Cell, Marker, Row, Table};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// The guide shipped with the binary
const DEFAULT_GUIDE: &str = include_str!("../../data/guia_lenhador.json");

/// Supported data file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Csv,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Option<DataFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DataFormat::Json),
            "yaml" | "yml" => Some(DataFormat::Yaml),
            "csv" => Some(DataFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    #[serde(default)]
    title: Option<String>,
    headers: Vec<String>,
    #[serde(default)]
    rows: Option<Vec<Vec<CellValue>>>,
}

/// A cell as written in a document: plain text, a bare number, or text
/// with markers
///
/// Numeric cells use Brazilian formatting ("3.000", "15,00") and must be
/// written as strings. Bare integers are accepted as-is; bare decimals are
/// rejected because the parser has already lost how they were written
/// (YAML reads `3.000` as three).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Rich {
        #[serde(default)]
        text: String,
        #[serde(default)]
        markers: Vec<Marker>,
    },
}

impl CellValue {
    fn into_cell(self, source: &str) -> Result<Cell, GuideError> {
        match self {
            CellValue::Text(text) => Ok(Cell::text(text)),
            CellValue::Integer(n) => Ok(Cell::text(n.to_string())),
            CellValue::Decimal(n) => Err(load_error(
                source,
                format!(
                    "bare decimal {} is ambiguous, quote it (\"3.000\", \"1,5\")",
                    n
                ),
            )),
            CellValue::Rich { text, markers } => Ok(Cell { text, markers }),
        }
    }
}

impl TableDocument {
    fn into_table(self, source: &str) -> Result<Table, GuideError> {
        let body = match self.rows {
            Some(rows) => {
                let mut body = Vec::with_capacity(rows.len());
                for cells in rows {
                    let cells = cells
                        .into_iter()
                        .map(|cell| cell.into_cell(source))
                        .collect::<Result<Vec<_>, _>>()?;
                    body.push(Row::new(cells));
                }
                Some(body)
            }
            None => None,
        };
        Ok(Table {
            title: self.title,
            headers: self.headers,
            body,
            visible_rows: None,
        })
    }
}

fn load_error(path: &str, reason: impl ToString) -> GuideError {
    GuideError::Load {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

pub fn parse_json(source: &str, contents: &str) -> Result<Table, GuideError> {
    let doc: TableDocument = serde_json::from_str(contents).map_err(|e| load_error(source, e))?;
    doc.into_table(source)
}

pub fn parse_yaml(source: &str, contents: &str) -> Result<Table, GuideError> {
    let doc: TableDocument = serde_yaml::from_str(contents).map_err(|e| load_error(source, e))?;
    doc.into_table(source)
}

/// First record is the header row; short records are kept as they are
pub fn parse_csv(source: &str, contents: &str) -> Result<Table, GuideError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| load_error(source, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(load_error(source, "no header row"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| load_error(source, e))?;
        rows.push(Row::new(record.iter().map(Cell::text).collect()));
    }

    Ok(Table::new(headers, rows))
}

/// Load a table from a file, choosing the parser by extension
pub fn load_table(path: &Path) -> Result<Table, GuideError> {
    let source = path.display().to_string();
    let format = DataFormat::from_path(path)
        .ok_or_else(|| load_error(&source, "unsupported file type (use .json, .yaml or .csv)"))?;
    let contents = fs::read_to_string(path).map_err(|e| load_error(&source, e))?;

    let table = match format {
        DataFormat::Json => parse_json(&source, &contents)?,
        DataFormat::Yaml => parse_yaml(&source, &contents)?,
        DataFormat::Csv => parse_csv(&source, &contents)?,
    };

    info!(path = %source, rows = table.row_count(), "loaded table");
    Ok(table)
}

/// The bundled guide
pub fn default_table() -> Result<Table, GuideError> {
    parse_json("<built-in guide>", DEFAULT_GUIDE)
}

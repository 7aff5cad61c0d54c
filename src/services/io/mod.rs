//! Import and export of the projects table.
//!
//! Imports accept CSV or JSON (an array of flat records). When the source
//! uses different column names, a mapping from our column name to the
//! source column name can be supplied. Each imported project gets one
//! primary segment covering its span.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::models::project::{Progress, Project};
use crate::models::segment::Segment;
use crate::utils::date::parse_flexible_date;

/// Columns every imported table must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "name",
    "client",
    "site",
    "work_type",
    "owner",
    "progress",
    "start_date",
    "end_date",
];

const UTF8_BOM: &str = "\u{feff}";

/// Our column name -> the source file's column name.
pub type ColumnMapping = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow!("File has no extension: {}", path.display()))?;
        ext.parse()
    }
}

impl FromStr for FileFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" | "txt" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            other => Err(anyhow!("Unsupported format: {}", other)),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Csv => f.write_str("csv"),
            FileFormat::Json => f.write_str("json"),
        }
    }
}

/// Tables produced by an import, ready for `apply_mutation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub projects: Vec<Project>,
    pub segments: Vec<Segment>,
    /// Rows dropped because a date or progress value could not be read
    pub skipped: usize,
}

/// A table of string cells keyed by source column name.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

pub fn import_file(path: &Path, mapping: Option<&ColumnMapping>) -> Result<ImportResult> {
    let format = FileFormat::from_path(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    import_bytes(&bytes, format, mapping)
}

pub fn import_bytes(
    bytes: &[u8],
    format: FileFormat,
    mapping: Option<&ColumnMapping>,
) -> Result<ImportResult> {
    let table = match format {
        FileFormat::Csv => read_csv_table(bytes)?,
        FileFormat::Json => read_json_table(bytes)?,
    };
    build_tables(table, mapping)
}

/// Required columns the file lacks, after applying `mapping`.
pub fn missing_columns(headers: &[String], mapping: Option<&ColumnMapping>) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == source_column(column, mapping)))
        .collect()
}

/// Build a mapping from `target=source` pairs, as given on the command line.
pub fn parse_column_mapping<S: AsRef<str>>(pairs: &[S]) -> Result<ColumnMapping> {
    let mut mapping = ColumnMapping::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (target, source) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected target=source, got '{}'", pair))?;
        let (target, source) = (target.trim(), source.trim());
        if !REQUIRED_COLUMNS.contains(&target) && target != "note" && target != "color" {
            bail!("Unknown target column '{}'", target);
        }
        if source.is_empty() {
            bail!("Missing source column for '{}'", target);
        }
        mapping.insert(target.to_string(), source.to_string());
    }
    Ok(mapping)
}

fn source_column<'a>(column: &'a str, mapping: Option<&'a ColumnMapping>) -> &'a str {
    mapping
        .and_then(|m| m.get(column))
        .map(String::as_str)
        .unwrap_or(column)
}

fn read_csv_table(bytes: &[u8]) -> Result<RawTable> {
    let text = std::str::from_utf8(bytes).context("CSV file is not valid UTF-8")?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", i + 2))?;
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

fn read_json_table(bytes: &[u8]) -> Result<RawTable> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_slice(bytes).context("JSON import must be an array of objects")?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let mut row = HashMap::new();
        for (key, value) in record {
            if !headers.contains(&key) {
                headers.push(key.clone());
            }
            let cell = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            row.insert(key, cell);
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

fn build_tables(table: RawTable, mapping: Option<&ColumnMapping>) -> Result<ImportResult> {
    // An empty JSON array has no keys to check, like a header-only CSV has no rows
    if table.headers.is_empty() && table.rows.is_empty() {
        log::info!("Imported an empty table");
        return Ok(ImportResult {
            projects: Vec::new(),
            segments: Vec::new(),
            skipped: 0,
        });
    }

    let missing = missing_columns(&table.headers, mapping);
    if !missing.is_empty() {
        bail!("Missing required columns: {}", missing.join(", "));
    }

    let cell = |row: &HashMap<String, String>, column: &str| -> String {
        row.get(source_column(column, mapping))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let mut projects = Vec::new();
    let mut skipped = 0usize;

    for (i, row) in table.rows.iter().enumerate() {
        let line = i + 2;
        let start = match parse_flexible_date(&cell(row, "start_date")) {
            Some(d) => d,
            None => {
                log::warn!("Skipping row {}: invalid start date '{}'", line, cell(row, "start_date"));
                skipped += 1;
                continue;
            }
        };
        let end = match parse_flexible_date(&cell(row, "end_date")) {
            Some(d) => d,
            None => {
                log::warn!("Skipping row {}: invalid end date '{}'", line, cell(row, "end_date"));
                skipped += 1;
                continue;
            }
        };
        let progress = match cell(row, "progress").parse::<Progress>() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Skipping row {}: {}", line, e);
                skipped += 1;
                continue;
            }
        };

        let optional = |column: &str| Some(cell(row, column)).filter(|v| !v.is_empty());

        let project = Project {
            id: projects.len().to_string(),
            name: cell(row, "name"),
            client: cell(row, "client"),
            site: cell(row, "site"),
            work_type: cell(row, "work_type"),
            owner: cell(row, "owner"),
            progress,
            start_date: start,
            end_date: end,
            note: optional("note"),
            color: optional("color"),
        };
        if let Err(e) = project.validate() {
            log::warn!("Skipping row {}: {}", line, e);
            skipped += 1;
            continue;
        }
        projects.push(project);
    }

    if projects.is_empty() && skipped > 0 {
        bail!("No valid projects found ({} rows skipped)", skipped);
    }

    let segments = projects.iter().map(Segment::primary_for).collect();
    log::info!("Imported {} project(s), {} row(s) skipped", projects.len(), skipped);

    Ok(ImportResult {
        projects,
        segments,
        skipped,
    })
}

/// Serialize the projects table. CSV output starts with a UTF-8 BOM so
/// spreadsheet tools pick the right encoding.
pub fn export_projects(projects: &[Project], format: FileFormat) -> Result<Vec<u8>> {
    match format {
        FileFormat::Csv => {
            let mut buffer = UTF8_BOM.as_bytes().to_vec();
            {
                let mut writer = csv::Writer::from_writer(&mut buffer);
                for project in projects {
                    writer
                        .serialize(project)
                        .with_context(|| format!("Failed to write project '{}'", project.name))?;
                }
                writer.flush().context("Failed to flush CSV")?;
            }
            Ok(buffer)
        }
        FileFormat::Json => {
            serde_json::to_vec_pretty(projects).context("Failed to serialize projects as JSON")
        }
    }
}

pub fn export_projects_to_file(projects: &[Project], path: &Path) -> Result<usize> {
    let format = FileFormat::from_path(path)?;
    let bytes = export_projects(projects, format)?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(projects.len())
}

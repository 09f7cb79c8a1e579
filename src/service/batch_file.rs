//! Parser for the fixed-width TXT batch file.
//!
//! ```text
//! DESAFIO-HYPERATIVA           20180524LOTE0001000010   <- header, 51 chars
//! C1     4456897922969999                              <- card lines
//! C2     4456897999999999
//! LOTE0001000002                                       <- footer
//! ```
//!
//! Header columns: name `[0,29)`, date `[29,37)`, lot `[37,45)`, count `[45,51)`.
//! Card columns: identifier `[0,7)`, number `[7,26)`.
//! Footer columns: lot `[0,8)`, count `[8,14)`.

use axum::body::Bytes;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::VaultError;

const FOOTER_WORD: &str = "LOTE";
const HEADER_LENGTH: usize = 51;
const CARD_NUMBER_START: usize = 7;
const CARD_NUMBER_END: usize = 26;
const CONTENT_TYPE: &str = "text/plain";

/// A file received through the multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchHeader {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub lot: String,
    pub declared_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchFooter {
    pub lot: String,
    pub declared_count: Option<u32>,
}

/// One card line; `card_number` is trimmed but not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub line: usize,
    pub identifier: String,
    pub card_number: String,
}

#[derive(Debug, Clone)]
pub struct ParsedBatch {
    pub header: BatchHeader,
    pub entries: Vec<BatchEntry>,
    pub footer: Option<BatchFooter>,
    pub skipped_lines: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchFileParser {
    max_size: u64,
}

impl BatchFileParser {
    pub fn new(max_size: u64) -> Self {
        Self { max_size }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn parse(&self, file: &UploadedFile) -> Result<ParsedBatch, VaultError> {
        self.validate_file(file)?;

        let text = String::from_utf8_lossy(&file.bytes);
        let mut lines = text.lines();
        let mut line_number = 1;

        let header = match lines.next() {
            Some(h) if h.chars().count() >= HEADER_LENGTH => parse_header(h),
            other => {
                let got = other.map(|h| h.chars().count()).unwrap_or(0);
                return Err(VaultError::FileUpload(format!(
                    "Invalid file format: header at line {line_number} is missing or too short (expected {HEADER_LENGTH} chars, got {got})"
                )));
            }
        };

        let mut entries = Vec::new();
        let mut footer = None;
        let mut skipped_lines = 0;

        for line in lines {
            line_number += 1;

            if line.starts_with(FOOTER_WORD) {
                info!("Footer found at line {line_number}, stopping processing");
                footer = Some(parse_footer(line));
                break;
            }

            let card_number = columns(line, CARD_NUMBER_START, CARD_NUMBER_END);
            let card_number = card_number.trim();
            if card_number.is_empty() {
                warn!(
                    "Line {line_number} has no card number (length: {}), skipping",
                    line.chars().count()
                );
                skipped_lines += 1;
                continue;
            }

            entries.push(BatchEntry {
                line: line_number,
                identifier: columns(line, 0, CARD_NUMBER_START).trim().to_string(),
                card_number: card_number.to_string(),
            });
        }

        info!(
            "File processing completed: {} card entries, {} skipped lines from {} total lines",
            entries.len(),
            skipped_lines,
            line_number
        );

        if let Some(declared) = footer.as_ref().and_then(|f| f.declared_count)
            && declared as usize != entries.len()
        {
            warn!(
                declared,
                parsed = entries.len(),
                "footer record count does not match parsed card lines"
            );
        }

        if entries.is_empty() {
            return Err(VaultError::FileUpload(
                "No valid card numbers found in file".to_string(),
            ));
        }

        Ok(ParsedBatch {
            header,
            entries,
            footer,
            skipped_lines,
        })
    }

    fn validate_file(&self, file: &UploadedFile) -> Result<(), VaultError> {
        if file.bytes.is_empty() {
            return Err(VaultError::FileUpload("File is empty or null".to_string()));
        }

        let size = file.bytes.len() as u64;
        if size > self.max_size {
            return Err(VaultError::FileUpload(format!(
                "File size ({size} bytes) exceeds maximum allowed size ({} bytes)",
                self.max_size
            )));
        }

        if let Some(ct) = file.content_type.as_deref()
            && ct != CONTENT_TYPE
            && !ct.contains("text")
        {
            warn!("File content type '{ct}' is not text/plain, but will attempt to process");
        }

        if let Some(name) = file.file_name.as_deref()
            && !name.to_lowercase().ends_with(".txt")
        {
            warn!("File extension is not .txt: {name}");
        }

        Ok(())
    }
}

/// Characters `[start, end)` of a fixed-width line, clipped to its length.
fn columns(line: &str, start: usize, end: usize) -> String {
    line.chars().skip(start).take(end.saturating_sub(start)).collect()
}

fn parse_header(line: &str) -> BatchHeader {
    let name = columns(line, 0, 29).trim().to_string();
    let raw_date = columns(line, 29, 37);
    let lot = columns(line, 37, 45);
    let raw_count = columns(line, 45, 51);

    let date = NaiveDate::parse_from_str(&raw_date, "%Y%m%d")
        .inspect_err(|e| warn!(raw = %raw_date, error = %e, "unparseable header date"))
        .ok();
    let declared_count = raw_count
        .trim()
        .parse::<u32>()
        .inspect_err(|e| warn!(raw = %raw_count, error = %e, "unparseable header record count"))
        .ok();

    BatchHeader {
        name,
        date,
        lot,
        declared_count,
    }
}

fn parse_footer(line: &str) -> BatchFooter {
    BatchFooter {
        lot: columns(line, 0, 8),
        declared_count: columns(line, 8, 14).trim().parse::<u32>().ok(),
    }
}

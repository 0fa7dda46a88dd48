//! Read Planner tasks from an XLSX file
//!
//! Import sheets have no header row and a fixed five-column layout:
//! title, percent complete, priority, order hint, description. Reading
//! starts at the first used row of the first worksheet and ends at the
//! first fully empty row. Rows that do not decode are skipped without
//! notice so that one bad row never aborts a bulk import.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, XlsxError};

use crate::api::models::{PlannerTask, PlannerTaskDetails};

/// Column indices of an import sheet
mod cols {
    pub const TITLE: u32 = 0;
    pub const PERCENT_COMPLETE: u32 = 1;
    pub const PRIORITY: u32 = 2;
    pub const ORDER_HINT: u32 = 3;
    pub const DESCRIPTION: u32 = 4;
}

/// Why a spreadsheet could not be opened
#[derive(Debug)]
pub enum OpenError {
    /// The byte source could not be read at all
    InvalidInput(io::Error),
    /// The bytes do not form a readable XLSX document
    InvalidDocument(XlsxError),
    /// The document contains no worksheets
    EmptyWorkbook,
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenError::InvalidInput(err) => write!(f, "failed to read input: {}", err),
            OpenError::InvalidDocument(err) => write!(f, "not a valid XLSX document: {}", err),
            OpenError::EmptyWorkbook => write!(f, "workbook contains no worksheets"),
        }
    }
}

impl std::error::Error for OpenError {}

impl From<XlsxError> for OpenError {
    fn from(err: XlsxError) -> Self {
        match err {
            XlsxError::Io(err) => OpenError::InvalidInput(err),
            other => OpenError::InvalidDocument(other),
        }
    }
}

/// A task reader over the first worksheet of an XLSX document.
///
/// The constructor consumes the stream: the whole sheet is materialized
/// up front and the underlying source is released before `new` returns.
/// Reads then walk a row cursor forward until the first empty row; the
/// reader stays exhausted from that point on.
pub struct SpreadsheetReader {
    range: Range<Data>,
    cursor: u32,
}

impl SpreadsheetReader {
    /// Open a reader over any seekable byte stream containing an XLSX document
    pub fn new<RS: Read + Seek>(stream: RS) -> Result<Self, OpenError> {
        let mut workbook = Xlsx::new(stream)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(OpenError::EmptyWorkbook)?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // Start at the first used row, like a sheet opened in Excel
        let cursor = range.start().map(|(row, _)| row).unwrap_or(0);

        Ok(Self { range, cursor })
    }

    /// Open a reader over an XLSX file on disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, OpenError> {
        let file = File::open(path).map_err(OpenError::InvalidInput)?;
        Self::new(BufReader::new(file))
    }

    /// Read the next task, or `None` at the first empty row.
    ///
    /// The cursor advances exactly once per attempted row, whether the
    /// row decoded or not, so a malformed row can never be retried.
    pub fn read(&mut self) -> Option<PlannerTask> {
        while !self.current_row_is_empty() {
            let decoded = self.decode_current_row();
            self.cursor = self.cursor.saturating_add(1);
            if decoded.is_some() {
                return decoded;
            }
        }
        None
    }

    /// A row is empty when every used column of the sheet is blank for it.
    /// Rows past the used area of the sheet count as empty.
    fn current_row_is_empty(&self) -> bool {
        let (Some((_, first_col)), Some((last_row, last_col))) =
            (self.range.start(), self.range.end())
        else {
            return true;
        };
        if self.cursor > last_row {
            return true;
        }
        (first_col..=last_col).all(|col| is_blank(self.range.get_value((self.cursor, col))))
    }

    /// Decode the row under the cursor, `None` when any cell fails coercion.
    ///
    /// Percent complete is 0 (to do), 50 (in progress) or 100 (completed);
    /// priority runs 0-10 from urgent to low. Neither field is range-checked
    /// here, out-of-domain integers are passed through to the service.
    fn decode_current_row(&self) -> Option<PlannerTask> {
        let title = self.cell_text(cols::TITLE);
        let percent_complete = self.cell_integer(cols::PERCENT_COMPLETE)?;
        let priority = self.cell_integer(cols::PRIORITY)?;
        let order_hint = self.cell_text(cols::ORDER_HINT);
        let description = self.cell_text(cols::DESCRIPTION);

        Some(PlannerTask {
            title,
            percent_complete,
            priority,
            order_hint,
            details: PlannerTaskDetails {
                description,
                ..Default::default()
            },
        })
    }

    fn cell_text(&self, col: u32) -> String {
        match self.range.get_value((self.cursor, col)) {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Int(i)) => i.to_string(),
            Some(Data::Float(f)) => {
                if f.fract() == 0.0 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Some(Data::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Integer coercion for the numeric columns. Floats truncate toward
    /// zero, text is parsed after trimming, anything else fails the row.
    fn cell_integer(&self, col: u32) -> Option<i32> {
        match self.range.get_value((self.cursor, col))? {
            Data::Int(i) => i32::try_from(*i).ok(),
            Data::Float(f) => i32::try_from(*f as i64).ok(),
            Data::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Iterator for SpreadsheetReader {
    type Item = PlannerTask;

    fn next(&mut self) -> Option<PlannerTask> {
        self.read()
    }
}

fn is_blank(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

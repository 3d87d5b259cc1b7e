//! xlsxtext - Spreadsheet to plain text converter
//!
//! This crate reads spreadsheet files (XLSX, XLSM, XLSB, XLS, ODS, CSV) and converts
//! every sheet into a tab-separated plain text block, so that the contents can be
//! copied to the clipboard or downloaded as a `.txt` file.
//!
//! Each sheet is rendered as:
//!
//! ```text
//! ===== Sheet1 =====
//! Name	Age
//! Alice	30
//!
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxtext::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("example.xlsx")?;
//!     let output = File::create("example.txt")?;
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use xlsxtext::{ConverterBuilder, DateFormat, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_sheet_selector(SheetSelector::Names(vec!["Summary".to_string()]))
//!         .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
//!         .with_csv_delimiter(b';')
//!         .build()?;
//!
//!     let text = converter.convert_bytes(&std::fs::read("example.xlsx")?)?;
//!     print!("{}", text);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Session
//!
//! `SessionController` keeps the state shown to the user (file name, result text,
//! processing flag, error message) and provides the copy, download and clear actions.
//!
//! ```rust,no_run
//! use xlsxtext::{ConverterBuilder, MemoryClipboard, SelectedFile, SessionController};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = SessionController::new(ConverterBuilder::new().build()?);
//! controller.on_file_selected(&SelectedFile::from_path("Report.xlsx")).await;
//!
//! let mut clipboard = MemoryClipboard::new();
//! controller.copy_to_clipboard(&mut clipboard).await;
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod clipboard;
mod download;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod session;
mod types;

// 公開API
pub use api::{DateFormat, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use download::{download_file_name, Download, TEXT_CONTENT_TYPE};
pub use error::{ClipboardError, ErrorKind, XlsxToTextError};
pub use session::{
    ConversionTicket, SelectedFile, Session, SessionController, SessionState,
    COPY_FAILED_MESSAGE,
};
pub use types::{CellValue, Sheet, Workbook};

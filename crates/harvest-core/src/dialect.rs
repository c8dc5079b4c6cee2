//! Delimited-file dialect shared by the reader and the writer.
//!
//! Defaults match the files the experiment harness produces: fields separated
//! by a single space, `|` as the quote character, CRLF row terminators on write.

use crate::errors::{HarvestError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineTerminator {
    #[default]
    Crlf,
    Lf,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Dialect {
    pub delimiter: char,
    pub quote: char,
    pub line_terminator: LineTerminator,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ' ',
            quote: '|',
            line_terminator: LineTerminator::Crlf,
        }
    }
}

impl Dialect {
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(HarvestError::config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        if !self.quote.is_ascii() {
            return Err(HarvestError::config(format!(
                "quote must be a single ASCII character, got {:?}",
                self.quote
            )));
        }
        if self.delimiter == self.quote {
            return Err(HarvestError::config(format!(
                "delimiter and quote must differ (both {:?})",
                self.delimiter
            )));
        }
        Ok(())
    }

    // Both are checked ASCII by `validate`, the cast cannot truncate.
    fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    fn quote_byte(&self) -> u8 {
        self.quote as u8
    }

    /// Headerless reader that accepts rows of any length.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter_byte())
            .quote(self.quote_byte())
            .double_quote(true)
            .trim(csv::Trim::None);
        builder
    }

    /// Writer with minimal quoting; rows may differ in length.
    pub fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter_byte())
            .quote(self.quote_byte())
            .double_quote(true)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(match self.line_terminator {
                LineTerminator::Crlf => csv::Terminator::CRLF,
                LineTerminator::Lf => csv::Terminator::Any(b'\n'),
            });
        builder
    }
}

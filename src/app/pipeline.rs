use std::io::Write;

use anyhow::Result;
use derive_getters::Getters;
use tracing::debug;

use crate::{
    app::{
        engine::match_lots,
        input::{Encoding, decode, detect_delimiter, read_records},
        normalizer::Normalizer,
        report::{ReportRow, assemble, write_csv},
    },
    config::Config,
    error::Diagnostic,
};

/// A finished run: the report rows plus everything that was skipped or left
/// unmatched along the way.
#[derive(Clone, Debug, Getters)]
pub struct Report {
    rows: Vec<ReportRow>,
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_csv(&self.rows, writer)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: Config,
    encoding: Encoding,
    delimiter: Option<u8>,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn run_bytes(&self, bytes: &[u8]) -> Result<Report> {
        let text = decode(bytes, self.encoding)?;
        self.run(&text)
    }

    /// Only structural problems (unreadable CSV, missing columns) fail the
    /// run; bad rows and unmatched sales become diagnostics.
    pub fn run(&self, text: &str) -> Result<Report> {
        let delimiter = self.delimiter.unwrap_or_else(|| detect_delimiter(text));
        let (headers, records) = read_records(text, delimiter)?;
        debug!(rows = records.len(), delimiter = %char::from(delimiter).escape_default(), "read input");

        let normalizer = Normalizer::new(&self.config, &headers)?;

        let mut diagnostics = Vec::new();
        let mut transactions = Vec::new();
        for (row, record) in &records {
            match normalizer.normalize(*row, record) {
                Ok(Some(transaction)) => {
                    debug!(row, kind = %transaction.kind(), "normalized");
                    transactions.push(transaction);
                }
                Ok(None) => {}
                Err(err) => diagnostics.push(Diagnostic::Skipped(err)),
            }
        }

        let (records, match_diagnostics) = match_lots(transactions).into_parts();
        diagnostics.extend(match_diagnostics);

        Ok(Report {
            rows: assemble(records),
            diagnostics,
        })
    }
}

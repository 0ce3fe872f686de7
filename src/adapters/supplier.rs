use crate::adapters::layout::{
    extract_named, validate_layout, validate_record_layout, FieldSpec, FILE_HEADER_LAYOUT,
    FILE_TRAILER_LAYOUT, PRICE_CHANGE_LAYOUT,
};
use crate::config::settings::SupplierSettings;
use crate::domain::model::PriceChangeRecord;
use crate::utils::error::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

const HEADER_RECORD_TYPE: &str = "H01";
const TRAILER_RECORD_TYPE: &str = "T01";

/// `H01` line of a price-change feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub file_type: String,
    pub member_number: String,
    pub date: String,
    pub time: String,
    pub version_no: String,
}

impl FileHeader {
    pub fn parse(line: &str) -> Self {
        let field = |name: &str| extract_named(&FILE_HEADER_LAYOUT, line, name);
        Self {
            file_type: field("file_type"),
            member_number: field("member_number"),
            date: field("date"),
            time: field("time"),
            version_no: field("version_no"),
        }
    }

    pub fn created_at(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y%m%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H%M%S").ok()?;
        Some(date.and_time(time))
    }
}

/// `T01` line of a price-change feed. Logged, never checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTrailer {
    pub file_type: String,
    pub member_number: String,
    pub total_records: String,
}

impl FileTrailer {
    pub fn parse(line: &str) -> Self {
        let field = |name: &str| extract_named(&FILE_TRAILER_LAYOUT, line, name);
        Self {
            file_type: field("file_type"),
            member_number: field("member_number"),
            total_records: field("total_records"),
        }
    }
}

/// Lazily reads `PC1` records for one member from a fixed-width feed.
///
/// Lines that do not start with the record code and member number are
/// skipped. Header and trailer lines are logged on the way past.
pub struct SupplierReader<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
    prefix: String,
    layout: &'static [FieldSpec],
}

impl SupplierReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, settings: &SupplierSettings) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file), settings)
    }
}

impl<R: BufRead> SupplierReader<R> {
    pub fn new(reader: R, settings: &SupplierSettings) -> Result<Self> {
        Self::with_layout(reader, settings, &PRICE_CHANGE_LAYOUT)
    }

    pub fn with_layout(
        reader: R,
        settings: &SupplierSettings,
        layout: &'static [FieldSpec],
    ) -> Result<Self> {
        validate_record_layout(layout)?;
        validate_layout(&FILE_HEADER_LAYOUT)?;
        validate_layout(&FILE_TRAILER_LAYOUT)?;

        Ok(Self {
            lines: reader.lines(),
            line_number: 0,
            prefix: settings.record_prefix(),
            layout,
        })
    }

    fn parse_record(&self, line: &str, line_number: usize) -> PriceChangeRecord {
        let values = self.layout.iter().map(|spec| spec.extract(line)).collect();
        PriceChangeRecord::from_values(values, line_number)
    }

    fn note_skipped(&self, line: &str, line_number: usize) {
        if line.starts_with(HEADER_RECORD_TYPE) {
            let header = FileHeader::parse(line);
            match header.created_at() {
                Some(created_at) => tracing::info!(
                    "Price change feed {} for member {} created {}",
                    header.file_type.trim(),
                    header.member_number.trim(),
                    created_at
                ),
                None => tracing::info!(
                    "Price change feed {} for member {}",
                    header.file_type.trim(),
                    header.member_number.trim()
                ),
            }
        } else if line.starts_with(TRAILER_RECORD_TYPE) {
            let trailer = FileTrailer::parse(line);
            tracing::info!(
                "Feed trailer reports {} total records",
                trailer.total_records.trim_start_matches('0')
            );
        } else {
            tracing::trace!("Skipping line {}", line_number);
        }
    }
}

impl<R: BufRead> Iterator for SupplierReader<R> {
    type Item = Result<PriceChangeRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            let line_number = self.line_number;
            self.line_number += 1;

            if line.starts_with(&self.prefix) {
                return Some(Ok(self.parse_record(&line, line_number)));
            }
            self.note_skipped(&line, line_number);
        }
    }
}

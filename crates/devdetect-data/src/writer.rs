//! Binary data file writer.
//!
//! Mirrors [`crate::reader::DataReader`]: every byte written is hashed and
//! the digest is appended as the trailer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{DataFileError, DataResult};
use crate::format::{DATA_MAGIC, DATE_FORMAT, FORMAT_VERSION};
use crate::model::RawDataset;

/// A checksumming writer for binary data files.
pub struct DataWriter<W: Write> {
    writer: W,
    hasher: Sha256,
}

impl<W: Write> DataWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            hasher: Sha256::new(),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> DataResult<()> {
        self.writer.write_all(bytes)?;
        self.hasher.update(bytes);
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> DataResult<()> {
        self.write_all(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> DataResult<()> {
        self.write_all(&value.to_le_bytes())
    }

    /// Write a count or index field.
    pub fn write_len(&mut self, len: usize) -> DataResult<()> {
        let value = u32::try_from(len)
            .map_err(|_| DataFileError::Invalid(format!("length {len} exceeds u32")))?;
        self.write_u32(value)
    }

    pub fn write_string(&mut self, value: &str) -> DataResult<()> {
        self.write_len(value.len())?;
        self.write_all(value.as_bytes())
    }

    pub fn write_date(&mut self, date: Option<NaiveDate>) -> DataResult<()> {
        let text = date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default();
        self.write_string(&text)
    }

    /// Append the checksum trailer and flush, returning the inner writer.
    pub fn finish(mut self) -> DataResult<W> {
        let digest = self.hasher.finalize();
        self.writer.write_all(&digest)?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Write a whole dataset: header, sections and checksum.
    pub fn write_dataset(mut self, raw: &RawDataset) -> DataResult<W> {
        raw.validate()?;

        self.write_all(&DATA_MAGIC)?;
        self.write_u16(FORMAT_VERSION)?;
        self.write_string(&raw.name)?;
        self.write_date(raw.published)?;
        self.write_date(raw.next_update)?;

        self.write_len(raw.properties.len())?;
        for property in &raw.properties {
            self.write_string(&property.name)?;
            self.write_string(&property.description)?;
            self.write_string(&property.default_value)?;
        }

        self.write_len(raw.profiles.len())?;
        for profile in &raw.profiles {
            self.write_u32(profile.id)?;
            self.write_len(profile.values.len())?;
            for (property, value) in &profile.values {
                self.write_len(*property)?;
                self.write_string(value)?;
            }
        }

        self.write_len(raw.signatures.len())?;
        for signature in &raw.signatures {
            self.write_len(signature.profile)?;
            self.write_len(signature.tokens.len())?;
            for token in &signature.tokens {
                self.write_string(token)?;
            }
        }

        self.finish()
    }
}

/// Encode a dataset into an in-memory binary image.
pub fn encode_dataset(raw: &RawDataset) -> DataResult<Vec<u8>> {
    DataWriter::new(Vec::new()).write_dataset(raw)
}

/// Encode a dataset and write it to `path`, replacing any existing file.
pub fn write_dataset_file(raw: &RawDataset, path: &Path) -> DataResult<()> {
    let file = File::create(path)?;
    let writer = DataWriter::new(BufWriter::new(file)).write_dataset(raw)?;
    writer
        .into_inner()
        .map_err(|e| DataFileError::Io(e.into_error()))?;

    info!(
        path = %path.display(),
        properties = raw.properties.len(),
        signatures = raw.signatures.len(),
        "Wrote data file"
    );
    Ok(())
}

//! Binary data file reader.
//!
//! Every byte read through [`DataReader`] is fed into a running SHA-256 so
//! the trailer can be checked once all sections have been consumed.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::error::{DataFileError, DataResult};
use crate::format::{CHECKSUM_LEN, DATE_FORMAT, DATA_MAGIC, FORMAT_VERSION, MAX_PREALLOC};
use crate::model::{Profile, PropertyDef, RawDataset, Signature};

/// A checksumming reader for binary data files.
pub struct DataReader<R: Read> {
    reader: R,
    hasher: Sha256,
}

impl DataReader<BufReader<File>> {
    /// Open a data file for reading.
    pub fn open(path: &Path) -> DataResult<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DataFileError::FileNotFound(path.display().to_string())
            } else {
                DataFileError::Io(e)
            }
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> DataReader<R> {
    /// Create a reader from any Read implementation.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            hasher: Sha256::new(),
        }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> DataResult<()> {
        self.reader.read_exact(buf)?;
        self.hasher.update(&*buf);
        Ok(())
    }

    /// Read and validate the magic number.
    pub fn read_magic(&mut self) -> DataResult<()> {
        let mut magic = [0u8; 4];
        self.read_exact(&mut magic)?;
        if magic != DATA_MAGIC {
            return Err(DataFileError::InvalidMagic);
        }
        Ok(())
    }

    /// Read and validate the format version.
    pub fn read_version(&mut self) -> DataResult<u16> {
        let version = self.read_u16()?;
        if version != FORMAT_VERSION {
            return Err(DataFileError::UnsupportedVersion(version));
        }
        Ok(version)
    }

    /// Read a u16 value (little-endian).
    pub fn read_u16(&mut self) -> DataResult<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> DataResult<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Read a count or index field.
    pub fn read_len(&mut self) -> DataResult<usize> {
        let value = self.read_u32()?;
        usize::try_from(value).map_err(|_| DataFileError::Invalid(format!("length {value} too large")))
    }

    /// Read a string (u32 length prefix followed by UTF-8 bytes).
    pub fn read_string(&mut self) -> DataResult<String> {
        let len = self.read_len()?;
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if read != len {
            return Err(DataFileError::Truncated);
        }
        self.hasher.update(&buf);
        String::from_utf8(buf).map_err(|_| DataFileError::Utf8Error)
    }

    /// Read an optional date stored as `YYYY-MM-DD` (empty for none).
    pub fn read_date(&mut self) -> DataResult<Option<NaiveDate>> {
        let text = self.read_string()?;
        if text.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| DataFileError::InvalidDate(text))
    }

    /// Read the checksum trailer and compare it with the bytes read so far.
    ///
    /// Also requires the trailer to be the last thing in the file.
    pub fn finish(mut self) -> DataResult<()> {
        let mut expected = [0u8; CHECKSUM_LEN];
        self.reader.read_exact(&mut expected)?;
        let actual = self.hasher.finalize();
        if actual.as_slice() != expected {
            return Err(DataFileError::ChecksumMismatch);
        }

        let mut probe = [0u8; 1];
        if self.reader.read(&mut probe)? != 0 {
            return Err(DataFileError::TrailingBytes);
        }
        Ok(())
    }

    /// Read a whole dataset: header, sections and checksum.
    pub fn read_dataset(mut self) -> DataResult<RawDataset> {
        self.read_magic()?;
        self.read_version()?;

        let name = self.read_string()?;
        let published = self.read_date()?;
        let next_update = self.read_date()?;

        let property_count = self.read_len()?;
        let mut properties = Vec::with_capacity(property_count.min(MAX_PREALLOC));
        for _ in 0..property_count {
            properties.push(PropertyDef {
                name: self.read_string()?,
                description: self.read_string()?,
                default_value: self.read_string()?,
            });
        }

        let profile_count = self.read_len()?;
        let mut profiles = Vec::with_capacity(profile_count.min(MAX_PREALLOC));
        for _ in 0..profile_count {
            let id = self.read_u32()?;
            let value_count = self.read_len()?;
            let mut values = Vec::with_capacity(value_count.min(MAX_PREALLOC));
            for _ in 0..value_count {
                let property = self.read_len()?;
                values.push((property, self.read_string()?));
            }
            profiles.push(Profile { id, values });
        }

        let signature_count = self.read_len()?;
        let mut signatures = Vec::with_capacity(signature_count.min(MAX_PREALLOC));
        for _ in 0..signature_count {
            let profile = self.read_len()?;
            let token_count = self.read_len()?;
            let mut tokens = Vec::with_capacity(token_count.min(MAX_PREALLOC));
            for _ in 0..token_count {
                tokens.push(self.read_string()?);
            }
            signatures.push(Signature { profile, tokens });
        }

        self.finish()?;

        let raw = RawDataset {
            name,
            published,
            next_update,
            properties,
            profiles,
            signatures,
        };
        raw.validate()?;
        Ok(raw)
    }
}

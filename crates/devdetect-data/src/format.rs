//! Data file format constants.
//!
//! Binary layout (version 1, all integers little-endian, strings are a u32
//! byte length followed by UTF-8):
//!
//! ```text
//! magic "DDET" | version u16
//! name | published | next_update            (dates as "YYYY-MM-DD" or "")
//! property_count u32, then per property:  name | description | default
//! profile_count u32, then per profile:    id u32 | value_count u32 |
//!                                         value_count x (property u32 | value)
//! signature_count u32, then per signature: profile u32 | token_count u32 |
//!                                         token_count x token
//! SHA-256 of every preceding byte (32 bytes)
//! ```

/// Magic number at the start of every binary data file.
pub const DATA_MAGIC: [u8; 4] = *b"DDET";

/// The only binary format version this crate reads and writes.
pub const FORMAT_VERSION: u16 = 1;

/// Length of the SHA-256 trailer.
pub const CHECKSUM_LEN: usize = 32;

/// Files with this extension are read as the JSON source format.
pub const SOURCE_EXTENSION: &str = "json";

/// Date layout used for published and next-update dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound on pre-allocation for counts read from a file.
///
/// Counts come from untrusted input, so vectors grow past this only as
/// elements are actually read.
pub const MAX_PREALLOC: usize = 1024;

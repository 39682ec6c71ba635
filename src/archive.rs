//! Single-entry ZIP extraction for the bundled network definitions.
//!
//! The network definitions ship as one-entry ZIP archives. Only the subset
//! of the format those archives use is handled here: a local file header at
//! offset zero followed by a stored or raw-deflate payload.

use std::io::Read;

use bytes::Buf;

use crate::error::{Error, Result};

/// Local file header signature ("PK\x03\x04").
const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;

/// Fixed portion of the local file header (30 bytes per APPNOTE 4.3.7).
const LOCAL_HEADER_SIZE: usize = 30;

const METHOD_STORED: u16 = 0;
const METHOD_DEFLATED: u16 = 8;

/// Extract the sole entry of a single-entry ZIP archive.
pub(crate) fn read_single_entry(blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < LOCAL_HEADER_SIZE {
        return Err(Error::archive("no files found in archive"));
    }

    let mut header = &blob[..LOCAL_HEADER_SIZE];
    if header.get_u32_le() != LOCAL_HEADER_SIGNATURE {
        return Err(Error::archive("missing local file header"));
    }
    header.advance(4); // version needed, general-purpose flags
    let method = header.get_u16_le();
    header.advance(8); // mod time, mod date, crc-32
    let compressed_size = header.get_u32_le() as usize;
    header.advance(4); // uncompressed size
    let name_len = header.get_u16_le() as usize;
    let extra_len = header.get_u16_le() as usize;

    let data_start = LOCAL_HEADER_SIZE + name_len + extra_len;
    if data_start > blob.len() {
        return Err(Error::archive("truncated local file header"));
    }
    let data = &blob[data_start..];

    match method {
        METHOD_STORED => {
            if compressed_size == 0 || compressed_size > data.len() {
                return Err(Error::archive("empty or truncated stored entry"));
            }
            Ok(data[..compressed_size].to_vec())
        }
        METHOD_DEFLATED => {
            // The deflate stream is self-terminating, so streaming writers
            // that defer sizes to a data descriptor decode the same way.
            let mut decoded = Vec::new();
            flate2::read::DeflateDecoder::new(data)
                .read_to_end(&mut decoded)
                .map_err(|e| Error::archive(format!("deflate: {e}")))?;
            if decoded.is_empty() {
                return Err(Error::archive("empty deflated entry"));
            }
            Ok(decoded)
        }
        other => Err(Error::archive(format!(
            "unsupported compression method {other}"
        ))),
    }
}

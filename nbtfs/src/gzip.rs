//! The gzip envelope around NBT files.
//!
//! Most NBT files on disk (`level.dat`, player files) are gzip compressed,
//! but not all of them. Whether to inflate is decided solely by the first two
//! bytes of the input.

use std::io::{Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use log::debug;

use crate::error::{Error, Result};

/// Every gzip stream starts with these two bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Inflate `data` if it is gzip compressed, otherwise hand it back untouched.
pub fn decompress(data: Vec<u8>) -> Result<Vec<u8>> {
    if !is_gzip(&data) {
        debug!("no gzip magic, reading {} bytes as raw nbt", data.len());
        return Ok(data);
    }

    let mut decoder = GzDecoder::new(data.as_slice());
    let mut inflated = Vec::with_capacity(data.len() * 4);
    decoder
        .read_to_end(&mut inflated)
        .map_err(Error::transform)?;

    debug!("inflated {} gzip bytes to {}", data.len(), inflated.len());
    Ok(inflated)
}

/// Wrap `data` in gzip at the given compression level.
pub fn compress(data: &[u8], level: Compression) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), level);
    encoder.write_all(data).map_err(Error::transform)?;
    encoder.finish().map_err(Error::transform)
}

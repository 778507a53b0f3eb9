use alloc::vec::Vec;

use embedded_io::{Error as _, ErrorKind, Read};
use log::debug;

use crate::{
    error::{Error, Result},
    image::{Dimensions, ImageBuffer},
};

const CHUNK_SIZE: usize = 512;

/// Reads `reader` until it reports end of input or `limit` bytes have been read.
///
/// Interrupted reads are retried.
pub fn read_to_end<R: Read>(reader: &mut R, limit: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    while data.len() < limit {
        let want = (limit - data.len()).min(CHUNK_SIZE);
        match reader.read(&mut chunk[..want]) {
            Ok(0) => break,
            Ok(read) => data.extend_from_slice(&chunk[..read]),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::from_io_error(err)),
        }
    }
    Ok(data)
}

/// Reads the whole raw image and checks it against `dimensions`.
///
/// At most one byte past the expected length is read, which is enough to
/// report an oversized input.
pub fn load_image<R: Read>(reader: &mut R, dimensions: Dimensions) -> Result<ImageBuffer> {
    let data = read_to_end(reader, dimensions.byte_len().saturating_add(1))?;
    debug!("Loaded {} bytes of raw RGB data", data.len());
    ImageBuffer::new(dimensions, data)
}

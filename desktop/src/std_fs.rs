use std::io::Read as _;

use embedded_io::ErrorType;
use log::info;
use sprite_core::Error;

/// Read-only `std::fs::File` exposed through `embedded_io::Read`.
pub struct StdFile {
    file: std::io::BufReader<std::fs::File>,
    size: usize,
}

impl StdFile {
    pub fn open(path: &str) -> Result<Self, Error> {
        let file = std::fs::File::open(path).map_err(Error::from_io_error)?;
        let size = file.metadata().map_err(Error::from_io_error)?.len() as usize;
        info!("Opened {} ({} bytes)", path, size);
        Ok(StdFile {
            file: std::io::BufReader::new(file),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl ErrorType for StdFile {
    type Error = std::io::Error;
}

impl embedded_io::Read for StdFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

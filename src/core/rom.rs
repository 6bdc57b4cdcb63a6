use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::consts;
use crate::core::error::VmError;

/// Raw program bytes, no header or framing.
#[derive(Debug, Default, Clone)]
pub struct Rom {
    pub buffer: Vec<u8>,
}

impl Rom {
    pub fn new(buffer: Vec<u8>) -> Result<Self, VmError> {
        if buffer.len() > consts::MAX_ROM_BYTES {
            return Err(VmError::RomTooLarge {
                len: buffer.len(),
                max: consts::MAX_ROM_BYTES,
            });
        }
        Ok(Rom { buffer })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VmError> {
        let mut file = File::open(path)?;
        Self::from_reader(&mut file)
    }

    pub fn from_reader(reader: &mut impl Read) -> Result<Self, VmError> {
        // One byte past the limit is enough to tell an oversized image apart.
        let mut buffer = Vec::with_capacity(consts::MAX_ROM_BYTES);
        reader
            .take(consts::MAX_ROM_BYTES as u64 + 1)
            .read_to_end(&mut buffer)?;
        Self::new(buffer)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

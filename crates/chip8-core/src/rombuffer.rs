use std::path::Path;

use crate::error::{MachineError, Result};

/// Holds a program image as read from disk, ready to be loaded into a machine
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RomBuffer {
    buffer: Vec<u8>,
}

impl RomBuffer {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let buffer = std::fs::read(path)?;
        Ok(RomBuffer { buffer })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        RomBuffer { buffer: bytes }
    }

    pub fn contents(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl TryFrom<&Path> for RomBuffer {
    type Error = MachineError;
    fn try_from(value: &Path) -> Result<Self> {
        Self::from_file(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_files() {
        let path = std::env::temp_dir().join(format!("chip8-core-rom-{}.ch8", std::process::id()));
        std::fs::write(&path, [0x00, 0xE0, 0x12, 0x00]).unwrap();
        let rom = RomBuffer::try_from(path.as_path()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(rom.contents(), &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(rom.len(), 4);
    }

    #[test]
    fn missing_files_are_io_errors() {
        let result = RomBuffer::from_file("this/rom/does/not/exist.ch8");
        assert!(matches!(result, Err(MachineError::Io(_))));
    }
}

//! Save-state encoding of work RAM.
//!
//! Binary layout (version 1):
//!
//! | Bytes | Content                                |
//! |-------|----------------------------------------|
//! | 0..4  | magic `NRAM`                           |
//! | 4     | format version                         |
//! | 5..7  | payload length, `u16` little endian    |
//! | 7..   | payload, one byte per work RAM cell    |
//!
//! The text form is `nesram-v<version>:` followed by the payload as
//! lowercase hex, two digits per byte. Bump [`SNAPSHOT_VERSION`] whenever
//! either layout changes.

use std::str::FromStr;

use thiserror::Error;

use crate::components::wram::WORK_RAM_SIZE;

pub const SNAPSHOT_VERSION: u8 = 1;

const MAGIC: &[u8; 4] = b"NRAM";
const HEADER_LEN: usize = MAGIC.len() + 1 + 2;
const TEXT_PREFIX: &str = "nesram-v";

#[derive(Debug, Error, Eq, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot holds {actual} bytes of work RAM, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u8),
    #[error("Not a work RAM snapshot")]
    BadMagic,
    #[error("Snapshot header declares {declared} bytes but {present} are present")]
    Truncated { declared: usize, present: usize },
    #[error("Invalid character {character:?} at position {position} of snapshot text")]
    InvalidText { character: char, position: usize },
    #[error("Snapshot text has an odd number of hex digits")]
    OddHexLength,
    #[error("Snapshot of {len} bytes does not fit the binary format")]
    TooLarge { len: usize },
}

/// A capture of work RAM contents.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    ram: Vec<u8>,
}

impl Snapshot {
    pub fn new(ram: &[u8]) -> Self {
        Self { ram: ram.to_vec() }
    }

    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// The payload as exactly one work RAM's worth of cells.
    pub fn as_work_ram(&self) -> Result<&[u8; WORK_RAM_SIZE], SnapshotError> {
        self.ram
            .as_slice()
            .try_into()
            .map_err(|_| SnapshotError::WrongLength {
                expected: WORK_RAM_SIZE,
                actual: self.ram.len(),
            })
    }

    /// Binary encoding. Fails if the payload is too long for the `u16`
    /// length field.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let len = u16::try_from(self.ram.len()).map_err(|_| SnapshotError::TooLarge {
            len: self.ram.len(),
        })?;
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.ram.len());
        bytes.extend_from_slice(MAGIC);
        bytes.push(SNAPSHOT_VERSION);
        bytes.extend_from_slice(&len.to_le_bytes());
        bytes.extend_from_slice(&self.ram);
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }
        let version = bytes[4];
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }
        let declared = u16::from_le_bytes([bytes[5], bytes[6]]) as usize;
        let payload = &bytes[HEADER_LEN..];
        if payload.len() != declared {
            return Err(SnapshotError::Truncated {
                declared,
                present: payload.len(),
            });
        }
        Ok(Self::new(payload))
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}:", TEXT_PREFIX, SNAPSHOT_VERSION)?;
        for b in &self.ram {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for Snapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rest = s.strip_prefix(TEXT_PREFIX).ok_or(SnapshotError::BadMagic)?;
        let (version, hex) = rest.split_once(':').ok_or(SnapshotError::BadMagic)?;
        let version: u8 = version.parse().map_err(|_| SnapshotError::BadMagic)?;
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }
        if hex.len() % 2 != 0 {
            return Err(SnapshotError::OddHexLength);
        }

        let digit_offset = s.len() - hex.len();
        let digits = hex
            .char_indices()
            .map(|(i, c)| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(SnapshotError::InvalidText {
                        character: c,
                        position: digit_offset + i,
                    })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        let ram = digits.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect();
        Ok(Self { ram })
    }
}

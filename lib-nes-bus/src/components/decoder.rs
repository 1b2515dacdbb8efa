//! Address decoding for the CPU bus.
//!
//! The console only decodes a few address lines, so regions are picked from
//! the top three bits and resources show up mirrored across their region.
//!
//! | Range           | Region                                    |
//! |-----------------|-------------------------------------------|
//! | $0000-$1FFF     | 2 KiB work RAM, mirrored 4 times          |
//! | $2000-$3FFF     | 8 video registers, mirrored every 8 bytes |
//! | $4000-$401F     | audio and input registers, sprite DMA     |
//! | $4020-$5FFF     | cartridge extended RAM                    |
//! | $6000-$7FFF     | cartridge save RAM                        |
//! | $8000-$FFFF     | cartridge program ROM                     |

use strum_macros::{Display, EnumIter};

pub const WORK_RAM_MASK: u16 = 0x07FF;
pub const VIDEO_REGISTER_MASK: u16 = 0x0007;

const TOP_BITS_MASK: u16 = 0xE000;
// Bits that must be clear for a $4000-$5FFF address to fall in $4000-$401F.
const LOW_IO_MASK: u16 = 0x1FE0;

#[derive(Debug, Display, EnumIter, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Region {
    WorkRam,
    VideoRegisters,
    LowIo,
    ExtendedRam,
    SaveRam,
    ProgramRom,
}

/// A decoded address: the region and the offset to hand to its owner.
///
/// Work RAM and video registers get the mirrored-down index, everything
/// else keeps the raw CPU address.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Decoded {
    pub region: Region,
    pub offset: u16,
}

pub const fn decode(address: u16) -> Decoded {
    match address & TOP_BITS_MASK {
        0x0000 => Decoded {
            region: Region::WorkRam,
            offset: address & WORK_RAM_MASK,
        },
        0x2000 => Decoded {
            region: Region::VideoRegisters,
            offset: address & VIDEO_REGISTER_MASK,
        },
        0x4000 if address & LOW_IO_MASK == 0 => Decoded {
            region: Region::LowIo,
            offset: address,
        },
        0x4000 => Decoded {
            region: Region::ExtendedRam,
            offset: address,
        },
        0x6000 => Decoded {
            region: Region::SaveRam,
            offset: address,
        },
        _ => Decoded {
            region: Region::ProgramRom,
            offset: address,
        },
    }
}

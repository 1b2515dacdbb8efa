pub use crate::components::bus::{Bus, BusConfig, Peripherals, ResetKind};
pub use crate::components::decoder::{decode, Decoded, Region};
pub use crate::components::monitor::{WatchHit, WatchList, WatchPreset};
pub use crate::components::snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};
pub use crate::components::wram::{WorkRam, WORK_RAM_SIZE};
pub use crate::bus_events::{BusEvent, HexByte, HexWord};

mod bus_events;
mod components;
#[cfg(test)]
mod testsupport;

const KIB: usize = 1024;

/// Size of one CPU page, the unit moved by a sprite DMA.
pub const PAGE_SIZE: usize = 256;

/// CPU-facing view of the address space.
pub trait MemoryContext {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

pub trait EventContext {
    fn push_event(&mut self, event: BusEvent);
}

/// Picture processing unit register surface at $2000-$3FFF.
pub trait VideoUnit {
    /// Reads register `index` (0..8). Reads of some registers have side
    /// effects inside the video unit (status latch, data buffer).
    fn read_register(&mut self, index: u8) -> u8;

    fn write_register(&mut self, index: u8, value: u8);

    /// Sprite DMA started by a write of `page` to $4014. `data` is the CPU
    /// page `page << 8 ..= page << 8 | 0xFF` as seen on the bus.
    fn trigger_sprite_dma(&mut self, page: u8, data: &[u8; PAGE_SIZE]);
}

/// Controller ports at $4016 and $4017.
pub trait InputUnit {
    fn read_register(&mut self, address: u16) -> u8;
    fn write_register(&mut self, address: u16, value: u8);
}

/// The audio unit listens to every write in $4000-$401F.
pub trait AudioUnit {
    fn write_register(&mut self, address: u16, value: u8);
}

/// Cartridge side of the bus. All addresses are raw CPU addresses.
pub trait CartridgeMapper {
    /// $4020-$5FFF
    fn read_extended_ram(&mut self, address: u16) -> u8;
    fn write_extended_ram(&mut self, address: u16, value: u8);

    /// $6000-$7FFF
    fn read_save_ram(&mut self, address: u16) -> u8;
    fn write_save_ram(&mut self, address: u16, value: u8);

    /// $8000-$FFFF
    fn read_program_rom(&mut self, address: u16) -> u8;

    /// Writes to program ROM are bank-switch commands for the mapper.
    fn write_program_rom(&mut self, address: u16, value: u8);
}

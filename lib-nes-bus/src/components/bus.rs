use std::collections::VecDeque;
use std::mem;

use strum_macros::Display;

use crate::components::decoder::{decode, Decoded, Region};
use crate::components::monitor::{WatchList, WatchPreset};
use crate::components::snapshot::{Snapshot, SnapshotError};
use crate::components::wram::WorkRam;
use crate::{
    AudioUnit, BusEvent, CartridgeMapper, EventContext, HexByte, HexWord, InputUnit,
    MemoryContext, VideoUnit, PAGE_SIZE,
};

const SPRITE_DMA: u16 = 0x4014;
const INPUT_PORT_1: u16 = 0x4016;
const INPUT_PORT_2: u16 = 0x4017;

// Audio registers are not readable through the bus; every low I/O read
// other than the input ports yields this value.
const LOW_IO_OPEN_READ: u8 = 0;

// Recorded events beyond this many are dropped oldest first until the host
// drains them.
const MAX_PENDING_EVENTS: usize = 256;
const EVENT_CAPACITY: usize = 16;

/// The collaborators the bus routes to. The bus only borrows them; the host
/// owns them and keeps driving them between bus accesses.
pub struct Peripherals<'a> {
    pub video: &'a mut dyn VideoUnit,
    pub input: &'a mut dyn InputUnit,
    pub audio: &'a mut dyn AudioUnit,
    pub mapper: &'a mut dyn CartridgeMapper,
}

#[derive(Debug, Display, Copy, Clone, Eq, PartialEq)]
pub enum ResetKind {
    /// Power cycle, work RAM gets its power-on pattern.
    Cold,
    /// Reset button, work RAM is kept.
    Warm,
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct BusConfig {
    pub watch: WatchPreset,
    /// Keep [`BusEvent`]s for [`Bus::take_events`]. Off by default, watch
    /// hits then only go to the log.
    pub record_events: bool,
}

/// The CPU's view of the address space.
///
/// Owns the 2 KiB of work RAM and dispatches every other access to the
/// borrowed [`Peripherals`]. Not reentrant: one access completes, side
/// effects included, before the next starts.
pub struct Bus<'a> {
    work_ram: WorkRam,
    config: BusConfig,
    watch_list: WatchList,
    peripherals: Peripherals<'a>,
    events: VecDeque<BusEvent>,
}

impl<'a> Bus<'a> {
    /// A bus straight after a cold reset.
    pub fn power_on(config: BusConfig, peripherals: Peripherals<'a>) -> Self {
        let mut bus = Self {
            work_ram: WorkRam::power_on(),
            config,
            watch_list: WatchList::default(),
            peripherals,
            events: VecDeque::with_capacity(EVENT_CAPACITY),
        };
        bus.finish_reset(ResetKind::Cold);
        bus
    }

    /// Resets the bus and binds it to `peripherals`, which may be different
    /// objects from the ones used so far.
    pub fn reset(&mut self, kind: ResetKind, peripherals: Peripherals<'a>) {
        self.peripherals = peripherals;
        self.finish_reset(kind);
    }

    /// Resets the bus, keeping the collaborators it is bound to.
    pub fn restart(&mut self, kind: ResetKind) {
        self.finish_reset(kind);
    }

    /// Replaces the configuration. Event recording follows immediately, the
    /// watch list is rebuilt at the next reset.
    pub fn configure(&mut self, config: BusConfig) {
        self.config = config;
    }

    /// Like [`Bus::reset`], for collaborators that live for a different
    /// borrow than the current ones. Work RAM and pending events carry over.
    pub fn rebind<'b>(self, kind: ResetKind, peripherals: Peripherals<'b>) -> Bus<'b> {
        let mut bus = Bus {
            work_ram: self.work_ram,
            config: self.config,
            watch_list: self.watch_list,
            peripherals,
            events: self.events,
        };
        bus.finish_reset(kind);
        bus
    }

    fn finish_reset(&mut self, kind: ResetKind) {
        if kind == ResetKind::Cold {
            self.work_ram = WorkRam::power_on();
        }
        self.watch_list = WatchList::from_preset(self.config.watch);
        log::info!(
            "{} reset, watching {} addresses ({})",
            kind,
            self.watch_list.len(),
            self.config.watch
        );
        self.push_event(BusEvent::Reset(kind));
    }

    #[inline]
    pub fn read8(&mut self, address: u16) -> u8 {
        let Decoded { region, offset } = decode(address);
        match region {
            Region::WorkRam => self.work_ram.read(offset),
            Region::VideoRegisters => self.peripherals.video.read_register(offset as u8),
            Region::LowIo => match address {
                INPUT_PORT_1 | INPUT_PORT_2 => self.peripherals.input.read_register(address),
                _ => LOW_IO_OPEN_READ,
            },
            Region::ExtendedRam => self.peripherals.mapper.read_extended_ram(address),
            Region::SaveRam => self.peripherals.mapper.read_save_ram(address),
            Region::ProgramRom => self.peripherals.mapper.read_program_rom(address),
        }
    }

    /// Little-endian word at `address`, `address + 1`.
    ///
    /// Only the 16-bit address itself wraps ($FFFF is followed by $0000).
    /// There is no zero page or page wraparound; CPU addressing modes that
    /// need it must split the read themselves.
    pub fn read16_le_no_wrap(&mut self, address: u16) -> u16 {
        let lower = self.read8(address);
        let upper = self.read8(address.wrapping_add(1));

        u16::from_le_bytes([lower, upper])
    }

    #[inline]
    pub fn write8(&mut self, address: u16, value: u8) {
        self.monitor_write(address, value);

        let Decoded { region, offset } = decode(address);
        match region {
            Region::WorkRam => self.work_ram.write(offset, value),
            Region::VideoRegisters => self
                .peripherals
                .video
                .write_register(offset as u8, value),
            Region::LowIo => {
                match address {
                    SPRITE_DMA => self.sprite_dma(value),
                    INPUT_PORT_1 | INPUT_PORT_2 => {
                        self.peripherals.input.write_register(address, value)
                    }
                    _ => (),
                }
                // The audio unit sees the whole low I/O range, $4014 and
                // the input ports included.
                self.peripherals.audio.write_register(address, value)
            }
            Region::ExtendedRam => self.peripherals.mapper.write_extended_ram(address, value),
            Region::SaveRam => self.peripherals.mapper.write_save_ram(address, value),
            Region::ProgramRom => self.peripherals.mapper.write_program_rom(address, value),
        }
    }

    fn monitor_write(&mut self, address: u16, value: u8) {
        if let Some(hit) = self.watch_list.observe(address, value) {
            log::info!(target: "nes_bus::watch", "{}", hit);
            self.push_event(BusEvent::WatchedWrite {
                label: hit.label,
                address: HexWord(address),
                value,
            });
        }
    }

    fn sprite_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let mut data = [0; PAGE_SIZE];
        for (i, b) in data.iter_mut().enumerate() {
            *b = self.read8(base | i as u16);
        }
        log::trace!("Sprite DMA from page {}", HexByte(page));
        self.peripherals.video.trigger_sprite_dma(page, &data);
    }

    /// Captures work RAM. Collaborator state is saved by the collaborators.
    pub fn capture_state(&self) -> Snapshot {
        log::debug!("Capturing work RAM");
        Snapshot::new(self.work_ram.raw())
    }

    /// Overwrites all of work RAM from `snapshot`. On error work RAM is left
    /// as it was.
    pub fn restore_state(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let ram = snapshot.as_work_ram()?;
        self.work_ram.load(ram);
        log::info!("Restored work RAM from snapshot");
        self.push_event(BusEvent::StateRestored);
        Ok(())
    }

    pub fn work_ram(&self) -> &WorkRam {
        &self.work_ram
    }

    pub fn watch_list(&self) -> &WatchList {
        &self.watch_list
    }

    pub fn config(&self) -> BusConfig {
        self.config
    }

    /// Drains the recorded events, oldest first. Nothing is recorded unless
    /// [`BusConfig::record_events`] is set.
    pub fn take_events(&mut self) -> Vec<BusEvent> {
        mem::replace(&mut self.events, VecDeque::with_capacity(EVENT_CAPACITY)).into()
    }
}

impl EventContext for Bus<'_> {
    fn push_event(&mut self, event: BusEvent) {
        if !self.config.record_events {
            return;
        }
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

impl MemoryContext for Bus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        self.read8(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.write8(addr, value)
    }
}

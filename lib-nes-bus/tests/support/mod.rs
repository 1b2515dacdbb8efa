#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use lib_nes_bus::{AudioUnit, CartridgeMapper, InputUnit, Peripherals, VideoUnit, PAGE_SIZE};

/// Every collaborator call the bus made, in order.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Call {
    VideoRead(u8),
    VideoWrite(u8, u8),
    SpriteDma(u8),
    InputRead(u16),
    InputWrite(u16, u8),
    AudioWrite(u16, u8),
    ExtendedRamRead(u16),
    ExtendedRamWrite(u16, u8),
    SaveRamRead(u16),
    SaveRamWrite(u16, u8),
    ProgramRomRead(u16),
    ProgramRomWrite(u16, u8),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub const VIDEO_READ_TAG: u8 = 0x80;
pub const INPUT_READ_TAG: u8 = 0x40;

pub struct RecordingVideo {
    log: CallLog,
    pub last_dma: Option<Box<[u8; PAGE_SIZE]>>,
}

impl VideoUnit for RecordingVideo {
    fn read_register(&mut self, index: u8) -> u8 {
        self.log.borrow_mut().push(Call::VideoRead(index));
        VIDEO_READ_TAG | index
    }

    fn write_register(&mut self, index: u8, value: u8) {
        self.log.borrow_mut().push(Call::VideoWrite(index, value))
    }

    fn trigger_sprite_dma(&mut self, page: u8, data: &[u8; PAGE_SIZE]) {
        self.log.borrow_mut().push(Call::SpriteDma(page));
        self.last_dma = Some(Box::new(*data));
    }
}

pub struct RecordingInput {
    log: CallLog,
}

impl InputUnit for RecordingInput {
    fn read_register(&mut self, address: u16) -> u8 {
        self.log.borrow_mut().push(Call::InputRead(address));
        INPUT_READ_TAG | (address & 1) as u8
    }

    fn write_register(&mut self, address: u16, value: u8) {
        self.log.borrow_mut().push(Call::InputWrite(address, value))
    }
}

pub struct RecordingAudio {
    log: CallLog,
}

impl AudioUnit for RecordingAudio {
    fn write_register(&mut self, address: u16, value: u8) {
        self.log.borrow_mut().push(Call::AudioWrite(address, value))
    }
}

/// Reads return the XOR of the address bytes so that a wrong address shows.
pub struct RecordingMapper {
    log: CallLog,
}

pub fn mapper_value(address: u16) -> u8 {
    let [lo, hi] = address.to_le_bytes();
    lo ^ hi
}

impl CartridgeMapper for RecordingMapper {
    fn read_extended_ram(&mut self, address: u16) -> u8 {
        self.log.borrow_mut().push(Call::ExtendedRamRead(address));
        mapper_value(address)
    }

    fn write_extended_ram(&mut self, address: u16, value: u8) {
        self.log
            .borrow_mut()
            .push(Call::ExtendedRamWrite(address, value))
    }

    fn read_save_ram(&mut self, address: u16) -> u8 {
        self.log.borrow_mut().push(Call::SaveRamRead(address));
        mapper_value(address)
    }

    fn write_save_ram(&mut self, address: u16, value: u8) {
        self.log.borrow_mut().push(Call::SaveRamWrite(address, value))
    }

    fn read_program_rom(&mut self, address: u16) -> u8 {
        self.log.borrow_mut().push(Call::ProgramRomRead(address));
        mapper_value(address)
    }

    fn write_program_rom(&mut self, address: u16, value: u8) {
        self.log
            .borrow_mut()
            .push(Call::ProgramRomWrite(address, value))
    }
}

pub struct Rig {
    pub log: CallLog,
    pub video: RecordingVideo,
    pub input: RecordingInput,
    pub audio: RecordingAudio,
    pub mapper: RecordingMapper,
}

impl Rig {
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            video: RecordingVideo {
                log: log.clone(),
                last_dma: None,
            },
            input: RecordingInput { log: log.clone() },
            audio: RecordingAudio { log: log.clone() },
            mapper: RecordingMapper { log: log.clone() },
            log,
        }
    }

    pub fn peripherals(&mut self) -> Peripherals<'_> {
        Peripherals {
            video: &mut self.video,
            input: &mut self.input,
            audio: &mut self.audio,
            mapper: &mut self.mapper,
        }
    }

    /// Drains the recorded calls.
    pub fn take_calls(log: &CallLog) -> Vec<Call> {
        std::mem::take(&mut *log.borrow_mut())
    }
}

pub fn init_logger() {
    let _ = env_logger::builder()
        // Include all events in tests
        .filter_level(log::LevelFilter::max())
        // Ensure events are captured by `cargo test`
        .is_test(true)
        // Ignore errors initializing the logger if tests race to configure it
        .try_init();
}

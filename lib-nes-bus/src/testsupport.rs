use crate::{AudioUnit, CartridgeMapper, InputUnit, Peripherals, VideoUnit, PAGE_SIZE};

#[derive(Debug, Default)]
pub struct TestVideo {
    pub registers: [u8; 8],
    pub writes: Vec<(u8, u8)>,
    pub dma_pages: Vec<u8>,
}

impl VideoUnit for TestVideo {
    fn read_register(&mut self, index: u8) -> u8 {
        self.registers[index as usize]
    }

    fn write_register(&mut self, index: u8, value: u8) {
        self.registers[index as usize] = value;
        self.writes.push((index, value))
    }

    fn trigger_sprite_dma(&mut self, page: u8, _data: &[u8; PAGE_SIZE]) {
        self.dma_pages.push(page)
    }
}

#[derive(Debug, Default)]
pub struct TestInput {
    pub writes: Vec<(u16, u8)>,
}

impl InputUnit for TestInput {
    fn read_register(&mut self, _address: u16) -> u8 {
        0x40
    }

    fn write_register(&mut self, address: u16, value: u8) {
        self.writes.push((address, value))
    }
}

#[derive(Debug, Default)]
pub struct TestAudio {
    pub writes: Vec<(u16, u8)>,
}

impl AudioUnit for TestAudio {
    fn write_register(&mut self, address: u16, value: u8) {
        self.writes.push((address, value))
    }
}

/// Cartridge that reads back the low byte of the address and drops writes.
#[derive(Debug, Default)]
pub struct TestMapper;

impl CartridgeMapper for TestMapper {
    fn read_extended_ram(&mut self, address: u16) -> u8 {
        address as u8
    }

    fn write_extended_ram(&mut self, _address: u16, _value: u8) {}

    fn read_save_ram(&mut self, address: u16) -> u8 {
        address as u8
    }

    fn write_save_ram(&mut self, _address: u16, _value: u8) {}

    fn read_program_rom(&mut self, address: u16) -> u8 {
        address as u8
    }

    fn write_program_rom(&mut self, _address: u16, _value: u8) {}
}

#[derive(Debug, Default)]
pub struct TestUnits {
    pub video: TestVideo,
    pub input: TestInput,
    pub audio: TestAudio,
    pub mapper: TestMapper,
}

impl TestUnits {
    pub fn peripherals(&mut self) -> Peripherals<'_> {
        Peripherals {
            video: &mut self.video,
            input: &mut self.input,
            audio: &mut self.audio,
            mapper: &mut self.mapper,
        }
    }
}

use lib_nes_bus::{
    AudioUnit, CartridgeMapper, HexByte, HexWord, InputUnit, Peripherals, VideoUnit, PAGE_SIZE,
};

// Value seen on the data bus when nothing drives it; the high byte of the
// last address on real hardware, a constant here.
const OPEN_BUS: u8 = 0xFF;

/// Stand-ins for the video, input, audio and cartridge hardware. Reads float,
/// writes are logged and dropped.
#[derive(Debug, Default)]
pub struct OpenBusUnits {
    video: OpenVideo,
    input: OpenInput,
    audio: OpenAudio,
    mapper: OpenMapper,
}

impl OpenBusUnits {
    pub fn peripherals(&mut self) -> Peripherals<'_> {
        Peripherals {
            video: &mut self.video,
            input: &mut self.input,
            audio: &mut self.audio,
            mapper: &mut self.mapper,
        }
    }
}

#[derive(Debug, Default)]
struct OpenVideo;

impl VideoUnit for OpenVideo {
    fn read_register(&mut self, index: u8) -> u8 {
        log::trace!("Video register {} read", index);
        OPEN_BUS
    }

    fn write_register(&mut self, index: u8, value: u8) {
        log::trace!("Video register {} <- {}", index, HexByte(value));
    }

    fn trigger_sprite_dma(&mut self, page: u8, _data: &[u8; PAGE_SIZE]) {
        log::debug!("Sprite DMA from page {}", HexByte(page));
    }
}

#[derive(Debug, Default)]
struct OpenInput;

impl InputUnit for OpenInput {
    fn read_register(&mut self, address: u16) -> u8 {
        log::trace!("Input {} read", HexWord(address));
        // No controller plugged in.
        0
    }

    fn write_register(&mut self, address: u16, value: u8) {
        log::trace!("Input {} <- {}", HexWord(address), HexByte(value));
    }
}

#[derive(Debug, Default)]
struct OpenAudio;

impl AudioUnit for OpenAudio {
    fn write_register(&mut self, address: u16, value: u8) {
        log::trace!("Audio {} <- {}", HexWord(address), HexByte(value));
    }
}

#[derive(Debug, Default)]
struct OpenMapper;

impl CartridgeMapper for OpenMapper {
    fn read_extended_ram(&mut self, _address: u16) -> u8 {
        OPEN_BUS
    }

    fn write_extended_ram(&mut self, address: u16, value: u8) {
        log::trace!("Extended RAM {} <- {}", HexWord(address), HexByte(value));
    }

    fn read_save_ram(&mut self, _address: u16) -> u8 {
        OPEN_BUS
    }

    fn write_save_ram(&mut self, address: u16, value: u8) {
        log::trace!("Save RAM {} <- {}", HexWord(address), HexByte(value));
    }

    fn read_program_rom(&mut self, _address: u16) -> u8 {
        OPEN_BUS
    }

    fn write_program_rom(&mut self, address: u16, value: u8) {
        log::debug!("Bank switch write {} <- {}", HexWord(address), HexByte(value));
    }
}

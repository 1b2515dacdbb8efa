use crate::components::decoder::WORK_RAM_MASK;
use crate::KIB;

pub const WORK_RAM_SIZE: usize = 2 * KIB;

// Cells that do not come up as 0xFF on power-on.
const POWER_ON_EXCEPTIONS: [(usize, u8); 4] =
    [(0x0008, 0xF7), (0x0009, 0xEF), (0x000A, 0xDF), (0x000F, 0xBF)];

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WorkRam {
    ram: [u8; WORK_RAM_SIZE],
}

impl WorkRam {
    /// RAM in its cold power-on state.
    pub fn power_on() -> Self {
        let mut ram = [0xFF; WORK_RAM_SIZE];
        for (offset, value) in POWER_ON_EXCEPTIONS {
            ram[offset] = value;
        }
        Self { ram }
    }

    pub fn read(&self, offset: u16) -> u8 {
        debug_assert!((offset as usize) < WORK_RAM_SIZE);
        self.ram[(offset & WORK_RAM_MASK) as usize]
    }

    pub fn write(&mut self, offset: u16, value: u8) {
        debug_assert!((offset as usize) < WORK_RAM_SIZE);
        self.ram[(offset & WORK_RAM_MASK) as usize] = value
    }

    pub fn raw(&self) -> &[u8; WORK_RAM_SIZE] {
        &self.ram
    }

    pub(crate) fn load(&mut self, ram: &[u8; WORK_RAM_SIZE]) {
        self.ram.copy_from_slice(ram)
    }
}

impl Default for WorkRam {
    fn default() -> Self {
        Self::power_on()
    }
}

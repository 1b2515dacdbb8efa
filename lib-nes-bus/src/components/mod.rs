pub mod bus;
pub mod decoder;
pub mod monitor;
pub mod snapshot;
pub mod wram;

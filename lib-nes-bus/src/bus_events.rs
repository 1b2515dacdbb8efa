use crate::ResetKind;

pub struct HexWord(pub u16);

impl std::fmt::Debug for HexWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for HexWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

pub struct HexByte(pub u8);

impl std::fmt::Debug for HexByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for HexByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

#[derive(Debug)]
pub enum BusEvent {
    WatchedWrite {
        label: &'static str,
        address: HexWord,
        value: u8,
    },
    Reset(ResetKind),
    StateRestored,
}

impl std::fmt::Display for BusEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WatchedWrite { label, value, .. } => write!(f, "{} changed to: {}", label, value),
            Self::Reset(kind) => write!(f, "Reset({})", kind),
            Self::StateRestored => write!(f, "StateRestored"),
        }
    }
}

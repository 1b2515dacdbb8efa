use lib_nes_bus::ResetKind;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    Read(u16),
    Write(u16, u8),
    Reset(ResetKind),
}

/// Parses a replay script, one command per line:
///
/// ```text
/// # comment
/// w $0000 0x42
/// r 0x0800
/// reset warm
/// ```
///
/// Numbers are hex with a `$` or `0x` prefix, decimal otherwise.
pub fn parse(source: &str) -> Result<Vec<Command>, String> {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(n, line)| parse_line(line).map_err(|e| format!("line {}: {}", n, e)))
        .collect()
}

fn parse_line(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words[..] {
        ["r", address] => Ok(Command::Read(parse_number(address)?)),
        ["w", address, value] => {
            let value = parse_number(value)?;
            let value = u8::try_from(value).map_err(|_| format!("{} does not fit in a byte", value))?;
            Ok(Command::Write(parse_number(address)?, value))
        }
        ["reset", "cold"] => Ok(Command::Reset(ResetKind::Cold)),
        ["reset", "warm"] => Ok(Command::Reset(ResetKind::Warm)),
        _ => Err(format!("cannot parse {:?}", line)),
    }
}

fn parse_number(word: &str) -> Result<u16, String> {
    let parsed = if let Some(hex) = word.strip_prefix('$') {
        u16::from_str_radix(hex, 16)
    } else if let Some(hex) = word.strip_prefix("0x") {
        u16::from_str_radix(hex, 16)
    } else {
        word.parse()
    };
    parsed.map_err(|e| format!("bad number {:?}: {}", word, e))
}

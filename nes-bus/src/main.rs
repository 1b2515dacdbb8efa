use std::error::Error;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{ArgEnum, Parser, Subcommand};
use lib_nes_bus::{Bus, BusConfig, HexByte, HexWord, Snapshot, WatchPreset};
use simplelog::*;

use crate::open_bus::OpenBusUnits;
use crate::script::Command;

mod open_bus;
mod script;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long, arg_enum, default_value_t = LogLevel::Debug)]
    file_log_level: LogLevel,

    #[clap(short, long, arg_enum, default_value_t = LogLevel::Info)]
    console_log_level: LogLevel,

    #[clap(long, default_value = "nes_bus.log")]
    log_file: PathBuf,

    #[clap(subcommand)]
    command: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Write the work RAM of a freshly powered-on console
    PowerOn { out: PathBuf },
    /// Print the work RAM stored in a snapshot
    Inspect { snapshot: PathBuf },
    /// Drive the bus with a script of `r <addr>` and `w <addr> <value>` lines
    Replay {
        script: PathBuf,

        /// Start from this snapshot instead of power-on RAM
        #[clap(long)]
        from: Option<PathBuf>,

        #[clap(long, default_value_t = WatchPreset::SuperMarioBros)]
        watch: WatchPreset,

        /// Save work RAM here once the script is done
        #[clap(long)]
        out: Option<PathBuf>,
    },
}

#[derive(ArgEnum, Copy, Clone, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Args = Args::parse();

    CombinedLogger::init(vec![
        TermLogger::new(
            args.console_log_level.as_level_filter(),
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            args.file_log_level.as_level_filter(),
            Config::default(),
            File::create(&args.log_file)?,
        ),
    ])?;

    let result = match args.command {
        Action::PowerOn { out } => power_on(&out),
        Action::Inspect { snapshot } => inspect(&snapshot),
        Action::Replay {
            script,
            from,
            watch,
            out,
        } => replay(&script, from.as_deref(), watch, out.as_deref()),
    };
    if let Err(e) = &result {
        log::error!("Error: {}", e);
    }
    result
}

fn power_on(out: &Path) -> Result<(), Box<dyn Error>> {
    let mut units = OpenBusUnits::default();
    let bus = Bus::power_on(BusConfig::default(), units.peripherals());
    save_snapshot(out, &bus.capture_state())
}

fn inspect(path: &Path) -> Result<(), Box<dyn Error>> {
    let snapshot = load_snapshot(path)?;
    let ram = snapshot.as_work_ram()?;
    for (row, cells) in ram.chunks(16).enumerate() {
        let hex: Vec<String> = cells.iter().map(|b| format!("{:02X}", b)).collect();
        println!("{:04X}: {}", row * 16, hex.join(" "));
    }
    Ok(())
}

fn replay(
    script: &Path,
    from: Option<&Path>,
    watch: WatchPreset,
    out: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let commands = script::parse(&fs::read_to_string(script)?)?;
    log::info!("Replaying {} commands from {}", commands.len(), script.display());

    let mut units = OpenBusUnits::default();
    let config = BusConfig {
        watch,
        record_events: true,
    };
    let mut bus = Bus::power_on(config, units.peripherals());
    if let Some(path) = from {
        bus.restore_state(&load_snapshot(path)?)?;
        log::info!("Starting from {}", path.display());
    }

    for command in commands {
        match command {
            Command::Read(address) => {
                let value = bus.read8(address);
                println!("{} = {}", HexWord(address), HexByte(value));
            }
            Command::Write(address, value) => bus.write8(address, value),
            Command::Reset(kind) => bus.restart(kind),
        }
        for event in bus.take_events() {
            log::debug!("{}", event);
        }
    }

    if let Some(out) = out {
        save_snapshot(out, &bus.capture_state())?;
    }
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Snapshot, Box<dyn Error>> {
    Ok(fs::read_to_string(path)?.parse::<Snapshot>()?)
}

fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), Box<dyn Error>> {
    fs::write(path, format!("{}\n", snapshot))?;
    log::info!("Wrote snapshot to {}", path.display());
    Ok(())
}

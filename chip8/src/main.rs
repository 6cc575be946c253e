use std::path::PathBuf;

use clap::Parser;

use emu8_core::CLOCK_SPEED;

mod beeper;
mod keymap;
mod run;

/// Emu-8: a Chip-8 interpreter
///
/// Keypad: 1234 / QWER / ASDF / ZXCV. Hold Space to fast forward, Escape quits.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Settings {
    /// Path to the ROM to run
    pub rom: PathBuf,

    /// Microseconds budgeted for each interpreter cycle
    #[arg(long, default_value_t = CLOCK_SPEED / 1_000)]
    pub cycle_micros: u64,

    /// Size multiplier for each Chip-8 pixel
    #[arg(long, default_value_t = 16)]
    pub scale: u32,

    /// Seed for the random number generator, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Never play the beep
    #[arg(long)]
    pub mute: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run::run(Settings::parse())
}

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use chip8_core::CLOCK_SPEED;
use crate::keymap::HeldKeys;

mod keymap;
mod run;

/// Runs a Chip-8 ROM headlessly and prints what ends up on screen
#[derive(Parser, Debug)]
#[command(name = "chip8", version)]
pub struct Args {
    /// Path to the ROM to execute
    pub rom: PathBuf,

    /// CPU clock speed in Hz
    #[arg(short, long, default_value_t = CLOCK_SPEED)]
    pub clock: u32,

    /// Maximum number of instructions to execute
    #[arg(short = 'n', long, default_value_t = 10_000)]
    pub cycles: u64,

    /// Seed for the RND instruction; random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Keys held down for the whole run, typed on the 1234/QWER/ASDF/ZXCV layout
    #[arg(long, value_parser = keymap::parse_keys)]
    pub hold: Option<HeldKeys>,

    /// Run as fast as possible instead of respecting the clock speed
    #[arg(long)]
    pub no_sleep: bool,

    /// Print the ROM as Chip-8 assembly instead of running it
    #[arg(short, long)]
    pub disassemble: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = if args.disassemble {
        run::disassemble(&args.rom)
    } else {
        run::run(&args)
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

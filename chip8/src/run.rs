use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PROGRAM_START_ADDRESS};
use chip8_core::{Chip8, Error, Instruction, RandomByte, State, TIMER_FREQUENCY};

use crate::Args;

pub fn run(args: &Args) -> Result<(), Error> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut chip8 = Chip8::with_rng(rng);

    // Load ROM
    let mut reader = BufReader::new(File::open(&args.rom)?);
    let size = chip8.load_rom(&mut reader)?;
    info!("loaded {} ({} bytes)", args.rom.display(), size);

    if let Some(held) = &args.hold {
        for &key in &held.0 {
            chip8.key_press(key);
        }
    }

    let executed = execute(&mut chip8, args);
    print_display(chip8.state());
    print_registers(chip8.state());
    info!("executed {} instructions", executed);
    Ok(())
}

/// Steps the machine until it halts, faults or runs out of cycles.
/// Returns the number of instructions executed.
fn execute<R: RandomByte>(chip8: &mut Chip8<R>, args: &Args) -> u64 {
    let clock = args.clock.max(1);
    let cycle_time = Duration::from_secs(1) / clock;
    let cycles_per_timer_tick = u64::from((clock / TIMER_FREQUENCY).max(1));
    let mut last_cycle = Instant::now();

    for cycle in 0..args.cycles {
        let pc = chip8.state().pc;
        match chip8.step() {
            // A jump onto itself is how most programs stop
            Ok(Instruction::Jp { nnn }) if nnn == pc => {
                info!("halted at {:#05X}", pc);
                return cycle + 1;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("stopped at {:#05X}: {}", pc, e);
                return cycle;
            }
        }

        if (cycle + 1) % cycles_per_timer_tick == 0 {
            chip8.tick_timers();
        }

        // Handle timing
        if !args.no_sleep {
            let elapsed_cycle_time = last_cycle.elapsed();
            if cycle_time > elapsed_cycle_time {
                std::thread::sleep(cycle_time - elapsed_cycle_time);
            }
            last_cycle = Instant::now();
        }
    }
    args.cycles
}

pub fn disassemble(rom: &Path) -> Result<(), Error> {
    let mut bytes = Vec::new();
    File::open(rom)?.read_to_end(&mut bytes)?;
    for line in listing(&bytes) {
        println!("{}", line);
    }
    Ok(())
}

/// One `addr: word  mnemonic` line per 16-bit word of the ROM
fn listing(rom: &[u8]) -> Vec<String> {
    rom.chunks(2)
        .enumerate()
        .map(|(index, word)| {
            let address = PROGRAM_START_ADDRESS as usize + index * 2;
            let op = u16::from(word[0]) << 8 | u16::from(*word.get(1).unwrap_or(&0));
            match Instruction::decode(op) {
                Ok(instruction) => format!("{:03X}: {:04X}  {}", address, op, instruction),
                Err(_) => format!("{:03X}: {:04X}  DW {:#06X}", address, op, op),
            }
        })
        .collect()
}

fn render(state: &State) -> String {
    let mut frame = String::with_capacity((DISPLAY_WIDTH + 1) * DISPLAY_HEIGHT);
    for y in 0..DISPLAY_HEIGHT {
        for x in 0..DISPLAY_WIDTH {
            frame.push(if state.pixel(x, y) { '#' } else { '.' });
        }
        frame.push('\n');
    }
    frame
}

fn print_display(state: &State) {
    print!("{}", render(state));
}

fn print_registers(state: &State) {
    for (index, value) in state.v.iter().enumerate() {
        print!("V{:X}={:02X} ", index, value);
    }
    println!();
    println!(
        "I={:04X} PC={:04X} SP={:X} DT={:02X} ST={:02X}",
        state.i, state.pc, state.sp, state.delay_timer, state.sound_timer
    );
}

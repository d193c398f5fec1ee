use std::io::Read;

use log::{debug, trace};
use rand::rngs::ThreadRng;

use crate::constants::{KEY_COUNT, MEMORY_SIZE, PROGRAM_START_ADDRESS};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::random::RandomByte;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `rng` consumed by RND
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers, which the host should call at 60Hz
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8<R: RandomByte = ThreadRng> {
    state: State,
    rng: R,
}

impl Chip8<ThreadRng> {
    pub fn new() -> Self {
        Chip8::with_rng(rand::thread_rng())
    }
}

impl Default for Chip8<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomByte> Chip8<R> {
    /// Creates a machine with the font loaded that draws random bytes from `rng`
    pub fn with_rng(rng: R) -> Self {
        let mut state = State::new();
        state.load_font();
        Chip8 { state, rng }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader that yields the ROM's bytes
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;

        let start = PROGRAM_START_ADDRESS as usize;
        let max = MEMORY_SIZE - start;
        if rom.len() > max {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max,
            });
        }

        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), start);
        Ok(rom.len())
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keypad[key as usize % KEY_COUNT] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad[key as usize % KEY_COUNT] = false;
    }

    /// Advances the CPU by a single cycle
    /// - refuses to fetch past the end of memory
    /// - gets, decodes and executes the next opcode
    ///
    /// Returns the executed instruction.
    pub fn step(&mut self) -> Result<Instruction, Error> {
        let pc = self.state.pc;
        if pc as usize + 1 >= MEMORY_SIZE {
            return Err(Error::PcOutOfBounds(pc));
        }

        let op = self.state.fetch();
        let instruction = Instruction::decode(op)?;
        trace!(
            "{:04X} {:<16} v{:02X?} i{:04X} pc{:04X}",
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i,
            pc
        );
        instruction.execute(&mut self.state, &mut self.rng)?;
        Ok(instruction)
    }

    /// Decrements both timers if they are running
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether a host should be beeping right now
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

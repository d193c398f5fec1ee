//! The Chip-8 opcode execution engine: machine state, fetch, decode and the
//! instruction set, plus a small `Chip8` wrapper for hosts to drive it.

pub use chip8::Chip8;
pub use constants::{CLOCK_SPEED, TIMER_FREQUENCY};
pub use error::Error;
pub use instruction::Instruction;
pub use random::RandomByte;
pub use state::{FrameBuffer, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
pub mod opcode;
pub mod operations;
mod random;
pub mod state;

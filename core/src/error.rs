use thiserror::Error;

/// Faults a host can run into while driving the machine.
///
/// Instructions themselves never fail; these are raised by decode and by the
/// guards around fetch, CALL and RET.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),

    #[error("stack overflow calling from {pc:#06X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow returning from {pc:#06X}")]
    StackUnderflow { pc: u16 },

    #[error("program counter {0:#06X} is outside of memory")]
    PcOutOfBounds(u16),

    #[error("ROM is {size} bytes but only {max} fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH, FONT_SET, FONT_START, KEY_COUNT, MEMORY_SIZE,
    PROGRAM_START_ADDRESS, REGISTER_COUNT, STACK_SIZE,
};

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag and may still be read as data
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Pointer
/// - (sp) an index into the stack; 0 means empty and stack[0] is never written
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - they are counted down at 60Hz by the host, not by instruction execution
///
/// ## Memory
/// - 16 return addresses on the stack
/// - 4096 bytes of addressable memory; 0x000..0x200 is reserved for the font
/// - 64x32 monochrome frame buffer packed 8 pixels per byte
///
/// ## Input
/// - 16 key states written by the host and only read by instructions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub memory: [u8; MEMORY_SIZE],
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub keypad: [bool; KEY_COUNT],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

/// The FrameBuffer is row-major: row y occupies bytes y*8..y*8+8 and the
/// leftmost pixel of each byte is its most significant bit
pub type FrameBuffer = [u8; DISPLAY_SIZE];

impl State {
    pub fn new() -> Self {
        State {
            memory: [0; MEMORY_SIZE],
            v: [0; REGISTER_COUNT],
            i: 0,
            delay_timer: 0,
            sound_timer: 0,
            pc: PROGRAM_START_ADDRESS,
            sp: 0,
            stack: [0; STACK_SIZE],
            keypad: [false; KEY_COUNT],
            frame_buffer: [0; DISPLAY_SIZE],
            draw_flag: false,
        }
    }

    /// Copies the hexadecimal font glyphs into reserved memory
    pub fn load_font(&mut self) {
        let start = FONT_START as usize;
        self.memory[start..start + FONT_SET.len()].copy_from_slice(&FONT_SET);
    }

    /// Gets the opcode currently pointed at by the pc and advances the pc past it.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    ///
    /// The caller must make sure pc + 1 is addressable.
    pub fn fetch(&mut self) -> u16 {
        let pc = self.pc as usize;
        let op = u16::from(self.memory[pc]) << 8 | u16::from(self.memory[pc + 1]);
        self.pc += 0x2;
        op
    }

    /// Whether the pixel at (x, y) is lit; coordinates wrap around the display edges
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let (index, mask) = pixel_position(x, y);
        self.frame_buffer[index] & mask != 0
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte index and bit mask of the pixel at (x, y) in a FrameBuffer
pub(crate) fn pixel_position(x: usize, y: usize) -> (usize, u8) {
    let x = x % DISPLAY_WIDTH;
    let y = y % DISPLAY_HEIGHT;
    (y * DISPLAY_WIDTH / 8 + x / 8, 0x80 >> (x % 8))
}

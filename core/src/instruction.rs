use std::fmt;

use crate::constants::STACK_SIZE;
use crate::error::Error;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::random::RandomByte;
use crate::state::State;

/// A decoded Chip-8 instruction with its operands already extracted.
///
/// `x` and `y` are register indices, `kk` an immediate byte, `nnn` an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Sys { nnn: u16 },
    Cls,
    Ret,
    Jp { nnn: u16 },
    Call { nnn: u16 },
    SeByte { x: usize, kk: u8 },
    SneByte { x: usize, kk: u8 },
    SeReg { x: usize, y: usize },
    LdByte { x: usize, kk: u8 },
    AddByte { x: usize, kk: u8 },
    LdReg { x: usize, y: usize },
    Or { x: usize, y: usize },
    And { x: usize, y: usize },
    Xor { x: usize, y: usize },
    AddReg { x: usize, y: usize },
    Sub { x: usize, y: usize },
    Shr { x: usize },
    Subn { x: usize, y: usize },
    Shl { x: usize },
    SneReg { x: usize, y: usize },
    LdI { nnn: u16 },
    JpV0 { nnn: u16 },
    Rnd { x: usize, kk: u8 },
    Drw { x: usize, y: usize, n: u8 },
    Skp { x: usize },
    Sknp { x: usize },
    LdVxDt { x: usize },
    LdVxK { x: usize },
    LdDtVx { x: usize },
    LdStVx { x: usize },
    AddI { x: usize },
    LdF { x: usize },
    LdB { x: usize },
    LdIVx { x: usize },
    LdVxI { x: usize },
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: u16) -> Result<Self, Error> {
        let (x, y, n, kk, nnn) = (op.x(), op.y(), op.n(), op.kk(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x0, ..) => Instruction::Sys { nnn },
            (0x1, ..) => Instruction::Jp { nnn },
            (0x2, ..) => Instruction::Call { nnn },
            (0x3, ..) => Instruction::SeByte { x, kk },
            (0x4, ..) => Instruction::SneByte { x, kk },
            (0x5, .., 0x0) => Instruction::SeReg { x, y },
            (0x6, ..) => Instruction::LdByte { x, kk },
            (0x7, ..) => Instruction::AddByte { x, kk },
            (0x8, .., 0x0) => Instruction::LdReg { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::Shr { x },
            (0x8, .., 0x7) => Instruction::Subn { x, y },
            (0x8, .., 0xE) => Instruction::Shl { x },
            (0x9, .., 0x0) => Instruction::SneReg { x, y },
            (0xA, ..) => Instruction::LdI { nnn },
            (0xB, ..) => Instruction::JpV0 { nnn },
            (0xC, ..) => Instruction::Rnd { x, kk },
            (0xD, ..) => Instruction::Drw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::Skp { x },
            (0xE, _, 0xA, 0x1) => Instruction::Sknp { x },
            (0xF, _, 0x0, 0x7) => Instruction::LdVxDt { x },
            (0xF, _, 0x0, 0xA) => Instruction::LdVxK { x },
            (0xF, _, 0x1, 0x5) => Instruction::LdDtVx { x },
            (0xF, _, 0x1, 0x8) => Instruction::LdStVx { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddI { x },
            (0xF, _, 0x2, 0x9) => Instruction::LdF { x },
            (0xF, _, 0x3, 0x3) => Instruction::LdB { x },
            (0xF, _, 0x5, 0x5) => Instruction::LdIVx { x },
            (0xF, _, 0x6, 0x5) => Instruction::LdVxI { x },
            _ => return Err(Error::UnknownOpcode(op)),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`.
    ///
    /// `state.pc` must already point past the opcode. CALL on a full stack and
    /// RET on an empty one are refused before touching the state; every other
    /// instruction always succeeds.
    pub fn execute(self, state: &mut State, rng: &mut dyn RandomByte) -> Result<(), Error> {
        match self {
            Instruction::Sys { nnn } => sys(state, nnn),
            Instruction::Cls => cls(state),
            Instruction::Ret => {
                if state.sp == 0 {
                    return Err(Error::StackUnderflow { pc: state.pc.wrapping_sub(0x2) });
                }
                ret(state)
            }
            Instruction::Jp { nnn } => jump(state, nnn),
            Instruction::Call { nnn } => {
                if state.sp as usize >= STACK_SIZE - 1 {
                    return Err(Error::StackOverflow { pc: state.pc.wrapping_sub(0x2) });
                }
                call(state, nnn)
            }
            Instruction::SeByte { x, kk } => ske(state, x, kk),
            Instruction::SneByte { x, kk } => skne(state, x, kk),
            Instruction::SeReg { x, y } => skre(state, x, y),
            Instruction::LdByte { x, kk } => load(state, x, kk),
            Instruction::AddByte { x, kk } => add(state, x, kk),
            Instruction::LdReg { x, y } => mv(state, x, y),
            Instruction::Or { x, y } => or(state, x, y),
            Instruction::And { x, y } => and(state, x, y),
            Instruction::Xor { x, y } => xor(state, x, y),
            Instruction::AddReg { x, y } => addr(state, x, y),
            Instruction::Sub { x, y } => sub(state, x, y),
            Instruction::Shr { x } => shr(state, x),
            Instruction::Subn { x, y } => subn(state, x, y),
            Instruction::Shl { x } => shl(state, x),
            Instruction::SneReg { x, y } => skrne(state, x, y),
            Instruction::LdI { nnn } => loadi(state, nnn),
            Instruction::JpV0 { nnn } => jumpi(state, nnn),
            Instruction::Rnd { x, kk } => rnd(state, x, kk, rng.random_byte()),
            Instruction::Drw { x, y, n } => draw(state, x, y, n),
            Instruction::Skp { x } => skpr(state, x),
            Instruction::Sknp { x } => skup(state, x),
            Instruction::LdVxDt { x } => moved(state, x),
            Instruction::LdVxK { x } => keyd(state, x),
            Instruction::LdDtVx { x } => loadd(state, x),
            Instruction::LdStVx { x } => loads(state, x),
            Instruction::AddI { x } => addi(state, x),
            Instruction::LdF { x } => ldspr(state, x),
            Instruction::LdB { x } => bcd(state, x),
            Instruction::LdIVx { x } => stor(state, x),
            Instruction::LdVxI { x } => read(state, x),
        }
        Ok(())
    }
}

/// Renders the instruction as Chip-8 assembly, e.g. `ADD V1, 0x22`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Instruction::Sys { nnn } => write!(f, "SYS {:#05X}", nnn),
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jp { nnn } => write!(f, "JP {:#05X}", nnn),
            Instruction::Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            Instruction::SeByte { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SneByte { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LdByte { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddByte { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::Shr { x } => write!(f, "SHR V{:X}", x),
            Instruction::Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::Shl { x } => write!(f, "SHL V{:X}", x),
            Instruction::SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LdI { nnn } => write!(f, "LD I, {:#05X}", nnn),
            Instruction::JpV0 { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Instruction::Rnd { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::Skp { x } => write!(f, "SKP V{:X}", x),
            Instruction::Sknp { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LdVxDt { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::LdVxK { x } => write!(f, "LD V{:X}, K", x),
            Instruction::LdDtVx { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::LdStVx { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddI { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LdF { x } => write!(f, "LD F, V{:X}", x),
            Instruction::LdB { x } => write!(f, "LD B, V{:X}", x),
            Instruction::LdIVx { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::LdVxI { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

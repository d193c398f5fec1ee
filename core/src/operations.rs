//! One state transition per Chip-8 opcode family.
//!
//! Every function here runs after the fetch has already moved pc past the
//! opcode, so skips add one more instruction and jumps overwrite pc outright.
//! Flags are computed from the operands before anything is written, and VF is
//! written before Vx so that Vx = VF keeps the result.

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, FONT_START, MEMORY_SIZE};
use crate::state::{pixel_position, State};

const VF: usize = 0xF;

/// Address I + offset, wrapped into memory
fn i_offset(state: &State, offset: usize) -> usize {
    (state.i as usize + offset) % MEMORY_SIZE
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc += 0x2;
    }
}

/// machine code routine; ignored
pub fn sys(_state: &mut State, _nnn: u16) {}

/// clear
pub fn cls(state: &mut State) {
    state.frame_buffer.iter_mut().for_each(|byte| *byte = 0);
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn ret(state: &mut State) {
    state.pc = state.stack[state.sp as usize];
    state.sp -= 0x1;
}

/// PC = nnn
pub fn jump(state: &mut State, nnn: u16) {
    state.pc = nnn;
}

/// STACK.push(PC); PC = nnn
pub fn call(state: &mut State, nnn: u16) {
    state.sp += 0x1;
    state.stack[state.sp as usize] = state.pc;
    state.pc = nnn;
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: usize, kk: u8) {
    let condition = state.v[x] == kk;
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: usize, kk: u8) {
    let condition = state.v[x] != kk;
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: usize, y: usize) {
    let condition = state.v[x] == state.v[y];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load(state: &mut State, x: usize, kk: u8) {
    state.v[x] = kk;
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: usize, kk: u8) {
    state.v[x] = state.v[x].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: usize, y: usize) {
    state.v[x] = state.v[y];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: usize, y: usize) {
    state.v[x] |= state.v[y];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: usize, y: usize) {
    state.v[x] &= state.v[y];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: usize, y: usize) {
    state.v[x] ^= state.v[y];
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: usize, y: usize) {
    let (res, over) = state.v[x].overflowing_add(state.v[y]);
    state.v[VF] = over as u8;
    state.v[x] = res;
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[VF] = (vx > vy) as u8;
    state.v[x] = vx.wrapping_sub(vy);
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut State, x: usize) {
    let vx = state.v[x];
    state.v[VF] = vx & 0x1;
    state.v[x] = vx >> 1;
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[VF] = (vy > vx) as u8;
    state.v[x] = vy.wrapping_sub(vx);
}

/// Vx <<= 1; VF = msb
pub fn shl(state: &mut State, x: usize) {
    let vx = state.v[x];
    state.v[VF] = (vx >> 7) & 0x1;
    state.v[x] = vx << 1;
}

/// if Vx != Vy then pc +=2
pub fn skrne(state: &mut State, x: usize, y: usize) {
    let condition = state.v[x] != state.v[y];
    skip_if(state, condition);
}

/// I = nnn
pub fn loadi(state: &mut State, nnn: u16) {
    state.i = nnn;
}

/// PC = V0 + nnn
pub fn jumpi(state: &mut State, nnn: u16) {
    state.pc = nnn + u16::from(state.v[0x0]);
}

/// Vx = random_byte & kk
pub fn rnd(state: &mut State, x: usize, kk: u8, random_byte: u8) {
    state.v[x] = random_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels would be erased
pub fn draw(state: &mut State, x: usize, y: usize, n: u8) {
    let origin_x = state.v[x] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[y] as usize % DISPLAY_HEIGHT;
    let mut collision = false;

    for row in 0..n as usize {
        let sprite = state.memory[i_offset(state, row)];
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            let (index, mask) = pixel_position(origin_x + bit, origin_y + row);
            collision |= state.frame_buffer[index] & mask != 0;
            state.frame_buffer[index] ^= mask;
        }
    }

    state.v[VF] = collision as u8;
    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: usize) {
    let condition = state.keypad[(state.v[x] & 0xF) as usize];
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: usize) {
    let condition = !state.keypad[(state.v[x] & 0xF) as usize];
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(state: &mut State, x: usize) {
    state.v[x] = state.delay_timer;
}

/// await keypress for Vx
/// Rewinds the pc onto this opcode until some key is down
pub fn keyd(state: &mut State, x: usize) {
    match state.keypad.iter().position(|&pressed| pressed) {
        Some(key) => state.v[x] = key as u8,
        None => state.pc -= 0x2,
    }
}

/// DT = Vx
pub fn loadd(state: &mut State, x: usize) {
    state.delay_timer = state.v[x];
}

/// ST = Vx
pub fn loads(state: &mut State, x: usize) {
    state.sound_timer = state.v[x];
}

/// I += Vx
pub fn addi(state: &mut State, x: usize) {
    state.i = state.i.wrapping_add(u16::from(state.v[x]));
}

/// I = sprite(Vx)
/// Set I to the memory address of the font glyph for the low nibble of Vx
pub fn ldspr(state: &mut State, x: usize) {
    state.i = FONT_START + u16::from(state.v[x] & 0xF) * FONT_GLYPH_SIZE;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: usize) {
    let vx = state.v[x];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in digits.iter().enumerate() {
        let address = i_offset(state, offset);
        state.memory[address] = *digit;
    }
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: usize) {
    for offset in 0..=x {
        let address = i_offset(state, offset);
        state.memory[address] = state.v[offset];
    }
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: usize) {
    for offset in 0..=x {
        state.v[offset] = state.memory[i_offset(state, offset)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sys_changes_nothing() {
        let mut state = State::new();
        state.v[0x3] = 0x42;
        let before = state.clone();
        sys(&mut state, 0x123);
        assert_eq!(state, before);
    }

    #[test]
    fn test_ret_pops_into_pc() {
        let mut state = State::new();
        state.sp = 0x2;
        state.stack[0x2] = 0x0456;
        ret(&mut state);
        assert_eq!(state.pc, 0x0456);
        assert_eq!(state.sp, 0x1);
    }

    #[test]
    fn test_call_never_writes_stack_zero() {
        let mut state = State::new();
        call(&mut state, 0x300);
        assert_eq!(state.sp, 0x1);
        assert_eq!(state.stack[0x0], 0x0);
        assert_eq!(state.stack[0x1], 0x200);
    }

    #[test]
    fn test_addr_flag_uses_operands_before_write() {
        // VF as the source operand is read before the carry overwrites it
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        state.v[VF] = 0x01;
        addr(&mut state, 0x1, VF);
        assert_eq!(state.v[0x1], 0x00);
        assert_eq!(state.v[VF], 0x1);
    }

    #[test]
    fn test_addr_into_vf_keeps_result() {
        let mut state = State::new();
        state.v[VF] = 0xFF;
        state.v[0x2] = 0x03;
        addr(&mut state, VF, 0x2);
        assert_eq!(state.v[VF], 0x02);
    }

    #[test]
    fn test_sub_into_vf_keeps_result() {
        let mut state = State::new();
        state.v[VF] = 0x05;
        state.v[0x2] = 0x03;
        sub(&mut state, VF, 0x2);
        assert_eq!(state.v[VF], 0x02);
    }

    #[test]
    fn test_sub_equal_operands_clears_flag() {
        let mut state = State::new();
        state.v[0x1] = 0x10;
        state.v[0x2] = 0x10;
        sub(&mut state, 0x1, 0x2);
        assert_eq!(state.v[0x1], 0x00);
        assert_eq!(state.v[VF], 0x0);
    }

    #[test]
    fn test_shl_vf_keeps_result() {
        let mut state = State::new();
        state.v[VF] = 0x81;
        shl(&mut state, VF);
        assert_eq!(state.v[VF], 0x02);
    }

    #[test]
    fn test_jumpi_adds_v0() {
        let mut state = State::new();
        state.v[0x0] = 0xFF;
        jumpi(&mut state, 0x0FFF);
        assert_eq!(state.pc, 0x10FE);
    }

    #[test]
    fn test_draw_wraps_around_edges() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300] = 0xC0;
        state.v[0x0] = 63;
        state.v[0x1] = 31;
        draw(&mut state, 0x0, 0x1, 1);
        assert!(state.pixel(63, 31));
        assert!(state.pixel(0, 31));
        assert_eq!(state.v[VF], 0x0);
    }

    #[test]
    fn test_draw_twice_erases_and_collides() {
        let mut state = State::new();
        state.load_font();
        draw(&mut state, 0x0, 0x0, 5);
        draw(&mut state, 0x0, 0x0, 5);
        assert!(state.frame_buffer.iter().all(|&b| b == 0));
        assert_eq!(state.v[VF], 0x1);
    }

    #[test]
    fn test_keyd_blocks_without_key() {
        let mut state = State::new();
        state.pc = 0x202;
        keyd(&mut state, 0x3);
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_keyd_takes_lowest_key() {
        let mut state = State::new();
        state.pc = 0x202;
        state.keypad[0x9] = true;
        state.keypad[0x4] = true;
        keyd(&mut state, 0x3);
        assert_eq!(state.v[0x3], 0x4);
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_addi_wraps() {
        let mut state = State::new();
        state.i = 0xFFFF;
        state.v[0x1] = 0x2;
        addi(&mut state, 0x1);
        assert_eq!(state.i, 0x1);
    }

    #[test]
    fn test_stor_wraps_past_end_of_memory() {
        let mut state = State::new();
        state.i = 0xFFF;
        state.v[0x0] = 0xAA;
        state.v[0x1] = 0xBB;
        stor(&mut state, 0x1);
        assert_eq!(state.memory[0xFFF], 0xAA);
        assert_eq!(state.memory[0x000], 0xBB);
        assert_eq!(state.i, 0xFFF);
    }

    #[test]
    fn test_ldspr_uses_low_nibble() {
        let mut state = State::new();
        state.v[0x1] = 0x1F;
        ldspr(&mut state, 0x1);
        assert_eq!(state.i, FONT_START + 0xF * 5);
    }
}

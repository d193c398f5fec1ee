use chip8_core::{Instruction, RandomByte, State};
use proptest::prelude::*;

struct Fixed(u8);

impl RandomByte for Fixed {
    fn random_byte(&mut self) -> u8 {
        self.0
    }
}

/// Loads `op` at the pc, fetches it and executes it
fn run(state: &mut State, op: u16) {
    let pc = state.pc as usize;
    state.memory[pc..pc + 2].copy_from_slice(&op.to_be_bytes());
    let op = state.fetch();
    Instruction::decode(op)
        .unwrap()
        .execute(state, &mut Fixed(0))
        .unwrap();
}

/// Two distinct registers below VF
fn register_pair() -> impl Strategy<Value = (u16, u16)> {
    (0u16..0xF, 0u16..0xF).prop_filter("distinct registers", |(x, y)| x != y)
}

proptest! {
    #[test]
    fn add_sets_carry_iff_sum_overflows(vx in any::<u8>(), vy in any::<u8>(), (x, y) in register_pair()) {
        let mut state = State::new();
        state.v[x as usize] = vx;
        state.v[y as usize] = vy;
        run(&mut state, 0x8004 | x << 8 | y << 4);
        let sum = u16::from(vx) + u16::from(vy);
        prop_assert_eq!(state.v[0xF], (sum > 0xFF) as u8);
        prop_assert_eq!(state.v[x as usize], (sum % 256) as u8);
    }

    #[test]
    fn sub_sets_flag_iff_no_borrow(vx in any::<u8>(), vy in any::<u8>(), (x, y) in register_pair()) {
        let mut state = State::new();
        state.v[x as usize] = vx;
        state.v[y as usize] = vy;
        run(&mut state, 0x8005 | x << 8 | y << 4);
        prop_assert_eq!(state.v[0xF], (vx > vy) as u8);
        prop_assert_eq!(state.v[x as usize], vx.wrapping_sub(vy));
    }

    #[test]
    fn subn_sets_flag_iff_vy_greater(vx in any::<u8>(), vy in any::<u8>(), (x, y) in register_pair()) {
        let mut state = State::new();
        state.v[x as usize] = vx;
        state.v[y as usize] = vy;
        run(&mut state, 0x8007 | x << 8 | y << 4);
        prop_assert_eq!(state.v[0xF], (vy > vx) as u8);
        prop_assert_eq!(state.v[x as usize], vy.wrapping_sub(vx));
    }

    #[test]
    fn add_byte_wraps_and_leaves_vf(vx in any::<u8>(), kk in any::<u8>(), vf in any::<u8>(), x in 0u16..0xF) {
        let mut state = State::new();
        state.v[x as usize] = vx;
        state.v[0xF] = vf;
        run(&mut state, 0x7000 | x << 8 | u16::from(kk));
        prop_assert_eq!(state.v[x as usize], vx.wrapping_add(kk));
        prop_assert_eq!(state.v[0xF], vf);
    }

    #[test]
    fn cls_zeroes_any_display(frame in prop::collection::vec(any::<u8>(), 256)) {
        let mut state = State::new();
        state.frame_buffer.copy_from_slice(&frame);
        run(&mut state, 0x00E0);
        prop_assert!(state.frame_buffer.iter().all(|&b| b == 0));
    }

    #[test]
    fn call_then_ret_returns_after_call(start in 0x100u16..0x7FF, target in 0x800u16..0xFFE) {
        let mut state = State::new();
        state.pc = start * 2;
        let pc_before_call = state.pc;
        run(&mut state, 0x2000 | target);
        prop_assert_eq!(state.pc, target);
        run(&mut state, 0x00EE);
        prop_assert_eq!(state.pc, pc_before_call + 2);
        prop_assert_eq!(state.sp, 0);
    }

    #[test]
    fn skips_advance_by_four_when_taken(vx in any::<u8>(), vy in any::<u8>(), kk in any::<u8>()) {
        let cases = [
            (0x3000 | u16::from(kk), vx == kk),
            (0x4000 | u16::from(kk), vx != kk),
            (0x5010, vx == vy),
            (0x9010, vx != vy),
        ];
        for &(op, taken) in cases.iter() {
            let mut state = State::new();
            state.v[0x0] = vx;
            state.v[0x1] = vy;
            run(&mut state, op);
            prop_assert_eq!(state.pc, if taken { 0x204 } else { 0x202 });
        }
    }

    #[test]
    fn jump_replaces_fetch_advance(nnn in 0u16..0x1000) {
        let mut state = State::new();
        run(&mut state, 0x1000 | nnn);
        prop_assert_eq!(state.pc, nnn);
    }
}

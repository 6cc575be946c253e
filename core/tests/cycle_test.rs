//! Whole-program tests
//!
//! Loads small ROMs and drives them through the public cycle interface.

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::{Chip8, Chip8Error};

fn load(rom: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(0x8);
    chip8.load_rom(rom).expect("ROM should fit in memory");
    chip8
}

fn run(chip8: &mut Chip8, cycles: usize) {
    for _ in 0..cycles {
        chip8.run_cycle().expect("cycle should not fault");
    }
}

#[test]
fn test_undefined_opcode_faults_on_first_cycle() {
    let mut chip8 = load(&[0x00, 0xE2]);
    assert_eq!(
        chip8.run_cycle(),
        Err(Chip8Error::UndefinedOpcode { opcode: 0x00E2 })
    );
}

#[test]
fn test_zero_word_clears_screen() {
    // V0 = 0; I = glyph 0; draw; then a bare 0000
    let mut chip8 = load(&[0x60, 0x00, 0xF0, 0x29, 0xD0, 0x05, 0x00, 0x00]);
    run(&mut chip8, 3);
    assert!(chip8.frame_buffer().iter().flatten().any(|&px| px == 1));
    chip8.clear_draw_flag();

    assert_eq!(chip8.run_cycle(), Ok(()));
    assert!(chip8.frame_buffer().iter().flatten().all(|&px| px == 0));
    assert!(chip8.draw_flag());
    assert_eq!(chip8.pc(), 0x200 + 8);
}

#[test]
fn test_machine_code_call_faults() {
    let mut chip8 = load(&[0x0A, 0xBC]);
    assert_eq!(
        chip8.run_cycle(),
        Err(Chip8Error::UndefinedOpcode { opcode: 0x0ABC })
    );
    assert_eq!(chip8.fault(), Some(&Chip8Error::UndefinedOpcode { opcode: 0x0ABC }));
}

#[test]
fn test_add_program() {
    // V0 = 10; V1 = 5; V0 += V1
    let mut chip8 = load(&[0x60, 0x0A, 0x61, 0x05, 0x80, 0x14]);
    run(&mut chip8, 3);
    assert_eq!(chip8.v(0x0), 15);
    assert_eq!(chip8.v(0xF), 0);
    assert_eq!(chip8.pc(), 0x200 + 6);
}

#[test]
fn test_call_then_return_lands_after_call() {
    let mut chip8 = load(&[
        0x22, 0x06, // 0x200: CALL 0x206
        0x61, 0x01, // 0x202: V1 = 1
        0x12, 0x04, // 0x204: JP 0x204
        0x00, 0xEE, // 0x206: RET
    ]);
    run(&mut chip8, 1);
    assert_eq!(chip8.pc(), 0x206);
    run(&mut chip8, 1);
    assert_eq!(chip8.pc(), 0x202);
    run(&mut chip8, 3);
    assert_eq!(chip8.v(0x1), 0x1);
    assert_eq!(chip8.pc(), 0x204);
}

#[test]
fn test_registers_round_trip_through_memory() {
    let mut chip8 = load(&[
        0xA3, 0x00, // I = 0x300
        0x60, 0x11, // V0 = 0x11
        0x61, 0x22, // V1 = 0x22
        0x62, 0x33, // V2 = 0x33
        0xF2, 0x55, // mem[I..=I+2] = V0..=V2
        0x60, 0x00, // V0 = 0
        0x61, 0x00, // V1 = 0
        0x62, 0x00, // V2 = 0
        0xF2, 0x65, // V0..=V2 = mem[I..=I+2]
    ]);
    run(&mut chip8, 9);
    assert_eq!(chip8.registers()[..3], [0x11, 0x22, 0x33]);
    assert_eq!(chip8.memory()[0x300..0x303], [0x11, 0x22, 0x33]);
}

#[test]
fn test_wait_key_blocks_until_pressed() {
    let mut chip8 = load(&[0xF3, 0x0A]);
    run(&mut chip8, 5);
    assert_eq!(chip8.pc(), 0x200);

    chip8.key_press(0x7);
    run(&mut chip8, 1);
    assert_eq!(chip8.pc(), 0x202);
    assert_eq!(chip8.v(0x3), 0x7);
}

#[test]
fn test_clear_screen_marks_display_dirty() {
    let mut chip8 = load(&[
        0xD0, 0x05, // draw the 0 glyph at (0, 0)
        0x00, 0xE0, // clear
    ]);
    run(&mut chip8, 1);
    assert!(chip8.take_frame().is_some());
    run(&mut chip8, 1);
    assert!(chip8.draw_flag());
    assert!(chip8
        .frame_buffer()
        .iter()
        .all(|row| row.iter().all(|&pixel| pixel == 0)));
}

#[test]
fn test_draws_bcd_digits_with_sprite_sheet() {
    let mut chip8 = load(&[
        0x60, 0x7B, // V0 = 123
        0xA3, 0x00, // I = 0x300
        0xF0, 0x33, // mem[I..I+3] = 1, 2, 3
        0xF2, 0x65, // V0..=V2 = 1, 2, 3
        0xF1, 0x29, // I = glyph(V1)
        0x63, 0x00, // V3 = 0
        0xD3, 0x35, // draw the 2 glyph at (0, 0)
    ]);
    run(&mut chip8, 7);
    assert_eq!(chip8.registers()[..3], [0x1, 0x2, 0x3]);

    let frame = chip8.frame_buffer();
    assert_eq!(frame.len(), DISPLAY_HEIGHT);
    assert_eq!(frame[0].len(), DISPLAY_WIDTH);
    // 0xF0, 0x10, 0xF0, 0x80, 0xF0
    assert_eq!(frame[0][..5], [1, 1, 1, 1, 0]);
    assert_eq!(frame[1][..5], [0, 0, 0, 1, 0]);
    assert_eq!(frame[2][..5], [1, 1, 1, 1, 0]);
    assert_eq!(frame[3][..5], [1, 0, 0, 0, 0]);
    assert_eq!(frame[4][..5], [1, 1, 1, 1, 0]);
    assert_eq!(chip8.v(0xF), 0);
}

#[test]
fn test_drawing_twice_erases_and_collides() {
    let mut chip8 = load(&[0xD0, 0x05, 0xD0, 0x05]);
    run(&mut chip8, 2);
    assert_eq!(chip8.v(0xF), 1);
    assert!(chip8
        .frame_buffer()
        .iter()
        .all(|row| row.iter().all(|&pixel| pixel == 0)));
}

#[test]
fn test_recursion_overflows_stack() {
    // CALL 0x200 forever
    let mut chip8 = load(&[0x22, 0x00]);
    run(&mut chip8, 16);
    assert_eq!(
        chip8.run_cycle(),
        Err(Chip8Error::StackOverflow { pc: 0x200 })
    );
}

#[test]
fn test_jump_to_last_byte_faults_on_fetch() {
    let mut chip8 = load(&[0x1F, 0xFF]);
    run(&mut chip8, 1);
    assert_eq!(
        chip8.run_cycle(),
        Err(Chip8Error::MemoryOutOfBounds { address: 0x1000 })
    );
}

#[test]
fn test_skips_jump_over_next_instruction() {
    let mut chip8 = load(&[
        0x60, 0x05, // V0 = 5
        0x30, 0x05, // skip if V0 == 5
        0x61, 0x01, // V1 = 1 (skipped)
        0x62, 0x01, // V2 = 1
    ]);
    run(&mut chip8, 3);
    assert_eq!(chip8.v(0x1), 0x0);
    assert_eq!(chip8.v(0x2), 0x1);
    assert_eq!(chip8.pc(), 0x208);
}

#[test]
fn test_sound_timer_counts_down_per_cycle() {
    let mut chip8 = load(&[
        0x60, 0x02, // V0 = 2
        0xF0, 0x18, // ST = V0
        0x12, 0x04, // JP 0x204
    ]);
    run(&mut chip8, 2);
    assert!(chip8.is_beeping());
    run(&mut chip8, 1);
    assert_eq!(chip8.sound_timer(), 0);
    assert!(!chip8.is_beeping());
    run(&mut chip8, 3);
    assert_eq!(chip8.sound_timer(), 0);
}

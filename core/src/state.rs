use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    SPRITE_SHEET, STACK_SIZE,
};
use crate::error::Chip8Error;

/// The FrameBuffer is indexed as [y][x]; every cell is either 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The complete Chip-8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a memory address register; nominally 12 bits but allowed to run past 0xFFF
///
/// Counter
/// - (pc) the program counter, starting at 0x200
///
/// Stack
/// - 16 return addresses plus (sp), the number of slots in use
///
/// Timers
/// - 2 8-bit timers (delay & sound), each decremented once per cycle while non-zero
///
/// ## Memory
/// - 4096 bytes; the sprite sheet lives at 0x000 and programs from 0x200
///
/// ## Display
/// - a 64x32 frame buffer plus a flag marking it as changed since the display last consumed it
///
/// ## Input
/// - the pressed status of keys 0..F
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub pressed_keys: [bool; KEY_COUNT],
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START as u16,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            pressed_keys: [false; KEY_COUNT],
        }
    }

    /// Pushes a return address onto the stack
    pub fn push(&mut self, addr: u16) -> Result<(), Chip8Error> {
        let sp = self.sp as usize;
        if sp >= STACK_SIZE {
            return Err(Chip8Error::StackOverflow { pc: self.pc });
        }
        self.stack[sp] = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recently pushed return address
    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Borrows `len` bytes of memory starting at `addr`
    pub fn read(&self, addr: usize, len: usize) -> Result<&[u8], Chip8Error> {
        let end = Self::checked_end(addr, len)?;
        Ok(&self.memory[addr..end])
    }

    /// Copies `bytes` into memory starting at `addr`
    pub fn write(&mut self, addr: usize, bytes: &[u8]) -> Result<(), Chip8Error> {
        let end = Self::checked_end(addr, bytes.len())?;
        self.memory[addr..end].copy_from_slice(bytes);
        Ok(())
    }

    /// The (exclusive) end of a memory range, or the first address that falls outside memory
    fn checked_end(addr: usize, len: usize) -> Result<usize, Chip8Error> {
        let end = addr + len;
        if end > MEMORY_SIZE {
            Err(Chip8Error::MemoryOutOfBounds {
                address: addr.max(MEMORY_SIZE),
            })
        } else {
            Ok(end)
        }
    }

    /// Decrements both timers, stopping at zero
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

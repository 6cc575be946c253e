use log::{debug, error, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{KEY_COUNT, MAX_ROM_SIZE, PROGRAM_START, REGISTER_COUNT};
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random source behind CXNN
///  - the `fault` that halted execution, if any
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU and its timers by a single cycle
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its sound timer for playback by some speaker
pub struct Chip8 {
    state: State,
    rng: StdRng,
    fault: Option<Chip8Error>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a Chip-8 whose random numbers are reproducible
    ///
    /// # Arguments
    /// * `seed` seeds the generator behind CXNN
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            rng,
            fault: None,
        }
    }

    /// Resets registers, memory, timers, keys and the screen, then re-seeds the sprite sheet
    pub fn reset(&mut self) {
        debug!("resetting machine state");
        self.state = State::new();
        self.fault = None;
    }

    /// Resets the machine and loads a rom at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw program bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.reset();
        self.state.write(PROGRAM_START, rom)?;
        info!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Advances the machine by a single cycle
    /// - fetches the opcode at the pc
    /// - decodes and executes it
    /// - ticks both timers
    ///
    /// A fault is returned once and then latched: every later call returns it again without
    /// touching the state until the next `reset` or `load_rom`.
    pub fn run_cycle(&mut self) -> Result<(), Chip8Error> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        match self.step() {
            Ok(()) => {
                self.state.tick_timers();
                Ok(())
            }
            Err(fault) => {
                error!("halting at pc {:#05X}: {}", self.state.pc, fault);
                self.fault = Some(fault.clone());
                Err(fault)
            }
        }
    }

    fn step(&mut self) -> Result<(), Chip8Error> {
        let op = self.get_op()?;
        let instruction = Instruction::decode(op)?;
        trace!(
            "{:04X} {:<16} v{:02X?} i{:04X} pc{:04X}",
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i,
            self.state.pc
        );
        instruction.execute(&mut self.state, &mut self.rng)
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16, Chip8Error> {
        let bytes = self.state.read(self.state.pc as usize, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// The fault that halted the machine, if any
    pub fn fault(&self) -> Option<&Chip8Error> {
        self.fault.as_ref()
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the frame buffer changed since the display last cleared the flag
    pub fn draw_flag(&self) -> bool {
        self.state.draw_flag
    }

    pub fn clear_draw_flag(&mut self) {
        self.state.draw_flag = false;
    }

    /// Returns the FrameBuffer if the display should be redrawn, marking it as consumed
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad index 0..F; anything else is ignored
    /// * `pressed` whether the key is down
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        match self.state.pressed_keys.get_mut(key as usize) {
            Some(slot) => *slot = pressed,
            None => warn!("ignoring key {:#04X}; the keypad only has {} keys", key, KEY_COUNT),
        }
    }

    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// A speaker should beep for as long as this holds
    pub fn is_beeping(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    /// The value of register Vx
    ///
    /// # Panics
    /// If `x` is not a register index (0x0 to 0xF).
    pub fn v(&self, x: u8) -> u8 {
        self.state.v[x as usize]
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.state.v
    }

    /// Read-only view of the whole 4 KiB address space, for debuggers and tests.
    ///
    /// A front-end only needs the frame buffer, timers and keypad; programs can change memory
    /// only by executing instructions.
    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

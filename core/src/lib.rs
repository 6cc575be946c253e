//! # Emu-8 core
//!
//! A Chip-8 interpreter with no opinions about windows, speakers or keyboards.
//!
//! A driver owns a [`Chip8`], loads a ROM into it and then calls [`Chip8::run_cycle`] at a steady
//! cadence (see [`CLOCK_SPEED`]), feeding key presses in and reading the frame buffer and sound
//! timer out between cycles.
//!
//! ```
//! use emu8_core::Chip8;
//!
//! let mut chip8 = Chip8::with_seed(0);
//! // V0 = 10; V1 = 5; V0 += V1
//! chip8.load_rom(&[0x60, 0x0A, 0x61, 0x05, 0x80, 0x14]).unwrap();
//! for _ in 0..3 {
//!     chip8.run_cycle().unwrap();
//! }
//! assert_eq!(chip8.v(0x0), 15);
//! ```

pub use chip8::Chip8;
pub use constants::CLOCK_SPEED;
pub use error::Chip8Error;
pub use instruction::Instruction;
pub use state::FrameBuffer;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;

use thiserror::Error;

/// Faults that stop the interpreter.
///
/// Every variant describes a malformed or unsupported program; none of them can be recovered from
/// without a reset or a fresh ROM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("undefined opcode {opcode:#06X}")]
    UndefinedOpcode { opcode: u16 },

    #[error("ROM is {size} bytes but at most {max} bytes fit in program memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("stack overflow calling a subroutine from {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow returning from {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },
}

use std::fmt;

use rand::Rng;

use crate::error::Chip8Error;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded Chip-8 instruction with its operands.
///
/// Register operands are 4-bit indices (`x`, `y`), `nn` is a byte literal, `n` a nibble literal
/// and `addr` a 12-bit address.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0 (any 0XY0)
    Clear,
    /// 00EE (any 0XYE)
    Return,
    /// 1NNN
    Jump { addr: u16 },
    /// 2NNN
    Call { addr: u16 },
    /// 3XNN
    SkipEqual { x: u8, nn: u8 },
    /// 4XNN
    SkipNotEqual { x: u8, nn: u8 },
    /// 5XY0
    SkipRegEqual { x: u8, y: u8 },
    /// 6XNN
    Load { x: u8, nn: u8 },
    /// 7XNN
    Add { x: u8, nn: u8 },
    /// 8XY0
    Move { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4
    AddReg { x: u8, y: u8 },
    /// 8XY5
    Sub { x: u8, y: u8 },
    /// 8XY6
    ShiftRight { x: u8 },
    /// 8XY7
    SubN { x: u8, y: u8 },
    /// 8XYE
    ShiftLeft { x: u8 },
    /// 9XY0
    SkipRegNotEqual { x: u8, y: u8 },
    /// ANNN
    LoadI { addr: u16 },
    /// BNNN
    JumpV0 { addr: u16 },
    /// CXNN
    Random { x: u8, nn: u8 },
    /// DXYN
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E
    SkipPressed { x: u8 },
    /// EXA1
    SkipNotPressed { x: u8 },
    /// FX07
    LoadDelay { x: u8 },
    /// FX0A
    WaitKey { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E
    AddI { x: u8 },
    /// FX29
    LoadGlyph { x: u8 },
    /// FX33
    Bcd { x: u8 },
    /// FX55
    Store { x: u8 },
    /// FX65
    Read { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for a fetched 16-bit word
    pub fn decode(op: u16) -> Result<Self, Chip8Error> {
        use Instruction::*;

        let (x, y, n, nn, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        let instruction = match op.nibbles() {
            // 0NNN machine code routines are never dispatched; only N0 selects within group 0
            (0x0, .., 0x0) => Clear,
            (0x0, .., 0xE) => Return,
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SkipEqual { x, nn },
            (0x4, ..) => SkipNotEqual { x, nn },
            (0x5, ..) => SkipRegEqual { x, y },
            (0x6, ..) => Load { x, nn },
            (0x7, ..) => Add { x, nn },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x },
            (0x8, .., 0x7) => SubN { x, y },
            (0x8, .., 0xE) => ShiftLeft { x },
            (0x9, ..) => SkipRegNotEqual { x, y },
            (0xA, ..) => LoadI { addr },
            (0xB, ..) => JumpV0 { addr },
            (0xC, ..) => Random { x, nn },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipPressed { x },
            (0xE, _, 0xA, 0x1) => SkipNotPressed { x },
            (0xF, _, 0x0, 0x7) => LoadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddI { x },
            (0xF, _, 0x2, 0x9) => LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => Bcd { x },
            (0xF, _, 0x5, 0x5) => Store { x },
            (0xF, _, 0x6, 0x5) => Read { x },
            _ => return Err(Chip8Error::UndefinedOpcode { opcode: op }),
        };
        Ok(instruction)
    }

    /// Applies the Instruction to `state`, advancing or redirecting the PC as it goes
    pub fn execute<R: Rng + ?Sized>(self, state: &mut State, rng: &mut R) -> Result<(), Chip8Error> {
        use Instruction::*;

        match self {
            Clear => clr(state),
            Return => rts(state),
            Jump { addr } => jump(state, addr),
            Call { addr } => call(state, addr),
            SkipEqual { x, nn } => ske(state, x, nn),
            SkipNotEqual { x, nn } => skne(state, x, nn),
            SkipRegEqual { x, y } => skre(state, x, y),
            Load { x, nn } => load(state, x, nn),
            Add { x, nn } => add(state, x, nn),
            Move { x, y } => mv(state, x, y),
            Or { x, y } => or(state, x, y),
            And { x, y } => and(state, x, y),
            Xor { x, y } => xor(state, x, y),
            AddReg { x, y } => addr(state, x, y),
            Sub { x, y } => sub(state, x, y),
            ShiftRight { x } => shr(state, x),
            SubN { x, y } => subn(state, x, y),
            ShiftLeft { x } => shl(state, x),
            SkipRegNotEqual { x, y } => skrne(state, x, y),
            LoadI { addr } => loadi(state, addr),
            JumpV0 { addr } => jumpi(state, addr),
            Random { x, nn } => rand(state, x, nn, rng),
            Draw { x, y, n } => draw(state, x, y, n),
            SkipPressed { x } => skpr(state, x),
            SkipNotPressed { x } => skup(state, x),
            LoadDelay { x } => moved(state, x),
            WaitKey { x } => keyd(state, x),
            SetDelay { x } => loads(state, x),
            SetSound { x } => ld(state, x),
            AddI { x } => addi(state, x),
            LoadGlyph { x } => ldspr(state, x),
            Bcd { x } => bcd(state, x),
            Store { x } => stor(state, x),
            Read { x } => read(state, x),
        }
    }
}

/// Assembly-style mnemonics, used when tracing execution
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SkipEqual { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipNotEqual { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipRegEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Add { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x } => write!(f, "SHR V{:X}", x),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x } => write!(f, "SHL V{:X}", x),
            SkipRegNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadI { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpV0 { addr } => write!(f, "JP V0, {:#05X}", addr),
            Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipPressed { x } => write!(f, "SKP V{:X}", x),
            SkipNotPressed { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Store { x } => write!(f, "LD [I], V{:X}", x),
            Read { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, read as four nibbles `N3 N2 N1 N0` (most significant first).
/// The operation is selected by some combination of:
/// - `(n, _, _, _)` the primary group; applies to all opcodes
/// - `(_, _, _, n)` the sub-operation within groups 0x0 and 0x8
/// - `(_, _, n, n)` the sub-operation within groups 0xE and 0xF
///
/// Nibbles not used to select the operation carry its operands.
/// - `(_, n, n, n)` NNN, a 12-bit address
/// - `(_, _, n, n)` NN, a byte literal
/// - `(_, _, _, n)` N, a nibble literal (sprite height)
/// - `(_, n, _, _)` X, the register Vx or the last register of the range V0..=Vx
/// - `(_, _, n, _)` Y, the register Vy
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[_X__]`
    fn x(&self) -> u8;

    /// `[__Y_]`
    fn y(&self) -> u8;

    /// `[___N]`
    fn n(&self) -> u8;

    /// `[__NN]`
    fn nn(&self) -> u8;

    /// `[_NNN]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

use rand::Rng;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, KEY_COUNT};
use crate::error::Chip8Error;
use crate::state::State;

type Outcome = Result<(), Chip8Error>;

/// Every instruction is two bytes wide
const INSTRUCTION_SIZE: u16 = 0x2;

fn advance(state: &mut State) {
    state.pc += INSTRUCTION_SIZE;
}

/// Skips the next instruction when `condition` holds
fn skip_if(state: &mut State, condition: bool) {
    state.pc += if condition {
        INSTRUCTION_SIZE * 2
    } else {
        INSTRUCTION_SIZE
    };
}

fn is_pressed(state: &State, key: u8) -> bool {
    (key as usize) < KEY_COUNT && state.pressed_keys[key as usize]
}

/// clear
pub fn clr(state: &mut State) -> Outcome {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    advance(state);
    Ok(())
}

/// PC = STACK.pop()
/// The popped address is that of the call itself so we step past it
pub fn rts(state: &mut State) -> Outcome {
    state.pc = state.pop()?;
    advance(state);
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) -> Outcome {
    state.pc = addr;
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Outcome {
    state.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// if Vx == nn then pc += 2
pub fn ske(state: &mut State, x: u8, nn: u8) -> Outcome {
    let condition = state.v[x as usize] == nn;
    skip_if(state, condition);
    Ok(())
}

/// if Vx != nn then pc += 2
pub fn skne(state: &mut State, x: u8, nn: u8) -> Outcome {
    let condition = state.v[x as usize] != nn;
    skip_if(state, condition);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) -> Outcome {
    let condition = state.v[x as usize] == state.v[y as usize];
    skip_if(state, condition);
    Ok(())
}

/// Vx = nn
pub fn load(state: &mut State, x: u8, nn: u8) -> Outcome {
    state.v[x as usize] = nn;
    advance(state);
    Ok(())
}

/// Vx += nn
/// Overflow is dropped and VF is left untouched
pub fn add(state: &mut State, x: u8, nn: u8) -> Outcome {
    state.v[x as usize] = state.v[x as usize].wrapping_add(nn);
    advance(state);
    Ok(())
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) -> Outcome {
    state.v[x as usize] = state.v[y as usize];
    advance(state);
    Ok(())
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) -> Outcome {
    state.v[x as usize] |= state.v[y as usize];
    advance(state);
    Ok(())
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) -> Outcome {
    state.v[x as usize] &= state.v[y as usize];
    advance(state);
    Ok(())
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) -> Outcome {
    state.v[x as usize] ^= state.v[y as usize];
    advance(state);
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn addr(state: &mut State, x: u8, y: u8) -> Outcome {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[0xF] = carry as u8;
    state.v[x as usize] = res;
    advance(state);
    Ok(())
}

/// Vx -= Vy; VF = !borrow
pub fn sub(state: &mut State, x: u8, y: u8) -> Outcome {
    let (res, borrow) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.v[0xF] = !borrow as u8;
    state.v[x as usize] = res;
    advance(state);
    Ok(())
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(state: &mut State, x: u8) -> Outcome {
    let vx = state.v[x as usize];
    state.v[0xF] = vx & 0x1;
    state.v[x as usize] = vx >> 1;
    advance(state);
    Ok(())
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(state: &mut State, x: u8, y: u8) -> Outcome {
    let (res, borrow) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.v[0xF] = !borrow as u8;
    state.v[x as usize] = res;
    advance(state);
    Ok(())
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(state: &mut State, x: u8) -> Outcome {
    let vx = state.v[x as usize];
    state.v[0xF] = vx >> 7;
    state.v[x as usize] = vx << 1;
    advance(state);
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) -> Outcome {
    let condition = state.v[x as usize] != state.v[y as usize];
    skip_if(state, condition);
    Ok(())
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> Outcome {
    state.i = addr;
    advance(state);
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) -> Outcome {
    state.pc = addr + u16::from(state.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & nn
pub fn rand<R: Rng + ?Sized>(state: &mut State, x: u8, nn: u8, rng: &mut R) -> Outcome {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & nn;
    advance(state);
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n-row sprite at mem[I..I+n] onto the FrameBuffer at (Vx, Vy).
/// Pixels falling off an edge wrap around to the opposite one.
/// VF is set if any lit pixel gets erased.
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Outcome {
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;

    let mut sprite = [0u8; 0xF];
    let rows = n as usize;
    sprite[..rows].copy_from_slice(state.read(state.i as usize, rows)?);

    let mut collision = 0x0;
    for (row, &byte) in sprite[..rows].iter().enumerate() {
        let py = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let px = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = (byte >> (7 - bit)) & 0x1;
            collision |= pixel & state.frame_buffer[py][px];
            state.frame_buffer[py][px] ^= pixel;
        }
    }

    state.v[0xF] = collision;
    state.draw_flag = true;
    advance(state);
    Ok(())
}

/// if key[Vx].pressed then pc += 2
pub fn skpr(state: &mut State, x: u8) -> Outcome {
    let condition = is_pressed(state, state.v[x as usize]);
    skip_if(state, condition);
    Ok(())
}

/// if !key[Vx].pressed then pc += 2
pub fn skup(state: &mut State, x: u8) -> Outcome {
    let condition = !is_pressed(state, state.v[x as usize]);
    skip_if(state, condition);
    Ok(())
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) -> Outcome {
    state.v[x as usize] = state.delay_timer;
    advance(state);
    Ok(())
}

/// Vx = first pressed key
/// The PC only moves on once a key is down, so this opcode re-runs every cycle until then
pub fn keyd(state: &mut State, x: u8) -> Outcome {
    if let Some(key) = state.pressed_keys.iter().position(|&pressed| pressed) {
        state.v[x as usize] = key as u8;
        advance(state);
    }
    Ok(())
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) -> Outcome {
    state.delay_timer = state.v[x as usize];
    advance(state);
    Ok(())
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) -> Outcome {
    state.sound_timer = state.v[x as usize];
    advance(state);
    Ok(())
}

/// I += Vx; VF = I > 0xFFF
pub fn addi(state: &mut State, x: u8) -> Outcome {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    state.v[0xF] = (state.i > 0x0FFF) as u8;
    advance(state);
    Ok(())
}

/// I = Vx * 5
/// Points I at the sprite sheet glyph for the hex digit in Vx
pub fn ldspr(state: &mut State, x: u8) -> Outcome {
    state.i = u16::from(state.v[x as usize]) * FONT_GLYPH_SIZE;
    advance(state);
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(state: &mut State, x: u8) -> Outcome {
    let vx = state.v[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.write(state.i as usize, &digits)?;
    advance(state);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Outcome {
    let v = state.v;
    state.write(state.i as usize, &v[..=x as usize])?;
    advance(state);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Outcome {
    let mut v = state.v;
    v[..=x as usize].copy_from_slice(state.read(state.i as usize, x as usize + 1)?);
    state.v = v;
    advance(state);
    Ok(())
}

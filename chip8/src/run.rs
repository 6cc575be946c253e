use std::fs;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use emu8_core::Chip8;
use emu8_display::Display;

use crate::beeper::Beeper;
use crate::keymap::keymap;
use crate::Settings;

pub fn run(settings: Settings) -> Result<()> {
    let mut chip8 = match settings.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let rom = fs::read(&settings.rom)
        .with_context(|| format!("unable to read ROM {}", settings.rom.display()))?;
    chip8
        .load_rom(&rom)
        .with_context(|| format!("unable to load ROM {}", settings.rom.display()))?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, settings.scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let mut beeper = if settings.mute {
        None
    } else {
        match Beeper::new(&sdl) {
            Ok(beeper) => Some(beeper),
            Err(e) => {
                warn!("continuing without sound: {:#}", e);
                None
            }
        }
    };

    // Set initial timing
    let cycle_time = Duration::from_micros(settings.cycle_micros);
    let mut last_cycle = Instant::now();

    // Whether or not the cycle time should be respected
    let mut fast_forward = false;

    'event: loop {
        // Update state
        chip8
            .run_cycle()
            .with_context(|| format!("interpreter halted at {:#05X}", chip8.pc()))?;

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        if let Some(beeper) = beeper.as_mut() {
            beeper.set(chip8.is_beeping());
        }

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("quitting");
    Ok(())
}

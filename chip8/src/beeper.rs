use anyhow::{anyhow, Result};
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const FREQUENCY: i32 = 44_100;
const PITCH: f32 = 440.0;
const VOLUME: f32 = 0.1;

/// A square wave generator fed to SDL2 on its audio thread
struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Beeper
/// Plays a tone for as long as the Chip-8 sound timer is running.
///
/// The device is opened paused; `set` only touches SDL when the beep actually starts or stops.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self> {
        let audio_subsystem = sdl.audio().map_err(|e| anyhow!(e))?;
        let desired_spec = AudioSpecDesired {
            freq: Some(FREQUENCY),
            channels: Some(1),
            samples: None,
        };

        let device = audio_subsystem
            .open_playback(None, &desired_spec, |spec| SquareWave {
                phase_inc: PITCH / spec.freq as f32,
                phase: 0.0,
                volume: VOLUME,
            })
            .map_err(|e| anyhow!(e))?;

        Ok(Beeper {
            device,
            playing: false,
        })
    }

    /// Starts or stops the tone
    pub fn set(&mut self, beeping: bool) {
        if beeping == self.playing {
            return;
        }
        if beeping {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = beeping;
    }
}

use beep::beep;
use std::error::Error;

/// drives the buzzer from the sound timer level the host observes after
/// each batch of steps: nonzero means tone on, zero means tone off
pub trait Sound {
    fn set_tone(&mut self, on: bool) -> Result<(), Box<dyn Error>>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// square-wave tone via the PC speaker; only touches the device on an
/// actual on/off transition
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Sound for SimpleBeep {
    fn set_tone(&mut self, on: bool) -> Result<(), Box<dyn Error>> {
        if on == self.is_beeping {
            return Ok(());
        }
        beep(if on { SIMPLEBEEP_PITCH } else { 0 })?;
        self.is_beeping = on;
        Ok(())
    }
}

pub struct Mute {}

impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}

impl Sound for Mute {
    fn set_tone(&mut self, _on: bool) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

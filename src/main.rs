use std::env;
use std::error::Error;
use std::fs::File;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use chip8vm::display::{Display, MonoTermDisplay};
use chip8vm::input::{CrosstermInput, Input, InputEvent};
use chip8vm::interpreter::Interpreter;
use chip8vm::sound::{SimpleBeep, Sound};

/// host frame rate; timers and the display are serviced once per frame
const FRAME: Duration = Duration::from_micros(16_667);

/// instructions per frame, ~600/s at 60 fps
const STEPS_PER_FRAME: u32 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let rom = env::args().nth(1).ok_or("usage: chip8vm <rom-file>")?;

    let mut interpreter = Interpreter::new(StdRng::from_entropy());
    let mut f = File::open(&rom)?;
    interpreter.load_program(&mut f)?;

    let mut display = MonoTermDisplay::new()?;
    let mut input = CrosstermInput::new()?;
    let mut sound = SimpleBeep::new();

    let mut next_frame = Instant::now() + FRAME;
    let mut fatal = None;

    'frames: loop {
        for event in input.poll()? {
            match event {
                InputEvent::Pressed(key) => interpreter.press_key(key),
                InputEvent::Released(key) => interpreter.release_key(key),
                InputEvent::Quit => break 'frames,
            }
        }

        for _ in 0..STEPS_PER_FRAME {
            if let Err(e) = interpreter.step() {
                fatal = Some(e);
                break 'frames;
            }
        }

        display.draw(interpreter.framebuffer())?;
        sound.set_tone(interpreter.sound_timer() > 0)?;

        let now = Instant::now();
        if next_frame > now {
            spin_sleep::sleep(next_frame - now);
        }
        next_frame += FRAME;
    }

    sound.set_tone(false)?;

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }

    match fatal {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

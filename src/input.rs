use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crate::machine::KEY_COUNT;

/// left-hand side of a qwerty keyboard onto the 4x4 hex pad
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00), // x
    ('1', 0x01), // 1
    ('2', 0x02), // 2
    ('3', 0x03), // 3
    ('q', 0x04), // q
    ('w', 0x05), // w
    ('e', 0x06), // e
    ('a', 0x07), // a
    ('s', 0x08), // s
    ('d', 0x09), // d
    ('z', 0x0a), // z
    ('c', 0x0b), // c
    ('4', 0x0c), // 4
    ('r', 0x0d), // r
    ('f', 0x0e), // f
    ('v', 0x0f), // v
];

/// what the keyboard did since the last poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(u8),
    Released(u8),
    Quit,
}

/// reads keypresses
pub trait Input {
    /// collect the key events that have arrived since the last poll; must
    /// not block
    fn poll(&mut self) -> Result<Vec<InputEvent>, io::Error>;
}

/// how long a key counts as held after the terminal reports it; terminals
/// only send presses (and repeats), so releases have to be synthesised
const KEY_HOLD: Duration = Duration::from_millis(150);

/// simple implementation of Input, using crossterm events over STDIN
pub struct CrosstermInput {
    keymap: HashMap<char, u8>,
    held_until: [Option<Instant>; KEY_COUNT],
}

impl CrosstermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(CrosstermInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            held_until: [None; KEY_COUNT],
        })
    }
}

impl Drop for CrosstermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for CrosstermInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>, io::Error> {
        let mut events = Vec::new();
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Esc => events.push(InputEvent::Quit),
                    KeyCode::Char(key) => match self.keymap.get(&key) {
                        Some(&mapped) => {
                            if self.held_until[mapped as usize].is_none() {
                                events.push(InputEvent::Pressed(mapped));
                            }
                            // a repeat extends the hold
                            self.held_until[mapped as usize] = Some(Instant::now() + KEY_HOLD);
                        }
                        None => {
                            log::debug!("no hex pad mapping for {:?}", key);
                        }
                    },
                    _ => {}
                },
                _ => {}
            }
        }

        // expire holds we haven't heard about lately
        let now = Instant::now();
        for (key, deadline) in self.held_until.iter_mut().enumerate() {
            if deadline.map_or(false, |t| t <= now) {
                *deadline = None;
                events.push(InputEvent::Released(key as u8));
            }
        }
        Ok(events)
    }
}

/// dummy Input implementation for testing: hands out one scripted batch of
/// events per poll
pub struct DummyInput {
    batches: Vec<Vec<InputEvent>>,
}

impl DummyInput {
    pub fn new(mut batches: Vec<Vec<InputEvent>>) -> Self {
        batches.reverse();
        DummyInput { batches }
    }
}

impl Input for DummyInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>, io::Error> {
        Ok(self.batches.pop().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_the_whole_pad() {
        let map = HashMap::from(CHIP8_CONVENTIONAL_KEYMAP);
        let mut keys: Vec<u8> = map.values().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..16).collect::<Vec<u8>>());
    }

    #[test]
    fn test_keymap_conventional_corners() {
        let map = HashMap::from(CHIP8_CONVENTIONAL_KEYMAP);
        assert_eq!(map.get(&'1'), Some(&0x01));
        assert_eq!(map.get(&'v'), Some(&0x0f));
        assert_eq!(map.get(&'x'), Some(&0x00));
        assert_eq!(map.get(&'p'), None);
    }

    #[test]
    fn test_dummy_input_scripts_batches() -> Result<(), io::Error> {
        let mut input = DummyInput::new(vec![
            vec![InputEvent::Pressed(0x4)],
            vec![],
            vec![InputEvent::Released(0x4), InputEvent::Quit],
        ]);
        assert_eq!(input.poll()?, vec![InputEvent::Pressed(0x4)]);
        assert_eq!(input.poll()?, vec![]);
        assert_eq!(
            input.poll()?,
            vec![InputEvent::Released(0x4), InputEvent::Quit]
        );
        // runs dry rather than blocking
        assert_eq!(input.poll()?, vec![]);
        Ok(())
    }
}

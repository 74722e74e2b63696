//! Console buttons
//!
//! A reader thread forwards every non-whitespace character from a line
//! based input (stdin by default). `a`, `b` and `c` press the matching
//! button on the next `update`; every other character is queued as a
//! command for the application.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use screencap_hal::{Button, Buttons};

/// Keyboard-driven stand-in for the three front buttons
#[derive(Debug)]
pub struct ConsoleButtons {
    keys: Receiver<char>,
    pressed: [bool; 3],
    commands: VecDeque<char>,
    eof: bool,
}

impl ConsoleButtons {
    /// Read keys from stdin
    pub fn stdin() -> Self {
        Self::from_reader(io::BufReader::new(io::stdin()))
    }

    /// Read keys from any line-based source
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("console-buttons".into())
            .spawn(move || {
                for line in reader.lines() {
                    let Ok(line) = line else { break };
                    for key in line.chars().filter(|c| !c.is_whitespace()) {
                        if tx.send(key.to_ascii_lowercase()).is_err() {
                            return;
                        }
                    }
                }
            })
            .map_err(|e| tracing::warn!("console input unavailable: {}", e))
            .ok();

        Self {
            keys: rx,
            pressed: [false; 3],
            commands: VecDeque::new(),
            eof: false,
        }
    }

    /// Next non-button key, oldest first
    pub fn take_command(&mut self) -> Option<char> {
        self.commands.pop_front()
    }

    /// The input source has ended
    pub fn is_closed(&self) -> bool {
        self.eof
    }
}

fn button_for(key: char) -> Option<Button> {
    match key {
        'a' => Some(Button::A),
        'b' => Some(Button::B),
        'c' => Some(Button::C),
        _ => None,
    }
}

impl Buttons for ConsoleButtons {
    fn update(&mut self) {
        self.pressed = [false; 3];
        loop {
            match self.keys.try_recv() {
                Ok(key) => match button_for(key) {
                    Some(button) => self.pressed[button.index()] = true,
                    None => self.commands.push_back(key),
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.eof = true;
                    break;
                }
            }
        }
    }

    fn was_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }
}

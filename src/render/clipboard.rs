use std::io::{self, Write};

use base64::Engine;

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> io::Result<()>;
}

/// Sets the terminal's clipboard with an OSC 52 escape. Written to stderr so
/// that stdout stays clean when it is piped.
#[derive(Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        let mut err = io::stderr();
        err.write_all(osc52_sequence(text).as_bytes())?;
        err.flush()
    }
}

pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{payload}\x07")
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryClipboard {
    contents: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Send `tracing` events (ours and `halliday_core`'s) to the browser console.
/// Errors and warnings go to `console.error` and `console.warn` so devtools
/// can filter them.
pub fn init() {
    let installed = tracing_subscriber::fmt()
        .with_writer(Console)
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .try_init();

    if let Err(err) = installed {
        console::warn_2(
            &"could not install tracing subscriber".into(),
            &err.to_string().into(),
        );
    }
}

/// Makes a `Line` per event.
struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = Line;

    fn make_writer(&'a self) -> Self::Writer {
        Line::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        Line::new(*meta.level())
    }
}

/// One formatted event. It's written to the console when dropped, since the
/// formatter may write it in several pieces.
struct Line {
    /// Which console method to use
    level: Level,

    /// The formatted event so far
    buffer: Vec<u8>,
}

impl Line {
    /// Start an empty line for an event at `level`.
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for Line {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for Line {
    fn drop(&mut self) {
        let Some(text) = text(&self.buffer) else {
            return;
        };
        let text = JsValue::from_str(&text);

        match self.level {
            Level::ERROR => console::error_1(&text),
            Level::WARN => console::warn_1(&text),
            _ => console::log_1(&text),
        }
    }
}

/// The text of a formatted event without its trailing newline. Nothing if the
/// formatter didn't write anything.
fn text(buffer: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buffer);
    let text = text.trim_end();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

//! `tracing` output routed to the browser console.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;

/// Buffers one formatted event and emits it on drop, at the console method
/// matching the event level.
pub(crate) struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = JsValue::from_str(line.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

pub(crate) struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Install the console subscriber. Later calls keep the first subscriber.
pub(crate) fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|err| {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "invalid log level '{directive}', using info: {err}"
        )));
        EnvFilter::new("info")
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .try_init();
}

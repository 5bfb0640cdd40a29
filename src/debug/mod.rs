//! Plain-text debug output: tree dumps of [`Value`](crate::Value)s and
//! box-drawn tables.
//!
//! Everything is written to the sink a [`Printer`] was built with. Nothing
//! here touches process-wide output unless the caller hands in `stdout`.

mod dump;
mod table;

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

pub use dump::dump_to_string;
pub use table::text_table_to_string;

/// Content type to declare when a printer's output is served as a response body.
pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Formats debug text into an injected sink.
#[derive(Debug, Default)]
pub struct Printer<W: Write = Vec<u8>> {
    sink: W,
    engaged: bool,
}

impl Printer<Vec<u8>> {
    /// A printer collecting everything in memory.
    pub fn buffer() -> Self {
        Self::new(Vec::new())
    }

    /// Everything printed so far.
    pub fn contents(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sink)
    }

    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.sink).into_owned()
    }
}

impl<W: Write> Printer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            engaged: false,
        }
    }

    /// Appends formatted text. Usually called through [`printf!`](crate::printf).
    pub fn printf(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.engaged = true;
        self.sink.write_fmt(args)
    }

    /// Whether anything has been printed yet.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Flushes and hands back the sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// `printf!(printer, "{} items", n)` appends formatted text to a [`Printer`].
#[macro_export]
macro_rules! printf {
    ($printer:expr, $($arg:tt)*) => {
        $printer.printf(format_args!($($arg)*))
    };
}

/// Byte length of each value's text, keyed like the input.
pub fn lengths<K, V: fmt::Display>(values: impl IntoIterator<Item = (K, V)>) -> Vec<(K, usize)> {
    values
        .into_iter()
        .map(|(key, value)| (key, value.to_string().len()))
        .collect()
}

/// Largest value, or `None` when there are none. Ties keep the first.
pub fn max<T: PartialOrd>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut values = values.into_iter();
    let mut largest = values.next()?;
    for value in values {
        if value > largest {
            largest = value;
        }
    }
    Some(largest)
}

/// Terminal columns taken by `text`.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

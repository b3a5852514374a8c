//! Line-buffered, indenting output sink
//!
//! All user-facing text (reports and diagnostics) goes through a [`Printer`].
//! Each line is assembled in memory, prefixed with the current indentation and
//! written in one call, so interleaved output from logging never splits a line.

use std::io::{self, Write};

const INDENT_WIDTH: usize = 2;

pub struct Printer<W: Write> {
    out: W,
    indent: usize,
    buffer: String,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Printer {
            out,
            indent: 0,
            buffer: String::new(),
        }
    }

    /// Write one line at the current indentation and flush it.
    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        self.buffer.clear();
        for _ in 0..self.indent {
            self.buffer.push(' ');
        }
        self.buffer.push_str(text.as_ref());
        self.buffer.push('\n');
        self.out.write_all(self.buffer.as_bytes())?;
        self.out.flush()
    }

    /// Run `f` with output indented one level deeper.
    pub fn indented<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.indent += INDENT_WIDTH;
        let result = f(self);
        self.indent -= INDENT_WIDTH;
        result
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

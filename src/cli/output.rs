//! Colored terminal output for the tagging session
//!
//! Provides consistent, colored CLI output with proper formatting

use std::io::Write;
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Columns a status line is padded to, so a shorter status covers a longer one
const STATUS_LINE_WIDTH: usize = 60;

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose: self.verbose,
        }
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
        }
    }

    fn colored_line(&self, color: Color, bold: bool, message: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
        let _ = write!(&mut buffer, "{}", message);
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer);
        self.bufwtr.print(&buffer)
    }

    /// Print a step header, e.g. `> Grabbing the release notes.`
    pub fn step(&self, message: &str) -> std::io::Result<()> {
        self.colored_line(Color::Cyan, false, message)
    }

    /// Print a greeting or farewell line
    pub fn banner(&self, message: &str) -> std::io::Result<()> {
        self.colored_line(Color::Magenta, true, message)
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        // Try colored output to stderr
        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print a verbose/debug message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Blue)));
        let _ = write!(&mut buffer, "→");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {}", message);
        self.bufwtr.print(&buffer)
    }

    /// Print a question and leave the cursor after it for the answer
    pub fn prompt(&self, question: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        let _ = write!(&mut buffer, "{}: ", question);
        self.bufwtr.print(&buffer)?;
        std::io::stdout().flush()
    }

    /// Overwrite the current terminal line with `message`, leaving the cursor at
    /// its start so the next call replaces it.
    pub fn status_line(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        write_status_line(&mut buffer, message)?;
        self.bufwtr.print(&buffer)
    }

    /// Move past the last status line
    pub fn end_status_line(&self) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        write_status_end(&mut buffer)?;
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {}", message);
        self.bufwtr.print(&buffer)
    }

    /// Print a plain message
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        self.bufwtr.print(&buffer)
    }
}

fn write_status_line(buffer: &mut Buffer, message: &str) -> std::io::Result<()> {
    write!(buffer, "{:<width$}\r", message, width = STATUS_LINE_WIDTH)
}

fn write_status_end(buffer: &mut Buffer) -> std::io::Result<()> {
    writeln!(buffer)
}

use std::fmt;
use std::io::{self, Write};

use chrono::Local;

/// Human-readable, timestamped status lines for a scan.
///
/// Status output is gated on `verbose > 0`; warnings are always written.
/// Write failures are ignored so reporting can never change the scan outcome.
pub struct Progress {
    verbose: u8,
    out: Box<dyn Write + Send>,
}

impl Progress {
    pub fn stderr(verbose: u8) -> Self {
        Self::to_writer(verbose, io::stderr())
    }

    pub fn to_writer(verbose: u8, out: impl Write + Send + 'static) -> Self {
        Self {
            verbose,
            out: Box::new(out),
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }

    pub fn status(&mut self, msg: fmt::Arguments<'_>) {
        if self.is_verbose() {
            self.stamped(msg);
        }
    }

    /// Like [`Progress::status`] but without the timestamp prefix.
    pub fn detail(&mut self, msg: fmt::Arguments<'_>) {
        if self.is_verbose() {
            let _ = writeln!(self.out, "{msg}");
        }
    }

    pub fn warning(&mut self, msg: fmt::Arguments<'_>) {
        self.stamped(format_args!("Warning: {msg}"));
    }

    fn stamped(&mut self, msg: fmt::Arguments<'_>) {
        let ts = Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
        let _ = writeln!(self.out, "{ts} | {msg}");
        let _ = self.out.flush();
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

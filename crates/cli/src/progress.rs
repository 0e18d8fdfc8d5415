//! Console progress reporter.

use std::io::Write;
use std::sync::Mutex;

use delivery::ProgressReporter;

/// Writes one `[current/total] message` line per update.
pub struct ConsoleProgress<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleProgress<W> {
    /// Creates a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write + Send> ProgressReporter for ConsoleProgress<W> {
    fn report(&self, current: u32, total: u32, message: &str) {
        // Progress output is best effort; a closed stream must not abort the run.
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "[{current}/{total}] {message}");
            let _ = out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_update_on_its_own_line() {
        let progress = ConsoleProgress::new(Vec::new());
        progress.report(0, 100, "Creating or getting Team Services account information");
        progress.report(100, 100, "Setting up Team Services continuous deployment (SUCCEEDED)");

        let out = progress.out.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[0/100] Creating or getting Team Services account information\n\
             [100/100] Setting up Team Services continuous deployment (SUCCEEDED)\n"
        );
    }
}

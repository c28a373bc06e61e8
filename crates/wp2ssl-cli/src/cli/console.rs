//! Terminal reporter: `Success:`/`Warning:` prefixed lines, mirrored into the log.

use wp2ssl_core::report::Reporter;

#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn success(&mut self, message: &str) {
        tracing::info!("{}", message);
        println!("Success: {message}");
    }

    fn warning(&mut self, message: &str) {
        tracing::warn!("{}", message);
        eprintln!("Warning: {message}");
    }

    fn log(&mut self, message: &str) {
        tracing::info!("{}", message);
        println!("{message}");
    }
}

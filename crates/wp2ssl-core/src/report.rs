//! User-facing progress reporting.
//!
//! The migration reports through this trait instead of printing directly, so
//! the CLI decides presentation and tests can record what was said.

pub trait Reporter {
    /// A step completed.
    fn success(&mut self, message: &str);
    /// Something went wrong but the run continues.
    fn warning(&mut self, message: &str);
    /// Plain informational line.
    fn log(&mut self, message: &str);
}

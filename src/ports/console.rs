/// ConsoleLogger port for progress and status output.
///
/// The generator and resolver report progress through this port so the
/// output destination (colored stderr in the CLI, a capture buffer in
/// tests) stays an infrastructure concern. No other component consumes
/// these messages.
pub trait ConsoleLogger: Send + Sync {
    /// A primary progress line.
    fn report(&self, message: &str);

    /// A secondary/indented line (cache hits, renderer output).
    fn report_detail(&self, message: &str);

    /// A warning that does not abort the run.
    fn report_warning(&self, message: &str);

    /// An error line; used for renderer failures, which are best-effort.
    fn report_error(&self, message: &str);

    /// Position within a known amount of work (projects processed so far).
    fn report_progress(&self, current: usize, total: usize, message: &str);

    /// Final message once a unit of work completes; clears any progress
    /// display.
    fn report_completion(&self, message: &str);
}

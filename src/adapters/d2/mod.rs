//! External `d2` CLI renderer adapter.

use crate::ports::{ConsoleLogger, DiagramRenderer, RenderOutcome};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::process::Command;

/// D2Cli adapter invoking the `d2` executable.
///
/// Two invocations are used: `d2 fmt <file>` to reformat a generated
/// diagram source, and `d2 -l elk <file> <image>` to render it. D2 writes
/// all of its output to stderr; lines prefixed with `err:` are actual
/// errors, everything else is informational.
pub struct D2Cli {
    binary: String,
    logger: Arc<dyn ConsoleLogger>,
}

impl D2Cli {
    pub fn new(logger: Arc<dyn ConsoleLogger>) -> Self {
        Self {
            binary: "d2".to_string(),
            logger,
        }
    }

    /// Overrides the executable name, e.g. a fully-qualified path.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    async fn run(&self, args: &[&str]) -> RenderOutcome {
        let output = match Command::new(&self.binary).args(args).output().await {
            Ok(output) => output,
            Err(error) => {
                self.logger
                    .report_error(&format!("  Failed to run {}: {}", self.binary, error));
                return RenderOutcome::Failed;
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut saw_error_line = false;

        for line in stderr.lines().filter(|line| !line.trim().is_empty()) {
            if line_is_error(line) {
                saw_error_line = true;
                self.logger.report_error(&format!("  {}", line));
            } else {
                self.logger.report_detail(&format!("  {}", line));
            }
        }

        if !output.status.success() || saw_error_line {
            RenderOutcome::Failed
        } else {
            RenderOutcome::Succeeded
        }
    }
}

/// D2 multiplexes errors and progress on stderr; only `err:`-prefixed
/// lines indicate failure.
fn line_is_error(line: &str) -> bool {
    // Indexing would panic on a multibyte character straddling the prefix
    // boundary; `get` returns None there instead.
    line.trim_start()
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("err:"))
}

#[async_trait]
impl DiagramRenderer for D2Cli {
    async fn format_source(&self, source_path: &Path) -> RenderOutcome {
        self.run(&["fmt", &source_path.to_string_lossy()]).await
    }

    async fn render_image(&self, source_path: &Path, image_path: &Path) -> RenderOutcome {
        self.run(&[
            "-l",
            "elk",
            &source_path.to_string_lossy(),
            &image_path.to_string_lossy(),
        ])
        .await
    }
}

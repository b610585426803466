//! D2 source emission and external rendering.

use crate::config::{DiagramImageFormat, DiagramOptions};
use crate::ports::{ConsoleLogger, DiagramRenderer};
use crate::shared::error::GeneratorError;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writes a diagram scope to disk as D2 source and drives the external
/// renderer over it.
///
/// Rendering is best-effort per output artifact: a failed format or image
/// is logged and skipped while the remaining artifacts continue. Writing
/// the source file itself is fatal when it fails.
pub struct DiagramEmitter {
    renderer: Arc<dyn DiagramRenderer>,
    logger: Arc<dyn ConsoleLogger>,
}

impl DiagramEmitter {
    pub fn new(renderer: Arc<dyn DiagramRenderer>, logger: Arc<dyn ConsoleLogger>) -> Self {
        Self { renderer, logger }
    }

    /// Builds the D2 source for one finalized dependency set. Lines are
    /// sorted so the output is stable across runs.
    pub fn d2_source(diagram: &DiagramOptions, lines: &HashSet<String>) -> String {
        let mut source = String::new();

        source.push_str(&format!("direction: {}\n\n", diagram.direction));
        source.push_str(&format!(
            "{}: {}\n",
            diagram.group_name_prefix, diagram.group_name
        ));

        let mut sorted: Vec<&String> = lines.iter().collect();
        sorted.sort();

        for line in sorted {
            source.push_str(line);
            source.push('\n');
        }

        source.push('\n');
        source
    }

    /// Writes `{scope_alias}.d2` into the export folder, reformats it, and
    /// renders one image per requested format.
    pub async fn export(
        &self,
        export_path: &Path,
        scope_alias: &str,
        source: &str,
        image_formats: &[DiagramImageFormat],
    ) -> Result<PathBuf> {
        let source_path = export_path.join(format!("{}.d2", scope_alias));

        self.logger.report(&format!(
            "Creating diagram: {}...",
            file_name(&source_path)
        ));

        tokio::fs::write(&source_path, source)
            .await
            .map_err(|error| GeneratorError::FileWrite {
                path: source_path.clone(),
                details: error.to_string(),
            })?;

        if self.renderer.format_source(&source_path).await.failed() {
            self.logger.report_warning(&format!(
                "  Failed to format {}",
                file_name(&source_path)
            ));
        }

        for format in image_formats {
            let image_path = source_path.with_extension(format.extension());

            self.logger.report(&format!(
                "Creating image: {}...",
                file_name(&image_path)
            ));

            if self
                .renderer
                .render_image(&source_path, &image_path)
                .await
                .failed()
            {
                self.logger.report_error(&format!(
                    "  Failed to create {}",
                    file_name(&image_path)
                ));
                continue;
            }

            self.logger.report_detail("  Done");
        }

        Ok(source_path)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

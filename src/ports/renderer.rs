use async_trait::async_trait;
use std::path::Path;

/// Outcome of one external renderer invocation.
///
/// Renderer failures never surface as errors - rendering is best-effort per
/// output artifact and the caller decides what to log and skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Succeeded,
    Failed,
}

impl RenderOutcome {
    pub fn failed(self) -> bool {
        self == RenderOutcome::Failed
    }
}

/// DiagramRenderer port for the external diagram tool.
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    /// Reformats the generated diagram source in place.
    async fn format_source(&self, source_path: &Path) -> RenderOutcome;

    /// Renders the diagram source to an image file; the requested format is
    /// implied by the image path's extension.
    async fn render_image(&self, source_path: &Path, image_path: &Path) -> RenderOutcome;
}

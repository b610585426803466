use async_trait::async_trait;
use sln_diagram::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock DiagramRenderer counting invocations.
pub struct MockRenderer {
    outcome: RenderOutcome,
    format_calls: AtomicUsize,
    render_calls: AtomicUsize,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            outcome: RenderOutcome::Succeeded,
            format_calls: AtomicUsize::new(0),
            render_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: RenderOutcome::Failed,
            format_calls: AtomicUsize::new(0),
            render_calls: AtomicUsize::new(0),
        }
    }

    pub fn format_calls(&self) -> usize {
        self.format_calls.load(Ordering::SeqCst)
    }

    pub fn render_calls(&self) -> usize {
        self.render_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiagramRenderer for MockRenderer {
    async fn format_source(&self, _source_path: &Path) -> RenderOutcome {
        self.format_calls.fetch_add(1, Ordering::SeqCst);
        RenderOutcome::Succeeded
    }

    async fn render_image(&self, _source_path: &Path, _image_path: &Path) -> RenderOutcome {
        self.render_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }
}

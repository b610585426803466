/// Crate-wide result type.
///
/// `anyhow::Result` is used throughout so adapters can attach context to
/// I/O and network failures while domain errors remain typed via
/// [`crate::shared::error::GeneratorError`].
pub type Result<T> = anyhow::Result<T>;

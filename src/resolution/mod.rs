//! Recursive, depth-bounded, cached package resolution.

pub mod resolver;

pub use resolver::{assumed_version, PackageResolver, TARGET_FRAMEWORK_ORDER_PREFERENCE};

//! Infrastructure adapters implementing the outbound ports.

pub mod console;
pub mod d2;
pub mod msbuild;
pub mod network;

pub use console::ColorConsoleLogger;
pub use d2::D2Cli;
pub use msbuild::MsbuildSolutionReader;
pub use network::NugetFeedClient;

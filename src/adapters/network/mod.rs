//! Network adapters for remote package feeds.

pub mod nuget_feed;

pub use nuget_feed::NugetFeedClient;

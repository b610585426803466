/// Mock implementations for testing
mod mock_feed_client;
mod mock_logger;
mod mock_renderer;
mod mock_solution_reader;

pub use mock_feed_client::MockFeedClient;
pub use mock_logger::MockLogger;
pub use mock_renderer::MockRenderer;
pub use mock_solution_reader::MockSolutionReader;

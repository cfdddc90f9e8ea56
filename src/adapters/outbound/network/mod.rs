/// Network adapters for external API calls
mod anchore_client;

pub use anchore_client::{AnchoreClient, ScannerCredentials};

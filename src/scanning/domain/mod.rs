pub mod analysis_status;
pub mod finding;
pub mod image;
pub mod repository_list;
pub mod severity;
pub mod severity_tally;

pub use analysis_status::AnalysisStatus;
pub use finding::Finding;
pub use image::{normalize_created_at, ImageDescriptor, ImageReference, ImageRegistration};
pub use repository_list::{RepositoryList, HEADER_LINES};
pub use severity::Severity;
pub use severity_tally::SeverityTally;

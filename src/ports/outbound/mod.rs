/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, container CLI, network, console).
pub mod image_provisioner;
pub mod image_source;
pub mod output_presenter;
pub mod progress_reporter;
pub mod scanner_repository;

pub use image_provisioner::ImageProvisioner;
pub use image_source::ImageSource;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use scanner_repository::{PollProgressCallback, ScannerRepository};

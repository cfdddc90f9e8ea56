/// Mock implementations for testing
mod mock_image_provisioner;
mod mock_image_source;
mod mock_output_presenter;
mod mock_progress_reporter;
mod mock_scanner_repository;

pub use mock_image_provisioner::MockImageProvisioner;
pub use mock_image_source::MockImageSource;
pub use mock_output_presenter::MockOutputPresenter;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scanner_repository::MockScannerRepository;

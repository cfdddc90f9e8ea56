//! containersec - Container image vulnerability report generator
//!
//! This library drives container images through an Anchore-style scanner
//! and tallies the findings per severity into CSV rows, following
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scanning`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use containersec::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let image_source = RepositoryListReader::new();
//! let provisioner = DockerProvisioner::default();
//! let scanner = AnchoreClient::new(
//!     AnchoreClient::DEFAULT_IMAGES_URL,
//!     ScannerCredentials::new("admin", "foobar"),
//! )?;
//! let presenter = StdoutPresenter::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = GenerateReportUseCase::new(
//!     image_source,
//!     provisioner,
//!     scanner,
//!     presenter,
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = ReportRequest::new(PathBuf::from("repos"));
//! let response = use_case.execute(request).await?;
//! eprintln!("{} finding(s)", response.total_findings());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod scanning;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::container::DockerProvisioner;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, RepositoryListReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{AnchoreClient, ScannerCredentials};
    pub use crate::application::dto::{ReportRequest, ReportResponse};
    pub use crate::application::factories::{PresenterFactory, PresenterType};
    pub use crate::application::use_cases::GenerateReportUseCase;
    pub use crate::ports::outbound::{
        ImageProvisioner, ImageSource, OutputPresenter, PollProgressCallback, ProgressReporter,
        ScannerRepository,
    };
    pub use crate::scanning::domain::{
        AnalysisStatus, Finding, ImageDescriptor, ImageReference, RepositoryList, Severity,
        SeverityTally, HEADER_LINES,
    };
    pub use crate::scanning::policies::PollPolicy;
    pub use crate::scanning::services::ReportRenderer;
    pub use crate::shared::error::{ExitCode, ScanError};
    pub use crate::shared::Result;
}

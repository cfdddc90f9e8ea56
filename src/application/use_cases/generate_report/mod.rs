use crate::application::dto::{ReportRequest, ReportResponse};
use crate::ports::outbound::{
    ImageProvisioner, ImageSource, OutputPresenter, ProgressReporter, ScannerRepository,
};
use crate::scanning::domain::{
    AnalysisStatus, ImageDescriptor, ImageReference, RepositoryList, Severity, SeverityTally,
};
use crate::scanning::policies::PollPolicy;
use crate::scanning::services::ReportRenderer;
use crate::shared::Result;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// One image to process: the list it came from and its reference
type Target<'a> = (&'a RepositoryList, ImageReference);

/// GenerateReportUseCase - Core use case for the vulnerability report
///
/// Runs two passes over the same repository lists:
///
/// 1. **Pull pass**: pull every image, read its creation time and register
///    it with the scanner without waiting. A failed pull aborts the run
///    before any report output exists.
/// 2. **Report pass**: for every image, register until the scanner reports
///    `analyzed`, fetch its findings, tally them and present one CSV row.
///
/// Images are processed strictly one after another.
///
/// # Type Parameters
/// * `IS` - ImageSource implementation
/// * `IP` - ImageProvisioner implementation
/// * `SR` - ScannerRepository implementation
/// * `OP` - OutputPresenter implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateReportUseCase<IS, IP, SR, OP, PR> {
    image_source: IS,
    provisioner: IP,
    scanner: SR,
    presenter: OP,
    progress_reporter: PR,
}

impl<IS, IP, SR, OP, PR> GenerateReportUseCase<IS, IP, SR, OP, PR>
where
    IS: ImageSource,
    IP: ImageProvisioner,
    SR: ScannerRepository,
    OP: OutputPresenter,
    PR: ProgressReporter,
{
    /// Creates a new GenerateReportUseCase with injected dependencies
    pub fn new(
        image_source: IS,
        provisioner: IP,
        scanner: SR,
        presenter: OP,
        progress_reporter: PR,
    ) -> Self {
        Self {
            image_source,
            provisioner,
            scanner,
            presenter,
            progress_reporter,
        }
    }

    /// Executes both passes and returns the run summary
    ///
    /// # Errors
    /// Any error ends the run. Errors raised while handling an image
    /// carry its `repository@digest` in their context.
    pub async fn execute(&self, request: ReportRequest) -> Result<ReportResponse> {
        request.validate()?;

        // Step 1: Read every repository list once, shared by both passes
        let lists = self.read_and_report_lists(&request)?;

        // Step 2: Pull pass
        let images_pulled = if request.skip_pull {
            self.progress_reporter
                .report("⏭️  Skipping pull pass (--skip-pull)");
            0
        } else {
            self.pull_pass(&lists, request.pull_start_line).await?
        };

        // Step 3: Report pass
        let (images_reported, totals) = self
            .report_pass(&lists, request.report_start_line, &request.poll_policy)
            .await?;

        let response = ReportResponse {
            repository_lists: lists.len(),
            images_pulled,
            images_reported,
            totals,
        };
        self.report_summary(&response);

        Ok(response)
    }

    /// Reads the repository lists, reporting progress
    fn read_and_report_lists(&self, request: &ReportRequest) -> Result<Vec<RepositoryList>> {
        self.progress_reporter.report(&format!(
            "📖 Loading repository lists from: {}",
            request.repos_dir.display()
        ));

        let lists = self
            .image_source
            .read_repository_lists(&request.repos_dir)?;

        self.progress_reporter
            .report(&format!("✅ Found {} repository list(s)", lists.len()));

        Ok(lists)
    }

    /// Collects the images a pass handles, starting at `start_line` of each list
    ///
    /// Every digest is validated before the pass touches the first image.
    fn targets(lists: &[RepositoryList], start_line: usize) -> Result<Vec<Target<'_>>> {
        let mut targets = Vec::new();
        for list in lists {
            for reference in list.references_from(start_line)? {
                targets.push((list, reference));
            }
        }
        Ok(targets)
    }

    /// Reads the creation time and builds the image descriptor
    async fn describe(
        &self,
        list: &RepositoryList,
        reference: ImageReference,
    ) -> Result<ImageDescriptor> {
        let created_at = self.provisioner.created_at(&reference).await?;
        ImageDescriptor::new(reference, list.tag(), created_at)
    }

    /// Pass 1: pull and register every image without waiting for analysis
    ///
    /// # Returns
    /// The number of images pulled
    async fn pull_pass(&self, lists: &[RepositoryList], start_line: usize) -> Result<usize> {
        let targets = Self::targets(lists, start_line)?;
        let total = targets.len();

        self.progress_reporter.report(&format!(
            "📥 Pull pass: {} image(s) from line {} of each list",
            total,
            start_line + 1
        ));

        for (idx, (list, reference)) in targets.into_iter().enumerate() {
            let label = reference.to_string();
            self.progress_reporter
                .report_progress(idx, total, Some(&format!("Pulling {}", label)));

            self.provisioner
                .pull(&reference)
                .await
                .with_context(|| format!("Pull pass aborted at {}", label))?;

            let image = self
                .describe(list, reference)
                .await
                .with_context(|| format!("Pull pass aborted at {}", label))?;

            self.scanner
                .register(&image)
                .await
                .with_context(|| format!("Pull pass aborted at {}", label))?;

            self.progress_reporter
                .report_progress(idx + 1, total, Some(&format!("Registered {}", label)));
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Pull pass complete: {} image(s) pulled and registered",
            total
        ));

        Ok(total)
    }

    /// Pass 2: wait for analysis, tally findings and present one row per image
    ///
    /// # Returns
    /// The number of reported images and the severity totals across them
    async fn report_pass(
        &self,
        lists: &[RepositoryList],
        start_line: usize,
        poll_policy: &PollPolicy,
    ) -> Result<(usize, SeverityTally)> {
        let targets = Self::targets(lists, start_line)?;
        let total = targets.len();

        self.progress_reporter.report(&format!(
            "🔐 Report pass: {} image(s) from line {} of each list",
            total,
            start_line + 1
        ));
        if poll_policy.is_unbounded() {
            self.progress_reporter.report(
                "   Polling has no attempt limit or timeout; a stuck analysis blocks the run",
            );
        }

        self.presenter.present(&ReportRenderer::header())?;

        let mut totals = SeverityTally::new();
        for (idx, (list, reference)) in targets.into_iter().enumerate() {
            let label = reference.to_string();
            let position = format!("[{}/{}]", idx + 1, total);

            let tally = self
                .analyze_image(list, reference, poll_policy, &position)
                .await
                .with_context(|| format!("Failed to analyze image {}", label))?;

            self.progress_reporter.report(&format!(
                "   {} {}: {} finding(s)",
                position,
                label,
                tally.total()
            ));
            totals += tally;
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Report pass complete: {} image(s) analyzed",
            total
        ));

        Ok((total, totals))
    }

    /// Drives one image from unregistered to reported
    async fn analyze_image(
        &self,
        list: &RepositoryList,
        reference: ImageReference,
        poll_policy: &PollPolicy,
        position: &str,
    ) -> Result<SeverityTally> {
        let image = self.describe(list, reference).await?;

        let spinner =
            Self::poll_spinner(&format!("{} Waiting for analysis of {}", position, image));
        let on_pending = |attempt: u32, status: &AnalysisStatus| {
            spinner.set_message(format!(
                "{} {} is {} (attempt {})",
                position, image, status, attempt
            ));
        };
        let waited = self
            .scanner
            .wait_until_analyzed(&image, poll_policy, &on_pending)
            .await;
        spinner.finish_and_clear();
        waited?;

        let findings = self.scanner.fetch_findings(&image).await?;
        let tally = SeverityTally::from_findings(&findings);

        self.presenter
            .present(&ReportRenderer::render_row(&image, &tally))?;

        Ok(tally)
    }

    fn poll_spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("   {spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn report_summary(&self, response: &ReportResponse) {
        let breakdown: Vec<String> = Severity::ALL
            .iter()
            .map(|s| format!("{}: {}", s, response.totals.count(*s)))
            .collect();

        self.progress_reporter.report_completion(&format!(
            "📊 {} image(s) reported from {} list(s), {} finding(s) total ({})",
            response.images_reported,
            response.repository_lists,
            response.total_findings(),
            breakdown.join(", ")
        ));
    }
}

use crate::shared::Result;

/// OutputPresenter port for presenting report output
///
/// This port abstracts the output destination (stdout, file, etc.).
/// Lines are presented one at a time as images finish, so a partial
/// report is visible while the run is still in progress.
pub trait OutputPresenter {
    /// Presents one line of report output (without trailing newline)
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    fn present(&self, line: &str) -> Result<()>;
}

impl<T: OutputPresenter + ?Sized> OutputPresenter for Box<T> {
    fn present(&self, line: &str) -> Result<()> {
        (**self).present(line)
    }
}

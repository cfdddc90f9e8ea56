/// Filesystem adapters for file I/O operations
mod file_writer;
mod repository_list_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use repository_list_reader::RepositoryListReader;

/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) are the interfaces the report use case
/// uses to reach the file system, the container CLI, the scanner service
/// and the console.
pub mod outbound;

/// Domain layer - image scanning models, policies and pure services
///
/// Nothing in this module performs I/O.
pub mod domain;
pub mod policies;
pub mod services;

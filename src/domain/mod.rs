// Domain-specific error types
pub mod errors;

// Batch, path and credential types
pub mod metrics;

// Dotted-path lookup over untyped JSON
pub mod path_resolver;

// Port interfaces
pub mod ports;

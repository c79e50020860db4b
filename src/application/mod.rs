// Batch assembly from fetched documents
pub mod batch_builder;

// One fetch -> build -> send cycle
pub mod collector;

// Periodic driver
pub mod scheduler;

pub mod benchmark;

pub use benchmark::{BenchmarkTable, CatalogError, CpmRange, PlatformBenchmark};

pub mod cluster_store;
pub mod driver;
pub mod fetcher;
#[cfg(test)]
pub mod memory_store;

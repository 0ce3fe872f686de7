use crate::utils::error::Result;
use std::path::Path;

/// Report sink. Paths are relative to the sink's root.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Removes a file; a file that does not exist is not an error.
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn pricechange_file(&self) -> &Path;
    fn inventory_file(&self) -> &Path;
    fn output_dir(&self) -> &Path;
}

use crate::errors::CoreError;

use super::format::{CompositionDataset, RebalanceDataset};

/// Decodes the two static datasets from JSON bytes or files.
///
/// Decoding only; validation and ordering happen in the services.
pub struct DatasetManager;

impl DatasetManager {
    /// Decode the composition dataset from JSON bytes.
    pub fn composition_from_bytes(data: &[u8]) -> Result<CompositionDataset, CoreError> {
        let dataset: CompositionDataset = serde_json::from_slice(data).map_err(|e| {
            CoreError::Deserialization(format!("Failed to decode composition dataset: {e}"))
        })?;
        log::debug!("decoded composition dataset with {} days", dataset.len());
        Ok(dataset)
    }

    /// Decode the rebalance-history dataset from JSON bytes.
    pub fn rebalances_from_bytes(data: &[u8]) -> Result<RebalanceDataset, CoreError> {
        let dataset: RebalanceDataset = serde_json::from_slice(data).map_err(|e| {
            CoreError::Deserialization(format!("Failed to decode rebalance dataset: {e}"))
        })?;
        log::debug!("decoded rebalance dataset with {} records", dataset.len());
        Ok(dataset)
    }

    /// Read and decode the composition dataset from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn composition_from_file(path: &str) -> Result<CompositionDataset, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::composition_from_bytes(&bytes)
    }

    /// Read and decode the rebalance-history dataset from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn rebalances_from_file(path: &str) -> Result<RebalanceDataset, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::rebalances_from_bytes(&bytes)
    }
}

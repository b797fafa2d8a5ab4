//! # Batcher
//!
//! Splits an ordered sequence of resource identifiers into contiguous chunks
//! of at most `size` elements. Pure and deterministic; the orchestrator feeds
//! each chunk to its own dispatch task.

use crate::error::{BulkflowError, Result};

/// Partition `items` into contiguous batches of at most `size` elements.
///
/// The concatenation of the returned batches equals the input exactly; only
/// the last batch may be shorter than `size`. Empty input yields no batches.
/// A zero `size` is a caller error.
pub fn batch_resources<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(BulkflowError::Configuration(
            "batch size must be at least 1".to_string(),
        ));
    }

    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

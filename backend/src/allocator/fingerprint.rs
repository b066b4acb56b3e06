//! Fingerprints - deterministic hashes of problems and plans
//!
//! Two runs with identical inputs must produce bit-identical plans. Hashing
//! the canonical JSON of the inputs and of the resulting matrix makes that
//! cheap to check and to record alongside a report.
//!
//! # Critical Invariants
//!
//! - **Canonical form**: object keys are sorted before hashing, so field order
//!   never changes the hash
//! - **Exactness**: floats serialize in shortest round-trip form, so any bit
//!   difference in a value changes the hash

use crate::allocator::engine::{AllocationError, AllocatorConfig};
use crate::models::allocation::AllocationMatrix;
use crate::models::problem::TransportProblem;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compute deterministic SHA256 hash of any serializable value
///
/// Uses canonical JSON serialization with sorted keys.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, AllocationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        AllocationError::SerializationError(format!("Fingerprint serialization failed: {}", e))
    })?;

    // Recursively sort all object keys for canonical representation
    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        AllocationError::SerializationError(format!("Fingerprint serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash of a problem together with the config it is run under
pub fn problem_hash(
    problem: &TransportProblem,
    config: &AllocatorConfig,
) -> Result<String, AllocationError> {
    #[derive(Serialize)]
    struct Keyed<'a> {
        problem: &'a TransportProblem,
        config: &'a AllocatorConfig,
    }

    compute_config_hash(&Keyed { problem, config })
}

/// Hash of a shipment plan
pub fn allocation_hash(allocation: &AllocationMatrix) -> Result<String, AllocationError> {
    compute_config_hash(allocation)
}

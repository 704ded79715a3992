use serde::{Deserialize, Serialize};

/// Response wrapper carrying the payload under `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

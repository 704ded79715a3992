use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::deserialize_opt_flexible;

/// A school class (grade level) as exposed by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    #[serde(default)]
    pub class_id: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, alias = "createAt", deserialize_with = "deserialize_opt_flexible")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_flexible")]
    pub updated_at: Option<DateTime<Utc>>,
}

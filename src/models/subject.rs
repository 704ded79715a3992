use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::deserialize_opt_flexible;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, alias = "createAt", deserialize_with = "deserialize_opt_flexible")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updateAt", deserialize_with = "deserialize_opt_flexible")]
    pub updated_at: Option<DateTime<Utc>>,
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Page size used when a search does not ask for one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSettings {
    #[serde(default = "default_results_per_page")]
    pub default_results_per_page: u32,
}

impl PaginationSettings {
    pub fn is_default(&self) -> bool {
        self == &PaginationSettings::default()
    }
}

impl Default for PaginationSettings {
    fn default() -> Self {
        PaginationSettings {
            default_results_per_page: default_results_per_page(),
        }
    }
}

fn default_results_per_page() -> u32 {
    10
}

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Column a scoped read or write filters on. `as_ref()` yields the exact
/// column name, so the variants double as SQL fragments.
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum ScopeColumn {
    #[strum(serialize = "household_id")]
    #[serde(rename = "household_id")]
    HouseholdId,
    #[strum(serialize = "user_id")]
    #[serde(rename = "user_id")]
    UserId,
}

/// Filter descriptor produced by scope resolution and consumed by every
/// shared-entity read and write (weekly menus, recipes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub household_id: Option<String>,
    pub filter_column: ScopeColumn,
    pub filter_value: String,
}

impl Scope {
    pub fn household(household_id: impl Into<String>) -> Self {
        let household_id = household_id.into();
        Self {
            household_id: Some(household_id.clone()),
            filter_column: ScopeColumn::HouseholdId,
            filter_value: household_id,
        }
    }

    pub fn personal(user_id: impl Into<String>) -> Self {
        Self {
            household_id: None,
            filter_column: ScopeColumn::UserId,
            filter_value: user_id.into(),
        }
    }

    pub fn is_household(&self) -> bool {
        self.household_id.is_some()
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

/// Days of week in display order. The discriminant doubles as the
/// canonical index of the day inside a week plan.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantArray,
)]
pub enum MenuDay {
    #[strum(serialize = "Lundi")]
    #[serde(rename = "Lundi")]
    Lundi,
    #[strum(serialize = "Mardi")]
    #[serde(rename = "Mardi")]
    Mardi,
    #[strum(serialize = "Mercredi")]
    #[serde(rename = "Mercredi")]
    Mercredi,
    #[strum(serialize = "Jeudi")]
    #[serde(rename = "Jeudi")]
    Jeudi,
    #[strum(serialize = "Vendredi")]
    #[serde(rename = "Vendredi")]
    Vendredi,
    #[strum(serialize = "Samedi")]
    #[serde(rename = "Samedi")]
    Samedi,
    #[strum(serialize = "Dimanche")]
    #[serde(rename = "Dimanche")]
    Dimanche,
}

impl MenuDay {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One meal slot of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum MealSlot {
    #[strum(serialize = "lunch")]
    #[serde(rename = "lunch")]
    Lunch,
    #[strum(serialize = "dinner")]
    #[serde(rename = "dinner")]
    Dinner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub recipe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep: Option<String>,
}

impl MealEntry {
    pub fn new(recipe: impl Into<String>) -> Self {
        Self {
            recipe: recipe.into(),
            prep: None,
        }
    }

    pub fn with_prep(recipe: impl Into<String>, prep: impl Into<String>) -> Self {
        Self {
            recipe: recipe.into(),
            prep: Some(prep.into()),
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.recipe.trim().is_empty()
    }
}

/// A fully materialized day as served to clients and persisted on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMenu {
    pub day: MenuDay,
    pub lunch: MealEntry,
    pub dinner: MealEntry,
}

impl DayMenu {
    pub fn slot(&self, slot: MealSlot) -> &MealEntry {
        match slot {
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut MealEntry {
        match slot {
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }
}

/// A day as it may appear inside a stored `days` JSON document.
///
/// Two generations coexist in storage. Early rows carried a single
/// recipe per day; current rows carry a lunch and a dinner entry. The
/// day label stays a free string so a document with an unrecognized
/// label still parses and the merge can drop that day alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredDay {
    Single {
        day: String,
        recipe: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prep: Option<String>,
    },
    LunchDinner {
        day: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lunch: Option<MealEntry>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dinner: Option<MealEntry>,
    },
}

impl StoredDay {
    pub fn day_label(&self) -> &str {
        match self {
            StoredDay::Single { day, .. } => day,
            StoredDay::LunchDinner { day, .. } => day,
        }
    }
}

impl From<&DayMenu> for StoredDay {
    fn from(value: &DayMenu) -> Self {
        StoredDay::LunchDinner {
            day: value.day.to_string(),
            lunch: Some(value.lunch.clone()),
            dinner: Some(value.dinner.clone()),
        }
    }
}

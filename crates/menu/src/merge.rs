use std::str::FromStr;

use crate::{DayMenu, MealEntry, MenuDay, StoredDay};

/// Folds stored days over a base week.
///
/// The result always holds exactly seven days in Monday-first order.
/// Stored entries override the base slot by slot, a blank recipe keeps
/// the base value, a legacy single-recipe day lands in the dinner slot,
/// and a day label matching no weekday is dropped.
pub fn merge_days(base: &[DayMenu; 7], stored: &[StoredDay]) -> [DayMenu; 7] {
    let mut week = base.clone();
    for entry in stored {
        let Ok(day) = MenuDay::from_str(entry.day_label().trim()) else {
            continue;
        };
        let plan = &mut week[day.index()];
        match entry {
            StoredDay::Single { recipe, prep, .. } => {
                if !recipe.trim().is_empty() {
                    plan.dinner = MealEntry {
                        recipe: recipe.clone(),
                        prep: prep.clone(),
                    };
                }
            }
            StoredDay::LunchDinner { lunch, dinner, .. } => {
                if let Some(meal) = lunch {
                    if meal.is_filled() {
                        plan.lunch = meal.clone();
                    }
                }
                if let Some(meal) = dinner {
                    if meal.is_filled() {
                        plan.dinner = meal.clone();
                    }
                }
            }
        }
    }
    week
}

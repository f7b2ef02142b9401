use crate::{DayMenu, MealEntry, MenuDay};

/// Default week proposed when no menu has been saved yet.
pub fn template_week() -> [DayMenu; 7] {
    [
        DayMenu {
            day: MenuDay::Lundi,
            lunch: MealEntry::new("Salade de quinoa"),
            dinner: MealEntry::with_prep("Tacos de poisson", "Préparer la marinade"),
        },
        DayMenu {
            day: MenuDay::Mardi,
            lunch: MealEntry::new("Wrap au thon"),
            dinner: MealEntry::with_prep("Salade césar", "Cuire le poulet"),
        },
        DayMenu {
            day: MenuDay::Mercredi,
            lunch: MealEntry::new("Omelette aux herbes"),
            dinner: MealEntry::with_prep("Soupe miso", "Hydrater les algues"),
        },
        DayMenu {
            day: MenuDay::Jeudi,
            lunch: MealEntry::new("Buddha bowl"),
            dinner: MealEntry::with_prep("Ramen express", "Pré-découper les légumes"),
        },
        DayMenu {
            day: MenuDay::Vendredi,
            lunch: MealEntry::new("Croque-monsieur"),
            dinner: MealEntry::new("Pizza maison"),
        },
        DayMenu {
            day: MenuDay::Samedi,
            lunch: MealEntry::new("Galettes de sarrasin"),
            dinner: MealEntry::new("Curry de légumes"),
        },
        DayMenu {
            day: MenuDay::Dimanche,
            lunch: MealEntry::new("Quiche aux poireaux"),
            dinner: MealEntry::new("Poulet rôti"),
        },
    ]
}

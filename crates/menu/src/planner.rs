use chrono::NaiveDate;
use semainier_household::ScopeResolver;
use semainier_shared::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use strum::VariantArray;

use crate::{
    find_week, merge_days, save_week, template_week, DayMenu, MealEntry, MealSlot, MenuDay,
    SavedWeek, StoredDay, WeekRef,
};

pub const LOAD_ERROR: &str = "Impossible de charger le menu de la semaine.";
pub const SAVE_ERROR: &str = "Impossible d'enregistrer le menu. Réessaie plus tard.";
pub const SAVE_IN_FLIGHT: &str = "Enregistrement déjà en cours.";
pub const SAVE_INCOMPLETE: &str = "Complète tous les repas avant d'enregistrer.";
pub const AUTH_REQUIRED: &str = "Connecte-toi pour enregistrer ton menu.";
pub const COPY_ERROR: &str = "Impossible de récupérer la semaine précédente.";
pub const NOTHING_TO_COPY: &str = "Aucun menu la semaine dernière.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    LoadError,
    Saving,
    SaveError,
}

/// Where the current days came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Template,
    Stored,
}

/// Ties a load request to its completion. A ticket minted before the
/// latest `begin_load` or navigation is stale and its outcome is
/// dropped on arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
    pub week: WeekRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    NothingToCopy,
}

/// State machine behind the weekly menu screen.
///
/// Loading is split in two so the caller decides where the query runs:
/// [`WeekPlanner::begin_load`] hands out a ticket, the caller fetches
/// the stored days, [`WeekPlanner::apply_load`] folds the outcome back
/// in. [`WeekPlanner::load_week`] wires both ends to the database for
/// the common case. A failed load or save never discards the days
/// already in place.
#[derive(Debug)]
pub struct WeekPlanner {
    week: WeekRef,
    days: [DayMenu; 7],
    phase: Phase,
    source: PlanSource,
    epoch: u64,
    last_error: Option<String>,
}

impl WeekPlanner {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            week: WeekRef::from_date(date),
            days: template_week(),
            phase: Phase::Idle,
            source: PlanSource::Template,
            epoch: 0,
            last_error: None,
        }
    }

    pub fn week(&self) -> &WeekRef {
        &self.week
    }

    pub fn days(&self) -> &[DayMenu; 7] {
        &self.days
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn source(&self) -> PlanSource {
        self.source
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.epoch += 1;
        self.phase = Phase::Loading;
        LoadTicket {
            epoch: self.epoch,
            week: self.week.clone(),
        }
    }

    pub fn apply_load(&mut self, ticket: LoadTicket, outcome: Result<Option<Vec<StoredDay>>>) {
        if ticket.epoch != self.epoch {
            tracing::debug!(week = ticket.week.week_number, "stale load dropped");
            return;
        }
        match outcome {
            Ok(Some(stored)) => {
                self.days = merge_days(&template_week(), &stored);
                self.source = PlanSource::Stored;
                self.phase = Phase::Ready;
                self.last_error = None;
            }
            Ok(None) => {
                self.days = template_week();
                self.source = PlanSource::Template;
                self.phase = Phase::Ready;
                self.last_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, week = ticket.week.week_number, "weekly menu load failed");
                self.phase = Phase::LoadError;
                self.last_error = Some(LOAD_ERROR.to_string());
            }
        }
    }

    /// Runs a full load against the database.
    pub async fn load_week(&mut self, pool: &SqlitePool, resolver: &ScopeResolver, user_id: &str) {
        let ticket = self.begin_load();
        let outcome = fetch_stored(pool, resolver, user_id, &ticket.week).await;
        self.apply_load(ticket, outcome);
    }

    /// Moves to an adjacent week and restarts loading. The returned
    /// ticket supersedes any load still in flight.
    pub fn navigate_week(&mut self, weeks: i64) -> LoadTicket {
        self.week = self.week.shifted(weeks);
        self.begin_load()
    }

    pub fn edit_day(&mut self, day: MenuDay, slot: MealSlot, text: impl Into<String>) {
        self.days[day.index()].slot_mut(slot).recipe = text.into();
    }

    pub fn reset_week(&mut self) {
        self.days = template_week();
        self.source = PlanSource::Template;
        self.last_error = None;
    }

    /// Replaces local state with a client-supplied week. Days land on
    /// the canonical order; an omitted day becomes blank and is caught
    /// by save validation.
    pub fn restore_days(&mut self, days: Vec<DayMenu>) {
        let mut week = blank_week();
        for day in days {
            let index = day.day.index();
            week[index] = day;
        }
        self.days = week;
        self.phase = Phase::Ready;
    }

    /// First day slot still blank, if any. A week saves only once this
    /// returns `None`.
    pub fn missing_slot(&self) -> Option<(MenuDay, MealSlot)> {
        for plan in &self.days {
            if !plan.lunch.is_filled() {
                return Some((plan.day, MealSlot::Lunch));
            }
            if !plan.dinner.is_filled() {
                return Some((plan.day, MealSlot::Dinner));
            }
        }
        None
    }

    /// Pulls the previous week's stored menu into the current local
    /// state, stored slots winning over local ones.
    #[tracing::instrument(skip_all)]
    pub async fn copy_previous_week(
        &mut self,
        pool: &SqlitePool,
        resolver: &ScopeResolver,
        user_id: &str,
    ) -> Result<CopyOutcome> {
        let previous = self.week.previous();
        let found = match fetch_stored(pool, resolver, user_id, &previous).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(error = %e, "previous week fetch failed");
                self.last_error = Some(COPY_ERROR.to_string());
                return Err(Error::Remote(COPY_ERROR.to_string()));
            }
        };
        match found {
            Some(stored) => {
                self.days = merge_days(&self.days, &stored);
                self.source = PlanSource::Stored;
                self.last_error = None;
                Ok(CopyOutcome::Copied)
            }
            None => Ok(CopyOutcome::NothingToCopy),
        }
    }

    /// Persists the current week. Completeness and auth are checked
    /// before anything touches the database; a failed write keeps the
    /// local days so the user can retry.
    #[tracing::instrument(skip_all)]
    pub async fn save(
        &mut self,
        pool: &SqlitePool,
        resolver: &ScopeResolver,
        user_id: Option<&str>,
    ) -> Result<SavedWeek> {
        if self.phase == Phase::Saving {
            return Err(Error::Validation(SAVE_IN_FLIGHT.to_string()));
        }
        if let Some((day, slot)) = self.missing_slot() {
            tracing::debug!(day = %day, slot = %slot, "save rejected, blank slot");
            self.last_error = Some(SAVE_INCOMPLETE.to_string());
            return Err(Error::Validation(SAVE_INCOMPLETE.to_string()));
        }
        let Some(user_id) = user_id else {
            self.last_error = Some(AUTH_REQUIRED.to_string());
            return Err(Error::Validation(AUTH_REQUIRED.to_string()));
        };
        self.phase = Phase::Saving;
        let scope = match resolver.resolve(user_id).await {
            Ok(scope) => scope,
            Err(e) => return Err(self.fail_save(e)),
        };
        match save_week(pool, &scope, user_id, &self.week, &self.days).await {
            Ok(saved) => {
                self.phase = Phase::Ready;
                self.last_error = None;
                Ok(saved)
            }
            Err(e) => Err(self.fail_save(e)),
        }
    }

    fn fail_save(&mut self, source: Error) -> Error {
        tracing::error!(error = %source, "weekly menu save failed");
        self.phase = Phase::SaveError;
        self.last_error = Some(SAVE_ERROR.to_string());
        Error::Remote(SAVE_ERROR.to_string())
    }
}

async fn fetch_stored(
    pool: &SqlitePool,
    resolver: &ScopeResolver,
    user_id: &str,
    week: &WeekRef,
) -> Result<Option<Vec<StoredDay>>> {
    let scope = resolver.resolve(user_id).await?;
    match find_week(pool, &scope, user_id, week.year, week.week_number).await? {
        Some(row) => Ok(Some(row.stored_days()?)),
        None => Ok(None),
    }
}

fn blank_week() -> [DayMenu; 7] {
    std::array::from_fn(|i| DayMenu {
        day: MenuDay::VARIANTS[i],
        lunch: MealEntry::new(""),
        dinner: MealEntry::new(""),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn planner() -> WeekPlanner {
        WeekPlanner::new(NaiveDate::from_ymd_opt(2025, 11, 12).unwrap())
    }

    fn stored_single(day: &str, recipe: &str) -> StoredDay {
        StoredDay::Single {
            day: day.to_string(),
            recipe: recipe.to_string(),
            prep: None,
        }
    }

    #[test]
    fn starts_idle_on_template() {
        let planner = planner();
        assert_eq!(planner.phase(), Phase::Idle);
        assert_eq!(planner.source(), PlanSource::Template);
        assert_eq!(planner.week().week_number, 46);
        assert_eq!(planner.days(), &template_week());
    }

    #[test]
    fn load_applies_stored_days() {
        let mut planner = planner();
        let ticket = planner.begin_load();
        assert_eq!(planner.phase(), Phase::Loading);

        planner.apply_load(ticket, Ok(Some(vec![stored_single("Lundi", "Gratin")])));
        assert_eq!(planner.phase(), Phase::Ready);
        assert_eq!(planner.source(), PlanSource::Stored);
        assert_eq!(planner.days()[0].dinner.recipe, "Gratin");
        assert_eq!(planner.days()[0].lunch.recipe, "Salade de quinoa");
    }

    #[test]
    fn load_without_row_falls_back_to_template() {
        let mut planner = planner();
        let ticket = planner.begin_load();
        planner.apply_load(ticket, Ok(None));
        assert_eq!(planner.phase(), Phase::Ready);
        assert_eq!(planner.source(), PlanSource::Template);
    }

    #[test]
    fn stale_load_is_dropped_after_navigation() {
        let mut planner = planner();
        let first = planner.begin_load();
        let second = planner.navigate_week(-1);
        assert_eq!(planner.week().week_number, 45);

        // the answer for week 46 arrives after the user moved on
        planner.apply_load(first, Ok(Some(vec![stored_single("Lundi", "Vieux plat")])));
        assert_eq!(planner.phase(), Phase::Loading);
        assert_eq!(planner.days()[0].dinner.recipe, "Tacos de poisson");

        planner.apply_load(second, Ok(None));
        assert_eq!(planner.phase(), Phase::Ready);
        assert_eq!(planner.source(), PlanSource::Template);
    }

    #[test]
    fn failed_load_keeps_current_days() {
        let mut planner = planner();
        let ticket = planner.begin_load();
        planner.apply_load(ticket, Ok(Some(vec![stored_single("Mardi", "Couscous")])));

        let ticket = planner.navigate_week(1);
        planner.apply_load(ticket, Err(sqlx::Error::PoolClosed.into()));
        assert_eq!(planner.phase(), Phase::LoadError);
        assert_eq!(planner.last_error(), Some(LOAD_ERROR));
        // previous screen content stays visible
        assert_eq!(planner.days()[1].dinner.recipe, "Couscous");
    }

    #[test]
    fn edit_and_reset() {
        let mut planner = planner();
        planner.edit_day(MenuDay::Vendredi, MealSlot::Lunch, "Soupe de potiron");
        assert_eq!(planner.days()[4].lunch.recipe, "Soupe de potiron");

        planner.reset_week();
        assert_eq!(planner.days(), &template_week());
        assert_eq!(planner.source(), PlanSource::Template);
    }

    #[test]
    fn missing_slot_reports_first_blank() {
        let mut planner = planner();
        assert_eq!(planner.missing_slot(), None);

        planner.edit_day(MenuDay::Mercredi, MealSlot::Dinner, "   ");
        assert_eq!(
            planner.missing_slot(),
            Some((MenuDay::Mercredi, MealSlot::Dinner))
        );
    }

    #[test]
    fn restore_days_fills_omitted_days_with_blanks() {
        let mut planner = planner();
        let mut sent = template_week().to_vec();
        sent.remove(6);
        sent.swap(0, 3);
        planner.restore_days(sent);

        assert_eq!(planner.days()[0].day, MenuDay::Lundi);
        assert_eq!(planner.days()[3].day, MenuDay::Jeudi);
        assert_eq!(
            planner.missing_slot(),
            Some((MenuDay::Dimanche, MealSlot::Lunch))
        );
    }
}

//! App settings commands.

use affirm_shared::Category;
use affirm_store::AppSettings;

use crate::error::{AppError, Result};
use crate::state::Services;

pub fn get_settings(svc: &Services) -> Result<AppSettings> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.get_settings().map_err(Into::into)
}

pub fn update_settings(svc: &Services, settings: &AppSettings) -> Result<()> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    state.database.save_settings(settings).map_err(Into::into)
}

/// Mark onboarding finished and persist the category selection chosen
/// during it.
pub fn complete_onboarding(svc: &Services, selected_categories: Vec<Category>) -> Result<()> {
    let state = svc.state.lock().map_err(|_| AppError::LockPoisoned)?;
    let db = &state.database;

    let mut settings = db.get_settings()?;
    settings.onboarding_complete = true;
    settings.selected_categories = selected_categories;
    db.save_settings(&settings).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::harness;

    #[test]
    fn settings_round_trip() {
        let h = harness();

        let mut settings = get_settings(&h.svc).unwrap();
        assert!(!settings.onboarding_complete);

        settings.appearance_mode = 2;
        update_settings(&h.svc, &settings).unwrap();
        assert_eq!(get_settings(&h.svc).unwrap().appearance_mode, 2);
    }

    #[test]
    fn onboarding_records_selection() {
        let h = harness();
        complete_onboarding(&h.svc, vec![Category::Morning, Category::SelfLove]).unwrap();

        let settings = get_settings(&h.svc).unwrap();
        assert!(settings.onboarding_complete);
        assert_eq!(
            settings.selected_categories,
            vec![Category::Morning, Category::SelfLove]
        );
    }
}

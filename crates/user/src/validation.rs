//! Pre-submission form checks. Messages here are the exact strings shown to
//! the user; nothing in this module touches the database.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

pub fn validate_email(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("L'email est requis.");
    }
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err("Renseigne un email valide.");
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Le mot de passe est requis.");
    }
    if value.len() < 8 {
        return Err("Au moins 8 caractères.");
    }
    let has_letter = value.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err("Inclure lettres et chiffres.");
    }
    Ok(())
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if confirm.is_empty() {
        return Err("Confirme ton mot de passe.");
    }
    if password != confirm {
        return Err("Les mots de passe ne correspondent pas.");
    }
    Ok(())
}

/// Adapter for `validator` field checks, so derived inputs reuse the same
/// messages.
pub fn email_format(value: &str) -> Result<(), ValidationError> {
    validate_email(value)
        .map_err(|msg| ValidationError::new("email").with_message(msg.into()))
}

pub fn password_strength(value: &str) -> Result<(), ValidationError> {
    validate_password(value)
        .map_err(|msg| ValidationError::new("password").with_message(msg.into()))
}

/// First message out of a `validator` error set, probing fields in the order
/// the forms show them so the surfaced message is stable.
pub fn first_message(errors: &validator::ValidationErrors) -> String {
    let map = errors.errors();
    let ordered = ["email", "password", "confirm", "pseudo"];

    for key in ordered {
        if let Some(validator::ValidationErrorsKind::Field(list)) = map.get(key) {
            if let Some(message) = list.iter().find_map(|e| e.message.as_ref()) {
                return message.to_string();
            }
        }
    }

    for kind in map.values() {
        if let validator::ValidationErrorsKind::Field(list) = kind {
            if let Some(message) = list.iter().find_map(|e| e.message.as_ref()) {
                return message.to_string();
            }
        }
    }

    "Formulaire invalide.".to_string()
}

//! Client-side form rules.
//!
//! Each validator returns every failing field at once so the form can mark
//! them all inline before anything is sent.

use crate::{CaseDraft, MAX_AVATAR_BYTES, UserForm};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

fn is_email(value: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Field name -> message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Drops the message of a field the user is editing again.
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message, for forms that only show one line.
    pub fn first(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Silakan isi email dan password".to_string());
    }
    Ok(())
}

pub fn validate_case_draft(draft: &CaseDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if draft.title.trim().is_empty() {
        errors.insert("title", "Judul kasus harus diisi");
    }
    if draft.date.trim().is_empty() {
        errors.insert("date", "Tanggal harus diisi");
    }
    errors.into_result()
}

/// `is_new` makes the password mandatory.
pub fn validate_user_form(form: &UserForm, is_new: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.username.trim().is_empty() {
        errors.insert("username", "Username harus diisi");
    }

    if form.email.trim().is_empty() {
        errors.insert("email", "Email harus diisi");
    } else if !is_email(&form.email) {
        errors.insert("email", "Format email tidak valid");
    }

    if is_new && form.password.as_deref().unwrap_or_default().is_empty() {
        errors.insert("password", "Password harus diisi untuk pengguna baru");
    }

    errors.into_result()
}

pub fn validate_folder_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Nama folder tidak boleh kosong".to_string());
    }
    Ok(())
}

/// Size check comes first; a 6 MB PDF reports the size.
pub fn validate_avatar(size: u64, mime: &str) -> Result<(), String> {
    if size > MAX_AVATAR_BYTES {
        return Err("Ukuran file terlalu besar (maksimal 5MB)".to_string());
    }
    if !mime.starts_with("image/") {
        return Err("File harus berupa gambar".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str, password: Option<&str>) -> UserForm {
        UserForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.map(str::to_string),
            ..UserForm::default()
        }
    }

    #[test]
    fn case_draft_requires_title_and_date() {
        let errors = validate_case_draft(&CaseDraft::default()).unwrap_err();
        assert!(errors.get("title").is_some());
        assert!(errors.get("date").is_some());

        let draft = CaseDraft {
            title: "A".to_string(),
            date: "2024-01-01".to_string(),
            ..CaseDraft::default()
        };
        assert!(validate_case_draft(&draft).is_ok());
    }

    #[test]
    fn user_form_rules() {
        let errors = validate_user_form(&user("", "budi", None), true).unwrap_err();
        assert_eq!(errors.get("username"), Some("Username harus diisi"));
        assert_eq!(errors.get("email"), Some("Format email tidak valid"));
        assert_eq!(
            errors.get("password"),
            Some("Password harus diisi untuk pengguna baru")
        );

        let errors = validate_user_form(&user("budi", "", None), false).unwrap_err();
        assert_eq!(errors.get("email"), Some("Email harus diisi"));
        assert_eq!(errors.get("password"), None);

        assert!(validate_user_form(&user("budi", "budi@kejari.go.id", None), false).is_ok());
        assert!(validate_user_form(&user("budi", "budi@kejari.go.id", Some("x")), true).is_ok());
    }

    #[test]
    fn field_errors_clear_per_field() {
        let mut errors = validate_user_form(&user("", "", None), true).unwrap_err();
        errors.clear("username");
        assert!(errors.get("username").is_none());
        assert_eq!(errors.first(), Some("Email harus diisi"));
    }

    #[test]
    fn avatar_limits() {
        assert!(validate_avatar(1024, "image/png").is_ok());
        assert!(validate_avatar(MAX_AVATAR_BYTES, "image/jpeg").is_ok());
        assert_eq!(
            validate_avatar(MAX_AVATAR_BYTES + 1, "image/png").unwrap_err(),
            "Ukuran file terlalu besar (maksimal 5MB)"
        );
        assert_eq!(
            validate_avatar(10, "application/pdf").unwrap_err(),
            "File harus berupa gambar"
        );
    }

    #[test]
    fn blank_inputs_are_rejected() {
        assert!(validate_folder_name("   ").is_err());
        assert!(validate_folder_name("BAP 2024").is_ok());
        assert!(validate_login("a@b.c", "").is_err());
        assert!(validate_login("a@b.c", "secret").is_ok());
    }
}

use serde::de::{self, IgnoredAny, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub mod date;
pub mod protocol;
pub mod validation;
pub mod view_model;

// =========================================================
// Constants
// =========================================================

/// Status shown for a case when the backend does not report one.
pub const DEFAULT_CASE_STATUS: &str = "Menunggu";

/// Largest avatar accepted by the profile view (5 MiB).
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

// =========================================================
// Identifiers
// =========================================================

/// Backend record identifier.
///
/// The backend emits numeric ids for some tables and string ids for others,
/// so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = Id;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Id, E> {
                Ok(Id(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Id, E> {
                Ok(Id(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

// =========================================================
// Domain Models
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Parses the value kept under `userRole`. Anything else is treated as absent.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// Stage of a case inside the office workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseCategory {
    Penyelidikan,
    Penyidikan,
    Penuntutan,
    Eksekusi,
}

impl CaseCategory {
    pub const ALL: [CaseCategory; 4] = [
        CaseCategory::Penyelidikan,
        CaseCategory::Penyidikan,
        CaseCategory::Penuntutan,
        CaseCategory::Eksekusi,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            CaseCategory::Penyelidikan => "penyelidikan",
            CaseCategory::Penyidikan => "penyidikan",
            CaseCategory::Penuntutan => "penuntutan",
            CaseCategory::Eksekusi => "eksekusi",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CaseCategory::Penyelidikan => "Penyelidikan",
            CaseCategory::Penyidikan => "Penyidikan",
            CaseCategory::Penuntutan => "Penuntutan",
            CaseCategory::Eksekusi => "Eksekusi",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A case as returned by `/api/cases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parties: Option<String>,
    #[serde(default)]
    pub witnesses: Option<String>,
    #[serde(default)]
    pub prosecutor: Option<String>,
    #[serde(rename = "type", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CaseRecord {
    /// Status chip text; falls back to [`DEFAULT_CASE_STATUS`].
    pub fn status_label(&self) -> &str {
        match self.status.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => DEFAULT_CASE_STATUS,
        }
    }
}

/// Body of case create/update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseDraft {
    pub title: String,
    pub date: String,
    pub description: String,
    pub parties: String,
    pub witnesses: String,
    pub prosecutor: String,
    #[serde(rename = "type")]
    pub category: String,
}

impl CaseDraft {
    pub fn new(category: CaseCategory) -> Self {
        Self {
            category: category.slug().to_string(),
            ..Self::default()
        }
    }

    pub fn from_record(record: &CaseRecord) -> Self {
        Self {
            title: record.title.clone(),
            date: date::date_for_input(&record.date),
            description: record.description.clone().unwrap_or_default(),
            parties: record.parties.clone().unwrap_or_default(),
            witnesses: record.witnesses.clone().unwrap_or_default(),
            prosecutor: record.prosecutor.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Id,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
}

/// Create/update body for `/api/users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub position: String,
    pub phone: String,
    pub office: String,
}

impl UserForm {
    pub fn from_account(account: &UserAccount) -> Self {
        Self {
            username: account.username.clone(),
            email: account.email.clone(),
            password: None,
            position: account.position.clone().unwrap_or_default(),
            phone: account.phone.clone().unwrap_or_default(),
            office: account.office.clone().unwrap_or_default(),
        }
    }

    /// Drops an empty password so an edit keeps the stored one.
    pub fn without_blank_password(mut self) -> Self {
        if self.password.as_deref().is_some_and(|p| p.is_empty()) {
            self.password = None;
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub position: String,
    pub phone: String,
    pub office: String,
}

impl From<&Profile> for ProfileUpdate {
    fn from(profile: &Profile) -> Self {
        Self {
            username: profile.username.clone(),
            email: profile.email.clone().unwrap_or_default(),
            position: profile.position.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
            office: profile.office.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub folders: Vec<FolderEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Id,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginUser {
    pub role: Role,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvatarUploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// =========================================================
// Envelopes
// =========================================================

/// `{ success, data, error }` wrapper used by the file and user endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Splits the envelope into its payload or the server-provided error.
    pub fn into_result(self) -> Result<Option<T>, Option<String>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error)
        }
    }
}

/// Envelope whose payload is not inspected.
pub type Ack = Envelope<IgnoredAny>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_accepts_numbers_and_strings() {
        let a: Id = serde_json::from_str("42").unwrap();
        let b: Id = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(a.as_str(), "42");
        assert_eq!(b.to_string(), "abc-1");
    }

    #[test]
    fn case_without_status_uses_default_chip() {
        let record: CaseRecord =
            serde_json::from_str(r#"{"id":1,"title":"A","date":"2024-01-01","type":"penyidikan"}"#)
                .unwrap();
        assert_eq!(record.status_label(), "Menunggu");
        assert_eq!(record.category.as_deref(), Some("penyidikan"));

        let blank = CaseRecord {
            status: Some("  ".to_string()),
            ..record
        };
        assert_eq!(blank.status_label(), "Menunggu");
    }

    #[test]
    fn case_draft_serializes_category_as_type() {
        let mut draft = CaseDraft::new(CaseCategory::Penyidikan);
        draft.title = "A".to_string();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["type"], "penyidikan");
        assert_eq!(json["title"], "A");
    }

    #[test]
    fn user_form_edit_omits_blank_password() {
        let form = UserForm {
            username: "budi".to_string(),
            email: "budi@example.com".to_string(),
            password: Some(String::new()),
            ..UserForm::default()
        }
        .without_blank_password();
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn role_parse_rejects_unknown_values() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn envelope_failure_carries_server_error() {
        let env: Ack =
            serde_json::from_str(r#"{"success":false,"error":"Folder sudah ada"}"#).unwrap();
        assert_eq!(env.into_result().unwrap_err().as_deref(), Some("Folder sudah ada"));

        let body = r#"{"success":true,"data":{"files":[],"folders":[{"id":3,"name":"BAP"}]}}"#;
        let ok: Envelope<FileListing> = serde_json::from_str(body).unwrap();
        let listing = ok.into_result().unwrap().unwrap();
        assert_eq!(listing.folders[0].name, "BAP");
    }

    #[test]
    fn category_slugs_round_trip() {
        for category in CaseCategory::ALL {
            assert_eq!(CaseCategory::from_slug(category.slug()), Some(category));
        }
        assert_eq!(CaseCategory::from_slug("esekusi"), None);
    }
}

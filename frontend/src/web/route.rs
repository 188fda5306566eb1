//! Route table.
//!
//! Pure data: paths, parameters and who may see each page. No DOM access.

use kejaksaan_shared::{CaseCategory, Id, Role};
use std::fmt::Display;

/// Who may render a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Exactly this role.
    Role(Role),
    /// Any signed-in user.
    Authenticated,
}

impl Access {
    pub fn allows(&self, role: Role) -> bool {
        match self {
            Access::Public | Access::Authenticated => true,
            Access::Role(required) => *required == role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Login,
    /// `/`, always redirected.
    Root,
    UserHome,
    UserProfile,
    CaseList {
        category: CaseCategory,
    },
    CaseDetail {
        id: Id,
    },
    Categories,
    Files,
    CaseSchedule,
    AdminHome,
    AdminProfile,
    AdminUsers,
    /// Anything unmatched, including unknown categories.
    NotFound,
}

impl AppRoute {
    /// Parses a location pathname. Query strings and a trailing slash are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["dashboard"] => Self::UserHome,
            ["profile"] => Self::UserProfile,
            ["category"] => Self::Categories,
            ["files"] => Self::Files,
            ["case-schedule"] => Self::CaseSchedule,
            ["admin"] => Self::AdminHome,
            ["admin", "profile"] => Self::AdminProfile,
            ["admin", "users"] => Self::AdminUsers,
            ["cases", slug] => CaseCategory::from_slug(slug)
                .map(|category| Self::CaseList { category })
                .unwrap_or(Self::NotFound),
            ["case", id] if !id.is_empty() => Self::CaseDetail {
                id: urlencoding::decode(id)
                    .map(|decoded| Id::new(decoded.into_owned()))
                    .unwrap_or_else(|_| Id::from(*id)),
            },
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Root => "/".to_string(),
            Self::UserHome => "/dashboard".to_string(),
            Self::UserProfile => "/profile".to_string(),
            Self::CaseList { category } => format!("/cases/{}", category.slug()),
            Self::CaseDetail { id } => format!("/case/{}", urlencoding::encode(id.as_str())),
            Self::Categories => "/category".to_string(),
            Self::Files => "/files".to_string(),
            Self::CaseSchedule => "/case-schedule".to_string(),
            Self::AdminHome => "/admin".to_string(),
            Self::AdminProfile => "/admin/profile".to_string(),
            Self::AdminUsers => "/admin/users".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Login | Self::Root | Self::NotFound => Access::Public,
            Self::UserHome | Self::UserProfile => Access::Role(Role::User),
            Self::AdminHome | Self::AdminProfile | Self::AdminUsers => Access::Role(Role::Admin),
            Self::CaseList { .. }
            | Self::CaseDetail { .. }
            | Self::Categories
            | Self::Files
            | Self::CaseSchedule => Access::Authenticated,
        }
    }

    /// Routes that never render for a signed-in user and go to their home instead.
    pub fn redirects_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Root | Self::NotFound)
    }

    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminHome,
            Role::User => Self::UserHome,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_and_parameterised_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Root);
        assert_eq!(AppRoute::from_path(""), AppRoute::Root);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/admin/users/"), AppRoute::AdminUsers);
        assert_eq!(
            AppRoute::from_path("/cases/penuntutan"),
            AppRoute::CaseList {
                category: CaseCategory::Penuntutan
            }
        );
        assert_eq!(
            AppRoute::from_path("/case/42?tab=1"),
            AppRoute::CaseDetail { id: Id::from(42) }
        );
    }

    #[test]
    fn unknown_paths_and_categories_are_not_found() {
        assert_eq!(AppRoute::from_path("/cases/perdata"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/case/"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn paths_round_trip() {
        let routes = [
            AppRoute::Login,
            AppRoute::UserHome,
            AppRoute::CaseList {
                category: CaseCategory::Eksekusi,
            },
            AppRoute::CaseDetail { id: Id::from(7) },
            AppRoute::AdminProfile,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn access_rules() {
        assert!(!AppRoute::UserHome.access().allows(Role::Admin));
        assert!(AppRoute::UserHome.access().allows(Role::User));
        assert!(!AppRoute::AdminUsers.access().allows(Role::User));
        assert!(AppRoute::Files.access().allows(Role::Admin));
        assert_eq!(AppRoute::home_for(Role::Admin), AppRoute::AdminHome);
        assert_eq!(AppRoute::home_for(Role::User), AppRoute::UserHome);
    }
}

use crate::model::user::{BiodataDto, UserDto};
use crate::server::error::AppError;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_DISABLED: &str = "disabled";

/// User roles. A required role is satisfied by that role or by `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Researcher,
    GrantsManager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Researcher => "Researcher",
            Role::GrantsManager => "Grants Manager",
            Role::Admin => "Admin",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "Researcher" => Some(Role::Researcher),
            "Grants Manager" => Some(Role::GrantsManager),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Whether a user holding this role satisfies the `required` role.
    pub fn satisfies(&self, required: Role) -> bool {
        *self == required || *self == Role::Admin
    }
}

/// Parses a stored role string, treating an unknown value as data
/// corruption rather than user error.
pub fn parse_role(user: &entity::user::Model) -> Result<Role, AppError> {
    Role::parse(&user.role).ok_or_else(|| {
        AppError::InternalError(format!("User {} has unknown role {}", user.id, user.role))
    })
}

pub struct CreateUserParams {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Default)]
pub struct UpdateUserParams {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub status: Option<String>,
}

/// Converts a user entity into its DTO form. The password hash and biodata
/// never leave through this path.
pub fn into_dto(model: entity::user::Model) -> UserDto {
    UserDto {
        id: model.id,
        name: model.name,
        email: model.email,
        role: model.role,
        status: model.status,
        created_at: model.created_at,
    }
}

/// Converts a stored biodata value into its DTO form. The profile is a
/// free-form JSON object, so every key passes through untouched.
pub fn biodata_to_dto(biodata: entity::user::Biodata) -> BiodataDto {
    BiodataDto(biodata.0)
}

/// Converts a biodata DTO into its stored form.
pub fn biodata_from_dto(dto: BiodataDto) -> entity::user::Biodata {
    entity::user::Biodata(dto.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_satisfies_every_role() {
        assert!(Role::Admin.satisfies(Role::Researcher));
        assert!(Role::Admin.satisfies(Role::GrantsManager));
        assert!(Role::Admin.satisfies(Role::Admin));
    }

    #[test]
    fn manager_does_not_satisfy_admin() {
        assert!(Role::GrantsManager.satisfies(Role::GrantsManager));
        assert!(!Role::GrantsManager.satisfies(Role::Admin));
        assert!(!Role::Researcher.satisfies(Role::GrantsManager));
    }

    #[test]
    fn parses_stored_role_strings() {
        assert_eq!(Role::parse("Grants Manager"), Some(Role::GrantsManager));
        assert_eq!(Role::parse("manager"), None);
        assert_eq!(Role::parse(Role::Admin.as_str()), Some(Role::Admin));
    }

    #[test]
    fn biodata_preserves_arbitrary_keys() {
        let dto: BiodataDto = serde_json::from_str(
            r#"{"name":"Dr. A","institution":"Uni X","orcid":"0000-0002"}"#,
        )
        .unwrap();

        let stored = biodata_from_dto(dto);
        assert_eq!(
            stored.0.get("institution"),
            Some(&serde_json::json!("Uni X"))
        );

        let round_tripped = serde_json::to_value(biodata_to_dto(stored)).unwrap();
        assert_eq!(round_tripped["name"], "Dr. A");
        assert_eq!(round_tripped["orcid"], "0000-0002");
    }
}

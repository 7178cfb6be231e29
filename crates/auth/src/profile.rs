use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brasa_core::{DomainError, DomainResult, UserId};

use crate::Role;

/// Identity document types accepted at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    /// Cédula de ciudadanía.
    #[default]
    Cc,
    /// Tarjeta de identidad.
    Ti,
    /// Cédula de extranjería.
    Ce,
    Pasaporte,
}

/// Account status. Inactive accounts keep their records but are expected to be
/// blocked upstream by the auth provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Activo,
    Inactivo,
}

/// Application profile record, keyed 1:1 with a session's identity reference.
///
/// # Invariants
/// - Exactly one profile per identity, or none (an error condition surfaced by
///   the session state machine after its grace period).
/// - The role is immutable from this subsystem's perspective: profiles are
///   fetched, never mutated, by the session machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub nombre: String,
    pub apellido: String,
    pub tipo_documento: DocumentType,
    pub cedula: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub departamento: Option<String>,
    pub pais: Option<String>,
    /// Raw role value as stored by the backend. Kept raw so unrecognized
    /// values survive to the routing layer, which must surface them.
    pub rol: String,
    pub estado: AccountStatus,
    pub fecha_registro: DateTime<Utc>,
}

impl Profile {
    /// The recognized role, if any.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.rol)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Profile data captured at registration and handed to the auth provider,
/// which creates the profile record alongside the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSeed {
    pub nombre: String,
    pub apellido: String,
    pub tipo_documento: DocumentType,
    pub cedula: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub departamento: Option<String>,
    pub pais: Option<String>,
}

impl ProfileSeed {
    pub fn validate(&self) -> DomainResult<()> {
        if self.nombre.trim().is_empty() {
            return Err(DomainError::validation("el nombre es obligatorio"));
        }
        if self.apellido.trim().is_empty() {
            return Err(DomainError::validation("el apellido es obligatorio"));
        }
        if self.cedula.trim().is_empty() {
            return Err(DomainError::validation(
                "el número de documento es obligatorio",
            ));
        }
        Ok(())
    }

    /// Materialize the profile record for a freshly registered identity.
    /// New accounts always start as active general users.
    pub fn into_profile(self, user_id: UserId, registered_at: DateTime<Utc>) -> Profile {
        Profile {
            user_id,
            nombre: self.nombre.trim().to_string(),
            apellido: self.apellido.trim().to_string(),
            tipo_documento: self.tipo_documento,
            cedula: self.cedula.trim().to_string(),
            telefono: self.telefono,
            direccion: self.direccion,
            departamento: self.departamento,
            pais: self.pais,
            rol: Role::Usuario.as_str().to_string(),
            estado: AccountStatus::Activo,
            fecha_registro: registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> ProfileSeed {
        ProfileSeed {
            nombre: "Marta".to_string(),
            apellido: "Rojas".to_string(),
            tipo_documento: DocumentType::Cc,
            cedula: "1094123456".to_string(),
            telefono: Some("3001234567".to_string()),
            direccion: None,
            departamento: Some("Norte de Santander".to_string()),
            pais: Some("Colombia".to_string()),
        }
    }

    #[test]
    fn seed_requires_name_surname_and_document() {
        assert!(seed().validate().is_ok());

        let mut missing = seed();
        missing.nombre = "  ".to_string();
        assert!(missing.validate().is_err());

        let mut missing = seed();
        missing.apellido = String::new();
        assert!(missing.validate().is_err());

        let mut missing = seed();
        missing.cedula = String::new();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn new_profiles_default_to_active_general_user() {
        let profile = seed().into_profile(UserId::new(), Utc::now());
        assert_eq!(profile.role(), Some(Role::Usuario));
        assert_eq!(profile.estado, AccountStatus::Activo);
    }

    #[test]
    fn unrecognized_role_survives_as_raw_value() {
        let mut profile = seed().into_profile(UserId::new(), Utc::now());
        profile.rol = "gerente".to_string();
        assert_eq!(profile.role(), None);
        assert_eq!(profile.rol, "gerente");
    }
}

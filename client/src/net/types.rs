//! Wire DTOs for the reporting backend.
//!
//! DESIGN
//! ======
//! Field names on the wire are the backend's (`nombre`, `estado`, `rol`, ...);
//! serde renames keep Rust-side names in English while round-tripping the
//! backend JSON unchanged.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Administrator approval applied to every account before it may view content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalState {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aprobado")]
    Approved,
    #[serde(rename = "rechazado")]
    Rejected,
}

/// Account role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "usuario")]
    User,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// The role an admin toggles this one to from the roster.
    pub fn toggled(self) -> Self {
        match self {
            Self::User => Self::Admin,
            Self::Admin => Self::User,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

/// An account as returned by `/auth/me` and `/auth/admin/users`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidos", default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(rename = "foto_url", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(rename = "estado")]
    pub approval: ApprovalState,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "fecha_registro", default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    #[serde(rename = "ultimo_acceso", default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<String>,
}

impl User {
    /// Given name and surname joined for display.
    pub fn full_name(&self) -> String {
        match self.surname.as_deref().map(str::trim) {
            Some(surname) if !surname.is_empty() => format!("{} {surname}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// A report entry in the catalog, in server response order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "Descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagen_url", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    #[serde(rename = "pagina_default", default, skip_serializing_if = "Option::is_none")]
    pub default_page: Option<String>,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ReportSummary {
    /// Description with blank strings treated as absent.
    pub fn visible_description(&self) -> Option<&str> {
        self.description.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// Thumbnail URL with blank strings treated as absent.
    pub fn visible_thumbnail(&self) -> Option<&str> {
        self.thumbnail_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Short-lived, report-scoped credential for the visualization widget.
/// Never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedCredential {
    pub embed_token: String,
    pub embed_url: String,
    pub report_id: String,
    pub workspace_id: String,
}

/// Body of `POST /embed-token`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedTokenRequest {
    pub report_id: i64,
}

/// Body of `PUT /auth/admin/users/{id}/role`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoleChangeRequest {
    #[serde(rename = "rol")]
    pub role: Role,
}

/// Error payload the backend attaches to 4xx responses.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

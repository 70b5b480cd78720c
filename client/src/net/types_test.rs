use super::*;

#[test]
fn report_summary_without_optional_fields_parses() {
    let report: ReportSummary = serde_json::from_value(serde_json::json!({ "id": 5, "nombre": "X" })).unwrap();
    assert_eq!(report.id, 5);
    assert_eq!(report.name, "X");
    assert_eq!(report.visible_description(), None);
    assert_eq!(report.visible_thumbnail(), None);
    assert_eq!(report.workspace_id, None);
}

#[test]
fn report_summary_reads_backend_field_names() {
    let report: ReportSummary = serde_json::from_value(serde_json::json!({
        "id": 3,
        "nombre": "Ventas",
        "Descripcion": "Resumen mensual",
        "imagen_url": "https://cdn.example/v.png",
        "workspace_id": "ws-1",
        "report_id": "rp-1",
        "pagina_default": "ReportSection1",
        "estado": "activo"
    }))
    .unwrap();
    assert_eq!(report.visible_description(), Some("Resumen mensual"));
    assert_eq!(report.visible_thumbnail(), Some("https://cdn.example/v.png"));
    assert_eq!(report.default_page.as_deref(), Some("ReportSection1"));
    assert_eq!(report.status.as_deref(), Some("activo"));
}

#[test]
fn blank_description_and_thumbnail_are_hidden() {
    let report: ReportSummary =
        serde_json::from_value(serde_json::json!({ "id": 1, "nombre": "A", "Descripcion": "  ", "imagen_url": "" }))
            .unwrap();
    assert_eq!(report.visible_description(), None);
    assert_eq!(report.visible_thumbnail(), None);
}

#[test]
fn user_parses_spanish_state_and_role() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 7,
        "email": "ana@example.edu",
        "nombre": "Ana",
        "apellidos": "Torres",
        "estado": "pendiente",
        "rol": "usuario",
        "ultimo_acceso": "2024-05-01T10:00:00Z"
    }))
    .unwrap();
    assert_eq!(user.approval, ApprovalState::Pending);
    assert_eq!(user.role, Role::User);
    assert_eq!(user.full_name(), "Ana Torres");
    assert_eq!(user.last_access.as_deref(), Some("2024-05-01T10:00:00Z"));
}

#[test]
fn user_rejects_unknown_approval_state() {
    let parsed = serde_json::from_value::<User>(serde_json::json!({
        "id": 1,
        "email": "x@example.edu",
        "nombre": "X",
        "estado": "suspendido",
        "rol": "admin"
    }));
    assert!(parsed.is_err());
}

#[test]
fn full_name_skips_blank_surname() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 1, "email": "x@example.edu", "nombre": "Luis", "apellidos": " ", "estado": "aprobado", "rol": "admin"
    }))
    .unwrap();
    assert_eq!(user.full_name(), "Luis");
}

#[test]
fn embed_credential_uses_camel_case() {
    let cred: EmbedCredential = serde_json::from_value(serde_json::json!({
        "embedToken": "tok",
        "embedUrl": "https://app.powerbi.com/reportEmbed?reportId=r",
        "reportId": "r",
        "workspaceId": "w"
    }))
    .unwrap();
    assert_eq!(cred.embed_token, "tok");
    assert_eq!(cred.workspace_id, "w");
}

#[test]
fn request_bodies_serialize_backend_shape() {
    assert_eq!(
        serde_json::to_value(EmbedTokenRequest { report_id: 9 }).unwrap(),
        serde_json::json!({ "reportId": 9 })
    );
    assert_eq!(
        serde_json::to_value(RoleChangeRequest { role: Role::Admin }).unwrap(),
        serde_json::json!({ "rol": "admin" })
    );
}

#[test]
fn role_toggles_between_user_and_admin() {
    assert_eq!(Role::User.toggled(), Role::Admin);
    assert_eq!(Role::Admin.toggled(), Role::User);
}

mod common;

use axum::http::StatusCode;
use serde_json::json;

fn credentials<'a>(password: &'a str) -> [(&'static str, &'a str); 3] {
    [
        ("username", common::ADMIN_USER),
        ("password", password),
        ("secret_code", common::ADMIN_SECRET),
    ]
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let (_api, server) = common::setup().await;

    let response = server.get("/admin").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin/login");
}

#[tokio::test]
async fn test_login_sets_cookie_and_redirects() {
    let (_api, server) = common::setup().await;

    let response = server
        .post("/admin/login")
        .form(&credentials(common::ADMIN_PASSWORD))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin");

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with(&common::admin_cookie()));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/admin"));
}

#[tokio::test]
async fn test_login_rejected_shows_api_detail() {
    let (_api, server) = common::setup().await;

    let response = server
        .post("/admin/login")
        .form(&credentials("wrong"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.text();
    assert!(body.contains("Credenciales incorrectas"));
    assert!(body.contains(r#"value="admin""#));
}

#[tokio::test]
async fn test_login_with_missing_fields() {
    let (_api, server) = common::setup().await;

    let response = server
        .post("/admin/login")
        .form(&[("username", "admin"), ("password", ""), ("secret_code", "")])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("Campos requeridos"));
}

#[tokio::test]
async fn test_expired_notice_on_login_page() {
    let (_api, server) = common::setup().await;

    let response = server.get("/admin/login").add_query_param("expired", "1").await;

    response.assert_status_ok();
    assert!(response.text().contains("Sesión expirada"));
}

#[tokio::test]
async fn test_dashboard_lists_guests_and_next_code() {
    let (_api, server) = common::setup().await;

    let response = server
        .get("/admin")
        .add_header("Cookie", common::admin_cookie())
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("FM2026-001"));
    assert!(body.contains("Familia Pérez"));
    assert!(body.contains("Ana Torres"));
    assert!(body.contains(r#"placeholder="FM2026-003""#));
    assert!(body.contains("Pendiente"));
}

#[tokio::test]
async fn test_invalid_token_forces_logout() {
    let (_api, server) = common::setup().await;

    let response = server
        .get("/admin")
        .add_header("Cookie", "admin_token=stale")
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin/login?expired=1");
    let cookie = response.header("set-cookie");
    assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_create_guest_with_generated_code() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests")
        .add_header("Cookie", common::admin_cookie())
        .form(&[
            ("nombres", "Familia Núñez"),
            ("max_adultos", "2"),
            ("max_ninos", ""),
            ("codigo", ""),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location"),
        "/admin?aviso=creado&codigo=FM2026-003"
    );

    let created = api.guest_by_code("FM2026-003").unwrap();
    assert_eq!(created["nombres"], "Familia Núñez");
    assert_eq!(created["max_adultos"], 2);
    assert_eq!(created["max_ninos"], 0);
}

#[tokio::test]
async fn test_created_notice_on_dashboard() {
    let (_api, server) = common::setup().await;

    let response = server
        .get("/admin")
        .add_query_param("aviso", "creado")
        .add_query_param("codigo", "FM2026-003")
        .add_header("Cookie", common::admin_cookie())
        .await;

    response.assert_status_ok();
    assert!(
        response
            .text()
            .contains("El invitado ha sido agregado con el código: FM2026-003")
    );
}

#[tokio::test]
async fn test_create_rejects_known_duplicate() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests")
        .add_header("Cookie", common::admin_cookie())
        .form(&[
            ("nombres", "Otra familia"),
            ("max_adultos", "1"),
            ("max_ninos", "0"),
            ("codigo", "fm2026-001"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.text();
    assert!(body.contains("Código duplicado"));
    assert!(body.contains(r#"value="Otra familia""#));
    assert_eq!(api.guests().len(), 2);
}

#[tokio::test]
async fn test_create_surfaces_server_duplicate() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests")
        .add_header("Cookie", common::admin_cookie())
        .form(&[
            ("nombres", "Familia López"),
            ("max_adultos", "2"),
            ("max_ninos", "0"),
            ("codigo", common::RESERVED_CODE),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("El código ya existe"));
    assert_eq!(api.guests().len(), 2);
}

#[tokio::test]
async fn test_create_requires_an_adult() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests")
        .add_header("Cookie", common::admin_cookie())
        .form(&[
            ("nombres", "Solo niños"),
            ("max_adultos", "0"),
            ("max_ninos", "2"),
            ("codigo", ""),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("Campos requeridos"));
    assert_eq!(api.guests().len(), 2);
}

#[tokio::test]
async fn test_edit_page_shows_guest() {
    let (_api, server) = common::setup().await;

    let response = server
        .get("/admin/guests/1/edit")
        .add_header("Cookie", common::admin_cookie())
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains(r#"value="Familia Pérez""#));
    assert!(body.contains(r#"value="pendiente" selected"#));
}

#[tokio::test]
async fn test_edit_page_for_unknown_guest() {
    let (_api, server) = common::setup().await;

    let response = server
        .get("/admin/guests/99/edit")
        .add_header("Cookie", common::admin_cookie())
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("No encontrado"));
}

#[tokio::test]
async fn test_admin_can_reset_answer_to_pending() {
    let mut confirmed = common::stub_guest(1, "FM2026-001", "Familia Pérez", 2, 1);
    confirmed["estado"] = json!("confirmado");
    confirmed["confirmacion"] = json!("Si, asistiremos.");
    let (api, server) =
        common::setup_with(vec![confirmed], chrono::Utc::now() + chrono::Duration::days(30)).await;

    let response = server
        .post("/admin/guests/1")
        .add_header("Cookie", common::admin_cookie())
        .form(&[
            ("nombres", "Familia Pérez"),
            ("max_adultos", "2"),
            ("max_ninos", "1"),
            ("estado", "pendiente"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location"),
        "/admin?aviso=actualizado&codigo=FM2026-001"
    );

    let guest = api.guest_by_code("FM2026-001").unwrap();
    assert_eq!(guest["estado"], "pendiente");
    assert_eq!(guest["max_personas"], 3);
}

#[tokio::test]
async fn test_delete_guest() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests/2/delete")
        .add_header("Cookie", common::admin_cookie())
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin?aviso=eliminado");
    assert!(api.guest_by_code("FM2026-002").is_none());
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (_api, server) = common::setup().await;

    let response = server
        .post("/admin/logout")
        .add_header("Cookie", common::admin_cookie())
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin/login");
    assert!(
        response
            .header("set-cookie")
            .to_str()
            .unwrap()
            .contains("Max-Age=0")
    );
}

fn assert_forced_logout(response: &axum_test::TestResponse) {
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin/login?expired=1");
    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("admin_token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_invalid_token_on_create_forces_logout() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests")
        .add_header("Cookie", "admin_token=stale")
        .form(&[
            ("nombres", "Familia Núñez"),
            ("max_adultos", "2"),
            ("max_ninos", "0"),
            ("codigo", ""),
        ])
        .await;

    assert_forced_logout(&response);
    assert_eq!(api.guests().len(), 2);
}

#[tokio::test]
async fn test_invalid_token_on_update_forces_logout() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests/1")
        .add_header("Cookie", "admin_token=stale")
        .form(&[
            ("nombres", "Otro nombre"),
            ("max_adultos", "2"),
            ("max_ninos", "1"),
            ("estado", "confirmado"),
        ])
        .await;

    assert_forced_logout(&response);
    let guest = api.guest_by_code("FM2026-001").unwrap();
    assert_eq!(guest["nombres"], "Familia Pérez");
    assert_eq!(guest["estado"], "pendiente");
}

#[tokio::test]
async fn test_invalid_token_on_delete_forces_logout() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests/2/delete")
        .add_header("Cookie", "admin_token=stale")
        .await;

    assert_forced_logout(&response);
    assert!(api.guest_by_code("FM2026-002").is_some());
}

#[tokio::test]
async fn test_invalid_token_on_edit_page_forces_logout() {
    let (_api, server) = common::setup().await;

    let response = server
        .get("/admin/guests/1/edit")
        .add_header("Cookie", "admin_token=stale")
        .await;

    assert_forced_logout(&response);
}

#[tokio::test]
async fn test_create_with_non_numeric_adults_shows_banner() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests")
        .add_header("Cookie", common::admin_cookie())
        .form(&[
            ("nombres", "Familia Núñez"),
            ("max_adultos", "dos"),
            ("max_ninos", "0"),
            ("codigo", ""),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains("Campos requeridos"));
    assert!(body.contains(r#"value="Familia Núñez""#));
    assert!(body.contains(r#"value="dos""#));
    assert_eq!(api.guests().len(), 2);
}

#[tokio::test]
async fn test_update_with_unknown_status_shows_banner() {
    let (api, server) = common::setup().await;

    let response = server
        .post("/admin/guests/1")
        .add_header("Cookie", common::admin_cookie())
        .form(&[
            ("nombres", "Familia Pérez"),
            ("max_adultos", "2"),
            ("max_ninos", "1"),
            ("estado", "quizas"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text();
    assert!(body.contains("Campos requeridos"));
    assert!(body.contains(r#"value="pendiente" selected"#));
    assert_eq!(api.guest_by_code("FM2026-001").unwrap()["estado"], "pendiente");
}

#[tokio::test]
async fn test_dashboard_survives_huge_custom_code() {
    let mut guests = common::default_guests();
    guests.push(common::stub_guest(3, "VIP-4294967295", "Mesa VIP", 2, 0));
    let (_api, server) =
        common::setup_with(guests, chrono::Utc::now() + chrono::Duration::days(30)).await;

    let response = server
        .get("/admin")
        .add_header("Cookie", common::admin_cookie())
        .await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"placeholder="FM2026-4294967296""#));
}

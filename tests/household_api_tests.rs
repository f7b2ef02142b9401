use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn create_household_enrolls_the_owner() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let token = app.register("carole@exemple.fr", "semaine2024").await;

    let response = app
        .send(
            "POST",
            "/api/household",
            Some(&token),
            Some(json!({ "name": "Maison Dupont" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::read_json(response).await;
    assert_eq!(body["household"]["name"], "Maison Dupont");

    let overview = app.send("GET", "/api/household", Some(&token), None).await;
    let body = common::read_json(overview).await;
    assert_eq!(body["household"]["name"], "Maison Dupont");
    assert_eq!(body["members"].as_array().unwrap().len(), 1);
    assert_eq!(body["members"][0]["pseudo"], "carole");
}

#[tokio::test]
async fn overview_without_household_is_empty() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let token = app.register("carole@exemple.fr", "semaine2024").await;

    let response = app.send("GET", "/api/household", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert!(body["household"].is_null());
    assert_eq!(body["members"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn blank_household_name_is_rejected() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let token = app.register("carole@exemple.fr", "semaine2024").await;

    let response = app
        .send(
            "POST",
            "/api/household",
            Some(&token),
            Some(json!({ "name": "   " })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = common::read_json(response).await;
    assert_eq!(body["message"], "Renseigne un nom de foyer.");
}

#[tokio::test]
async fn second_household_is_a_conflict() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let token = app.register("carole@exemple.fr", "semaine2024").await;
    app.send(
        "POST",
        "/api/household",
        Some(&token),
        Some(json!({ "name": "Maison Dupont" })),
    )
    .await;

    let response = app
        .send(
            "POST",
            "/api/household",
            Some(&token),
            Some(json!({ "name": "Autre maison" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = common::read_json(response).await;
    assert_eq!(
        body["message"],
        "Tu fais déjà partie d'un foyer. Quitte-le avant d'en créer un nouveau."
    );
}

#[tokio::test]
async fn owner_invites_a_member_by_email() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let owner = app.register("carole@exemple.fr", "semaine2024").await;
    app.register("bruno@exemple.fr", "semaine2024").await;
    app.send(
        "POST",
        "/api/household",
        Some(&owner),
        Some(json!({ "name": "Maison Dupont" })),
    )
    .await;

    let response = app
        .send(
            "POST",
            "/api/household/members",
            Some(&owner),
            Some(json!({ "email": "Bruno@Exemple.fr" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::read_json(response).await;
    assert_eq!(body["member"]["pseudo"], "bruno");
    assert_eq!(body["message"], "Membre ajouté au foyer !");

    let overview = app.send("GET", "/api/household", Some(&owner), None).await;
    let body = common::read_json(overview).await;
    assert_eq!(body["members"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn only_the_owner_invites() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let owner = app.register("carole@exemple.fr", "semaine2024").await;
    let member = app.register("bruno@exemple.fr", "semaine2024").await;
    app.register("chloe@exemple.fr", "semaine2024").await;

    app.send(
        "POST",
        "/api/household",
        Some(&owner),
        Some(json!({ "name": "Maison Dupont" })),
    )
    .await;
    app.send(
        "POST",
        "/api/household/members",
        Some(&owner),
        Some(json!({ "email": "bruno@exemple.fr" })),
    )
    .await;

    let response = app
        .send(
            "POST",
            "/api/household/members",
            Some(&member),
            Some(json!({ "email": "chloe@exemple.fr" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = common::read_json(response).await;
    assert_eq!(
        body["message"],
        "Seul le créateur du foyer peut ajouter des membres."
    );
}

#[tokio::test]
async fn inviting_an_unknown_email_is_not_found() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let owner = app.register("carole@exemple.fr", "semaine2024").await;
    app.send(
        "POST",
        "/api/household",
        Some(&owner),
        Some(json!({ "name": "Maison Dupont" })),
    )
    .await;

    let response = app
        .send(
            "POST",
            "/api/household/members",
            Some(&owner),
            Some(json!({ "email": "inconnue@exemple.fr" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::read_json(response).await;
    assert_eq!(body["message"], "Aucun utilisateur avec cet email.");
}

#[tokio::test]
async fn joining_by_owner_pseudo_shares_the_household() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let owner = app.register("carole@exemple.fr", "semaine2024").await;
    let joiner = app.register("bruno@exemple.fr", "semaine2024").await;
    app.send(
        "POST",
        "/api/household",
        Some(&owner),
        Some(json!({ "name": "Maison Dupont" })),
    )
    .await;

    let response = app
        .send(
            "POST",
            "/api/household/join",
            Some(&joiner),
            Some(json!({ "pseudo": "carole" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert_eq!(body["household"]["name"], "Maison Dupont");
    assert_eq!(
        body["message"],
        "Demande acceptée ! Tu partages maintenant ce foyer."
    );

    let overview = app.send("GET", "/api/household", Some(&joiner), None).await;
    let body = common::read_json(overview).await;
    assert_eq!(body["members"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn joining_an_unknown_pseudo_is_not_found() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let token = app.register("bruno@exemple.fr", "semaine2024").await;

    let response = app
        .send(
            "POST",
            "/api/household/join",
            Some(&token),
            Some(json!({ "pseudo": "personne" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::read_json(response).await;
    assert_eq!(body["message"], "Aucun foyer associé à ce pseudo.");
}

#[tokio::test]
async fn inviting_someone_already_in_a_household_is_a_conflict() {
    let pool = common::setup_test_db().await;
    let app = common::create_test_app(pool).await;

    let carole = app.register("carole@exemple.fr", "semaine2024").await;
    let denis = app.register("denis@exemple.fr", "semaine2024").await;
    app.register("bruno@exemple.fr", "semaine2024").await;

    app.send(
        "POST",
        "/api/household",
        Some(&carole),
        Some(json!({ "name": "Maison Dupont" })),
    )
    .await;
    app.send(
        "POST",
        "/api/household",
        Some(&denis),
        Some(json!({ "name": "Maison Martin" })),
    )
    .await;
    app.send(
        "POST",
        "/api/household/members",
        Some(&denis),
        Some(json!({ "email": "bruno@exemple.fr" })),
    )
    .await;

    let response = app
        .send(
            "POST",
            "/api/household/members",
            Some(&carole),
            Some(json!({ "email": "bruno@exemple.fr" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = common::read_json(response).await;
    assert_eq!(body["message"], "Cet utilisateur appartient déjà à un foyer.");
}

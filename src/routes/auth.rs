use crate::{
    auth::{generate_token, verify_password, LoginRequest, LoginResponse},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}

/// Login user
///
/// Checks the candidate password against the stored bcrypt verifier and, on
/// success, returns a token valid for 30 minutes. Unknown users and wrong
/// passwords get the same 401.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let LoginRequest {
        username,
        password_candidate,
    } = login_data.into_inner();

    if username.is_empty() || password_candidate.is_empty() {
        return Err(invalid_credentials());
    }

    let user = match state.users.find_by_username(&username).await? {
        Some(user) => user,
        None => {
            log::info!("login rejected: unknown user {:?}", username);
            return Err(invalid_credentials());
        }
    };

    if !verify_password(&password_candidate, &user.password_hash) {
        log::info!("login rejected: wrong password for {:?}", username);
        return Err(invalid_credentials());
    }

    let issued = generate_token(&user.username, &state.jwt)?;
    log::info!("issued token for {:?}", user.username);

    Ok(HttpResponse::Ok().json(LoginResponse::from(issued)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{hash_password, verify_token, JwtSettings};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn settings(secret: Option<&str>) -> JwtSettings {
        JwtSettings {
            secret: secret.map(str::to_string),
            issuer: "todolist".to_string(),
            audience: "todolist-client".to_string(),
        }
    }

    async fn state_with_alice(secret: Option<&str>) -> AppState {
        let state = AppState::in_memory(settings(secret));
        let hash = hash_password("correct horse").unwrap();
        state.users.create_user("alice", &hash).await.unwrap();
        state
    }

    #[actix_rt::test]
    async fn test_login_issues_token_for_subject() {
        let state = state_with_alice(Some("route-secret")).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "alice", "passwordCandidate": "correct horse" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: LoginResponse = test::read_body_json(resp).await;
        let claims = verify_token(&body.token, &settings(Some("route-secret"))).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, body.expiration.timestamp());
    }

    #[actix_rt::test]
    async fn test_login_without_secret_is_server_error() {
        let state = state_with_alice(None).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "alice", "passwordCandidate": "correct horse" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // Bad credentials are still reported as such.
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "alice", "passwordCandidate": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

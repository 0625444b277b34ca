//! Application router configuration with protected and unprotected route
//! definitions.

use axum::{
    Router, middleware,
    routing::get,
};

use crate::{
    AppState,
    auth::middleware::auth_guard,
    dashboard::get_dashboard_page,
    endpoints,
    export::{get_export_csv, get_transaction_pdf, get_transaction_whatsapp},
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_new_transaction_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new().route(
        endpoints::LOG_IN_VIEW,
        get(get_log_in_page).post(post_log_in),
    );

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page).post(edit_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            get(delete_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION_PDF, get(get_transaction_pdf))
        .route(
            endpoints::TRANSACTION_WHATSAPP,
            get(get_transaction_whatsapp),
        )
        .route(endpoints::EXPORT_CSV, get(get_export_csv))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes.merge(unprotected_routes).with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, Config, SenderIdentity, auth::StaticCredentials, endpoints,
    };

    use super::build_router;

    fn test_config() -> Config {
        Config {
            cookie_secret: "42".to_owned(),
            credentials: StaticCredentials {
                username: "admin".to_owned(),
                password: "123456".to_owned(),
            },
            sender: SenderIdentity {
                name: "Loja".to_owned(),
                phone: "(11) 91234-5678".to_owned(),
                email: "loja@example.com".to_owned(),
                instagram: "@loja".to_owned(),
                tagline: "Mensagem automática.".to_owned(),
            },
        }
    }

    fn test_server() -> TestServer {
        let state = AppState::new(test_config(), Connection::open_in_memory().unwrap()).unwrap();
        let mut server = TestServer::new(build_router(state));
        server.save_cookies();

        server
    }

    #[tokio::test]
    async fn protected_routes_redirect_to_log_in_without_session() {
        let server = test_server();

        for path in [
            endpoints::DASHBOARD_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
            endpoints::EXPORT_CSV,
            "/transaction/edit/1",
            "/transaction/delete/1",
            "/transaction/pdf/1",
            "/transaction/whatsapp/1",
            endpoints::LOG_OUT,
        ] {
            let response = server.get(path).await;

            response.assert_status_see_other();
            assert_eq!(
                response.header("location"),
                endpoints::LOG_IN_VIEW,
                "path {path} should redirect to log-in"
            );
        }
    }

    #[tokio::test]
    async fn log_in_page_is_reachable_without_session() {
        let server = test_server();

        let response = server.get(endpoints::LOG_IN_VIEW).await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn logging_in_unlocks_the_dashboard() {
        let server = test_server();

        let response = server
            .post(endpoints::LOG_IN_VIEW)
            .form(&[("username", "admin"), ("password", "123456")])
            .await;
        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);

        let response = server.get(endpoints::DASHBOARD_VIEW).await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn wrong_password_stays_locked_out() {
        let server = test_server();

        let response = server
            .post(endpoints::LOG_IN_VIEW)
            .form(&[("username", "admin"), ("password", "wrong")])
            .await;
        response.assert_status_unauthorized();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;
        response.assert_status_see_other();
    }

    #[tokio::test]
    async fn logging_out_locks_the_dashboard_again() {
        let server = test_server();

        server
            .post(endpoints::LOG_IN_VIEW)
            .form(&[("username", "admin"), ("password", "123456")])
            .await;
        server.get(endpoints::LOG_OUT).await;

        let response = server.get(endpoints::DASHBOARD_VIEW).await;
        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::LOG_IN_VIEW);
    }
}

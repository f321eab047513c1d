use dioxus::prelude::*;

use ui::StoreProvider;
use views::{Dashboard, SearchUser, Shell, Users};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Dashboard {},
        #[route("/users")]
        Users {},
        #[route("/searchuser")]
        SearchUser {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start the async runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // dx may already have installed a subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::sync::Arc;

    dotenvy::dotenv().ok();
    init_tracing();

    let config = match api::BackendConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    tracing::info!(backend = %config.url, "proxying /api/proxy to the hosted backend");

    let backend = Arc::new(api::PostgrestClient::new(&config));

    // Proxy routes first, then the Dioxus application
    let router = axum::Router::new()
        .merge(api::proxy::router(backend))
        .serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind the server address");
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server error: {e}");
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::DASHBOARD_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        StoreProvider {
            Router::<Route> {}
        }
    }
}

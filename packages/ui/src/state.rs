//! Client state shared through context.
//!
//! [`StoreProvider`] owns the sidebar store, the search pipeline, the user list
//! query version and the notification stack. The stores start out memory-backed
//! so server and client render the same markup, and are swapped for the
//! platform storage once the app is mounted.

use std::time::Duration;

use api::ProxyClient;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::search::{DebounceToken, FetchTicket, DEBOUNCE_INTERVAL};
use store::sidebar::SIDEBAR_BREAKPOINT_PX;
use store::{MemoryStorage, SearchFailure, SearchPipeline, SidebarStore, StorageScope};

use crate::notifications::Notifications;
use crate::storage::make_storage;

/// Origin used outside the browser when `BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Version counter of the user list query. Bumping it refetches the list.
#[derive(Clone, Copy, PartialEq)]
pub struct UsersQuery {
    version: Signal<u64>,
}

impl UsersQuery {
    /// Read (and subscribe to) the current version.
    pub fn version(&self) -> u64 {
        *self.version.read()
    }

    pub fn invalidate(&mut self) {
        *self.version.write() += 1;
    }
}

pub fn use_sidebar_store() -> Signal<SidebarStore> {
    use_context::<Signal<SidebarStore>>()
}

pub fn use_search() -> Signal<SearchPipeline> {
    use_context::<Signal<SearchPipeline>>()
}

pub fn use_users_query() -> UsersQuery {
    use_context::<UsersQuery>()
}

/// Client for the proxy routes of the serving origin.
pub fn proxy_client() -> ProxyClient {
    #[cfg(target_arch = "wasm32")]
    {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        ProxyClient::new(origin)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        ProxyClient::new(base)
    }
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::sleep(duration).await;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(duration).await;
    }
}

// Search tasks run in the root scope: leaving the search page must not cancel
// a timer or fetch the pipeline is waiting on.

/// Start the debounce timer for `token`; search when it is still current afterwards.
pub fn schedule_search(mut search: Signal<SearchPipeline>, token: DebounceToken) {
    spawn_forever(async move {
        sleep(DEBOUNCE_INTERVAL).await;
        let ticket = search.write().debounce_elapsed(token);
        if let Some(ticket) = ticket {
            run_search(search, ticket).await;
        }
    });
}

/// Start the fetch for an explicitly submitted `ticket`.
pub fn start_search(search: Signal<SearchPipeline>, ticket: FetchTicket) {
    spawn_forever(run_search(search, ticket));
}

/// Hands the ticket back to the pipeline when the fetch is dropped unresolved.
struct InFlight {
    search: Signal<SearchPipeline>,
    ticket: Option<FetchTicket>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            if let Ok(mut pipeline) = self.search.try_write() {
                pipeline.abandon(&ticket);
            }
        }
    }
}

/// Issue the fetch for `ticket` and hand the outcome back to the pipeline.
pub async fn run_search(search: Signal<SearchPipeline>, ticket: FetchTicket) {
    tracing::debug!(term = ticket.term(), "searching users");
    let mut guard = InFlight {
        search,
        ticket: Some(ticket.clone()),
    };
    let result = proxy_client()
        .search_users(ticket.term())
        .await
        .map_err(SearchFailure::from);
    guard.ticket = None;
    guard.search.write().resolve(ticket, result);
}

const VIEWPORT_BRIDGE_JS: &str = r#"(function() {
    var report = function() { dioxus.send(window.innerWidth); };
    window.addEventListener('resize', report);
    report();
})();"#;

/// Feed the viewport width into the sidebar store now and whenever the window
/// crosses the breakpoint.
async fn watch_viewport(mut sidebar: Signal<SidebarStore>) {
    let mut eval = document::eval(VIEWPORT_BRIDGE_JS);
    let mut narrow = None;
    while let Ok(width) = eval.recv::<f64>().await {
        let is_narrow = width < SIDEBAR_BREAKPOINT_PX;
        if narrow != Some(is_narrow) {
            narrow = Some(is_narrow);
            sidebar.write().fit_viewport(width);
        }
    }
}

#[component]
pub fn StoreProvider(children: Element) -> Element {
    let mut sidebar =
        use_context_provider(|| Signal::new(SidebarStore::new(Box::new(MemoryStorage::new()))));
    let mut search =
        use_context_provider(|| Signal::new(SearchPipeline::new(Box::new(MemoryStorage::new()))));
    use_context_provider(|| UsersQuery {
        version: Signal::new(0),
    });
    use_context_provider(|| Signal::new(Notifications::default()));

    // Runs on the client only, after hydration.
    use_effect(move || {
        sidebar.set(SidebarStore::new(make_storage(StorageScope::Durable)));
        spawn(watch_viewport(sidebar));

        let pipeline = SearchPipeline::new(make_storage(StorageScope::Session));
        let resume = pipeline.resume();
        search.set(pipeline);
        if let Some(token) = resume {
            schedule_search(search, token);
        }
    });

    rsx! {
        {children}
    }
}

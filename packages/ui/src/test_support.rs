use std::time::Duration;

use dioxus::dioxus_core::{NoOpMutations, VirtualDom};

/// Run the dom's tasks and re-renders for `duration`.
pub async fn drive(dom: &mut VirtualDom, duration: Duration) {
    let _ = tokio::time::timeout(duration, async {
        loop {
            dom.wait_for_work().await;
            dom.render_immediate(&mut NoOpMutations);
        }
    })
    .await;
}

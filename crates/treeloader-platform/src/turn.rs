//! Deferral to the next scheduling turn.

/// Yield to the runtime so every task already queued runs first.
#[cfg(not(target_arch = "wasm32"))]
pub async fn next_turn() {
    tokio::task::yield_now().await;
}

/// Resolve on a fresh macrotask (`setTimeout(fn, 0)`).
///
/// A microtask is not enough: the document parser may still be inside the
/// current task when the loader fails early, and the deferred work touches
/// elements that only exist once parsing finished.
#[cfg(target_arch = "wasm32")]
pub async fn next_turn() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            // No window (worker) or the timer was refused: resolve immediately.
            let _ = resolve.call0(&wasm_bindgen::JsValue::UNDEFINED);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

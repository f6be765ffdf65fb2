use tracing::{error, info};
use treeloader::{
    LoadOrchestrator, LoaderConfig, read_params,
    core::{ModParams, ReferenceBuilder},
    net::HttpClient,
};
use url::Url;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::{collaborators::WindowCollaborators, host::DomScriptHost, surface::DomSurface};

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_error("no window"))
}

fn location(window: &Window) -> Result<Url, JsValue> {
    let href = window.location().href()?;
    Url::parse(&href).map_err(js_error)
}

/// The static scripts come from the page's own directory.
fn page_config(page: &Url) -> Result<LoaderConfig, JsValue> {
    let config = LoaderConfig::default();
    let local_root = page.join("./").map_err(js_error)?;
    let manifest = config.manifest.clone().with_local_root(local_root);
    Ok(config.with_manifest(manifest))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    wasm_bindgen_futures::spawn_local(async {
        if let Err(error) = boot_page().await {
            error!(?error, "loader page could not boot");
        }
    });
}

async fn boot_page() -> Result<(), JsValue> {
    let window = window()?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;
    let page = location(&window)?;
    let config = page_config(&page)?;

    let params = ModParams::from_query_with(page.query().unwrap_or_default(), &config.defaults);
    let net = HttpClient::new(&config.net).map_err(js_error)?;
    let orchestrator = LoadOrchestrator::new(
        &config,
        net,
        DomScriptHost::new(document.clone()),
        WindowCollaborators::new(window),
        DomSurface::new(document),
    )
    .map_err(js_error)?;

    let state = orchestrator.boot(params).await;
    info!(%state, "loader finished");
    Ok(())
}

/// Navigate to the mod currently entered in the selector.
#[wasm_bindgen(js_name = loadSelectedMod)]
pub fn load_selected_mod() -> Result<(), JsValue> {
    let window = window()?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;
    let params = read_params(&DomSurface::new(document));

    let target = ReferenceBuilder::new(location(&window)?).for_params(&params);
    info!(%target, "switching mod");
    window.location().set_href(target.as_str())
}

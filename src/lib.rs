#![cfg(target_arch = "wasm32")]
use crate::constants::SCENE_CONTAINER_ID;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod debug_bars;
mod dom;
mod equalizer;
mod manager;
mod panel;
mod player;
mod render;

struct App {
    manager: manager::WebglManager,
    player: player::Player,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("audio-equalizer starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear down the player and the render loop.
#[wasm_bindgen]
pub fn destroy() {
    let app = APP.with(|app| app.borrow_mut().take());
    if let Some(mut app) = app {
        app.player.destroy();
        app.manager.destroy();
        log::info!("audio-equalizer destroyed");
    }
}

async fn init() -> anyhow::Result<()> {
    let document = dom::document()?;
    let container: web::HtmlElement = document
        .get_element_by_id(SCENE_CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", SCENE_CONTAINER_ID))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let mut manager = manager::WebglManager::new(&container).await?;
    manager.play();

    let player = match player::Player::new(&manager, &container) {
        Ok(player) => player,
        Err(e) => {
            manager.destroy();
            return Err(e);
        }
    };
    log::info!("[player] ready; choose an audio file to start");

    APP.with(|app| {
        *app.borrow_mut() = Some(App { manager, player });
    });
    Ok(())
}

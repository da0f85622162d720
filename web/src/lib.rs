pub mod api;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod format;
pub mod forms;
pub mod js_api;
pub mod navbar;
pub mod navigation;
pub mod notification;
pub mod page;
pub mod storage;
pub mod timer;
pub mod user_session;
pub mod validation;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());
    if let Err(error) = page::on_ready(page::bootstrap) {
        log::error!("Fail to schedule page bootstrap, error={error}");
    }
}

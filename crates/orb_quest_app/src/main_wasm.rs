use wasm_bindgen::prelude::*;
use web_sys::console;

pub(crate) fn main_wasm() -> Result<(), JsValue> {
    // The game sizes itself and keeps its high score through the page
    if web_sys::window().is_none() {
        return Err(JsValue::from_str("Orb Quest needs a browser window"));
    }
    console::log_1(
        &format!(
            "Starting {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )
        .into(),
    );
    orb_quest::run();
    Ok(())
}

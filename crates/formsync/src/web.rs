//! Browser entry points
//!
//! The page creates one `PanelBridge`, calls `initPage()` once its DOM is
//! ready, and wires control events to the handler methods:
//!
//! ```js
//! const bridge = new PanelBridge();
//! bridge.initPage();
//! modeSelect.onchange = () => bridge.changeMode(modeSelect);
//! powerButton.onclick = () => bridge.togglePower(powerButton);
//! ```

use std::sync::Arc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};

use crate::application::{BridgeError, FormSyncBridge};
use crate::domain::{FormControl, PageLayout};
use crate::infrastructure::http_client::GlooHttpClient;
use crate::infrastructure::page::WebPage;
use crate::infrastructure::spawner::LocalSpawner;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

fn to_js(e: BridgeError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn select_control(select: &HtmlSelectElement) -> FormControl {
    FormControl {
        name: select.name(),
        value: select.value(),
        class_name: select.class_name(),
        form_action: select.form().map(|form| form.action()),
    }
}

fn input_control(input: &HtmlInputElement) -> FormControl {
    FormControl {
        name: input.name(),
        value: input.value(),
        class_name: input.class_name(),
        form_action: input.form().map(|form| form.action()),
    }
}

#[wasm_bindgen]
pub struct PanelBridge {
    bridge: FormSyncBridge,
}

#[wasm_bindgen]
impl PanelBridge {
    /// `layout` is an optional `PageLayout` object; omitted means the rich panel.
    #[wasm_bindgen(constructor)]
    pub fn new(layout: JsValue) -> Result<PanelBridge, JsValue> {
        let layout = if layout.is_undefined() || layout.is_null() {
            PageLayout::default()
        } else {
            serde_wasm_bindgen::from_value(layout)?
        };

        let bridge = FormSyncBridge::new(
            Arc::new(GlooHttpClient::new()),
            Arc::new(WebPage::new()),
            Arc::new(LocalSpawner),
            layout,
        );
        Ok(Self { bridge })
    }

    #[wasm_bindgen(js_name = initPage)]
    pub fn init_page(&self) -> Result<(), JsValue> {
        self.bridge.init_page().map_err(to_js)
    }

    #[wasm_bindgen(js_name = changeMode)]
    pub fn change_mode(&self, select: &HtmlSelectElement) -> Result<(), JsValue> {
        self.bridge
            .on_mode_changed(&select_control(select))
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = changePlayers)]
    pub fn change_players(&self, select: &HtmlSelectElement) -> Result<(), JsValue> {
        self.bridge
            .on_players_changed(&select_control(select))
            .map_err(to_js)
    }

    /// The element is updated before the request leaves: the spawned task
    /// only starts once this call has returned to the event loop.
    #[wasm_bindgen(js_name = togglePower)]
    pub fn toggle_power(&self, item: &HtmlInputElement) -> Result<(), JsValue> {
        let mut control = input_control(item);
        let result = self.bridge.on_power_toggled(&mut control);
        item.set_class_name(&control.class_name);
        item.set_value(&control.value);
        result.map(|_| ()).map_err(to_js)
    }
}

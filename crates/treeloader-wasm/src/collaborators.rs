//! Hooks the mod bundle defines on `window`.

use js_sys::{Array, Function, Reflect};
use treeloader::Collaborators;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{MouseEvent, Window};

const MOD_INFO: &str = "modInfo";
const MOD_FILES: &str = "modFiles";
const START: &str = "load";
const INPUT: &str = "updateMouse";

pub struct WindowCollaborators {
    window: Window,
}

impl WindowCollaborators {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn global(&self, name: &str) -> Option<JsValue> {
        Reflect::get(&self.window, &JsValue::from_str(name))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
    }

    fn function(&self, name: &str) -> Result<Function, String> {
        self.global(name)
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or_else(|| format!("{name} is not defined"))
    }
}

impl Collaborators for WindowCollaborators {
    fn extension_files(&self) -> Option<Vec<String>> {
        let mod_info = self.global(MOD_INFO)?;
        let files = Reflect::get(&mod_info, &JsValue::from_str(MOD_FILES)).ok()?;
        if !Array::is_array(&files) {
            return None;
        }
        Some(
            Array::from(&files)
                .iter()
                .filter_map(|file| file.as_string())
                .collect(),
        )
    }

    fn check_hooks(&self) -> Result<(), String> {
        self.function(START)?;
        self.function(INPUT)?;
        Ok(())
    }

    fn start(&self) -> Result<(), String> {
        self.function(START)?
            .call0(&self.window)
            .map(drop)
            .map_err(|error| format!("{START} threw: {error:?}"))
    }

    fn attach_input_handler(&self) -> Result<(), String> {
        let update_mouse = self.function(INPUT)?;
        let body = self
            .window
            .document()
            .and_then(|document| document.body())
            .ok_or_else(|| "document has no body".to_string())?;

        let handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let _ = update_mouse.call1(&JsValue::NULL, &event);
        });
        body.set_onmousemove(Some(handler.as_ref().unchecked_ref()));
        // The page keeps the handler for its whole lifetime.
        handler.forget();
        Ok(())
    }
}

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

pub mod app;
pub mod audio_button;
pub mod gap_fill_view;
pub mod input_display;
pub mod letter_grid;
pub mod overview;
pub mod place_value_controls;
pub mod place_value_view;
pub mod spelling_view;
pub mod success_popup;

/// A one-shot `setTimeout`; dropping it cancels the callback if still pending.
pub struct Timeout {
    id: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(ms: i32, f: impl FnMut() + 'static) -> Self {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = web_sys::window().and_then(|win| {
            win.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                ms,
            )
            .ok()
        });
        Self {
            id,
            _callback: callback,
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let (Some(id), Some(win)) = (self.id, web_sys::window()) {
            win.clear_timeout_with_handle(id);
        }
    }
}

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::dom::js_error;

/// Register `handler` for `event` on `target` for the life of the page
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> marcador::Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

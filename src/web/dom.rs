use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use crate::config::SurfaceConfig;
use crate::error::BridgeError;
use crate::page::{KeyHandler, KeyListenOptions, PageHost, PointerHandler};
use crate::surface::{Origin, Surface};

/// The browser document as a [`PageHost`].
pub struct DomHost {
    document: Document,
}

impl DomHost {
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|win| win.document())
            .ok_or("no document on this page")?;
        Ok(DomHost { document })
    }
}

#[derive(Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl Surface for CanvasSurface {
    fn id(&self) -> String {
        self.canvas.id()
    }

    fn origin(&self) -> Origin {
        let rect = self.canvas.get_bounding_client_rect();
        Origin {
            left: rect.left(),
            top: rect.top(),
        }
    }
}

/// A registered DOM listener. The closure stays alive until removal.
pub struct DomListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl PageHost for DomHost {
    type Surface = CanvasSurface;
    type Listener = DomListener;

    fn create_surface(&self, config: &SurfaceConfig) -> Result<CanvasSurface, String> {
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(js_message)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "created element is not a canvas".to_string())?;
        canvas.set_id(&config.id);
        canvas.set_width(config.width);
        canvas.set_height(config.height);

        let body = self.document.body().ok_or("document has no body")?;
        body.append_child(&canvas).map_err(js_message)?;
        Ok(CanvasSurface { canvas })
    }

    fn find_surface(&self, id: &str) -> Option<CanvasSurface> {
        let element = self.document.get_element_by_id(id)?;
        let canvas = element.dyn_into::<HtmlCanvasElement>().ok()?;
        Some(CanvasSurface { canvas })
    }

    fn listen_pointer_down(
        &self,
        surface: &CanvasSurface,
        mut handler: PointerHandler,
    ) -> Result<DomListener, BridgeError> {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                handler(event.client_x() as f64, event.client_y() as f64);
            }
        }) as Box<dyn FnMut(_)>);
        register(surface.canvas.clone().into(), "mousedown", closure)
    }

    fn listen_key_down(
        &self,
        options: KeyListenOptions,
        mut handler: KeyHandler,
    ) -> Result<DomListener, BridgeError> {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                if options.prevent_default {
                    event.prevent_default();
                }
                handler(event.key_code());
            }
        }) as Box<dyn FnMut(_)>);
        register(self.document.clone().into(), "keydown", closure)
    }

    fn remove_listener(&self, listener: DomListener) {
        let removed = listener
            .target
            .remove_event_listener_with_callback(listener.event, listener.closure.as_ref().unchecked_ref());
        if let Err(err) = removed {
            log::warn!("failed to remove {} listener: {}", listener.event, js_message(err));
        }
    }
}

fn register(
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
) -> Result<DomListener, BridgeError> {
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|err| BridgeError::Listener(format!("{event}: {}", js_message(err))))?;
    Ok(DomListener { target, event, closure })
}

pub(crate) fn js_message(value: JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

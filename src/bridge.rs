use std::cell::Cell;
use std::rc::Rc;

use crate::error::BridgeError;
use crate::event::{translate, BridgedEvent, NativeInputEvent};
use crate::page::{KeyListenOptions, PageHost};
use crate::runtime::RuntimeHost;
use crate::surface::{Origin, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridgeOptions {
    /// Stop forwarded key presses from also scrolling or otherwise
    /// affecting the hosting page. Off by default.
    pub suppress_key_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridgeStats {
    pub pointer_forwarded: u64,
    pub keys_forwarded: u64,
    pub rejected: u64,
}

/// Forwards pointer presses on a surface and key presses on the document
/// into a runtime's event queue.
///
/// Each listener translates and submits synchronously, so the runtime sees
/// events in exactly the order the page dispatched them.
pub struct EventBridge<H: PageHost> {
    host: Rc<H>,
    options: BridgeOptions,
    listeners: Option<(H::Listener, H::Listener)>,
    stats: Rc<Cell<BridgeStats>>,
}

impl<H: PageHost> EventBridge<H> {
    pub fn new(host: Rc<H>, options: BridgeOptions) -> Self {
        Self {
            host,
            options,
            listeners: None,
            stats: Rc::new(Cell::new(BridgeStats::default())),
        }
    }

    /// Registers both listeners. On error nothing stays registered.
    /// Installing an already installed bridge replaces its listeners.
    pub fn install(&mut self, surface_id: &str, runtime: Rc<dyn RuntimeHost>) -> Result<(), BridgeError> {
        let surface = self
            .host
            .find_surface(surface_id)
            .ok_or_else(|| BridgeError::SurfaceNotFound(surface_id.to_string()))?;
        self.uninstall();

        let pointer_listener = {
            let runtime = Rc::clone(&runtime);
            let stats = Rc::clone(&self.stats);
            let tracked = surface.clone();
            self.host.listen_pointer_down(
                &surface,
                Box::new(move |client_x, client_y| {
                    // re-read per event, the page may have scrolled
                    let origin = tracked.origin();
                    let event = translate(NativeInputEvent::PointerPress { client_x, client_y }, origin);
                    forward(runtime.as_ref(), &stats, event);
                }),
            )?
        };

        let key_options = KeyListenOptions {
            prevent_default: self.options.suppress_key_default,
        };
        let stats = Rc::clone(&self.stats);
        let key_listener = self.host.listen_key_down(
            key_options,
            Box::new(move |key_code| {
                let event = translate(NativeInputEvent::KeyPress { key_code }, Origin::ZERO);
                forward(runtime.as_ref(), &stats, event);
            }),
        );
        let key_listener = match key_listener {
            Ok(listener) => listener,
            Err(err) => {
                self.host.remove_listener(pointer_listener);
                return Err(err);
            }
        };

        log::info!("event bridge installed on #{}", surface.id());
        self.listeners = Some((pointer_listener, key_listener));
        Ok(())
    }

    /// Removes both listeners. Does nothing when not installed.
    pub fn uninstall(&mut self) {
        if let Some((pointer, key)) = self.listeners.take() {
            self.host.remove_listener(pointer);
            self.host.remove_listener(key);
            log::info!("event bridge uninstalled");
        }
    }

    pub fn is_installed(&self) -> bool {
        self.listeners.is_some()
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats.get()
    }
}

impl<H: PageHost> Drop for EventBridge<H> {
    fn drop(&mut self) {
        self.uninstall();
    }
}

fn forward(runtime: &dyn RuntimeHost, stats: &Cell<BridgeStats>, event: BridgedEvent) {
    let mut counts = stats.get();
    match runtime.post_event(&event) {
        Ok(()) => {
            log::trace!("forwarded {:?}", event);
            match event {
                BridgedEvent::PointerDown { .. } => counts.pointer_forwarded += 1,
                BridgedEvent::KeyDown { .. } => counts.keys_forwarded += 1,
            }
        }
        Err(err) => {
            log::error!("runtime rejected {:?}: {}", event, err);
            counts.rejected += 1;
        }
    }
    stats.set(counts);
}

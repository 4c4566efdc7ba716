//! In-memory page and runtime used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};

use crate::config::SurfaceConfig;
use crate::error::{BridgeError, RuntimeError};
use crate::event::BridgedEvent;
use crate::page::{KeyHandler, KeyListenOptions, PageHost, PointerHandler};
use crate::runtime::{RuntimeHost, RuntimeLoader};
use crate::surface::{Origin, Surface};

/// Shared record of externally visible calls, in call order.
pub type Journal = Rc<RefCell<Vec<String>>>;

#[derive(Clone)]
pub struct FakeSurface {
    id: String,
    origin: Rc<Cell<Origin>>,
}

impl FakeSurface {
    pub fn move_to(&self, left: f64, top: f64) {
        self.origin.set(Origin { left, top });
    }
}

impl Surface for FakeSurface {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn origin(&self) -> Origin {
        self.origin.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeListener(u32);

#[derive(Default)]
pub struct FakePage {
    pub journal: Journal,
    surfaces: RefCell<HashMap<String, FakeSurface>>,
    pointer: RefCell<Vec<(u32, String, PointerHandler)>>,
    keys: RefCell<Vec<(u32, KeyListenOptions, KeyHandler)>>,
    next_id: Cell<u32>,
    pub fail_key_listen: Cell<bool>,
    pub fail_create: Cell<bool>,
}

impl FakePage {
    pub fn with_journal(journal: Journal) -> Self {
        FakePage { journal, ..Default::default() }
    }

    /// Adds a surface directly, bypassing `create_surface`.
    pub fn add_surface(&self, id: &str, left: f64, top: f64) -> FakeSurface {
        let surface = FakeSurface {
            id: id.to_string(),
            origin: Rc::new(Cell::new(Origin { left, top })),
        };
        self.surfaces.borrow_mut().insert(id.to_string(), surface.clone());
        surface
    }

    pub fn click(&self, surface_id: &str, client_x: f64, client_y: f64) {
        for (_, target, handler) in self.pointer.borrow_mut().iter_mut() {
            if target.as_str() == surface_id {
                handler(client_x, client_y);
            }
        }
    }

    pub fn press_key(&self, key_code: u32) {
        for (_, _, handler) in self.keys.borrow_mut().iter_mut() {
            handler(key_code);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.pointer.borrow().len() + self.keys.borrow().len()
    }

    pub fn key_options(&self) -> Vec<KeyListenOptions> {
        self.keys.borrow().iter().map(|(_, options, _)| *options).collect()
    }

    fn next_listener(&self) -> FakeListener {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        FakeListener(id)
    }
}

impl PageHost for FakePage {
    type Surface = FakeSurface;
    type Listener = FakeListener;

    fn create_surface(&self, config: &SurfaceConfig) -> Result<FakeSurface, String> {
        self.journal.borrow_mut().push(format!("surface {}", config.id));
        if self.fail_create.get() {
            return Err("document has no body".to_string());
        }
        Ok(self.add_surface(&config.id, 0.0, 0.0))
    }

    fn find_surface(&self, id: &str) -> Option<FakeSurface> {
        self.surfaces.borrow().get(id).cloned()
    }

    fn listen_pointer_down(
        &self,
        surface: &FakeSurface,
        handler: PointerHandler,
    ) -> Result<FakeListener, BridgeError> {
        let listener = self.next_listener();
        self.pointer.borrow_mut().push((listener.0, surface.id.clone(), handler));
        self.journal.borrow_mut().push("listen pointer".to_string());
        Ok(listener)
    }

    fn listen_key_down(
        &self,
        options: KeyListenOptions,
        handler: KeyHandler,
    ) -> Result<FakeListener, BridgeError> {
        if self.fail_key_listen.get() {
            return Err(BridgeError::Listener("keydown rejected".to_string()));
        }
        let listener = self.next_listener();
        self.keys.borrow_mut().push((listener.0, options, handler));
        self.journal.borrow_mut().push("listen key".to_string());
        Ok(listener)
    }

    fn remove_listener(&self, listener: FakeListener) {
        self.pointer.borrow_mut().retain(|(id, _, _)| *id != listener.0);
        self.keys.borrow_mut().retain(|(id, _, _)| *id != listener.0);
    }
}

#[derive(Default)]
pub struct RecordingRuntime {
    pub journal: Journal,
    pub events: RefCell<Vec<BridgedEvent>>,
    pub reject_events: Cell<bool>,
    pub fail_package: Cell<bool>,
    pub fail_run: Cell<bool>,
}

impl RecordingRuntime {
    pub fn events(&self) -> Vec<BridgedEvent> {
        self.events.borrow().clone()
    }
}

impl RuntimeHost for RecordingRuntime {
    fn load_package<'a>(&'a self, package: &'a str) -> LocalBoxFuture<'a, Result<(), RuntimeError>> {
        self.journal.borrow_mut().push(format!("package {package}"));
        let result = if self.fail_package.get() {
            Err(RuntimeError::PackageInstall {
                package: package.to_string(),
                message: "404".to_string(),
            })
        } else {
            Ok(())
        };
        Box::pin(future::ready(result))
    }

    fn post_event(&self, event: &BridgedEvent) -> Result<(), RuntimeError> {
        if self.reject_events.get() {
            return Err(RuntimeError::Submit { message: "queue closed".to_string() });
        }
        self.events.borrow_mut().push(*event);
        Ok(())
    }

    fn run_async<'a>(&'a self, code: &'a str) -> LocalBoxFuture<'a, Result<(), RuntimeError>> {
        self.journal.borrow_mut().push("run".to_string());
        let result = if self.fail_run.get() {
            Err(RuntimeError::Execution { message: format!("Traceback in {} bytes", code.len()) })
        } else {
            Ok(())
        };
        Box::pin(future::ready(result))
    }
}

/// Hands out a prepared runtime, or fails if none is set.
#[derive(Default)]
pub struct FakeLoader {
    pub journal: Journal,
    pub runtime: RefCell<Option<Rc<RecordingRuntime>>>,
}

impl RuntimeLoader for FakeLoader {
    type Runtime = Rc<RecordingRuntime>;

    fn load<'a>(&'a self, index_url: &'a str) -> LocalBoxFuture<'a, Result<Self::Runtime, RuntimeError>> {
        self.journal.borrow_mut().push(format!("load {index_url}"));
        let result = self.runtime.borrow_mut().take().ok_or_else(|| RuntimeError::Load {
            message: "pyodide.asm.js failed to fetch".to_string(),
        });
        Box::pin(future::ready(result))
    }
}

impl RuntimeHost for Rc<RecordingRuntime> {
    fn load_package<'a>(&'a self, package: &'a str) -> LocalBoxFuture<'a, Result<(), RuntimeError>> {
        self.as_ref().load_package(package)
    }

    fn post_event(&self, event: &BridgedEvent) -> Result<(), RuntimeError> {
        self.as_ref().post_event(event)
    }

    fn run_async<'a>(&'a self, code: &'a str) -> LocalBoxFuture<'a, Result<(), RuntimeError>> {
        self.as_ref().run_async(code)
    }
}

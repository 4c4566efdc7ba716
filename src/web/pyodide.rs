//! Pyodide-backed runtime.
//!
//! Events are submitted through Python proxies (`pygame.event.Event` and
//! `pygame.event.post` called with real arguments), never by formatting
//! values into Python source.

use futures::future::LocalBoxFuture;
use js_sys::{Array, Function, Object, Reflect};
use once_cell::unsync::OnceCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::dom::js_message;
use crate::error::RuntimeError;
use crate::event::{BridgedEvent, FieldValue};
use crate::runtime::{RuntimeHost, RuntimeLoader};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = loadPyodide, catch)]
    fn load_pyodide(options: &JsValue) -> Result<js_sys::Promise, JsValue>;

    pub type Pyodide;

    #[wasm_bindgen(method, js_name = loadPackage, catch)]
    fn load_package(this: &Pyodide, name: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, js_name = runPythonAsync, catch)]
    fn run_python_async(this: &Pyodide, code: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn pyimport(this: &Pyodide, name: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = toPy, catch)]
    fn to_py(this: &Pyodide, value: &JsValue) -> Result<JsValue, JsValue>;
}

/// Loads Pyodide via the global `loadPyodide` from the page's script tag.
#[derive(Default)]
pub struct PyodideLoader;

impl RuntimeLoader for PyodideLoader {
    type Runtime = PyodideRuntime;

    fn load<'a>(&'a self, index_url: &'a str) -> LocalBoxFuture<'a, Result<PyodideRuntime, RuntimeError>> {
        Box::pin(async move {
            let load_err = |err: JsValue| RuntimeError::Load { message: js_message(err) };
            let options = Object::new();
            Reflect::set(&options, &"indexURL".into(), &index_url.into()).map_err(load_err)?;
            let promise = load_pyodide(&options).map_err(load_err)?;
            let pyodide = JsFuture::from(promise).await.map_err(load_err)?;
            Ok(PyodideRuntime {
                pyodide: pyodide.unchecked_into(),
                pygame: OnceCell::new(),
            })
        })
    }
}

/// Proxies into the game library, resolved once on first event.
struct PygameHandles {
    event_ctor: Function,
    post: Function,
    tuple: Function,
    dict: Function,
    pointer_down: JsValue,
    key_down: JsValue,
}

pub struct PyodideRuntime {
    pyodide: Pyodide,
    pygame: OnceCell<PygameHandles>,
}

impl PyodideRuntime {
    fn handles(&self) -> Result<&PygameHandles, JsValue> {
        self.pygame.get_or_try_init(|| {
            let pygame = self.pyodide.pyimport("pygame")?;
            let builtins = self.pyodide.pyimport("builtins")?;
            let event_mod = Reflect::get(&pygame, &"event".into())?;
            Ok(PygameHandles {
                event_ctor: Reflect::get(&event_mod, &"Event".into())?.unchecked_into(),
                post: Reflect::get(&event_mod, &"post".into())?.unchecked_into(),
                tuple: Reflect::get(&builtins, &"tuple".into())?.unchecked_into(),
                dict: Reflect::get(&builtins, &"dict".into())?.unchecked_into(),
                pointer_down: Reflect::get(&pygame, &"MOUSEBUTTONDOWN".into())?,
                key_down: Reflect::get(&pygame, &"KEYDOWN".into())?,
            })
        })
    }

    fn post(&self, event: &BridgedEvent) -> Result<(), JsValue> {
        let handles = self.handles()?;
        let tag = match event {
            BridgedEvent::PointerDown { .. } => &handles.pointer_down,
            BridgedEvent::KeyDown { .. } => &handles.key_down,
        };

        let fields = handles.dict.call0(&JsValue::NULL)?;
        let set_item: Function = Reflect::get(&fields, &"set".into())?.unchecked_into();
        let mut transient = vec![fields.clone()];
        for (name, value) in event.fields() {
            let value = match value {
                FieldValue::Int(v) => JsValue::from(v),
                FieldValue::Pair(x, y) => {
                    let list = self.pyodide.to_py(&Array::of2(&x.into(), &y.into()).into())?;
                    let pair = handles.tuple.call1(&JsValue::NULL, &list)?;
                    transient.push(list);
                    transient.push(pair.clone());
                    pair
                }
            };
            set_item.call2(&fields, &name.into(), &value)?;
        }

        let py_event = handles.event_ctor.call2(&JsValue::NULL, tag, &fields)?;
        transient.push(py_event.clone());
        let posted = handles.post.call1(&JsValue::NULL, &py_event);
        for proxy in transient {
            destroy(&proxy);
        }
        posted.map(|_| ())
    }
}

fn destroy(proxy: &JsValue) {
    if let Ok(destroy) = Reflect::get(proxy, &"destroy".into()) {
        if let Some(destroy) = destroy.dyn_ref::<Function>() {
            let _ = destroy.call0(proxy);
        }
    }
}

impl RuntimeHost for PyodideRuntime {
    fn load_package<'a>(&'a self, package: &'a str) -> LocalBoxFuture<'a, Result<(), RuntimeError>> {
        Box::pin(async move {
            let install_err = |err: JsValue| RuntimeError::PackageInstall {
                package: package.to_string(),
                message: js_message(err),
            };
            let promise = self.pyodide.load_package(package).map_err(install_err)?;
            JsFuture::from(promise).await.map_err(install_err)?;
            Ok(())
        })
    }

    fn post_event(&self, event: &BridgedEvent) -> Result<(), RuntimeError> {
        self.post(event)
            .map_err(|err| RuntimeError::Submit { message: js_message(err) })
    }

    fn run_async<'a>(&'a self, code: &'a str) -> LocalBoxFuture<'a, Result<(), RuntimeError>> {
        Box::pin(async move {
            let exec_err = |err: JsValue| RuntimeError::Execution { message: js_message(err) };
            let promise = self.pyodide.run_python_async(code).map_err(exec_err)?;
            JsFuture::from(promise).await.map_err(exec_err)?;
            Ok(())
        })
    }
}

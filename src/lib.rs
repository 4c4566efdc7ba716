pub mod bridge;
pub mod config;
pub mod error;
pub mod event;
pub mod page;
pub mod runtime;
pub mod session;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod testing;

pub use bridge::{BridgeOptions, BridgeStats, EventBridge};
pub use config::{SessionConfig, SurfaceConfig};
pub use error::{BridgeError, RuntimeError, SessionError};
pub use event::{BridgedEvent, EventKind, NativeInputEvent};
pub use session::{launch, Session};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Sets up logging once per process; later calls are ignored.
pub fn init_logging(level: log::LevelFilter) {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            let level = level.to_level().unwrap_or(log::Level::Error);
            if console_log::init_with_level(level).is_err() {
                log::debug!("logger already initialized");
            }
        } else {
            let _ = env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .try_init();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn run() -> Result<(), JsValue> {
    use std::rc::Rc;

    let mut config = SessionConfig::bundled().map_err(to_js)?;
    web::apply_query_overrides(&mut config).map_err(to_js)?;
    init_logging(config.log_level);

    let host = Rc::new(web::dom::DomHost::new()?);
    match launch(config, &web::pyodide::PyodideLoader, host).await {
        Ok(stats) => {
            log::info!("session finished: {:?}", stats);
            Ok(())
        }
        Err(err) => {
            log::error!("session failed during {}: {}", err.phase(), err);
            Err(to_js(err))
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn to_js(err: SessionError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

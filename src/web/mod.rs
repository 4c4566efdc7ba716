//! Browser bindings: the DOM page host and the Pyodide runtime.

pub mod dom;
pub mod pyodide;

use crate::config::SessionConfig;
use crate::error::SessionError;

/// Applies `?key=value` parameters from the page URL on top of `config`.
pub fn apply_query_overrides(config: &mut SessionConfig) -> Result<(), SessionError> {
    let Some(search) = web_sys::window().and_then(|win| win.location().search().ok()) else {
        return Ok(());
    };
    let params = web_sys::UrlSearchParams::new_with_str(&search)
        .map_err(|err| SessionError::Config(dom::js_message(err)))?;
    for key in ["index_url", "package", "log_level", "suppress_key_default"] {
        if let Some(value) = params.get(key) {
            config.set(key, &value)?;
        }
    }
    Ok(())
}

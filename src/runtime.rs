use futures::future::LocalBoxFuture;

use crate::error::RuntimeError;
use crate::event::BridgedEvent;

/// A loaded runtime that can accept events and execute code.
///
/// Everything runs on the page's single thread, so futures are local
/// (no `Send` bound).
pub trait RuntimeHost {
    /// Installs a named package into the runtime.
    fn load_package<'a>(&'a self, package: &'a str) -> LocalBoxFuture<'a, Result<(), RuntimeError>>;

    /// Constructs a runtime event from `event` and pushes it onto the
    /// runtime's event queue. Must complete synchronously.
    fn post_event(&self, event: &BridgedEvent) -> Result<(), RuntimeError>;

    /// Executes `code`; resolves when the code finishes.
    fn run_async<'a>(&'a self, code: &'a str) -> LocalBoxFuture<'a, Result<(), RuntimeError>>;
}

/// Acquires a runtime from the location of its distributable assets.
pub trait RuntimeLoader {
    type Runtime: RuntimeHost + 'static;

    fn load<'a>(&'a self, index_url: &'a str) -> LocalBoxFuture<'a, Result<Self::Runtime, RuntimeError>>;
}

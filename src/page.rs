use crate::config::SurfaceConfig;
use crate::error::BridgeError;
use crate::surface::Surface;

/// Receives `(client_x, client_y)` of a pointer press.
pub type PointerHandler = Box<dyn FnMut(f64, f64)>;
/// Receives the key code of a key press.
pub type KeyHandler = Box<dyn FnMut(u32)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyListenOptions {
    /// Call `preventDefault` on forwarded key events.
    pub prevent_default: bool,
}

/// The hosting page: owns surfaces and dispatches input to listeners.
///
/// Handlers are invoked synchronously on the page's dispatch thread, in
/// the order the page delivers events.
pub trait PageHost {
    type Surface: Surface;
    type Listener;

    /// Creates a surface and attaches it to the visible document.
    fn create_surface(&self, config: &SurfaceConfig) -> Result<Self::Surface, String>;

    fn find_surface(&self, id: &str) -> Option<Self::Surface>;

    /// Listens for pointer presses scoped to `surface`.
    fn listen_pointer_down(
        &self,
        surface: &Self::Surface,
        handler: PointerHandler,
    ) -> Result<Self::Listener, BridgeError>;

    /// Listens for key presses on the whole document.
    fn listen_key_down(
        &self,
        options: KeyListenOptions,
        handler: KeyHandler,
    ) -> Result<Self::Listener, BridgeError>;

    fn remove_listener(&self, listener: Self::Listener);
}

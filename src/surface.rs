/// Top-left corner of a surface in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Origin {
    pub left: f64,
    pub top: f64,
}

impl Origin {
    pub const ZERO: Origin = Origin { left: 0.0, top: 0.0 };
}

/// A live drawing surface on the page.
///
/// `origin` is read on every pointer press: the page may scroll or
/// re-layout between events, so implementations must not cache it.
pub trait Surface: Clone + 'static {
    fn id(&self) -> String;
    fn origin(&self) -> Origin;
}

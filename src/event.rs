use crate::surface::Origin;

/// An input event as delivered by the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeInputEvent {
    /// Pointer press in viewport coordinates.
    PointerPress { client_x: f64, client_y: f64 },
    /// Key press carrying the host's numeric key code.
    KeyPress { key_code: u32 },
}

/// Event kinds understood by the runtime's event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    KeyDown,
}

impl EventKind {
    /// Name of the runtime constant that tags this kind.
    pub fn runtime_tag(self) -> &'static str {
        match self {
            EventKind::PointerDown => "MOUSEBUTTONDOWN",
            EventKind::KeyDown => "KEYDOWN",
        }
    }
}

/// Value of a single field of a bridged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Int(i32),
    Pair(i32, i32),
}

/// The runtime-side representation of a native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgedEvent {
    PointerDown { pos: (i32, i32) },
    KeyDown { key: i32 },
}

impl BridgedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BridgedEvent::PointerDown { .. } => EventKind::PointerDown,
            BridgedEvent::KeyDown { .. } => EventKind::KeyDown,
        }
    }

    /// Named fields as the runtime expects them in the event dictionary.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        match *self {
            BridgedEvent::PointerDown { pos: (x, y) } => vec![("pos", FieldValue::Pair(x, y))],
            BridgedEvent::KeyDown { key } => vec![("key", FieldValue::Int(key))],
        }
    }
}

/// Translates a native event. `origin` is the surface origin at the time
/// the event fired; it is ignored for key presses.
pub fn translate(event: NativeInputEvent, origin: Origin) -> BridgedEvent {
    match event {
        NativeInputEvent::PointerPress { client_x, client_y } => {
            // `as` truncates toward zero and saturates out-of-range values
            let x = (client_x - origin.left) as i32;
            let y = (client_y - origin.top) as i32;
            BridgedEvent::PointerDown { pos: (x, y) }
        }
        // codes pass through verbatim, no key table
        NativeInputEvent::KeyPress { key_code } => BridgedEvent::KeyDown { key: key_code as i32 },
    }
}

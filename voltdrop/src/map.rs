//! Map Host Boundary
//!
//! The interactive map widget itself lives outside this crate; this
//! module defines the narrow surface the path editor needs from it:
//! gesture events, a viewport, and the inline/fullscreen presentation
//! switch.
//!
//! Gesture wiring is scoped: a [`GestureBinding`] subscribes on
//! creation and unsubscribes when dropped, so a disabled or unmounted
//! editor can never receive a late gesture through a forgotten
//! callback.

use tokio::sync::broadcast;

use crate::geo::GeoPoint;

/// Default map center (Toronto) and zoom used before any search.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: 43.6532,
    lng: -79.3832,
};
pub const DEFAULT_ZOOM: u8 = 18;

/// Gestures and polyline notifications the map host forwards to the
/// editor.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Pointer click on the map surface at a geo-point.
    Click(GeoPoint),
    /// Right-click anywhere on the surface.
    RightClick,
    /// Escape pressed while the surface is focused.
    EscapeKey,
    /// An existing polyline vertex was dragged to a new position.
    VertexMoved { index: usize, point: GeoPoint },
    /// A polyline vertex was deleted.
    VertexRemoved { index: usize },
}

/// Where the map is currently looking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Publisher side of the gesture channel; owned by the map host glue.
#[derive(Debug, Clone)]
pub struct GestureBus {
    tx: broadcast::Sender<MapEvent>,
}

impl Default for GestureBus {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Forward a gesture to whoever is bound. Gestures emitted while no
    /// binding exists are dropped, matching an inert editor.
    pub fn emit(&self, event: MapEvent) {
        let _ = self.tx.send(event);
    }

    /// Acquire a scoped subscription. Dropping the binding is the
    /// teardown; there is no separate deregistration call to forget.
    pub fn bind(&self) -> GestureBinding {
        GestureBinding {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiver side of the gesture channel, held by an active editor.
#[derive(Debug)]
pub struct GestureBinding {
    rx: broadcast::Receiver<MapEvent>,
}

impl GestureBinding {
    /// Drain all gestures received since the last call, in order.
    pub fn drain(&mut self) -> Vec<MapEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// How the map surface is hosted on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    Inline,
    Fullscreen,
}

/// Tracks the presentation of the live map component.
///
/// Toggling re-hosts the same component; the viewport survives. Exiting
/// fullscreen captures the zoom level the user ended up at, so the
/// inline view resumes there instead of resetting.
#[derive(Debug, Clone)]
pub struct PresentationHost {
    presentation: Presentation,
    viewport: MapViewport,
}

impl Default for PresentationHost {
    fn default() -> Self {
        Self {
            presentation: Presentation::Inline,
            viewport: MapViewport::default(),
        }
    }
}

impl PresentationHost {
    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn viewport(&self) -> MapViewport {
        self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut MapViewport {
        &mut self.viewport
    }

    pub fn enter_fullscreen(&mut self) {
        self.presentation = Presentation::Fullscreen;
    }

    /// Leave fullscreen, keeping the zoom the user reached while there.
    pub fn exit_fullscreen(&mut self, zoom_at_exit: u8) {
        self.viewport.zoom = zoom_at_exit;
        self.presentation = Presentation::Inline;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gestures_arrive_in_order() {
        let bus = GestureBus::new();
        let mut binding = bus.bind();
        bus.emit(MapEvent::Click(GeoPoint::new(1.0, 2.0)));
        bus.emit(MapEvent::RightClick);

        let events = binding.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], MapEvent::RightClick);
    }

    #[test]
    fn test_gestures_before_binding_are_dropped() {
        let bus = GestureBus::new();
        bus.emit(MapEvent::RightClick);
        let mut binding = bus.bind();
        assert!(binding.drain().is_empty());
    }

    #[test]
    fn test_dropped_binding_receives_nothing_later() {
        let bus = GestureBus::new();
        let binding = bus.bind();
        drop(binding);
        // Emitting into a bus with no bindings must not panic.
        bus.emit(MapEvent::EscapeKey);
        let mut rebound = bus.bind();
        assert!(rebound.drain().is_empty());
    }

    #[test]
    fn test_fullscreen_round_trip_preserves_viewport() {
        let mut host = PresentationHost::default();
        host.viewport_mut().center = GeoPoint::new(45.0, -75.0);
        host.enter_fullscreen();
        assert_eq!(host.presentation(), Presentation::Fullscreen);

        // The user zoomed out while fullscreen.
        host.exit_fullscreen(12);
        assert_eq!(host.presentation(), Presentation::Inline);
        assert_eq!(host.viewport().zoom, 12);
        assert_eq!(host.viewport().center, GeoPoint::new(45.0, -75.0));
    }
}

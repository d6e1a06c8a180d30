use std::fmt;

use model::{
    venue::{Venue, DEFAULT_PITCH, DEFAULT_ZOOM},
    BoundingBox, Coordinate,
};

/// Fixed identifier of the single route overlay. Rendering always removes
/// this layer before adding it again, which keeps `render_route` idempotent.
pub const ROUTE_LAYER_ID: &str = "route-line";

#[derive(Debug)]
pub enum SurfaceError {
    /// The underlying map view could not be constructed, e.g. because of a
    /// missing or invalid service credential.
    CreateFailed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SurfaceError::CreateFailed(why) => {
                write!(f, "map surface could not be created: {why}")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Camera and interaction settings of the map view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub center: Coordinate,
    pub zoom: f64,
    pub pitch: f64,
    /// Disabled so the widget does not hijack page scrolling.
    pub scroll_zoom: bool,
    pub drag_rotate: bool,
}

impl ViewOptions {
    pub fn for_venue(venue: &Venue) -> Self {
        Self {
            center: venue.coordinate,
            zoom: DEFAULT_ZOOM,
            pitch: DEFAULT_PITCH,
            scroll_zoom: false,
            drag_rotate: false,
        }
    }
}

/// Something a marker popup can trigger in the widget. Popups carry their
/// action explicitly instead of the host injecting buttons into popup DOM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupAction {
    TraceRoute { origin: Coordinate },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub body: String,
    pub action: Option<PopupAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub coordinate: Coordinate,
    /// css color of the marker pin
    pub color: String,
    pub popup: Option<Popup>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub padding: u32,
    pub duration_ms: u64,
}

/// Capability set of a map rendering surface. Any library that can create
/// a view, manage markers and one line layer, fit bounds, and destroy the
/// view is substitutable here.
pub trait MapSurface {
    fn add_marker(&mut self, marker: MarkerSpec);

    fn remove_markers(&mut self);

    /// Adds a line layer plus its source under the given id.
    fn add_route_layer(&mut self, layer_id: &str, geometry: &[Coordinate]);

    /// Removes the layer and source if present. Returns whether a layer
    /// was actually removed.
    fn remove_route_layer(&mut self, layer_id: &str) -> bool;

    fn fit_bounds(&mut self, bounds: &BoundingBox, options: FitOptions);

    /// Releases the view and all attached controls. Called at most once.
    fn destroy(&mut self);
}

/// Creates the surface on mount. Separate from [`MapSurface`] so tests and
/// headless hosts can supply their own implementation.
pub trait SurfaceProvider {
    type Surface: MapSurface;

    fn create(&self, options: &ViewOptions) -> Result<Self::Surface, SurfaceError>;
}

//! Shared application-wide constants.
//! Centralizes tweakable values used across UI rendering and interactions.

// Node dimensions
/// Default node width in world units.
pub const NODE_WIDTH: f32 = 140.0;
/// Default node height in world units.
pub const NODE_HEIGHT: f32 = 56.0;
/// Corner radius of node boxes (in world units, scaled by zoom).
pub const NODE_CORNER_RADIUS: f32 = 8.0;
/// Radius of the input/output connection handles (in world units).
pub const HANDLE_RADIUS: f32 = 5.0;
/// Hit radius around a handle for starting or finishing a connection (in world units).
pub const HANDLE_HIT_RADIUS: f32 = 12.0;

// Grid/drawing
/// Grid cell size in world units.
pub const GRID_SIZE: f32 = 20.0;

// Canvas interactions
/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.25;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f32 = 4.0;
/// Zoom change per scroll notch.
pub const SCROLL_ZOOM_STEP: f32 = 0.025;
/// Zoom multiplier used by the zoom in/out buttons.
pub const BUTTON_ZOOM_FACTOR: f32 = 1.2;
/// Margin kept around the content when fitting the view (in screen pixels).
pub const FIT_VIEW_MARGIN: f32 = 60.0;

// Minimap
/// Minimap width in screen pixels.
pub const MINIMAP_WIDTH: f32 = 200.0;
/// Minimap height in screen pixels.
pub const MINIMAP_HEIGHT: f32 = 140.0;
/// Distance between the minimap and the canvas edges (in screen pixels).
pub const MINIMAP_PADDING: f32 = 10.0;

// Files
/// Suggested file name for exported blueprints.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "my-industrial-blueprint.json";
/// Message shown when an imported file cannot be used.
pub const LOAD_FAILED_MESSAGE: &str = "load failed: bad file format";

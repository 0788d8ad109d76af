//! Application state management structures.
//!
//! This module contains the state structures that track the editor's view
//! settings, in-flight pointer gestures and file operations, plus the main
//! [`BlueprintApp`].

use crate::interaction::InteractionState;
use crate::types::*;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// State related to canvas navigation and display.
///
/// Tracks the current pan offset, zoom level, and display options for the canvas.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasState {
    /// Current canvas pan offset for navigation (in screen space)
    #[serde(skip)]
    pub offset: egui::Vec2,
    /// Current zoom level (1.0 = normal, 2.0 = 2x zoom, 0.5 = 50% zoom)
    #[serde(skip)]
    pub zoom_factor: f32,
    /// Whether the view has been fitted to the content yet
    #[serde(skip)]
    pub initialized: bool,
    /// Whether the grid should be displayed on the canvas
    pub show_grid: bool,
    /// Whether the minimap should be displayed in the canvas corner
    pub show_minimap: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
            zoom_factor: 1.0,
            initialized: false,
            show_grid: true,
            show_minimap: true,
        }
    }
}

/// Pointer gestures that span several frames.
///
/// Selection and label editing live in [`InteractionState`]; this struct only
/// holds the bookkeeping for drags and pans in progress.
#[derive(Default)]
pub struct GestureState {
    /// Node currently being dragged by the user
    pub dragging_node: Option<NodeId>,
    /// Offset from mouse to node center during dragging
    pub node_drag_offset: egui::Vec2,
    /// Node whose output handle a connection is being drawn from
    pub drawing_connection_from: Option<NodeId>,
    /// Current mouse position while drawing a connection
    pub connection_draw_pos: Option<egui::Pos2>,
    /// Whether the user is currently panning the canvas
    pub is_panning: bool,
    /// Last mouse position during panning operation
    pub last_pan_pos: Option<egui::Pos2>,
    /// Whether focus was already requested for the current label edit
    pub focus_requested_for_edit: bool,
}

/// State related to file operations.
///
/// Manages the pending export/import request and the channel that async file
/// tasks report back on.
pub struct FileState {
    /// File operation requested by the UI but not started yet
    pub pending_operation: Option<PendingFileOperation>,
    /// Channel for receiving file operation results from async contexts
    pub file_operation_sender: Option<Sender<FileOperationResult>>,
    pub file_operation_receiver: Option<Receiver<FileOperationResult>>,
    /// Name of the last file saved or loaded, for the toolbar
    pub last_file_name: Option<String>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            pending_operation: None,
            file_operation_sender: Some(sender),
            file_operation_receiver: Some(receiver),
            last_file_name: None,
        }
    }
}

/// A file operation waiting to be started on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingFileOperation {
    /// Write the blueprint to a JSON file
    Export,
    /// Pick a JSON file and replace the blueprint with it
    Import,
}

/// Messages sent from async file operations back to the main app.
#[derive(Debug)]
pub enum FileOperationResult {
    /// Export finished; carries the file name or path written
    SaveCompleted(String),
    /// Export failed with an error message
    SaveFailed(String),
    /// A file was read; carries its name and text
    LoadCompleted(String, String),
    /// Reading the chosen file failed with an error message
    LoadFailed(String),
}

/// The main application structure containing UI state and the blueprint.
///
/// This struct implements the `eframe::App` trait. Only view preferences are
/// persisted between sessions; the blueprint itself is saved to and loaded
/// from JSON files explicitly.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintApp {
    /// The production chain being edited
    #[serde(skip, default = "crate::samples::crude_oil_chain")]
    pub blueprint: Blueprint,
    /// Selection, context menu and label editing
    #[serde(skip)]
    pub interaction: InteractionState,
    /// Drags and pans in progress
    #[serde(skip)]
    pub gestures: GestureState,
    /// Canvas navigation and display state
    pub canvas: CanvasState,
    /// File operations state
    #[serde(skip)]
    pub file: FileState,
    /// Blocking message shown to the user, if any
    #[serde(skip)]
    pub notification: Option<String>,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Remembered width of the details panel across sessions
    pub details_panel_width: f32,
}

impl Default for BlueprintApp {
    fn default() -> Self {
        Self {
            blueprint: crate::samples::crude_oil_chain(),
            interaction: InteractionState::default(),
            gestures: GestureState::default(),
            canvas: CanvasState::default(),
            file: FileState::default(),
            notification: None,
            dark_mode: true,
            details_panel_width: 400.0,
        }
    }
}

impl BlueprintApp {
    /// Key under which the view preferences are stored by eframe.
    pub const STORAGE_KEY: &'static str = "app_state";

    /// Creates the app, restoring view preferences from eframe storage when
    /// available.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let Some(json) = cc
            .storage
            .and_then(|storage| storage.get_string(Self::STORAGE_KEY))
        else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(app) => app,
            Err(err) => {
                log::warn!("ignoring unreadable stored preferences: {err}");
                Self::default()
            }
        }
    }

    /// Serializes the persisted part of the application state to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Restores application state from JSON written by [`Self::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

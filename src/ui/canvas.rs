//! Canvas interaction and navigation functionality.
//!
//! This module handles canvas panning, zooming, fitting the view, node
//! dragging, drag-connecting handles, and coordinate transformations between
//! screen and world space.

use super::state::BlueprintApp;
use crate::constants::*;
use crate::types::*;
use eframe::egui;

/// Which side of a node a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// Left side; edges end here
    Input,
    /// Right side; edges start here
    Output,
}

/// Center of a node's handle, in world space.
pub fn handle_world_pos(node: &BlueprintNode, kind: HandleKind) -> egui::Pos2 {
    let half_width = NODE_WIDTH / 2.0;
    match kind {
        HandleKind::Input => egui::pos2(node.position.x - half_width, node.position.y),
        HandleKind::Output => egui::pos2(node.position.x + half_width, node.position.y),
    }
}

/// World-space rectangle covered by a node's box.
pub fn node_world_rect(node: &BlueprintNode) -> egui::Rect {
    egui::Rect::from_center_size(
        egui::pos2(node.position.x, node.position.y),
        egui::vec2(NODE_WIDTH, NODE_HEIGHT),
    )
}

/// Bounding box of every node, or `None` for an empty blueprint.
pub fn content_world_rect(blueprint: &Blueprint) -> Option<egui::Rect> {
    blueprint
        .nodes
        .iter()
        .map(node_world_rect)
        .reduce(|acc, rect| acc.union(rect))
}

impl BlueprintApp {
    /// Converts screen coordinates to world coordinates accounting for zoom and pan.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        (screen_pos - self.canvas.offset) / self.canvas.zoom_factor
    }

    /// Converts world coordinates to screen coordinates accounting for zoom and pan.
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        world_pos * self.canvas.zoom_factor + self.canvas.offset
    }

    /// Handles middle-click or Cmd/Ctrl+left-click canvas panning functionality.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_panning(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        // modifiers.command is Cmd on macOS and Ctrl elsewhere
        let should_pan = ui.input(|i| {
            i.pointer.middle_down() || (i.pointer.primary_down() && i.modifiers.command)
        });

        if should_pan {
            if let Some(current_pos) = response.interact_pointer_pos() {
                if !self.gestures.is_panning {
                    self.gestures.is_panning = true;
                    self.gestures.last_pan_pos = Some(current_pos);
                } else if let Some(last_pos) = self.gestures.last_pan_pos {
                    self.canvas.offset += current_pos - last_pos;
                    self.gestures.last_pan_pos = Some(current_pos);
                }
            }
        } else {
            self.gestures.is_panning = false;
            self.gestures.last_pan_pos = None;
        }
    }

    /// Handles scroll wheel zooming, keeping the world point under the cursor fixed.
    pub fn handle_canvas_zoom(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }

        let mouse_pos = ui
            .input(|i| i.pointer.hover_pos())
            .or_else(|| response.interact_pointer_pos());

        if let Some(mouse_pos) = mouse_pos {
            // Only zoom if the cursor is over the canvas
            if !response.rect.contains(mouse_pos) {
                return;
            }
            let step = if scroll_delta > 0.0 {
                SCROLL_ZOOM_STEP
            } else {
                -SCROLL_ZOOM_STEP
            };
            self.set_zoom_around(self.canvas.zoom_factor + step, mouse_pos);
        }
    }

    /// Multiplies the zoom level by `factor`, anchored at `anchor` (screen space).
    pub fn zoom_by(&mut self, factor: f32, anchor: egui::Pos2) {
        self.set_zoom_around(self.canvas.zoom_factor * factor, anchor);
    }

    fn set_zoom_around(&mut self, zoom: f32, anchor: egui::Pos2) {
        let world_anchor = self.screen_to_world(anchor);
        let old_zoom = self.canvas.zoom_factor;
        self.canvas.zoom_factor = zoom.clamp(MIN_ZOOM, MAX_ZOOM);

        if (self.canvas.zoom_factor - old_zoom).abs() > f32::EPSILON {
            // Keep the anchored world point at the same screen position
            let moved_to = self.world_to_screen(world_anchor);
            self.canvas.offset += anchor - moved_to;
        }
    }

    /// Zooms and pans so that every node is visible inside `canvas_rect`.
    ///
    /// An empty blueprint centers the world origin at zoom 1.0. The view never
    /// zooms in beyond 100% when fitting.
    pub fn fit_view(&mut self, canvas_rect: egui::Rect) {
        let Some(content) = content_world_rect(&self.blueprint) else {
            self.canvas.zoom_factor = 1.0;
            self.canvas.offset = canvas_rect.center().to_vec2();
            return;
        };

        let available = (canvas_rect.size() - egui::Vec2::splat(2.0 * FIT_VIEW_MARGIN))
            .max(egui::Vec2::splat(1.0));
        let zoom = (available.x / content.width())
            .min(available.y / content.height())
            .clamp(MIN_ZOOM, 1.0);

        self.canvas.zoom_factor = zoom;
        self.canvas.offset = canvas_rect.center().to_vec2() - content.center().to_vec2() * zoom;
    }

    /// Pans the view so that `world_pos` appears at the center of `canvas_rect`.
    pub fn center_view_on(&mut self, world_pos: egui::Pos2, canvas_rect: egui::Rect) {
        self.canvas.offset =
            canvas_rect.center().to_vec2() - world_pos.to_vec2() * self.canvas.zoom_factor;
    }

    /// Handles node dragging and drag-connecting with the left mouse button.
    ///
    /// A press on an output handle starts drawing a connection; a press on a
    /// node body selects the node and starts dragging it.
    pub fn handle_node_dragging(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        if self.gestures.is_panning {
            return;
        }

        if ui.input(|i| i.pointer.primary_down()) {
            let Some(current_pos) = response.interact_pointer_pos() else {
                return;
            };
            let world_pos = self.screen_to_world(current_pos);

            if let Some(dragging_id) = self.gestures.dragging_node.clone() {
                let new_pos = world_pos + self.gestures.node_drag_offset;
                self.blueprint
                    .update_node_position(&dragging_id, Position::new(new_pos.x, new_pos.y));
            } else if self.gestures.drawing_connection_from.is_some() {
                self.gestures.connection_draw_pos = Some(current_pos);
            } else if ui.input(|i| i.pointer.primary_pressed()) {
                if let Some(node_id) = self.find_handle_at_position(world_pos, HandleKind::Output)
                {
                    self.gestures.drawing_connection_from = Some(node_id);
                    self.gestures.connection_draw_pos = Some(current_pos);
                } else if let Some(node_id) = self.find_node_at_position(world_pos) {
                    self.start_node_drag(node_id, world_pos);
                }
            }
        } else {
            if self.gestures.drawing_connection_from.is_some() {
                if let Some(current_pos) = response
                    .interact_pointer_pos()
                    .or(self.gestures.connection_draw_pos)
                {
                    let world_pos = self.screen_to_world(current_pos);
                    self.finalize_connection(world_pos);
                }
            }

            self.gestures.dragging_node = None;
            self.gestures.drawing_connection_from = None;
            self.gestures.connection_draw_pos = None;
        }
    }

    /// Selects the node and records the offset from the pointer to its center.
    fn start_node_drag(&mut self, node_id: NodeId, world_pos: egui::Pos2) {
        if let Some(commit) = self.interaction.click_node(node_id.clone()) {
            commit.apply(&mut self.blueprint);
        }

        if let Some(node) = self.blueprint.node(&node_id) {
            let node_center = egui::pos2(node.position.x, node.position.y);
            self.gestures.node_drag_offset = node_center - world_pos;
            self.gestures.dragging_node = Some(node_id);
        }
    }

    /// Appends an edge if the pointer was released over an input handle.
    ///
    /// Any input handle is a valid target, including the source node's own.
    fn finalize_connection(&mut self, world_pos: egui::Pos2) {
        let Some(from_id) = self.gestures.drawing_connection_from.clone() else {
            return;
        };
        if let Some(to_id) = self.find_handle_at_position(world_pos, HandleKind::Input) {
            self.blueprint.add_edge(from_id, to_id);
        }
    }

    /// Finds the topmost node whose box contains `pos` (world space).
    pub fn find_node_at_position(&self, pos: egui::Pos2) -> Option<NodeId> {
        // Later nodes are drawn on top, so search from the back
        self.blueprint
            .nodes
            .iter()
            .rev()
            .find(|node| node_world_rect(node).contains(pos))
            .map(|node| node.id.clone())
    }

    /// Finds the topmost node with a handle of the given kind near `pos` (world space).
    pub fn find_handle_at_position(&self, pos: egui::Pos2, kind: HandleKind) -> Option<NodeId> {
        self.blueprint
            .nodes
            .iter()
            .rev()
            .find(|node| handle_world_pos(node, kind).distance(pos) <= HANDLE_HIT_RADIUS)
            .map(|node| node.id.clone())
    }
}

//! Canvas rendering functionality for nodes, edges, grid and minimap.
//!
//! This module handles all drawing operations: the grid background, supply
//! edges with arrows, the connection preview while drag-connecting, node
//! boxes with their handles, and the minimap overlay.

use super::canvas::{content_world_rect, handle_world_pos, node_world_rect, HandleKind};
use super::state::BlueprintApp;
use crate::constants::*;
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

/// Fill color of item nodes.
pub const ITEM_COLOR: egui::Color32 = egui::Color32::from_rgb(0x66, 0xcc, 0x66);
/// Fill color of machine nodes.
pub const MACHINE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x33, 0x66, 0xcc);
const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 221, 0);
const PREVIEW_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 150, 255);

/// Fill color for a node category.
pub fn category_color(category: Category) -> egui::Color32 {
    match category {
        Category::Item => ITEM_COLOR,
        Category::Machine => MACHINE_COLOR,
    }
}

impl BlueprintApp {
    /// Renders all blueprint elements (grid, edges, and nodes) on the canvas.
    ///
    /// Elements are drawn in layers: grid first, then edges, then nodes.
    pub fn render_blueprint_elements(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        if self.canvas.show_grid {
            self.draw_grid(painter, canvas_rect);
        }

        for edge in &self.blueprint.edges {
            self.draw_edge(painter, edge);
        }

        if let (Some(from_id), Some(draw_pos)) = (
            &self.gestures.drawing_connection_from,
            self.gestures.connection_draw_pos,
        ) {
            self.draw_connection_preview(painter, from_id, draw_pos);
        }

        for node in &self.blueprint.nodes {
            self.draw_node(painter, node);
        }
    }

    /// Draws a zoom-aware grid on the canvas for visual reference.
    ///
    /// Skipped entirely when the grid spacing would be under two pixels.
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let grid_size = GRID_SIZE;
        let screen_grid_size = grid_size * self.canvas.zoom_factor;
        if screen_grid_size < 2.0 {
            return;
        }

        let grid_color = if self.dark_mode {
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 32)
        } else {
            egui::Color32::from_rgba_unmultiplied(96, 96, 96, 40)
        };
        let stroke = egui::Stroke::new(1.0, grid_color);

        let top_left_world = self.screen_to_world(canvas_rect.min);
        let bottom_right_world = self.screen_to_world(canvas_rect.max);

        let mut x = (top_left_world.x / grid_size).floor() * grid_size;
        while x <= bottom_right_world.x {
            let screen_x = self.world_to_screen(egui::pos2(x, 0.0)).x;
            painter.line_segment(
                [
                    egui::pos2(screen_x, canvas_rect.min.y),
                    egui::pos2(screen_x, canvas_rect.max.y),
                ],
                stroke,
            );
            x += grid_size;
        }

        let mut y = (top_left_world.y / grid_size).floor() * grid_size;
        while y <= bottom_right_world.y {
            let screen_y = self.world_to_screen(egui::pos2(0.0, y)).y;
            painter.line_segment(
                [
                    egui::pos2(canvas_rect.min.x, screen_y),
                    egui::pos2(canvas_rect.max.x, screen_y),
                ],
                stroke,
            );
            y += grid_size;
        }
    }

    /// Renders a supply edge from the source's output handle to the target's
    /// input handle, with an arrow at its midpoint.
    ///
    /// Edges with a dangling endpoint have nowhere to go and are not drawn.
    pub fn draw_edge(&self, painter: &egui::Painter, edge: &BlueprintEdge) {
        let (Some(source), Some(target)) = (
            self.blueprint.node(&edge.source),
            self.blueprint.node(&edge.target),
        ) else {
            return;
        };

        let start = self.world_to_screen(handle_world_pos(source, HandleKind::Output));
        let end = self.world_to_screen(handle_world_pos(target, HandleKind::Input));

        let involves_selection = self
            .interaction
            .selected
            .as_ref()
            .is_some_and(|id| *id == edge.source || *id == edge.target);
        let (color, width) = if involves_selection {
            (HIGHLIGHT_COLOR, 2.5)
        } else if self.dark_mode {
            (egui::Color32::LIGHT_GRAY, 2.0)
        } else {
            (egui::Color32::DARK_GRAY, 2.0)
        };
        let stroke = egui::Stroke::new(width, color);

        if edge.source == edge.target {
            self.draw_self_loop(painter, start, end, stroke);
            return;
        }

        painter.line_segment([start, end], stroke);
        self.draw_arrow_at_center(painter, start, end, color);
    }

    /// Draws a self-loop as a rectangular detour above the node.
    fn draw_self_loop(
        &self,
        painter: &egui::Painter,
        start: egui::Pos2,
        end: egui::Pos2,
        stroke: egui::Stroke,
    ) {
        let zoom = self.canvas.zoom_factor;
        let rise = NODE_HEIGHT * zoom;
        let reach = 20.0 * zoom;
        let points = vec![
            start,
            start + egui::vec2(reach, 0.0),
            start + egui::vec2(reach, -rise),
            end + egui::vec2(-reach, -rise),
            end + egui::vec2(-reach, 0.0),
            end,
        ];
        let top_mid = egui::pos2((start.x + end.x) / 2.0, start.y - rise);
        painter.add(egui::Shape::line(points, stroke));
        self.draw_arrow_at_center(
            painter,
            top_mid + egui::vec2(4.0 * zoom, 0.0),
            top_mid - egui::vec2(4.0 * zoom, 0.0),
            stroke.color,
        );
    }

    /// Draws a directional arrow at the center of a line, pointing from `start` to `end`.
    fn draw_arrow_at_center(
        &self,
        painter: &egui::Painter,
        start: egui::Pos2,
        end: egui::Pos2,
        color: egui::Color32,
    ) {
        let center = start + (end - start) * 0.5;
        let direction = (end - start).normalized();

        let arrow_size = 8.0 * self.canvas.zoom_factor;
        let arrow_width = 6.0 * self.canvas.zoom_factor;
        let perpendicular = egui::vec2(-direction.y, direction.x);

        let arrow_tip = center + direction * arrow_size;
        let arrow_left = center - direction * arrow_size + perpendicular * arrow_width;
        let arrow_right = center - direction * arrow_size - perpendicular * arrow_width;

        painter.add(egui::Shape::convex_polygon(
            vec![arrow_tip, arrow_left, arrow_right],
            color,
            egui::Stroke::NONE,
        ));
    }

    /// Renders the connection being dragged out of an output handle.
    ///
    /// The end dot is filled when the pointer is over an input handle.
    pub fn draw_connection_preview(
        &self,
        painter: &egui::Painter,
        from_node_id: &NodeId,
        to_screen_pos: egui::Pos2,
    ) {
        let Some(from_node) = self.blueprint.node(from_node_id) else {
            return;
        };
        let from_screen = self.world_to_screen(handle_world_pos(from_node, HandleKind::Output));
        let over_target = self
            .find_handle_at_position(self.screen_to_world(to_screen_pos), HandleKind::Input)
            .is_some();

        painter.line_segment(
            [from_screen, to_screen_pos],
            egui::Stroke::new(2.0, PREVIEW_COLOR),
        );
        if over_target {
            painter.circle_filled(to_screen_pos, 5.0, PREVIEW_COLOR);
        } else {
            painter.circle_stroke(to_screen_pos, 5.0, egui::Stroke::new(1.5, PREVIEW_COLOR));
        }
    }

    /// Renders a single node: a rounded box colored by category with a white
    /// border, its label, and its input/output handles.
    ///
    /// Selected nodes get a yellow border. The label is left out while it is
    /// being edited, since the text field sits on top of the node.
    pub fn draw_node(&self, painter: &egui::Painter, node: &BlueprintNode) {
        let zoom = self.canvas.zoom_factor;
        let rect = self.node_screen_rect(node);
        let corner_radius = NODE_CORNER_RADIUS * zoom;

        let mut color = category_color(node.category());
        if self.gestures.dragging_node.as_ref() == Some(&node.id) {
            color = color.gamma_multiply(0.85);
        }

        // Drop shadow
        painter.rect_filled(
            rect.translate(egui::vec2(0.0, 4.0 * zoom)),
            corner_radius,
            egui::Color32::from_black_alpha(90),
        );
        painter.rect_filled(rect, corner_radius, color);

        let (stroke_color, stroke_width) = if self.interaction.selected.as_ref() == Some(&node.id) {
            (HIGHLIGHT_COLOR, 3.0)
        } else {
            (egui::Color32::WHITE, 2.0)
        };
        painter.rect_stroke(
            rect,
            corner_radius,
            egui::Stroke::new(stroke_width, stroke_color),
            StrokeKind::Outside,
        );

        let editing_this = self
            .interaction
            .editing
            .as_ref()
            .is_some_and(|e| e.node == node.id);
        if !editing_this {
            let font_size = (14.0 * zoom).clamp(6.0, 48.0);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                node.label(),
                egui::FontId::proportional(font_size),
                egui::Color32::WHITE,
            );
        }

        for kind in [HandleKind::Input, HandleKind::Output] {
            let center = self.world_to_screen(handle_world_pos(node, kind));
            painter.circle_filled(center, HANDLE_RADIUS * zoom, egui::Color32::WHITE);
            painter.circle_stroke(
                center,
                HANDLE_RADIUS * zoom,
                egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
            );
        }
    }

    /// Screen-space rectangle of a node's box.
    pub fn node_screen_rect(&self, node: &BlueprintNode) -> egui::Rect {
        let world = node_world_rect(node);
        egui::Rect::from_min_max(self.world_to_screen(world.min), self.world_to_screen(world.max))
    }

    /// World-space area the minimap covers: all nodes plus the visible part of
    /// the canvas.
    pub fn minimap_world_bounds(&self, canvas_rect: egui::Rect) -> egui::Rect {
        let visible = egui::Rect::from_min_max(
            self.screen_to_world(canvas_rect.min),
            self.screen_to_world(canvas_rect.max),
        );
        match content_world_rect(&self.blueprint) {
            Some(content) => content.union(visible),
            None => visible,
        }
    }

    /// Draws the minimap overlay in the lower-right corner of the canvas.
    ///
    /// Clicking or dragging inside the minimap recenters the main view on the
    /// corresponding world position.
    pub fn draw_minimap(&mut self, ui: &mut egui::Ui, canvas_rect: egui::Rect) {
        let size = egui::vec2(MINIMAP_WIDTH, MINIMAP_HEIGHT);
        let minimap_pos = canvas_rect.max - size - egui::Vec2::splat(MINIMAP_PADDING);

        let world_bounds = self.minimap_world_bounds(canvas_rect);
        let scale = (size.x / world_bounds.width().max(1.0))
            .min(size.y / world_bounds.height().max(1.0))
            * 0.9;

        egui::Area::new(egui::Id::new("blueprint_minimap"))
            .fixed_pos(minimap_pos)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
                let minimap_rect = response.rect;
                let origin = minimap_rect.center() - world_bounds.center().to_vec2() * scale;
                let to_minimap = |p: egui::Pos2| origin + p.to_vec2() * scale;

                painter.rect_filled(
                    minimap_rect,
                    4.0,
                    egui::Color32::from_rgba_unmultiplied(0, 0, 0, 160),
                );
                painter.rect_stroke(
                    minimap_rect,
                    4.0,
                    egui::Stroke::new(1.0, egui::Color32::GRAY),
                    StrokeKind::Inside,
                );

                for node in &self.blueprint.nodes {
                    let world = node_world_rect(node);
                    let rect =
                        egui::Rect::from_min_max(to_minimap(world.min), to_minimap(world.max));
                    painter.rect_filled(rect, 1.0, category_color(node.category()));
                }

                let visible = egui::Rect::from_min_max(
                    to_minimap(self.screen_to_world(canvas_rect.min)),
                    to_minimap(self.screen_to_world(canvas_rect.max)),
                );
                painter.rect_stroke(
                    visible,
                    0.0,
                    egui::Stroke::new(1.5, egui::Color32::WHITE),
                    StrokeKind::Inside,
                );

                if response.clicked() || response.dragged() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let world = egui::pos2(
                            (pos.x - origin.x) / scale,
                            (pos.y - origin.y) / scale,
                        );
                        self.center_view_on(world, canvas_rect);
                    }
                }
            });
    }
}

//! User interface components and rendering logic for the blueprint editor.
//!
//! This module contains all the UI-related code: the main application struct,
//! the toolbar, the node details panel, the context menu, and the canvas.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main BlueprintApp
//! - `file_ops` - JSON export/import for native and WASM
//! - `canvas` - Canvas navigation, zooming, panning, dragging and connecting
//! - `rendering` - Drawing nodes, edges, grid and minimap

mod canvas;
mod file_ops;
mod rendering;
mod state;


pub use state::BlueprintApp;

use crate::constants::BUTTON_ZOOM_FACTOR;
use crate::interaction::Mode;
use crate::recipe::RecipeView;
use crate::types::*;
use eframe::egui;

impl eframe::App for BlueprintApp {
    /// Persist view preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string(Self::STORAGE_KEY, json),
            Err(err) => log::error!("failed to serialize app state: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.draw_frame(ctx);
    }
}

impl BlueprintApp {
    /// Draws every panel and overlay for one frame.
    fn draw_frame(&mut self, ctx: &egui::Context) {
        self.handle_pending_operations(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::SidePanel::right("details_panel")
            .resizable(true)
            .default_width(self.details_panel_width)
            .width_range(180.0..=800.0)
            .show(ctx, |ui| {
                self.details_panel_width = ui.available_width();
                self.draw_details_panel(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });

        self.draw_notification(ctx);
    }

    /// Renders the top toolbar with file buttons, view toggles and the usage hint.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("💾 Save blueprint as JSON").clicked() {
                self.save_blueprint();
            }
            if ui.button("📂 Load JSON file").clicked() {
                self.load_blueprint();
            }

            ui.separator();

            ui.checkbox(&mut self.canvas.show_grid, "Grid");
            ui.checkbox(&mut self.canvas.show_minimap, "Minimap");
            ui.checkbox(&mut self.dark_mode, "Dark Mode");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("Zoom: {:.0}%", self.canvas.zoom_factor * 100.0));
                if let Some(name) = &self.file.last_file_name {
                    ui.label(name);
                }
                ui.weak(
                    "Right-click canvas to add nodes | Double-click a node to rename | \
                     Click a node to see its R/U",
                );
            });
        });
    }

    /// Renders the details panel with the selected node's recipe and usage.
    fn draw_details_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading("Node details");
                ui.separator();

                let view = self
                    .interaction
                    .selected
                    .as_ref()
                    .and_then(|id| RecipeView::for_node(&self.blueprint, id));
                let category = self
                    .interaction
                    .selected
                    .as_ref()
                    .and_then(|id| self.blueprint.node(id))
                    .map(|n| n.category());

                match (view, category) {
                    (Some(view), Some(category)) => Self::draw_recipe_view(ui, &view, category),
                    _ => Self::draw_no_selection_info(ui),
                }
            });
    }

    fn draw_recipe_view(ui: &mut egui::Ui, view: &RecipeView, category: Category) {
        ui.label(
            egui::RichText::new(&view.label)
                .size(18.0)
                .strong()
                .color(egui::Color32::from_rgb(255, 221, 0)),
        );
        ui.label(format!("Category: {}", category.display_name()));
        ui.add_space(12.0);

        ui.label(
            egui::RichText::new("Recipe (inputs):")
                .strong()
                .color(egui::Color32::from_rgb(136, 255, 136)),
        );
        if view.inputs.is_empty() {
            ui.weak("No inputs (possibly a resource origin)");
        } else {
            for input in &view.inputs {
                ui.label(format!("• Input from: {input}"));
            }
            ui.label("• (this node's output feeds downstream)");
        }

        ui.add_space(16.0);

        ui.label(
            egui::RichText::new("Usage (outputs):")
                .strong()
                .color(egui::Color32::from_rgb(255, 136, 136)),
        );
        if view.outputs.is_empty() {
            ui.weak("No outputs (possibly an endpoint)");
        } else {
            for output in &view.outputs {
                ui.label(format!("• Output to: {output}"));
            }
        }
    }

    fn draw_no_selection_info(ui: &mut egui::Ui) {
        ui.weak("Click a node on the canvas to see its recipe and usage, computed from its connections.");
        ui.separator();
        ui.label("Right-click on canvas to create nodes");
        ui.label("Drag from a node's right handle to another node's left handle to connect");
        ui.label("Middle-click and drag to pan");
    }

    /// Shows the pending notification as a modal. The rest of the UI ignores
    /// input until OK is pressed.
    fn draw_notification(&mut self, ctx: &egui::Context) {
        let Some(message) = self.notification.clone() else {
            return;
        };
        let modal = egui::Modal::new(egui::Id::new("notification")).show(ctx, |ui| {
            ui.heading("Notice");
            ui.label(message);
            ui.add_space(8.0);
            ui.button("OK").clicked()
        });
        if modal.inner {
            self.notification = None;
        }
    }

    /// Renders the right-click context menu for creating nodes.
    fn draw_context_menu(&mut self, ui: &mut egui::Ui) {
        let Some(menu) = self.interaction.context_menu else {
            return;
        };
        let screen_pos = egui::pos2(menu.screen_pos.0, menu.screen_pos.1);

        let menu_rect = egui::Area::new(egui::Id::new("context_menu"))
            .fixed_pos(screen_pos)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.vertical(|ui| {
                        if ui.button("➕ Add item node (green)").clicked() {
                            self.create_node_from_menu(Category::Item);
                        }
                        if ui.button("➕ Add machine node (blue)").clicked() {
                            self.create_node_from_menu(Category::Machine);
                        }
                        ui.separator();
                        if ui.button("Close").clicked() {
                            self.interaction.close_context_menu();
                        }
                    });
                })
            })
            .response
            .rect;

        // A click anywhere else, toolbar and details panel included, dismisses the menu
        let clicked_outside = ui.input(|i| {
            i.pointer.primary_clicked()
                && i.pointer
                    .interact_pos()
                    .is_some_and(|pos| !menu_rect.contains(pos))
        });
        if clicked_outside {
            self.interaction.close_context_menu();
        }
    }

    /// Creates a node at the context menu position and closes the menu.
    fn create_node_from_menu(&mut self, category: Category) -> Option<NodeId> {
        let request = self.interaction.choose_menu_item(category)?;
        Some(request.apply(&mut self.blueprint))
    }

    /// Renders the zoom in / zoom out / fit view buttons in the lower-left corner.
    fn draw_view_controls(&mut self, ui: &mut egui::Ui, canvas_rect: egui::Rect) {
        let pos = egui::pos2(canvas_rect.min.x + 10.0, canvas_rect.max.y - 40.0);
        egui::Area::new(egui::Id::new("view_controls"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui.small_button("+").on_hover_text("Zoom in").clicked() {
                            self.zoom_by(BUTTON_ZOOM_FACTOR, canvas_rect.center());
                        }
                        if ui.small_button("−").on_hover_text("Zoom out").clicked() {
                            self.zoom_by(1.0 / BUTTON_ZOOM_FACTOR, canvas_rect.center());
                        }
                        if ui.small_button("⛶").on_hover_text("Fit view").clicked() {
                            self.fit_view(canvas_rect);
                        }
                    });
                });
            });
    }

    /// Renders the canvas with nodes and edges and handles user interactions.
    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        painter.rect_filled(canvas_rect, 0.0, ui.visuals().extreme_bg_color);

        if !self.canvas.initialized {
            self.fit_view(canvas_rect);
            self.canvas.initialized = true;
        }

        self.handle_canvas_panning(ui, &response);
        self.handle_canvas_zoom(ui, &response);
        self.handle_node_dragging(ui, &response);
        self.handle_canvas_interactions(&response);

        self.render_blueprint_elements(&painter, canvas_rect);

        self.draw_label_editor(ui);

        if self.canvas.show_minimap {
            self.draw_minimap(ui, canvas_rect);
        }
        self.draw_view_controls(ui, canvas_rect);

        if self.interaction.mode() == Mode::ContextMenuOpen {
            self.draw_context_menu(ui);
        }
    }

    /// Handles clicks on the canvas: selection, label editing and the context menu.
    fn handle_canvas_interactions(&mut self, response: &egui::Response) {
        if self.gestures.is_panning {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let world_pos = self.screen_to_world(pos);
        let node_under_pointer = self.find_node_at_position(world_pos);

        if response.clicked() {
            let commit = match &node_under_pointer {
                Some(node_id) => self.interaction.click_node(node_id.clone()),
                None => self.interaction.click_canvas(),
            };
            if let Some(commit) = commit {
                commit.apply(&mut self.blueprint);
            }
        }

        if response.double_clicked() {
            if let Some(node_id) = &node_under_pointer {
                let label = self
                    .blueprint
                    .node_label(node_id)
                    .unwrap_or_default()
                    .to_string();
                if let Some(commit) = self.interaction.double_click_node(node_id.clone(), &label) {
                    commit.apply(&mut self.blueprint);
                }
                self.gestures.focus_requested_for_edit = false;
            }
        }

        if response.secondary_clicked() && node_under_pointer.is_none() {
            let commit = self
                .interaction
                .open_context_menu((pos.x, pos.y), Position::new(world_pos.x, world_pos.y));
            if let Some(commit) = commit {
                commit.apply(&mut self.blueprint);
            }
        }
    }

    /// Draws the inline text field over the node whose label is being edited.
    ///
    /// The edit is committed when the field loses focus (Enter also drops focus).
    fn draw_label_editor(&mut self, ui: &mut egui::Ui) {
        if self.interaction.mode() != Mode::EditingLabel {
            return;
        }
        let Some(node_id) = self.interaction.editing.as_ref().map(|e| e.node.clone()) else {
            return;
        };
        let Some(node) = self.blueprint.node(&node_id) else {
            self.interaction.editing = None;
            return;
        };
        let rect = self.node_screen_rect(node);
        let inner = rect.shrink2(egui::vec2(10.0, 14.0) * self.canvas.zoom_factor);
        let font_size = (14.0 * self.canvas.zoom_factor).clamp(6.0, 48.0);

        let Some(edit) = self.interaction.editing.as_mut() else {
            return;
        };
        let response = ui.put(
            inner,
            egui::TextEdit::singleline(&mut edit.buffer)
                .horizontal_align(egui::Align::Center)
                .font(egui::FontId::proportional(font_size))
                .text_color(egui::Color32::WHITE)
                .frame(false),
        );

        // Only request focus on the first frame of editing
        if !self.gestures.focus_requested_for_edit {
            response.request_focus();
            self.gestures.focus_requested_for_edit = true;
        }

        if response.lost_focus() {
            if let Some(commit) = self.interaction.finish_editing() {
                commit.apply(&mut self.blueprint);
            }
        }
    }
}

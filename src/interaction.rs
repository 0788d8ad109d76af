//! Selection, context menu and label-editing state.
//!
//! This is the editor's interaction state machine, kept free of any egui
//! types so the transitions can be driven directly. The canvas translates
//! pointer gestures into calls on [`InteractionState`]; the calls that need to
//! change the graph return a request which the caller applies to the
//! [`Blueprint`](crate::types::Blueprint).

use crate::types::{Blueprint, Category, NodeId, Position};

/// The editor mode as seen from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nothing selected, no menu open
    Idle,
    /// The right-click menu is showing
    ContextMenuOpen,
    /// A node is selected
    NodeSelected,
    /// A node's label is being edited in place
    EditingLabel,
}

/// A right-click menu waiting for the user to choose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    /// Where the menu is drawn, in screen pixels
    pub screen_pos: (f32, f32),
    /// Where a node chosen from the menu will be placed, in world units
    pub world_pos: Position,
}

/// The in-progress label edit for one node.
///
/// The buffer lives here rather than on the node so the graph only ever sees
/// committed labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEdit {
    /// Node being renamed
    pub node: NodeId,
    /// Current contents of the text field
    pub buffer: String,
}

/// A label the user finished editing and which should be written to the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCommit {
    /// Node being renamed
    pub node: NodeId,
    /// New label, possibly empty
    pub label: String,
}

/// A node the user asked for from the context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRequest {
    /// Label for the new node
    pub label: String,
    /// Item or machine
    pub category: Category,
    /// Placement in world units
    pub position: Position,
}

/// Transient interaction state. None of it is saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    /// Currently selected node, if any
    pub selected: Option<NodeId>,
    /// Open context menu, if any
    pub context_menu: Option<ContextMenu>,
    /// Label being edited, if any
    pub editing: Option<LabelEdit>,
}

impl InteractionState {
    /// Creates the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports the dominant mode. An open label edit wins over an open menu,
    /// which wins over a plain selection.
    pub fn mode(&self) -> Mode {
        if self.editing.is_some() {
            Mode::EditingLabel
        } else if self.context_menu.is_some() {
            Mode::ContextMenuOpen
        } else if self.selected.is_some() {
            Mode::NodeSelected
        } else {
            Mode::Idle
        }
    }

    /// Right-click on empty canvas. Any label edit in progress loses focus and
    /// is returned for committing.
    pub fn open_context_menu(
        &mut self,
        screen_pos: (f32, f32),
        world_pos: Position,
    ) -> Option<LabelCommit> {
        let commit = self.finish_editing();
        self.context_menu = Some(ContextMenu {
            screen_pos,
            world_pos,
        });
        commit
    }

    /// A menu entry was chosen. Closes the menu and returns the node to create
    /// at the recorded position; `None` if no menu was open.
    pub fn choose_menu_item(&mut self, category: Category) -> Option<NodeRequest> {
        let menu = self.context_menu.take()?;
        Some(NodeRequest {
            label: category.default_label().to_string(),
            category,
            position: menu.world_pos,
        })
    }

    /// Explicit "close" on the context menu.
    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Click on a node: selects it and closes any menu.
    pub fn click_node(&mut self, node: NodeId) -> Option<LabelCommit> {
        let commit = if self.editing.as_ref().is_some_and(|e| e.node != node) {
            self.finish_editing()
        } else {
            None
        };
        self.context_menu = None;
        self.selected = Some(node);
        commit
    }

    /// Click on empty canvas: drops the selection and closes any menu.
    pub fn click_canvas(&mut self) -> Option<LabelCommit> {
        let commit = self.finish_editing();
        self.context_menu = None;
        self.selected = None;
        commit
    }

    /// Double-click on a node: selects it and opens its label for editing,
    /// seeded with `current_label`. Double-clicking the node that is already
    /// being edited keeps the current buffer.
    pub fn double_click_node(
        &mut self,
        node: NodeId,
        current_label: &str,
    ) -> Option<LabelCommit> {
        if self.editing.as_ref().is_some_and(|e| e.node == node) {
            return None;
        }
        let commit = self.click_node(node.clone());
        self.editing = Some(LabelEdit {
            node,
            buffer: current_label.to_string(),
        });
        commit
    }

    /// The label field lost focus. Returns the edit to commit; the node stays
    /// selected.
    pub fn finish_editing(&mut self) -> Option<LabelCommit> {
        let edit = self.editing.take()?;
        self.selected = Some(edit.node.clone());
        Some(LabelCommit {
            node: edit.node,
            label: edit.buffer,
        })
    }

    /// Forgets everything, e.g. after the graph was replaced by a load.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl LabelCommit {
    /// Writes the committed label into the graph.
    pub fn apply(self, blueprint: &mut Blueprint) {
        blueprint.update_node_label(&self.node, self.label);
    }
}

impl NodeRequest {
    /// Adds the requested node to the graph and returns its id.
    pub fn apply(self, blueprint: &mut Blueprint) -> NodeId {
        blueprint.add_node(self.label, self.category, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn test_starts_idle() {
        assert_eq!(InteractionState::new().mode(), Mode::Idle);
    }

    #[test]
    fn test_context_menu_add_node_returns_to_idle() {
        let mut state = InteractionState::new();
        state.open_context_menu((40.0, 50.0), Position::new(-10.0, 25.0));
        assert_eq!(state.mode(), Mode::ContextMenuOpen);

        let request = state.choose_menu_item(Category::Machine).unwrap();
        assert_eq!(request.category, Category::Machine);
        assert_eq!(request.label, "New Machine");
        assert_eq!(request.position, Position::new(-10.0, 25.0));
        assert_eq!(state.mode(), Mode::Idle);
    }

    #[test]
    fn test_menu_item_without_menu_does_nothing() {
        let mut state = InteractionState::new();
        assert!(state.choose_menu_item(Category::Item).is_none());
    }

    #[test]
    fn test_context_menu_close_and_click_elsewhere() {
        let mut state = InteractionState::new();
        state.open_context_menu((0.0, 0.0), Position::default());
        state.close_context_menu();
        assert_eq!(state.mode(), Mode::Idle);

        state.open_context_menu((0.0, 0.0), Position::default());
        state.click_canvas();
        assert_eq!(state.mode(), Mode::Idle);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut state = InteractionState::new();
        state.click_node(id("a"));
        assert_eq!(state.mode(), Mode::NodeSelected);
        assert_eq!(state.selected, Some(id("a")));

        state.click_node(id("b"));
        assert_eq!(state.selected, Some(id("b")));

        state.click_canvas();
        assert_eq!(state.mode(), Mode::Idle);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_edit_commit_on_blur_keeps_selection() {
        let mut state = InteractionState::new();
        state.click_node(id("a"));
        assert!(state.double_click_node(id("a"), "Old").is_none());
        assert_eq!(state.mode(), Mode::EditingLabel);
        assert_eq!(state.editing.as_ref().unwrap().buffer, "Old");

        state.editing.as_mut().unwrap().buffer = String::new();
        let commit = state.finish_editing().unwrap();

        assert_eq!(commit, LabelCommit { node: id("a"), label: String::new() });
        assert_eq!(state.mode(), Mode::NodeSelected);
        assert_eq!(state.selected, Some(id("a")));
    }

    #[test]
    fn test_clicking_canvas_while_editing_commits() {
        let mut state = InteractionState::new();
        state.double_click_node(id("a"), "Gear");
        state.editing.as_mut().unwrap().buffer = "Gearbox".into();

        let commit = state.click_canvas().unwrap();
        assert_eq!(commit.label, "Gearbox");
        assert_eq!(state.mode(), Mode::Idle);
    }

    #[test]
    fn test_clicking_other_node_while_editing_commits() {
        let mut state = InteractionState::new();
        state.double_click_node(id("a"), "Gear");
        let commit = state.click_node(id("b")).unwrap();
        assert_eq!(commit.node, id("a"));
        assert_eq!(state.selected, Some(id("b")));
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_clicking_edited_node_keeps_editing() {
        let mut state = InteractionState::new();
        state.double_click_node(id("a"), "Gear");
        assert!(state.click_node(id("a")).is_none());
        assert_eq!(state.mode(), Mode::EditingLabel);
    }

    #[test]
    fn test_finish_editing_when_not_editing() {
        let mut state = InteractionState::new();
        assert!(state.finish_editing().is_none());
    }

    #[test]
    fn test_commit_and_request_apply_to_blueprint() {
        let mut bp = Blueprint::new();
        let mut state = InteractionState::new();
        state.open_context_menu((5.0, 5.0), Position::new(30.0, 40.0));
        let node = state.choose_menu_item(Category::Item).unwrap().apply(&mut bp);

        assert_eq!(bp.node_label(&node), Some("New Item"));
        assert_eq!(bp.node(&node).unwrap().position, Position::new(30.0, 40.0));

        state.double_click_node(node.clone(), "New Item");
        state.editing.as_mut().unwrap().buffer = "Silicon".into();
        state.finish_editing().unwrap().apply(&mut bp);

        assert_eq!(bp.node_label(&node), Some("Silicon"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = InteractionState::new();
        state.double_click_node(id("a"), "x");
        state.open_context_menu((0.0, 0.0), Position::default());
        state.reset();
        assert_eq!(state, InteractionState::default());
    }
}

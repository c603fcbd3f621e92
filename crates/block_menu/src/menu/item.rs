use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::document::{Attrs, EditorState, ElementNode, Node};

/// What a row shows: an icon identifier and a human-readable title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLabel {
    pub icon: String,
    pub title: String,
}

impl MenuLabel {
    pub fn new(icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
        }
    }
}

/// A menu entry's capabilities. `execute` is a pure function of the editor state: it returns the
/// next state, or `None` when the command does not apply.
pub trait MenuAction: Send + Sync {
    fn render(&self) -> MenuLabel;
    fn execute(&self, state: &EditorState) -> Option<EditorState>;
    fn is_enabled(&self, state: &EditorState) -> bool {
        self.execute(state).is_some()
    }
}

pub type CommandFn = Arc<dyn Fn(&EditorState) -> Option<EditorState> + Send + Sync>;

#[derive(Clone)]
pub struct CommandItem {
    label: MenuLabel,
    handler: CommandFn,
}

impl CommandItem {
    pub fn new(
        icon: impl Into<String>,
        title: impl Into<String>,
        handler: impl Fn(&EditorState) -> Option<EditorState> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: MenuLabel::new(icon, title),
            handler: Arc::new(handler),
        }
    }
}

impl fmt::Debug for CommandItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandItem")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl MenuAction for CommandItem {
    fn render(&self) -> MenuLabel {
        self.label.clone()
    }

    fn execute(&self, state: &EditorState) -> Option<EditorState> {
        (self.handler)(state)
    }
}

/// Turns the caret's block into `kind` with `attrs`.
#[derive(Debug, Clone)]
pub struct BlockTypeItem {
    label: MenuLabel,
    kind: String,
    attrs: Attrs,
}

impl BlockTypeItem {
    pub fn new(icon: impl Into<String>, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            label: MenuLabel::new(icon, title),
            kind: kind.into(),
            attrs: Attrs::default(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }
}

impl MenuAction for BlockTypeItem {
    fn render(&self) -> MenuLabel {
        self.label.clone()
    }

    fn execute(&self, state: &EditorState) -> Option<EditorState> {
        set_block_type(state, &self.kind, &self.attrs)
    }
}

/// Wraps the caret's block in a `kind` element, optionally through an `inner` element
/// (`bullet_list` > `list_item` > block).
#[derive(Debug, Clone)]
pub struct WrapItem {
    label: MenuLabel,
    kind: String,
    inner: Option<String>,
}

impl WrapItem {
    pub fn new(icon: impl Into<String>, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            label: MenuLabel::new(icon, title),
            kind: kind.into(),
            inner: None,
        }
    }

    pub fn through(mut self, inner: impl Into<String>) -> Self {
        self.inner = Some(inner.into());
        self
    }
}

impl MenuAction for WrapItem {
    fn render(&self) -> MenuLabel {
        self.label.clone()
    }

    fn execute(&self, state: &EditorState) -> Option<EditorState> {
        wrap_block(state, &self.kind, self.inner.as_deref())
    }
}

/// Inserts a void `kind` node in front of the caret's block. The caret stays in its block.
#[derive(Debug, Clone)]
pub struct InsertBlockItem {
    label: MenuLabel,
    kind: String,
}

impl InsertBlockItem {
    pub fn new(icon: impl Into<String>, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            label: MenuLabel::new(icon, title),
            kind: kind.into(),
        }
    }
}

impl MenuAction for InsertBlockItem {
    fn render(&self) -> MenuLabel {
        self.label.clone()
    }

    fn execute(&self, state: &EditorState) -> Option<EditorState> {
        insert_block(state, &self.kind)
    }
}

/// Moves the caret's block out of its innermost wrapper.
#[derive(Debug, Clone)]
pub struct LiftItem {
    label: MenuLabel,
}

impl LiftItem {
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            label: MenuLabel::new(icon, "Lift out of enclosing block"),
        }
    }
}

impl MenuAction for LiftItem {
    fn render(&self) -> MenuLabel {
        self.label.clone()
    }

    fn execute(&self, state: &EditorState) -> Option<EditorState> {
        lift_block(state)
    }
}

fn set_block_type(state: &EditorState, kind: &str, attrs: &Attrs) -> Option<EditorState> {
    let path = &state.selection.head().path;
    match state.doc.node(path)? {
        Node::Element(el) if el.kind == kind && &el.attrs == attrs => return None,
        Node::Element(_) => {}
        Node::Text(_) | Node::Void(_) => return None,
    }

    let mut next = state.clone();
    let block = next.doc.element_mut(path).ok()?;
    block.kind = kind.to_string();
    block.attrs = attrs.clone();
    Some(next)
}

fn wrap_block(state: &EditorState, kind: &str, inner: Option<&str>) -> Option<EditorState> {
    let path = state.selection.head().path.clone();
    let Some(Node::Element(_)) = state.doc.node(&path) else {
        return None;
    };

    let mut next = state.clone();
    let block = next.doc.remove_node(&path).ok()?;
    let mut caret = path.clone();
    let wrapped = match inner {
        Some(inner) => {
            caret.extend([0, 0]);
            Node::element(kind, vec![Node::element(inner, vec![block])])
        }
        None => {
            caret.push(0);
            Node::element(kind, vec![block])
        }
    };
    next.doc.insert_node(&path, wrapped).ok()?;
    Some(next.with_caret_at(caret))
}

fn insert_block(state: &EditorState, kind: &str) -> Option<EditorState> {
    let path = state.selection.head().path.clone();
    state.doc.node(&path)?;

    let mut next = state.clone();
    next.doc.insert_node(&path, Node::void(kind)).ok()?;
    let mut caret = path;
    *caret.last_mut()? += 1;
    Some(next.with_caret_at(caret))
}

fn lift_block(state: &EditorState) -> Option<EditorState> {
    let path = state.selection.head().path.clone();
    if path.len() < 2 {
        return None;
    }
    state.doc.node(&path)?;

    let (&index, wrapper_path) = path.split_last()?;
    let (&wrapper_index, grand_path) = wrapper_path.split_last()?;

    let mut next = state.clone();
    let Node::Element(mut wrapper) = next.doc.remove_node(wrapper_path).ok()? else {
        return None;
    };

    // Split the wrapper around the block; halves left empty are dropped.
    let tail = wrapper.children.split_off(index + 1);
    let block = wrapper.children.pop()?;
    let mut replacement: Vec<Node> = Vec::new();
    if !wrapper.children.is_empty() {
        replacement.push(Node::Element(ElementNode {
            kind: wrapper.kind.clone(),
            attrs: wrapper.attrs.clone(),
            children: std::mem::take(&mut wrapper.children),
        }));
    }
    let caret_index = wrapper_index + replacement.len();
    replacement.push(block);
    if !tail.is_empty() {
        replacement.push(Node::Element(ElementNode {
            kind: wrapper.kind,
            attrs: wrapper.attrs,
            children: tail,
        }));
    }

    let siblings = next.doc.children_mut(grand_path).ok()?;
    for (offset, node) in replacement.into_iter().enumerate() {
        siblings.insert(wrapper_index + offset, node);
    }

    let mut caret = grand_path.to_vec();
    caret.push(caret_index);
    Some(next.with_caret_at(caret))
}

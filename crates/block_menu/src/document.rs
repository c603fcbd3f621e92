use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Attrs = BTreeMap<String, serde_json::Value>;
pub type ElementKind = String;
pub type Path = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
    Void(VoidNode),
}

impl Node {
    pub fn element(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(ElementNode {
            kind: kind.into(),
            attrs: Attrs::default(),
            children,
        })
    }

    /// A paragraph holding `text`, or no children at all when `text` is empty.
    pub fn paragraph(text: impl Into<String>) -> Self {
        let text = text.into();
        let children = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        Node::element("paragraph", children)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode { text: text.into() })
    }

    pub fn void(kind: impl Into<String>) -> Self {
        Node::Void(VoidNode {
            kind: kind.into(),
            attrs: Attrs::default(),
        })
    }

    pub fn kind(&self) -> Option<&str> {
        match self {
            Node::Element(el) => Some(el.kind.as_str()),
            Node::Void(v) => Some(v.kind.as_str()),
            Node::Text(_) => None,
        }
    }

    /// Number of child content nodes. Leaves have none.
    pub fn content_len(&self) -> usize {
        match self {
            Node::Element(el) => el.children.len(),
            Node::Text(_) | Node::Void(_) => 0,
        }
    }

    pub fn is_empty_block(&self) -> bool {
        matches!(self, Node::Element(el) if el.children.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub kind: ElementKind,
    #[serde(default)]
    pub attrs: Attrs,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidNode {
    pub kind: ElementKind,
    #[serde(default)]
    pub attrs: Attrs,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path")]
    Empty,
    #[error("path out of bounds at depth {depth}: {index} >= {len}")]
    OutOfBounds {
        depth: usize,
        index: usize,
        len: usize,
    },
    #[error("non-container node at depth {depth}")]
    NotContainer { depth: usize },
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let (&last, parent) = path.split_last()?;
        self.children(parent)?.get(last)
    }

    /// Children of the container at `parent`; the empty path names the document itself.
    pub fn children(&self, parent: &[usize]) -> Option<&[Node]> {
        let mut children = self.children.as_slice();
        for &ix in parent {
            children = match children.get(ix)? {
                Node::Element(el) => el.children.as_slice(),
                Node::Text(_) | Node::Void(_) => return None,
            };
        }
        Some(children)
    }

    pub fn children_mut(&mut self, parent: &[usize]) -> Result<&mut Vec<Node>, PathError> {
        let mut children = &mut self.children;
        for (depth, &ix) in parent.iter().enumerate() {
            let len = children.len();
            children = match children.get_mut(ix) {
                Some(Node::Element(el)) => &mut el.children,
                Some(Node::Text(_) | Node::Void(_)) => {
                    return Err(PathError::NotContainer { depth });
                }
                None => {
                    return Err(PathError::OutOfBounds {
                        depth,
                        index: ix,
                        len,
                    });
                }
            };
        }
        Ok(children)
    }

    pub fn element_mut(&mut self, path: &[usize]) -> Result<&mut ElementNode, PathError> {
        let Some((&last, parent)) = path.split_last() else {
            return Err(PathError::Empty);
        };
        let children = self.children_mut(parent)?;
        let len = children.len();
        match children.get_mut(last) {
            Some(Node::Element(el)) => Ok(el),
            Some(Node::Text(_) | Node::Void(_)) => Err(PathError::NotContainer {
                depth: path.len() - 1,
            }),
            None => Err(PathError::OutOfBounds {
                depth: path.len() - 1,
                index: last,
                len,
            }),
        }
    }

    pub fn insert_node(&mut self, path: &[usize], node: Node) -> Result<(), PathError> {
        let Some((&index, parent)) = path.split_last() else {
            return Err(PathError::Empty);
        };
        let children = self.children_mut(parent)?;
        if index > children.len() {
            return Err(PathError::OutOfBounds {
                depth: parent.len(),
                index,
                len: children.len(),
            });
        }
        children.insert(index, node);
        Ok(())
    }

    pub fn remove_node(&mut self, path: &[usize]) -> Result<Node, PathError> {
        let Some((&index, parent)) = path.split_last() else {
            return Err(PathError::Empty);
        };
        let children = self.children_mut(parent)?;
        if index >= children.len() {
            return Err(PathError::OutOfBounds {
                depth: parent.len(),
                index,
                len: children.len(),
            });
        }
        Ok(children.remove(index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: Path, offset: usize) -> Self {
        Self { path, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn head(&self) -> &Point {
        &self.focus
    }
}

/// Snapshot of a host editor: document plus selection. Points address the text block the caret
/// sits in, with `offset` counted inside that block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub doc: Document,
    pub selection: Selection,
}

impl EditorState {
    pub fn new(doc: Document, selection: Selection) -> Self {
        Self { doc, selection }
    }

    /// Single empty paragraph with the caret inside it.
    pub fn empty() -> Self {
        Self::new(
            Document::new(vec![Node::paragraph("")]),
            Selection::collapsed(Point::new(vec![0], 0)),
        )
    }

    pub fn caret_block(&self) -> Option<&Node> {
        self.doc.node(&self.selection.head().path)
    }

    /// Path of the block the caret rests in, when the selection is collapsed and that block has
    /// no content.
    pub fn empty_block_anchor(&self) -> Option<Path> {
        if !self.selection.is_collapsed() {
            return None;
        }
        let head = self.selection.head();
        match self.doc.node(&head.path) {
            Some(node) if node.is_empty_block() => Some(head.path.clone()),
            _ => None,
        }
    }

    pub(crate) fn with_caret_at(mut self, path: Path) -> Self {
        let offset = self.selection.head().offset;
        self.selection = Selection::collapsed(Point::new(path, offset));
        self
    }
}

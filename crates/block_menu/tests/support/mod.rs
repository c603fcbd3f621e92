#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use plate_block_menu::menu::MenuFragment;
use plate_block_menu::{
    Document, EditorEvent, EditorState, EmptyBlockMenu, EmptyBlockMenuConfig, EventBus,
    HostEditor, Node, Offset, OverlaySurface, Path, Point, Rect, Selection, TimerQueue,
};

#[derive(Debug, Default)]
pub struct OverlayLog {
    pub class: String,
    pub visible: bool,
    pub offset: Option<Offset>,
    pub content: Option<MenuFragment>,
    pub renders: usize,
}

struct RecordingSurface(Rc<RefCell<OverlayLog>>);

impl OverlaySurface for RecordingSurface {
    fn set_offset(&mut self, offset: Offset) {
        self.0.borrow_mut().offset = Some(offset);
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }

    fn set_content(&mut self, fragment: MenuFragment) {
        let mut log = self.0.borrow_mut();
        log.content = Some(fragment);
        log.renders += 1;
    }
}

/// In-memory editor with a fixed layout table.
pub struct FakeHost {
    state: RefCell<EditorState>,
    events: EventBus,
    content: Cell<Rect>,
    rects: RefCell<HashMap<Path, Rect>>,
    pub overlay: Rc<RefCell<OverlayLog>>,
    pub mounts: Cell<usize>,
}

impl FakeHost {
    pub fn new(state: EditorState) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(state),
            events: EventBus::new(),
            content: Cell::new(Rect::origin(100., 20.)),
            rects: RefCell::new(HashMap::new()),
            overlay: Rc::new(RefCell::new(OverlayLog::default())),
            mounts: Cell::new(0),
        })
    }

    pub fn current(&self) -> EditorState {
        self.state.borrow().clone()
    }

    pub fn set_content_rect(&self, rect: Rect) {
        self.content.set(rect);
    }

    pub fn set_block_rect(&self, path: Path, rect: Rect) {
        self.rects.borrow_mut().insert(path, rect);
    }

    pub fn replace_state(&self, state: EditorState) {
        *self.state.borrow_mut() = state;
        self.events.emit(EditorEvent::Change);
    }

    pub fn select(&self, selection: Selection) {
        self.state.borrow_mut().selection = selection;
        self.events.emit(EditorEvent::SelectionChange);
    }

    pub fn bus(&self) -> &EventBus {
        &self.events
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.borrow().visible
    }

    pub fn renders(&self) -> usize {
        self.overlay.borrow().renders
    }
}

impl HostEditor for FakeHost {
    fn state(&self) -> EditorState {
        self.current()
    }

    fn events(&self) -> &EventBus {
        &self.events
    }

    fn content_rect(&self) -> Rect {
        self.content.get()
    }

    fn block_rect(&self, path: &[usize]) -> Option<Rect> {
        self.rects.borrow().get(path).copied()
    }

    fn mount_overlay(&self, class: &str) -> Box<dyn OverlaySurface> {
        self.mounts.set(self.mounts.get() + 1);
        self.overlay.borrow_mut().class = class.to_string();
        Box::new(RecordingSurface(self.overlay.clone()))
    }

    fn dispatch(&self, state: EditorState) {
        self.replace_state(state);
    }
}

pub const DELAY: Duration = Duration::from_millis(100);

pub fn caret(path: Path) -> Selection {
    Selection::collapsed(Point::new(path, 0))
}

pub fn state(children: Vec<Node>, selection: Selection) -> EditorState {
    EditorState::new(Document::new(children), selection)
}

pub fn attach(host: &Rc<FakeHost>, queue: &Rc<TimerQueue>) -> EmptyBlockMenu {
    EmptyBlockMenu::attach(host.clone(), queue.clone(), EmptyBlockMenuConfig::default())
}

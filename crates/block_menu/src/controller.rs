use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::Duration;

use crate::debounce::Debounced;
use crate::document::{EditorState, Path};
use crate::events::{EditorEvent, EventBus, ListenerId};
use crate::geometry::{Offset, Rect};
use crate::menu::{GroupedMenuRenderer, MenuDefinition, MenuFragment, MenuRenderer, PopupHost};
use crate::timer::Scheduler;

pub const OVERLAY_CLASS: &str = "plate-emptyblockmenu";
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// What the controller needs from the editor it decorates.
pub trait HostEditor {
    fn state(&self) -> EditorState;
    fn events(&self) -> &EventBus;
    /// Bounds of the content container; menu offsets are relative to its origin.
    fn content_rect(&self) -> Rect;
    /// On-screen bounds of the block at `path`, `None` when it is not laid out.
    fn block_rect(&self, path: &[usize]) -> Option<Rect>;
    /// Appends a floating node under the editor wrapper. Called once per controller.
    fn mount_overlay(&self, class: &str) -> Box<dyn OverlaySurface>;
    fn dispatch(&self, state: EditorState);
}

/// The floating node the menu is painted into.
pub trait OverlaySurface {
    fn set_offset(&mut self, offset: Offset);
    fn set_visible(&mut self, visible: bool);
    /// Replaces the node's contents.
    fn set_content(&mut self, fragment: MenuFragment);
}

#[derive(Clone)]
pub struct EmptyBlockMenuConfig {
    pub delay: Duration,
    pub items: Option<Arc<MenuDefinition>>,
    pub renderer: Option<Rc<dyn MenuRenderer>>,
}

impl Default for EmptyBlockMenuConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            items: None,
            renderer: None,
        }
    }
}

impl EmptyBlockMenuConfig {
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn items(mut self, items: Arc<MenuDefinition>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn renderer(mut self, renderer: Rc<dyn MenuRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    fn with_defaults(mut self) -> Self {
        if self.delay.is_zero() {
            self.delay = DEFAULT_DELAY;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuVisibility {
    Hidden,
    Shown,
}

struct MenuState {
    attached: bool,
    shown: bool,
    anchor: Option<Path>,
    offset: Option<Offset>,
    surface: Box<dyn OverlaySurface>,
    items: Arc<MenuDefinition>,
    renderer: Rc<dyn MenuRenderer>,
}

impl MenuState {
    fn update(&mut self, host: &dyn HostEditor) {
        if !self.attached {
            return;
        }
        let state = host.state();
        match state.empty_block_anchor() {
            Some(path) => self.show(host, path, &state),
            None => self.hide(),
        }
    }

    fn show(&mut self, host: &dyn HostEditor, path: Path, state: &EditorState) {
        let Some(target) = host.block_rect(&path) else {
            tracing::debug!(?path, "empty block has no layout, keeping menu hidden");
            self.hide();
            return;
        };
        let offset = target.offset_from(&host.content_rect());

        self.surface.set_offset(offset);
        self.renderer.open(
            &mut SurfacePopup {
                surface: self.surface.as_mut(),
            },
            &self.items,
            state,
        );
        self.surface.set_visible(true);

        tracing::trace!(?path, top = offset.top, left = offset.left, "empty block menu shown");
        self.shown = true;
        self.anchor = Some(path);
        self.offset = Some(offset);
    }

    fn hide(&mut self) {
        if !self.shown {
            return;
        }
        self.surface.set_visible(false);
        self.shown = false;
        self.anchor = None;
        self.offset = None;
        tracing::trace!("empty block menu hidden");
    }
}

struct SurfacePopup<'a> {
    surface: &'a mut dyn OverlaySurface,
}

impl PopupHost for SurfacePopup<'_> {
    fn show(&mut self, _id: Option<&str>, fragment: MenuFragment) {
        self.surface.set_content(fragment);
    }

    fn close(&mut self) {}
}

/// Floating block menu that follows the caret into empty blocks.
///
/// Selection and document changes are debounced; once the editor settles, the latest state
/// decides whether the menu is shown at the caret's block or hidden. Callbacks registered with
/// the host hold weak references only, so dropping the menu detaches it.
pub struct EmptyBlockMenu {
    host: Rc<dyn HostEditor>,
    state: Rc<RefCell<MenuState>>,
    debounced: Rc<Debounced>,
    listeners: Option<[ListenerId; 2]>,
}

impl EmptyBlockMenu {
    pub fn attach(
        host: Rc<dyn HostEditor>,
        scheduler: Rc<dyn Scheduler>,
        config: EmptyBlockMenuConfig,
    ) -> Self {
        let config = config.with_defaults();
        let surface = host.mount_overlay(OVERLAY_CLASS);
        let state = Rc::new(RefCell::new(MenuState {
            attached: true,
            shown: false,
            anchor: None,
            offset: None,
            surface,
            items: config
                .items
                .unwrap_or_else(|| Arc::new(MenuDefinition::block_defaults())),
            renderer: config
                .renderer
                .unwrap_or_else(|| Rc::new(GroupedMenuRenderer)),
        }));

        let weak_host: Weak<dyn HostEditor> = Rc::downgrade(&host);
        let weak_state = Rc::downgrade(&state);
        let debounced = Rc::new(Debounced::new(scheduler, config.delay, move || {
            let (Some(host), Some(state)) = (weak_host.upgrade(), weak_state.upgrade()) else {
                return;
            };
            state.borrow_mut().update(host.as_ref());
        }));

        let weak_debounced = Rc::downgrade(&debounced);
        let on_update: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(debounced) = weak_debounced.upgrade() {
                debounced.trigger();
            }
        });
        let events = host.events();
        let listeners = [
            events.on(EditorEvent::SelectionChange, on_update.clone()),
            events.on(EditorEvent::Change, on_update),
        ];

        tracing::debug!(delay_ms = config.delay.as_millis() as u64, "empty block menu attached");
        Self {
            host,
            state,
            debounced,
            listeners: Some(listeners),
        }
    }

    /// Cancels the pending update, hides the menu and unsubscribes from the host. Safe to call
    /// more than once.
    pub fn detach(&mut self) {
        let Some([selection, change]) = self.listeners.take() else {
            return;
        };
        self.debounced.clear();
        {
            let mut state = self.state.borrow_mut();
            state.hide();
            state.attached = false;
        }
        let events = self.host.events();
        events.off(EditorEvent::SelectionChange, selection);
        events.off(EditorEvent::Change, change);
        tracing::debug!("empty block menu detached");
    }

    pub fn is_attached(&self) -> bool {
        self.listeners.is_some()
    }

    pub fn is_update_pending(&self) -> bool {
        self.debounced.is_pending()
    }

    pub fn visibility(&self) -> MenuVisibility {
        if self.state.borrow().shown {
            MenuVisibility::Shown
        } else {
            MenuVisibility::Hidden
        }
    }

    pub fn is_shown(&self) -> bool {
        self.visibility() == MenuVisibility::Shown
    }

    pub fn anchor(&self) -> Option<Path> {
        self.state.borrow().anchor.clone()
    }

    pub fn offset(&self) -> Option<Offset> {
        self.state.borrow().offset
    }

    pub fn items(&self) -> Arc<MenuDefinition> {
        self.state.borrow().items.clone()
    }

    /// Re-evaluates immediately, skipping the debounce window. Cancels any pending update.
    pub fn refresh(&self) {
        if !self.is_attached() {
            return;
        }
        self.debounced.clear();
        self.state.borrow_mut().update(self.host.as_ref());
    }

    /// Runs entry `index` against the editor's current state and dispatches the result. Returns
    /// false when the entry does not exist or does not apply.
    pub fn activate(&self, index: usize) -> bool {
        if !self.is_attached() {
            return false;
        }
        let items = self.items();
        let Some(next) = items.execute(index, &self.host.state()) else {
            tracing::debug!(index, "menu entry does not apply");
            return false;
        };
        tracing::debug!(index, "menu entry activated");
        self.host.dispatch(next);
        true
    }
}

impl Drop for EmptyBlockMenu {
    fn drop(&mut self) {
        self.detach();
    }
}

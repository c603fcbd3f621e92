use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::controller::{DEFAULT_DELAY, EmptyBlockMenu, EmptyBlockMenuConfig, HostEditor};
use crate::timer::Scheduler;

pub const EMPTY_BLOCK_MENU_OPTION: &str = "emptyBlockMenu";

/// Plain-data form of the option, as read from a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptyBlockMenuSettings {
    pub enabled: bool,
    pub delay_ms: u64,
}

impl Default for EmptyBlockMenuSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_ms: DEFAULT_DELAY.as_millis() as u64,
        }
    }
}

impl EmptyBlockMenuSettings {
    pub fn to_config(&self) -> Option<EmptyBlockMenuConfig> {
        if !self.enabled {
            return None;
        }
        Some(EmptyBlockMenuConfig::default().delay(Duration::from_millis(self.delay_ms)))
    }
}

/// Holds the editor's empty-block menu while the option is on.
pub struct EmptyBlockMenuOption {
    host: Rc<dyn HostEditor>,
    scheduler: Rc<dyn Scheduler>,
    menu: Option<EmptyBlockMenu>,
}

impl EmptyBlockMenuOption {
    pub fn new(host: Rc<dyn HostEditor>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            host,
            scheduler,
            menu: None,
        }
    }

    pub fn name(&self) -> &'static str {
        EMPTY_BLOCK_MENU_OPTION
    }

    /// Tears down the current menu, if any, then attaches a fresh one when `value` is set.
    pub fn set(&mut self, value: Option<EmptyBlockMenuConfig>) {
        if let Some(mut menu) = self.menu.take() {
            menu.detach();
        }
        if let Some(config) = value {
            self.menu = Some(EmptyBlockMenu::attach(
                self.host.clone(),
                self.scheduler.clone(),
                config,
            ));
        }
        tracing::debug!(
            option = EMPTY_BLOCK_MENU_OPTION,
            enabled = self.menu.is_some(),
            "option updated"
        );
    }

    pub fn apply_settings(&mut self, settings: &EmptyBlockMenuSettings) {
        self.set(settings.to_config());
    }

    pub fn is_enabled(&self) -> bool {
        self.menu.is_some()
    }

    pub fn menu(&self) -> Option<&EmptyBlockMenu> {
        self.menu.as_ref()
    }
}

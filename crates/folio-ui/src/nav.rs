//! Mobile navigation drawer and in-page anchor scrolling.

use smol_str::SmolStr;
use tracing::debug;

use crate::config::{ClassConfig, ElementConfig};
use crate::events::ClickPath;
use crate::scroll_spy::fragment_target;
use crate::view::{Node, View};

/// Drawer opened by the menu control and closed by its close control, a
/// click outside it, or Escape.
#[derive(Debug, Clone)]
pub struct NavDrawer {
    nav: SmolStr,
    menu_button: SmolStr,
    close_button: SmolStr,
    open_class: SmolStr,
}

impl NavDrawer {
    pub fn new(elements: &ElementConfig, classes: &ClassConfig) -> Self {
        Self {
            nav: elements.nav.clone(),
            menu_button: elements.menu_button.clone(),
            close_button: elements.close_button.clone(),
            open_class: classes.drawer_open.clone(),
        }
    }

    pub fn open(&self, view: &mut impl View) {
        view.set_class(Node::Id(&self.nav), &self.open_class, true);
    }

    pub fn close(&self, view: &mut impl View) {
        view.set_class(Node::Id(&self.nav), &self.open_class, false);
    }

    pub fn is_open(&self, view: &impl View) -> bool {
        view.has_class(Node::Id(&self.nav), &self.open_class)
    }

    pub fn click(&self, path: &ClickPath, view: &mut impl View) {
        if path.within_id(&self.menu_button) {
            self.open(view);
        } else if path.within_id(&self.close_button) || !path.within_id(&self.nav) {
            self.close(view);
        }
    }

    pub fn key_down(&self, key: &str, view: &mut impl View) {
        if key == "Escape" {
            self.close(view);
        }
    }
}

/// Handle a click on an in-page anchor. Returns `true` when the native
/// navigation must be suppressed, which is the case for every `#` href.
pub fn follow_anchor(href: &str, drawer: &NavDrawer, view: &mut impl View) -> bool {
    if !href.starts_with('#') {
        return false;
    }
    let Some(target) = fragment_target(href) else {
        return true;
    };
    if view.exists(Node::Id(target)) {
        drawer.close(view);
        view.scroll_into_view(Node::Id(target));
    } else {
        debug!("anchor target '{target}' not found");
    }
    true
}

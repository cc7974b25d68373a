//! Fade page images in once they have loaded.

use crate::view::{Node, View};

#[derive(Debug, Clone)]
pub struct ImageFade {
    transition: String,
}

impl ImageFade {
    pub fn new(transition: impl Into<String>) -> Self {
        Self {
            transition: transition.into(),
        }
    }

    /// Hide images that are still loading; images already complete stay
    /// visible since their load event has passed.
    pub fn prepare(&self, images_complete: &[bool], view: &mut impl View) {
        for (index, complete) in images_complete.iter().enumerate() {
            let image = Node::Image(index);
            view.set_style(image, "opacity", if *complete { "1" } else { "0" });
            view.set_style(image, "transition", &self.transition);
        }
    }

    pub fn loaded(&self, index: usize, view: &mut impl View) {
        view.set_style(Node::Image(index), "opacity", "1");
    }
}

use preflight_dash::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock RenderSurface recording the visual classes it was asked to show
#[derive(Default, Clone)]
pub struct MockRenderSurface {
    pub classes: Arc<Mutex<Vec<VisualClass>>>,
}

#[allow(dead_code)]
impl MockRenderSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn css_classes(&self) -> Vec<&'static str> {
        self.classes
            .lock()
            .unwrap()
            .iter()
            .map(VisualClass::css_class)
            .collect()
    }
}

impl RenderSurface for MockRenderSurface {
    fn apply_class(&self, class: VisualClass) {
        self.classes.lock().unwrap().push(class);
    }
}

/// Visual class applied to the graph container during a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualClass {
    FadeOut,
    FadeIn,
}

impl VisualClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            VisualClass::FadeOut => "fade-out",
            VisualClass::FadeIn => "fade-in",
        }
    }
}

/// RenderSurface port for the external graph-drawing surface
///
/// The surface draws whatever the display cell currently holds; the
/// scheduler only tells it which transition class to show.
pub trait RenderSurface: Send + Sync {
    fn apply_class(&self, class: VisualClass);
}

use crate::field::Field;

/// Decides which fields of a struct belong in a rendered view.
///
/// Strategies are cached per [`cache_tag`](FieldSelector::cache_tag), so two
/// selectors that select differently must never share a tag. [`ViewSelector`]
/// uses the bare view name; custom selectors should use a distinct prefix.
pub trait FieldSelector {
    fn cache_tag(&self) -> &str;

    fn selects(&self, field: &Field) -> bool;
}

/// Selects fields annotated with one view name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSelector {
    view: String,
}

impl ViewSelector {
    pub fn new(view: impl Into<String>) -> Self {
        Self { view: view.into() }
    }

    pub fn view(&self) -> &str {
        &self.view
    }
}

impl FieldSelector for ViewSelector {
    fn cache_tag(&self) -> &str {
        &self.view
    }

    fn selects(&self, field: &Field) -> bool {
        field.in_view(&self.view)
    }
}

use gpui::{
    AnyElement, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    div,
};

use crate::form::{FormFieldState, FormResult};
use crate::style::class_names;

use super::border_color_for;

/// Container around a label and a single bound control.
#[derive(IntoElement)]
pub struct FormField {
    field: FormFieldState,
    class: Option<SharedString>,
    children: Vec<AnyElement>,
}

impl FormField {
    pub fn new(field: FormFieldState) -> Self {
        Self {
            field,
            class: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, value: impl Into<SharedString>) -> Self {
        self.class = Some(value.into());
        self
    }

    pub fn id(&self) -> &SharedString {
        self.field.id()
    }

    pub fn state(&self) -> &FormFieldState {
        &self.field
    }

    pub fn class_name(&self) -> FormResult<SharedString> {
        let field = self.field.class_name()?;
        let user = self.class.as_ref().map(SharedString::as_str).unwrap_or("");
        Ok(class_names([(field.as_str(), true), (user, true)]))
    }
}

impl ParentElement for FormField {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for FormField {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let class_name = self.class_name().unwrap_or_else(|error| {
            tracing::warn!(field = %self.field.id(), %error, "form field rendered without state");
            SharedString::default()
        });

        div()
            .id(self.field.id().clone())
            .flex()
            .flex_col()
            .gap_1()
            .p_2()
            .border_1()
            .rounded_md()
            .border_color(border_color_for(class_name.as_str()))
            .children(self.children)
    }
}

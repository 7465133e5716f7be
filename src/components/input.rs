use std::rc::Rc;

use gpui::{InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString, Styled, div};

use crate::form::{Control, FormResult};
use crate::style::class_names;

use super::{border_color_for, text_color};

type ChangeHandler = Rc<dyn Fn(&SharedString)>;
type BlurHandler = Rc<dyn Fn()>;

/// Text input bound to a [`Control`].
///
/// The host's text editing layer reports edits through [`Input::change`] and
/// focus loss through [`Input::blur`]. The control is updated first, then the
/// caller's own handler runs.
#[derive(IntoElement)]
pub struct Input {
    control: Control<SharedString>,
    class: Option<SharedString>,
    placeholder: Option<SharedString>,
    on_change: Option<ChangeHandler>,
    on_blur: Option<BlurHandler>,
}

impl Input {
    pub fn new(control: Control<SharedString>) -> Self {
        Self {
            control,
            class: None,
            placeholder: None,
            on_change: None,
            on_blur: None,
        }
    }

    pub fn class(mut self, value: impl Into<SharedString>) -> Self {
        self.class = Some(value.into());
        self
    }

    pub fn placeholder(mut self, value: impl Into<SharedString>) -> Self {
        self.placeholder = Some(value.into());
        self
    }

    pub fn on_change(mut self, handler: impl Fn(&SharedString) + 'static) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }

    pub fn on_blur(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_blur = Some(Rc::new(handler));
        self
    }

    pub fn id(&self) -> &SharedString {
        self.control.id()
    }

    pub fn control(&self) -> &Control<SharedString> {
        &self.control
    }

    pub fn change(&self, value: impl Into<SharedString>) -> FormResult<()> {
        let value = value.into();
        self.control.set_value(value.clone())?;
        if let Some(handler) = &self.on_change {
            handler(&value);
        }
        Ok(())
    }

    pub fn blur(&self) -> FormResult<()> {
        self.control.touch()?;
        if let Some(handler) = &self.on_blur {
            handler();
        }
        Ok(())
    }

    pub fn class_name(&self) -> FormResult<SharedString> {
        let state = self.control.class_name()?;
        let user = self.class.as_ref().map(SharedString::as_str).unwrap_or("");
        Ok(class_names([
            (user, true),
            ("input", true),
            (state.as_str(), true),
        ]))
    }
}

impl RenderOnce for Input {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let class_name = self.class_name().unwrap_or_else(|error| {
            tracing::warn!(control = %self.control.id(), %error, "input rendered without state");
            SharedString::default()
        });
        let value = self.control.value().unwrap_or_default();
        let show_placeholder = value.is_empty();
        let text = if show_placeholder {
            self.placeholder.clone().unwrap_or_default()
        } else {
            value
        };

        div()
            .id(self.control.id().clone())
            .px_2()
            .py_1()
            .border_1()
            .rounded_md()
            .border_color(border_color_for(class_name.as_str()))
            .text_color(text_color(show_placeholder))
            .child(text)
    }
}

use std::rc::Rc;

use gpui::prelude::FluentBuilder;
use gpui::{
    AnyElement, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    div,
};

use crate::form::{FormGroup, FormResult, GroupSnapshot};
use crate::style::class_names;

use super::border_color_for;

type SubmitHandler = Rc<dyn Fn(&GroupSnapshot<SharedString>)>;

/// Container rendering a [`FormGroup`] and its children.
#[derive(IntoElement)]
pub struct Form {
    id: SharedString,
    group: FormGroup<SharedString>,
    class: Option<SharedString>,
    on_submit: Option<SubmitHandler>,
    show_state: bool,
    children: Vec<AnyElement>,
}

impl Form {
    pub fn new(group: FormGroup<SharedString>) -> Self {
        Self {
            id: "form".into(),
            group,
            class: None,
            on_submit: None,
            show_state: false,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<SharedString>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, value: impl Into<SharedString>) -> Self {
        self.class = Some(value.into());
        self
    }

    pub fn on_submit(mut self, handler: impl Fn(&GroupSnapshot<SharedString>) + 'static) -> Self {
        self.on_submit = Some(Rc::new(handler));
        self
    }

    /// Appends a plain-text dump of the group's control map below the children.
    pub fn show_state(mut self, value: bool) -> Self {
        self.show_state = value;
        self
    }

    pub fn group(&self) -> &FormGroup<SharedString> {
        &self.group
    }

    /// Submits through the group. Returns whether the submit handler ran.
    pub fn submit(&self) -> FormResult<bool> {
        let handler = self.on_submit.clone();
        let submitted = self.group.submit(|snapshot| {
            if let Some(handler) = handler {
                handler(snapshot);
            }
        })?;
        Ok(submitted.is_some())
    }

    pub fn state_dump(&self) -> FormResult<SharedString> {
        let snapshot = self.group.snapshot()?;
        Ok(format!("{:#?}", snapshot.controls).into())
    }

    pub fn class_name(&self) -> FormResult<SharedString> {
        let group = self.group.class_name()?;
        let user = self.class.as_ref().map(SharedString::as_str).unwrap_or("");
        Ok(class_names([
            (user, true),
            ("form", true),
            (group.as_str(), true),
        ]))
    }
}

impl ParentElement for Form {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Form {
    fn render(self, _window: &mut gpui::Window, _cx: &mut gpui::App) -> impl IntoElement {
        let class_name = self.class_name().unwrap_or_else(|error| {
            tracing::warn!(form = %self.id, %error, "form rendered without state");
            SharedString::default()
        });
        let dump = if self.show_state {
            self.state_dump()
                .map_err(|error| {
                    tracing::warn!(form = %self.id, %error, "form state dump unavailable");
                })
                .ok()
        } else {
            None
        };

        div()
            .id(self.id)
            .flex()
            .flex_col()
            .gap_3()
            .p_3()
            .border_1()
            .rounded_md()
            .border_color(border_color_for(class_name.as_str()))
            .children(self.children)
            .when_some(dump, |this, dump| {
                this.child(div().font_family("monospace").text_xs().child(dump))
            })
    }
}

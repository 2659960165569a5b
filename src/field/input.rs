use crate::codec::Codec;
use crate::field::presentation::Presentation;
use crate::field::state::EditState;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

type FormatFn<T> = Box<dyn Fn(&T) -> String>;
type ParseFn<T> = Box<dyn Fn(&str) -> T>;
type ChangeFn<T> = Box<dyn FnMut(T)>;
type EventFn = Box<dyn FnMut()>;

/// Text input bound to a canonical value owned elsewhere.
///
/// The input never changes `value` itself. Edits are parsed and handed to the
/// `on_change` callback; the owner decides whether to accept them and feeds
/// the accepted value back through [`FormattedInput::set_value`]. Until blur,
/// the user keeps seeing exactly what they typed.
pub struct FormattedInput<T> {
    value: T,
    format: FormatFn<T>,
    parse: ParseFn<T>,
    state: EditState,
    on_change: Option<ChangeFn<T>>,
    on_focus: Option<EventFn>,
    on_blur: Option<EventFn>,
    presentation: Presentation<T>,
}

impl FormattedInput<String> {
    /// Plain text field: formatting and parsing are the identity
    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(value.into(), |v: &String| v.clone(), |s: &str| s.to_string())
    }
}

impl<T: 'static> FormattedInput<T> {
    pub fn new(
        value: T,
        format: impl Fn(&T) -> String + 'static,
        parse: impl Fn(&str) -> T + 'static,
    ) -> Self {
        Self {
            value,
            format: Box::new(format),
            parse: Box::new(parse),
            state: EditState::new(),
            on_change: None,
            on_focus: None,
            on_blur: None,
            presentation: Presentation::default(),
        }
    }

    pub fn with_codec<C>(value: T, codec: C) -> Self
    where
        C: Codec<Value = T> + 'static,
    {
        let codec = Rc::new(codec);
        let parser = Rc::clone(&codec);
        Self::new(
            value,
            move |v: &T| codec.format(v),
            move |s: &str| parser.parse(s),
        )
    }

    pub fn on_change(mut self, f: impl FnMut(T) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_focus(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_focus = Some(Box::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.presentation.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.presentation.disabled = disabled;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.presentation.class_name = class_name.into();
        self
    }

    pub fn class_name_fn(mut self, f: impl Fn(&T) -> String + 'static) -> Self {
        self.presentation.set_class_name_fn(f);
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.presentation.style.insert(property.into(), value.into());
        self
    }

    pub fn style_fn(mut self, f: impl Fn(&T) -> BTreeMap<String, String> + 'static) -> Self {
        self.presentation.set_style_fn(f);
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Owner re-render with a new canonical value.
    /// Visible only once the field is not being edited.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn raw_text(&self) -> Option<&str> {
        self.state.raw_text()
    }

    pub fn is_editing(&self) -> bool {
        self.state.is_editing()
    }

    /// Displayed text: raw text while editing, formatted value otherwise
    pub fn text(&self) -> String {
        self.state.display(|| (self.format)(&self.value)).into_owned()
    }

    /// User changed the text. `on_change` runs before this returns.
    pub fn handle_change(&mut self, text: &str) {
        self.state.edit(text.to_string());
        let parsed = (self.parse)(text);
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(parsed);
        }
    }

    pub fn handle_focus(&mut self) {
        let displayed = self.text();
        self.state.focus(displayed);
        if let Some(on_focus) = self.on_focus.as_mut() {
            on_focus();
        }
    }

    pub fn handle_blur(&mut self) {
        self.state.blur();
        debug!(text = %self.text(), "blur, showing formatted value");
        if let Some(on_blur) = self.on_blur.as_mut() {
            on_blur();
        }
    }

    pub fn placeholder_text(&self) -> Option<&str> {
        self.presentation.placeholder.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.presentation.disabled
    }

    pub fn class_names(&self) -> String {
        self.presentation.class_names(&self.value)
    }

    pub fn computed_style(&self) -> BTreeMap<String, String> {
        self.presentation.style(&self.value)
    }
}

impl<T: fmt::Debug> fmt::Debug for FormattedInput<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedInput")
            .field("value", &self.value)
            .field("state", &self.state)
            .field("presentation", &self.presentation)
            .finish()
    }
}

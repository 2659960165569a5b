// Presentation-only passthroughs. None of these affect editing behavior.

use std::collections::BTreeMap;
use std::fmt;

type ClassNameFn<T> = Box<dyn Fn(&T) -> String>;
type StyleFn<T> = Box<dyn Fn(&T) -> BTreeMap<String, String>>;

pub struct Presentation<T> {
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub class_name: String,
    pub style: BTreeMap<String, String>,
    class_name_fn: Option<ClassNameFn<T>>,
    style_fn: Option<StyleFn<T>>,
}

impl<T> Default for Presentation<T> {
    fn default() -> Self {
        Self {
            placeholder: None,
            disabled: false,
            class_name: String::new(),
            style: BTreeMap::new(),
            class_name_fn: None,
            style_fn: None,
        }
    }
}

impl<T> fmt::Debug for Presentation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presentation")
            .field("placeholder", &self.placeholder)
            .field("disabled", &self.disabled)
            .field("class_name", &self.class_name)
            .field("style", &self.style)
            .field("class_name_fn", &self.class_name_fn.is_some())
            .field("style_fn", &self.style_fn.is_some())
            .finish()
    }
}

impl<T> Presentation<T> {
    pub fn set_class_name_fn(&mut self, f: impl Fn(&T) -> String + 'static) {
        self.class_name_fn = Some(Box::new(f));
    }

    pub fn set_style_fn(&mut self, f: impl Fn(&T) -> BTreeMap<String, String> + 'static) {
        self.style_fn = Some(Box::new(f));
    }

    /// Static class name followed by the one derived from `value`, space separated
    pub fn class_names(&self, value: &T) -> String {
        let derived = self.class_name_fn.as_ref().map(|f| f(value)).unwrap_or_default();
        [self.class_name.as_str(), derived.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Static style merged with the style derived from `value`; derived entries win
    pub fn style(&self, value: &T) -> BTreeMap<String, String> {
        let mut style = self.style.clone();
        if let Some(f) = &self.style_fn {
            style.extend(f(value));
        }
        style
    }
}

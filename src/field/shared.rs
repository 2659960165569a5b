use crate::field::input::FormattedInput;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// Callback-worthy event raised by a [`SharedInput`]
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent<T> {
    Change(T),
    Focus,
    Blur,
}

/// A [`FormattedInput`] behind shared references, for hosts that call back
/// into the input from its own event handlers.
///
/// Events are queued while the input is borrowed and handed to the dispatch
/// closure only after the borrow ends, so the closure may call
/// [`SharedInput::set_value`] (or any other method) on the same input.
/// Callbacks registered on the wrapped input are replaced.
pub struct SharedInput<T> {
    inner: RefCell<FormattedInput<T>>,
    queued: Rc<RefCell<Vec<InputEvent<T>>>>,
}

impl<T: 'static> SharedInput<T> {
    pub fn new(input: FormattedInput<T>) -> Self {
        let queued = Rc::new(RefCell::new(Vec::new()));
        let (changes, focus, blur) = (queued.clone(), queued.clone(), queued.clone());
        let input = input
            .on_change(move |v| changes.borrow_mut().push(InputEvent::Change(v)))
            .on_focus(move || focus.borrow_mut().push(InputEvent::Focus))
            .on_blur(move || blur.borrow_mut().push(InputEvent::Blur));
        Self {
            inner: RefCell::new(input),
            queued,
        }
    }

    pub fn text(&self) -> String {
        self.inner.borrow().text()
    }

    pub fn raw_text(&self) -> Option<String> {
        self.inner.borrow().raw_text().map(str::to_string)
    }

    pub fn is_editing(&self) -> bool {
        self.inner.borrow().is_editing()
    }

    pub fn set_value(&self, value: T) {
        self.inner.borrow_mut().set_value(value);
    }

    pub fn handle_change<E>(
        &self,
        text: &str,
        dispatch: impl FnMut(InputEvent<T>) -> Result<(), E>,
    ) -> Result<(), E> {
        self.inner.borrow_mut().handle_change(text);
        self.flush(dispatch)
    }

    pub fn handle_focus<E>(
        &self,
        dispatch: impl FnMut(InputEvent<T>) -> Result<(), E>,
    ) -> Result<(), E> {
        self.inner.borrow_mut().handle_focus();
        self.flush(dispatch)
    }

    pub fn handle_blur<E>(
        &self,
        dispatch: impl FnMut(InputEvent<T>) -> Result<(), E>,
    ) -> Result<(), E> {
        self.inner.borrow_mut().handle_blur();
        self.flush(dispatch)
    }

    /// Hand queued events to `dispatch`; stops at the first error.
    fn flush<E>(&self, mut dispatch: impl FnMut(InputEvent<T>) -> Result<(), E>) -> Result<(), E> {
        let events = std::mem::take(&mut *self.queued.borrow_mut());
        trace!(count = events.len(), "dispatching input events");
        for event in events {
            dispatch(event)?;
        }
        Ok(())
    }
}

impl<T: Clone + 'static> SharedInput<T> {
    pub fn value(&self) -> T {
        self.inner.borrow().value().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SiCodec;
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;

    fn si_field(value: Option<f64>) -> SharedInput<Option<f64>> {
        SharedInput::new(FormattedInput::with_codec(value, SiCodec::default()))
    }

    #[test]
    fn test_owner_accepts_from_inside_change_callback() {
        let field = si_field(Some(2500.0));
        let accept = |event: InputEvent<Option<f64>>| {
            if let InputEvent::Change(v) = event {
                field.set_value(v);
            }
            Ok::<(), Infallible>(())
        };

        field.handle_focus(accept).unwrap();
        field.handle_change("1k", accept).unwrap();
        assert_eq!(field.value(), Some(1000.0));
        assert_eq!(field.text(), "1k");

        field.handle_blur(accept).unwrap();
        assert_eq!(field.text(), "1 k");
        assert!(!field.is_editing());
    }

    #[test]
    fn test_events_arrive_in_order() {
        let field = si_field(None);
        let mut seen = Vec::new();
        let mut record = |event: InputEvent<Option<f64>>| {
            seen.push(event);
            Ok::<(), Infallible>(())
        };

        field.handle_focus(&mut record).unwrap();
        field.handle_change("abc", &mut record).unwrap();
        field.handle_change("3m", &mut record).unwrap();
        field.handle_blur(&mut record).unwrap();

        assert_eq!(
            seen,
            vec![
                InputEvent::Focus,
                InputEvent::Change(None),
                InputEvent::Change(Some(0.003)),
                InputEvent::Blur,
            ]
        );
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_dispatch_error_is_returned() {
        let field = si_field(Some(1.0));
        let result = field.handle_change("2", |_| Err("callback threw"));
        assert_eq!(result, Err("callback threw"));
        assert_eq!(field.raw_text(), Some("2".to_string()));

        let mut count = 0;
        field
            .handle_blur(|_| {
                count += 1;
                Ok::<(), Infallible>(())
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}

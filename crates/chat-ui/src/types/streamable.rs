use crate::error::StreamError;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use yew::Callback;

/// Text that may still be growing.
///
/// Cloning yields another handle to the same buffer. Producers call
/// [`append`](Self::append) / [`update`](Self::update) and finally
/// [`done`](Self::done); consumers read [`snapshot`](Self::snapshot) and
/// [`subscribe`](Self::subscribe) to be told about changes.
#[derive(Clone, Default)]
pub struct StreamableText {
    inner: Rc<RefCell<StreamInner>>,
}

#[derive(Default)]
struct StreamInner {
    text: String,
    done: bool,
    next_subscriber: usize,
    subscribers: Vec<(usize, Callback<()>)>,
}

impl StreamableText {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stream that is already complete
    pub fn finished(text: impl Into<String>) -> Self {
        let stream = Self::new();
        {
            let mut inner = stream.inner.borrow_mut();
            inner.text = text.into();
            inner.done = true;
        }
        stream
    }

    /// Append a delta to the current value
    pub fn append(&self, delta: &str) -> Result<(), StreamError> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.done {
                return Err(StreamError::Closed);
            }
            inner.text.push_str(delta);
        }
        self.notify();
        Ok(())
    }

    /// Replace the current value
    pub fn update(&self, value: impl Into<String>) -> Result<(), StreamError> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.done {
                return Err(StreamError::Closed);
            }
            inner.text = value.into();
        }
        self.notify();
        Ok(())
    }

    /// Mark the stream complete. Further writes fail with [`StreamError::Closed`].
    pub fn done(&self) {
        let was_done = std::mem::replace(&mut self.inner.borrow_mut().done, true);
        if !was_done {
            self.notify();
        }
    }

    pub fn is_done(&self) -> bool {
        self.inner.borrow().done
    }

    /// Current value
    pub fn snapshot(&self) -> String {
        self.inner.borrow().text.clone()
    }

    /// Run `callback` after every change until the returned guard is dropped
    pub fn subscribe(&self, callback: Callback<()>) -> StreamSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner.subscribers.push((id, callback));
        StreamSubscription {
            stream: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        // Callbacks may re-enter the stream, so release the borrow first
        let callbacks: Vec<Callback<()>> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback.emit(());
        }
    }
}

impl PartialEq for StreamableText {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for StreamableText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("StreamableText")
            .field("len", &inner.text.len())
            .field("done", &inner.done)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Unsubscribes on drop
pub struct StreamSubscription {
    stream: Weak<RefCell<StreamInner>>,
    id: usize,
}

impl Drop for StreamSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.stream.upgrade() {
            inner
                .borrow_mut()
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

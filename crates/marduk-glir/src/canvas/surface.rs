use std::rc::Rc;

use crate::context::Context;

use super::set_current_canvas;

/// A rendering destination with exactly one [`Context`].
///
/// Implemented by backend canvas types. The registry only ever holds
/// surfaces weakly.
pub trait Surface {
    fn context(&self) -> &Context;
}

/// Minimal surface: a title and its context.
///
/// Backends that keep native handles elsewhere can use this directly and
/// register the native object as the shared namespace reference.
#[derive(Debug)]
pub struct Canvas {
    title: String,
    context: Context,
}

impl Canvas {
    pub fn new(title: impl Into<String>, context: Context) -> Rc<Self> {
        Rc::new(Self {
            title: title.into(),
            context,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Makes this canvas the current one for this thread.
    pub fn set_current(self: &Rc<Self>) {
        let surface: Rc<dyn Surface> = self.clone();
        set_current_canvas(surface);
    }
}

impl Surface for Canvas {
    fn context(&self) -> &Context {
        &self.context
    }
}

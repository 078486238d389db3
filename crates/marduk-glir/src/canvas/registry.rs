use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::command::Opcode;
use crate::object::ObjectId;

use super::Surface;

/// Recency-ordered set of live surfaces, most recently activated last.
///
/// Entries are weak: tracking a surface never keeps it alive. Dropped
/// surfaces are pruned on every read and write by rebuilding the list, so
/// no caller ever observes a half-pruned state.
#[derive(Default)]
pub struct CanvasRegistry {
    entries: Vec<Weak<dyn Surface>>,
}

impl CanvasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upgrades all entries and keeps only the live ones.
    fn prune(&mut self) -> Vec<Rc<dyn Surface>> {
        let live: Vec<Rc<dyn Surface>> = self.entries.iter().filter_map(Weak::upgrade).collect();
        let dropped = self.entries.len() - live.len();
        if dropped > 0 {
            log::warn!("pruned {dropped} dropped surface(s) from canvas registry");
        }
        self.store(&live);
        live
    }

    fn store(&mut self, live: &[Rc<dyn Surface>]) {
        self.entries = live.iter().map(Rc::downgrade).collect();
    }

    /// The most recently activated surface that is still alive.
    pub fn get_current(&mut self) -> Option<Rc<dyn Surface>> {
        self.prune().pop()
    }

    /// Makes `surface` current.
    ///
    /// Emits a `CURRENT` marker into the surface's context queue unless the
    /// surface already is current.
    pub fn set_current(&mut self, surface: Rc<dyn Surface>) {
        let live = self.prune();
        if live.last().is_some_and(|c| same_surface(c, &surface)) {
            return;
        }

        surface
            .context()
            .glir()
            .command(Opcode::Current, ObjectId::CONTEXT, Vec::new());

        let mut live: Vec<_> = live
            .into_iter()
            .filter(|c| !same_surface(c, &surface))
            .collect();
        live.push(surface);
        self.store(&live);
        log::debug!("current surface changed ({} tracked)", live.len());
    }

    /// Stops tracking `surface`.
    pub fn forget<S: Surface + ?Sized>(&mut self, surface: &Rc<S>) {
        let live: Vec<_> = self
            .prune()
            .into_iter()
            .filter(|c| !same_surface(c, surface))
            .collect();
        self.store(&live);
    }

    /// Number of live surfaces.
    pub fn len(&mut self) -> usize {
        self.prune().len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Identity comparison on the allocation, ignoring vtables.
fn same_surface<S: ?Sized>(a: &Rc<dyn Surface>, b: &Rc<S>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

thread_local! {
    static CANVASES: RefCell<CanvasRegistry> = RefCell::new(CanvasRegistry::new());
}

/// Runs `f` against this thread's canvas registry.
///
/// `f` must not call back into the registry accessors.
pub fn with_canvas_registry<R>(f: impl FnOnce(&mut CanvasRegistry) -> R) -> R {
    CANVASES.with_borrow_mut(f)
}

/// The current canvas of this thread, if any is alive.
///
/// New GPU objects associate with this canvas when none is given.
pub fn current_canvas() -> Option<Rc<dyn Surface>> {
    with_canvas_registry(|r| r.get_current())
}

/// Makes `surface` the current canvas. Used by the canvas on activation.
pub fn set_current_canvas(surface: Rc<dyn Surface>) {
    with_canvas_registry(|r| r.set_current(surface));
}

/// Forgets `surface`. Used by the canvas when it closes.
pub fn forget_canvas<S: Surface + ?Sized>(surface: &Rc<S>) {
    with_canvas_registry(|r| r.forget(surface));
}

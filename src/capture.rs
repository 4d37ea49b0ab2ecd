use std::{cell::RefCell, rc::Rc};

/// Pointer events a drag session can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Move,
    Release,
}

/// Registry of attached pointer listeners.
///
/// Cloning shares the registry. Listeners are only removed by dropping the
/// [`Listener`] handed out by [`Listeners::attach`].
#[derive(Clone, Default)]
pub struct Listeners {
    attached: Rc<RefCell<Vec<PointerEvent>>>,
}

impl Listeners {
    pub fn attach(&self, event: PointerEvent) -> Listener {
        self.attached.borrow_mut().push(event);
        Listener {
            event,
            registry: Rc::clone(&self.attached),
        }
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.attached.borrow().len()
    }

    pub fn is_attached(&self, event: PointerEvent) -> bool {
        self.attached.borrow().contains(&event)
    }
}

/// An attached listener. Detaches itself when dropped.
pub struct Listener {
    event: PointerEvent,
    registry: Rc<RefCell<Vec<PointerEvent>>>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let mut attached = self.registry.borrow_mut();
        if let Some(idx) = attached.iter().position(|e| *e == self.event) {
            attached.swap_remove(idx);
        }
    }
}

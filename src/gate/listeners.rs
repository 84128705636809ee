use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Identifies one registered listener.
    pub struct ListenerId;
}

type Callback<E> = Box<dyn FnMut(&E)>;

struct Table<E> {
    live: RefCell<SlotMap<ListenerId, Callback<E>>>,
    /// Listeners dropped while the table was being notified.
    dead: RefCell<Vec<ListenerId>>,
}

impl<E> Table<E> {
    fn remove(&self, id: ListenerId) {
        match self.live.try_borrow_mut() {
            Ok(mut live) => {
                live.remove(id);
            }
            Err(_) => self.dead.borrow_mut().push(id),
        }
    }
}

/// Single-threaded listener table. Each [`Subscription`] unsubscribes when dropped.
pub struct Listeners<E> {
    table: Rc<Table<E>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            table: Rc::new(Table {
                live: RefCell::new(SlotMap::with_key()),
                dead: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.table.live.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self, callback: impl FnMut(&E) + 'static) -> Subscription
    where
        E: 'static,
    {
        let id = self.table.live.borrow_mut().insert(Box::new(callback));
        let weak: Weak<Table<E>> = Rc::downgrade(&self.table);
        Subscription {
            id,
            table: Some(Box::new(move |id| {
                if let Some(table) = weak.upgrade() {
                    table.remove(id);
                }
            })),
        }
    }

    /// Deliver `event` to every live listener, in registration order.
    pub fn emit(&self, event: &E) {
        {
            let mut live = self.table.live.borrow_mut();
            for (_, callback) in live.iter_mut() {
                callback(event);
            }
        }
        let dead: Vec<ListenerId> = self.table.dead.borrow_mut().drain(..).collect();
        if !dead.is_empty() {
            let mut live = self.table.live.borrow_mut();
            for id in dead {
                live.remove(id);
            }
        }
    }
}

/// Handle returned by [`Listeners::subscribe`].
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: ListenerId,
    table: Option<Box<dyn FnOnce(ListenerId)>>,
}

impl Subscription {
    /// Unsubscribe now. Equivalent to dropping the handle.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(remove) = self.table.take() {
            remove(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.table.is_some())
            .finish()
    }
}

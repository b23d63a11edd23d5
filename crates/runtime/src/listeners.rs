/// Global input surfaces a view can subscribe to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InputSurface {
    Keyboard,
    Wheel,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Registration<O> {
    id: ListenerId,
    surface: InputSurface,
    owner: O,
    capture: bool,
}

/// Registry of input listeners keyed by owner.
///
/// Dispatch order: capturing listeners first (newest first), then bubbling
/// listeners (newest first). A capturing listener that handles an event stops
/// it from reaching anything registered behind it.
#[derive(Debug, Clone)]
pub struct ListenerSet<O> {
    next_id: u64,
    registrations: Vec<Registration<O>>,
}

impl<O> Default for ListenerSet<O> {
    fn default() -> Self {
        Self {
            next_id: 0,
            registrations: Vec::new(),
        }
    }
}

impl<O: Copy + Eq> ListenerSet<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, surface: InputSurface, owner: O, capture: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            surface,
            owner,
            capture,
        });
        id
    }

    /// Returns `true` if the listener was registered.
    pub fn deregister(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Removes every listener held by `owner`; returns how many were removed.
    pub fn deregister_owner(&mut self, owner: O) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.owner != owner);
        before - self.registrations.len()
    }

    pub fn count(&self, surface: InputSurface) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.surface == surface)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Owners in dispatch order for `surface`.
    pub fn dispatch_order(&self, surface: InputSurface) -> Vec<(O, bool)> {
        let matching = || {
            self.registrations
                .iter()
                .rev()
                .filter(move |r| r.surface == surface)
        };
        matching()
            .filter(|r| r.capture)
            .chain(matching().filter(|r| !r.capture))
            .map(|r| (r.owner, r.capture))
            .collect()
    }
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

fn next_listener_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Synchronous listener list. Invocation runs against a snapshot of the
/// registered callbacks, so a callback may add or remove listeners without
/// deadlocking.
pub struct Event<T> {
    listeners: Mutex<Vec<(u64, Callback<T>)>>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn add_listener<F>(&self, callback: F) -> u64
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = next_listener_id();
        self.listeners
            .lock()
            .unwrap()
            .push((id, Arc::new(callback)));
        id
    }

    pub fn remove_listener(&self, id: u64) -> bool {
        let mut listeners = self.listeners.lock().unwrap();
        match listeners.iter().position(|(listener_id, _)| *listener_id == id) {
            Some(pos) => {
                listeners.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn invoke(&self, payload: &T) {
        let snapshot: Vec<Callback<T>> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in snapshot {
            callback(payload);
        }
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle hooks driven by the event intake and wired to the refresh
/// engine at startup. Payload: player id and display name.
#[derive(Default)]
pub struct ServerEvents {
    pub player_joined: Event<(u32, String)>,
    pub player_left: Event<(u32, String)>,
}

impl ServerEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn listeners_receive_every_invocation() {
        let event = Event::<(u32, String)>::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = Arc::clone(&counter);
            event.add_listener(move |(id, _)| {
                assert_eq!(*id, 7);
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }

        event.invoke(&(7, "Vasya".to_string()));
        event.invoke(&(7, "Vasya".to_string()));
        assert_eq!(counter.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn removed_listener_stops_firing() {
        let event = Event::<(u32, String)>::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = Arc::clone(&counter);
        let id = event.add_listener(move |_| {
            counter_clone.fetch_add(1, Ordering::Relaxed);
        });

        assert!(event.remove_listener(id));
        assert!(!event.remove_listener(id));

        event.invoke(&(1, String::new()));
        assert_eq!(counter.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn listener_may_remove_itself_during_invoke() {
        let event = Arc::new(Event::<(u32, String)>::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let event_clone = Arc::clone(&event);
        let counter_clone = Arc::clone(&counter);
        let id = Arc::new(Mutex::new(0u64));
        let id_clone = Arc::clone(&id);
        *id.lock().unwrap() = event.add_listener(move |_| {
            counter_clone.fetch_add(1, Ordering::Relaxed);
            event_clone.remove_listener(*id_clone.lock().unwrap());
        });

        event.invoke(&(1, String::new()));
        event.invoke(&(1, String::new()));
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }
}

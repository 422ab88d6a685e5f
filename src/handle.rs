use std::{
    hash::Hash,
    sync::{mpsc::Sender, Arc},
};

pub type HandleId = u64;

/// Shared handle to a platform texture.
///
/// Clones share one id. When the last clone is dropped a [`DropEvent`] is
/// queued and the engine releases the texture on its next frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(Arc<StrongHandle>);

impl Handle {
    pub(crate) fn new(id: HandleId, drop_sender: Sender<DropEvent>) -> Self {
        Self(Arc::new(StrongHandle { id, drop_sender }))
    }

    pub fn id(&self) -> HandleId {
        self.0.id
    }

    /// Number of live clones of this handle
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DropEvent(pub HandleId);

#[derive(Debug)]
struct StrongHandle {
    id: HandleId,
    drop_sender: Sender<DropEvent>,
}

impl Hash for StrongHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Hash::hash(&self.id, state)
    }
}

impl Eq for StrongHandle {}

impl PartialEq for StrongHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for StrongHandle {
    fn drop(&mut self) {
        // receiver is gone once the engine shut down
        let _ = self.drop_sender.send(DropEvent(self.id));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;

    use super::{DropEvent, Handle};

    #[test]
    fn test_drop_event_sent_once() {
        let (sender, receiver) = channel();
        let handle = Handle::new(7, sender);
        let other = handle.clone();
        assert_eq!(handle.strong_count(), 2);
        drop(handle);
        assert!(receiver.try_recv().is_err());
        drop(other);
        assert_eq!(receiver.try_recv().unwrap(), DropEvent(7));
        assert!(receiver.try_recv().is_err());
    }
}

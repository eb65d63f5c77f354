use std::collections::HashMap;
use std::sync::Arc;

/// Stable identifier assigned to a frame when it is captured.
///
/// Keys increase monotonically within one [`FrameCollection`] and are never reused, even after
/// deletion, [`FrameCollection::reset`] or [`FrameCollection::restore`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameKey(pub u64);

/// One captured SVG document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Key assigned at capture time.
    pub key: FrameKey,
    /// Standalone SVG text.
    pub document: Arc<str>,
}

#[derive(Clone, Debug)]
struct RedoEntry {
    frame: Frame,
    position: usize,
}

/// Ordered, keyed store of captured frames with delete/undo.
///
/// Insertion order is playback order. Deleted frames are pushed onto a redo stack so the most
/// recent deletion can be reverted; appending a new frame discards that stack.
#[derive(Clone, Debug)]
pub struct FrameCollection {
    order: Vec<FrameKey>,
    by_key: HashMap<FrameKey, Frame>,
    redo: Vec<RedoEntry>,
    next_key: u64,
}

impl Default for FrameCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            by_key: HashMap::new(),
            redo: Vec::new(),
            next_key: 1,
        }
    }

    /// Number of frames currently in playback order.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when no frames are present.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in playback order.
    pub fn keys(&self) -> &[FrameKey] {
        &self.order
    }

    /// Look up a frame by key.
    pub fn get(&self, key: FrameKey) -> Option<&Frame> {
        self.by_key.get(&key)
    }

    /// Frame at a playback position.
    pub fn get_at(&self, position: usize) -> Option<&Frame> {
        self.order.get(position).and_then(|k| self.by_key.get(k))
    }

    /// Playback position of `key`, if present.
    pub fn position_of(&self, key: FrameKey) -> Option<usize> {
        self.order.iter().position(|&k| k == key)
    }

    /// Append a document and return its freshly assigned key.
    ///
    /// Any pending deletions become permanent.
    pub fn append(&mut self, document: impl Into<Arc<str>>) -> FrameKey {
        let key = FrameKey(self.next_key);
        self.next_key += 1;

        self.order.push(key);
        self.by_key.insert(
            key,
            Frame {
                key,
                document: document.into(),
            },
        );
        self.redo.clear();
        key
    }

    /// Remove the frame at `position`, keeping it for [`FrameCollection::undo_delete`].
    ///
    /// Out-of-range positions are ignored and return `None`.
    pub fn delete_at(&mut self, position: usize) -> Option<FrameKey> {
        if position >= self.order.len() {
            return None;
        }
        let key = self.order.remove(position);
        let frame = self.by_key.remove(&key)?;
        self.redo.push(RedoEntry { frame, position });
        Some(key)
    }

    /// Returns `true` when there is a deletion to revert.
    pub fn can_undo_delete(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Reinsert the most recently deleted frame at its old position.
    ///
    /// If later deletions shrank the sequence below that position, the frame goes to the end.
    pub fn undo_delete(&mut self) -> Option<FrameKey> {
        let RedoEntry { frame, position } = self.redo.pop()?;
        let key = frame.key;
        let position = position.min(self.order.len());
        self.order.insert(position, key);
        self.by_key.insert(key, frame);
        Some(key)
    }

    /// Immutable ordered copy of the current frames.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frames: self
                .order
                .iter()
                .filter_map(|k| self.by_key.get(k))
                .map(|f| (f.key, Arc::clone(&f.document)))
                .collect(),
        }
    }

    /// Drop every frame and pending deletion. The key counter keeps counting.
    pub fn reset(&mut self) {
        self.order.clear();
        self.by_key.clear();
        self.redo.clear();
    }

    /// Capture the current contents so they can be put back with [`FrameCollection::restore`].
    pub fn checkpoint(&self) -> CollectionCheckpoint {
        CollectionCheckpoint {
            order: self.order.clone(),
            by_key: self.by_key.clone(),
            redo: self.redo.clone(),
        }
    }

    /// Put back the contents captured by [`FrameCollection::checkpoint`].
    ///
    /// The key counter is not rewound, so keys handed out since the checkpoint stay retired.
    pub fn restore(&mut self, checkpoint: CollectionCheckpoint) {
        let CollectionCheckpoint {
            order,
            by_key,
            redo,
        } = checkpoint;
        self.order = order;
        self.by_key = by_key;
        self.redo = redo;
    }
}

/// Saved contents of a [`FrameCollection`].
#[derive(Clone, Debug)]
pub struct CollectionCheckpoint {
    order: Vec<FrameKey>,
    by_key: HashMap<FrameKey, Frame>,
    redo: Vec<RedoEntry>,
}

/// Ordered `(key, document)` pairs taken from a [`FrameCollection`] at one instant.
///
/// Documents are shared immutable text, so later collection edits cannot reach a snapshot that is
/// being assembled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSnapshot {
    frames: Vec<(FrameKey, Arc<str>)>,
}

impl FrameSnapshot {
    /// Build a snapshot directly from documents, keyed `1..=n` in order.
    pub fn from_documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            frames: documents
                .into_iter()
                .enumerate()
                .map(|(i, d)| (FrameKey(i as u64 + 1), d.into()))
                .collect(),
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when the snapshot holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterate `(key, document)` pairs in playback order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (FrameKey, &str)> {
        self.frames.iter().map(|(k, d)| (*k, d.as_ref()))
    }

    /// Documents in playback order.
    pub fn documents(&self) -> Vec<&str> {
        self.frames.iter().map(|(_, d)| d.as_ref()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/collection.rs"]
mod tests;

//! Recency list for LRU ordering
//!
//! Doubly-linked list stored in an arena of slots. Nodes are addressed by
//! [`Handle`] rather than by pointer, so the cache table can hold a handle
//! without aliasing the list. Head is the most recently used key.

/// Stable position of a key inside a [`RecencyList`]
///
/// Valid from `push_front` until `remove`. Promotion does not change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

/// Node in the recency list
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Keys ordered from most to least recently used
pub struct RecencyList<K> {
    nodes: Vec<Option<Node<K>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<K> RecencyList<K> {
    /// Create an empty list with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of keys in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `key` at the head and return its handle
    pub fn push_front(&mut self, key: K) -> Handle {
        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;

        Handle(idx)
    }

    /// Move the node behind `handle` to the head
    pub fn move_to_front(&mut self, handle: Handle) {
        let idx = handle.0;
        if self.head == Some(idx) || !self.is_live(idx) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    /// Remove the node behind `handle` and return its key
    pub fn remove(&mut self, handle: Handle) -> Option<K> {
        let idx = handle.0;
        if !self.is_live(idx) {
            return None;
        }

        self.unlink(idx);
        self.free_list.push(idx);
        self.len -= 1;
        self.nodes[idx].take().map(|node| node.key)
    }

    /// Key behind `handle`, if it is still live
    pub fn get(&self, handle: Handle) -> Option<&K> {
        self.nodes
            .get(handle.0)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.key)
    }

    /// Least recently used key
    pub fn back(&self) -> Option<(Handle, &K)> {
        self.tail.and_then(|idx| self.get(Handle(idx)).map(|key| (Handle(idx), key)))
    }

    /// Iterate keys from most to least recently used
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        matches!(self.nodes.get(idx), Some(Some(_)))
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }
}

/// Iterator over a [`RecencyList`], head to tail
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes[self.front?].as_ref()?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes[self.back?].as_ref()?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.key)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

//! Recency List Module
//!
//! Doubly linked list of payloads ordered by recency:
//! - Front = Most recently used
//! - Back = Least recently used
//!
//! Nodes live in a generational [`Arena`]; `prev`/`next` links are handles
//! rather than pointers. Every operation is O(1) and only `push_*` allocates,
//! and only when no freed slot is available for reuse.

use crate::cache::arena::{Arena, Handle};
use crate::error::{CacheError, Result};

#[derive(Debug)]
struct Node<T> {
    payload: T,
    /// Toward the front
    prev: Option<Handle>,
    /// Toward the back
    next: Option<Handle>,
}

// == Recency List ==
/// Arena-backed doubly linked list with stable handles.
///
/// Handles returned by [`push_front`](Self::push_front) and
/// [`push_back`](Self::push_back) stay valid until the node is removed or
/// the list is cleared. Using a handle after that yields
/// [`CacheError::StaleHandle`].
#[derive(Debug)]
pub struct RecencyList<T> {
    nodes: Arena<Node<T>>,
    front: Option<Handle>,
    back: Option<Handle>,
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            front: None,
            back: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            front: None,
            back: None,
        }
    }

    // == Length ==
    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    // == Accessors ==
    /// Payload of the most recently used node.
    pub fn front(&self) -> Option<&T> {
        self.front.and_then(|handle| self.get(handle))
    }

    /// Payload of the least recently used node.
    pub fn back(&self) -> Option<&T> {
        self.back.and_then(|handle| self.get(handle))
    }

    pub fn front_handle(&self) -> Option<Handle> {
        self.front
    }

    pub fn back_handle(&self) -> Option<Handle> {
        self.back
    }

    /// Returns the payload behind `handle`, if the node is still in the list.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.nodes.get(handle).map(|node| &node.payload)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.nodes.get_mut(handle).map(|node| &mut node.payload)
    }

    /// Returns `true` if `handle` refers to a node currently in the list.
    pub fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    // == Push Front ==
    /// Inserts `payload` as the new front and returns its handle.
    pub fn push_front(&mut self, payload: T) -> Handle {
        let handle = self.nodes.insert(Node {
            payload,
            prev: None,
            next: self.front,
        });
        match self.front {
            Some(old_front) => {
                if let Some(node) = self.nodes.get_mut(old_front) {
                    node.prev = Some(handle);
                }
            }
            None => self.back = Some(handle),
        }
        self.front = Some(handle);
        handle
    }

    // == Push Back ==
    /// Inserts `payload` as the new back and returns its handle.
    pub fn push_back(&mut self, payload: T) -> Handle {
        let handle = self.nodes.insert(Node {
            payload,
            prev: self.back,
            next: None,
        });
        match self.back {
            Some(old_back) => {
                if let Some(node) = self.nodes.get_mut(old_back) {
                    node.next = Some(handle);
                }
            }
            None => self.front = Some(handle),
        }
        self.back = Some(handle);
        handle
    }

    // == Remove ==
    /// Unlinks the node and returns its payload.
    pub fn remove(&mut self, handle: Handle) -> Result<T> {
        self.detach(handle)?;
        self.nodes
            .remove(handle)
            .map(|node| node.payload)
            .ok_or_else(|| stale(handle))
    }

    /// Removes and returns the least recently used payload.
    pub fn pop_back(&mut self) -> Option<T> {
        let back = self.back?;
        self.remove(back).ok()
    }

    // == Move To Front ==
    /// Promotes the node to most recently used. No-op if it already is.
    pub fn move_to_front(&mut self, handle: Handle) -> Result<()> {
        if !self.nodes.contains(handle) {
            return Err(stale(handle));
        }
        if self.front == Some(handle) {
            return Ok(());
        }

        self.detach(handle)?;

        let old_front = self.front;
        if let Some(node) = self.nodes.get_mut(handle) {
            node.next = old_front;
        }
        match old_front {
            Some(old_front) => {
                if let Some(node) = self.nodes.get_mut(old_front) {
                    node.prev = Some(handle);
                }
            }
            None => self.back = Some(handle),
        }
        self.front = Some(handle);
        Ok(())
    }

    // == Clear ==
    /// Drops every node. All outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.front = None;
        self.back = None;
    }

    /// Iterates payloads from front (most recent) to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.front,
        }
    }

    fn detach(&mut self, handle: Handle) -> Result<()> {
        let (prev, next) = {
            let node = self.nodes.get(handle).ok_or_else(|| stale(handle))?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => {
                if let Some(node) = self.nodes.get_mut(prev) {
                    node.next = next;
                }
            }
            None => self.front = next,
        }
        match next {
            Some(next) => {
                if let Some(node) = self.nodes.get_mut(next) {
                    node.prev = prev;
                }
            }
            None => self.back = prev,
        }

        if let Some(node) = self.nodes.get_mut(handle) {
            node.prev = None;
            node.next = None;
        }
        Ok(())
    }

    /// Walks the chain in both directions and checks it against `len()`.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        if self.len() == 0 {
            assert!(self.front.is_none());
            assert!(self.back.is_none());
            return;
        }

        let front = self.front.expect("non-empty list without front");
        let back = self.back.expect("non-empty list without back");
        assert!(self.nodes.get(front).expect("front missing").prev.is_none());
        assert!(self.nodes.get(back).expect("back missing").next.is_none());

        let mut count = 0;
        let mut prev = None;
        let mut current = self.front;
        while let Some(handle) = current {
            let node = self.nodes.get(handle).expect("dangling next link");
            assert_eq!(node.prev, prev);
            prev = Some(handle);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle in next links");
        }
        assert_eq!(count, self.len());
        assert_eq!(prev, self.back);

        let mut count = 0;
        let mut current = self.back;
        while let Some(handle) = current {
            current = self.nodes.get(handle).expect("dangling prev link").prev;
            count += 1;
            assert!(count <= self.len(), "cycle in prev links");
        }
        assert_eq!(count, self.len());
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn stale(handle: Handle) -> CacheError {
    CacheError::StaleHandle {
        index: handle.index(),
        generation: handle.generation(),
    }
}

// == Iterator ==
/// Front-to-back iterator over list payloads.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<Handle>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.current?)?;
        self.current = node.next;
        Some(&node.payload)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<i32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.assert_invariants();
    }

    #[test]
    fn test_list_push_front() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        assert_eq!(collect(&list), vec![3, 2, 1]);
        list.assert_invariants();
    }

    #[test]
    fn test_list_push_back() {
        let mut list = RecencyList::new();
        list.push_back(1);
        list.push_back(2);
        list.push_front(0);

        assert_eq!(collect(&list), vec![0, 1, 2]);
        assert_eq!(list.back(), Some(&2));
        list.assert_invariants();
    }

    #[test]
    fn test_list_single_node_is_front_and_back() {
        let mut list = RecencyList::new();
        let only = list.push_back("only");

        assert_eq!(list.front_handle(), Some(only));
        assert_eq!(list.back_handle(), Some(only));
        list.assert_invariants();
    }

    #[test]
    fn test_list_remove_middle() {
        let mut list = RecencyList::new();
        list.push_back(10);
        let mid = list.push_back(20);
        list.push_back(30);

        assert_eq!(list.remove(mid), Ok(20));
        assert_eq!(collect(&list), vec![10, 30]);
        list.assert_invariants();
    }

    #[test]
    fn test_list_remove_ends() {
        let mut list = RecencyList::new();
        let first = list.push_back(10);
        list.push_back(20);
        let last = list.push_back(30);

        assert_eq!(list.remove(first), Ok(10));
        assert_eq!(list.front(), Some(&20));
        assert_eq!(list.remove(last), Ok(30));
        assert_eq!(list.back(), Some(&20));
        assert_eq!(list.len(), 1);
        list.assert_invariants();
    }

    #[test]
    fn test_list_remove_last_node_empties() {
        let mut list = RecencyList::new();
        let only = list.push_front(1);
        assert_eq!(list.remove(only), Ok(1));
        assert!(list.is_empty());
        assert_eq!(list.front_handle(), None);
        assert_eq!(list.back_handle(), None);
        list.assert_invariants();
    }

    #[test]
    fn test_list_remove_stale_handle() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        list.push_front("b");
        list.remove(a).unwrap();

        assert!(matches!(
            list.remove(a),
            Err(CacheError::StaleHandle { .. })
        ));
        assert_eq!(list.len(), 1);
        list.assert_invariants();
    }

    #[test]
    fn test_list_stale_handle_after_slot_reuse() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        list.remove(a).unwrap();
        let b = list.push_front("b");

        assert_eq!(a.index(), b.index());
        assert!(!list.contains(a));
        assert!(list.move_to_front(a).is_err());
        assert_eq!(list.get(b), Some(&"b"));
    }

    #[test]
    fn test_list_move_to_front() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        // [c, b, a] -> [a, c, b]
        list.move_to_front(a).unwrap();
        assert_eq!(collect(&list), vec!["a", "c", "b"]);
        assert_eq!(list.back(), Some(&"b"));
        list.assert_invariants();
    }

    #[test]
    fn test_list_move_middle_to_front() {
        let mut list = RecencyList::new();
        list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        list.move_to_front(b).unwrap();
        assert_eq!(collect(&list), vec!["b", "c", "a"]);
        list.assert_invariants();
    }

    #[test]
    fn test_list_move_front_is_noop() {
        let mut list = RecencyList::new();
        list.push_front(1);
        let front = list.push_front(2);

        list.move_to_front(front).unwrap();
        assert_eq!(collect(&list), vec![2, 1]);
        list.assert_invariants();
    }

    #[test]
    fn test_list_pop_back() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        list.assert_invariants();
    }

    #[test]
    fn test_list_clear() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.push_front(2);
        list.clear();

        assert!(list.is_empty());
        assert!(!list.contains(a));
        list.assert_invariants();

        list.push_back(3);
        assert_eq!(collect(&list), vec![3]);
        list.assert_invariants();
    }

    #[test]
    fn test_list_get_mut() {
        let mut list = RecencyList::new();
        let a = list.push_front(String::from("old"));
        if let Some(payload) = list.get_mut(a) {
            payload.push_str("-new");
        }
        assert_eq!(list.get(a).map(String::as_str), Some("old-new"));
    }
}

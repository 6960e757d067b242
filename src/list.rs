//! Pooled doubly linked lists with detachable, fail-fast cursors.
//!
//! All lists of a [`ListPool`] share one node arena, so whole lists can be
//! spliced into each other in O(1) ([`ListPool::transfer_all`],
//! [`ListPool::coalesce`]) by relinking boundary nodes.
//!
//! A [`Cursor`] is a small `Copy` value that remembers a position inside one
//! list plus the list's version at the time it was last synchronised. Every
//! structural change to a list bumps its version, so a cursor that outlives
//! a change made through the pool or through another cursor fails with
//! [`CursorError::StaleCursor`] instead of walking freed nodes.
//!
//! ```
//! use sparse_2048::list::ListPool;
//!
//! let mut pool = ListPool::new();
//! let xs = pool.create_list();
//! for v in [1, 2, 3] {
//!     pool.push_back(xs, v);
//! }
//! let mut cur = pool.cursor(xs);
//! while cur.has_next(&pool).unwrap() {
//!     if *cur.next(&pool).unwrap() == 2 {
//!         cur.remove(&mut pool).unwrap();
//!     }
//! }
//! assert_eq!(pool.iter(xs).copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```

const NIL: u32 = u32::MAX;

/// Handle to one list inside a [`ListPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListId(u32);

impl ListId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    #[error("list was structurally modified since the cursor was synchronised")]
    StaleCursor,
    #[error("no element in that direction")]
    NoSuchElement,
    #[error("no element has been returned by next/previous since the last removal")]
    IllegalState,
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: Option<T>,
    prev: u32,
    next: u32,
}

#[derive(Clone, Debug)]
struct ListMeta {
    head: u32,
    tail: u32,
    len: usize,
    /// Bumped on every structural change; never reset, even when the slot is reused.
    version: u64,
    live: bool,
}

impl ListMeta {
    fn fresh(version: u64) -> Self {
        Self { head: NIL, tail: NIL, len: 0, version, live: true }
    }
}

/// Arena of nodes shared by any number of doubly linked lists.
#[derive(Clone, Debug)]
pub struct ListPool<T> {
    nodes: Vec<Node<T>>,
    free_nodes: Vec<u32>,
    lists: Vec<ListMeta>,
    free_lists: Vec<u32>,
}

impl<T> Default for ListPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListPool<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size the node arena for `nodes` elements across all lists.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            free_nodes: Vec::new(),
            lists: Vec::new(),
            free_lists: Vec::new(),
        }
    }

    /// Create a new, empty list.
    pub fn create_list(&mut self) -> ListId {
        match self.free_lists.pop() {
            Some(slot) => {
                let meta = &mut self.lists[slot as usize];
                *meta = ListMeta::fresh(meta.version + 1);
                ListId(slot)
            }
            None => {
                self.lists.push(ListMeta::fresh(0));
                ListId((self.lists.len() - 1) as u32)
            }
        }
    }

    /// Drop every element of `list` and return its slot to the pool.
    ///
    /// Releasing an already released list does nothing.
    pub fn release_list(&mut self, list: ListId) {
        if !self.lists[list.index()].live {
            return;
        }
        self.clear(list);
        let meta = self.meta_mut(list);
        meta.live = false;
        meta.version += 1;
        self.free_lists.push(list.0);
    }

    #[inline]
    pub fn len(&self, list: ListId) -> usize {
        self.meta(list).len
    }

    #[inline]
    pub fn is_empty(&self, list: ListId) -> bool {
        self.meta(list).len == 0
    }

    pub fn front(&self, list: ListId) -> Option<&T> {
        let head = self.meta(list).head;
        (head != NIL).then(|| self.value(head))
    }

    pub fn back(&self, list: ListId) -> Option<&T> {
        let tail = self.meta(list).tail;
        (tail != NIL).then(|| self.value(tail))
    }

    pub fn push_back(&mut self, list: ListId, value: T) {
        let idx = self.alloc(value);
        self.link_before(list, NIL, idx);
    }

    pub fn push_front(&mut self, list: ListId, value: T) {
        let idx = self.alloc(value);
        let head = self.meta(list).head;
        self.link_before(list, head, idx);
    }

    pub fn pop_front(&mut self, list: ListId) -> Option<T> {
        let head = self.meta(list).head;
        if head == NIL {
            return None;
        }
        self.unlink(list, head);
        Some(self.release_node(head))
    }

    pub fn pop_back(&mut self, list: ListId) -> Option<T> {
        let tail = self.meta(list).tail;
        if tail == NIL {
            return None;
        }
        self.unlink(list, tail);
        Some(self.release_node(tail))
    }

    /// Remove every element of `list`. O(len).
    pub fn clear(&mut self, list: ListId) {
        let mut at = self.meta(list).head;
        while at != NIL {
            let next = self.nodes[at as usize].next;
            self.release_node(at);
            at = next;
        }
        let meta = self.meta_mut(list);
        meta.head = NIL;
        meta.tail = NIL;
        meta.len = 0;
        meta.version += 1;
    }

    /// Move every element of `src` to the end of `dst`, leaving `src` empty. O(1).
    pub fn transfer_all(&mut self, dst: ListId, src: ListId) {
        if dst == src || self.is_empty(src) {
            return;
        }
        let (src_head, src_tail, src_len) = {
            let s = self.meta(src);
            (s.head, s.tail, s.len)
        };
        let dst_tail = self.meta(dst).tail;
        if dst_tail == NIL {
            self.meta_mut(dst).head = src_head;
        } else {
            self.nodes[dst_tail as usize].next = src_head;
            self.nodes[src_head as usize].prev = dst_tail;
        }
        let d = self.meta_mut(dst);
        d.tail = src_tail;
        d.len += src_len;
        d.version += 1;

        let s = self.meta_mut(src);
        s.head = NIL;
        s.tail = NIL;
        s.len = 0;
        s.version += 1;
    }

    /// Concatenate `sources`, in order, into a new list. Every source ends up
    /// empty but stays allocated. O(number of sources).
    pub fn coalesce(&mut self, sources: &[ListId]) -> ListId {
        let out = self.create_list();
        for &src in sources {
            self.transfer_all(out, src);
        }
        out
    }

    /// Front-to-back (and back-to-front) borrowing iterator.
    pub fn iter(&self, list: ListId) -> Iter<'_, T> {
        let meta = self.meta(list);
        Iter { pool: self, front: meta.head, back: meta.tail, remaining: meta.len }
    }

    /// Cursor positioned before the first element.
    pub fn cursor(&self, list: ListId) -> Cursor {
        let meta = self.meta(list);
        Cursor::new(list, meta.head, meta.version)
    }

    /// Cursor positioned after the last element, ready for `previous`.
    pub fn cursor_back(&self, list: ListId) -> Cursor {
        Cursor::new(list, NIL, self.meta(list).version)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    #[inline]
    fn meta(&self, list: ListId) -> &ListMeta {
        let meta = &self.lists[list.index()];
        assert!(meta.live, "use of a released list");
        meta
    }

    #[inline]
    fn meta_mut(&mut self, list: ListId) -> &mut ListMeta {
        let meta = &mut self.lists[list.index()];
        assert!(meta.live, "use of a released list");
        meta
    }

    #[inline]
    fn version(&self, list: ListId) -> u64 {
        self.lists[list.index()].version
    }

    #[inline]
    fn value(&self, idx: u32) -> &T {
        self.nodes[idx as usize]
            .value
            .as_ref()
            .expect("linked node always holds a value")
    }

    #[inline]
    fn value_mut(&mut self, idx: u32) -> &mut T {
        self.nodes[idx as usize]
            .value
            .as_mut()
            .expect("linked node always holds a value")
    }

    /// Node that sits just before the gap whose right side is `next`.
    #[inline]
    fn before_gap(&self, list: ListId, next: u32) -> u32 {
        if next == NIL {
            self.meta(list).tail
        } else {
            self.nodes[next as usize].prev
        }
    }

    fn alloc(&mut self, value: T) -> u32 {
        let node = Node { value: Some(value), prev: NIL, next: NIL };
        match self.free_nodes.pop() {
            Some(idx) => {
                self.nodes[idx as usize] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as u32
            }
        }
    }

    fn release_node(&mut self, idx: u32) -> T {
        let node = &mut self.nodes[idx as usize];
        node.prev = NIL;
        node.next = NIL;
        let value = node.value.take().expect("released node always holds a value");
        self.free_nodes.push(idx);
        value
    }

    /// Link the detached node `idx` in front of `at` (`NIL` = append).
    fn link_before(&mut self, list: ListId, at: u32, idx: u32) {
        let prev = self.before_gap(list, at);
        {
            let node = &mut self.nodes[idx as usize];
            node.prev = prev;
            node.next = at;
        }
        if prev == NIL {
            self.meta_mut(list).head = idx;
        } else {
            self.nodes[prev as usize].next = idx;
        }
        if at == NIL {
            self.meta_mut(list).tail = idx;
        } else {
            self.nodes[at as usize].prev = idx;
        }
        let meta = self.meta_mut(list);
        meta.len += 1;
        meta.version += 1;
    }

    fn unlink(&mut self, list: ListId, idx: u32) {
        let (prev, next) = {
            let node = &self.nodes[idx as usize];
            (node.prev, node.next)
        };
        if prev == NIL {
            self.meta_mut(list).head = next;
        } else {
            self.nodes[prev as usize].next = next;
        }
        if next == NIL {
            self.meta_mut(list).tail = prev;
        } else {
            self.nodes[next as usize].prev = prev;
        }
        let meta = self.meta_mut(list);
        meta.len -= 1;
        meta.version += 1;
    }
}

/// Borrowing iterator over one list.
pub struct Iter<'a, T> {
    pool: &'a ListPool<T>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        self.front = self.pool.nodes[idx as usize].next;
        self.remaining -= 1;
        Some(self.pool.value(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        self.back = self.pool.nodes[idx as usize].prev;
        self.remaining -= 1;
        Some(self.pool.value(idx))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Bidirectional position inside one list of a [`ListPool`].
///
/// The cursor sits in a gap between two elements (or at either end). `next`
/// and `previous` step over one element and return it; `remove`, `set` and
/// `insert_after_current` act on that last returned element.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    list: ListId,
    /// Node right of the gap, `NIL` at the end.
    next: u32,
    /// Node last returned by `next`/`previous`, `NIL` if none.
    last: u32,
    last_was_prev: bool,
    expected_version: u64,
}

impl Cursor {
    fn new(list: ListId, next: u32, version: u64) -> Self {
        Self { list, next, last: NIL, last_was_prev: false, expected_version: version }
    }

    /// List this cursor walks.
    pub fn list(&self) -> ListId {
        self.list
    }

    #[inline]
    fn check<T>(&self, pool: &ListPool<T>) -> Result<(), CursorError> {
        if pool.version(self.list) == self.expected_version {
            Ok(())
        } else {
            Err(CursorError::StaleCursor)
        }
    }

    pub fn has_next<T>(&self, pool: &ListPool<T>) -> Result<bool, CursorError> {
        self.check(pool)?;
        Ok(self.next != NIL)
    }

    pub fn has_previous<T>(&self, pool: &ListPool<T>) -> Result<bool, CursorError> {
        self.check(pool)?;
        Ok(pool.before_gap(self.list, self.next) != NIL)
    }

    /// Step forward over one element and return it.
    pub fn next<'p, T>(&mut self, pool: &'p ListPool<T>) -> Result<&'p T, CursorError> {
        self.check(pool)?;
        if self.next == NIL {
            return Err(CursorError::NoSuchElement);
        }
        let idx = self.next;
        self.last = idx;
        self.last_was_prev = false;
        self.next = pool.nodes[idx as usize].next;
        Ok(pool.value(idx))
    }

    /// Step backward over one element and return it.
    pub fn previous<'p, T>(&mut self, pool: &'p ListPool<T>) -> Result<&'p T, CursorError> {
        self.check(pool)?;
        let idx = pool.before_gap(self.list, self.next);
        if idx == NIL {
            return Err(CursorError::NoSuchElement);
        }
        self.last = idx;
        self.last_was_prev = true;
        self.next = idx;
        Ok(pool.value(idx))
    }

    /// Replace the last returned element, handing back the old value.
    pub fn set<T>(&mut self, pool: &mut ListPool<T>, value: T) -> Result<T, CursorError> {
        self.check(pool)?;
        if self.last == NIL {
            return Err(CursorError::IllegalState);
        }
        Ok(std::mem::replace(pool.value_mut(self.last), value))
    }

    /// Remove the last returned element. O(1).
    ///
    /// Traversal continues from the removed position in either direction.
    pub fn remove<T>(&mut self, pool: &mut ListPool<T>) -> Result<T, CursorError> {
        self.check(pool)?;
        if self.last == NIL {
            return Err(CursorError::IllegalState);
        }
        let idx = self.last;
        if self.last_was_prev {
            self.next = pool.nodes[idx as usize].next;
        }
        pool.unlink(self.list, idx);
        let value = pool.release_node(idx);
        self.last = NIL;
        self.expected_version = pool.version(self.list);
        Ok(value)
    }

    /// Insert `value` immediately after the last returned element. O(1).
    ///
    /// After a forward step the following `next` is unaffected; after a
    /// backward step `next` returns the last element and then `value`.
    pub fn insert_after_current<T>(
        &mut self,
        pool: &mut ListPool<T>,
        value: T,
    ) -> Result<(), CursorError> {
        self.check(pool)?;
        if self.last == NIL {
            return Err(CursorError::IllegalState);
        }
        let at = pool.nodes[self.last as usize].next;
        let idx = pool.alloc(value);
        pool.link_before(self.list, at, idx);
        self.expected_version = pool.version(self.list);
        Ok(())
    }

    /// Insert `value` into the gap the cursor sits in. O(1).
    ///
    /// A following `next` is unaffected and `previous` returns `value`.
    pub fn insert_before_cursor<T>(
        &mut self,
        pool: &mut ListPool<T>,
        value: T,
    ) -> Result<(), CursorError> {
        self.check(pool)?;
        let idx = pool.alloc(value);
        pool.link_before(self.list, self.next, idx);
        self.expected_version = pool.version(self.list);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(pool: &mut ListPool<i32>, values: &[i32]) -> ListId {
        let id = pool.create_list();
        for &v in values {
            pool.push_back(id, v);
        }
        id
    }

    fn collect(pool: &ListPool<i32>, id: ListId) -> Vec<i32> {
        pool.iter(id).copied().collect()
    }

    #[test]
    fn it_walks_both_directions() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1, 2, 3]);

        let mut cur = pool.cursor(id);
        let mut fwd = Vec::new();
        while cur.has_next(&pool).unwrap() {
            fwd.push(*cur.next(&pool).unwrap());
        }
        assert_eq!(fwd, vec![1, 2, 3]);
        assert_eq!(cur.next(&pool), Err(CursorError::NoSuchElement));

        let mut back = Vec::new();
        while cur.has_previous(&pool).unwrap() {
            back.push(*cur.previous(&pool).unwrap());
        }
        assert_eq!(back, vec![3, 2, 1]);
        assert_eq!(cur.previous(&pool), Err(CursorError::NoSuchElement));

        let mut tail = pool.cursor_back(id);
        assert!(!tail.has_next(&pool).unwrap());
        assert_eq!(*tail.previous(&pool).unwrap(), 3);
        assert_eq!(*tail.next(&pool).unwrap(), 3);
    }

    #[test]
    fn it_reports_stale_cursors() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1, 2, 3]);

        let cur = pool.cursor(id);
        pool.push_back(id, 4);
        assert_eq!(cur.has_next(&pool), Err(CursorError::StaleCursor));

        let mut a = pool.cursor(id);
        let mut b = pool.cursor(id);
        a.next(&pool).unwrap();
        a.remove(&mut pool).unwrap();
        assert!(a.has_next(&pool).unwrap());
        assert_eq!(b.next(&pool), Err(CursorError::StaleCursor));
    }

    #[test]
    fn it_ignores_changes_to_other_lists() {
        let mut pool = ListPool::new();
        let xs = list_of(&mut pool, &[1]);
        let ys = list_of(&mut pool, &[2]);
        let mut cur = pool.cursor(xs);
        pool.push_back(ys, 3);
        assert_eq!(*cur.next(&pool).unwrap(), 1);
    }

    #[test]
    fn it_removes_after_next() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1, 2, 3, 4]);
        let mut cur = pool.cursor(id);
        cur.next(&pool).unwrap();
        assert_eq!(*cur.next(&pool).unwrap(), 2);
        assert_eq!(cur.remove(&mut pool), Ok(2));
        assert_eq!(cur.remove(&mut pool), Err(CursorError::IllegalState));
        assert_eq!(*cur.next(&pool).unwrap(), 3);
        assert_eq!(*cur.previous(&pool).unwrap(), 3);
        assert_eq!(*cur.previous(&pool).unwrap(), 1);
        assert_eq!(collect(&pool, id), vec![1, 3, 4]);
        assert_eq!(pool.len(id), 3);
    }

    #[test]
    fn it_removes_after_previous() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1, 2, 3]);
        let mut cur = pool.cursor_back(id);
        assert_eq!(*cur.previous(&pool).unwrap(), 3);
        assert_eq!(*cur.previous(&pool).unwrap(), 2);
        assert_eq!(cur.remove(&mut pool), Ok(2));
        assert_eq!(*cur.previous(&pool).unwrap(), 1);
        assert_eq!(*cur.next(&pool).unwrap(), 1);
        assert_eq!(*cur.next(&pool).unwrap(), 3);
        assert_eq!(collect(&pool, id), vec![1, 3]);
    }

    #[test]
    fn it_requires_a_step_before_mutating() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1]);
        let mut cur = pool.cursor(id);
        assert_eq!(cur.remove(&mut pool), Err(CursorError::IllegalState));
        assert_eq!(cur.insert_after_current(&mut pool, 5), Err(CursorError::IllegalState));
        assert_eq!(cur.set(&mut pool, 5), Err(CursorError::IllegalState));
        assert_eq!(collect(&pool, id), vec![1]);
    }

    #[test]
    fn it_inserts_after_current() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1, 3]);
        let mut cur = pool.cursor(id);
        assert_eq!(*cur.next(&pool).unwrap(), 1);
        cur.insert_after_current(&mut pool, 2).unwrap();
        assert_eq!(*cur.next(&pool).unwrap(), 3);
        assert_eq!(collect(&pool, id), vec![1, 2, 3]);

        // Backward step: the new element lands after the one just returned.
        let mut cur = pool.cursor_back(id);
        assert_eq!(*cur.previous(&pool).unwrap(), 3);
        cur.insert_after_current(&mut pool, 4).unwrap();
        assert_eq!(*cur.next(&pool).unwrap(), 3);
        assert_eq!(*cur.next(&pool).unwrap(), 4);
        assert_eq!(collect(&pool, id), vec![1, 2, 3, 4]);
        assert_eq!(pool.iter(id).rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn it_inserts_before_cursor() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[2]);
        let mut cur = pool.cursor(id);
        cur.insert_before_cursor(&mut pool, 1).unwrap();
        assert_eq!(*cur.next(&pool).unwrap(), 2);
        cur.insert_before_cursor(&mut pool, 3).unwrap();
        assert!(!cur.has_next(&pool).unwrap());
        assert_eq!(*cur.previous(&pool).unwrap(), 3);
        assert_eq!(collect(&pool, id), vec![1, 2, 3]);
        assert_eq!(pool.front(id), Some(&1));
        assert_eq!(pool.back(id), Some(&3));

        let empty = pool.create_list();
        let mut cur = pool.cursor(empty);
        cur.insert_before_cursor(&mut pool, 7).unwrap();
        assert_eq!(collect(&pool, empty), vec![7]);
    }

    #[test]
    fn it_sets_last_returned() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1, 2]);
        let mut cur = pool.cursor(id);
        cur.next(&pool).unwrap();
        assert_eq!(cur.set(&mut pool, 10), Ok(1));
        // Not structural: the cursor stays valid.
        assert_eq!(*cur.next(&pool).unwrap(), 2);
        assert_eq!(collect(&pool, id), vec![10, 2]);
    }

    #[test]
    fn it_transfers_all() {
        let mut pool = ListPool::new();
        let xs = list_of(&mut pool, &[1, 2]);
        let ys = list_of(&mut pool, &[3, 4]);
        pool.transfer_all(xs, ys);
        assert_eq!(collect(&pool, xs), vec![1, 2, 3, 4]);
        assert!(pool.is_empty(ys));
        assert_eq!(pool.len(xs), 4);

        // The emptied list is still usable and unrelated to its old nodes.
        pool.push_back(ys, 9);
        assert_eq!(collect(&pool, ys), vec![9]);
        assert_eq!(collect(&pool, xs), vec![1, 2, 3, 4]);

        pool.transfer_all(xs, xs);
        assert_eq!(collect(&pool, xs), vec![1, 2, 3, 4]);

        let empty = pool.create_list();
        pool.transfer_all(empty, xs);
        assert_eq!(collect(&pool, empty), vec![1, 2, 3, 4]);
        assert_eq!(pool.iter(empty).rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn it_coalesces_in_order() {
        let mut pool = ListPool::new();
        let a = list_of(&mut pool, &[1]);
        let b = list_of(&mut pool, &[]);
        let c = list_of(&mut pool, &[2, 3]);
        let d = list_of(&mut pool, &[4]);
        let out = pool.coalesce(&[a, b, c, d]);
        assert_eq!(collect(&pool, out), vec![1, 2, 3, 4]);
        for id in [a, b, c, d] {
            assert!(pool.is_empty(id));
        }
        let none = pool.coalesce(&[]);
        assert!(pool.is_empty(none));
    }

    #[test]
    fn it_pops_and_clears() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1, 2, 3]);
        pool.push_front(id, 0);
        assert_eq!(pool.pop_front(id), Some(0));
        assert_eq!(pool.pop_back(id), Some(3));
        assert_eq!(collect(&pool, id), vec![1, 2]);
        pool.clear(id);
        assert!(pool.is_empty(id));
        assert_eq!(pool.pop_front(id), None);
        assert_eq!(pool.pop_back(id), None);
    }

    #[test]
    fn it_reuses_released_slots() {
        let mut pool = ListPool::new();
        let id = list_of(&mut pool, &[1, 2, 3]);
        let stale = pool.cursor(id);
        pool.release_list(id);
        let again = list_of(&mut pool, &[4, 5, 6]);
        assert_eq!(again, id);
        assert_eq!(pool.nodes.len(), 3);
        assert_eq!(stale.has_next(&pool), Err(CursorError::StaleCursor));
        assert_eq!(collect(&pool, again), vec![4, 5, 6]);
    }

    #[test]
    fn it_releases_a_list_once() {
        let mut pool = ListPool::new();
        let a = pool.create_list();
        pool.release_list(a);
        pool.release_list(a);
        let b = pool.create_list();
        let c = pool.create_list();
        assert_ne!(b, c);
        pool.push_back(b, 1);
        assert_eq!(collect(&pool, b), vec![1]);
        assert!(pool.is_empty(c));
    }

    #[test]
    #[should_panic(expected = "use of a released list")]
    fn it_rejects_pushes_to_released_lists() {
        let mut pool = ListPool::new();
        let a = pool.create_list();
        pool.release_list(a);
        pool.push_back(a, 1);
    }
}

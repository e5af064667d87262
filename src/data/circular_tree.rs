use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::Error;

mod iter;
pub use iter::*;

/// Stable reference to an entry of a [`CircularTree`].
///
/// Handles survive rebalancing and the insertion or removal of other entries.
/// Removing the entry (or clearing the tree) invalidates the handle for good:
/// slots are versioned, so a stale handle is never confused with a newer
/// entry that reuses the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
  index: usize,
  generation: u32,
}

struct Node<K, V> {
  key: K,
  value: V,
  parent: Option<usize>,
  left: Option<usize>,
  right: Option<usize>,
  height: u8,
}

struct Slot<K, V> {
  generation: u32,
  node: Option<Node<K, V>>,
}

/// Balanced search tree whose navigation wraps around.
///
/// Keys are unique and ordered by the comparator given to
/// [`CircularTree::new`]; there is no default order to fall back to. The tree
/// is an AVL tree stored in an arena with parent links, so `insert`, `remove`,
/// `find`, `first`, `last`, `before` and `after` are all $O(\log n)$ and `len`
/// is $O(1)$.
///
/// [`before`](CircularTree::before) and [`after`](CircularTree::after) are
/// circular: the entry after the last one is the first one and vice versa.
///
/// # Examples
///
/// ```rust
/// # use angular_hull::data::CircularTree;
/// let mut tree = CircularTree::new(|a: &i32, b: &i32| a.cmp(b));
/// let two = tree.insert(2, "two").unwrap();
/// let one = tree.insert(1, "one").unwrap();
/// assert_eq!(tree.after(two).unwrap(), one);
/// assert_eq!(tree.before(one).unwrap(), two);
/// assert_eq!(tree[one], "one");
/// ```
pub struct CircularTree<K, V, C> {
  slots: Vec<Slot<K, V>>,
  free: Vec<usize>,
  root: Option<usize>,
  len: usize,
  cmp: C,
}

impl<K, V, C> CircularTree<K, V, C>
where
  C: Fn(&K, &K) -> Ordering,
{
  pub fn new(cmp: C) -> CircularTree<K, V, C> {
    CircularTree {
      slots: Vec::new(),
      free: Vec::new(),
      root: None,
      len: 0,
      cmp,
    }
  }

  /// $O(1)$
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// $O(\log n)$ Insert a new entry and return a handle to it.
  ///
  /// # Errors
  /// Returns [`Error::DuplicateKey`] if an equal key is already present. The
  /// tree is left unchanged.
  pub fn insert(&mut self, key: K, value: V) -> Result<Handle, Error> {
    let mut parent = None;
    let mut cursor = self.root;
    let mut go_left = false;
    while let Some(id) = cursor {
      let node = self.node(id);
      parent = Some(id);
      match (self.cmp)(&key, &node.key) {
        Ordering::Less => {
          go_left = true;
          cursor = node.left;
        }
        Ordering::Greater => {
          go_left = false;
          cursor = node.right;
        }
        Ordering::Equal => return Err(Error::DuplicateKey),
      }
    }
    let id = self.alloc(Node {
      key,
      value,
      parent,
      left: None,
      right: None,
      height: 1,
    });
    match parent {
      None => self.root = Some(id),
      Some(p) if go_left => self.node_mut(p).left = Some(id),
      Some(p) => self.node_mut(p).right = Some(id),
    }
    self.len += 1;
    self.retrace(parent);
    Ok(self.handle(id))
  }

  /// $O(\log n)$ Remove an entry and return its key and value.
  ///
  /// # Errors
  /// Returns [`Error::StaleHandle`] if the entry has already been removed.
  pub fn remove(&mut self, handle: Handle) -> Result<(K, V), Error> {
    let z = self.live(handle).ok_or(Error::StaleHandle)?;
    let (parent, left, right) = {
      let node = self.node(z);
      (node.parent, node.left, node.right)
    };
    let retrace_from = match (left, right) {
      (None, _) => {
        self.transplant(z, right);
        parent
      }
      (_, None) => {
        self.transplant(z, left);
        parent
      }
      (Some(l), Some(r)) => {
        // Splice in the in-order successor. Nodes are relinked rather than
        // swapping payloads so that every other handle stays valid.
        let y = self.min_from(r);
        let retrace_from = if y == r {
          Some(y)
        } else {
          let y_parent = self.node(y).parent;
          let y_right = self.node(y).right;
          self.transplant(y, y_right);
          self.node_mut(y).right = Some(r);
          self.node_mut(r).parent = Some(y);
          y_parent
        };
        self.transplant(z, Some(y));
        self.node_mut(y).left = Some(l);
        self.node_mut(l).parent = Some(y);
        retrace_from
      }
    };
    self.len -= 1;
    let node = self.release(z);
    self.retrace(retrace_from);
    Ok((node.key, node.value))
  }

  /// $O(\log n)$ Handle of the entry whose key compares equal to `key`.
  pub fn find(&self, key: &K) -> Option<Handle> {
    let mut cursor = self.root;
    while let Some(id) = cursor {
      let node = self.node(id);
      cursor = match (self.cmp)(key, &node.key) {
        Ordering::Less => node.left,
        Ordering::Greater => node.right,
        Ordering::Equal => return Some(self.handle(id)),
      };
    }
    None
  }

  /// $O(1)$ Key and value of a live entry, or `None` for a stale handle.
  pub fn get(&self, handle: Handle) -> Option<(&K, &V)> {
    let node = self.node(self.live(handle)?);
    Some((&node.key, &node.value))
  }

  pub fn contains(&self, handle: Handle) -> bool {
    self.live(handle).is_some()
  }

  /// # Panics
  ///
  /// Panics if the handle is stale.
  pub fn key(&self, handle: Handle) -> &K {
    &self.node(self.live_or_panic(handle)).key
  }

  /// # Panics
  ///
  /// Panics if the handle is stale.
  pub fn value(&self, handle: Handle) -> &V {
    &self.node(self.live_or_panic(handle)).value
  }

  /// $O(\log n)$ Entry with the smallest key.
  pub fn first(&self) -> Result<Handle, Error> {
    let root = self.root.ok_or(Error::EmptyTree)?;
    Ok(self.handle(self.min_from(root)))
  }

  /// $O(\log n)$ Entry with the largest key.
  pub fn last(&self) -> Result<Handle, Error> {
    let root = self.root.ok_or(Error::EmptyTree)?;
    Ok(self.handle(self.max_from(root)))
  }

  /// $O(\log n)$ Circular successor: the entry after the last is the first.
  ///
  /// # Panics
  ///
  /// Panics if the handle is stale and the tree is not empty.
  pub fn after(&self, handle: Handle) -> Result<Handle, Error> {
    if self.is_empty() {
      return Err(Error::EmptyTree);
    }
    let id = self.live_or_panic(handle);
    match self.next_id(id) {
      Some(next) => Ok(self.handle(next)),
      None => self.first(),
    }
  }

  /// $O(\log n)$ Circular predecessor: the entry before the first is the last.
  ///
  /// # Panics
  ///
  /// Panics if the handle is stale and the tree is not empty.
  pub fn before(&self, handle: Handle) -> Result<Handle, Error> {
    if self.is_empty() {
      return Err(Error::EmptyTree);
    }
    let id = self.live_or_panic(handle);
    match self.prev_id(id) {
      Some(prev) => Ok(self.handle(prev)),
      None => self.last(),
    }
  }

  /// Remove every entry. All outstanding handles become stale.
  pub fn clear(&mut self) {
    self.free.clear();
    for (index, slot) in self.slots.iter_mut().enumerate().rev() {
      if slot.node.take().is_some() {
        slot.generation = slot.generation.wrapping_add(1);
      }
      self.free.push(index);
    }
    self.root = None;
    self.len = 0;
  }

  /// Entries in key order, starting at [`first`](CircularTree::first).
  pub fn iter(&self) -> Iter<'_, K, V, C> {
    Iter {
      handles: self.handles(),
    }
  }

  /// Handles in key order, starting at [`first`](CircularTree::first).
  pub fn handles(&self) -> Handles<'_, K, V, C> {
    Handles {
      tree: self,
      next: self.root.map(|root| self.min_from(root)),
      remaining: self.len,
    }
  }

  /////////////////////////////////////////////////////////////////////////////
  // Arena

  fn handle(&self, id: usize) -> Handle {
    Handle {
      index: id,
      generation: self.slots[id].generation,
    }
  }

  fn live(&self, handle: Handle) -> Option<usize> {
    let slot = self.slots.get(handle.index)?;
    if slot.generation == handle.generation && slot.node.is_some() {
      Some(handle.index)
    } else {
      None
    }
  }

  fn live_or_panic(&self, handle: Handle) -> usize {
    match self.live(handle) {
      Some(id) => id,
      None => panic!("{}: {:?}", Error::StaleHandle, handle),
    }
  }

  fn node(&self, id: usize) -> &Node<K, V> {
    match &self.slots[id].node {
      Some(node) => node,
      None => unreachable!("vacant slot {} is linked into the tree", id),
    }
  }

  fn node_mut(&mut self, id: usize) -> &mut Node<K, V> {
    match &mut self.slots[id].node {
      Some(node) => node,
      None => unreachable!("vacant slot {} is linked into the tree", id),
    }
  }

  fn alloc(&mut self, node: Node<K, V>) -> usize {
    match self.free.pop() {
      Some(id) => {
        self.slots[id].node = Some(node);
        id
      }
      None => {
        self.slots.push(Slot {
          generation: 0,
          node: Some(node),
        });
        self.slots.len() - 1
      }
    }
  }

  fn release(&mut self, id: usize) -> Node<K, V> {
    let slot = &mut self.slots[id];
    slot.generation = slot.generation.wrapping_add(1);
    let node = match slot.node.take() {
      Some(node) => node,
      None => unreachable!("slot {} released twice", id),
    };
    self.free.push(id);
    node
  }

  /////////////////////////////////////////////////////////////////////////////
  // Navigation

  fn min_from(&self, mut id: usize) -> usize {
    while let Some(left) = self.node(id).left {
      id = left;
    }
    id
  }

  fn max_from(&self, mut id: usize) -> usize {
    while let Some(right) = self.node(id).right {
      id = right;
    }
    id
  }

  fn next_id(&self, id: usize) -> Option<usize> {
    if let Some(right) = self.node(id).right {
      return Some(self.min_from(right));
    }
    let mut child = id;
    let mut cursor = self.node(id).parent;
    while let Some(parent) = cursor {
      if self.node(parent).left == Some(child) {
        return Some(parent);
      }
      child = parent;
      cursor = self.node(parent).parent;
    }
    None
  }

  fn prev_id(&self, id: usize) -> Option<usize> {
    if let Some(left) = self.node(id).left {
      return Some(self.max_from(left));
    }
    let mut child = id;
    let mut cursor = self.node(id).parent;
    while let Some(parent) = cursor {
      if self.node(parent).right == Some(child) {
        return Some(parent);
      }
      child = parent;
      cursor = self.node(parent).parent;
    }
    None
  }

  /////////////////////////////////////////////////////////////////////////////
  // Balancing

  fn height(&self, id: Option<usize>) -> i32 {
    id.map_or(0, |id| i32::from(self.node(id).height))
  }

  fn balance_factor(&self, id: usize) -> i32 {
    let node = self.node(id);
    self.height(node.left) - self.height(node.right)
  }

  fn update_height(&mut self, id: usize) {
    let node = self.node(id);
    let height = 1 + self.height(node.left).max(self.height(node.right));
    // AVL trees with 2^64 nodes are less than 100 levels deep.
    self.node_mut(id).height = height as u8;
  }

  // Replace the subtree rooted at `old` with the subtree rooted at `new`.
  fn transplant(&mut self, old: usize, new: Option<usize>) {
    let parent = self.node(old).parent;
    match parent {
      None => self.root = new,
      Some(p) => {
        let node = self.node_mut(p);
        if node.left == Some(old) {
          node.left = new;
        } else {
          node.right = new;
        }
      }
    }
    if let Some(child) = new {
      self.node_mut(child).parent = parent;
    }
  }

  fn rotate_left(&mut self, x: usize) -> usize {
    let y = match self.node(x).right {
      Some(y) => y,
      None => unreachable!("left rotation without a right child"),
    };
    let inner = self.node(y).left;
    self.node_mut(x).right = inner;
    if let Some(inner) = inner {
      self.node_mut(inner).parent = Some(x);
    }
    self.transplant(x, Some(y));
    self.node_mut(y).left = Some(x);
    self.node_mut(x).parent = Some(y);
    self.update_height(x);
    self.update_height(y);
    y
  }

  fn rotate_right(&mut self, x: usize) -> usize {
    let y = match self.node(x).left {
      Some(y) => y,
      None => unreachable!("right rotation without a left child"),
    };
    let inner = self.node(y).right;
    self.node_mut(x).left = inner;
    if let Some(inner) = inner {
      self.node_mut(inner).parent = Some(x);
    }
    self.transplant(x, Some(y));
    self.node_mut(y).right = Some(x);
    self.node_mut(x).parent = Some(y);
    self.update_height(x);
    self.update_height(y);
    y
  }

  // Restore the AVL property at `id`. Returns the new root of the subtree.
  fn rebalance(&mut self, id: usize) -> usize {
    self.update_height(id);
    let balance = self.balance_factor(id);
    if balance > 1 {
      if let Some(left) = self.node(id).left {
        if self.balance_factor(left) < 0 {
          self.rotate_left(left);
        }
      }
      self.rotate_right(id)
    } else if balance < -1 {
      if let Some(right) = self.node(id).right {
        if self.balance_factor(right) > 0 {
          self.rotate_right(right);
        }
      }
      self.rotate_left(id)
    } else {
      id
    }
  }

  fn retrace(&mut self, mut cursor: Option<usize>) {
    while let Some(id) = cursor {
      let top = self.rebalance(id);
      cursor = self.node(top).parent;
    }
  }

  #[cfg(test)]
  fn validate(&self) -> Result<(), String> {
    fn walk<K, V, C>(tree: &CircularTree<K, V, C>, id: usize, parent: Option<usize>) -> Result<i32, String>
    where
      C: Fn(&K, &K) -> Ordering,
    {
      let node = tree.node(id);
      if node.parent != parent {
        return Err(format!("bad parent link at {}", id));
      }
      let lh = match node.left {
        Some(l) => walk(tree, l, Some(id))?,
        None => 0,
      };
      let rh = match node.right {
        Some(r) => walk(tree, r, Some(id))?,
        None => 0,
      };
      if (lh - rh).abs() > 1 {
        return Err(format!("unbalanced at {}", id));
      }
      if i32::from(node.height) != 1 + lh.max(rh) {
        return Err(format!("stale height at {}", id));
      }
      Ok(1 + lh.max(rh))
    }
    if let Some(root) = self.root {
      walk(self, root, None)?;
    }
    let keys: Vec<&K> = self.iter().map(|(k, _)| k).collect();
    if keys.len() != self.len {
      return Err("length mismatch".to_string());
    }
    if keys.windows(2).any(|w| (self.cmp)(w[0], w[1]) != Ordering::Less) {
      return Err("keys out of order".to_string());
    }
    Ok(())
  }
}

impl<K, V, C> Index<Handle> for CircularTree<K, V, C>
where
  C: Fn(&K, &K) -> Ordering,
{
  type Output = V;
  fn index(&self, handle: Handle) -> &V {
    self.value(handle)
  }
}

impl<'a, K, V, C> IntoIterator for &'a CircularTree<K, V, C>
where
  C: Fn(&K, &K) -> Ordering,
{
  type Item = (&'a K, &'a V);
  type IntoIter = Iter<'a, K, V, C>;
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for CircularTree<K, V, C>
where
  C: Fn(&K, &K) -> Ordering,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.iter()).finish()
  }
}

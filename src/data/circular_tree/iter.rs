use std::cmp::Ordering;
use std::iter::FusedIterator;

use super::{CircularTree, Handle};

/// Entries of a [`CircularTree`] in key order.
///
/// Borrowing the tree keeps it from being mutated for as long as the
/// iterator lives.
pub struct Iter<'a, K, V, C> {
  pub(crate) handles: Handles<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C>
where
  C: Fn(&K, &K) -> Ordering,
{
  type Item = (&'a K, &'a V);
  fn next(&mut self) -> Option<Self::Item> {
    let tree = self.handles.tree;
    let handle = self.handles.next()?;
    let node = tree.node(handle.index);
    Some((&node.key, &node.value))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.handles.size_hint()
  }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> where C: Fn(&K, &K) -> Ordering {}
impl<K, V, C> FusedIterator for Iter<'_, K, V, C> where C: Fn(&K, &K) -> Ordering {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
  fn clone(&self) -> Self {
    Iter {
      handles: self.handles.clone(),
    }
  }
}

/// Handles of a [`CircularTree`] in key order.
pub struct Handles<'a, K, V, C> {
  pub(crate) tree: &'a CircularTree<K, V, C>,
  pub(crate) next: Option<usize>,
  pub(crate) remaining: usize,
}

impl<K, V, C> Iterator for Handles<'_, K, V, C>
where
  C: Fn(&K, &K) -> Ordering,
{
  type Item = Handle;
  fn next(&mut self) -> Option<Handle> {
    let id = self.next?;
    self.next = self.tree.next_id(id);
    self.remaining -= 1;
    Some(self.tree.handle(id))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<K, V, C> ExactSizeIterator for Handles<'_, K, V, C> where C: Fn(&K, &K) -> Ordering {}
impl<K, V, C> FusedIterator for Handles<'_, K, V, C> where C: Fn(&K, &K) -> Ordering {}

impl<K, V, C> Clone for Handles<'_, K, V, C> {
  fn clone(&self) -> Self {
    Handles {
      tree: self.tree,
      next: self.next,
      remaining: self.remaining,
    }
  }
}

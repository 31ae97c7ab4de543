use crate::{interval::Interval, node::Node};

/// An [`Iterator`] that performs a depth-first, pre-order walk of a subtree
/// and yields every stored [`Interval`].
///
/// The intervals of each node are yielded ordered by lower bound, before
/// those of its left and then right subtree.
#[derive(Debug)]
pub(crate) struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    current: std::slice::Iter<'a, Interval<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
            current: <&[Interval<T>]>::default().iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(v) = self.current.next() {
                return Some(v);
            }

            let n = self.stack.pop()?;

            // Push the right child first so the left subtree is visited next.
            self.stack.extend(n.right());
            self.stack.extend(n.left());

            self.current = n.overlap_by_start().iter();
        }
    }
}

//! Iteration over the entries of a list, in call order.

use crate::{list::owned::MulticastList, markers::PolicyMarker};

/// Iterator over the entries of a [`MulticastList`], in call order.
///
/// Created by [`MulticastList::iter`].
pub type Iter<'a, E> = core::slice::Iter<'a, E>;

impl<'a, E, P> IntoIterator for &'a MulticastList<E, P>
where
    P: PolicyMarker,
{
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E, P> FromIterator<E> for MulticastList<E, P>
where
    P: PolicyMarker,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<E, P> Extend<E> for MulticastList<E, P>
where
    E: Clone,
    P: PolicyMarker,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.append(iter);
    }
}

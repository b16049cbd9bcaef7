//! Invoking a list.
//!
//! A list is either **empty** or **non-empty**, and that is the only state
//! invocation looks at:
//!
//! - An empty list defers to its policy: [`Strict`](crate::markers::Strict)
//!   panics, [`Permissive`](crate::markers::Permissive) returns
//!   `Output::default()` without touching the arguments.
//! - A non-empty list calls its entries one after the other, in list order,
//!   each exactly once, all with the same `&mut Args`. Each entry sees the
//!   changes the previous ones made to the arguments.
//!
//! The first entry returning `Err` ends the invocation. Its error is returned
//! as is, the remaining entries are skipped, and whatever the earlier entries
//! did stays done. Nothing is retried or rolled back. If all entries succeed,
//! the result is the output of the last entry; earlier outputs are dropped.

use alloc::vec::Vec;

use crate::{
    Callable,
    list::owned::MulticastList,
    markers::{EmptyPolicy, PolicyMarker},
};

impl<E, P> MulticastList<E, P>
where
    P: PolicyMarker,
{
    /// Invokes every entry in order and returns the last entry's output.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty and the policy is
    /// [`Strict`](crate::markers::Strict).
    ///
    /// # Examples
    ///
    /// ```
    /// use multicast::{StrictList, callable::Method};
    ///
    /// fn push(token: &&'static str, log: &mut Vec<&'static str>) -> Result<usize, ()> {
    ///     log.push(*token);
    ///     Ok(log.len())
    /// }
    ///
    /// let list: StrictList<_> = [Method::new("1", push), Method::new("2", push)]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let mut log = Vec::new();
    /// assert_eq!(list.invoke(&mut log), Ok(2));
    /// assert_eq!(log, ["1", "2"]);
    /// ```
    ///
    /// A failing entry stops the invocation:
    ///
    /// ```
    /// use multicast::{StrictList, callable::Method};
    ///
    /// fn step(step: &Option<u8>, log: &mut Vec<u8>) -> Result<(), &'static str> {
    ///     let value = step.ok_or("boom")?;
    ///     log.push(value);
    ///     Ok(())
    /// }
    ///
    /// let list: StrictList<_> = [
    ///     Method::new(Some(1), step),
    ///     Method::new(None, step),
    ///     Method::new(Some(3), step),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let mut log = Vec::new();
    /// assert_eq!(list.invoke(&mut log), Err("boom"));
    /// assert_eq!(log, [1]);
    /// ```
    #[track_caller]
    pub fn invoke<Args>(&self, args: &mut Args) -> Result<E::Output, E::Error>
    where
        Args: ?Sized,
        E: Callable<Args>,
        P: EmptyPolicy<E::Output>,
    {
        match dispatch(self.entries(), args) {
            Some(result) => result,
            None => Ok(P::on_empty()),
        }
    }

    /// Invokes the list with arguments passed by value.
    ///
    /// Equivalent to [`invoke`](Self::invoke) for signatures whose arguments
    /// are not used to return anything.
    #[track_caller]
    pub fn invoke_with<Args>(&self, mut args: Args) -> Result<E::Output, E::Error>
    where
        E: Callable<Args>,
        P: EmptyPolicy<E::Output>,
    {
        self.invoke(&mut args)
    }

    /// Invokes the list, returning `None` instead of consulting the policy
    /// when it is empty.
    ///
    /// This never panics on its own, regardless of the policy.
    pub fn try_invoke<Args>(&self, args: &mut Args) -> Option<Result<E::Output, E::Error>>
    where
        Args: ?Sized,
        E: Callable<Args>,
    {
        dispatch(self.entries(), args)
    }

    /// Invokes every entry in order and returns all outputs, in order.
    ///
    /// Ordering and failure handling are the same as for
    /// [`invoke`](Self::invoke): the first error is returned and the
    /// remaining entries are skipped. An empty list defers to the policy,
    /// which for [`Permissive`](crate::markers::Permissive) means an empty
    /// vector.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty and the policy is
    /// [`Strict`](crate::markers::Strict).
    #[track_caller]
    pub fn invoke_collect<Args>(&self, args: &mut Args) -> Result<Vec<E::Output>, E::Error>
    where
        Args: ?Sized,
        E: Callable<Args>,
        P: EmptyPolicy<Vec<E::Output>>,
    {
        if self.is_empty() {
            return Ok(P::on_empty());
        }

        let mut outputs = Vec::with_capacity(self.len());
        for (index, entry) in self.iter().enumerate() {
            match entry.call(args) {
                Ok(output) => outputs.push(output),
                Err(error) => {
                    trace_event!(debug, "entry failed, skipping the remaining entries", index);
                    return Err(error);
                }
            }
        }
        Ok(outputs)
    }
}

/// Calls `entries` in order, stopping at the first error.
///
/// Returns `None` when `entries` is empty.
fn dispatch<E, Args>(entries: &[E], args: &mut Args) -> Option<Result<E::Output, E::Error>>
where
    Args: ?Sized,
    E: Callable<Args>,
{
    let mut last = None;
    for (index, entry) in entries.iter().enumerate() {
        match entry.call(args) {
            Ok(output) => last = Some(output),
            Err(error) => {
                trace_event!(debug, "entry failed, skipping the remaining entries", index);
                return Some(Err(error));
            }
        }
    }
    last.map(Ok)
}

/// A list is itself an entry, so lists can be nested.
impl<E, P, Args> Callable<Args> for MulticastList<E, P>
where
    Args: ?Sized,
    E: Callable<Args>,
    P: EmptyPolicy<E::Output>,
{
    type Output = E::Output;
    type Error = E::Error;

    #[track_caller]
    fn call(&self, args: &mut Args) -> Result<E::Output, E::Error> {
        self.invoke(args)
    }
}

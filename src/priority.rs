//! Priority ordering shared by both strategy kinds

use std::cmp::Reverse;

/// Sort strategies by descending priority. The sort is stable, so
/// strategies of equal priority keep their registration order, including
/// repeated registrations of the same strategy type.
pub(crate) fn sort_by_priority<T: ?Sized>(items: &mut [Box<T>], priority: impl Fn(&T) -> i32) {
    items.sort_by_key(|item| Reverse(priority(&**item)));
}

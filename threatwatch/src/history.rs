//! Small utilities to manage bounded buffers for the feed and charts.

use std::collections::VecDeque;

/// Append to the back, evicting from the front once `cap` is reached.
/// Used for chart series where the newest sample belongs at the end.
pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Prepend to the front, evicting from the back once `cap` is exceeded.
/// Used for the threat log where the newest event belongs at index 0.
pub fn prepend_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    dq.push_front(v);
    dq.truncate(cap);
}

//! Comprehensive tests for cursors and iterators
//!
//! 游标与迭代器的全面测试

use crate::{Position, RingBuf, RingBufError};

/// Window [2, 3, 4] in a capacity-3 buffer, physically wrapped.
fn wrapped_full() -> RingBuf<i32> {
    let mut buf: RingBuf<i32> = RingBuf::with_capacity(3);
    for v in [1, 2, 3, 4] {
        buf.push(v).unwrap();
    }
    buf
}

// ============================================================================
// SEGMENT 1: Begin / end disambiguation
// 第1段：begin / end 消歧
// ============================================================================

#[test]
fn test_empty_buffer_begin_equals_end() {
    let buf: RingBuf<i32> = RingBuf::with_capacity(3);
    assert_eq!(buf.begin(), buf.end());
    assert!(buf.begin().is_end());
}

#[test]
fn test_full_buffer_begin_differs_from_end() {
    let buf = wrapped_full();
    // Both map to the same physical slot, yet the traversal must run.
    assert_ne!(buf.begin(), buf.end());
    assert!(buf.begin() < buf.end());
}

#[test]
fn test_traversal_visits_every_element_once() {
    let buf = wrapped_full();
    let mut cur = buf.begin();
    let mut seen = Vec::new();
    while cur != buf.end() {
        seen.push(*buf.get(cur).unwrap());
        cur.advance();
    }
    assert_eq!(seen, [2, 3, 4]);
}

#[test]
fn test_position_accessors() {
    let buf: RingBuf<i32> = [1, 2].into();
    assert_eq!(buf.begin().position(), Position::AtOffset(0));
    assert_eq!(buf.end().position(), Position::End);
    assert_eq!(buf.begin().offset(), 0);
    assert_eq!(buf.end().offset(), 2);
    assert!(buf.end().is_end());
    assert!(!buf.begin().is_end());
}

#[test]
fn test_stepped_cursor_reaching_len_equals_end() {
    let buf: RingBuf<i32> = [1, 2].into();
    let cur = buf.begin() + 2;
    assert_eq!(cur, buf.end());
    assert_eq!(cur.position(), Position::AtOffset(2));
}

// ============================================================================
// SEGMENT 2: Dereference and physical wraparound
// 第2段：解引用与物理回绕
// ============================================================================

#[test]
fn test_get_in_logical_order() {
    let buf = wrapped_full();
    assert_eq!(buf.get(buf.begin()), Ok(&2));
    assert_eq!(buf.get(buf.begin() + 1), Ok(&3));
    assert_eq!(buf.get(buf.begin() + 2), Ok(&4));
}

#[test]
fn test_get_past_end_wraps_physically() {
    let buf: RingBuf<i32> = [1, 2, 3].into();
    // Offset len on a full buffer lands back on the oldest element.
    assert_eq!(buf.get(buf.begin() + 3), Ok(&1));
    assert_eq!(buf.get(buf.begin() + 4), Ok(&2));
    assert_eq!(buf.get(buf.end()), Ok(&1));
}

#[test]
fn test_get_offset_relative_to_moved_cursor() {
    let buf: RingBuf<i32> = [1, 2, 3].into();
    let cur = buf.begin() + 1;
    assert_eq!(buf.get(cur + 1), Ok(&3));
    // One more step wraps around to the start.
    assert_eq!(buf.get(cur + 2), Ok(&1));
}

#[test]
fn test_get_dead_slot_fails() {
    let mut buf: RingBuf<i32> = RingBuf::with_capacity(5);
    buf.push(1).unwrap();
    buf.push(2).unwrap();
    // Offsets 2..5 are allocated but hold no elements.
    assert_eq!(buf.get(buf.begin() + 2), Err(RingBufError::PositionNotFound));
    assert_eq!(buf.get(buf.end()), Err(RingBufError::PositionNotFound));
}

#[test]
fn test_get_on_empty_fails() {
    let buf: RingBuf<i32> = RingBuf::with_capacity(3);
    assert_eq!(buf.get(buf.begin()), Err(RingBufError::PositionNotFound));

    let none: RingBuf<i32> = RingBuf::new();
    assert_eq!(none.get(none.begin()), Err(RingBufError::PositionNotFound));
}

#[test]
fn test_get_mut_writes_through() {
    let mut buf = wrapped_full();
    *buf.get_mut(buf.begin() + 1).unwrap() = 30;
    assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [2, 30, 4]);
}

// ============================================================================
// SEGMENT 3: Arithmetic, ordering, difference
// 第3段：算术、排序、差值
// ============================================================================

#[test]
fn test_add_is_commutative_with_usize() {
    let buf: RingBuf<i32> = [1, 2, 3].into();
    assert_eq!(buf.begin() + 2, 2 + buf.begin());
}

#[test]
fn test_sub_wraps_below_start() {
    let buf: RingBuf<i32> = [1, 2, 3].into();
    // Stepping back from the start wraps to the last slot, modulo capacity.
    assert_eq!((buf.begin() - 1).offset(), 2);
    assert_eq!((buf.begin() - 3).offset(), 0);
    assert_eq!((buf.begin() - 4).offset(), 2);
    assert_eq!(((buf.begin() + 1) - 2).offset(), 2);
}

#[test]
fn test_compound_assignment() {
    let buf: RingBuf<i32> = [1, 2, 3].into();
    let mut cur = buf.begin();
    cur += 2;
    assert_eq!(buf.get(cur), Ok(&3));
    cur -= 1;
    assert_eq!(buf.get(cur), Ok(&2));
}

#[test]
fn test_advance_and_retreat() {
    let buf: RingBuf<i32> = [1, 2, 3].into();
    let mut cur = buf.begin();
    cur.advance();
    cur.advance();
    assert_eq!(buf.get(cur), Ok(&3));
    cur.retreat();
    assert_eq!(buf.get(cur), Ok(&2));

    // Retreating from the start wraps.
    let mut cur = buf.begin();
    cur.retreat();
    assert_eq!(cur.offset(), 2);
}

#[test]
fn test_difference_is_logical_distance() {
    let buf = wrapped_full();
    // The window straddles the physical boundary; raw address subtraction
    // would get this wrong.
    assert_eq!(buf.end() - buf.begin(), 3);
    assert_eq!((buf.begin() + 2) - buf.begin(), 2);
    assert_eq!(buf.begin() - (buf.begin() + 2), -2);
    assert_eq!(buf.begin() - buf.begin(), 0);
}

#[test]
fn test_total_order_by_logical_offset() {
    let buf = wrapped_full();
    let a = buf.begin();
    let b = buf.begin() + 1;
    let e = buf.end();
    assert!(a < b && b < e);
    assert!(e > a);
    assert!(a <= a && a >= a);
    assert_eq!(a.max(b), b);
}

// ============================================================================
// SEGMENT 4: Staleness
// 第4段：失效
// ============================================================================

#[test]
fn test_cursor_survives_eviction_push() {
    let mut buf: RingBuf<i32> = [1, 2, 3].into();
    let cur = buf.begin();
    // Eviction reuses the allocation, so the cursor stays valid and now
    // denotes the new oldest element.
    buf.push(4).unwrap();
    assert_eq!(buf.get(cur), Ok(&2));
}

#[test]
fn test_cursor_stale_after_reallocation() {
    let mut buf: RingBuf<i32> = [1, 2, 3].into();
    let cur = buf.begin() + 1;
    buf.insert(buf.end(), 4).unwrap(); // full, so this rebuilds
    assert_eq!(buf.get(cur), Err(RingBufError::StaleCursor));
    assert_eq!(buf.get_mut(cur).unwrap_err(), RingBufError::StaleCursor);
}

#[test]
fn test_stale_is_reported_before_position_checks() {
    let mut buf: RingBuf<i32> = [1, 2, 3].into();
    let wild = buf.begin() + 100;
    buf.reserve(10);
    // Generation mismatch wins over the out-of-window offset.
    assert_eq!(buf.get(wild), Err(RingBufError::StaleCursor));
}

// ============================================================================
// SEGMENT 5: Iterators
// 第5段：迭代器
// ============================================================================

#[test]
fn test_iter_logical_order_over_wrap() {
    let buf = wrapped_full();
    assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
}

#[test]
fn test_iter_rev() {
    let buf = wrapped_full();
    assert_eq!(buf.iter().rev().copied().collect::<Vec<_>>(), [4, 3, 2]);
}

#[test]
fn test_iter_exact_size_and_fused() {
    let buf = wrapped_full();
    let mut iter = buf.iter();
    assert_eq!(iter.len(), 3);
    iter.next();
    assert_eq!(iter.len(), 2);
    iter.by_ref().for_each(drop);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iter_clone_is_independent() {
    let buf = wrapped_full();
    let mut a = buf.iter();
    a.next();
    let mut b = a.clone();
    assert_eq!(a.next(), b.next());
    assert_eq!(a.len(), b.len());
}

#[test]
fn test_iter_mut_mutates_in_place() {
    let mut buf = wrapped_full();
    for v in buf.iter_mut() {
        *v *= 10;
    }
    assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [20, 30, 40]);
}

#[test]
fn test_iter_mut_double_ended() {
    let mut buf = wrapped_full();
    let mut iter = buf.iter_mut();
    *iter.next().unwrap() = 0;
    *iter.next_back().unwrap() = 9;
    drop(iter);
    assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [0, 3, 9]);
}

#[test]
fn test_into_iter_drains_oldest_first() {
    let buf = wrapped_full();
    assert_eq!(buf.into_iter().collect::<Vec<_>>(), [2, 3, 4]);
}

#[test]
fn test_into_iter_size_hint() {
    let buf: RingBuf<i32> = [1, 2, 3].into();
    let mut iter = buf.into_iter();
    assert_eq!(iter.size_hint(), (3, Some(3)));
    iter.next();
    assert_eq!(iter.size_hint(), (2, Some(2)));
}

#[test]
fn test_for_loops_over_references() {
    let mut buf = wrapped_full();
    let mut sum = 0;
    for v in &buf {
        sum += *v;
    }
    assert_eq!(sum, 9);

    for v in &mut buf {
        *v += 1;
    }
    assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [3, 4, 5]);
}

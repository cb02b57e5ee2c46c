//! Algorithm-style usage tests: searching, folding, sorting and rewriting
//! through cursors, iterators and the contiguous-slice escape hatch.
//!
//! 算法风格的使用测试：通过游标、迭代器与连续切片出口进行查找、折叠、
//! 排序与改写。

use circbuf::{GrowRingBuf, RingBuf, RingBufError};

/// Capacity-5 buffer pushed past capacity so the window [4, 5, 6, 7, 8]
/// straddles the physical boundary.
fn wrapped_window() -> RingBuf<i32> {
    let mut buf: RingBuf<i32> = RingBuf::with_capacity(5);
    for v in 1..=8 {
        buf.push(v).unwrap();
    }
    buf
}

#[test]
fn find_by_predicate_over_wrapped_window() {
    let buf = wrapped_window();
    assert_eq!(buf.iter().position(|&v| v == 6), Some(2));
    assert_eq!(buf.iter().position(|&v| v == 1), None);
    assert_eq!(buf.iter().find(|&&v| v % 4 == 0), Some(&4));
}

#[test]
fn find_with_cursor_loop() {
    let buf = wrapped_window();
    let mut cur = buf.begin();
    while cur != buf.end() {
        if *buf.get(cur).unwrap() == 7 {
            break;
        }
        cur.advance();
    }
    assert_ne!(cur, buf.end());
    assert_eq!(cur - buf.begin(), 3);
}

#[test]
fn count_and_fold() {
    let buf = wrapped_window();
    assert_eq!(buf.iter().filter(|&&v| v % 2 == 0).count(), 3);
    assert_eq!(buf.iter().sum::<i32>(), 30);
    assert_eq!(buf.iter().fold(0, |acc, &v| acc * 10 + v), 45678);
}

#[test]
fn min_max_over_wrapped_window() {
    let buf = wrapped_window();
    assert_eq!(buf.iter().min(), Some(&4));
    assert_eq!(buf.iter().max(), Some(&8));
}

#[test]
fn reverse_traversal() {
    let buf = wrapped_window();
    let backwards: Vec<i32> = buf.iter().rev().copied().collect();
    assert_eq!(backwards, [8, 7, 6, 5, 4]);
}

#[test]
fn sort_wrapped_window_in_place() {
    let mut buf: RingBuf<i32> = RingBuf::with_capacity(5);
    for v in [9, 3, 7, 1, 8, 5, 2] {
        buf.push(v).unwrap();
    }
    // Window [7, 1, 8, 5, 2] is wrapped; linearize, then sort the slice.
    buf.make_contiguous().sort_unstable();
    assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 2, 5, 7, 8]);
}

#[test]
fn binary_search_after_linearizing() {
    let mut buf = wrapped_window();
    let slice = buf.make_contiguous();
    assert_eq!(slice.binary_search(&6), Ok(2));
    assert!(slice.binary_search(&1).is_err());
}

#[test]
fn rewrite_elements_through_iter_mut() {
    let mut buf = wrapped_window();
    for v in buf.iter_mut() {
        *v = -*v;
    }
    assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [-4, -5, -6, -7, -8]);
}

#[test]
fn drain_into_vec_and_reuse() {
    let buf = wrapped_window();
    let drained: Vec<i32> = buf.into_iter().collect();
    assert_eq!(drained, [4, 5, 6, 7, 8]);

    let rebuilt: RingBuf<i32> = drained.into_iter().map(|v| v * 2).collect();
    assert_eq!(rebuilt.iter().copied().collect::<Vec<_>>(), [8, 10, 12, 14, 16]);
}

#[test]
fn remove_matching_elements_with_erase_loop() {
    let mut buf: RingBuf<i32> = [1, 2, 3, 4, 5, 6].into();
    // Erase returns the cursor after the removal, so the loop re-reads it
    // rather than advancing past a shifted element.
    let mut cur = buf.begin();
    while cur != buf.end() {
        if *buf.get(cur).unwrap() % 2 == 0 {
            cur = buf.erase(cur).unwrap();
        } else {
            cur.advance();
        }
    }
    assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 3, 5]);
    assert_eq!(buf.capacity(), 6);
}

#[test]
fn sliding_window_statistics() {
    // The classic use case: a fixed window over an unbounded feed.
    let mut window: RingBuf<f64> = RingBuf::with_capacity(4);
    let mut averages = Vec::new();
    for sample in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0] {
        window.push(sample).unwrap();
        let mean = window.iter().sum::<f64>() / window.len() as f64;
        averages.push(mean);
    }
    assert_eq!(averages, [1.0, 1.5, 2.0, 2.5, 3.5, 4.5]);
}

#[test]
fn unbounded_log_with_grow_policy() {
    let mut log: GrowRingBuf<String> = GrowRingBuf::new();
    for i in 0..100 {
        log.push(format!("event-{i}")).unwrap();
    }
    assert_eq!(log.len(), 100);
    assert_eq!(log.capacity(), 128);
    assert_eq!(log.front().map(String::as_str), Some("event-0"));
    assert_eq!(log.back().map(String::as_str), Some("event-99"));
}

#[test]
fn cursor_errors_surface_through_std_error() {
    let buf: RingBuf<i32> = RingBuf::with_capacity(2);
    let err = buf.get(buf.begin()).unwrap_err();
    assert_eq!(err, RingBufError::PositionNotFound);
    assert_eq!(err.to_string(), "position not found");

    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert_eq!(boxed.to_string(), "position not found");
}

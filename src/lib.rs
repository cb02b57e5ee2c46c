//! # circbuf
//!
//! Single-threaded ring buffer with a compile-time on-full policy and
//! random-access, wraparound-aware cursors.
//!
//! 单线程环形缓冲区，带有编译期满载策略与感知回绕的随机访问游标。
//!
//! ## Features / 特性
//!
//! - **Two on-full policies, one type / 两种满载策略，同一类型**:
//!   [`RingBuf<T>`] evicts the oldest element when full and hands it back;
//!   [`GrowRingBuf<T>`] doubles its allocation instead. The policy is a
//!   const generic, so there is no dynamic dispatch anywhere.
//! - **Detached cursors / 脱离式游标**: [`Cursor`] is a `Copy` logical
//!   position with pointer-style arithmetic and ordering. A generation
//!   counter makes cursors from before a reallocation detectably stale
//!   ([`RingBufError::StaleCursor`]) instead of dangling.
//! - **Full-buffer disambiguation / 满载消歧**: on a full buffer
//!   `begin()` and `end()` share a physical slot yet compare unequal, so
//!   `!=`-terminated traversals visit every element exactly once.
//! - **Positional editing / 位置编辑**: insert (single, repeated, from an
//!   iterator), erase (single, range), assign, resize - all transactional:
//!   a failed operation leaves the buffer untouched.
//! - **Slice escape hatch / 切片出口**: [`RingBuf::make_contiguous`]
//!   linearizes the window so slice algorithms apply directly.
//!
//! ## Quick start / 快速开始
//!
//! ```
//! use circbuf::{GrowRingBuf, RingBuf};
//!
//! // Fixed capacity: the window keeps the newest 3 values.
//! let mut recent: RingBuf<i32> = RingBuf::with_capacity(3);
//! for v in 1..=4 {
//!     recent.push(v).unwrap();
//! }
//! assert_eq!(recent.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
//!
//! // Cursor traversal with wrap-aware positions.
//! let mut cur = recent.begin();
//! let mut sum = 0;
//! while cur != recent.end() {
//!     sum += recent.get(cur).unwrap();
//!     cur.advance();
//! }
//! assert_eq!(sum, 9);
//!
//! // Growing variant: never evicts, doubles instead.
//! let mut log: GrowRingBuf<&str> = GrowRingBuf::new();
//! log.push("a").unwrap();
//! log.push("b").unwrap();
//! log.push("c").unwrap();
//! assert_eq!(log.capacity(), 4);
//! ```
//!
//! ## Module overview / 模块总览
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ring`] | [`RingBuf`] / [`GrowRingBuf`] public container |
//! | [`cursor`] | [`Cursor`], [`Position`], borrowing and draining iterators |
//! | [`error`] | [`RingBufError`] taxonomy |
//!
//! ## Notes / 说明
//!
//! This crate is single-threaded by design: no atomics, no internal locks.
//! Wrap a buffer in your own synchronization if you need to share it.
//!
//! 本 crate 有意保持单线程：没有原子操作，没有内部锁。
//! 如需跨线程共享，请自行加同步层。

mod core;
pub mod cursor;
pub mod error;
pub mod ring;
mod slots;

#[cfg(test)]
mod tests;

pub use cursor::{Cursor, IntoIter, Iter, IterMut, Position};
pub use error::RingBufError;
pub use ring::{GrowRingBuf, RingBuf};

//! Random-access cursors and iterators over ring buffers
//!
//! 环形缓冲区的随机访问游标与迭代器
//!
//! A [`Cursor`] is a detached logical position, not a borrowed pointer: it
//! pairs a [`Position`] with a snapshot of the owning buffer's length,
//! capacity and reallocation generation. Elements are resolved through the
//! buffer ([`RingBuf::get`](crate::RingBuf::get) /
//! [`RingBuf::get_mut`](crate::RingBuf::get_mut)), which rejects cursors
//! whose generation has fallen behind instead of touching freed storage.
//!
//! [`Cursor`] 是脱离缓冲区的逻辑位置，而非借用的指针：它将 [`Position`]
//! 与所属缓冲区的长度、容量和重分配代数快照配对。元素通过缓冲区解析
//! （[`RingBuf::get`](crate::RingBuf::get) /
//! [`RingBuf::get_mut`](crate::RingBuf::get_mut)），代数落后的游标会被
//! 拒绝，而不是去触碰已释放的内存。
//!
//! The classic full-buffer pitfall - the oldest element and the
//! one-past-newest position occupying the same physical slot, so a naive
//! begin/end comparison terminates a traversal before it starts - is solved
//! structurally: [`Position::End`] only ever equals [`Position::AtOffset`]
//! when the offset has reached the buffer's length.
//!
//! 经典的满载陷阱 - 最旧元素与"最新之后一位"落在同一个物理槽位，
//! 朴素的 begin/end 比较会让遍历尚未开始就终止 - 在结构上被解决：
//! 只有当偏移到达缓冲区长度时，[`Position::End`] 才等于
//! [`Position::AtOffset`]。

use crate::core::RingCore;
use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::ptr::NonNull;

/// Logical position of a cursor within a buffer.
///
/// 游标在缓冲区内的逻辑位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// `k` logical steps past the oldest element.
    ///
    /// 距最旧元素 `k` 个逻辑步。
    AtOffset(usize),

    /// One past the newest element.
    ///
    /// 最新元素之后一位。
    End,
}

/// Random-access cursor over a [`RingBuf`](crate::RingBuf).
///
/// Cursors support pointer-style arithmetic (`+ n`, `- n`, difference),
/// total ordering by logical offset, and equality where `end()` compares
/// unequal to `begin()` on a full buffer even though both would alias the
/// same physical slot.
///
/// [`RingBuf`](crate::RingBuf) 上的随机访问游标。
///
/// 游标支持指针风格的算术运算（`+ n`、`- n`、差值）、按逻辑偏移的全序
/// 比较，以及满载缓冲区上 `end()` 与 `begin()` 不相等的相等性判断 -
/// 即使二者映射到同一个物理槽位。
///
/// # Examples
///
/// ```
/// use circbuf::RingBuf;
///
/// let buf: RingBuf<i32> = [1, 2, 3].into();
/// let cur = buf.begin() + 1;
/// assert_eq!(buf.get(cur), Ok(&2));
/// // Offsets past the newest element wrap back around physically.
/// assert_eq!(buf.get(cur + 2), Ok(&1));
/// assert_eq!(cur - buf.begin(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    pub(crate) pos: Position,
    pub(crate) len: usize,
    pub(crate) capacity: usize,
    pub(crate) generation: u64,
}

impl Cursor {
    /// The cursor's [`Position`].
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Effective logical offset; [`Position::End`] resolves to the length
    /// snapshot taken when the cursor was created.
    ///
    /// 有效逻辑偏移；[`Position::End`] 解析为游标创建时的长度快照。
    #[inline]
    pub fn offset(&self) -> usize {
        match self.pos {
            Position::AtOffset(k) => k,
            Position::End => self.len,
        }
    }

    /// True when the cursor sits one past the newest element.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.offset() == self.len
    }

    /// Advance one logical step.
    ///
    /// 前进一个逻辑步。
    ///
    /// Advancing never wraps the offset; on a full buffer a cursor that has
    /// stepped `len` times from `begin()` compares equal to `end()`, which
    /// is what lets a `!=`-terminated traversal visit every element exactly
    /// once. Dereferencing past the end wraps physically (see
    /// [`RingBuf::get`](crate::RingBuf::get)).
    #[inline]
    pub fn advance(&mut self) {
        self.pos = Position::AtOffset(self.offset() + 1);
    }

    /// Retreat one logical step, wrapping at the start boundary.
    ///
    /// 后退一个逻辑步，在起始边界处回绕。
    #[inline]
    pub fn retreat(&mut self) {
        *self = *self - 1;
    }
}

impl PartialEq for Cursor {
    /// Cursors compare by effective logical offset. On a full buffer
    /// `begin()` (offset 0) and `end()` (offset `len`) are therefore
    /// unequal despite sharing a physical slot.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.offset() == other.offset()
    }
}

impl Eq for Cursor {}

impl PartialOrd for Cursor {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    /// Total order by logical offset, unaffected by physical wraparound.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset().cmp(&other.offset())
    }
}

impl Add<usize> for Cursor {
    type Output = Cursor;

    #[inline]
    fn add(mut self, n: usize) -> Cursor {
        self.pos = Position::AtOffset(self.offset() + n);
        self
    }
}

impl Add<Cursor> for usize {
    type Output = Cursor;

    #[inline]
    fn add(self, cursor: Cursor) -> Cursor {
        cursor + self
    }
}

impl Sub<usize> for Cursor {
    type Output = Cursor;

    fn sub(mut self, n: usize) -> Cursor {
        let offset = self.offset();
        let k = if n <= offset {
            offset - n
        } else {
            // Wrap at the start boundary, modulo capacity.
            // 在起始边界处回绕，按容量取模。
            let c = self.capacity.max(1);
            let deficit = (n - offset) % c;
            if deficit == 0 {
                0
            } else {
                c - deficit
            }
        };
        self.pos = Position::AtOffset(k);
        self
    }
}

impl AddAssign<usize> for Cursor {
    #[inline]
    fn add_assign(&mut self, n: usize) {
        *self = *self + n;
    }
}

impl SubAssign<usize> for Cursor {
    #[inline]
    fn sub_assign(&mut self, n: usize) {
        *self = *self - n;
    }
}

impl Sub<Cursor> for Cursor {
    type Output = isize;

    /// Logical distance between two cursors. Unlike raw physical-address
    /// subtraction this stays correct when the window straddles the
    /// physical wraparound.
    ///
    /// 两个游标之间的逻辑距离。与原始物理地址相减不同，
    /// 即使窗口跨越物理回绕边界，结果仍然正确。
    #[inline]
    fn sub(self, rhs: Cursor) -> isize {
        self.offset() as isize - rhs.offset() as isize
    }
}

/// Borrowing iterator over a buffer's live elements in logical order.
///
/// 按逻辑顺序借用缓冲区有效元素的迭代器。
pub struct Iter<'a, T> {
    core: &'a RingCore<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(core: &'a RingCore<T>) -> Self {
        Self {
            core,
            front: 0,
            back: core.len(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let core: &'a RingCore<T> = self.core;
        // SAFETY: front < back <= len, so the logical position is live.
        let item = unsafe { core.peek_logical(self.front) };
        self.front += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let core: &'a RingCore<T> = self.core;
        // SAFETY: front <= back < len, so the logical position is live.
        Some(unsafe { core.peek_logical(self.back) })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutably borrowing iterator over a buffer's live elements in logical
/// order.
///
/// 按逻辑顺序可变借用缓冲区有效元素的迭代器。
pub struct IterMut<'a, T> {
    core: NonNull<RingCore<T>>,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(core: &'a mut RingCore<T>) -> Self {
        let back = core.len();
        Self {
            core: NonNull::from(core),
            front: 0,
            back,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        let i = self.front;
        self.front += 1;
        // SAFETY: the buffer is exclusively borrowed for 'a and each logical
        // position is yielded at most once, so the references never alias.
        unsafe {
            let core = &mut *self.core.as_ptr();
            Some(core.peek_logical_mut(i))
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: as in `next`.
        unsafe {
            let core = &mut *self.core.as_ptr();
            Some(core.peek_logical_mut(self.back))
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Draining by-value iterator; pops elements oldest first.
///
/// 按值消费的迭代器；从最旧元素开始弹出。
pub struct IntoIter<T> {
    core: RingCore<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(core: RingCore<T>) -> Self {
        Self { core }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.core.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.core.len();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

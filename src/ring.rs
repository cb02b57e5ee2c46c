//! General ring buffer with a compile-time on-full policy
//!
//! 带有编译期满载策略的通用环形缓冲区
//!
//! This module provides the public container:
//! - [`RingBuf<T>`] - fixed capacity, evicts the oldest element when full
//! - [`GrowRingBuf<T>`] - doubles its allocation instead of evicting
//!
//! Both are the same type parameterized by the `GROW` policy flag, so the
//! growth variant is a zero-cost layer over the shared storage core rather
//! than a dynamically dispatched subclass.
//!
//! 本模块提供公开容器：
//! - [`RingBuf<T>`] - 固定容量，满载时逐出最旧元素
//! - [`GrowRingBuf<T>`] - 满载时倍增分配而不逐出
//!
//! 二者是同一类型按 `GROW` 策略标志参数化的结果，增长变体是共享存储
//! 核心之上的零开销层，而非动态分发的子类。

use crate::core::RingCore;
use crate::cursor::{Cursor, IntoIter, Iter, IterMut, Position};
use crate::error::RingBufError;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Ring buffer with deque-like push/pop at one end and array-like indexed
/// access. The physical layout never shifts on pop.
///
/// 一端推入/弹出、数组式索引访问的环形缓冲区。弹出时物理布局不会移动。
///
/// The `GROW` const parameter selects the on-full policy:
/// - `false` (default): capacity is fixed, a push against a full buffer
///   evicts the oldest element and returns it
/// - `true`: the allocation doubles (or goes 0 to 1) before the push, so no
///   element is ever evicted - see [`GrowRingBuf`]
///
/// `GROW` 常量参数选择满载策略：
/// - `false`（默认）：容量固定，对满载缓冲区的推入会逐出并返回最旧元素
/// - `true`：推入前分配倍增（或从 0 到 1），任何元素都不会被逐出 -
///   见 [`GrowRingBuf`]
///
/// # Examples
///
/// ```
/// use circbuf::RingBuf;
///
/// let mut buf: RingBuf<i32> = RingBuf::with_capacity(3);
/// assert_eq!(buf.push(1), Ok(None));
/// assert_eq!(buf.push(2), Ok(None));
/// assert_eq!(buf.push(3), Ok(None));
/// // Full: the next push evicts the oldest element.
/// assert_eq!(buf.push(4), Ok(Some(1)));
/// assert_eq!(buf.len(), 3);
/// assert_eq!(buf.pop(), Ok(2));
/// ```
pub struct RingBuf<T, const GROW: bool = false> {
    core: RingCore<T>,
}

/// Ring buffer that grows (0 to 1, then doubling) instead of evicting when
/// full.
///
/// 满载时增长（从 0 到 1，随后倍增）而不逐出的环形缓冲区。
///
/// # Examples
///
/// ```
/// use circbuf::GrowRingBuf;
///
/// let mut buf: GrowRingBuf<i32> = GrowRingBuf::new();
/// for v in 0..5 {
///     buf.push(v).unwrap();
/// }
/// assert_eq!(buf.len(), 5);
/// assert_eq!(buf.capacity(), 8); // 0 -> 1 -> 2 -> 4 -> 8
/// ```
pub type GrowRingBuf<T> = RingBuf<T, true>;

impl<T, const GROW: bool> RingBuf<T, GROW> {
    /// Create an empty buffer with no storage.
    ///
    /// 创建没有存储的空缓冲区。
    pub fn new() -> Self {
        Self {
            core: RingCore::new(0),
        }
    }

    /// Create an empty buffer with `capacity` slots.
    ///
    /// 创建拥有 `capacity` 个槽位的空缓冲区。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            core: RingCore::new(capacity),
        }
    }

    /// Create a full buffer of `capacity` clones of `value`.
    ///
    /// 创建由 `capacity` 个 `value` 克隆填满的缓冲区。
    ///
    /// # Examples
    ///
    /// ```
    /// use circbuf::RingBuf;
    ///
    /// let buf: RingBuf<u8> = RingBuf::filled(4, 7);
    /// assert_eq!(buf.len(), 4);
    /// assert!(buf.iter().all(|&v| v == 7));
    /// ```
    pub fn filled(capacity: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            core: RingCore::filled(capacity, value),
        }
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Number of physical slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// True when no element is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// True when every slot is live.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.core.is_full()
    }

    /// Theoretical upper bound on capacity, reported by the storage
    /// primitive rather than tracked state.
    ///
    /// 容量的理论上限，由存储原语报告而非跟踪状态。
    #[inline]
    pub fn max_size(&self) -> usize {
        RingCore::<T>::max_slots()
    }

    /// Borrow the oldest element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: logical 0 is live while the buffer is non-empty.
            Some(unsafe { self.core.peek_logical(0) })
        }
    }

    /// Borrow the newest element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: logical len - 1 is live while the buffer is non-empty.
            Some(unsafe { self.core.peek_logical(self.len() - 1) })
        }
    }

    /// Push `value` at the newest position.
    ///
    /// 在最新位置推入 `value`。
    ///
    /// # Behavior
    ///
    /// - Fixed policy: errors with [`RingBufError::ZeroCapacity`] on a
    ///   zero-capacity buffer; on a full buffer the oldest element is
    ///   evicted and returned as `Ok(Some(oldest))`.
    /// - Grow policy: the allocation doubles (1 from empty) before a push
    ///   that would not fit, so the result is always `Ok(None)`.
    ///
    /// # 行为
    ///
    /// - 固定策略：零容量缓冲区返回 [`RingBufError::ZeroCapacity`]；
    ///   满载时逐出最旧元素并以 `Ok(Some(oldest))` 返回。
    /// - 增长策略：推入无法容纳时分配先倍增（空时为 1），
    ///   因此结果总是 `Ok(None)`。
    pub fn push(&mut self, value: T) -> Result<Option<T>, RingBufError> {
        if GROW {
            if self.core.len() + 1 > self.core.capacity() {
                let new_capacity = if self.core.capacity() == 0 {
                    1
                } else {
                    self.core.capacity() * 2
                };
                self.core.rebuild(new_capacity);
            }
        } else if self.core.capacity() == 0 {
            return Err(RingBufError::ZeroCapacity);
        }
        Ok(self.core.push_evict(value))
    }

    /// Pop the oldest element.
    ///
    /// 弹出最旧元素。
    ///
    /// # Errors
    ///
    /// [`RingBufError::Empty`] when the buffer holds no elements.
    pub fn pop(&mut self) -> Result<T, RingBufError> {
        self.core.pop_front().ok_or(RingBufError::Empty)
    }

    /// Grow the allocation to `new_capacity` slots; no-op when
    /// `new_capacity <= capacity`. Existing cursors are invalidated on
    /// growth.
    ///
    /// 将分配增长到 `new_capacity` 个槽位；`new_capacity <= capacity`
    /// 时为空操作。增长会使既有游标失效。
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            self.core.rebuild(new_capacity);
        }
    }

    /// Rebuild into exactly `new_capacity` slots: the first
    /// `min(len, new_capacity)` logical elements are kept and any remaining
    /// slots are filled with clones of `fill`, so the resulting length
    /// equals `new_capacity`. No-op when `new_capacity == capacity`.
    ///
    /// 重建为恰好 `new_capacity` 个槽位：保留前 `min(len, new_capacity)`
    /// 个逻辑元素，剩余槽位以 `fill` 的克隆填充，结果长度等于
    /// `new_capacity`。`new_capacity == capacity` 时为空操作。
    ///
    /// # Examples
    ///
    /// ```
    /// use circbuf::RingBuf;
    ///
    /// let mut buf: RingBuf<i32> = [1, 2, 3].into();
    /// buf.resize(2, 0);
    /// assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 2]);
    /// buf.resize(5, 0);
    /// assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 2, 0, 0, 0]);
    /// ```
    pub fn resize(&mut self, new_capacity: usize, fill: T)
    where
        T: Clone,
    {
        if new_capacity != self.capacity() {
            self.core.resize_with_fill(new_capacity, fill);
        }
    }

    /// Cursor at the oldest element.
    ///
    /// 指向最旧元素的游标。
    #[inline]
    pub fn begin(&self) -> Cursor {
        self.cursor_at(Position::AtOffset(0))
    }

    /// Cursor one past the newest element. On a full buffer this compares
    /// unequal to [`begin`](Self::begin) even though both map to the same
    /// physical slot.
    ///
    /// 指向最新元素之后一位的游标。满载时它与 [`begin`](Self::begin)
    /// 不相等，即使二者映射到同一个物理槽位。
    #[inline]
    pub fn end(&self) -> Cursor {
        self.cursor_at(Position::End)
    }

    /// Cursor at logical offset `offset`.
    ///
    /// 指向逻辑偏移 `offset` 的游标。
    #[inline]
    pub fn cursor(&self, offset: usize) -> Cursor {
        self.cursor_at(Position::AtOffset(offset))
    }

    fn cursor_at(&self, pos: Position) -> Cursor {
        Cursor {
            pos,
            len: self.len(),
            capacity: self.capacity(),
            generation: self.core.generation(),
        }
    }

    /// Resolve `cursor` to a live element.
    ///
    /// 将 `cursor` 解析为有效元素。
    ///
    /// Offsets past the newest element wrap around the physical boundary,
    /// so on a full buffer `begin() + len` resolves back to the oldest
    /// element. Slots that are not live report
    /// [`RingBufError::PositionNotFound`]; cursors created before the last
    /// reallocation report [`RingBufError::StaleCursor`].
    ///
    /// 超过最新元素的偏移会在物理边界处回绕，因此满载时 `begin() + len`
    /// 解析回最旧元素。无效槽位报告
    /// [`RingBufError::PositionNotFound`]；创建于上次重分配之前的游标
    /// 报告 [`RingBufError::StaleCursor`]。
    ///
    /// # Examples
    ///
    /// ```
    /// use circbuf::RingBuf;
    ///
    /// let buf: RingBuf<i32> = [10, 20, 30].into();
    /// assert_eq!(buf.get(buf.begin()), Ok(&10));
    /// assert_eq!(buf.get(buf.begin() + 3), Ok(&10)); // wrapped
    /// ```
    pub fn get(&self, cursor: Cursor) -> Result<&T, RingBufError> {
        let logical = self.resolve(cursor)?;
        // SAFETY: resolve only returns live logical positions.
        Ok(unsafe { self.core.peek_logical(logical) })
    }

    /// Resolve `cursor` to a mutable reference to a live element.
    ///
    /// 将 `cursor` 解析为有效元素的可变引用。
    pub fn get_mut(&mut self, cursor: Cursor) -> Result<&mut T, RingBufError> {
        let logical = self.resolve(cursor)?;
        // SAFETY: resolve only returns live logical positions.
        Ok(unsafe { self.core.peek_logical_mut(logical) })
    }

    fn resolve(&self, cursor: Cursor) -> Result<usize, RingBufError> {
        if cursor.generation != self.core.generation() {
            return Err(RingBufError::StaleCursor);
        }
        if self.capacity() == 0 || self.is_empty() {
            return Err(RingBufError::PositionNotFound);
        }
        let wrapped = cursor.offset() % self.capacity();
        if wrapped < self.len() {
            Ok(wrapped)
        } else {
            Err(RingBufError::PositionNotFound)
        }
    }

    /// Validate an insert/erase anchor and return its logical offset
    /// (`End` means `len`, i.e. append).
    fn anchor_offset(&self, cursor: Cursor) -> Result<usize, RingBufError> {
        if cursor.generation != self.core.generation() {
            return Err(RingBufError::StaleCursor);
        }
        let offset = cursor.offset();
        if offset > self.len() {
            return Err(RingBufError::PositionNotFound);
        }
        Ok(offset)
    }

    /// Insert `value` immediately before the position denoted by `anchor`,
    /// shifting everything at or after that position one step later.
    /// Inserting before [`end`](Self::end) appends.
    ///
    /// 在 `anchor` 指示的位置之前插入 `value`，其后的所有元素逻辑上
    /// 后移一步。在 [`end`](Self::end) 之前插入即为追加。
    ///
    /// The buffer is rebuilt in one pass (O(len)); capacity grows by one
    /// only when the buffer is full. The anchor is validated before any
    /// storage changes, so a failed insert leaves the buffer untouched.
    /// Returns a fresh cursor at the inserted element; all earlier cursors
    /// are invalidated.
    ///
    /// 缓冲区单次遍历重建（O(len)）；仅当满载时容量加一。锚点在任何
    /// 存储变更前校验，失败的插入不会触碰缓冲区。返回指向被插入元素的
    /// 新游标；更早的游标全部失效。
    ///
    /// # Examples
    ///
    /// ```
    /// use circbuf::RingBuf;
    ///
    /// let mut buf: RingBuf<i32> = [1, 2].into();
    /// let cur = buf.insert(buf.begin() + 1, 9).unwrap();
    /// assert_eq!(buf.get(cur), Ok(&9));
    /// assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 9, 2]);
    /// assert_eq!(buf.capacity(), 3);
    /// ```
    pub fn insert(&mut self, anchor: Cursor, value: T) -> Result<Cursor, RingBufError> {
        self.insert_from(anchor, [value])
    }

    /// Insert `count` clones of `value` before `anchor`.
    ///
    /// 在 `anchor` 之前插入 `count` 个 `value` 的克隆。
    pub fn insert_n(
        &mut self,
        anchor: Cursor,
        count: usize,
        value: T,
    ) -> Result<Cursor, RingBufError>
    where
        T: Clone,
    {
        self.insert_from(anchor, std::iter::repeat(value).take(count))
    }

    /// Insert every value yielded by `values` before `anchor`, preserving
    /// the source order. Capacity becomes `max(capacity, len + count)`.
    /// Returns a cursor at the first inserted value, or at the anchor
    /// position when `values` is empty.
    ///
    /// 在 `anchor` 之前插入 `values` 产出的所有值，保持来源顺序。
    /// 容量变为 `max(capacity, len + count)`。返回指向第一个被插入值的
    /// 游标；`values` 为空时返回锚点位置的游标。
    ///
    /// # Examples
    ///
    /// ```
    /// use circbuf::RingBuf;
    ///
    /// let mut buf: RingBuf<i32> = [1, 2].into();
    /// buf.insert_from(buf.begin() + 1, [3, 4, 5]).unwrap();
    /// assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 2]);
    /// assert_eq!(buf.capacity(), 5);
    /// ```
    pub fn insert_from<I>(&mut self, anchor: Cursor, values: I) -> Result<Cursor, RingBufError>
    where
        I: IntoIterator<Item = T>,
    {
        let at = self.anchor_offset(anchor)?;
        let values: Vec<T> = values.into_iter().collect();
        if !values.is_empty() {
            self.core.splice(at, values);
        }
        Ok(self.cursor(at))
    }

    /// Remove the element at `anchor`. Returns a cursor at the position
    /// immediately following the removed element (equal to
    /// [`end`](Self::end) when the last element was removed). Capacity is
    /// unchanged.
    ///
    /// 移除 `anchor` 处的元素。返回紧随被移除元素之后位置的游标
    /// （移除的是最后一个元素时等于 [`end`](Self::end)）。容量不变。
    ///
    /// # Examples
    ///
    /// ```
    /// use circbuf::RingBuf;
    ///
    /// let mut buf: RingBuf<i32> = [1, 2, 3, 4, 5].into();
    /// let cur = buf.erase(buf.begin() + 2).unwrap();
    /// assert_eq!(buf.get(cur), Ok(&4));
    /// assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 2, 4, 5]);
    /// ```
    pub fn erase(&mut self, anchor: Cursor) -> Result<Cursor, RingBufError> {
        let at = self.anchor_offset(anchor)?;
        if at >= self.len() {
            // end() is a boundary, not a removable position.
            return Err(RingBufError::PositionNotFound);
        }
        self.core.remove_range(at, at + 1);
        Ok(self.cursor(at))
    }

    /// Remove the logical range `[start, end)`. Returns a cursor at the
    /// position immediately following the removed range.
    ///
    /// 移除逻辑范围 `[start, end)`。返回紧随被移除范围之后位置的游标。
    pub fn erase_range(&mut self, start: Cursor, end: Cursor) -> Result<Cursor, RingBufError> {
        let from = self.anchor_offset(start)?;
        let to = self.anchor_offset(end)?;
        if from > to {
            return Err(RingBufError::PositionNotFound);
        }
        if from < to {
            self.core.remove_range(from, to);
        }
        Ok(self.cursor(from))
    }

    /// Replace the entire contents from an iterator; capacity and length
    /// both become the item count.
    ///
    /// 用迭代器替换全部内容；容量与长度都变为元素数量。
    ///
    /// # Examples
    ///
    /// ```
    /// use circbuf::RingBuf;
    ///
    /// let mut buf: RingBuf<i32> = [1, 2, 3, 4, 5].into();
    /// buf.assign_from([6, 7, 8]);
    /// assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [6, 7, 8]);
    /// assert_eq!(buf.capacity(), 3);
    /// ```
    pub fn assign_from<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.core
            .replace_with(RingCore::from_values(values.into_iter().collect()));
    }

    /// Replace the entire contents with clones of a slice, in order.
    ///
    /// 用切片内容的克隆按序替换全部内容。
    pub fn assign_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.assign_from(values.iter().cloned());
    }

    /// Replace the entire contents with `count` clones of `value`.
    ///
    /// 用 `count` 个 `value` 的克隆替换全部内容。
    pub fn assign_fill(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        self.core.replace_with(RingCore::filled(count, value));
    }

    /// Drop every live element; capacity and allocation are retained.
    ///
    /// 析构所有有效元素；容量与分配保留。
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Exchange the complete state of two buffers in constant time without
    /// touching any element. Cursors from either buffer become stale.
    ///
    /// 常数时间交换两个缓冲区的全部状态，不触碰任何元素。
    /// 两侧缓冲区的游标都会失效。
    pub fn swap(&mut self, other: &mut Self) {
        self.core.swap_with(&mut other.core);
    }

    /// Iterate the live elements oldest to newest.
    ///
    /// 从最旧到最新迭代有效元素。
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.core)
    }

    /// Mutably iterate the live elements oldest to newest.
    ///
    /// 从最旧到最新可变迭代有效元素。
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.core)
    }

    /// Linearize the live elements into one physical run and expose them as
    /// a mutable slice, so slice algorithms (sort, binary search, ...)
    /// apply directly. Cursors are invalidated when linearization has to
    /// rebuild.
    ///
    /// 将有效元素线性化为一段连续物理区间并以可变切片暴露，切片算法
    /// （排序、二分查找……）可直接使用。需要重建时游标会失效。
    ///
    /// # Examples
    ///
    /// ```
    /// use circbuf::RingBuf;
    ///
    /// let mut buf: RingBuf<i32> = RingBuf::with_capacity(3);
    /// for v in [3, 1, 2] {
    ///     buf.push(v).unwrap();
    /// }
    /// buf.make_contiguous().sort();
    /// assert_eq!(buf.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn make_contiguous(&mut self) -> &mut [T] {
        if !self.core.is_contiguous() {
            self.core.rebuild(self.capacity());
        }
        // SAFETY: the live elements are contiguous after the rebuild check.
        unsafe { self.core.contiguous_slice_mut() }
    }
}

impl<T, const GROW: bool> Default for RingBuf<T, GROW> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const GROW: bool> Clone for RingBuf<T, GROW> {
    /// Deep copy: fresh storage of the same capacity, elements cloned in
    /// logical order.
    fn clone(&self) -> Self {
        let mut core = RingCore::new(self.capacity());
        for item in self.iter() {
            core.push_evict(item.clone());
        }
        Self { core }
    }
}

impl<T, const GROW: bool> FromIterator<T> for RingBuf<T, GROW> {
    /// Capacity and length both become the item count.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            core: RingCore::from_values(iter.into_iter().collect()),
        }
    }
}

impl<T, const N: usize, const GROW: bool> From<[T; N]> for RingBuf<T, GROW> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone, const GROW: bool> From<&[T]> for RingBuf<T, GROW> {
    fn from(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
}

impl<T, const GROW: bool> Index<usize> for RingBuf<T, GROW> {
    type Output = T;

    /// Logical indexing, wrapped by `len` (not capacity): `buf[len]` is the
    /// oldest element again.
    ///
    /// 按 `len`（而非容量）回绕的逻辑索引：`buf[len]` 又是最旧元素。
    ///
    /// # Panics
    ///
    /// Panics when the buffer is empty.
    fn index(&self, index: usize) -> &T {
        assert!(!self.is_empty(), "index into empty ring buffer");
        // SAFETY: index % len is always a live logical position.
        unsafe { self.core.peek_logical(index % self.len()) }
    }
}

impl<T, const GROW: bool> IndexMut<usize> for RingBuf<T, GROW> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        assert!(!self.is_empty(), "index into empty ring buffer");
        let logical = index % self.len();
        // SAFETY: index % len is always a live logical position.
        unsafe { self.core.peek_logical_mut(logical) }
    }
}

impl<T: PartialEq, const A: bool, const B: bool> PartialEq<RingBuf<T, B>> for RingBuf<T, A> {
    /// Logical-content equality; capacity and policy do not participate.
    fn eq(&self, other: &RingBuf<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const GROW: bool> Eq for RingBuf<T, GROW> {}

impl<T: fmt::Debug, const GROW: bool> fmt::Debug for RingBuf<T, GROW> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const GROW: bool> IntoIterator for RingBuf<T, GROW> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Drain the buffer by value, oldest first.
    fn into_iter(self) -> IntoIter<T> {
        let Self { core } = self;
        IntoIter::new(core)
    }
}

impl<'a, T, const GROW: bool> IntoIterator for &'a RingBuf<T, GROW> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, const GROW: bool> IntoIterator for &'a mut RingBuf<T, GROW> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

//! Core ring storage - index bookkeeping shared by both on-full policies
//!
//! 核心环形存储 - 两种满载策略共享的索引管理
//!
//! This module owns the single source of truth for the container: logical
//! position `i` lives in physical slot `(head + i) % capacity`. Everything
//! else - push, pop, the transactional rebuilds behind insert/erase/resize,
//! cursor invalidation - is expressed through that mapping.
//!
//! 本模块持有容器的唯一真实来源：逻辑位置 `i` 存储在物理槽位
//! `(head + i) % capacity`。其余一切 - 推入、弹出、insert/erase/resize
//! 背后的事务性重建、游标失效 - 都通过该映射表达。

use crate::slots::SlotBox;

pub(crate) struct RingCore<T> {
    /// Owned slot storage; `capacity` is the slot count.
    ///
    /// 独占的槽位存储；`capacity` 即槽位数量。
    slots: SlotBox<T>,

    /// Physical index of the oldest live element. Meaningful only while
    /// `len > 0`; always `< capacity` when `capacity > 0`.
    ///
    /// 最旧有效元素的物理索引。仅在 `len > 0` 时有意义；
    /// 当 `capacity > 0` 时始终 `< capacity`。
    head: usize,

    /// Number of live elements, `0 <= len <= capacity`.
    ///
    /// 有效元素数量，`0 <= len <= capacity`。
    len: usize,

    /// Bumped on every reallocation; cursors carry a snapshot of it and are
    /// rejected once it moves on.
    ///
    /// 每次重新分配时递增；游标持有其快照，一旦落后即被拒绝。
    generation: u64,
}

impl<T> RingCore<T> {
    /// Create an empty core with `capacity` uninitialized slots.
    ///
    /// 创建拥有 `capacity` 个未初始化槽位的空核心。
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: SlotBox::with_capacity(capacity),
            head: 0,
            len: 0,
            generation: 0,
        }
    }

    /// Create a full core of `capacity` clones of `value`.
    ///
    /// 创建由 `capacity` 个 `value` 克隆填满的核心。
    pub fn filled(capacity: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut slots = SlotBox::with_capacity(capacity);
        for i in 0..capacity {
            // SAFETY: slot i is within capacity and dead.
            unsafe {
                slots.write(i, value.clone());
            }
        }
        Self {
            slots,
            head: 0,
            len: capacity,
            generation: 0,
        }
    }

    /// Create a core whose capacity and length both equal the value count.
    ///
    /// 创建容量与长度都等于元素数量的核心。
    pub fn from_values(values: Vec<T>) -> Self {
        let len = values.len();
        let mut slots = SlotBox::with_capacity(len);
        for (i, value) in values.into_iter().enumerate() {
            // SAFETY: slot i is within capacity and dead.
            unsafe {
                slots.write(i, value);
            }
        }
        Self {
            slots,
            head: 0,
            len,
            generation: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Exchange the complete state with `other` in constant time. Both
    /// generations land strictly above either pre-swap value; a shared
    /// floor is required because the counters advance independently and a
    /// collision would let a pre-swap cursor resolve against the wrong
    /// buffer's contents.
    ///
    /// 常数时间内与 `other` 交换全部状态。两侧代数都严格高于交换前的
    /// 任一值；由于计数器各自独立递增，必须取共同下限，否则碰撞会让
    /// 交换前的游标解析到另一个缓冲区的内容。
    pub fn swap_with(&mut self, other: &mut RingCore<T>) {
        let next = self.generation.max(other.generation) + 1;
        std::mem::swap(self, other);
        self.generation = next;
        other.generation = next;
    }

    /// Theoretical slot bound reported by the storage primitive.
    ///
    /// 存储原语报告的理论槽位上限。
    pub fn max_slots() -> usize {
        SlotBox::<T>::max_slots()
    }

    /// Physical slot of logical position `logical`.
    ///
    /// 逻辑位置 `logical` 对应的物理槽位。
    ///
    /// Caller guarantees `capacity > 0`.
    #[inline]
    pub fn physical(&self, logical: usize) -> usize {
        (self.head + logical) % self.capacity()
    }

    /// Physical slot of the newest live element, if any. The tail is always
    /// derived from `head` and `len`, never stored.
    ///
    /// 最新有效元素的物理槽位（如果存在）。尾部始终由 `head` 与 `len`
    /// 推导，从不单独存储。
    #[inline]
    #[cfg(test)]
    pub fn tail(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.physical(self.len - 1))
        }
    }

    /// True when the live elements occupy one unwrapped physical run.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.head + self.len <= self.capacity()
    }

    #[inline]
    #[cfg(test)]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Append `value` at the newest position, evicting the oldest element
    /// when full. Returns the evicted element, if any.
    ///
    /// 在最新位置追加 `value`，满载时逐出最旧元素并返回它。
    ///
    /// Caller guarantees `capacity > 0`.
    pub fn push_evict(&mut self, value: T) -> Option<T> {
        if self.is_full() {
            // Full: the oldest element's slot becomes the newest.
            // 满载：最旧元素的槽位变为最新位置。
            let slot = self.head;
            // SAFETY: the head slot is live while the buffer is non-empty,
            // and a full buffer with capacity > 0 is non-empty.
            let evicted = unsafe { self.slots.replace(slot, value) };
            self.head = (self.head + 1) % self.capacity();
            Some(evicted)
        } else {
            let slot = self.physical(self.len);
            // SAFETY: the slot one past the newest element is dead.
            unsafe {
                self.slots.write(slot, value);
            }
            self.len += 1;
            None
        }
    }

    /// Remove and return the oldest element. The vacated slot is not
    /// cleared beyond the move itself.
    ///
    /// 移除并返回最旧元素。除移动本身外不会额外清理腾出的槽位。
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.head;
        // SAFETY: the head slot is live while len > 0.
        let value = unsafe { self.slots.read(slot) };
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        Some(value)
    }

    /// Borrow the element at logical position `logical`.
    ///
    /// # Safety
    /// - `logical` must be < len
    #[inline]
    pub unsafe fn peek_logical(&self, logical: usize) -> &T {
        debug_assert!(logical < self.len);
        let slot = self.physical(logical);
        unsafe { self.slots.peek(slot) }
    }

    /// Mutably borrow the element at logical position `logical`.
    ///
    /// # Safety
    /// - `logical` must be < len
    #[inline]
    pub unsafe fn peek_logical_mut(&mut self, logical: usize) -> &mut T {
        debug_assert!(logical < self.len);
        let slot = self.physical(logical);
        unsafe { self.slots.peek_mut(slot) }
    }

    /// Move the live elements into a fresh block of `new_capacity` slots in
    /// logical order starting at slot 0, then adopt it. Invalidates cursors.
    ///
    /// 将有效元素按逻辑顺序从槽位 0 起移入 `new_capacity` 大小的新块，
    /// 然后采用该块。会使游标失效。
    ///
    /// `new_capacity` must be >= len.
    pub fn rebuild(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len);
        let mut fresh = SlotBox::with_capacity(new_capacity);
        for i in 0..self.len {
            let src = self.physical(i);
            // SAFETY: slot src is live, destination slot i is dead.
            unsafe {
                let value = self.slots.read(src);
                fresh.write(i, value);
            }
        }
        // The old block holds no live elements anymore and is released as-is.
        self.slots = fresh;
        self.head = 0;
        self.generation += 1;
    }

    /// Rebuild with `values` spliced in before logical position `at`,
    /// preserving the order of both sequences. Capacity becomes
    /// `max(capacity, len + values.len())`.
    ///
    /// 重建并在逻辑位置 `at` 之前拼入 `values`，保持两个序列的顺序。
    /// 容量变为 `max(capacity, len + values.len())`。
    ///
    /// `at` must be <= len.
    pub fn splice(&mut self, at: usize, values: Vec<T>) {
        debug_assert!(at <= self.len);
        let added = values.len();
        let new_capacity = self.capacity().max(self.len + added);
        let mut fresh = SlotBox::with_capacity(new_capacity);
        for i in 0..at {
            let src = self.physical(i);
            // SAFETY: slot src is live, destination slot is dead.
            unsafe {
                let value = self.slots.read(src);
                fresh.write(i, value);
            }
        }
        for (j, value) in values.into_iter().enumerate() {
            // SAFETY: destination slot is within capacity and dead.
            unsafe {
                fresh.write(at + j, value);
            }
        }
        for i in at..self.len {
            let src = self.physical(i);
            // SAFETY: slot src is live, destination slot is dead.
            unsafe {
                let value = self.slots.read(src);
                fresh.write(i + added, value);
            }
        }
        self.slots = fresh;
        self.head = 0;
        self.len += added;
        self.generation += 1;
    }

    /// Rebuild without the logical positions `[from, to)`. Capacity is left
    /// unchanged.
    ///
    /// 重建并移除逻辑位置 `[from, to)`。容量保持不变。
    ///
    /// `from <= to <= len` required.
    pub fn remove_range(&mut self, from: usize, to: usize) {
        debug_assert!(from <= to && to <= self.len);
        let removed = to - from;
        let mut fresh = SlotBox::with_capacity(self.capacity());
        for i in 0..from {
            let src = self.physical(i);
            // SAFETY: slot src is live, destination slot is dead.
            unsafe {
                let value = self.slots.read(src);
                fresh.write(i, value);
            }
        }
        for i in from..to {
            let src = self.physical(i);
            // SAFETY: slot src is live and is not moved anywhere.
            unsafe {
                self.slots.drop_in_place(src);
            }
        }
        for i in to..self.len {
            let src = self.physical(i);
            // SAFETY: slot src is live, destination slot is dead.
            unsafe {
                let value = self.slots.read(src);
                fresh.write(i - removed, value);
            }
        }
        self.slots = fresh;
        self.head = 0;
        self.len -= removed;
        self.generation += 1;
    }

    /// Rebuild into `new_capacity` slots: keep the first `min(len,
    /// new_capacity)` logical elements, fill the rest with clones of
    /// `fill`. The resulting length equals `new_capacity`.
    ///
    /// 重建为 `new_capacity` 个槽位：保留前 `min(len, new_capacity)`
    /// 个逻辑元素，其余以 `fill` 的克隆填充。结果长度等于 `new_capacity`。
    pub fn resize_with_fill(&mut self, new_capacity: usize, fill: T)
    where
        T: Clone,
    {
        let keep = self.len.min(new_capacity);
        let mut fresh = SlotBox::with_capacity(new_capacity);
        for i in 0..keep {
            let src = self.physical(i);
            // SAFETY: slot src is live, destination slot is dead.
            unsafe {
                let value = self.slots.read(src);
                fresh.write(i, value);
            }
        }
        // Shrinking truncates from the logical end forward.
        // 缩容时从逻辑末尾开始截断。
        for i in keep..self.len {
            let src = self.physical(i);
            // SAFETY: slot src is live and is not moved anywhere.
            unsafe {
                self.slots.drop_in_place(src);
            }
        }
        for i in keep..new_capacity {
            // SAFETY: destination slot is within capacity and dead.
            unsafe {
                fresh.write(i, fill.clone());
            }
        }
        self.slots = fresh;
        self.head = 0;
        self.len = new_capacity;
        self.generation += 1;
    }

    /// Replace this core with `other`, keeping the generation sequence
    /// monotonic so cursors from before the replacement stay detectably
    /// stale.
    ///
    /// 用 `other` 替换本核心，保持代数单调递增，
    /// 使替换前的游标可被检测为失效。
    pub fn replace_with(&mut self, mut other: RingCore<T>) {
        other.generation = self.generation + 1;
        *self = other;
    }

    /// Drop all live elements and reset the indices. The allocation is
    /// retained and the generation does not move.
    ///
    /// 析构所有有效元素并重置索引。内存保留，代数不变。
    pub fn clear(&mut self) {
        for i in 0..self.len {
            let slot = self.physical(i);
            // SAFETY: slot is live.
            unsafe {
                self.slots.drop_in_place(slot);
            }
        }
        self.head = 0;
        self.len = 0;
    }

    /// View the live elements as one mutable slice.
    ///
    /// # Safety
    /// - the live elements must be contiguous (`is_contiguous()`)
    pub unsafe fn contiguous_slice_mut(&mut self) -> &mut [T] {
        debug_assert!(self.is_contiguous());
        let head = self.head;
        let len = self.len;
        unsafe { std::slice::from_raw_parts_mut(self.slots.slot_mut_ptr(head), len) }
    }
}

impl<T> Drop for RingCore<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

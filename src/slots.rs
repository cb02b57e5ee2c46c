//! Fixed-capacity slot storage - the allocation primitive under the ring core
//!
//! 固定容量槽位存储 - 环形核心之下的分配原语
//!
//! A `SlotBox` owns a contiguous heap block of `capacity` uninitialized
//! slots and exposes in-place write/read/replace/peek on individual slots.
//! It never tracks which slots hold live elements; constructing and dropping
//! elements at the right time is the caller's responsibility.
//!
//! `SlotBox` 拥有一块包含 `capacity` 个未初始化槽位的连续堆内存，
//! 并提供对单个槽位的就地写入/读取/替换/查看操作。
//! 它不跟踪哪些槽位持有有效元素；在正确的时机构造和析构元素由调用者负责。

use std::mem::MaybeUninit;
use std::ptr;

pub(crate) struct SlotBox<T> {
    slots: Box<[MaybeUninit<T>]>,
}

impl<T> SlotBox<T> {
    /// Acquire a block of `capacity` uninitialized slots.
    ///
    /// 获取一块包含 `capacity` 个未初始化槽位的内存。
    pub fn with_capacity(capacity: usize) -> Self {
        let mut vec = Vec::with_capacity(capacity);
        // SAFETY: MaybeUninit does not require initialization.
        // 安全性：MaybeUninit 不要求初始化。
        unsafe {
            vec.set_len(capacity);
        }
        Self {
            slots: vec.into_boxed_slice(),
        }
    }

    /// Number of slots in the block.
    ///
    /// 块中的槽位数量。
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Theoretical upper bound on the number of slots a single block can
    /// hold, derived from the maximum allocation size.
    ///
    /// 单个块可容纳槽位数量的理论上限，由最大分配尺寸推导。
    pub fn max_slots() -> usize {
        if std::mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            isize::MAX as usize / std::mem::size_of::<T>()
        }
    }

    /// Get a pointer to the slot at `index`.
    ///
    /// # Safety
    /// - `index` must be < capacity
    #[inline]
    pub unsafe fn slot_ptr(&self, index: usize) -> *const T {
        debug_assert!(index <= self.slots.len());
        unsafe { self.slots.as_ptr().add(index).cast::<T>() }
    }

    /// Get a mutable pointer to the slot at `index`.
    ///
    /// # Safety
    /// - `index` must be < capacity
    #[inline]
    pub unsafe fn slot_mut_ptr(&mut self, index: usize) -> *mut T {
        debug_assert!(index <= self.slots.len());
        unsafe { self.slots.as_mut_ptr().add(index).cast::<T>() }
    }

    /// Construct `value` in the slot at `index`, without dropping whatever
    /// the slot held before.
    ///
    /// 在 `index` 槽位就地构造 `value`，不析构槽位之前的内容。
    ///
    /// # Safety
    /// - `index` must be < capacity
    /// - the slot must be dead (no live element would be leaked)
    #[inline]
    pub unsafe fn write(&mut self, index: usize, value: T) {
        unsafe {
            self.slot_mut_ptr(index).write(value);
        }
    }

    /// Move the element out of the slot at `index`, leaving it dead.
    ///
    /// 将 `index` 槽位的元素移出，槽位随之失效。
    ///
    /// # Safety
    /// - `index` must be < capacity
    /// - the slot must hold a live element
    #[inline]
    pub unsafe fn read(&mut self, index: usize) -> T {
        unsafe { self.slot_mut_ptr(index).read() }
    }

    /// Replace the live element at `index`, returning the old one.
    ///
    /// 替换 `index` 槽位的有效元素并返回旧值。
    ///
    /// # Safety
    /// - `index` must be < capacity
    /// - the slot must hold a live element
    #[inline]
    pub unsafe fn replace(&mut self, index: usize, value: T) -> T {
        unsafe { ptr::replace(self.slot_mut_ptr(index), value) }
    }

    /// Borrow the live element at `index`.
    ///
    /// # Safety
    /// - `index` must be < capacity
    /// - the slot must hold a live element
    #[inline]
    pub unsafe fn peek(&self, index: usize) -> &T {
        unsafe { &*self.slot_ptr(index) }
    }

    /// Mutably borrow the live element at `index`.
    ///
    /// # Safety
    /// - `index` must be < capacity
    /// - the slot must hold a live element
    #[inline]
    pub unsafe fn peek_mut(&mut self, index: usize) -> &mut T {
        unsafe { &mut *self.slot_mut_ptr(index) }
    }

    /// Drop the live element at `index` in place, leaving the slot dead.
    ///
    /// # Safety
    /// - `index` must be < capacity
    /// - the slot must hold a live element
    #[inline]
    pub unsafe fn drop_in_place(&mut self, index: usize) {
        unsafe {
            ptr::drop_in_place(self.slot_mut_ptr(index));
        }
    }
}

// Note: SlotBox does NOT implement Drop because it stores MaybeUninit<T>.
// The ring core is responsible for dropping the live elements; the box
// itself only releases the raw allocation.
//
// 注意：SlotBox 不实现 Drop，因为它存储 MaybeUninit<T>。
// 环形核心负责析构有效元素；槽位块本身只释放原始内存。

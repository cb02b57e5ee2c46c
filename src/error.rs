//! Ring buffer error taxonomy
//!
//! 环形缓冲区错误分类

use thiserror::Error;

/// Errors reported by [`RingBuf`](crate::RingBuf) operations.
///
/// Every variant is a precondition violation reported synchronously at the
/// offending call. None of these paths leave partial mutation behind; there
/// is no retry logic anywhere in this crate.
///
/// [`RingBuf`](crate::RingBuf) 操作报告的错误。
///
/// 每个变体都是在调用处同步报告的前置条件违规。
/// 这些路径都不会留下部分修改；本 crate 中没有任何重试逻辑。
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RingBufError {
    /// Push attempted on a zero-capacity fixed buffer.
    ///
    /// 对零容量固定缓冲区执行 push。
    #[error("push to zero-capacity buffer")]
    ZeroCapacity,

    /// Pop attempted on an empty buffer.
    ///
    /// 对空缓冲区执行 pop。
    #[error("pop from empty buffer")]
    Empty,

    /// A cursor does not denote a live logical position in the current
    /// sequence.
    ///
    /// 游标未指向当前序列中的有效逻辑位置。
    #[error("position not found")]
    PositionNotFound,

    /// A cursor was created before the buffer last reallocated and can no
    /// longer be resolved.
    ///
    /// 游标创建于缓冲区上次重新分配之前，无法再被解析。
    #[error("cursor invalidated by reallocation")]
    StaleCursor,
}

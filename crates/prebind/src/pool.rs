//! 测量期选项缓冲的进程级复用池。
//!
//! # 设计背景（Why）
//! - 带测量期属性的记录调用需要把“绑定选项 + 测量期选项”拼成一个
//!   临时序列；若每次都新建 `Vec`，热路径会被分配器开销支配。
//! - 累加型与记录型两条路径各持一个池，互不串扰，对应
//!   [`AddOption`] 与 [`RecordOption`] 两种元素类型。
//!
//! # 逻辑解析（How）
//! - 池内部以 `spin::Mutex<Vec<Vec<T>>>` 维护自由链表，租借时弹出队尾
//!   缓冲，缺货则按常见容量（两个槽位）新建。
//! - [`PooledOptions`] 是带归还职责的守卫：`Drop` 中先清空缓冲（释放
//!   其中持有的 `Arc` 等引用，避免跨调用数据滞留与生命周期延长），再
//!   推回自由链表。守卫语义保证任何退出路径——包括被测量汇的 panic
//!   展开——都恰好归还一次。
//!
//! # 契约说明（What）
//! - 租出的缓冲在归还前由当前调用独占；池自身的并发安全由内部互斥锁
//!   承担，调用方无须加锁。
//! - 池不持有外部资源，进程退出时无需显式回收。

use alloc::vec::Vec;
use core::mem;
use core::ops::{Deref, DerefMut};

use prebind_core::{AddOption, RecordOption};
use spin::Mutex;

/// 新建缓冲的初始槽位：绑定选项加一个测量期选项是最常见组合。
const INITIAL_OPTION_SLOTS: usize = 2;

/// 累加型（`add`）调用使用的选项缓冲池。
pub(crate) static ADD_OPTIONS: OptionPool<AddOption> = OptionPool::new();

/// 记录型（`record`）调用使用的选项缓冲池。
pub(crate) static RECORD_OPTIONS: OptionPool<RecordOption> = OptionPool::new();

/// 基于自由链表的选项缓冲池。
pub(crate) struct OptionPool<T: 'static> {
    free_list: Mutex<Vec<Vec<T>>>,
}

impl<T> OptionPool<T> {
    pub(crate) const fn new() -> Self {
        Self {
            free_list: Mutex::new(Vec::new()),
        }
    }

    /// 租借一个空缓冲；归还由返回守卫的 `Drop` 自动完成。
    pub(crate) fn acquire(&'static self) -> PooledOptions<T> {
        let reused = self.free_list.lock().pop();
        PooledOptions {
            buffer: reused.unwrap_or_else(|| Vec::with_capacity(INITIAL_OPTION_SLOTS)),
            pool: self,
        }
    }
}

/// 租借期间独占的选项缓冲，解引用为 `Vec<T>` 直接追加。
pub(crate) struct PooledOptions<T: 'static> {
    buffer: Vec<T>,
    pool: &'static OptionPool<T>,
}

impl<T> Deref for PooledOptions<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl<T> DerefMut for PooledOptions<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl<T> Drop for PooledOptions<T> {
    fn drop(&mut self) {
        let mut buffer = mem::take(&mut self.buffer);
        // 先清空再归还：截断会析构缓冲内残留的选项，防止跨调用泄露。
        buffer.clear();
        self.pool.free_list.lock().push(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_buffer_is_cleared_and_reused() {
        static POOL: OptionPool<u8> = OptionPool::new();

        {
            let mut leased = POOL.acquire();
            leased.push(7);
            assert_eq!(leased.len(), 1);
        }
        assert_eq!(POOL.free_list.lock().len(), 1, "守卫析构后缓冲应回到链表");

        let leased = POOL.acquire();
        assert!(leased.is_empty(), "复用的缓冲必须已被清空");
        assert!(leased.capacity() >= 1, "复用应保留既有容量");
        assert_eq!(POOL.free_list.lock().len(), 0);
    }

    #[test]
    fn fresh_buffer_reserves_common_capacity() {
        static POOL: OptionPool<u8> = OptionPool::new();

        let leased = POOL.acquire();
        assert_eq!(leased.capacity(), INITIAL_OPTION_SLOTS);
    }

    #[test]
    #[cfg(feature = "std")]
    fn buffer_returns_to_pool_when_caller_panics() {
        static POOL: OptionPool<u8> = OptionPool::new();

        let outcome = std::panic::catch_unwind(|| {
            let mut leased = POOL.acquire();
            leased.push(1);
            panic!("下游测量汇故障");
        });
        assert!(outcome.is_err());

        let free_list = POOL.free_list.lock();
        assert_eq!(free_list.len(), 1, "panic 展开路径同样必须归还缓冲");
        assert!(free_list[0].is_empty());
    }
}

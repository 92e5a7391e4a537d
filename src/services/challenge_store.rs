//! 挑战图片存储 - 业务能力层
//!
//! 全进程唯一的"当前挑战"槽位：整体替换、后写覆盖、不保留历史。
//! 读写双方共享同一槽位，刷新期间读到上一代图片是可接受的，
//! 但 Arc 整体替换保证永远不会读到撕裂的数据。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// 当前挑战
#[derive(Debug)]
pub struct Challenge {
    /// JPEG 图片字节
    pub image: Vec<u8>,
    /// 单调递增的代次，从 1 开始
    pub generation: u64,
    /// 捕获时间（用于条件 GET）
    pub captured_at: DateTime<Utc>,
}

/// 挑战图片存储
#[derive(Debug, Default)]
pub struct ChallengeStore {
    slot: RwLock<Option<Arc<Challenge>>>,
}

impl ChallengeStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// 存入新一代挑战图片，返回其代次
    pub async fn put(&self, image: Vec<u8>) -> u64 {
        let mut slot = self.slot.write().await;
        let generation = slot.as_ref().map(|c| c.generation).unwrap_or(0) + 1;
        *slot = Some(Arc::new(Challenge {
            image,
            generation,
            captured_at: Utc::now(),
        }));
        generation
    }

    /// 读取当前挑战，从未存入过则返回 None
    pub async fn get(&self) -> Option<Arc<Challenge>> {
        self.slot.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_returns_none() {
        let store = ChallengeStore::new();
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn test_generations_strictly_increase() {
        let store = ChallengeStore::new();

        let first = store.put(vec![0xFF, 0xD8, 0x01]).await;
        let second = store.put(vec![0xFF, 0xD8, 0x02]).await;

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let current = store.get().await.unwrap();
        assert_eq!(current.generation, 2);
        assert!(!current.image.is_empty());
        assert_eq!(current.image[2], 0x02);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = ChallengeStore::new();
        store.put(vec![1]).await;

        // 旧的 Arc 引用在替换后依然完整可读
        let old = store.get().await.unwrap();
        store.put(vec![2, 2]).await;

        assert_eq!(old.image, vec![1]);
        assert_eq!(store.get().await.unwrap().image, vec![2, 2]);
    }
}

//! 短码分配
//!
//! 生成候选短码并确认未被占用。检查与插入之间没有原子性，
//! 最终的唯一性由存储层的唯一约束保证。

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::AllocatorConfig;
use crate::errors::Result;
use crate::storage::LinkStore;
use crate::utils::{MAX_SHORT_CODE_LEN, generate_random_code, is_reserved_short_code};

/// 候选短码生成器
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 从 `CODE_ALPHABET` 均匀随机取字符
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// 长度被限制在 `1..=MAX_SHORT_CODE_LEN`，超出部分无法通过短码格式校验
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_SHORT_CODE_LEN),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_random_code(self.length)
    }
}

/// 分配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    Allocated(String),
    Exhausted { attempts: u32 },
}

#[derive(Clone)]
pub struct CodeAllocator {
    generator: Arc<dyn CodeGenerator>,
    max_attempts: u32,
}

impl CodeAllocator {
    pub fn new(generator: Arc<dyn CodeGenerator>, max_attempts: u32) -> Self {
        Self {
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &AllocatorConfig) -> Self {
        Self::new(
            Arc::new(RandomCodeGenerator::new(config.code_length)),
            config.max_attempts,
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 找到一个当前未被占用的短码
    ///
    /// 保留字和已存在的短码都会消耗一次尝试；存储错误原样返回。
    pub async fn allocate(&self, store: &dyn LinkStore) -> Result<Allocation> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();

            if is_reserved_short_code(&candidate) {
                debug!("Candidate '{}' is a reserved route, skipping", candidate);
                continue;
            }

            if store.exists(&candidate).await? {
                trace!(
                    "Candidate '{}' already taken (attempt {}/{})",
                    candidate, attempt, self.max_attempts
                );
                continue;
            }

            return Ok(Allocation::Allocated(candidate));
        }

        warn!(
            "Code allocation exhausted after {} attempts",
            self.max_attempts
        );
        Ok(Allocation::Exhausted {
            attempts: self.max_attempts,
        })
    }
}

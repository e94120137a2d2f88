// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(String),
    #[error("other error: {0}")]
    Other(String),
}

/// 调试存档接收器
///
/// 接受一个标签，持久化当前页面的截图和序列化标记。
/// 该接收器的失败只记录日志，从不向上传播。
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Persist one screenshot + page markup pair under the given label.
    async fn persist(
        &self,
        label: &str,
        screenshot: &[u8],
        markup: &str,
    ) -> Result<(), ArtifactError>;
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::domain::repositories::wordlist_repository::WordlistRepository;

/// 将字典文件内容拆分为候选路径
///
/// 去掉每行首尾空白并跳过空行，不去重
pub fn parse_wordlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 基于本地文件的字典仓库
///
/// 第一次调用 `load` 时读取文件，之后返回缓存的结果
pub struct FileWordlistRepository {
    path: PathBuf,
    cache: OnceCell<Arc<[String]>>,
}

impl FileWordlistRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
        }
    }
}

#[async_trait]
impl WordlistRepository for FileWordlistRepository {
    async fn load(&self) -> Arc<[String]> {
        self.cache
            .get_or_init(|| async {
                match fs::read_to_string(&self.path).await {
                    Ok(content) => {
                        let entries = parse_wordlist(&content);
                        info!(
                            "Loaded {} candidate paths from {}",
                            entries.len(),
                            self.path.display()
                        );
                        Arc::from(entries)
                    }
                    Err(e) => {
                        error!("Admin paths wordlist not found at {}: {}", self.path.display(), e);
                        Arc::from(Vec::new())
                    }
                }
            })
            .await
            .clone()
    }
}

/// 基于内存的字典仓库
pub struct InMemoryWordlistRepository {
    entries: Arc<[String]>,
}

impl InMemoryWordlistRepository {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl WordlistRepository for InMemoryWordlistRepository {
    async fn load(&self) -> Arc<[String]> {
        self.entries.clone()
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 爬取服务（crawl_service）：商品链接爬取器，对一个 (站点画像, 查询)
///   调用执行完整的 导航 → 等待 → 封锁检测 → 滚动 → 提取 流程
pub mod crawl_service;

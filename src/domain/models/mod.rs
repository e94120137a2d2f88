// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义系统的核心业务实体：
/// - 站点画像（site_profile）：描述如何在一个零售站点上搜索并识别商品链接
/// - 商品链接（product_link）：规范化后的商品URL值对象
/// - 爬取结果（crawl_result）：一次爬取的输出，链接集合加结果状态
/// - 问卷（questionnaire）、订阅（subscription）、待支付（pending_payment）：
///   机器人存储的三类记录
pub mod crawl_result;
pub mod pending_payment;
pub mod product_link;
pub mod questionnaire;
pub mod site_profile;
pub mod subscription;

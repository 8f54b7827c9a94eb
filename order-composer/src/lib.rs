//! Order Composer - 订单编排与订阅额度分配引擎
//!
//! # 架构概述
//!
//! While a draft order is assembled in the console, each requested
//! product quantity is split into a part covered "for free" by the
//! customer's subscription credits and a part priced from a price list.
//! The remaining credit balance is tracked in memory and restored when
//! covered lines are removed.
//!
//! # 模块结构
//!
//! ```text
//! order-composer/src/
//! ├── core/          # 配置
//! ├── gateway/       # 外部数据源 (订阅额度、价目表、商品)
//! ├── ledger/        # 额度账本快照
//! ├── allocator.rs   # 覆盖/计价拆分
//! ├── pricing/       # 单价解析 + 会话缓存
//! ├── order_money/   # 订单金额汇总
//! ├── legend.rs      # 剩余额度展示文本
//! ├── draft/         # 草稿订单会话与行存储
//! └── utils/         # 日志
//! ```
//!
//! # Flow
//!
//! ```text
//! select_subscription → ledger reload
//! add_article → allocate → covered line (ledger -= covered)
//!                        → priced line (price resolver)
//!             → totals → legend
//! remove_article → ledger += covered (same ledger load only) → totals
//! ```

pub mod allocator;
pub mod core;
pub mod draft;
pub mod gateway;
pub mod ledger;
pub mod legend;
pub mod order_money;
pub mod pricing;
pub mod utils;

// Re-export 公共类型
pub use allocator::{Allocation, allocate};
pub use core::Config;
pub use draft::{AddArticle, AddOutcome, DraftError, DraftOrderSession, DraftSettings};
pub use gateway::{Gateways, LookupDiagnostic, LookupKind};
pub use ledger::CreditLedgerView;
pub use legend::{NO_CREDITS_AVAILABLE, format_legend};
pub use order_money::recompute_total;
pub use pricing::{PriceQuote, PriceResolver};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

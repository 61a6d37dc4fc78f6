//! Shopsense Analyzer
//!
//! Whole-session derived summaries: the navigation architecture of the
//! site as the shopper experienced it, and the shopping-funnel behavior of
//! the session. Both are recomputed per session and never persisted or
//! incrementally updated.

pub mod flow;
pub mod navigation;

pub use flow::{
    CartActionKind, CompletionStatus, FlowAnalyzer, FunnelStage, ShoppingFlowAnalysis,
};
pub use navigation::{Engagement, NavigationArchitecture, NavigationExtractor};

//! Shopsense Aggregator
//!
//! Turns many per-interaction classifications into single product records:
//! the product-page grouper clusters interactions by inferred product
//! identity, and the attribute aggregator merges the group's color/size/
//! style/action/availability observations into one `ExtractedProduct`.

pub mod aggregator;
pub mod buckets;
pub mod grouper;

pub use aggregator::ProductAggregator;
pub use buckets::AttributeBuckets;
pub use grouper::ProductPageGrouper;

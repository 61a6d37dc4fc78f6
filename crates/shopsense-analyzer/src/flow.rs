//! Shopping-flow analysis
//!
//! Segments a session's interaction stream into funnel stages, records
//! stage transitions, detects conversion events and cart actions, and
//! derives the funnel completion status.

use serde::{Deserialize, Serialize};
use shopsense_classifier::urls;
use shopsense_domain::ParsedInteraction;
use tracing::debug;

/// One phase of the browse -> product -> cart -> checkout sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    /// Category browsing or anything unrecognized
    Browse,
    /// Product page
    Product,
    /// Cart page
    Cart,
    /// Checkout page
    Checkout,
}

/// A contiguous visit to one funnel stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageVisit {
    /// The stage
    pub stage: FunnelStage,
    /// Timestamp of the first interaction in the visit
    pub entered_at: f64,
    /// Timestamp of the last interaction in the visit
    pub exited_at: f64,
    /// Visit duration in milliseconds
    pub duration_ms: f64,
}

/// A transition between funnel stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTransition {
    /// Stage left
    pub from: FunnelStage,
    /// Stage entered
    pub to: FunnelStage,
    /// Timestamp of the transition
    pub at: f64,
}

/// A detected conversion-intent event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionEvent {
    /// Matched phrase category
    pub kind: CartActionKind,
    /// Timestamp
    pub at: f64,
    /// The triggering element text
    pub text: String,
}

/// Cart workflow action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartActionKind {
    /// Item added to cart
    AddToCart,
    /// Item removed from cart
    RemoveFromCart,
    /// Quantity changed
    UpdateQuantity,
    /// Cart viewed
    ViewCart,
    /// Checkout initiated
    ProceedToCheckout,
    /// Purchase completed
    Purchase,
}

/// One cart workflow action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAction {
    /// Action kind
    pub kind: CartActionKind,
    /// Timestamp
    pub at: f64,
    /// The triggering element text
    pub text: String,
}

/// Funnel completion status for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// A purchase event fired
    Completed,
    /// Checkout stage reached without a purchase
    InProgress,
    /// Never reached checkout
    Abandoned,
}

/// The derived shopping-flow summary of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingFlowAnalysis {
    /// Stage visits in order
    pub stages: Vec<StageVisit>,
    /// Stage transitions in order
    pub transitions: Vec<StageTransition>,
    /// Conversion-intent events
    pub conversion_events: Vec<ConversionEvent>,
    /// Cart workflow actions
    pub cart_actions: Vec<CartAction>,
    /// Whether cart activity occurred without a checkout handoff
    pub abandoned_cart: bool,
    /// Funnel completion status
    pub completion: CompletionStatus,
}

/// Analyzes the shopping funnel of one session.
#[derive(Debug, Default)]
pub struct FlowAnalyzer;

impl FlowAnalyzer {
    /// Create a flow analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Analyze a session's interaction stream.
    pub fn analyze(&self, interactions: &[ParsedInteraction]) -> ShoppingFlowAnalysis {
        let mut stages: Vec<StageVisit> = Vec::new();
        let mut transitions = Vec::new();
        let mut conversion_events = Vec::new();
        let mut cart_actions = Vec::new();
        let mut purchased = false;

        let mut current: Option<StageVisit> = None;

        for interaction in interactions {
            let stage = stage_for_url(interaction.url());
            let at = interaction.timestamp;

            let same_stage = current.as_ref().is_some_and(|v| v.stage == stage);
            if same_stage {
                if let Some(visit) = current.as_mut() {
                    visit.exited_at = at;
                    visit.duration_ms = visit.exited_at - visit.entered_at;
                }
            } else {
                if let Some(prev) = current.take() {
                    transitions.push(StageTransition {
                        from: prev.stage,
                        to: stage,
                        at,
                    });
                    stages.push(prev);
                }
                current = Some(StageVisit {
                    stage,
                    entered_at: at,
                    exited_at: at,
                    duration_ms: 0.0,
                });
            }

            if let Some(kind) = cart_action_for_text(interaction.text()) {
                if matches!(
                    kind,
                    CartActionKind::AddToCart
                        | CartActionKind::ProceedToCheckout
                        | CartActionKind::Purchase
                ) {
                    conversion_events.push(ConversionEvent {
                        kind,
                        at,
                        text: interaction.text().to_string(),
                    });
                }
                cart_actions.push(CartAction {
                    kind,
                    at,
                    text: interaction.text().to_string(),
                });
                if kind == CartActionKind::Purchase {
                    purchased = true;
                }
            }
            if urls::is_purchase_url(interaction.url()) {
                purchased = true;
            }
        }
        if let Some(visit) = current {
            stages.push(visit);
        }

        // Viewing the cart counts as cart activity: a shopper who opens
        // the cart and leaves has abandoned it
        let had_cart_activity = !cart_actions.is_empty();
        let handed_off = cart_actions
            .iter()
            .any(|a| matches!(a.kind, CartActionKind::ProceedToCheckout | CartActionKind::Purchase))
            || stages.iter().any(|v| v.stage == FunnelStage::Checkout);
        let abandoned_cart = had_cart_activity && !handed_off;

        let completion = if purchased {
            CompletionStatus::Completed
        } else if stages.iter().any(|v| v.stage == FunnelStage::Checkout) {
            CompletionStatus::InProgress
        } else {
            CompletionStatus::Abandoned
        };

        debug!(
            stages = stages.len(),
            cart_actions = cart_actions.len(),
            ?completion,
            "analyzed shopping flow"
        );

        ShoppingFlowAnalysis {
            stages,
            transitions,
            conversion_events,
            cart_actions,
            abandoned_cart,
            completion,
        }
    }
}

fn stage_for_url(url: &str) -> FunnelStage {
    if urls::is_checkout_url(url) || urls::is_purchase_url(url) {
        FunnelStage::Checkout
    } else if urls::is_cart_url(url) {
        FunnelStage::Cart
    } else if urls::is_product_url(url) {
        FunnelStage::Product
    } else {
        // Category pages and anything unrecognized count as browsing
        FunnelStage::Browse
    }
}

fn cart_action_for_text(text: &str) -> Option<CartActionKind> {
    let lower = text.to_lowercase();
    if ["place order", "pay now", "complete order", "complete purchase"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Some(CartActionKind::Purchase)
    } else if ["add to cart", "add to bag", "add to basket", "buy now"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Some(CartActionKind::AddToCart)
    } else if lower.contains("remove") {
        Some(CartActionKind::RemoveFromCart)
    } else if lower.contains("quantity") || lower.contains("qty") {
        Some(CartActionKind::UpdateQuantity)
    } else if ["view cart", "view bag", "view basket"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Some(CartActionKind::ViewCart)
    } else if lower.contains("checkout") {
        Some(CartActionKind::ProceedToCheckout)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsense_domain::{
        ElementInfo, InteractionMetadata, PageContext, PageState, Selectors,
    };

    fn click(url: &str, text: &str, at: f64) -> ParsedInteraction {
        ParsedInteraction {
            id: "i".to_string(),
            event_type: "click".to_string(),
            timestamp: at,
            session_time: at,
            context: PageContext {
                url: url.to_string(),
                ..Default::default()
            },
            element: ElementInfo {
                text: text.to_string(),
                tag: "a".to_string(),
                ..Default::default()
            },
            selectors: Selectors::default(),
            state: PageState::default(),
            metadata: InteractionMetadata::default(),
        }
    }

    fn funnel_to_cart() -> Vec<ParsedInteraction> {
        vec![
            click("https://example.com/browse/women", "Women", 0.0),
            click("https://example.com/product/tee-123", "Classic Tee", 1000.0),
            click("https://example.com/cart", "View cart", 2000.0),
        ]
    }

    #[test]
    fn test_stage_segmentation_and_transitions() {
        let analysis = FlowAnalyzer::new().analyze(&funnel_to_cart());

        let visited: Vec<FunnelStage> = analysis.stages.iter().map(|v| v.stage).collect();
        assert_eq!(
            visited,
            vec![FunnelStage::Browse, FunnelStage::Product, FunnelStage::Cart]
        );
        assert_eq!(analysis.transitions.len(), 2);
        assert_eq!(analysis.transitions[0].from, FunnelStage::Browse);
        assert_eq!(analysis.transitions[0].to, FunnelStage::Product);
    }

    #[test]
    fn test_cart_without_checkout_is_abandoned() {
        let analysis = FlowAnalyzer::new().analyze(&funnel_to_cart());
        assert_eq!(analysis.completion, CompletionStatus::Abandoned);
    }

    #[test]
    fn test_checkout_without_purchase_is_in_progress() {
        let mut stream = funnel_to_cart();
        stream.push(click("https://example.com/checkout", "", 3000.0));
        let analysis = FlowAnalyzer::new().analyze(&stream);
        assert_eq!(analysis.completion, CompletionStatus::InProgress);
    }

    #[test]
    fn test_purchase_event_completes_funnel() {
        let mut stream = funnel_to_cart();
        stream.push(click("https://example.com/checkout", "", 3000.0));
        stream.push(click("https://example.com/checkout", "Place order", 4000.0));
        let analysis = FlowAnalyzer::new().analyze(&stream);
        assert_eq!(analysis.completion, CompletionStatus::Completed);
    }

    #[test]
    fn test_confirmation_url_completes_funnel() {
        let mut stream = funnel_to_cart();
        stream.push(click("https://example.com/order-confirmation", "", 3000.0));
        let analysis = FlowAnalyzer::new().analyze(&stream);
        assert_eq!(analysis.completion, CompletionStatus::Completed);
    }

    #[test]
    fn test_conversion_events_detected() {
        let stream = vec![
            click("https://example.com/product/tee-123", "Add to Bag", 0.0),
            click("https://example.com/cart", "Checkout", 1000.0),
        ];
        let analysis = FlowAnalyzer::new().analyze(&stream);
        let kinds: Vec<CartActionKind> =
            analysis.conversion_events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![CartActionKind::AddToCart, CartActionKind::ProceedToCheckout]
        );
    }

    #[test]
    fn test_cart_abandonment_flag() {
        let stream = vec![click(
            "https://example.com/product/tee-123",
            "Add to cart",
            0.0,
        )];
        let analysis = FlowAnalyzer::new().analyze(&stream);
        assert!(analysis.abandoned_cart);

        let stream = vec![
            click("https://example.com/product/tee-123", "Add to cart", 0.0),
            click("https://example.com/cart", "Proceed to checkout", 1000.0),
        ];
        let analysis = FlowAnalyzer::new().analyze(&stream);
        assert!(!analysis.abandoned_cart);
    }

    #[test]
    fn test_view_cart_only_session_is_abandoned() {
        // No add-to-cart recorded, but the shopper opened the cart and
        // never moved toward checkout
        let stream = vec![
            click("https://example.com/browse/women", "", 0.0),
            click("https://example.com/cart", "View bag", 1000.0),
        ];
        let analysis = FlowAnalyzer::new().analyze(&stream);
        assert_eq!(analysis.cart_actions.len(), 1);
        assert_eq!(analysis.cart_actions[0].kind, CartActionKind::ViewCart);
        assert!(analysis.abandoned_cart);
        assert_eq!(analysis.completion, CompletionStatus::Abandoned);
    }

    #[test]
    fn test_stage_visit_durations() {
        let stream = vec![
            click("https://example.com/browse/women", "", 0.0),
            click("https://example.com/browse/women/dresses", "", 500.0),
            click("https://example.com/product/dress-9", "", 1500.0),
        ];
        let analysis = FlowAnalyzer::new().analyze(&stream);
        assert_eq!(analysis.stages[0].stage, FunnelStage::Browse);
        assert_eq!(analysis.stages[0].duration_ms, 500.0);
    }
}

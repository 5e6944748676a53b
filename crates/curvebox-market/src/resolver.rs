//! Node date clash resolution.
//!
//! Nodes resolved against a valuation date can land on the same or nearby
//! dates (a 1M deposit and a first futures contract, say). Each node carries
//! a [`NodeDateOrder`](crate::node::NodeDateOrder); resolution runs in two
//! passes:
//!
//! 1. Repair: scan left to right. A node compares itself with its left and
//!    then its right neighbour using its own policy. A drop policy removes a
//!    node and the scan starts again from the first node. An exception
//!    policy is skipped in this pass.
//! 2. Verify: scan once more and fail on the first remaining violation.
//!
//! Drops therefore always happen before any exception is raised, so a drop
//! can remove what would otherwise have been a clash.

use std::fmt;
use std::sync::Arc;

use curvebox_core::reference_data::ReferenceData;
use curvebox_core::types::Date;

use crate::error::{MarketError, MarketResult};
use crate::node::{ClashAction, CurveNode, NodeDateOrder};

/// A node paired with its resolved date.
#[derive(Clone)]
pub struct ResolvedNode {
    /// Resolved date.
    pub date: Date,
    /// The node.
    pub node: Arc<dyn CurveNode>,
}

impl ResolvedNode {
    /// Pairs a node with a date.
    pub fn new(date: Date, node: Arc<dyn CurveNode>) -> Self {
        Self { date, node }
    }

    /// Node label.
    pub fn label(&self) -> &str {
        self.node.label()
    }

    /// Node clash policy.
    pub fn date_order(&self) -> NodeDateOrder {
        self.node.date_order()
    }
}

impl fmt::Debug for ResolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedNode")
            .field("label", &self.label())
            .field("date", &self.date)
            .finish()
    }
}

/// Which neighbour a comparison was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

/// A violation found at position `index` against one neighbour.
#[derive(Debug, Clone, Copy)]
struct Violation {
    index: usize,
    side: Side,
    action: ClashAction,
}

impl Violation {
    fn neighbour(&self) -> usize {
        match self.side {
            Side::Before => self.index - 1,
            Side::After => self.index + 1,
        }
    }

    /// Position to remove for a drop action.
    fn removal(&self) -> Option<usize> {
        match self.action {
            ClashAction::DropThis => Some(self.index),
            ClashAction::DropOther => Some(self.neighbour()),
            ClashAction::Exception => None,
        }
    }

    /// Positions of the earlier and later node of the clashing pair.
    fn pair(&self) -> (usize, usize) {
        match self.side {
            Side::Before => (self.index - 1, self.index),
            Side::After => (self.index, self.index + 1),
        }
    }
}

/// Filters a date-ordered node sequence by the nodes' clash policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeDateResolver;

impl NodeDateResolver {
    /// Resolves each node's date, keeping the input order.
    pub fn resolve_dates(
        nodes: &[Arc<dyn CurveNode>],
        valuation_date: Date,
        ref_data: &ReferenceData,
    ) -> MarketResult<Vec<ResolvedNode>> {
        nodes
            .iter()
            .map(|node| {
                let date = node.date(valuation_date, ref_data)?;
                Ok(ResolvedNode::new(date, Arc::clone(node)))
            })
            .collect()
    }

    /// Runs the repair and verification passes.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::DateClash` for the first violation left after
    /// all drops, naming the earlier and the later node of the pair.
    pub fn resolve(mut nodes: Vec<ResolvedNode>) -> MarketResult<Vec<ResolvedNode>> {
        while let Some((violation, index)) = Self::next_removal(&nodes) {
            let neighbour = &nodes[violation.neighbour()];
            let removed = &nodes[index];
            tracing::debug!(
                node = removed.label(),
                date = %removed.date,
                neighbour = neighbour.label(),
                action = %violation.action,
                "Dropping curve node on date clash"
            );
            nodes.remove(index);
        }

        if let Some(violation) = Self::first_violation(&nodes, |_| true) {
            let (first, second) = violation.pair();
            let (first, second) = (&nodes[first], &nodes[second]);
            tracing::warn!(
                first = first.label(),
                second = second.label(),
                first_date = %first.date,
                second_date = %second.date,
                "Curve node dates clash"
            );
            return Err(MarketError::date_clash(
                first.label(),
                second.label(),
                first.date,
                second.date,
            ));
        }

        Ok(nodes)
    }

    /// First violation whose action removes a node, with the index to remove.
    fn next_removal(nodes: &[ResolvedNode]) -> Option<(Violation, usize)> {
        Self::first_violation(nodes, |action| action != ClashAction::Exception)
            .and_then(|violation| violation.removal().map(|index| (violation, index)))
    }

    /// Scans left to right, checking each node against its left then right
    /// neighbour, and returns the first violation with an accepted action.
    fn first_violation(
        nodes: &[ResolvedNode],
        accept: impl Fn(ClashAction) -> bool,
    ) -> Option<Violation> {
        for (index, current) in nodes.iter().enumerate() {
            let order = current.date_order();
            if !accept(order.action) {
                continue;
            }
            if index > 0 {
                let gap = nodes[index - 1].date.days_between(&current.date);
                if order.is_violated_by(gap) {
                    return Some(Violation {
                        index,
                        side: Side::Before,
                        action: order.action,
                    });
                }
            }
            if let Some(after) = nodes.get(index + 1) {
                let gap = current.date.days_between(&after.date);
                if order.is_violated_by(gap) {
                    return Some(Violation {
                        index,
                        side: Side::After,
                        action: order.action,
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::FixedDateCurveNode;
    use proptest::prelude::*;

    fn base() -> Date {
        Date::from_ymd(2025, 1, 10).unwrap()
    }

    fn resolved(label: &str, offset: i64, order: NodeDateOrder) -> ResolvedNode {
        let date = base().add_days(offset).unwrap();
        let node = FixedDateCurveNode::new(label, date).with_date_order(order);
        ResolvedNode::new(date, Arc::new(node))
    }

    fn labels(nodes: &[ResolvedNode]) -> Vec<String> {
        nodes.iter().map(|n| n.label().to_string()).collect()
    }

    #[test]
    fn test_no_clash_is_unchanged() {
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::default()),
            resolved("b", 30, NodeDateOrder::default()),
            resolved("c", 60, NodeDateOrder::default()),
        ];
        let out = NodeDateResolver::resolve(nodes).unwrap();
        assert_eq!(labels(&out), ["a", "b", "c"]);
    }

    #[test]
    fn test_drop_this_against_left() {
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::default()),
            resolved("b", 3, NodeDateOrder::of(5, ClashAction::DropThis)),
            resolved("c", 30, NodeDateOrder::default()),
        ];
        let out = NodeDateResolver::resolve(nodes).unwrap();
        assert_eq!(labels(&out), ["a", "c"]);
    }

    #[test]
    fn test_drop_this_against_right() {
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::default()),
            resolved("b", 20, NodeDateOrder::of(5, ClashAction::DropThis)),
            resolved("c", 22, NodeDateOrder::default()),
        ];
        let out = NodeDateResolver::resolve(nodes).unwrap();
        assert_eq!(labels(&out), ["a", "c"]);
    }

    #[test]
    fn test_drop_other_removes_neighbour() {
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::default()),
            resolved("b", 2, NodeDateOrder::of(5, ClashAction::DropOther)),
            resolved("c", 30, NodeDateOrder::default()),
        ];
        let out = NodeDateResolver::resolve(nodes).unwrap();
        assert_eq!(labels(&out), ["b", "c"]);
    }

    #[test]
    fn test_drop_other_to_the_right() {
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::of(5, ClashAction::DropOther)),
            resolved("b", 2, NodeDateOrder::default()),
            resolved("c", 30, NodeDateOrder::default()),
        ];
        let out = NodeDateResolver::resolve(nodes).unwrap();
        assert_eq!(labels(&out), ["a", "c"]);
    }

    #[test]
    fn test_drop_resolves_exception_neighbour() {
        // "b" would clash with "c" under its exception policy, but "c" drops
        // itself against "b" first
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::default()),
            resolved("b", 10, NodeDateOrder::of(5, ClashAction::Exception)),
            resolved("c", 12, NodeDateOrder::of(5, ClashAction::DropThis)),
            resolved("d", 40, NodeDateOrder::default()),
        ];
        let out = NodeDateResolver::resolve(nodes).unwrap();
        assert_eq!(labels(&out), ["a", "b", "d"]);
    }

    #[test]
    fn test_exception_names_pair_left_to_right() {
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::default()),
            resolved("b", 1, NodeDateOrder::of(5, ClashAction::Exception)),
            resolved("c", 3, NodeDateOrder::default()),
        ];
        let err = NodeDateResolver::resolve(nodes).unwrap_err();
        assert_eq!(
            err,
            MarketError::date_clash("a", "b", base(), base().add_days(1).unwrap())
        );
    }

    #[test]
    fn test_same_date_default_policy_fails() {
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::default()),
            resolved("b", 0, NodeDateOrder::default()),
        ];
        assert!(matches!(
            NodeDateResolver::resolve(nodes),
            Err(MarketError::DateClash { .. })
        ));
    }

    #[test]
    fn test_zero_gap_allows_same_date() {
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::of(0, ClashAction::Exception)),
            resolved("b", 0, NodeDateOrder::of(0, ClashAction::Exception)),
        ];
        assert_eq!(NodeDateResolver::resolve(nodes).unwrap().len(), 2);
    }

    #[test]
    fn test_cascading_drops_restart_scan() {
        // every node drops itself against a close left neighbour
        let drop = NodeDateOrder::of(3, ClashAction::DropThis);
        let nodes = vec![
            resolved("a", 0, NodeDateOrder::default()),
            resolved("b", 1, drop),
            resolved("c", 2, drop),
            resolved("d", 3, drop),
            resolved("e", 10, NodeDateOrder::default()),
        ];
        let out = NodeDateResolver::resolve(nodes).unwrap();
        assert_eq!(labels(&out), ["a", "d", "e"]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(NodeDateResolver::resolve(Vec::new()).unwrap().is_empty());
        let one = vec![resolved("a", 0, NodeDateOrder::default())];
        assert_eq!(NodeDateResolver::resolve(one).unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_dates_keeps_order() {
        let nodes: Vec<Arc<dyn CurveNode>> = vec![
            Arc::new(FixedDateCurveNode::new("late", base().add_days(9).unwrap())),
            Arc::new(FixedDateCurveNode::new("early", base())),
        ];
        let out = NodeDateResolver::resolve_dates(&nodes, base(), &ReferenceData::empty()).unwrap();
        assert_eq!(labels(&out), ["late", "early"]);
        assert_eq!(out[1].date, base());
    }

    fn order_strategy() -> impl Strategy<Value = NodeDateOrder> {
        (
            0_u32..8,
            prop_oneof![
                Just(ClashAction::DropThis),
                Just(ClashAction::DropOther),
                Just(ClashAction::Exception),
            ],
        )
            .prop_map(|(gap, action)| NodeDateOrder::of(gap, action))
    }

    fn nodes_strategy() -> impl Strategy<Value = Vec<ResolvedNode>> {
        prop::collection::vec((0_i64..6, order_strategy()), 0..12).prop_map(|steps| {
            let mut offset = 0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (step, order))| {
                    offset += step;
                    resolved(&format!("n{i}"), offset, order)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_output_satisfies_every_policy(nodes in nodes_strategy()) {
            match NodeDateResolver::resolve(nodes) {
                Ok(out) => {
                    for pair in out.windows(2) {
                        let gap = pair[0].date.days_between(&pair[1].date);
                        prop_assert!(gap >= 0);
                        prop_assert!(!pair[0].date_order().is_violated_by(gap));
                        prop_assert!(!pair[1].date_order().is_violated_by(gap));
                    }
                }
                Err(err) => prop_assert!(
                    matches!(err, MarketError::DateClash { .. }),
                    "unexpected error: {}",
                    err
                ),
            }
        }

        #[test]
        fn test_resolution_is_idempotent(nodes in nodes_strategy()) {
            if let Ok(once) = NodeDateResolver::resolve(nodes) {
                let twice = NodeDateResolver::resolve(once.clone()).unwrap();
                prop_assert_eq!(labels(&once), labels(&twice));
            }
        }
    }
}

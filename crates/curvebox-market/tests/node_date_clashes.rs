//! Integration tests: node date clashes through a functional curve definition.
//!
//! Three nodes at D1 < D2 < D3 with five days between neighbours. The middle
//! node carries a ten-day minimum gap.

use std::sync::Arc;

use curvebox_market::prelude::*;

fn valuation() -> Date {
    Date::from_ymd(2025, 3, 3).unwrap()
}

fn d1() -> Date {
    Date::from_ymd(2025, 6, 2).unwrap()
}

fn definition(middle: NodeDateOrder) -> FunctionalCurveDefinition {
    FunctionalCurveDefinition::builder()
        .name("Clash")
        .y_value_type(ValueType::ZeroRate)
        .day_count(DayCountConvention::Act365Fixed)
        .node(FixedDateCurveNode::new("node1", d1()))
        .node(
            FixedDateCurveNode::new("node2", d1().add_days(5).unwrap()).with_date_order(middle),
        )
        .node(FixedDateCurveNode::new("node3", d1().add_days(10).unwrap()))
        .initial_guess(vec![0.0; 3])
        .value_function(|p, _| p[0])
        .derivative_function(|_, _| 0.0)
        .sensitivity_function(|p, _| vec![1.0; p.len()])
        .build()
        .unwrap()
}

fn labels(def: &FunctionalCurveDefinition) -> Vec<String> {
    def.nodes().iter().map(|n| n.label().to_string()).collect()
}

#[test]
fn test_drop_this_removes_middle_node() {
    let def = definition(NodeDateOrder::of(10, ClashAction::DropThis));
    let filtered = def.filtered(valuation(), &ReferenceData::empty()).unwrap();
    assert_eq!(labels(&filtered), ["node1", "node3"]);

    let meta = filtered.metadata(valuation(), &ReferenceData::empty()).unwrap();
    let dates: Vec<Date> = meta.dates().collect();
    assert_eq!(dates, vec![d1(), d1().add_days(10).unwrap()]);
}

#[test]
fn test_drop_this_on_right_gap_only() {
    // left gap is wide enough, the right one is not
    let def = FunctionalCurveDefinition::builder()
        .name("RightOnly")
        .node(FixedDateCurveNode::new("node1", d1()))
        .node(
            FixedDateCurveNode::new("node2", d1().add_days(20).unwrap())
                .with_date_order(NodeDateOrder::of(10, ClashAction::DropThis)),
        )
        .node(FixedDateCurveNode::new("node3", d1().add_days(25).unwrap()))
        .initial_guess(vec![0.0])
        .value_function(|p, _| p[0])
        .derivative_function(|_, _| 0.0)
        .sensitivity_function(|_, _| vec![1.0])
        .build()
        .unwrap();
    let filtered = def.filtered(valuation(), &ReferenceData::empty()).unwrap();
    assert_eq!(labels(&filtered), ["node1", "node3"]);
}

#[test]
fn test_exception_names_first_clash() {
    let def = definition(NodeDateOrder::of(10, ClashAction::Exception));
    let err = def.filtered(valuation(), &ReferenceData::empty()).unwrap_err();
    assert_eq!(
        err,
        MarketError::date_clash("node1", "node2", d1(), d1().add_days(5).unwrap())
    );
    assert!(err.to_string().contains("'node1' and 'node2'"));
}

#[test]
fn test_drop_other_leaves_too_few_nodes() {
    // node2 drops node1 first; after the restart it drops node3
    let def = definition(NodeDateOrder::of(10, ClashAction::DropOther));
    let err = def.filtered(valuation(), &ReferenceData::empty()).unwrap_err();
    assert_eq!(err, MarketError::insufficient_nodes(2, 1));
}

#[test]
fn test_filtering_is_idempotent() {
    let def = definition(NodeDateOrder::of(10, ClashAction::DropThis));
    let once = def.filtered(valuation(), &ReferenceData::empty()).unwrap();
    let twice = once.filtered(valuation(), &ReferenceData::empty()).unwrap();
    assert_eq!(labels(&once), labels(&twice));
}

#[test]
fn test_tenor_nodes_landing_on_same_date() {
    // 1M and 4W from a Jan 31 spot both land on Feb 28
    let valuation = Date::from_ymd(2025, 1, 29).unwrap(); // Wednesday, spot Friday Jan 31
    let nodes: Vec<Arc<dyn CurveNode>> = vec![
        Arc::new(TenorCurveNode::new("1M", Tenor::months(1), WEEKEND_CALENDAR)),
        Arc::new(
            TenorCurveNode::new("4W", Tenor::weeks(4), WEEKEND_CALENDAR)
                .with_date_order(NodeDateOrder::of(1, ClashAction::DropThis)),
        ),
        Arc::new(TenorCurveNode::new("1Y", Tenor::years(1), WEEKEND_CALENDAR)),
    ];
    let resolved =
        NodeDateResolver::resolve_dates(&nodes, valuation, &ReferenceData::standard()).unwrap();
    // Feb 28 2025 is a Friday for both
    assert_eq!(resolved[0].date, resolved[1].date);

    let kept = NodeDateResolver::resolve(resolved).unwrap();
    let labels: Vec<&str> = kept.iter().map(ResolvedNode::label).collect();
    assert_eq!(labels, ["1M", "1Y"]);
}

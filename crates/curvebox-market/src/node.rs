//! Curve nodes and their date-order policies.
//!
//! A node is a calibration anchor. It knows how to resolve its date from a
//! valuation date and reference data, and it carries a [`NodeDateOrder`]
//! that says how close a neighbouring node may sit and what to do when one
//! sits closer.

use std::fmt;

use curvebox_core::calendars::BusinessDayConvention;
use curvebox_core::reference_data::ReferenceData;
use curvebox_core::types::{Date, Tenor};
use serde::{Deserialize, Serialize};

use crate::error::MarketResult;
use crate::metadata::DatedParameterMetadata;

/// What to do when a neighbour is closer than the minimum gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClashAction {
    /// Remove the node carrying the policy.
    DropThis,
    /// Remove the neighbour.
    DropOther,
    /// Fail with a date clash.
    Exception,
}

impl fmt::Display for ClashAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClashAction::DropThis => "DROP_THIS",
            ClashAction::DropOther => "DROP_OTHER",
            ClashAction::Exception => "EXCEPTION",
        };
        write!(f, "{name}")
    }
}

/// Per-node clash policy.
///
/// A neighbour violates the policy when the whole-day gap between the two
/// dates is less than `min_gap_days`. The default requires distinct dates
/// and fails otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeDateOrder {
    /// Minimum number of days to either neighbour.
    #[serde(default = "default_min_gap_days")]
    pub min_gap_days: u32,
    /// Action taken on a violation.
    #[serde(default = "default_action")]
    pub action: ClashAction,
}

fn default_min_gap_days() -> u32 {
    1
}

fn default_action() -> ClashAction {
    ClashAction::Exception
}

impl NodeDateOrder {
    /// Creates a policy.
    #[must_use]
    pub fn of(min_gap_days: u32, action: ClashAction) -> Self {
        Self {
            min_gap_days,
            action,
        }
    }

    /// Returns true if a gap of `gap_days` breaks this policy.
    #[must_use]
    pub fn is_violated_by(&self, gap_days: i64) -> bool {
        gap_days < i64::from(self.min_gap_days)
    }
}

impl Default for NodeDateOrder {
    fn default() -> Self {
        Self::of(default_min_gap_days(), default_action())
    }
}

/// A curve calibration node.
pub trait CurveNode: fmt::Debug + Send + Sync {
    /// Label used in metadata and error messages.
    fn label(&self) -> &str;

    /// Resolves the node date.
    fn date(&self, valuation_date: Date, ref_data: &ReferenceData) -> MarketResult<Date>;

    /// Clash policy attached to this node.
    fn date_order(&self) -> NodeDateOrder;

    /// Parameter metadata for this node: its label and resolved date.
    fn metadata(
        &self,
        valuation_date: Date,
        ref_data: &ReferenceData,
    ) -> MarketResult<DatedParameterMetadata> {
        let date = self.date(valuation_date, ref_data)?;
        Ok(DatedParameterMetadata::new(date, self.label()))
    }
}

/// A node on an explicit date.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedDateCurveNode {
    label: String,
    date: Date,
    date_order: NodeDateOrder,
}

impl FixedDateCurveNode {
    /// Creates a node with the default date order.
    pub fn new(label: impl Into<String>, date: Date) -> Self {
        Self {
            label: label.into(),
            date,
            date_order: NodeDateOrder::default(),
        }
    }

    /// Sets the date order.
    #[must_use]
    pub fn with_date_order(mut self, date_order: NodeDateOrder) -> Self {
        self.date_order = date_order;
        self
    }
}

impl CurveNode for FixedDateCurveNode {
    fn label(&self) -> &str {
        &self.label
    }

    fn date(&self, _valuation_date: Date, _ref_data: &ReferenceData) -> MarketResult<Date> {
        Ok(self.date)
    }

    fn date_order(&self) -> NodeDateOrder {
        self.date_order
    }
}

/// A node at spot plus a tenor.
///
/// Spot is `spot_lag` business days after the valuation date on the node's
/// calendar. The maturity is spot plus the tenor, adjusted with the
/// business-day convention on the same calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct TenorCurveNode {
    label: String,
    tenor: Tenor,
    calendar_id: String,
    spot_lag: i32,
    convention: BusinessDayConvention,
    date_order: NodeDateOrder,
}

impl TenorCurveNode {
    /// Creates a node with a two-day spot lag, modified following adjustment
    /// and the default date order.
    pub fn new(label: impl Into<String>, tenor: Tenor, calendar_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tenor,
            calendar_id: calendar_id.into(),
            spot_lag: 2,
            convention: BusinessDayConvention::ModifiedFollowing,
            date_order: NodeDateOrder::default(),
        }
    }

    /// Sets the spot lag in business days.
    #[must_use]
    pub fn with_spot_lag(mut self, spot_lag: i32) -> Self {
        self.spot_lag = spot_lag;
        self
    }

    /// Sets the business-day convention.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the date order.
    #[must_use]
    pub fn with_date_order(mut self, date_order: NodeDateOrder) -> Self {
        self.date_order = date_order;
        self
    }

    /// The node tenor.
    pub fn tenor(&self) -> Tenor {
        self.tenor
    }
}

impl CurveNode for TenorCurveNode {
    fn label(&self) -> &str {
        &self.label
    }

    fn date(&self, valuation_date: Date, ref_data: &ReferenceData) -> MarketResult<Date> {
        let calendar = ref_data.calendar(&self.calendar_id)?;
        let spot = calendar.add_business_days(valuation_date, self.spot_lag)?;
        let maturity = self.tenor.add_to(spot)?;
        Ok(calendar.adjust(maturity, self.convention)?)
    }

    fn date_order(&self) -> NodeDateOrder {
        self.date_order
    }
}

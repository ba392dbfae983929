//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a payment settlement.
#[derive(Clone, Copy, Debug)]
pub struct Settlement;

/// Marker type describing a due deadline.
#[derive(Clone, Copy, Debug)]
pub struct Due;

/// Marker type describing a period start.
#[derive(Clone, Copy, Debug)]
pub struct PeriodStart;

/// Marker type describing a period end.
#[derive(Clone, Copy, Debug)]
pub struct PeriodEnd;

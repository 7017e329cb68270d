/// Custom actions for the Inventory actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryAction {
    /// Add `delta` (negative to remove). Fails rather than going below zero.
    Adjust(i64),
    /// Overwrite the quantity. Fails for negative values.
    Set(i64),
}

/// Results for Inventory actions. Each carries the quantity after the change.
///
/// Kept 1:1 with [`InventoryAction`] so callers can check they got the answer to
/// the question they asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryActionResult {
    Adjust(i64),
    Set(i64),
}

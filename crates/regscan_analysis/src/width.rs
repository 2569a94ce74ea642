//! Bit-width resolution from packed dimensions.

use regscan_config::TagConfig;
use regscan_tree::{collect_leaves, NodeId, Tree};

/// Resolves the width of a packed-dimension subtree such as `[7:0]`.
///
/// The first two numeric literals are taken as the MSB and LSB and the width
/// is `|MSB - LSB| + 1`. Returns `None` when there are fewer than two
/// literals or one of them is not a plain decimal number; callers fall back
/// to a width of 1.
///
/// Only literals are read, so a bound written as an expression like
/// `WIDTH-1` contributes just its literal operand.
pub fn packed_width(tree: &Tree, dims: NodeId, tags: &TagConfig) -> Option<u64> {
    let bounds = collect_leaves(tree, dims)
        .into_iter()
        .filter(|leaf| tags.is_numeric_literal(&leaf.tag))
        .take(2)
        .map(|leaf| parse_decimal(&leaf.text))
        .collect::<Option<Vec<i64>>>()?;
    match bounds[..] {
        [msb, lsb] => msb.abs_diff(lsb).checked_add(1),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    digits.parse().ok()
}

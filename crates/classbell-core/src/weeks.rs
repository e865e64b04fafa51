//! Active-week expressions ("1-18", "5-10", "1,3,5-9").
//!
//! Lives in core so the config loader can reject malformed expressions at
//! load time instead of mid-pass.

use std::collections::BTreeSet;

use crate::error::{ClassbellError, Result};

/// Parse a week expression into the set of active week numbers.
/// Comma-separated single numbers and inclusive `a-b` ranges are accepted;
/// anything else is an error.
pub fn parse_weeks(expr: &str) -> Result<BTreeSet<u32>> {
    let mut weeks = BTreeSet::new();
    for token in expr.split(',') {
        let token = token.trim();
        if let Some((a, b)) = token.split_once('-') {
            let start: u32 = a
                .trim()
                .parse()
                .map_err(|_| ClassbellError::week_expr(expr))?;
            let end: u32 = b
                .trim()
                .parse()
                .map_err(|_| ClassbellError::week_expr(expr))?;
            if start == 0 || end < start {
                return Err(ClassbellError::week_expr(expr));
            }
            weeks.extend(start..=end);
        } else {
            let week: u32 = token.parse().map_err(|_| ClassbellError::week_expr(expr))?;
            if week == 0 {
                return Err(ClassbellError::week_expr(expr));
            }
            weeks.insert(week);
        }
    }
    Ok(weeks)
}

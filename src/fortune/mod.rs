//! Fortune aggregation.
//!
//! At game over the board and the queue are read as one card population and
//! summarized into a [`FortuneReport`]:
//!
//! - **Tier histogram**: cards per tier, zero for absent tiers
//! - **Dominant suits**: top suits by count, with display emoji and label
//! - **Volatility**: weighted tier sum cut into stable / mixed / volatile
//! - **Summary label**: small decision tree over the histogram
//!
//! Every threshold comes from `FortuneConfig`. The only input that is not a
//! function of the cards is the timestamp.

mod aggregator;
mod report;

pub use aggregator::{classify_volatility, evaluate_fortune, summary_label, volatility_score};
pub use report::{FortuneReport, SuitHighlight, SummaryLabel, TierCounts, Volatility};

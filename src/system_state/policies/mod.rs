mod layer_ranking;
mod risk_thresholds;

pub use layer_ranking::LayerRanking;
pub use risk_thresholds::RiskThresholds;

use chrono::{DateTime, Utc};
use connectx_agent::arena::MatchReport;
use connectx_engine::{GameConfig, GameSeed};
use serde::{Deserialize, Serialize};

/// Saved result of an `evaluate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// When the evaluation finished (ISO 8601)
    pub evaluated_at: DateTime<Utc>,
    /// Seed of the random source shared by both agents
    pub seed: GameSeed,
    pub config: GameConfig,
    pub agent1: AgentInfo,
    pub agent2: AgentInfo,
    pub report: MatchReport,
}

/// How an agent was configured for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub kind: String,
    /// Search settings; only present for the minimax agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInfo {
    pub depth: usize,
    pub heuristic: String,
    pub alpha_beta: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let record = EvaluationRecord {
            evaluated_at: Utc::now(),
            seed: GameSeed::from_u128(0xabc),
            config: GameConfig::CONNECT_FOUR,
            agent1: AgentInfo {
                kind: "minimax".to_owned(),
                search: Some(SearchInfo {
                    depth: 3,
                    heuristic: "minimax-tuned".to_owned(),
                    alpha_beta: false,
                    deadline_ms: None,
                }),
            },
            agent2: AgentInfo {
                kind: "random".to_owned(),
                search: None,
            },
            report: MatchReport {
                rounds: 2,
                agent1_wins: 2,
                ..MatchReport::default()
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["seed"], "00000000000000000000000000000abc");
        assert_eq!(json["config"]["inarow"], 4);
        assert!(json["agent2"].get("search").is_none());

        let back: EvaluationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.report, record.report);
        assert_eq!(back.seed, record.seed);
    }
}

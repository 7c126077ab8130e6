use crate::{AutoplayError, Strategy};
use digitduel_core::{format_move, Digit, MoveValue, Mover, Operator, RoundOutcome};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    Finished,
    MaxSteps,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoveRecord {
    pub turn: u32,
    pub mover: Mover,
    pub digits: Vec<Digit>,
    pub operator: Operator,
    pub value: MoveValue,
    pub score_after: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRecord {
    pub round: u32,
    pub level: u8,
    pub target: i64,
    pub status: RoundStatus,
    pub outcome: RoundOutcome,
    pub player: i64,
    pub ai: i64,
    #[serde(default)]
    pub best_play: Option<String>,
    pub moves: Vec<MoveRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryStats {
    pub rounds: u32,
    pub player_wins: u32,
    pub ai_wins: u32,
    pub stalled: u32,
    pub moves: u32,
    pub highest_level: u8,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationReport {
    pub seed: u64,
    pub strategy: Strategy,
    pub rounds: Vec<RoundRecord>,
    pub summary: SummaryStats,
}

impl SimulationReport {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("seed: {} strategy: {}", self.seed, self.strategy),
            format!(
                "summary: rounds={} player_wins={} ai_wins={} stalled={} moves={} highest_level={} wall_ms={}",
                self.summary.rounds,
                self.summary.player_wins,
                self.summary.ai_wins,
                self.summary.stalled,
                self.summary.moves,
                self.summary.highest_level,
                self.summary.wall_time_ms
            ),
            String::new(),
        ];
        for round in &self.rounds {
            lines.push(format!(
                "round {:>3} | level {} target {} | {} | player {} ai {}",
                round.round,
                round.level,
                round.target,
                outcome_label(round.outcome, round.status),
                round.player,
                round.ai
            ));
            for item in &round.moves {
                lines.push(format!(
                    "    {:>3} {:<6} {} = {} -> {}",
                    item.turn,
                    mover_label(item.mover),
                    format_move(&item.digits, item.operator),
                    item.value,
                    item.score_after
                ));
            }
            if let Some(play) = round.best_play.as_ref() {
                lines.push(format!("    best play: {play}"));
            }
        }
        lines.join("\n")
    }
}

fn mover_label(mover: Mover) -> &'static str {
    match mover {
        Mover::Player => "player",
        Mover::Ai => "ai",
    }
}

fn outcome_label(outcome: RoundOutcome, status: RoundStatus) -> &'static str {
    if status == RoundStatus::MaxSteps {
        return "stalled";
    }
    match outcome {
        RoundOutcome::InProgress => "in progress",
        RoundOutcome::PlayerReachedTarget => "player reached target",
        RoundOutcome::PlayerOverTarget => "player over target",
        RoundOutcome::AiReachedTarget => "ai reached target",
        RoundOutcome::AiOverTarget => "ai over target",
        RoundOutcome::TimeExpired => "time expired",
    }
}

pub fn write_json(path: &Path, report: &SimulationReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body)?;
    Ok(())
}

/// Writes the text report for a `.txt` path, JSON otherwise.
pub fn write_report(path: &Path, report: &SimulationReport) -> Result<(), AutoplayError> {
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if is_text {
        write_text(path, report)
    } else {
        write_json(path, report)
    }
}

pub fn write_text(path: &Path, report: &SimulationReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report.to_text_report())?;
    Ok(())
}

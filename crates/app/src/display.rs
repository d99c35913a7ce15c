//! Plain-text rendering of a week for the terminal

use std::fmt::Write;

use pairwise_core::{Period, Phase};

/// Render roster, phase and (if any) schedule of a week
pub fn render_period(period: &Period, registration_open: bool, capacity: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Week: {}", period.key);
    match period.phase() {
        Phase::Locked => {
            let _ = writeln!(out, "Entries are LOCKED.");
        }
        Phase::Collecting if registration_open => {
            let _ = writeln!(
                out,
                "Entries are OPEN ({}/{} players).",
                period.roster.len(),
                capacity
            );
        }
        Phase::Collecting => {
            let _ = writeln!(out, "Entries are closed today.");
        }
    }

    let _ = writeln!(out, "\nPlayers:");
    if period.roster.is_empty() {
        let _ = writeln!(out, "  (none yet)");
    }
    for (i, name) in period.roster.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, name);
    }

    if period.locked {
        let _ = writeln!(out, "\nSchedule:");
        if period.schedule.is_empty() {
            let _ = writeln!(out, "  No schedule generated.");
        }
        for round in &period.schedule {
            let _ = writeln!(out, "  Match {}", round.number);
            for group in &round.groups {
                let _ = writeln!(
                    out,
                    "    Court {}: {}  vs  {}",
                    group.id,
                    group.team_a.join(" & "),
                    group.team_b.join(" & ")
                );
            }
        }
    }

    out
}

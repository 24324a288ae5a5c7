//! Command to execute a scripted sequence of operations.
//!
//! A script is a YAML list of steps run in order on a fresh system built
//! from the effective layout:
//!
//! ```yaml
//! - op: buy
//!   passenger: alice
//!   route: 1
//!   departure: 1
//!   arrival: 3
//! - op: inquiry
//!   route: 1
//!   departure: 1
//!   arrival: 3
//! - op: refund
//!   step: 0
//! - op: restore
//!   ticket:
//!     id: 41
//!     passenger: bob
//!     route: 1
//!     departure: 2
//!     arrival: 4
//!     coach: 1
//!     seat: 2
//! ```
//!
//! A refund names the 0-based index of an earlier `buy` or `restore` step.
//! A restore re-books the exact seat of a recorded ticket, so a log of
//! issued tickets can be loaded before the rest of the script runs.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use serde::Deserialize;
use seatline::{Ticket, TicketingSystem};
use std::path::PathBuf;

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// Buy a ticket.
    Buy {
        passenger: String,
        route: u32,
        departure: u32,
        arrival: u32,
    },
    /// Count free seats.
    Inquiry {
        route: u32,
        departure: u32,
        arrival: u32,
    },
    /// Refund the ticket bought or restored at `step`.
    Refund { step: usize },
    /// Re-book the seat recorded on `ticket`.
    Restore { ticket: Ticket },
}

/// State of the ticket produced by a buy or restore step.
enum Issued {
    Held(Ticket),
    Restored(Ticket),
    Refunded,
    NotIssued,
}

/// Execute a replay script.
#[derive(Args)]
pub struct ReplayCommand {
    /// YAML script to execute
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

impl ReplayCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !self.script.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.script.display()
            )));
        }

        let contents = std::fs::read_to_string(&self.script)?;
        let steps: Vec<Step> = serde_yaml::from_str(&contents).map_err(|e| {
            CliError::InvalidArguments(format!("Cannot parse {}: {e}", self.script.display()))
        })?;

        let config = load_configuration(global, None)?;
        let system = TicketingSystem::from_config(&config)?;

        let rejected = run_steps(&system, &steps)?;
        if rejected > 0 {
            return Err(CliError::SemanticFailure(format!(
                "{rejected} replay step(s) rejected"
            )));
        }

        if !global.quiet {
            eprintln!("Replayed {} step(s)", steps.len());
        }
        Ok(())
    }
}

/// Runs `steps` in order, printing one line each.
///
/// Returns how many refunds and restores were rejected.
fn run_steps(system: &TicketingSystem, steps: &[Step]) -> Result<usize, CliError> {
    let mut issued: Vec<Option<Issued>> = Vec::with_capacity(steps.len());
    let mut rejected = 0;

    for (index, step) in steps.iter().enumerate() {
        match step {
            Step::Buy {
                passenger,
                route,
                departure,
                arrival,
            } => match system.buy(passenger, *route, *departure, *arrival)? {
                Some(ticket) => {
                    println!(
                        "[{index}] buy {passenger} route {route} {departure}->{arrival}: ticket #{} coach {} seat {}",
                        ticket.id, ticket.coach, ticket.seat
                    );
                    issued.push(Some(Issued::Held(ticket)));
                }
                None => {
                    println!(
                        "[{index}] buy {passenger} route {route} {departure}->{arrival}: sold out"
                    );
                    issued.push(Some(Issued::NotIssued));
                }
            },
            Step::Inquiry {
                route,
                departure,
                arrival,
            } => {
                let free = system.inquiry(*route, *departure, *arrival)?;
                println!("[{index}] inquiry route {route} {departure}->{arrival}: {free} seat(s)");
                issued.push(None);
            }
            Step::Refund { step } => {
                let slot = issued
                    .get_mut(*step)
                    .and_then(Option::as_mut)
                    .ok_or_else(|| {
                        CliError::InvalidArguments(format!(
                            "step {index}: refund must name an earlier buy or restore step, got {step}"
                        ))
                    })?;
                let outcome = match std::mem::replace(slot, Issued::Refunded) {
                    Issued::Held(ticket) => {
                        if system.refund(&ticket) {
                            "ok"
                        } else {
                            *slot = Issued::Held(ticket);
                            "rejected"
                        }
                    }
                    Issued::Restored(ticket) => {
                        if system.refund_replay(&ticket) {
                            "ok"
                        } else {
                            *slot = Issued::Restored(ticket);
                            "rejected"
                        }
                    }
                    Issued::Refunded => "rejected (already refunded)",
                    Issued::NotIssued => {
                        *slot = Issued::NotIssued;
                        "rejected (no ticket issued)"
                    }
                };
                if outcome != "ok" {
                    rejected += 1;
                }
                println!("[{index}] refund step {step}: {outcome}");
                issued.push(None);
            }
            Step::Restore { ticket } => {
                if system.buy_replay(ticket) {
                    println!("[{index}] restore {ticket}: ok");
                    issued.push(Some(Issued::Restored(ticket.clone())));
                } else {
                    println!("[{index}] restore {ticket}: rejected");
                    rejected += 1;
                    issued.push(Some(Issued::NotIssued));
                }
            }
        }
    }

    Ok(rejected)
}

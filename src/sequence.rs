/*
 * Copyright (C) 2024 Aspect
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use std::io::{self, Write};
use std::time::Duration;

use log::*;
use strum::Display;

use crate::contact::{PhaseFlags, TouchContact};
use crate::error::SimulationError;
use crate::injector::{FeedbackMode, TouchInjector};

/// Only one finger is ever simulated.
pub const CONTACT_ID: u32 = 0;

/// Contacts the injection context is sized for.
pub const MAX_CONTACTS: u32 = 10;

pub const FEEDBACK: FeedbackMode = FeedbackMode::Default;

/// Delay between consecutive injections.
pub const PAUSE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Down,
    Move,
    Up,
}

impl Phase {
    pub fn flags(self) -> PhaseFlags {
        match self {
            Phase::Down => PhaseFlags::DOWN | PhaseFlags::IN_RANGE | PhaseFlags::IN_CONTACT,
            Phase::Move => PhaseFlags::UPDATE | PhaseFlags::IN_RANGE | PhaseFlags::IN_CONTACT,
            Phase::Up => PhaseFlags::UP,
        }
    }

    fn preposition(self) -> &'static str {
        match self {
            Phase::Move => "to",
            Phase::Down | Phase::Up => "at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub phase: Phase,
    pub x: i32,
    pub y: i32,
}

impl Step {
    const fn new(phase: Phase, x: i32, y: i32) -> Self {
        Self { phase, x, y }
    }

    pub fn contact(&self) -> TouchContact {
        TouchContact::new(self.phase.flags(), self.x, self.y, CONTACT_ID)
    }
}

/// A single drag: press, two moves, release.
pub const DEMO_SEQUENCE: [Step; 4] = [
    Step::new(Phase::Down, 300, 300),
    Step::new(Phase::Move, 400, 350),
    Step::new(Phase::Move, 500, 400),
    Step::new(Phase::Up, 500, 400),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Injection of `step` (0-based) failed; later steps were skipped.
    Aborted { step: usize },
    InitializationFailed,
}

impl Outcome {
    /// Only a failed initialization is reported through the exit status.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::InitializationFailed => 1,
            Outcome::Completed | Outcome::Aborted { .. } => 0,
        }
    }
}

pub fn initialize<I: TouchInjector>(injector: &mut I) -> Result<(), SimulationError> {
    injector
        .initialize(MAX_CONTACTS, FEEDBACK)
        .map_err(SimulationError::Initialization)
}

/// Injects `steps` one contact at a time with `pause` between injections.
/// Stops at the first rejected injection and returns its index with the error.
pub fn play<I: TouchInjector>(
    injector: &mut I,
    steps: &[Step],
    pause: Duration,
) -> Result<(), (usize, SimulationError)> {
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            std::thread::sleep(pause);
        }

        println!(
            "Simulating touch {} {} ({}, {})",
            step.phase,
            step.phase.preposition(),
            step.x,
            step.y
        );
        let contact = step.contact();
        debug!("Injecting {contact:?}");

        if let Err(source) = injector.inject(&[contact]) {
            return Err((
                i,
                SimulationError::Injection {
                    phase: step.phase,
                    x: step.x,
                    y: step.y,
                    source,
                },
            ));
        }
    }

    Ok(())
}

/// Runs the whole demo: initialize, then the drag sequence.
pub fn run<I: TouchInjector>(injector: &mut I) -> Outcome {
    if let Err(e) = initialize(injector) {
        report(&e, &mut io::stderr()).ok();
        return Outcome::InitializationFailed;
    }

    match play(injector, &DEMO_SEQUENCE, PAUSE) {
        Ok(()) => {
            println!("Touch simulation complete.");
            Outcome::Completed
        }
        Err((step, e)) => {
            if let SimulationError::Injection { x, y, .. } = &e {
                debug!("Contact at ({x}, {y}) was rejected, skipping the rest");
            }
            report(&e, &mut io::stderr()).ok();
            Outcome::Aborted { step }
        }
    }
}

/// Writes the diagnostic lines for `err`, including the elevation hint when
/// initialization was refused.
pub fn report(err: &SimulationError, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{err}")?;
    if let SimulationError::Initialization(source) = err {
        if source.is_access_denied() {
            writeln!(
                out,
                "Touch injection requires administrative privileges or UI Access."
            )?;
        }
    }
    Ok(())
}

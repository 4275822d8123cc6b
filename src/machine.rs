//! Phase state machine.
//!
//! Every phase change goes through [`transition`], a single
//! `(phase, command) -> (next phase, effects)` table. Commands that the
//! table does not list are rejected and leave the session untouched.
//!
//! ```text
//! SelectLine -> SelectStation -> SelectTrain -> SetDestination -> Tracking -> Completed
//!      ^             |  ^            |  ^             |                           |
//!      +---- back ---+  +--- back ---+  +---- back ---+                           |
//!      +------------------------------- reset (from any phase) -------------------+
//! ```

use crate::error::TransitionError;

/// Wizard and tracking phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    SelectLine,
    SelectStation,
    SelectTrain,
    SetDestination,
    Tracking,
    Completed,
}

impl Phase {
    pub fn title(&self) -> &'static str {
        match self {
            Phase::SelectLine => "Choose your line",
            Phase::SelectStation => "Where do you board?",
            Phase::SelectTrain => "Pick your train",
            Phase::SetDestination => "Where do you get off?",
            Phase::Tracking => "Tracking",
            Phase::Completed => "Arrived",
        }
    }

    /// 1-based step number shown in the header
    pub fn step(&self) -> usize {
        match self {
            Phase::SelectLine => 1,
            Phase::SelectStation => 2,
            Phase::SelectTrain => 3,
            Phase::SetDestination => 4,
            Phase::Tracking => 5,
            Phase::Completed => 6,
        }
    }

    pub fn can_go_back(&self) -> bool {
        matches!(
            self,
            Phase::SelectStation | Phase::SelectTrain | Phase::SetDestination
        )
    }
}

/// Events that may move the session between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ChooseLine,
    /// Station lookup returned trains for the chosen line
    StationMatched,
    /// Station lookup returned nothing usable; phase stays put
    StationUnmatched,
    ChooseTrain,
    ChooseDestination,
    AcknowledgeAlarm,
    StopTracking,
    Reset,
    Back,
}

/// Side effects the owner of the runtime handles must carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartPolling,
    StopPolling,
    SilenceAlarm,
    ClearSelections,
    ForgetLine,
    ForgetStation,
    ForgetTrain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: Phase,
    pub effects: Vec<Effect>,
}

impl Step {
    fn to(next: Phase) -> Self {
        Self {
            next,
            effects: Vec::new(),
        }
    }

    fn with(next: Phase, effects: &[Effect]) -> Self {
        Self {
            next,
            effects: effects.to_vec(),
        }
    }
}

/// Look up the transition for `command` in `phase`
pub fn transition(phase: Phase, command: Command) -> Result<Step, TransitionError> {
    use Command::*;
    use Phase::*;

    let step = match (phase, command) {
        (_, Reset) => Step::with(
            SelectLine,
            &[Effect::StopPolling, Effect::SilenceAlarm, Effect::ClearSelections],
        ),

        (SelectLine, ChooseLine) => Step::to(SelectStation),
        (SelectStation, StationMatched) => Step::to(SelectTrain),
        (SelectStation, StationUnmatched) => Step::to(SelectStation),
        (SelectTrain, ChooseTrain) => Step::to(SetDestination),
        (SetDestination, ChooseDestination) => Step::with(Tracking, &[Effect::StartPolling]),
        (Tracking, AcknowledgeAlarm) | (Tracking, StopTracking) => Step::with(
            Completed,
            &[Effect::StopPolling, Effect::SilenceAlarm],
        ),

        (SelectStation, Back) => Step::with(SelectLine, &[Effect::ForgetLine]),
        (SelectTrain, Back) => Step::with(SelectStation, &[Effect::ForgetStation]),
        (SetDestination, Back) => Step::with(SelectTrain, &[Effect::ForgetTrain]),

        (phase, command) => return Err(TransitionError { phase, command }),
    };

    Ok(step)
}

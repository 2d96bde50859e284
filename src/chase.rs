//! Timed evasion sequence after the basement duel.
//!
//! A small directed graph of timed decision points. Every node gives the
//! player a few seconds to type one of its choices; hesitation or any
//! unrecognized token means capture, with a reason specific to where the
//! player froze. There are no retries here, unlike the bartender's puzzle.

use std::time::Duration;

use log::info;

use crate::input::{DeadlinePrompt, TimedAnswer};

/// How long the player has to answer at each node.
pub const CHASE_DEADLINE: Duration = Duration::from_secs(8);

/// Decision points in the evasion graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeId {
    Taproom,
    Hide,
    Run,
    Kitchen,
    Blend,
}

/// Where a recognized choice leads.
#[derive(Debug, Clone, Copy)]
pub enum ChaseStep {
    Goto(NodeId),
    Escape,
    Capture(&'static str),
}

/// One timed decision point.
pub struct ChaseNode {
    pub prompt: &'static str,
    /// Reason reported when the player times out or types something else.
    pub failure: &'static str,
    pub choices: &'static [(&'static str, ChaseStep)],
}

static TAPROOM: ChaseNode = ChaseNode {
    prompt: "The tavern doors slam open. Armored silhouettes fan out through the neon \
             haze, scanners sweeping for the carrier. Seconds. You have seconds.\n\
             Do you HIDE, RUN, or BLEND in with the crowd? ",
    failure: "You freeze in the open floor, and a scanner beam settles on your face.",
    choices: &[
        ("hide", ChaseStep::Goto(NodeId::Hide)),
        ("run", ChaseStep::Goto(NodeId::Run)),
        ("blend", ChaseStep::Goto(NodeId::Blend)),
    ],
};

static HIDE: ChaseNode = ChaseNode {
    prompt: "You drop behind an overturned table. Boots ring closer on the deck plating. \
             There's a ventilation grate just within reach.\n\
             Do you STAY put, or CRAWL for the grate? ",
    failure: "You hesitate behind the table a heartbeat too long, and a gauntlet closes on your collar.",
    choices: &[
        (
            "stay",
            ChaseStep::Capture("A scanner sweep paints the table edge, and they haul you out from behind it."),
        ),
        ("crawl", ChaseStep::Escape),
    ],
};

static RUN: ChaseNode = ChaseNode {
    prompt: "You bolt for the back corridor. A hunter rounds the corner ahead, rifle \
             rising. The kitchen hatch is on your left.\n\
             Do you DIVE through the hatch, or SPRINT past him? ",
    failure: "You stall mid-stride in the corridor, a clean target in the strobing light.",
    choices: &[
        ("dive", ChaseStep::Goto(NodeId::Kitchen)),
        (
            "sprint",
            ChaseStep::Capture("The hunter is faster. A stun round folds you onto the deck before the exit."),
        ),
    ],
};

static KITCHEN: ChaseNode = ChaseNode {
    prompt: "You tumble into the galley, all steam and clattering pans. The cook staff \
             stare. A service door stands ajar behind the ovens.\n\
             Do you go QUIET along the wall, or KICK the door wide? ",
    failure: "You stand dripping in the steam while the hatch bangs open behind you.",
    choices: &[
        ("quiet", ChaseStep::Escape),
        (
            "kick",
            ChaseStep::Capture("The door booms against the bulkhead, and every hunter on the deck converges on the sound."),
        ),
    ],
};

static BLEND: ChaseNode = ChaseNode {
    prompt: "You slide into the crush of patrons by the stage, head down. Scanners pan \
             across the faces around you. A maintenance vent yawns low in the far wall.\n\
             Do you stay with the CROWD, or slip toward the VENTS? ",
    failure: "You dither at the edge of the crowd, and the crowd helpfully steps away from you.",
    choices: &[
        (
            "crowd",
            ChaseStep::Capture("The scanners know your face better than you do. The crowd parts around the hunters."),
        ),
        ("vents", ChaseStep::Escape),
    ],
};

/// Look up a node's data.
pub fn node(id: NodeId) -> &'static ChaseNode {
    match id {
        NodeId::Taproom => &TAPROOM,
        NodeId::Hide => &HIDE,
        NodeId::Run => &RUN,
        NodeId::Kitchen => &KITCHEN,
        NodeId::Blend => &BLEND,
    }
}

/// Resolve a token at a node. `None` means unrecognized, which captures.
pub fn resolve(id: NodeId, token: &str) -> Option<ChaseStep> {
    let wanted = token.trim().to_lowercase();
    node(id)
        .choices
        .iter()
        .find(|(choice, _)| *choice == wanted)
        .map(|(_, step)| *step)
}

/// Terminal result of the chase. Neither outcome persists any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChaseOutcome {
    Escaped,
    Captured(String),
}

/// Drive the evasion graph from the taproom until a terminal outcome.
pub fn run_chase(prompt: &mut impl DeadlinePrompt) -> ChaseOutcome {
    let mut current = NodeId::Taproom;
    loop {
        let here = node(current);
        match prompt.ask(here.prompt, CHASE_DEADLINE) {
            TimedAnswer::Line(token) => match resolve(current, &token) {
                Some(ChaseStep::Goto(next)) => {
                    info!("chase: {current:?} -> {next:?} on '{token}'");
                    current = next;
                },
                Some(ChaseStep::Escape) => {
                    info!("chase: escaped at {current:?} on '{token}'");
                    return ChaseOutcome::Escaped;
                },
                Some(ChaseStep::Capture(reason)) => {
                    info!("chase: captured at {current:?} on '{token}'");
                    return ChaseOutcome::Captured(reason.to_string());
                },
                None => {
                    info!("chase: captured at {current:?} on unrecognized '{token}'");
                    return ChaseOutcome::Captured(here.failure.to_string());
                },
            },
            TimedAnswer::TimedOut | TimedAnswer::Closed => {
                info!("chase: captured at {current:?} on timeout");
                return ChaseOutcome::Captured(here.failure.to_string());
            },
        }
    }
}

//! Transmission sequencing.
//!
//! Decides, per frame, what goes over the link:
//!
//! | Payload vs last sent | Reversing | Primed | Writes            | Primed after |
//! |----------------------|-----------|--------|-------------------|--------------|
//! | same                 | any       | any    | none              | unchanged    |
//! | different            | no        | any    | `c`               | false        |
//! | different            | yes       | true   | `c`               | true         |
//! | different            | yes       | false  | `c`, neutral, `c` | true         |
//!
//! ESCs that need a neutral pulse before accepting reverse get one exactly
//! once per reversal episode.  The plan is computed first and committed only
//! after every write of it succeeded, so a failed write is retried next frame.

use crate::link::Payload;

/// What to send this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Payload already on the wire.
    Skip,
    /// Send once; not reversing.
    Send,
    /// Send once; reversal already primed.
    SendReversing,
    /// Send, then neutral, then send again.
    PrimeReverse,
}

impl Plan {
    /// Number of link writes this plan performs.
    pub fn writes(self) -> usize {
        match self {
            Self::Skip => 0,
            Self::Send | Self::SendReversing => 1,
            Self::PrimeReverse => 3,
        }
    }
}

/// Last transmitted payload plus the reversal-primed flag.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    last_sent: Option<Payload>,
    reverse_primed: bool,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self, payload: &Payload, reversing: bool) -> Plan {
        if self.last_sent.as_ref() == Some(payload) {
            Plan::Skip
        } else if !reversing {
            Plan::Send
        } else if self.reverse_primed {
            Plan::SendReversing
        } else {
            Plan::PrimeReverse
        }
    }

    /// Record a plan whose writes all succeeded.
    pub fn commit(&mut self, payload: Payload, plan: Plan) {
        match plan {
            Plan::Skip => return,
            Plan::Send => self.reverse_primed = false,
            Plan::SendReversing => {}
            Plan::PrimeReverse => self.reverse_primed = true,
        }
        self.last_sent = Some(payload);
    }

    /// Forget the last payload and the primed flag, so the next command is
    /// always sent and the next reversal is primed again.
    pub fn reset(&mut self) {
        self.last_sent = None;
        self.reverse_primed = false;
    }

    pub fn last_sent(&self) -> Option<&Payload> {
        self.last_sent.as_ref()
    }

    pub fn is_reverse_primed(&self) -> bool {
        self.reverse_primed
    }
}

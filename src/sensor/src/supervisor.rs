use log::*;
use tock_registers::LocalRegisterCopy;

use crate::bus::{BusController, Phase, Transport};
use crate::error::{Error, Step};
use crate::registers::ISR;

/// Poll iterations allowed for one phase wait.
///
/// This counts status reads, not milliseconds. The elapsed time depends on
/// the cost of one poll, roughly a register read and a compare on the target.
pub const DEFAULT_POLL_BUDGET: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Nack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    TimedOut,
    Rejected(Rejection),
}

impl Outcome {
    pub fn into_result(self, step: Step) -> Result<(), Error> {
        match self {
            Outcome::Success => Ok(()),
            Outcome::TimedOut => Err(Error::Timeout(step)),
            Outcome::Rejected(Rejection::Nack) => Err(Error::Rejected(step)),
        }
    }
}

/// Status predicates the protocol waits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    BusIdle,
    TransmitReady,
    // The byte left the shift register and the next phase became ready
    ByteTransferred,
    ReceiveReady,
    TransferComplete,
    StopDetected,
}

impl Condition {
    pub fn holds(self, status: LocalRegisterCopy<u32, ISR::Register>) -> bool {
        match self {
            Condition::BusIdle => !status.is_set(ISR::BUSY),
            Condition::TransmitReady => status.is_set(ISR::TXIS),
            Condition::ByteTransferred => status.is_set(ISR::TXIS) || status.is_set(ISR::TC),
            Condition::ReceiveReady => status.is_set(ISR::RXNE),
            Condition::TransferComplete => status.is_set(ISR::TC),
            Condition::StopDetected => status.is_set(ISR::STOPF),
        }
    }
}

/// Evaluate `predicate` at most `max_iterations` times.
pub fn await_condition(mut predicate: impl FnMut() -> bool, max_iterations: u32) -> Outcome {
    let mut countdown = max_iterations;
    while countdown > 0 {
        if predicate() {
            return Outcome::Success;
        }
        countdown -= 1;
    }
    Outcome::TimedOut
}

pub fn check_acknowledgment(status: LocalRegisterCopy<u32, ISR::Register>) -> Outcome {
    if status.is_set(ISR::NACKF) {
        Outcome::Rejected(Rejection::Nack)
    } else {
        Outcome::Success
    }
}

/// Bounded waits on a transport.
///
/// Any outcome other than `Success` must be followed by [`Supervisor::terminate`]
/// before control returns to the caller of the protocol operation.
#[derive(Clone, Copy, Debug)]
pub struct Supervisor {
    poll_budget: u32,
}

impl Default for Supervisor {
    fn default() -> Self {
        Supervisor::new(DEFAULT_POLL_BUDGET)
    }
}

impl Supervisor {
    pub const fn new(poll_budget: u32) -> Self {
        Supervisor { poll_budget }
    }

    /// Wait for `condition`, then check for a NACK.
    ///
    /// A NACK ends the wait early, a rejected address never raises TXIS or
    /// RXNE and would otherwise look like a timeout.
    pub fn gate<C: BusController>(&self, bus: &Transport<C>, condition: Condition) -> Outcome {
        let outcome = await_condition(
            || {
                let status = bus.status();
                condition.holds(status) || status.is_set(ISR::NACKF)
            },
            self.poll_budget,
        );
        match outcome {
            Outcome::Success => check_acknowledgment(bus.status()),
            other => other,
        }
    }

    pub fn wait_idle<C: BusController>(&self, bus: &Transport<C>) -> Outcome {
        await_condition(
            || bus.transaction().phase == Phase::Idle && Condition::BusIdle.holds(bus.status()),
            self.poll_budget,
        )
    }

    /// Issue the stop condition and return the transport to idle.
    pub fn terminate<C: BusController>(&self, bus: &mut Transport<C>) {
        bus.end_transaction();
        let outcome = await_condition(
            || Condition::StopDetected.holds(bus.status()),
            self.poll_budget,
        );
        if outcome != Outcome::Success {
            warn!("Stop condition not detected after {} polls", self.poll_budget);
        }
        bus.release();
    }
}

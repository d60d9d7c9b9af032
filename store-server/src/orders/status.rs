//! Order Status State Machine
//!
//! Pure transition table for the order lifecycle. Forward path:
//! `NotProcessed → Processing → Shipped → Delivered`; side branches for
//! customer cancel/return requests and their admin-approved final states.
//!
//! Rules:
//! - Customers may request cancellation only before shipping, and a return
//!   only after delivery. Both requests need a reason.
//! - Admin approval is the only way a request becomes final; it flips
//!   `is_approved_by_admin` back to true.
//! - Admins move orders forward freely (skipping states is fine) and may
//!   cancel/return directly from the same source states the customer paths
//!   use, with the same mandatory reason.
//! - `Cancelled` and `Returned` are terminal. `Delivered` ends the forward
//!   path but still accepts a return request.
//! - While a request is pending, the only legal transition is its approval.
//!
//! The planner only decides; the manager applies the plan through the
//! store's conditional update so concurrent actions cannot interleave.

use super::error::{OrderError, OrderResult};
use shared::models::OrderStatus;

/// Who is attempting the transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Customer,
    Admin,
}

/// Which reason field a transition writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonSlot {
    Cancel,
    Return,
}

/// Outcome of planning a transition: what to write on the order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    pub next: OrderStatus,
    /// Value for `is_approved_by_admin` after the transition
    pub approved: bool,
    /// Reason slot the caller-provided reason goes into, if any
    pub reason_slot: Option<ReasonSlot>,
}

/// Which reason slot a target status requires on entry
fn required_reason(target: OrderStatus) -> Option<ReasonSlot> {
    use OrderStatus::*;
    match target {
        CancelRequested | Cancelled => Some(ReasonSlot::Cancel),
        ReturnRequested | Returned => Some(ReasonSlot::Return),
        _ => None,
    }
}

/// Plan a status transition without applying it
///
/// `has_reason` says whether the caller supplied a reason. Legality is
/// checked first; a legal transition into a cancel/return state without a
/// reason fails with [`OrderError::ReasonRequired`]. Approval transitions
/// (`*Requested → final`) keep the reason stored at request time, so they
/// pass with or without a fresh reason.
pub fn plan_transition(
    current: OrderStatus,
    target: OrderStatus,
    actor: Actor,
    has_reason: bool,
) -> OrderResult<TransitionPlan> {
    use OrderStatus::*;

    let invalid = || OrderError::InvalidTransition {
        from: current,
        to: target,
    };

    let allowed = match actor {
        Actor::Customer => matches!(
            (current, target),
            (NotProcessed | Processing, CancelRequested) | (Delivered, ReturnRequested)
        ),
        Actor::Admin => {
            let approval = matches!(
                (current, target),
                (CancelRequested, Cancelled) | (ReturnRequested, Returned)
            );
            // Strictly forward along the main path, skips allowed
            let forward = match (current.forward_rank(), target.forward_rank()) {
                (Some(from), Some(to)) => to > from,
                _ => false,
            };
            let direct_branch = matches!(
                (current, target),
                (NotProcessed | Processing, Cancelled) | (Delivered, Returned)
            );
            approval || forward || direct_branch
        }
    };

    if !allowed {
        return Err(invalid());
    }

    // Approval keeps the reason captured with the request; every other
    // entry into a cancel/return state must bring its own.
    let is_approval = current.is_request();
    let reason_slot = required_reason(target);
    if !is_approval && reason_slot.is_some() && !has_reason {
        return Err(OrderError::ReasonRequired(target));
    }

    Ok(TransitionPlan {
        next: target,
        approved: !target.is_request(),
        reason_slot: if is_approval { None } else { reason_slot },
    })
}

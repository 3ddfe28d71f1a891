//! Sign-off workflow tally logic.
//!
//! The tally is a pure function over the workflow's approvals: a single
//! rejection rejects the workflow, a full set of approvals approves it, and
//! anything else leaves it pending.

use entity::application::SignoffWorkflow;

pub const SIGNOFF_PENDING: &str = "pending";
pub const SIGNOFF_APPROVED: &str = "approved";
pub const SIGNOFF_REJECTED: &str = "rejected";

/// An approver's decision on a pending sign-off entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignoffDecision {
    Approved,
    Rejected,
}

impl SignoffDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => SIGNOFF_APPROVED,
            Self::Rejected => SIGNOFF_REJECTED,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            SIGNOFF_APPROVED | "approve" => Some(Self::Approved),
            SIGNOFF_REJECTED | "reject" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Aggregate state of a sign-off workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Pending,
    Approved,
    Rejected,
}

impl WorkflowOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => SIGNOFF_PENDING,
            Self::Approved => SIGNOFF_APPROVED,
            Self::Rejected => SIGNOFF_REJECTED,
        }
    }
}

pub struct SignoffTally {
    pub completed: usize,
    pub total: usize,
    pub outcome: WorkflowOutcome,
}

/// Tallies the workflow's approvals.
pub fn tally(workflow: &SignoffWorkflow) -> SignoffTally {
    let total = workflow.approvals.len();
    let completed = workflow
        .approvals
        .iter()
        .filter(|a| a.status != SIGNOFF_PENDING)
        .count();

    let outcome = if workflow
        .approvals
        .iter()
        .any(|a| a.status == SIGNOFF_REJECTED)
    {
        WorkflowOutcome::Rejected
    } else if total > 0 && completed == total {
        WorkflowOutcome::Approved
    } else {
        WorkflowOutcome::Pending
    };

    SignoffTally {
        completed,
        total,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use entity::application::{SignoffApproval, SignoffWorkflow};

    fn approval(role: &str, status: &str) -> SignoffApproval {
        SignoffApproval {
            role: role.to_string(),
            email: format!("{}@grants.edu", role.to_lowercase()),
            name: format!("{} Office", role),
            token: format!("token-{}", role.to_lowercase()),
            status: status.to_string(),
            comments: None,
            approver_name: None,
            approved_at: None,
            created_at: Utc::now(),
        }
    }

    fn workflow(approvals: Vec<SignoffApproval>) -> SignoffWorkflow {
        SignoffWorkflow {
            status: SIGNOFF_PENDING.to_string(),
            award_amount: 50_000.0,
            approvals,
            initiated_by: "manager@grants.edu".to_string(),
            initiated_at: Utc::now(),
        }
    }

    #[test]
    fn all_approved_approves_the_workflow() {
        let wf = workflow(vec![
            approval("DORI", SIGNOFF_APPROVED),
            approval("DVC", SIGNOFF_APPROVED),
            approval("VC", SIGNOFF_APPROVED),
        ]);

        let tally = tally(&wf);

        assert_eq!(tally.outcome, WorkflowOutcome::Approved);
        assert_eq!(tally.completed, 3);
        assert_eq!(tally.total, 3);
    }

    #[test]
    fn single_rejection_rejects_the_workflow() {
        let wf = workflow(vec![
            approval("DORI", SIGNOFF_APPROVED),
            approval("DVC", SIGNOFF_REJECTED),
            approval("VC", SIGNOFF_PENDING),
        ]);

        assert_eq!(tally(&wf).outcome, WorkflowOutcome::Rejected);
    }

    #[test]
    fn incomplete_approvals_stay_pending() {
        let wf = workflow(vec![
            approval("DORI", SIGNOFF_APPROVED),
            approval("DVC", SIGNOFF_PENDING),
        ]);

        let tally = tally(&wf);

        assert_eq!(tally.outcome, WorkflowOutcome::Pending);
        assert_eq!(tally.completed, 1);
        assert_eq!(tally.total, 2);
    }

    #[test]
    fn parses_decision_strings() {
        assert_eq!(
            SignoffDecision::parse("approved"),
            Some(SignoffDecision::Approved)
        );
        assert_eq!(
            SignoffDecision::parse("reject"),
            Some(SignoffDecision::Rejected)
        );
        assert_eq!(SignoffDecision::parse("maybe"), None);
    }
}

//! Application status state machine.
//!
//! Every status change flows through [`ApplicationStatus::can_transition`];
//! handlers never assign status strings directly. Researchers get a narrower
//! set of moves than managers: they may only resubmit a returned application.

/// Workflow status of a grant application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    ManagerApproved,
    Rejected,
    Withdrawn,
    Editable,
    NeedsRevision,
    AwaitingSignoff,
    SignoffApproved,
    AwardPendingAcceptance,
    AwardAccepted,
    AwardRejected,
    ContractPending,
    ContractReceived,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::ManagerApproved => "manager_approved",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
            Self::Editable => "editable",
            Self::NeedsRevision => "needs_revision",
            Self::AwaitingSignoff => "awaiting_signoff",
            Self::SignoffApproved => "signoff_approved",
            Self::AwardPendingAcceptance => "award_pending_acceptance",
            Self::AwardAccepted => "award_accepted",
            Self::AwardRejected => "award_rejected",
            Self::ContractPending => "contract_pending",
            Self::ContractReceived => "contract_received",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(Self::Submitted),
            "under_review" => Some(Self::UnderReview),
            "manager_approved" => Some(Self::ManagerApproved),
            "rejected" => Some(Self::Rejected),
            "withdrawn" => Some(Self::Withdrawn),
            "editable" => Some(Self::Editable),
            "needs_revision" => Some(Self::NeedsRevision),
            "awaiting_signoff" => Some(Self::AwaitingSignoff),
            "signoff_approved" => Some(Self::SignoffApproved),
            "award_pending_acceptance" => Some(Self::AwardPendingAcceptance),
            "award_accepted" => Some(Self::AwardAccepted),
            "award_rejected" => Some(Self::AwardRejected),
            "contract_pending" => Some(Self::ContractPending),
            "contract_received" => Some(Self::ContractReceived),
            _ => None,
        }
    }

    /// Whether the applicant may edit the application's fields in this state.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Editable | Self::NeedsRevision)
    }

    /// Whether this move is a researcher resubmission of a returned
    /// application.
    pub fn is_resubmission(from: Self, to: Self) -> bool {
        to == Self::Submitted
            && matches!(
                from,
                Self::Editable | Self::NeedsRevision | Self::Rejected | Self::Withdrawn
            )
    }

    /// Whether the owner may withdraw the application from this state.
    /// Withdrawal is additionally gated on the grant call deadline by the
    /// service layer.
    pub fn is_withdrawable(&self) -> bool {
        matches!(self, Self::Submitted | Self::UnderReview)
    }

    /// The transition table. Moves not listed here are invalid for every
    /// role.
    pub fn can_transition(from: Self, to: Self) -> bool {
        use ApplicationStatus::*;

        if Self::is_resubmission(from, to) {
            return true;
        }

        matches!(
            (from, to),
            (Submitted, UnderReview)
                | (Submitted, Rejected)
                | (Submitted, Editable)
                | (Submitted, NeedsRevision)
                | (Submitted, Withdrawn)
                | (UnderReview, ManagerApproved)
                | (UnderReview, Rejected)
                | (UnderReview, Editable)
                | (UnderReview, NeedsRevision)
                | (UnderReview, Withdrawn)
                | (ManagerApproved, AwaitingSignoff)
                | (ManagerApproved, Rejected)
                | (AwaitingSignoff, SignoffApproved)
                | (AwaitingSignoff, Rejected)
                | (SignoffApproved, AwardPendingAcceptance)
                | (AwardPendingAcceptance, AwardAccepted)
                | (AwardPendingAcceptance, AwardRejected)
                | (AwardAccepted, ContractPending)
                | (ContractPending, ContractReceived)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::{self, *};

    #[test]
    fn happy_path_transitions_are_allowed() {
        let path = [
            Submitted,
            UnderReview,
            ManagerApproved,
            AwaitingSignoff,
            SignoffApproved,
            AwardPendingAcceptance,
            AwardAccepted,
            ContractPending,
            ContractReceived,
        ];

        for pair in path.windows(2) {
            assert!(
                ApplicationStatus::can_transition(pair[0], pair[1]),
                "{:?} -> {:?} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn skipping_signoff_is_forbidden() {
        assert!(!ApplicationStatus::can_transition(
            ManagerApproved,
            SignoffApproved
        ));
        assert!(!ApplicationStatus::can_transition(
            UnderReview,
            AwardPendingAcceptance
        ));
        assert!(!ApplicationStatus::can_transition(
            Submitted,
            ContractReceived
        ));
    }

    #[test]
    fn terminal_states_have_no_manager_moves() {
        assert!(!ApplicationStatus::can_transition(ContractReceived, Submitted));
        assert!(!ApplicationStatus::can_transition(AwardAccepted, Rejected));
    }

    #[test]
    fn returned_applications_can_be_resubmitted() {
        for from in [Editable, NeedsRevision, Rejected, Withdrawn] {
            assert!(ApplicationStatus::is_resubmission(from, Submitted));
            assert!(ApplicationStatus::can_transition(from, Submitted));
        }
        assert!(!ApplicationStatus::is_resubmission(UnderReview, Submitted));
        assert!(!ApplicationStatus::is_resubmission(Editable, UnderReview));
    }

    #[test]
    fn editable_follows_the_status() {
        assert!(Editable.is_editable());
        assert!(NeedsRevision.is_editable());
        assert!(!Submitted.is_editable());
        assert!(!SignoffApproved.is_editable());
    }

    #[test]
    fn withdrawal_only_before_review_completes() {
        assert!(Submitted.is_withdrawable());
        assert!(UnderReview.is_withdrawable());
        assert!(!ManagerApproved.is_withdrawable());
        assert!(!AwaitingSignoff.is_withdrawable());
    }

    #[test]
    fn parses_stored_status_strings() {
        assert_eq!(
            ApplicationStatus::parse("awaiting_signoff"),
            Some(AwaitingSignoff)
        );
        assert_eq!(ApplicationStatus::parse("approved"), None);
        assert_eq!(
            ApplicationStatus::parse(AwardPendingAcceptance.as_str()),
            Some(AwardPendingAcceptance)
        );
    }
}

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::server::{
    controller::{
        application::{
            add_review,
            award::{download_award_letter, generate_award_letter, respond_to_award},
            create_application, download_proposal, get_application, get_applications,
            get_my_applications, resubmit_application,
            signoff::{initiate_signoff, signoff_status, submit_signoff_decision, view_signoff},
            update_application, update_application_status, upload_contract, withdraw_application,
        },
        auth::{login, logout, me, refresh},
        document::{
            delete_document, download_document, get_document, get_document_stats, get_documents,
            upload_document, upload_document_version,
        },
        grant_call::{
            create_grant_call, delete_grant_call, get_grant_call, get_grant_calls,
            toggle_grant_call_status, update_grant_call,
        },
        project::{
            add_milestone, add_partner, add_requisition, create_project, get_project,
            get_projects, initiate_closure, remove_partner, review_final_report,
            review_requisition, submit_closure_decision, update_milestone, update_project_status,
            upload_final_report, upload_progress_report, view_closure,
        },
        reviewer::{assign_reviewers, get_application_for_review, get_reviewer_feedback},
        user::{
            create_user, delete_user, get_biodata, get_user, get_users, reset_password,
            update_biodata, update_user,
        },
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        // Users
        .route("/api/users", post(create_user).get(get_users))
        .route(
            "/api/users/me/biodata",
            get(get_biodata).put(update_biodata),
        )
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/{id}/reset-password", post(reset_password))
        // Grant calls
        .route(
            "/api/grant-calls",
            get(get_grant_calls).post(create_grant_call),
        )
        .route(
            "/api/grant-calls/{id}",
            get(get_grant_call)
                .put(update_grant_call)
                .delete(delete_grant_call),
        )
        .route(
            "/api/grant-calls/{id}/toggle-status",
            put(toggle_grant_call_status),
        )
        // Applications
        .route(
            "/api/applications",
            post(create_application).get(get_applications),
        )
        .route("/api/applications/my", get(get_my_applications))
        .route("/api/applications/signoff/{token}", get(view_signoff).post(submit_signoff_decision))
        .route(
            "/api/applications/{id}",
            get(get_application).put(update_application),
        )
        .route(
            "/api/applications/{id}/status",
            put(update_application_status),
        )
        .route("/api/applications/{id}/withdraw", put(withdraw_application))
        .route("/api/applications/{id}/resubmit", put(resubmit_application))
        .route("/api/applications/{id}/review", post(add_review))
        .route("/api/applications/{id}/contract", post(upload_contract))
        .route(
            "/api/applications/{id}/document/{filename}",
            get(download_proposal),
        )
        .route(
            "/api/applications/{id}/signoff/initiate",
            post(initiate_signoff),
        )
        .route("/api/applications/{id}/signoff/status", get(signoff_status))
        .route(
            "/api/applications/{id}/award-letter/generate",
            post(generate_award_letter),
        )
        .route(
            "/api/applications/{id}/award-letter",
            get(download_award_letter),
        )
        .route("/api/applications/{id}/award/respond", post(respond_to_award))
        // External reviewers
        .route(
            "/api/reviewers/assign/{application_id}",
            post(assign_reviewers),
        )
        .route(
            "/api/reviewers/application/{token}",
            get(get_application_for_review),
        )
        .route(
            "/api/reviewers/feedback/{application_id}",
            get(get_reviewer_feedback),
        )
        // Projects
        .route("/api/projects", post(create_project).get(get_projects))
        .route("/api/projects/vc-signoff/{token}", get(view_closure))
        .route(
            "/api/projects/vc-signoff/{token}/submit",
            post(submit_closure_decision),
        )
        .route("/api/projects/{id}", get(get_project))
        .route("/api/projects/{id}/status", put(update_project_status))
        .route("/api/projects/{id}/milestones", post(add_milestone))
        .route(
            "/api/projects/{id}/milestones/{milestone_id}",
            put(update_milestone),
        )
        .route(
            "/api/projects/{id}/milestones/{milestone_id}/progress-report",
            post(upload_progress_report),
        )
        .route("/api/projects/{id}/requisitions", post(add_requisition))
        .route(
            "/api/projects/{id}/requisitions/{requisition_id}",
            put(review_requisition),
        )
        .route("/api/projects/{id}/partners", post(add_partner))
        .route(
            "/api/projects/{id}/partners/{partner_id}",
            delete(remove_partner),
        )
        .route("/api/projects/{id}/final-report", post(upload_final_report))
        .route(
            "/api/projects/{id}/final-report/review",
            put(review_final_report),
        )
        .route("/api/projects/{id}/closure/initiate", post(initiate_closure))
        // Documents
        .route("/api/documents", post(upload_document).get(get_documents))
        .route("/api/documents/stats", get(get_document_stats))
        .route(
            "/api/documents/{id}",
            get(get_document).delete(delete_document),
        )
        .route("/api/documents/{id}/download", get(download_document))
        .route(
            "/api/documents/{id}/versions",
            post(upload_document_version),
        )
}

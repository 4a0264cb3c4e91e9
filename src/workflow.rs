//! The leave approval state machine.
//!
//! Every operation takes the authenticated principal explicitly. A decision
//! commits the status change, one in-app notification and one parent SMS
//! intent in a single transaction; delivering the SMS is left to
//! [`crate::delivery::Dispatcher`].

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, instrument, warn};

use crate::auth::auth::AuthUser;
use crate::error::{WorkflowError, WorkflowResult};
use crate::model::leave_request::{Decision, LeaveRequest, LeaveStatus, Stage};
use crate::model::notification::NotificationTarget;
use crate::model::role::Role;
use crate::qr::{self, QrEncoder};
use crate::store::leaves::{self, LeaveScope, NewLeave};
use crate::store::{notifications, outbox, users};
use crate::utils::validation::is_valid_roll;

const MAX_REASON_LEN: usize = 500;

#[derive(Debug, Clone)]
pub struct Submission {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub tutor: String,
}

#[derive(Clone)]
pub struct LeaveWorkflow {
    pool: SqlitePool,
    qr: Arc<dyn QrEncoder>,
}

/// In-app notification and parent SMS produced by entering a status.
struct Effects {
    target: NotificationTarget,
    message: String,
    sms: String,
}

fn decision_effects(leave: &LeaveRequest, stage: Stage, decision: Decision, next: LeaveStatus) -> Effects {
    let (target, message) = match (stage, decision) {
        (Stage::Tutor, Decision::Approve) => (
            NotificationTarget::department(Role::Ac, &leave.dept),
            format!("Tutor {} approved {}'s leave", leave.tutor, leave.student_name),
        ),
        (Stage::Tutor, Decision::Reject) => (
            NotificationTarget::student(&leave.dept, &leave.roll),
            format!("Tutor {} rejected your leave", leave.tutor),
        ),
        (Stage::Ac, Decision::Approve) => (
            NotificationTarget::student(&leave.dept, &leave.roll),
            "AC approved your leave".to_string(),
        ),
        (Stage::Ac, Decision::Reject) => (
            NotificationTarget::student(&leave.dept, &leave.roll),
            "AC rejected your leave".to_string(),
        ),
    };

    Effects {
        target,
        message,
        sms: format!("Your child {} leave has been {}.", leave.student_name, next),
    }
}

fn submission_sms(leave: &NewLeave) -> String {
    format!(
        "Dear Parent,\n\
         Your child {} (Roll: {}, Dept: {}) has applied for leave.\n\
         Start Date: {}\n\
         End Date: {}\n\
         Reason: {}\n\
         Tutor: {}\n\
         Status: {}\n\
         - Leave Management System",
        leave.student_name,
        leave.roll,
        leave.dept,
        leave.start_date,
        leave.end_date,
        leave.reason,
        leave.tutor,
        LeaveStatus::Pending,
    )
}

/// Writes the notification and the parent SMS intent for one transition.
async fn emit(
    conn: &mut SqliteConnection,
    leave_id: i64,
    roll: &str,
    effects: &Effects,
) -> Result<(), sqlx::Error> {
    notifications::insert(&mut *conn, &effects.target, &effects.message).await?;

    match users::parent_mobile(&mut *conn, roll).await? {
        Some(mobile) => {
            outbox::enqueue(&mut *conn, leave_id, &mobile, &effects.sms).await?;
        }
        None => warn!(leave_id, roll, "No parent mobile on file, SMS skipped"),
    }

    Ok(())
}

impl LeaveWorkflow {
    pub fn new(pool: SqlitePool, qr: Arc<dyn QrEncoder>) -> Self {
        Self { pool, qr }
    }

    /// Creates a Pending request for the requesting student.
    #[instrument(name = "leave_submit", skip(self, requester, submission), fields(roll = ?requester.roll))]
    pub async fn submit(
        &self,
        requester: &AuthUser,
        submission: Submission,
    ) -> WorkflowResult<LeaveRequest> {
        requester.require(Role::Student, "Only students can apply for leave")?;

        // 1️⃣ requester identity
        let roll = requester
            .roll
            .as_deref()
            .filter(|r| is_valid_roll(r))
            .ok_or_else(|| WorkflowError::Validation("Requester has no valid roll number".into()))?;
        if requester.name.trim().is_empty() || requester.dept.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "Requester name and department are required".into(),
            ));
        }

        // 2️⃣ request fields
        let reason = submission.reason.trim();
        let tutor = submission.tutor.trim();
        if reason.is_empty() {
            return Err(WorkflowError::Validation("Reason is required".into()));
        }
        if reason.chars().count() > MAX_REASON_LEN {
            return Err(WorkflowError::Validation(format!(
                "Reason must be at most {MAX_REASON_LEN} characters"
            )));
        }
        if tutor.is_empty() {
            return Err(WorkflowError::Validation("Tutor is required".into()));
        }
        if submission.end_date < submission.start_date {
            // accepted as submitted until the product decides otherwise
            warn!(
                start_date = %submission.start_date,
                end_date = %submission.end_date,
                "Leave ends before it starts"
            );
        }

        let new_leave = NewLeave {
            student_name: requester.name.trim().to_string(),
            roll: roll.to_string(),
            dept: requester.dept.trim().to_string(),
            start_date: submission.start_date,
            end_date: submission.end_date,
            reason: reason.to_string(),
            tutor: tutor.to_string(),
        };

        // 3️⃣ request + tutor notification + parent SMS intent, all or nothing
        let mut tx = self.pool.begin().await?;
        let id = leaves::insert(&mut *tx, &new_leave).await?;
        let effects = Effects {
            target: NotificationTarget::department(Role::Tutor, &new_leave.dept),
            message: format!("Student {} applied for leave", new_leave.student_name),
            sms: submission_sms(&new_leave),
        };
        emit(&mut tx, id, &new_leave.roll, &effects).await?;
        let leave = leaves::fetch(&mut *tx, id)
            .await?
            .ok_or(WorkflowError::NotFound(id))?;
        tx.commit().await?;

        info!(leave_id = id, tutor = %leave.tutor, "Leave request submitted");
        Ok(leave)
    }

    /// First-line decision: Pending -> Tutor Approved | Rejected.
    pub async fn tutor_decide(
        &self,
        principal: &AuthUser,
        leave_id: i64,
        action: &str,
    ) -> WorkflowResult<LeaveRequest> {
        principal.require(Role::Tutor, "Tutor only")?;
        self.decide(principal, Stage::Tutor, leave_id, action).await
    }

    /// Final decision: Tutor Approved -> Approved by AC | Rejected by AC.
    pub async fn ac_decide(
        &self,
        principal: &AuthUser,
        leave_id: i64,
        action: &str,
    ) -> WorkflowResult<LeaveRequest> {
        principal.require(Role::Ac, "AC only")?;
        self.decide(principal, Stage::Ac, leave_id, action).await
    }

    #[instrument(name = "leave_decide", skip(self, principal), fields(approver = %principal.name))]
    async fn decide(
        &self,
        principal: &AuthUser,
        stage: Stage,
        leave_id: i64,
        action: &str,
    ) -> WorkflowResult<LeaveRequest> {
        let decision = Decision::from_str(action.trim())
            .map_err(|_| WorkflowError::InvalidAction(action.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let mut leave = leaves::fetch(&mut *tx, leave_id)
            .await?
            .ok_or(WorkflowError::NotFound(leave_id))?;

        // approvers act only on what they can see: the assigned tutor, an AC
        // of the same department
        if principal.dept != leave.dept || !Self::can_view(principal, &leave) {
            return Err(WorkflowError::Forbidden("Leave request belongs to another approver"));
        }

        let expected = stage.precursor();
        let next = leave
            .status
            .transition(stage, decision)
            .ok_or(WorkflowError::InvalidState {
                id: leave_id,
                current: leave.status,
                expected,
            })?;

        // the only place a QR payload is produced
        let qr_code = if next == LeaveStatus::AcApproved && leave.qr_code.is_none() {
            let payload = self.qr.encode(&qr::canonical_text(&leave)).map_err(|e| {
                WorkflowError::Validation(format!("Leave details cannot be encoded as QR: {e}"))
            })?;
            Some(payload)
        } else {
            None
        };

        // conditional on the status we read: a concurrent or replayed
        // decision updates nothing and emits nothing
        if !leaves::transition(&mut *tx, leave_id, expected, next, qr_code.as_deref()).await? {
            let current = leaves::fetch(&mut *tx, leave_id)
                .await?
                .map(|l| l.status)
                .unwrap_or(leave.status);
            return Err(WorkflowError::InvalidState {
                id: leave_id,
                current,
                expected,
            });
        }

        let effects = decision_effects(&leave, stage, decision, next);
        emit(&mut tx, leave_id, &leave.roll, &effects).await?;
        tx.commit().await?;

        info!(leave_id, from = %leave.status, to = %next, "Leave status changed");
        if next.is_terminal() {
            debug!(leave_id, "Leave request resolved");
        }

        leave.status = next;
        if leave.qr_code.is_none() {
            leave.qr_code = qr_code;
        }
        Ok(leave)
    }

    pub async fn get(&self, leave_id: i64) -> WorkflowResult<LeaveRequest> {
        leaves::fetch(&self.pool, leave_id)
            .await?
            .ok_or(WorkflowError::NotFound(leave_id))
    }

    pub async fn query_by_requester(&self, roll: &str) -> WorkflowResult<Vec<LeaveRequest>> {
        Ok(leaves::list(&self.pool, &LeaveScope::Requester(roll.to_string())).await?)
    }

    pub async fn query_by_approver(&self, tutor: &str) -> WorkflowResult<Vec<LeaveRequest>> {
        Ok(leaves::list(&self.pool, &LeaveScope::Approver(tutor.to_string())).await?)
    }

    pub async fn query_by_department(&self, dept: &str) -> WorkflowResult<Vec<LeaveRequest>> {
        Ok(leaves::list(&self.pool, &LeaveScope::Department(dept.to_string())).await?)
    }

    pub async fn query_all(&self) -> WorkflowResult<Vec<LeaveRequest>> {
        Ok(leaves::list(&self.pool, &LeaveScope::All).await?)
    }

    /// Requests the principal's dashboard lists: own requests for students,
    /// assigned ones for tutors, the department for ACs, everything for admins.
    pub async fn visible_to(&self, principal: &AuthUser) -> WorkflowResult<Vec<LeaveRequest>> {
        match principal.role {
            Role::Student => match &principal.roll {
                Some(roll) => self.query_by_requester(roll).await,
                None => Ok(Vec::new()),
            },
            Role::Tutor => self.query_by_approver(&principal.name).await,
            Role::Ac => self.query_by_department(&principal.dept).await,
            Role::Admin => self.query_all().await,
        }
    }

    /// Whether the principal may read this request.
    pub fn can_view(principal: &AuthUser, leave: &LeaveRequest) -> bool {
        match principal.role {
            Role::Student => principal.roll.as_deref() == Some(leave.roll.as_str()),
            Role::Tutor => principal.name == leave.tutor,
            Role::Ac => principal.dept == leave.dept,
            Role::Admin => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::model::outbound::DeliveryStatus;
    use crate::qr::SvgQrEncoder;
    use crate::store::users::NewUser;
    use qrcode::types::QrError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ROLL: &str = "71810010001";

    /// Counts encodes so tests can assert the QR payload is produced once.
    #[derive(Default)]
    struct CountingEncoder {
        calls: AtomicUsize,
    }

    impl QrEncoder for CountingEncoder {
        fn encode(&self, text: &str) -> Result<String, QrError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SvgQrEncoder.encode(text)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fever() -> Submission {
        Submission {
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 3),
            reason: "fever".into(),
            tutor: "T1".into(),
        }
    }

    fn student() -> AuthUser {
        AuthUser::student("A", ROLL, "CSE")
    }

    fn tutor() -> AuthUser {
        AuthUser::staff(Role::Tutor, "T1", "CSE")
    }

    fn ac() -> AuthUser {
        AuthUser::staff(Role::Ac, "AC1", "CSE")
    }

    async fn setup() -> (SqlitePool, LeaveWorkflow, Arc<CountingEncoder>) {
        let pool = test_pool().await;
        users::insert(
            &pool,
            &NewUser {
                name: "A".into(),
                role: Role::Student,
                dept: "CSE".into(),
                roll: Some(ROLL.into()),
                email: "a@mail.com".into(),
                parent_mobile: Some("+919876543210".into()),
                password: "hash".into(),
            },
        )
        .await
        .unwrap();

        let encoder = Arc::new(CountingEncoder::default());
        let workflow = LeaveWorkflow::new(pool.clone(), encoder.clone());
        (pool, workflow, encoder)
    }

    async fn feed(pool: &SqlitePool, viewer: &AuthUser) -> Vec<String> {
        notifications::take_unread(pool, &viewer.viewer())
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    fn assert_invalid_state<T: std::fmt::Debug>(result: WorkflowResult<T>) {
        match result {
            Err(WorkflowError::InvalidState { .. }) => {}
            other => panic!("expected invalid state, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn submission_is_pending_and_visible_to_requester_and_tutor() {
        let (pool, workflow, _) = setup().await;

        let leave = workflow.submit(&student(), fever()).await.unwrap();
        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.student_name, "A");
        assert_eq!(leave.dept, "CSE");

        let mine = workflow.query_by_requester(ROLL).await.unwrap();
        assert_eq!(mine.len(), 1);
        let assigned = workflow.query_by_approver("T1").await.unwrap();
        assert_eq!(assigned[0].id, leave.id);

        assert_eq!(feed(&pool, &tutor()).await, vec!["Student A applied for leave"]);

        let sms = outbox::for_leave(&pool, leave.id).await.unwrap();
        assert_eq!(sms.len(), 1);
        assert_eq!(sms[0].destination, "+919876543210");
        assert_eq!(sms[0].status, DeliveryStatus::Queued);
        assert!(sms[0].body.contains("Status: Pending"));
    }

    #[actix_web::test]
    async fn submission_validates_requester_and_fields() {
        let (_, workflow, _) = setup().await;

        let bad_roll = AuthUser::student("A", "12345", "CSE");
        assert!(matches!(
            workflow.submit(&bad_roll, fever()).await,
            Err(WorkflowError::Validation(_))
        ));

        let mut blank = fever();
        blank.reason = "   ".into();
        assert!(matches!(
            workflow.submit(&student(), blank).await,
            Err(WorkflowError::Validation(_))
        ));

        let mut no_tutor = fever();
        no_tutor.tutor = String::new();
        assert!(matches!(
            workflow.submit(&student(), no_tutor).await,
            Err(WorkflowError::Validation(_))
        ));

        assert!(matches!(
            workflow.submit(&tutor(), fever()).await,
            Err(WorkflowError::Forbidden(_))
        ));
    }

    #[actix_web::test]
    async fn end_before_start_is_accepted() {
        let (_, workflow, _) = setup().await;
        let mut backwards = fever();
        backwards.end_date = date(2024, 2, 28);

        let leave = workflow.submit(&student(), backwards).await.unwrap();
        assert_eq!(leave.status, LeaveStatus::Pending);
    }

    #[actix_web::test]
    async fn full_approval_path_attaches_qr_and_notifies() {
        let (pool, workflow, encoder) = setup().await;
        let leave = workflow.submit(&student(), fever()).await.unwrap();

        let approved = workflow.tutor_decide(&tutor(), leave.id, "approve").await.unwrap();
        assert_eq!(approved.status, LeaveStatus::TutorApproved);
        assert!(approved.qr_code.is_none());
        assert_eq!(feed(&pool, &ac()).await, vec!["Tutor T1 approved A's leave"]);

        let final_state = workflow.ac_decide(&ac(), leave.id, "approve").await.unwrap();
        assert_eq!(final_state.status, LeaveStatus::AcApproved);
        assert_eq!(final_state.status.to_string(), "Approved by AC");
        let qr = final_state.qr_code.clone().expect("qr attached");
        assert!(!qr.is_empty());
        assert_eq!(feed(&pool, &student()).await, vec!["AC approved your leave"]);

        let stored = workflow.get(leave.id).await.unwrap();
        assert_eq!(stored.qr_code.as_deref(), Some(qr.as_str()));

        // approving again fails and leaves the payload alone
        assert_invalid_state(workflow.ac_decide(&ac(), leave.id, "approve").await);
        assert_eq!(workflow.get(leave.id).await.unwrap().qr_code, Some(qr));
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);

        let sms = outbox::for_leave(&pool, leave.id).await.unwrap();
        assert_eq!(sms.len(), 3);
        assert_eq!(sms[2].body, "Your child A leave has been Approved by AC.");
    }

    #[actix_web::test]
    async fn ac_cannot_skip_the_tutor() {
        let (pool, workflow, encoder) = setup().await;
        let leave = workflow.submit(&student(), fever()).await.unwrap();

        assert_invalid_state(workflow.ac_decide(&ac(), leave.id, "approve").await);
        assert_eq!(workflow.get(leave.id).await.unwrap().status, LeaveStatus::Pending);
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
        assert!(feed(&pool, &ac()).await.is_empty());
    }

    #[actix_web::test]
    async fn tutor_rejection_is_terminal() {
        let (pool, workflow, _) = setup().await;
        let leave = workflow.submit(&student(), fever()).await.unwrap();

        let rejected = workflow.tutor_decide(&tutor(), leave.id, "reject").await.unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        assert_eq!(feed(&pool, &student()).await, vec!["Tutor T1 rejected your leave"]);

        assert_invalid_state(workflow.tutor_decide(&tutor(), leave.id, "approve").await);
        assert_invalid_state(workflow.tutor_decide(&tutor(), leave.id, "reject").await);
        assert_invalid_state(workflow.ac_decide(&ac(), leave.id, "approve").await);
        assert_invalid_state(workflow.ac_decide(&ac(), leave.id, "reject").await);

        // one SMS for the submission, one for the rejection, none for the failures
        assert_eq!(outbox::for_leave(&pool, leave.id).await.unwrap().len(), 2);
        assert!(feed(&pool, &student()).await.is_empty());
    }

    #[actix_web::test]
    async fn ac_rejection_is_terminal() {
        let (_, workflow, encoder) = setup().await;
        let leave = workflow.submit(&student(), fever()).await.unwrap();
        workflow.tutor_decide(&tutor(), leave.id, "approve").await.unwrap();

        let rejected = workflow.ac_decide(&ac(), leave.id, "Reject").await.unwrap();
        assert_eq!(rejected.status, LeaveStatus::AcRejected);
        assert!(rejected.qr_code.is_none());
        assert_invalid_state(workflow.ac_decide(&ac(), leave.id, "approve").await);
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn decision_errors() {
        let (_, workflow, _) = setup().await;
        let leave = workflow.submit(&student(), fever()).await.unwrap();

        assert!(matches!(
            workflow.tutor_decide(&tutor(), 999, "approve").await,
            Err(WorkflowError::NotFound(999))
        ));
        assert!(matches!(
            workflow.tutor_decide(&tutor(), leave.id, "escalate").await,
            Err(WorkflowError::InvalidAction(_))
        ));
        assert!(matches!(
            workflow.tutor_decide(&ac(), leave.id, "approve").await,
            Err(WorkflowError::Forbidden(_))
        ));
        assert!(matches!(
            workflow.ac_decide(&tutor(), leave.id, "approve").await,
            Err(WorkflowError::Forbidden(_))
        ));
        assert_eq!(workflow.get(leave.id).await.unwrap().status, LeaveStatus::Pending);
    }

    #[actix_web::test]
    async fn approvers_outside_the_request_are_refused() {
        let (pool, workflow, encoder) = setup().await;
        let leave = workflow.submit(&student(), fever()).await.unwrap();

        let other_dept_tutor = AuthUser::staff(Role::Tutor, "T1", "ECE");
        let unassigned_tutor = AuthUser::staff(Role::Tutor, "T2", "CSE");
        for outsider in [&other_dept_tutor, &unassigned_tutor] {
            assert!(matches!(
                workflow.tutor_decide(outsider, leave.id, "approve").await,
                Err(WorkflowError::Forbidden(_))
            ));
        }
        assert_eq!(workflow.get(leave.id).await.unwrap().status, LeaveStatus::Pending);

        workflow.tutor_decide(&tutor(), leave.id, "approve").await.unwrap();

        let other_dept_ac = AuthUser::staff(Role::Ac, "AC9", "ECE");
        assert!(!LeaveWorkflow::can_view(&other_dept_ac, &leave));
        assert!(matches!(
            workflow.ac_decide(&other_dept_ac, leave.id, "approve").await,
            Err(WorkflowError::Forbidden(_))
        ));

        let stored = workflow.get(leave.id).await.unwrap();
        assert_eq!(stored.status, LeaveStatus::TutorApproved);
        assert!(stored.qr_code.is_none());
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
        // submission and tutor approval only
        assert_eq!(outbox::for_leave(&pool, leave.id).await.unwrap().len(), 2);
    }

    #[test]
    fn each_decision_addresses_its_own_notification() {
        let leave = LeaveRequest {
            id: 1,
            student_name: "A".into(),
            roll: ROLL.into(),
            dept: "CSE".into(),
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 3),
            reason: "fever".into(),
            tutor: "T1".into(),
            status: LeaveStatus::Pending,
            qr_code: None,
            created_at: chrono::Utc::now(),
        };
        let to_student = NotificationTarget::student("CSE", ROLL);

        let cases = [
            (Stage::Tutor, Decision::Approve, NotificationTarget::department(Role::Ac, "CSE"), "Tutor T1 approved A's leave"),
            (Stage::Tutor, Decision::Reject, to_student.clone(), "Tutor T1 rejected your leave"),
            (Stage::Ac, Decision::Approve, to_student.clone(), "AC approved your leave"),
            (Stage::Ac, Decision::Reject, to_student, "AC rejected your leave"),
        ];
        for (stage, decision, target, message) in cases {
            let next = stage.precursor().transition(stage, decision).unwrap();
            let effects = decision_effects(&leave, stage, decision, next);
            assert_eq!(effects.target, target);
            assert_eq!(effects.message, message);
            assert_eq!(effects.sms, format!("Your child A leave has been {next}."));
        }
    }

    #[actix_web::test]
    async fn missing_parent_contact_still_commits_the_transition() {
        let pool = test_pool().await;
        let workflow = LeaveWorkflow::new(pool.clone(), Arc::new(SvgQrEncoder));
        let orphan = AuthUser::student("B", "71810010002", "CSE");

        let leave = workflow.submit(&orphan, fever()).await.unwrap();
        assert_eq!(leave.status, LeaveStatus::Pending);
        assert!(outbox::for_leave(&pool, leave.id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn visibility_follows_role() {
        let (_, workflow, _) = setup().await;
        let leave = workflow.submit(&student(), fever()).await.unwrap();

        assert!(LeaveWorkflow::can_view(&student(), &leave));
        assert!(LeaveWorkflow::can_view(&tutor(), &leave));
        assert!(LeaveWorkflow::can_view(&ac(), &leave));
        assert!(!LeaveWorkflow::can_view(
            &AuthUser::staff(Role::Tutor, "T2", "CSE"),
            &leave
        ));
        assert!(!LeaveWorkflow::can_view(
            &AuthUser::student("C", "71810010003", "CSE"),
            &leave
        ));

        assert_eq!(workflow.visible_to(&ac()).await.unwrap().len(), 1);
        assert!(
            workflow
                .visible_to(&AuthUser::staff(Role::Ac, "AC2", "ECE"))
                .await
                .unwrap()
                .is_empty()
        );
    }
}

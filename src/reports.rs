//! Dashboard aggregates. Pure functions over request snapshots as listed by
//! the store (newest first); ranking ties keep first-seen order.

use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::model::user::User;

/// Students per tutor above which a department is flagged.
pub const MAX_STUDENTS_PER_TUTOR: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentDashboard {
    pub approved: usize,
    /// rejected by the AC; tutor rejections are not counted
    pub rejected: usize,
    pub pending: usize,
    /// January first
    #[schema(value_type = Vec<usize>)]
    pub monthly: [usize; 12],
    /// Sunday first; decided requests only
    #[schema(value_type = Vec<usize>)]
    pub weekdays: [usize; 7],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StudentCount {
    pub name: String,
    pub roll: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TutorDashboard {
    pub applied: usize,
    pub tutor_approved: usize,
    pub ac_approved: usize,
    pub rejected: usize,
    pub max_flow: usize,
    pub approved_percent: f64,
    pub top_students: Vec<StudentCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TutorBreakdown {
    pub tutor: String,
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AcDashboard {
    pub tutors: Vec<TutorBreakdown>,
    pub top_students: Vec<StudentCount>,
    pub ac_approved: usize,
    pub ac_rejected: usize,
    pub ac_pending: usize,
    pub tutor_approved_total: usize,
    pub tutor_rejected_total: usize,
    pub tutor_pending_total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RoleCounts {
    pub students: usize,
    pub tutors: usize,
    pub acs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeptRoleStats {
    pub dept: String,
    pub students: usize,
    pub tutors: usize,
    pub acs: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeptLeaveCount {
    pub dept: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdminDashboard {
    pub roles: RoleCounts,
    pub departments: Vec<DeptRoleStats>,
    pub policy_alerts: Vec<String>,
    pub leaves_by_dept: Vec<DeptLeaveCount>,
    #[schema(value_type = Vec<usize>)]
    pub monthly_trend: [usize; 12],
}

fn count(leaves: &[LeaveRequest], status: LeaveStatus) -> usize {
    leaves.iter().filter(|l| l.status == status).count()
}

/// Requests per start month, January first.
pub fn monthly_counts<'a>(leaves: impl IntoIterator<Item = &'a LeaveRequest>) -> [usize; 12] {
    let mut months = [0; 12];
    for leave in leaves {
        months[leave.start_date.month0() as usize] += 1;
    }
    months
}

/// Requests per start weekday, Sunday first.
pub fn weekday_counts<'a>(leaves: impl IntoIterator<Item = &'a LeaveRequest>) -> [usize; 7] {
    let mut days = [0; 7];
    for leave in leaves {
        days[leave.start_date.weekday().num_days_from_sunday() as usize] += 1;
    }
    days
}

/// Students ranked by number of requests, at most `limit`.
pub fn top_students(leaves: &[LeaveRequest], limit: usize) -> Vec<StudentCount> {
    let mut ranked: Vec<StudentCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for leave in leaves {
        match index.get(leave.roll.as_str()) {
            Some(&i) => ranked[i].count += 1,
            None => {
                index.insert(&leave.roll, ranked.len());
                ranked.push(StudentCount {
                    name: leave.student_name.clone(),
                    roll: leave.roll.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

pub fn student_dashboard(leaves: &[LeaveRequest]) -> StudentDashboard {
    StudentDashboard {
        approved: count(leaves, LeaveStatus::AcApproved),
        rejected: count(leaves, LeaveStatus::AcRejected),
        pending: leaves.iter().filter(|l| l.status.is_open()).count(),
        monthly: monthly_counts(leaves),
        weekdays: weekday_counts(leaves.iter().filter(|l| l.status != LeaveStatus::Pending)),
    }
}

pub fn tutor_dashboard(leaves: &[LeaveRequest]) -> TutorDashboard {
    let applied = leaves.len();
    let tutor_approved = count(leaves, LeaveStatus::TutorApproved);
    let ac_approved = count(leaves, LeaveStatus::AcApproved);
    let rejected = count(leaves, LeaveStatus::Rejected);

    let approved_percent = if applied > 0 && tutor_approved > 0 {
        let ratio = ac_approved as f64 / tutor_approved as f64 * 100.0;
        (ratio * 10.0).round() / 10.0
    } else {
        0.0
    };

    TutorDashboard {
        applied,
        tutor_approved,
        ac_approved,
        rejected,
        max_flow: applied.max(tutor_approved).max(ac_approved).max(rejected).max(1),
        approved_percent,
        top_students: top_students(leaves, 3),
    }
}

/// `tutors` are the department's tutors in registration order and `leaves`
/// the department's requests. Per-tutor counts therefore only cover this
/// department, even for a tutor named on requests elsewhere.
pub fn ac_dashboard(tutors: &[String], leaves: &[LeaveRequest]) -> AcDashboard {
    let breakdown: Vec<TutorBreakdown> = tutors
        .iter()
        .map(|tutor| {
            let assigned: Vec<LeaveRequest> = leaves
                .iter()
                .filter(|l| &l.tutor == tutor)
                .cloned()
                .collect();
            TutorBreakdown {
                tutor: tutor.clone(),
                approved: count(&assigned, LeaveStatus::TutorApproved),
                rejected: count(&assigned, LeaveStatus::Rejected),
                pending: count(&assigned, LeaveStatus::Pending),
            }
        })
        .collect();

    AcDashboard {
        tutor_approved_total: breakdown.iter().map(|t| t.approved).sum(),
        tutor_rejected_total: breakdown.iter().map(|t| t.rejected).sum(),
        tutor_pending_total: breakdown.iter().map(|t| t.pending).sum(),
        tutors: breakdown,
        top_students: top_students(leaves, 5),
        ac_approved: count(leaves, LeaveStatus::AcApproved),
        ac_rejected: count(leaves, LeaveStatus::AcRejected),
        ac_pending: count(leaves, LeaveStatus::Pending),
    }
}

pub fn admin_dashboard(users: &[User], leaves: &[LeaveRequest]) -> AdminDashboard {
    let mut roles = RoleCounts::default();
    let mut departments: Vec<DeptRoleStats> = Vec::new();

    for user in users {
        let position = match departments.iter().position(|d| d.dept == user.dept) {
            Some(i) => i,
            None => {
                departments.push(DeptRoleStats {
                    dept: user.dept.clone(),
                    students: 0,
                    tutors: 0,
                    acs: 0,
                    total: 0,
                });
                departments.len() - 1
            }
        };
        let stats = &mut departments[position];

        match user.role {
            Role::Student => {
                roles.students += 1;
                stats.students += 1;
            }
            Role::Tutor => {
                roles.tutors += 1;
                stats.tutors += 1;
            }
            Role::Ac => {
                roles.acs += 1;
                stats.acs += 1;
            }
            Role::Admin => continue,
        }
        stats.total += 1;
    }

    let policy_alerts = departments
        .iter()
        .filter(|d| d.tutors > 0 && d.students > d.tutors * MAX_STUDENTS_PER_TUTOR)
        .map(|d| {
            format!(
                "{} Dept: {} Students, {} Tutor -> Ratio {}/{} (exceeds 1:{} policy).",
                d.dept, d.students, d.tutors, d.students, d.tutors, MAX_STUDENTS_PER_TUTOR
            )
        })
        .collect();

    let mut leaves_by_dept: Vec<DeptLeaveCount> = Vec::new();
    for leave in leaves {
        match leaves_by_dept.iter_mut().find(|d| d.dept == leave.dept) {
            Some(entry) => entry.count += 1,
            None => leaves_by_dept.push(DeptLeaveCount {
                dept: leave.dept.clone(),
                count: 1,
            }),
        }
    }

    AdminDashboard {
        roles,
        departments,
        policy_alerts,
        leaves_by_dept,
        monthly_trend: monthly_counts(leaves),
    }
}

use chrono::NaiveDate;

use crate::model::leave_request::LeaveRequest;

/// Attachment name offered for a request's letter.
pub fn file_name(leave: &LeaveRequest) -> String {
    format!("leave_letter_{}.txt", leave.roll)
}

/// Plain-text leave letter for a request snapshot, dated `today`.
pub fn render(leave: &LeaveRequest, today: NaiveDate) -> String {
    let mut letter = format!(
        "Date: {today}\n\
         \n\
         To\n\
         The Academic Coordinator,\n\
         Department of {dept}\n\
         \n\
         Subject: Leave application\n\
         \n\
         I, {name} (Roll No. {roll}), request leave from {start} to {end}.\n\
         Reason: {reason}\n\
         \n\
         Tutor: {tutor}\n\
         Status: {status}\n",
        today = today.format("%d-%m-%Y"),
        dept = leave.dept,
        name = leave.student_name,
        roll = leave.roll,
        start = leave.start_date.format("%d-%m-%Y"),
        end = leave.end_date.format("%d-%m-%Y"),
        reason = leave.reason,
        tutor = leave.tutor,
        status = leave.status,
    );

    if leave.qr_code.is_some() {
        letter.push_str("Verification: QR code issued on approval\n");
    }
    letter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::LeaveStatus;
    use chrono::Utc;

    #[test]
    fn renders_snapshot_and_date() {
        let leave = LeaveRequest {
            id: 1,
            student_name: "A".into(),
            roll: "71810010001".into(),
            dept: "CSE".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            reason: "fever".into(),
            tutor: "T1".into(),
            status: LeaveStatus::AcApproved,
            qr_code: Some("qr".into()),
            created_at: Utc::now(),
        };

        let letter = render(&leave, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert!(letter.starts_with("Date: 04-03-2024\n"));
        assert!(letter.contains("request leave from 01-03-2024 to 03-03-2024."));
        assert!(letter.contains("Status: Approved by AC\n"));
        assert!(letter.ends_with("Verification: QR code issued on approval\n"));
        assert_eq!(file_name(&leave), "leave_letter_71810010001.txt");
    }
}

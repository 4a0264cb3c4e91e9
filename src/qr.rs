use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;
use qrcode::render::svg;
use qrcode::types::QrError;

use crate::model::leave_request::LeaveRequest;

/// Turns the canonical approval text into an opaque image payload.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<String, QrError>;
}

/// Renders an SVG QR symbol and returns it base64 encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgQrEncoder;

impl QrEncoder for SvgQrEncoder {
    fn encode(&self, text: &str) -> Result<String, QrError> {
        let code = QrCode::new(text.as_bytes())?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(200, 200)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(STANDARD.encode(image))
    }
}

/// The seven fields proving an approval, one per line.
pub fn canonical_text(leave: &LeaveRequest) -> String {
    format!(
        "Student Name: {}\n\
         Roll Number: {}\n\
         Department: {}\n\
         Leave Start: {}\n\
         Leave End: {}\n\
         Reason: {}\n\
         Approved by Tutor: {}\n",
        leave.student_name,
        leave.roll,
        leave.dept,
        leave.start_date.format("%Y-%m-%d"),
        leave.end_date.format("%Y-%m-%d"),
        leave.reason,
        leave.tutor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::LeaveStatus;
    use chrono::{NaiveDate, Utc};

    fn leave() -> LeaveRequest {
        LeaveRequest {
            id: 1,
            student_name: "A".into(),
            roll: "71810010001".into(),
            dept: "CSE".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            reason: "fever".into(),
            tutor: "T1".into(),
            status: LeaveStatus::TutorApproved,
            qr_code: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn canonical_text_lists_every_field() {
        let text = canonical_text(&leave());
        assert!(text.starts_with("Student Name: A\nRoll Number: 71810010001\n"));
        assert!(text.contains("Leave Start: 2024-03-01\nLeave End: 2024-03-03\n"));
        assert!(text.ends_with("Approved by Tutor: T1\n"));
    }

    #[test]
    fn encoding_is_deterministic() {
        let text = canonical_text(&leave());
        let first = SvgQrEncoder.encode(&text).unwrap();
        let second = SvgQrEncoder.encode(&text).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);

        let decoded = STANDARD.decode(&first).unwrap();
        assert!(String::from_utf8(decoded).unwrap().contains("<svg"));
    }
}

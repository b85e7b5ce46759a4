use crate::error::Result;
use crate::models::candidate::Candidate;
use rust_xlsxwriter::{Color, Format, Workbook};

pub struct ExportService;

impl ExportService {
    /// Generate an XLSX workbook from a list of candidates.
    pub fn candidates_workbook(candidates: &[Candidate]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Candidates")?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x0F172A));

        let columns = [
            ("Full name", 30.0),
            ("Email", 30.0),
            ("Phone", 18.0),
            ("Experience (years)", 18.0),
            ("Position level", 16.0),
            ("Specialization", 24.0),
            ("Source", 14.0),
            ("Assigned recruiter", 20.0),
            ("Created", 20.0),
        ];

        for (i, (title, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
            worksheet.write_with_format(0, i as u16, *title, &header_format)?;
        }

        for (index, candidate) in candidates.iter().enumerate() {
            let row = (index + 1) as u32;
            worksheet.write(row, 0, candidate.full_name())?;
            worksheet.write(row, 1, candidate.email.as_str())?;
            worksheet.write(row, 2, candidate.phone.as_str())?;
            worksheet.write(row, 3, candidate.experience_years)?;
            worksheet.write(row, 4, candidate.position_level.as_str())?;
            worksheet.write(row, 5, candidate.specialization.as_str())?;
            worksheet.write(row, 6, candidate.source.as_str())?;
            worksheet.write(
                row,
                7,
                candidate.assigned_recruiter.clone().unwrap_or_default(),
            )?;
            worksheet.write(
                row,
                8,
                candidate.created_at.format("%Y-%m-%d %H:%M").to_string(),
            )?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn workbook_is_a_zip_container_even_when_empty() {
        let buffer = ExportService::candidates_workbook(&[]).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn workbook_holds_candidate_rows() {
        let candidate = Candidate {
            id: Uuid::new_v4(),
            first_name: "Anna".to_string(),
            last_name: "Petrova".to_string(),
            patronymic: String::new(),
            email: "anna@example.com".to_string(),
            phone: "+7 900 000 00 00".to_string(),
            age: Some(29),
            experience_years: 4,
            specialization: "Backend".to_string(),
            position_level: "middle".to_string(),
            employment_status: "unemployed".to_string(),
            work_format: "remote".to_string(),
            education_level: "higher".to_string(),
            education_institution: String::new(),
            graduation_year: Some(2018),
            source: "hh".to_string(),
            source_details: String::new(),
            resume_url: None,
            recruiter_notes: String::new(),
            next_actions: String::new(),
            desired_salary: None,
            notice_period: String::new(),
            created_by: "recruiter1".to_string(),
            assigned_recruiter: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let buffer = ExportService::candidates_workbook(&[candidate]).unwrap();
        assert!(buffer.starts_with(b"PK"));
        assert!(!buffer.is_empty());
    }
}

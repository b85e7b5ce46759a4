use crate::error::{Error, Result};
use crate::models::candidate::{Application, Candidate};
use crate::models::interview::Interview;
use crate::models::personnel_form::PersonnelForm;
use crate::models::user::{Principal, Role, SYSTEM_ADMIN_USERNAME};
use crate::models::vacancy::Vacancy;

/// Coarse-grained actions a caller can attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewList,
    ViewDetail,
    Create,
    Edit,
    Delete,
    ChangeStatus,
    ManageUsers,
    Export,
}

/// The target of an action. Collection variants cover `create`/`view_list`,
/// where no single record exists yet; record variants borrow the row the
/// decision depends on.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    CandidateCollection,
    Candidate(&'a Candidate),
    VacancyCollection,
    Vacancy(&'a Vacancy),
    ApplicationCollection,
    Application(&'a Application),
    InterviewCollection,
    Interview(&'a Interview),
    PersonnelFormCollection,
    PersonnelForm(&'a PersonnelForm),
    UserCollection,
    UserAccount(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }

    /// Turns a denial into the uniform `Forbidden` error.
    pub fn require(self) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(Error::Forbidden),
        }
    }
}

/// Decides whether `principal` may perform `action` on `resource`.
///
/// The `systemadmin` protection is an absolute invariant evaluated before
/// any role rule; everything after it is an exhaustive match over the
/// closed role enum.
pub fn authorize(principal: &Principal, action: Action, resource: &Resource<'_>) -> Decision {
    if let Resource::UserAccount(username) = resource {
        if *username == SYSTEM_ADMIN_USERNAME
            && matches!(action, Action::Edit | Action::Delete | Action::ManageUsers)
        {
            return Decision::Deny;
        }
    }

    match principal.role {
        Role::Administrator => Decision::Allow,
        Role::Manager => manager_rules(principal, action, resource),
        Role::Recruiter => recruiter_rules(principal, action, resource),
        Role::Unknown => open_resource_rules(action, resource),
    }
}

fn manager_rules(principal: &Principal, action: Action, resource: &Resource<'_>) -> Decision {
    match action {
        Action::ViewList | Action::ViewDetail => match resource {
            Resource::UserCollection | Resource::UserAccount(_) => Decision::Deny,
            _ => Decision::Allow,
        },
        Action::Create => match resource {
            Resource::UserCollection | Resource::UserAccount(_) => Decision::Deny,
            _ => Decision::Allow,
        },
        // Vacancies are organization-wide for managers; everything else is
        // mutable only by its owner.
        Action::Edit | Action::Delete | Action::ChangeStatus => match resource {
            Resource::Vacancy(_) => Decision::Allow,
            Resource::Candidate(candidate) => owned(&candidate.created_by, principal),
            Resource::Application(application) => owned(&application.created_by, principal),
            Resource::Interview(interview) => owned(&interview.scheduled_by, principal),
            Resource::PersonnelForm(form) => owned(&form.created_by, principal),
            _ => Decision::Deny,
        },
        Action::Export => Decision::Allow,
        Action::ManageUsers => Decision::Deny,
    }
}

fn recruiter_rules(principal: &Principal, action: Action, resource: &Resource<'_>) -> Decision {
    match action {
        Action::ViewList => match resource {
            Resource::UserCollection
            | Resource::UserAccount(_)
            | Resource::PersonnelFormCollection
            | Resource::PersonnelForm(_) => Decision::Deny,
            _ => Decision::Allow,
        },
        Action::ViewDetail => match resource {
            Resource::Vacancy(vacancy) => {
                if vacancy.is_open()
                    || vacancy.assigned_recruiter.as_deref() == Some(principal.username.as_str())
                {
                    Decision::Allow
                } else {
                    Decision::Deny
                }
            }
            Resource::UserCollection
            | Resource::UserAccount(_)
            | Resource::PersonnelFormCollection
            | Resource::PersonnelForm(_) => Decision::Deny,
            _ => Decision::Allow,
        },
        Action::Create => match resource {
            Resource::CandidateCollection
            | Resource::ApplicationCollection
            | Resource::InterviewCollection => Decision::Allow,
            _ => Decision::Deny,
        },
        Action::Edit => match resource {
            Resource::Candidate(_) => Decision::Allow,
            _ => Decision::Deny,
        },
        Action::Delete | Action::ChangeStatus | Action::ManageUsers | Action::Export => {
            Decision::Deny
        }
    }
}

/// Callers without a recognized role get nothing beyond the public
/// job-board views.
fn open_resource_rules(action: Action, resource: &Resource<'_>) -> Decision {
    match (action, resource) {
        (Action::ViewList, Resource::VacancyCollection) => Decision::Allow,
        (Action::ViewDetail, Resource::Vacancy(vacancy)) if vacancy.is_open() => Decision::Allow,
        _ => Decision::Deny,
    }
}

fn owned(owner: &str, principal: &Principal) -> Decision {
    if owner == principal.username {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn recruiter(name: &str) -> Principal {
        Principal::new(name, Role::Recruiter)
    }

    fn manager(name: &str) -> Principal {
        Principal::new(name, Role::Manager)
    }

    fn admin(name: &str) -> Principal {
        Principal::new(name, Role::Administrator)
    }

    fn unknown(name: &str) -> Principal {
        Principal::new(name, Role::Unknown)
    }

    fn vacancy(created_by: &str, status: &str, assigned: Option<&str>) -> Vacancy {
        Vacancy {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            description: "Rust services".to_string(),
            required_experience: 3,
            salary: None,
            work_format: "office".to_string(),
            employment_type: "full_time".to_string(),
            location: "Moscow".to_string(),
            status: status.to_string(),
            created_by: created_by.to_string(),
            assigned_recruiter: assigned.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn candidate(created_by: &str) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            patronymic: String::new(),
            email: "ivan@example.com".to_string(),
            phone: String::new(),
            age: None,
            experience_years: 5,
            specialization: String::new(),
            position_level: String::new(),
            employment_status: "unemployed".to_string(),
            work_format: String::new(),
            education_level: String::new(),
            education_institution: String::new(),
            graduation_year: None,
            source: "hh".to_string(),
            source_details: String::new(),
            resume_url: None,
            recruiter_notes: String::new(),
            next_actions: String::new(),
            desired_salary: None,
            notice_period: String::new(),
            created_by: created_by.to_string(),
            assigned_recruiter: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn interview(scheduled_by: &str) -> Interview {
        Interview {
            id: Uuid::new_v4(),
            candidate_id: Uuid::new_v4(),
            scheduled_date: Utc::now(),
            interview_type: "phone".to_string(),
            notes: String::new(),
            scheduled_by: scheduled_by.to_string(),
            status: "scheduled".to_string(),
            feedback: String::new(),
            result: None,
            reminder_sent: false,
            reminder_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn systemadmin_is_untouchable_for_every_role() {
        let target = Resource::UserAccount(SYSTEM_ADMIN_USERNAME);
        for principal in [
            admin("root"),
            admin(SYSTEM_ADMIN_USERNAME),
            manager("m1"),
            recruiter("r1"),
            unknown("nobody"),
        ] {
            for action in [Action::Edit, Action::Delete, Action::ManageUsers] {
                assert_eq!(
                    authorize(&principal, action, &target),
                    Decision::Deny,
                    "{:?} by {:?}",
                    action,
                    principal.role
                );
            }
        }
    }

    #[test]
    fn systemadmin_guard_does_not_block_views() {
        assert!(authorize(
            &admin("root"),
            Action::ViewDetail,
            &Resource::UserAccount(SYSTEM_ADMIN_USERNAME)
        )
        .is_allowed());
    }

    #[test]
    fn administrator_is_allowed_everything_else() {
        let p = admin("root");
        let v = vacancy("someone", "draft", None);
        assert!(authorize(&p, Action::ManageUsers, &Resource::UserCollection).is_allowed());
        assert!(authorize(&p, Action::Delete, &Resource::Vacancy(&v)).is_allowed());
        assert!(authorize(&p, Action::ChangeStatus, &Resource::Vacancy(&v)).is_allowed());
        assert!(authorize(&p, Action::Export, &Resource::CandidateCollection).is_allowed());
        assert!(authorize(&p, Action::Delete, &Resource::UserAccount("m1")).is_allowed());
    }

    #[test]
    fn manager_may_always_drive_vacancies() {
        let p = manager("m1");
        let someone_elses = vacancy("m2", "open", None);
        assert!(authorize(&p, Action::Edit, &Resource::Vacancy(&someone_elses)).is_allowed());
        assert!(authorize(&p, Action::Delete, &Resource::Vacancy(&someone_elses)).is_allowed());
        assert!(
            authorize(&p, Action::ChangeStatus, &Resource::Vacancy(&someone_elses)).is_allowed()
        );
    }

    #[test]
    fn manager_mutations_elsewhere_require_ownership() {
        let p = manager("m1");
        let own = candidate("m1");
        let other = candidate("r1");
        assert!(authorize(&p, Action::Edit, &Resource::Candidate(&own)).is_allowed());
        assert_eq!(
            authorize(&p, Action::Edit, &Resource::Candidate(&other)),
            Decision::Deny
        );
        let own_interview = interview("m1");
        let other_interview = interview("r1");
        assert!(authorize(&p, Action::Edit, &Resource::Interview(&own_interview)).is_allowed());
        assert_eq!(
            authorize(&p, Action::Edit, &Resource::Interview(&other_interview)),
            Decision::Deny
        );
    }

    #[test]
    fn manager_cannot_touch_the_user_directory() {
        let p = manager("m1");
        assert_eq!(
            authorize(&p, Action::ManageUsers, &Resource::UserCollection),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::ViewList, &Resource::UserCollection),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::Edit, &Resource::UserAccount("r1")),
            Decision::Deny
        );
    }

    #[test]
    fn recruiter_vacancy_detail_depends_on_status_and_assignment() {
        let p = recruiter("r1");
        let draft = vacancy("m1", "draft", None);
        let open = vacancy("m1", "open", None);
        let assigned_draft = vacancy("m1", "draft", Some("r1"));
        let assigned_to_other = vacancy("m1", "closed", Some("r2"));

        assert_eq!(
            authorize(&p, Action::ViewDetail, &Resource::Vacancy(&draft)),
            Decision::Deny
        );
        assert!(authorize(&p, Action::ViewDetail, &Resource::Vacancy(&open)).is_allowed());
        assert!(
            authorize(&p, Action::ViewDetail, &Resource::Vacancy(&assigned_draft)).is_allowed()
        );
        assert_eq!(
            authorize(&p, Action::ViewDetail, &Resource::Vacancy(&assigned_to_other)),
            Decision::Deny
        );
    }

    #[test]
    fn recruiter_creates_candidates_applications_and_interviews_only() {
        let p = recruiter("r1");
        assert!(authorize(&p, Action::Create, &Resource::CandidateCollection).is_allowed());
        assert!(authorize(&p, Action::Create, &Resource::ApplicationCollection).is_allowed());
        assert!(authorize(&p, Action::Create, &Resource::InterviewCollection).is_allowed());
        assert_eq!(
            authorize(&p, Action::Create, &Resource::VacancyCollection),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::Create, &Resource::PersonnelFormCollection),
            Decision::Deny
        );
    }

    #[test]
    fn recruiter_edits_candidates_but_never_deletes_or_transitions() {
        let p = recruiter("r1");
        let c = candidate("r2");
        let v = vacancy("m1", "open", None);
        assert!(authorize(&p, Action::Edit, &Resource::Candidate(&c)).is_allowed());
        assert_eq!(
            authorize(&p, Action::Delete, &Resource::Candidate(&c)),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::Edit, &Resource::Vacancy(&v)),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::ChangeStatus, &Resource::Vacancy(&v)),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::ManageUsers, &Resource::UserCollection),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::Export, &Resource::CandidateCollection),
            Decision::Deny
        );
    }

    #[test]
    fn recruiter_is_kept_out_of_personnel_forms() {
        let p = recruiter("r1");
        assert_eq!(
            authorize(&p, Action::ViewList, &Resource::PersonnelFormCollection),
            Decision::Deny
        );
    }

    #[test]
    fn unknown_role_gets_only_open_vacancy_views() {
        let p = unknown("ghost");
        let open = vacancy("m1", "open", None);
        let draft = vacancy("m1", "draft", None);
        assert!(authorize(&p, Action::ViewList, &Resource::VacancyCollection).is_allowed());
        assert!(authorize(&p, Action::ViewDetail, &Resource::Vacancy(&open)).is_allowed());
        assert_eq!(
            authorize(&p, Action::ViewDetail, &Resource::Vacancy(&draft)),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::ViewList, &Resource::CandidateCollection),
            Decision::Deny
        );
        assert_eq!(
            authorize(&p, Action::Create, &Resource::CandidateCollection),
            Decision::Deny
        );
    }

    #[test]
    fn deny_maps_to_the_uniform_forbidden_error() {
        let err = Decision::Deny.require().unwrap_err();
        assert!(matches!(err, Error::Forbidden));
        assert!(Decision::Allow.require().is_ok());
    }
}

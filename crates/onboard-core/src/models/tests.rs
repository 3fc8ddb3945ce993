//! Tests for the models module.

use super::*;

fn stage1(full_name: &str) -> Stage1Data {
    Stage1Data {
        full_name: Some(full_name.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_role_parse_is_exact() {
    assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!("ops".parse::<Role>().unwrap(), Role::Ops);
    assert!("Admin".parse::<Role>().is_err());
    assert!("".parse::<Role>().is_err());
    assert!("superuser".parse::<Role>().is_err());
}

#[test]
fn test_role_resolution() {
    assert_eq!(RoleState::resolve(None), RoleState::Resolved(Role::Admin));
    assert_eq!(
        RoleState::resolve(Some("ops")),
        RoleState::Resolved(Role::Ops)
    );

    for value in ["guest", "ADMIN", "", "ops "] {
        let state = RoleState::resolve(Some(value));
        assert!(state.is_unresolved(), "{value:?} should not resolve");
        assert_eq!(state.role(), None);
    }
}

#[test]
fn test_session_initial_steps() {
    let admin = WizardSession::new(RoleState::Resolved(Role::Admin));
    assert_eq!(admin.current_step, WizardStep::Stage1);
    assert!(!admin.show_invalid_role_error);

    let ops = WizardSession::new(RoleState::Resolved(Role::Ops));
    assert_eq!(ops.current_step, WizardStep::Stage2);
    assert!(!ops.can_go_back());

    let unresolved = WizardSession::new(RoleState::resolve(Some("intern")));
    assert!(unresolved.show_invalid_role_error);
    assert!(!unresolved.should_render_forms());
    assert_ne!(unresolved.current_step, WizardStep::Stage1);
}

#[test]
fn test_job_role_and_employment_type_parsing() {
    assert_eq!("engineer".parse::<JobRole>().unwrap(), JobRole::Engineer);
    assert!("Janitor".parse::<JobRole>().is_err());

    assert_eq!(
        "Full-time".parse::<EmploymentType>().unwrap(),
        EmploymentType::FullTime
    );
    assert_eq!(
        "part time".parse::<EmploymentType>().unwrap(),
        EmploymentType::PartTime
    );
    assert!("Freelance".parse::<EmploymentType>().is_err());
}

#[test]
fn test_employment_type_serializes_as_label() {
    let json = serde_json::to_string(&EmploymentType::FullTime).unwrap();
    assert_eq!(json, "\"Full-time\"");
}

#[test]
fn test_merge_loaded_fills_only_empty_fields() {
    let current = Stage1Data {
        full_name: Some("Typed Before Load".to_string()),
        ..Default::default()
    };
    let loaded = Stage1Data {
        full_name: Some("Jane".to_string()),
        email: Some("jane@x.co".to_string()),
        ..Default::default()
    };

    let merged = current.merged_with(&loaded);
    assert_eq!(merged.full_name.as_deref(), Some("Typed Before Load"));
    assert_eq!(merged.email.as_deref(), Some("jane@x.co"));
}

#[test]
fn test_merge_draft_keeps_missing_sections() {
    let stage2 = Stage2Data {
        notes: Some("desk near window".to_string()),
        ..Default::default()
    };
    let draft = Draft {
        stage1_data: Some(stage1("Jane")),
        stage2_data: None,
    };

    let (merged1, merged2) = merge_draft((&Stage1Data::default(), &stage2), &draft);
    assert_eq!(merged1.full_name.as_deref(), Some("Jane"));
    assert_eq!(merged2, stage2);
}

#[test]
fn test_draft_for_ops_never_carries_stage1() {
    let stage2 = Stage2Data {
        office_location: Some("Berlin".to_string()),
        ..Default::default()
    };

    let draft = Draft::for_role(Role::Ops, &stage1("Jane"), &stage2).unwrap();
    assert!(draft.stage1_data.is_none());
    assert_eq!(draft.stage2_data, Some(stage2));

    assert!(Draft::for_role(Role::Ops, &stage1("Jane"), &Stage2Data::default()).is_none());
    assert!(Draft::for_role(Role::Admin, &Stage1Data::default(), &Stage2Data::default()).is_none());
}

#[test]
fn test_draft_json_shape() {
    let draft = Draft::for_role(Role::Admin, &stage1("Jane"), &Stage2Data::default()).unwrap();
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json, serde_json::json!({ "stage1Data": { "fullName": "Jane" } }));

    let scoped = draft.scoped_to(Role::Ops);
    assert!(scoped.is_empty());
}

#[test]
fn test_submission_phase_running() {
    assert!(!SubmissionPhase::Idle.is_running());
    assert!(SubmissionPhase::Phase1Running.is_running());
    assert!(SubmissionPhase::Phase2Running.is_running());
    assert!(SubmissionPhase::Succeeded.is_terminal());
    assert!(SubmissionPhase::Failed {
        message: "boom".to_string()
    }
    .is_terminal());
}

#[test]
fn test_page_paginate() {
    let page = Page::paginate((1..=25).collect::<Vec<u32>>(), 2, 10);
    assert_eq!(page.data, (11..=20).collect::<Vec<_>>());
    assert_eq!(page.pages, 3);
    assert_eq!(page.items, 25);
    assert_eq!(page.next, Some(3));
    assert_eq!(page.prev, Some(1));

    let empty = Page::paginate(Vec::<u32>::new(), 1, 10);
    assert_eq!(empty.pages, 1);
    assert_eq!(empty.next, None);
    assert_eq!(empty.prev, None);
}

#[test]
fn test_page_deserializes_json_server_shape() {
    let json = r#"{"first":1,"prev":null,"next":2,"last":2,"pages":2,"items":11,
        "data":[{"id":"a1","email":"jane@x.co","employeeId":"ENG-001"}]}"#;
    let page: Page<Stage2Record> = serde_json::from_str(json).unwrap();
    assert_eq!(page.next, Some(2));
    assert_eq!(page.data[0].id, Some(RecordId::Text("a1".to_string())));
    assert_eq!(page.data[0].employee_id, "ENG-001");
}

#[test]
fn test_suggest_option_reads_name_field() {
    let option: SuggestOption =
        serde_json::from_str(r#"{"id":1,"name":"Engineering"}"#).unwrap();
    assert_eq!(option, SuggestOption::new(1, "Engineering"));
}

// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use formflow_model::{
    Department, EmployeeProfileDraft, Form, FormDraft, QuestionDraft, QuestionType, Role, User,
};
use serde_json::json;

fn sample_form() -> Form {
    let content = FormDraft {
        title: Some("Quarterly pulse".into()),
        created_by: Some("admin-1".into()),
        target_levels: Some(vec!["L001".into()]),
        questions: Some(vec![QuestionDraft {
            kind: Some(QuestionType::Multiple),
            title: Some("Mood".into()),
            ..QuestionDraft::default()
        }]),
        ..FormDraft::default()
    }
    .validate()
    .expect("form");
    Form {
        id: "f1".into(),
        short_id: "abcdefghij".into(),
        content,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn form_wire_shape_uses_camel_case_and_mongo_ids() {
    let v = serde_json::to_value(sample_form()).expect("json");
    assert_eq!(v["_id"], "f1");
    assert_eq!(v["shortId"], "abcdefghij");
    assert_eq!(v["isPublished"], false);
    assert_eq!(v["targetLevels"], json!(["L001"]));
    assert_eq!(v["targetDepartments"], json!([]));
    assert_eq!(v["settings"]["limitOneResponse"], false);
    assert_eq!(v["settings"]["showProgress"], true);
    assert_eq!(v["theme"]["header"], "#1976d2");
    assert_eq!(v["questions"][0]["type"], "multiple");
    assert!(v["questions"][0]["_id"].is_string());
    assert!(v.get("createdAt").is_some());
}

#[test]
fn form_roundtrips_through_json() {
    let form = sample_form();
    let bytes = serde_json::to_vec(&form).expect("encode");
    let back: Form = serde_json::from_slice(&bytes).expect("decode");
    assert_eq!(back, form);
}

#[test]
fn draft_accepts_client_payload() {
    let body = json!({
        "title": "Onboarding",
        "createdBy": "admin-2",
        "targetDepartments": ["D001"],
        "settings": {"limitOneResponse": true},
        "questions": [{"type": "checkboxGrid", "title": "Grid",
                       "settings": {"grid": {"rows": ["a"], "columns": ["b"]}}}]
    });
    let draft: FormDraft = serde_json::from_value(body).expect("draft");
    let content = draft.validate().expect("valid");
    assert!(content.settings.limit_one_response);
    assert!(content.settings.show_progress);
    assert_eq!(content.target_departments, vec!["D001"]);
}

#[test]
fn employee_and_master_wire_names() {
    let draft: EmployeeProfileDraft = serde_json::from_value(json!({
        "employeeId": "EMP9", "employeeName": "Ravi", "reportingAuthorityName": "Meera"
    }))
    .expect("draft");
    let profile = draft.validate("p1".into(), None, Utc::now()).expect("valid");
    let v = serde_json::to_value(&profile).expect("json");
    assert_eq!(v["employeeId"], "EMP9");
    assert_eq!(v["reportingAuthorityName"], "Meera");
    assert!(v.get("userId").is_none());

    let dept = Department::new("D001", "GIS", "Operational").expect("dept");
    let v = serde_json::to_value(&dept).expect("json");
    assert_eq!(v["levelCategory"], "Operational");
    assert_eq!(v["dept_id"], "D001");
}

#[test]
fn user_view_hides_password_hash() {
    let user = User {
        id: "u1".into(),
        username: "asha".into(),
        email: "asha@org.in".into(),
        password_hash: "secret-hash".into(),
        role: Role::Admin,
        created_at: Utc::now(),
    };
    let v = serde_json::to_value(user.view()).expect("json");
    assert_eq!(v["role"], "admin");
    assert_eq!(v["isRegistered"], true);
    assert!(!v.to_string().contains("secret-hash"));
}

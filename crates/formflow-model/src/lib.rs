// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! FormFlow domain model.
//!
//! Everything that crosses the HTTP boundary is validated here before it
//! reaches the store: drafts come in, validated content comes out.

mod employee;
mod form;
mod master;
mod response;
mod user;
mod validation;

pub use employee::{EmployeeProfile, EmployeeProfileDraft, EMPLOYEE_ID_MAX_LEN, EMPLOYEE_ID_MIN_LEN};
pub use form::{
    Form, FormContent, FormDraft, FormSettings, GridSettings, LinearScale, Question, QuestionDraft,
    QuestionOption, QuestionSettings, QuestionType, TargetDimension, Theme,
    DEFAULT_BACKGROUND_COLOR, DEFAULT_HEADER_COLOR, DESCRIPTION_MAX_LEN, QUESTION_TITLE_MAX_LEN,
    TITLE_MAX_LEN,
};
pub use master::{
    Department, Designation, DesignationWithLevel, Level, MasterData,
};
pub use response::{Answer, AnswerDraft, Response, ResponseDraft};
pub use user::{Role, User, UserDraft, UserView, ValidatedUser};
pub use validation::ValidationError;

pub const CRATE_NAME: &str = "formflow-model";

/// Fresh opaque identifier for stored records.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

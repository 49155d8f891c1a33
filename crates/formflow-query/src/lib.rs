// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod normalize;
mod responses;
mod targeting;

pub use normalize::normalize_key;
pub use responses::{
    count_forms_by_dimension, count_responses_by_dimension, enrich_responses, response_detail,
    select_forms, select_responses, DimensionCount, EnrichedAnswer, EnrichedResponse,
    ResponseDetail, ResponseFilter, ANONYMOUS_RESPONDENT, UNKNOWN_FORM_TITLE, UNKNOWN_QUESTION,
};
pub use targeting::{
    DimensionOutcome, FormTargets, MasterIndex, Resolver, TargetDecision, TargetProfile,
    TargetingPolicy,
};

pub const CRATE_NAME: &str = "formflow-query";

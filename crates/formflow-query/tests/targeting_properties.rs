// SPDX-License-Identifier: Apache-2.0

use formflow_model::{Department, Designation, FormContent, FormSettings, Level, MasterData, Theme};
use formflow_query::{Resolver, TargetProfile, TargetingPolicy};
use proptest::prelude::*;
use proptest::test_runner::Config;

const LEVELS: [(&str, &str); 3] = [
    ("L001", "Strategic"),
    ("L002", "Tactical"),
    ("L003", "Operational"),
];
const DEPARTMENTS: [(&str, &str); 3] = [
    ("D001", "GIS (Geographic Information System)"),
    ("D002", "Satellite Communication"),
    ("D003", "Software Development"),
];

fn master() -> MasterData {
    MasterData {
        departments: DEPARTMENTS
            .iter()
            .map(|(id, name)| Department::new(id, name, "Tactical").expect("dept"))
            .collect(),
        levels: LEVELS
            .iter()
            .map(|(id, name)| Level::new(id, name).expect("level"))
            .collect(),
        designations: vec![Designation::new("DS001", "GIS Analyst", "D001", "L003").expect("desig")],
    }
}

fn content(levels: Vec<String>, departments: Vec<String>) -> FormContent {
    FormContent {
        title: "Survey".into(),
        description: String::new(),
        questions: vec![],
        theme: Theme::default(),
        settings: FormSettings::default(),
        created_by: "admin".into(),
        is_published: true,
        target_levels: levels,
        target_departments: departments,
        target_designations: vec![],
    }
}

fn spelled(id: &str, name: &str, variant: u8) -> String {
    match variant % 4 {
        0 => id.to_string(),
        1 => id.to_lowercase(),
        2 => name.to_string(),
        _ => format!("  {}  ", name.to_uppercase()),
    }
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn unrestricted_forms_are_visible_to_everyone(
        level in proptest::option::of(0_usize..3),
        dept in proptest::option::of(0_usize..3),
        free_text in "[a-z ]{0,12}",
    ) {
        let resolver = Resolver::new(&master(), TargetingPolicy::default());
        let profile = TargetProfile::from_values(
            resolver.index(),
            level.map(|i| LEVELS[i].1),
            dept.map(|i| DEPARTMENTS[i].0),
            Some(free_text.as_str()),
        );
        prop_assert!(resolver.is_visible(&profile, &content(vec![], vec![])));
    }

    #[test]
    fn level_targets_admit_only_their_level(
        own in 0_usize..3,
        targeted in proptest::collection::btree_set(0_usize..3, 0..=3),
        own_variant in any::<u8>(),
        target_variant in any::<u8>(),
    ) {
        let resolver = Resolver::new(&master(), TargetingPolicy::default());
        let (own_id, own_name) = LEVELS[own];
        let profile = TargetProfile::from_values(
            resolver.index(),
            Some(spelled(own_id, own_name, own_variant).as_str()),
            None,
            None,
        );
        let targets: Vec<String> = targeted
            .iter()
            .map(|i| spelled(LEVELS[*i].0, LEVELS[*i].1, target_variant))
            .collect();
        let expected = targeted.is_empty() || targeted.contains(&own);
        prop_assert_eq!(resolver.is_visible(&profile, &content(targets, vec![])), expected);
    }

    #[test]
    fn names_and_ids_are_interchangeable(idx in 0_usize..3, a in any::<u8>(), b in any::<u8>()) {
        let resolver = Resolver::new(&master(), TargetingPolicy::default());
        let (id, name) = DEPARTMENTS[idx];
        let profile = TargetProfile::from_values(
            resolver.index(),
            None,
            Some(spelled(id, name, a).as_str()),
            None,
        );
        let form = content(vec![], vec![spelled(id, name, b)]);
        prop_assert!(resolver.is_visible(&profile, &form));
    }
}

#[test]
fn missing_profile_value_never_matches_a_restricted_dimension() {
    let resolver = Resolver::new(&master(), TargetingPolicy::default());
    let profile = TargetProfile::from_values(resolver.index(), None, Some("D001"), None);
    assert!(!resolver.is_visible(&profile, &content(vec!["L001".into()], vec![])));
    assert!(resolver.is_visible(&profile, &content(vec![], vec!["D001".into()])));
}

//! Mapping sub-reducer: editing, submission, deletion and test results.

use etl_console_domain::{Mapping, MappingField};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;
use crate::validation::mapping_schema;

/// Handles mapping collection actions.
/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_mapping(state: &mut AppState, action: &Action) -> Option<Vec<Effect>> {
    let mappings = &mut state.mappings;
    match action {
        Action::FetchMappings => {
            mappings.is_loading = true;
            Some(vec![Effect::FetchMappings])
        }
        Action::MappingsLoaded(records) => {
            mappings.items = records
                .iter()
                .cloned()
                .map(|record| Mapping::from_record(record, false))
                .collect();
            mappings.is_loading = false;
            Some(vec![])
        }
        Action::MappingsLoadFailed => {
            mappings.is_loading = false;
            Some(vec![])
        }
        Action::FetchSources => Some(vec![Effect::FetchSources]),
        Action::SourcesLoaded(names) => {
            mappings.sources = names.clone();
            Some(vec![])
        }

        Action::AddMapping => {
            mappings.items.push(Mapping::draft());
            Some(vec![])
        }
        Action::UpdateMappingField {
            local_id,
            field,
            value,
        } => {
            if let Some(mapping) = mappings.find_mut(*local_id) {
                edit_field(mapping, *field, value);
            }
            Some(vec![])
        }
        Action::ToggleMappingOpen(local_id) => {
            if let Some(mapping) = mappings.find_mut(*local_id) {
                mapping.is_open = !mapping.is_open;
            }
            Some(vec![])
        }

        Action::SubmitMapping(local_id) => {
            let effects = mappings
                .find(*local_id)
                .map(|mapping| {
                    vec![Effect::ValidateMapping {
                        mapping: Box::new(mapping.clone()),
                    }]
                })
                .unwrap_or_default();
            Some(effects)
        }
        Action::MappingValidated {
            local_id,
            is_open,
            result,
        } => {
            let Some(mapping) = mappings.find_mut(*local_id) else {
                return Some(vec![]);
            };
            let request = match result {
                Err(errors) => {
                    mapping.errors = Some(errors.clone());
                    return Some(vec![]);
                }
                Ok(request) => request.clone(),
            };
            mapping.errors = None;
            // The entity may have been persisted since the submit snapshot.
            let persisted_id = mapping.id;
            let effect = match persisted_id {
                Some(id) => Effect::UpdateMapping { id, request },
                None if mappings.creating.insert(*local_id) => Effect::CreateMapping {
                    local_id: *local_id,
                    is_open: *is_open,
                    request,
                },
                None => return Some(vec![]),
            };
            Some(vec![effect])
        }
        Action::MappingCreated {
            local_id,
            is_open,
            record,
        } => {
            mappings.creating.remove(local_id);
            if let Some(mapping) = mappings.find_mut(*local_id)
                && mapping.id.is_none()
            {
                let mut created = Mapping::from_record(record.clone(), *is_open);
                created.local_id = *local_id;
                *mapping = created;
            }
            Some(vec![])
        }
        Action::MappingCreateFailed(local_id) => {
            mappings.creating.remove(local_id);
            Some(vec![])
        }
        Action::MappingUpdated(id) => {
            if let Some(mapping) = mappings.find_by_id_mut(*id) {
                mapping.is_testable = true;
                mapping.test_results = None;
            }
            Some(vec![])
        }

        Action::RequestMappingDelete(local_id) => {
            let Some(mapping) = mappings.find(*local_id) else {
                return Some(vec![]);
            };
            let persisted_id = mapping.id;
            match persisted_id {
                Some(id) => mappings.deletion.request(*local_id, id),
                None => {
                    mappings.remove(*local_id);
                }
            }
            Some(vec![])
        }
        Action::ConfirmMappingDelete => {
            let effects = mappings
                .deletion
                .confirm()
                .map(|target| {
                    vec![Effect::DeleteMapping {
                        local_id: target.local_id,
                        id: target.key,
                    }]
                })
                .unwrap_or_default();
            Some(effects)
        }
        Action::DenyMappingDelete => {
            mappings.deletion.deny();
            Some(vec![])
        }
        Action::MappingDeleted(local_id) => {
            mappings.remove(*local_id);
            mappings.deletion.finish(*local_id);
            Some(vec![])
        }
        Action::MappingDeleteFailed(local_id) => {
            mappings.deletion.finish(*local_id);
            Some(vec![])
        }

        Action::TestMapping(local_id) => {
            let effects = mappings
                .find(*local_id)
                .filter(|m| m.is_testable)
                .and_then(|m| m.id)
                .map(|id| vec![Effect::TestMapping { id }])
                .unwrap_or_default();
            Some(effects)
        }
        Action::MappingTested { id, results } => {
            if let Some(mapping) = mappings.find_by_id_mut(*id) {
                mapping.test_results = Some(results.clone());
            }
            Some(vec![])
        }

        Action::ResetMappings => {
            *mappings = Default::default();
            Some(vec![])
        }

        _ => None,
    }
}

/// Applies one edit, then revalidates the whole form.
fn edit_field(mapping: &mut Mapping, field: MappingField, value: &str) {
    // Rejected numeric input is reported by the whole-number rule.
    let _ = mapping.set_field(field, value);
    mapping.is_testable = false;
    mapping.test_results = None;

    mapping.errors = mapping_schema().validate(mapping).err();
}

#[cfg(test)]
mod tests {
    use super::*;
    use etl_console_domain::{LocalId, MappingId, MappingRecord, MappingTestResults};
    use serde_json::json;

    use crate::deletion_state::DeletionState;
    use crate::test_result_view::TestResultView;
    use crate::messages::{FIELD_REQUIRED, WHOLE_NUMBER_REQUIRED};

    fn persisted(id: i64, name: &str) -> MappingRecord {
        MappingRecord {
            id: Some(MappingId::new(id)),
            name: name.to_string(),
            source: "warehouse".to_string(),
            ..Default::default()
        }
    }

    fn state_with(records: Vec<MappingRecord>) -> AppState {
        let mut state = AppState::default();
        reduce_mapping(&mut state, &Action::MappingsLoaded(records));
        state
    }

    fn add_draft(state: &mut AppState) -> LocalId {
        reduce_mapping(state, &Action::AddMapping);
        state.mappings.items.last().unwrap().local_id
    }

    mod loading {
        use super::*;

        #[test]
        fn fetch_sets_loading_and_emits_effect() {
            let mut state = AppState::default();

            let effects = reduce_mapping(&mut state, &Action::FetchMappings).unwrap();

            assert!(state.mappings.is_loading);
            assert!(matches!(effects.as_slice(), [Effect::FetchMappings]));
        }

        #[test]
        fn loaded_records_are_closed_and_testable() {
            let mut state = AppState::default();
            state.mappings.is_loading = true;

            reduce_mapping(
                &mut state,
                &Action::MappingsLoaded(vec![persisted(1, "a"), persisted(2, "b")]),
            );

            assert!(!state.mappings.is_loading);
            assert_eq!(state.mappings.items.len(), 2);
            assert!(state.mappings.items.iter().all(|m| m.is_testable && !m.is_open));
        }

        #[test]
        fn sources_loaded_replaces_list() {
            let mut state = AppState::default();

            reduce_mapping(
                &mut state,
                &Action::SourcesLoaded(vec!["warehouse".into(), "crm".into()]),
            );

            assert_eq!(state.mappings.sources, vec!["warehouse", "crm"]);
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn add_appends_open_draft() {
            let mut state = AppState::default();

            let local_id = add_draft(&mut state);

            let draft = state.mappings.find(local_id).unwrap();
            assert!(draft.is_open);
            assert!(!draft.is_testable);
            assert_eq!(draft.fetch_size, 1000);
            assert_eq!(draft.test_results_size, 10);
        }

        #[test]
        fn edit_revalidates_whole_form() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);

            reduce_mapping(
                &mut state,
                &Action::UpdateMappingField {
                    local_id,
                    field: MappingField::Name,
                    value: "orders".into(),
                },
            );

            let errors = state.mappings.find(local_id).unwrap().errors.clone().unwrap();
            assert!(!errors.contains(MappingField::Name));
            assert_eq!(errors.get(MappingField::Source), Some(FIELD_REQUIRED));
        }

        #[test]
        fn edit_clears_test_results_and_testability() {
            let mut state = state_with(vec![persisted(3, "orders")]);
            let local_id = state.mappings.items[0].local_id;
            state.mappings.items[0].test_results = Some(MappingTestResults::default());

            reduce_mapping(
                &mut state,
                &Action::UpdateMappingField {
                    local_id,
                    field: MappingField::Query,
                    value: "SELECT 1".into(),
                },
            );

            let mapping = state.mappings.find(local_id).unwrap();
            assert!(!mapping.is_testable);
            assert!(mapping.test_results.is_none());
            assert!(mapping.errors.is_none());
        }

        #[test]
        fn non_numeric_size_keeps_value_and_reports_error() {
            let mut state = state_with(vec![persisted(3, "orders")]);
            let local_id = state.mappings.items[0].local_id;

            reduce_mapping(
                &mut state,
                &Action::UpdateMappingField {
                    local_id,
                    field: MappingField::FetchSize,
                    value: "lots".into(),
                },
            );

            let mapping = state.mappings.find(local_id).unwrap();
            assert_eq!(mapping.fetch_size, 1000);
            assert!(
                mapping
                    .errors
                    .as_ref()
                    .is_some_and(|e| e.contains(MappingField::FetchSize))
            );
        }

        #[test]
        fn size_error_survives_later_edits() {
            let mut state = state_with(vec![persisted(3, "orders")]);
            let local_id = state.mappings.items[0].local_id;
            for (field, value) in [(MappingField::FetchSize, "lots"), (MappingField::Name, "o2")] {
                reduce_mapping(
                    &mut state,
                    &Action::UpdateMappingField {
                        local_id,
                        field,
                        value: value.into(),
                    },
                );
            }

            let errors = state.mappings.find(local_id).unwrap().errors.clone().unwrap();
            assert_eq!(errors.get(MappingField::FetchSize), Some(WHOLE_NUMBER_REQUIRED));
            assert_eq!(errors.len(), 1);
        }

        #[test]
        fn clearing_required_field_reports_it() {
            let mut state = state_with(vec![persisted(3, "orders")]);
            let local_id = state.mappings.items[0].local_id;

            reduce_mapping(
                &mut state,
                &Action::UpdateMappingField {
                    local_id,
                    field: MappingField::Name,
                    value: " ".into(),
                },
            );

            let errors = state.mappings.find(local_id).unwrap().errors.clone().unwrap();
            assert_eq!(errors.get(MappingField::Name), Some(FIELD_REQUIRED));
            assert_eq!(errors.len(), 1);
        }

        #[test]
        fn edit_of_unknown_entity_is_noop() {
            let mut state = state_with(vec![persisted(1, "a")]);
            let before = state.mappings.items.clone();

            reduce_mapping(
                &mut state,
                &Action::UpdateMappingField {
                    local_id: LocalId::new(),
                    field: MappingField::Name,
                    value: "x".into(),
                },
            );

            assert_eq!(state.mappings.items, before);
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn submit_emits_validation_of_snapshot() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);

            let effects = reduce_mapping(&mut state, &Action::SubmitMapping(local_id)).unwrap();

            match effects.as_slice() {
                [Effect::ValidateMapping { mapping }] => assert_eq!(mapping.local_id, local_id),
                other => panic!("unexpected effects: {other:?}"),
            }
        }

        #[test]
        fn failed_validation_stores_errors_without_network() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);
            let mut errors = etl_console_domain::ErrorMap::new();
            errors.insert(MappingField::Name, FIELD_REQUIRED);

            let effects = reduce_mapping(
                &mut state,
                &Action::MappingValidated {
                    local_id,
                    is_open: true,
                    result: Err(errors.clone()),
                },
            )
            .unwrap();

            assert!(effects.is_empty());
            assert_eq!(state.mappings.find(local_id).unwrap().errors, Some(errors));
        }

        #[test]
        fn valid_draft_is_created() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);
            let request = state.mappings.find(local_id).unwrap().to_request();

            let effects = reduce_mapping(
                &mut state,
                &Action::MappingValidated {
                    local_id,
                    is_open: true,
                    result: Ok(request),
                },
            )
            .unwrap();

            assert!(matches!(
                effects.as_slice(),
                [Effect::CreateMapping { local_id: l, is_open: true, .. }] if *l == local_id
            ));
        }

        #[test]
        fn valid_persisted_mapping_is_updated() {
            let mut state = state_with(vec![persisted(9, "orders")]);
            let mapping = state.mappings.items[0].clone();

            let effects = reduce_mapping(
                &mut state,
                &Action::MappingValidated {
                    local_id: mapping.local_id,
                    is_open: false,
                    result: Ok(mapping.to_request()),
                },
            )
            .unwrap();

            assert!(matches!(
                effects.as_slice(),
                [Effect::UpdateMapping { id, .. }] if *id == MappingId::new(9)
            ));
        }

        #[test]
        fn created_record_keeps_local_id_and_open_flag() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);
            state.mappings.find_mut(local_id).unwrap().is_open = false;

            reduce_mapping(
                &mut state,
                &Action::MappingCreated {
                    local_id,
                    is_open: true,
                    record: persisted(42, "orders"),
                },
            );

            let created = state.mappings.find(local_id).unwrap();
            assert_eq!(created.id, Some(MappingId::new(42)));
            assert!(created.is_open);
            assert!(created.is_testable);
            assert_eq!(state.mappings.items.len(), 1);
        }

        fn validated(state: &mut AppState, local_id: LocalId) -> Vec<Effect> {
            let request = state.mappings.find(local_id).unwrap().to_request();
            reduce_mapping(
                state,
                &Action::MappingValidated {
                    local_id,
                    is_open: true,
                    result: Ok(request),
                },
            )
            .unwrap()
        }

        fn created(state: &mut AppState, local_id: LocalId, id: i64) {
            reduce_mapping(
                state,
                &Action::MappingCreated {
                    local_id,
                    is_open: true,
                    record: persisted(id, "orders"),
                },
            );
        }

        #[test]
        fn second_create_keeps_first_id() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);

            created(&mut state, local_id, 7);
            created(&mut state, local_id, 8);

            assert_eq!(state.mappings.items.len(), 1);
            assert_eq!(state.mappings.items[0].id, Some(MappingId::new(7)));
        }

        #[test]
        fn resubmit_while_creating_issues_nothing() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);

            let first = validated(&mut state, local_id);
            let second = validated(&mut state, local_id);

            assert!(matches!(first.as_slice(), [Effect::CreateMapping { .. }]));
            assert!(second.is_empty());
        }

        #[test]
        fn failed_create_allows_resubmit() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);
            validated(&mut state, local_id);

            reduce_mapping(&mut state, &Action::MappingCreateFailed(local_id));

            assert!(matches!(
                validated(&mut state, local_id).as_slice(),
                [Effect::CreateMapping { .. }]
            ));
        }

        #[test]
        fn validation_after_create_updates_instead() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);
            validated(&mut state, local_id);
            created(&mut state, local_id, 7);

            let effects = validated(&mut state, local_id);

            assert!(matches!(
                effects.as_slice(),
                [Effect::UpdateMapping { id, .. }] if *id == MappingId::new(7)
            ));
            assert!(state.mappings.creating.is_empty());
        }

        #[test]
        fn create_for_removed_draft_is_dropped() {
            let mut state = state_with(vec![persisted(1, "a")]);
            let local_id = add_draft(&mut state);
            reduce_mapping(&mut state, &Action::RequestMappingDelete(local_id));
            let before = state.mappings.items.clone();

            created(&mut state, local_id, 7);

            assert_eq!(state.mappings.items, before);
        }

        #[test]
        fn update_for_unknown_id_is_dropped() {
            let mut state = state_with(vec![persisted(5, "orders")]);
            state.mappings.items[0].is_testable = false;
            let before = state.mappings.items.clone();

            reduce_mapping(&mut state, &Action::MappingUpdated(MappingId::new(6)));

            assert_eq!(state.mappings.items, before);
        }

        #[test]
        fn update_success_marks_testable_by_id() {
            let mut state = state_with(vec![persisted(5, "orders")]);
            state.mappings.items[0].is_testable = false;
            state.mappings.items[0].test_results = Some(MappingTestResults::default());

            reduce_mapping(&mut state, &Action::MappingUpdated(MappingId::new(5)));

            assert!(state.mappings.items[0].is_testable);
            assert!(state.mappings.items[0].test_results.is_none());
        }
    }

    mod deletion {
        use super::*;

        #[test]
        fn draft_is_removed_without_confirmation() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);

            let effects =
                reduce_mapping(&mut state, &Action::RequestMappingDelete(local_id)).unwrap();

            assert!(effects.is_empty());
            assert!(state.mappings.items.is_empty());
            assert_eq!(state.mappings.deletion, DeletionState::Idle);
        }

        #[test]
        fn persisted_requires_confirmation() {
            let mut state = state_with(vec![persisted(7, "orders")]);
            let local_id = state.mappings.items[0].local_id;

            reduce_mapping(&mut state, &Action::RequestMappingDelete(local_id));

            assert!(state.mappings.deletion.is_pending());
            assert_eq!(state.mappings.items.len(), 1);
        }

        #[test]
        fn confirm_issues_delete_by_id() {
            let mut state = state_with(vec![persisted(7, "orders")]);
            let local_id = state.mappings.items[0].local_id;
            reduce_mapping(&mut state, &Action::RequestMappingDelete(local_id));

            let effects = reduce_mapping(&mut state, &Action::ConfirmMappingDelete).unwrap();

            assert!(matches!(
                effects.as_slice(),
                [Effect::DeleteMapping { local_id: l, id }] if *l == local_id && *id == MappingId::new(7)
            ));
        }

        #[test]
        fn success_removes_entity_and_closes_dialog() {
            let mut state = state_with(vec![persisted(7, "orders"), persisted(8, "other")]);
            let local_id = state.mappings.items[0].local_id;
            reduce_mapping(&mut state, &Action::RequestMappingDelete(local_id));
            reduce_mapping(&mut state, &Action::ConfirmMappingDelete);

            reduce_mapping(&mut state, &Action::MappingDeleted(local_id));

            assert_eq!(state.mappings.items.len(), 1);
            assert_eq!(state.mappings.items[0].name, "other");
            assert_eq!(state.mappings.deletion, DeletionState::Idle);
        }

        #[test]
        fn failure_keeps_entity_and_closes_dialog() {
            let mut state = state_with(vec![persisted(7, "orders")]);
            let local_id = state.mappings.items[0].local_id;
            reduce_mapping(&mut state, &Action::RequestMappingDelete(local_id));
            reduce_mapping(&mut state, &Action::ConfirmMappingDelete);

            reduce_mapping(&mut state, &Action::MappingDeleteFailed(local_id));

            assert_eq!(state.mappings.items.len(), 1);
            assert_eq!(state.mappings.deletion, DeletionState::Idle);
        }

        #[test]
        fn completion_for_unknown_entity_is_noop() {
            let mut state = state_with(vec![persisted(7, "orders")]);
            let local_id = state.mappings.items[0].local_id;
            reduce_mapping(&mut state, &Action::RequestMappingDelete(local_id));
            let before = state.mappings.items.clone();

            reduce_mapping(&mut state, &Action::MappingDeleted(LocalId::new()));

            assert_eq!(state.mappings.items, before);
            assert!(state.mappings.deletion.is_pending());
        }

        #[test]
        fn deny_keeps_entity() {
            let mut state = state_with(vec![persisted(7, "orders")]);
            let local_id = state.mappings.items[0].local_id;
            reduce_mapping(&mut state, &Action::RequestMappingDelete(local_id));

            let effects = reduce_mapping(&mut state, &Action::DenyMappingDelete).unwrap();

            assert!(effects.is_empty());
            assert_eq!(state.mappings.items.len(), 1);
            assert_eq!(state.mappings.deletion, DeletionState::Idle);
        }
    }

    mod testing {
        use super::*;

        #[test]
        fn untestable_mapping_emits_nothing() {
            let mut state = AppState::default();
            let local_id = add_draft(&mut state);

            let effects = reduce_mapping(&mut state, &Action::TestMapping(local_id)).unwrap();

            assert!(effects.is_empty());
        }

        #[test]
        fn testable_mapping_emits_test_by_id() {
            let mut state = state_with(vec![persisted(4, "orders")]);
            let local_id = state.mappings.items[0].local_id;

            let effects = reduce_mapping(&mut state, &Action::TestMapping(local_id)).unwrap();

            assert!(matches!(
                effects.as_slice(),
                [Effect::TestMapping { id }] if *id == MappingId::new(4)
            ));
        }

        #[test]
        fn results_attach_by_id() {
            let mut state = state_with(vec![persisted(4, "orders")]);
            let results = MappingTestResults {
                extracted: json!([{ "id": 1 }]),
                transformed: json!([{ "id": "1" }]),
            };

            reduce_mapping(
                &mut state,
                &Action::MappingTested {
                    id: MappingId::new(4),
                    results: results.clone(),
                },
            );

            assert_eq!(state.mappings.items[0].test_results, Some(results));
        }

        #[test]
        fn late_results_attach_but_stay_hidden_after_edit() {
            let mut state = state_with(vec![persisted(4, "orders")]);
            let local_id = state.mappings.items[0].local_id;
            reduce_mapping(
                &mut state,
                &Action::UpdateMappingField {
                    local_id,
                    field: MappingField::Query,
                    value: "SELECT 1".into(),
                },
            );

            reduce_mapping(
                &mut state,
                &Action::MappingTested {
                    id: MappingId::new(4),
                    results: MappingTestResults::default(),
                },
            );

            let mapping = state.mappings.find(local_id).unwrap();
            assert!(mapping.test_results.is_some());
            assert!(TestResultView::for_mapping(mapping).is_none());
        }
    }

    #[test]
    fn reset_clears_collection() {
        let mut state = state_with(vec![persisted(1, "a")]);

        reduce_mapping(&mut state, &Action::ResetMappings);

        assert!(state.mappings.items.is_empty());
    }

    #[test]
    fn unrelated_action_is_not_handled() {
        let mut state = AppState::default();

        assert!(reduce_mapping(&mut state, &Action::FetchConfig).is_none());
    }
}

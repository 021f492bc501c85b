mod support;

use meshcore::{GroupMap, MeshError, reindex_faces};
use support::{create_group_map, cube, non_overlapping_group_names};

fn non_overlapping_group_map() -> GroupMap {
    let groups = create_group_map();
    let mapping: Vec<_> = groups
        .to_mapping()
        .into_iter()
        .filter(|(name, _)| non_overlapping_group_names().iter().any(|&n| n == name.as_str()))
        .collect();
    GroupMap::from_mapping(mapping, 12).unwrap()
}

#[test]
fn lookups() {
    let groups = create_group_map();
    assert_eq!(groups.len(), 9);
    assert_eq!(groups.num_elements(), 12);
    assert!(groups.contains("sides"));
    assert!(!groups.contains("nope"));
    assert_eq!(
        groups.get("top").unwrap(),
        &[false, false, true, true, false, false, false, false, false, false, false, false]
    );
    assert_eq!(groups.get("empty").unwrap(), &[false; 12]);
    assert_eq!(groups.get("nope").unwrap_err().to_string(), "Unknown group: nope");
}

#[test]
fn mapping_and_identity_reindex_round_trip() {
    let groups = create_group_map();
    let mapping = groups.to_mapping();
    assert_eq!(mapping.len(), 9);
    assert_eq!(mapping[6], ("sides".to_string(), (4..12).collect::<Vec<_>>()));
    assert_eq!(mapping[8], ("empty".to_string(), Vec::new()));

    let rebuilt = GroupMap::from_mapping(mapping.clone(), 12).unwrap();
    assert_eq!(rebuilt, groups);
    assert_eq!(rebuilt.to_mapping(), mapping);

    let identity: Vec<usize> = (0..12).collect();
    assert_eq!(groups.reindexed(&identity).unwrap(), groups);
}

#[test]
fn union_combines_and_reports_every_unknown_name() {
    let groups = create_group_map();
    let mut expected = [false; 12];
    for i in [0, 1, 2, 3, 10, 11] {
        expected[i] = true;
    }
    assert_eq!(groups.union(&["top_and_bottom", "left_side"]).unwrap(), expected);
    assert_eq!(groups.union::<&str>(&[]).unwrap(), vec![false; 12]);
    assert_eq!(
        groups.union(&["a", "top", "b", "c"]).unwrap_err(),
        MeshError::UnknownGroups(vec!["a".into(), "b".into(), "c".into()])
    );
}

#[test]
fn element_lookups_round_trip() {
    let groups = create_group_map();
    let membership = groups.mask_for_element(4).unwrap();
    assert_eq!(
        membership,
        vec![false, false, true, false, false, false, true, false, false]
    );
    assert_eq!(
        groups.group_names_for_element_mask(&membership).unwrap(),
        vec!["back_side", "sides"]
    );
    assert_eq!(groups.groups_of_element(0).unwrap(), vec!["bottom", "top_and_bottom"]);
    for name in groups.groups_of_element(7).unwrap() {
        assert!(groups.get(name).unwrap()[7]);
    }
    assert_eq!(
        groups.mask_for_element(12).unwrap_err(),
        MeshError::ElementOutOfRange { index: 12, limit: 12 }
    );
}

#[test]
fn construction_is_validated() {
    assert_eq!(
        GroupMap::from_mapping([("a", vec![0, 5])], 5).unwrap_err(),
        MeshError::ElementOutOfRange { index: 5, limit: 5 }
    );
    assert_eq!(
        GroupMap::from_mapping([("a", vec![0]), ("a", vec![1])], 2).unwrap_err(),
        MeshError::DuplicateGroup("a".into())
    );
    assert!(matches!(
        GroupMap::new(3, vec!["a".into()], vec![vec![true, false]]).unwrap_err(),
        MeshError::MaskLength { expected: 3, actual: 2, .. }
    ));
    let groups = GroupMap::new(2, vec!["a".into(), "b".into()], vec![vec![true, false], vec![true, true]])
        .unwrap();
    assert_eq!(
        groups.to_mapping(),
        vec![("a".to_string(), vec![0]), ("b".to_string(), vec![0, 1])]
    );
}

#[test]
fn reindexed_aggregates_memberships() {
    let groups = GroupMap::from_mapping([("a", vec![0]), ("b", vec![1, 2])], 3).unwrap();
    let reindexed = groups.reindexed(&[2, 0, 0, 1]).unwrap();
    assert_eq!(reindexed.num_elements(), 4);
    assert_eq!(reindexed.get("a").unwrap(), &[false, true, true, false]);
    assert_eq!(reindexed.get("b").unwrap(), &[true, false, false, true]);
    assert_eq!(
        groups.reindexed(&[3]).unwrap_err(),
        MeshError::ElementOutOfRange { index: 3, limit: 3 }
    );

    let collapsed = groups.aggregated(&[Some(0), Some(0), None], 1).unwrap();
    assert_eq!(collapsed.get("a").unwrap(), &[true]);
    assert_eq!(collapsed.get("b").unwrap(), &[true]);
}

#[test]
fn defragment_in_natural_order_is_identity_for_sorted_groups() {
    let groups = non_overlapping_group_map();
    assert_eq!(groups.defragment::<&str>(None).unwrap(), (0..12).collect::<Vec<_>>());
}

#[test]
fn defragment_in_given_order() {
    let groups = non_overlapping_group_map();
    let order = ["left_side", "right_side", "front_side", "back_side", "bottom", "top"];
    let ordering = groups.defragment(Some(&order[..])).unwrap();
    assert_eq!(ordering, vec![10, 11, 6, 7, 8, 9, 4, 5, 0, 1, 2, 3]);

    let mesh = cube().with_face_groups(Some(groups)).unwrap();
    let reordered = reindex_faces(&mesh, &ordering).unwrap();
    let reordered_groups = reordered.face_groups().unwrap();
    for (block, name) in order.iter().enumerate() {
        let expected: Vec<bool> = (0..12).map(|i| i / 2 == block).collect();
        assert_eq!(reordered_groups.get(name).unwrap(), expected.as_slice(), "{name}");
    }
    assert_eq!(reordered.faces().get(0), mesh.faces().get(10));
}

#[test]
fn defragment_places_ungrouped_elements_last() {
    let groups = GroupMap::from_mapping([("a", vec![3]), ("b", vec![1])], 5).unwrap();
    assert_eq!(groups.defragment::<&str>(None).unwrap(), vec![3, 1, 0, 2, 4]);
}

#[test]
fn defragment_rejects_incomplete_or_unknown_orders() {
    let groups = create_group_map();
    let err = groups
        .defragment(Some(&non_overlapping_group_names()[..]))
        .unwrap_err();
    assert_eq!(
        err,
        MeshError::GroupOrderMissing(vec!["sides".into(), "top_and_bottom".into()])
    );
    assert_eq!(
        err.to_string(),
        "group_order is missing groups: sides, top_and_bottom"
    );

    let groups = non_overlapping_group_map();
    let mut order = non_overlapping_group_names().to_vec();
    order.push("nope");
    assert_eq!(
        groups.defragment(Some(&order[..])).unwrap_err(),
        MeshError::GroupOrderUnknown(vec!["nope".into()])
    );
}

#[test]
fn defragment_rejects_overlaps() {
    let groups = create_group_map();
    let mut order = non_overlapping_group_names().to_vec();
    order.extend(["sides", "top_and_bottom", "empty"]);
    assert_eq!(
        groups.defragment(Some(&order[..])).unwrap_err().to_string(),
        "Group \"sides\" overlaps with previous groups"
    );
}

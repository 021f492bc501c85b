mod support;

use meshcore::{MeshError, Plane};
use nalgebra::{Point3, Vector3};
use support::{assert_subcube, cube, cube_with_groups};

#[test]
fn vertices_at_or_above_keeps_front_side() {
    let cube = cube();
    let submesh = cube
        .select()
        .vertices_at_or_above(&Point3::new(0.0, 0.0, 1.0), 2)
        .unwrap()
        .end(true)
        .unwrap();
    assert_subcube(&submesh, &[2, 3, 6, 7], &[8, 9]);
}

#[test]
fn provenance_maps_original_elements() {
    let cube = cube();
    let (submesh, face_provenance, vertex_provenance) = cube
        .select()
        .vertices_at_or_above(&Point3::new(0.0, 0.0, 1.0), 2)
        .unwrap()
        .end_with_provenance(true)
        .unwrap();
    assert_eq!(submesh.num_f(), 2);

    let mut expected_faces = vec![None; 12];
    expected_faces[8] = Some(0);
    expected_faces[9] = Some(1);
    assert_eq!(face_provenance, expected_faces);
    assert_eq!(
        vertex_provenance,
        vec![None, None, Some(0), Some(1), None, None, Some(2), Some(3)]
    );
}

#[test]
fn axis_predicates_compare_strictly_or_not() {
    let cube = cube();
    let on_boundary = Point3::new(0.0, 3.0, 0.0);
    let at_or_above = cube.keeping_vertices_at_or_above(1, &on_boundary).unwrap();
    assert_subcube(&at_or_above, &[4, 5, 6, 7], &[2, 3]);

    let above = cube.keeping_vertices_above(1, &on_boundary).unwrap();
    assert_eq!((above.num_v(), above.num_f()), (0, 0));

    let below = cube.keeping_vertices_below(1, &on_boundary).unwrap();
    assert_subcube(&below, &[0, 1, 2, 3], &[0, 1]);

    let at_or_below = cube.keeping_vertices_at_or_below(1, &on_boundary).unwrap();
    assert_eq!((at_or_below.num_v(), at_or_below.num_f()), (8, 12));
}

#[test]
fn invalid_axis_fails() {
    let cube = cube();
    for dim in [3, 7] {
        assert_eq!(
            cube.keeping_vertices_at_or_below(dim, &Point3::origin()).unwrap_err(),
            MeshError::InvalidAxis(dim)
        );
    }
}

#[test]
fn plane_predicates() {
    let cube = cube();
    let middle = Plane::from_point_and_normal(Point3::new(0.0, 0.0, 1.5), Vector3::z()).unwrap();
    let front = cube.keeping_vertices_in_front_of_plane(&middle).unwrap();
    assert_subcube(&front, &[2, 3, 6, 7], &[8, 9]);

    let far = Plane::from_point_and_normal(Point3::new(0.0, 0.0, 3.0), Vector3::z()).unwrap();
    let on_or_behind = cube.keeping_vertices_on_or_behind_plane(&far).unwrap();
    assert_eq!((on_or_behind.num_v(), on_or_behind.num_f()), (8, 12));

    let behind = cube.keeping_vertices_behind_plane(&far).unwrap();
    assert_subcube(&behind, &[0, 1, 4, 5], &[4, 5]);

    let on_or_in_front = cube.keeping_vertices_on_or_in_front_of_plane(&far).unwrap();
    assert_subcube(&on_or_in_front, &[2, 3, 6, 7], &[8, 9]);
}

#[test]
fn chained_predicates_intersect() {
    let cube = cube();
    let corner_edge = |prune| {
        cube.select()
            .vertices_at_or_above(&Point3::new(1.0, 0.0, 1.0), 2)
            .unwrap()
            .vertices_at_or_above(&Point3::new(1.0, 0.0, 1.0), 0)
            .unwrap()
            .end(prune)
            .unwrap()
    };

    // Vertices 2 and 6 survive the predicates but share no face.
    let pruned = corner_edge(true);
    assert_eq!((pruned.num_v(), pruned.num_f()), (0, 0));

    let unpruned = corner_edge(false);
    assert_subcube(&unpruned, &[2, 6], &[]);
}

#[test]
fn pruning_only_drops_orphans() {
    let cube = cube();
    let pruned = cube.select().pick_faces(&[0usize]).unwrap().end(true).unwrap();
    assert_subcube(&pruned, &[0, 1, 2], &[0]);

    let unpruned = cube.select().pick_faces(&[0usize]).unwrap().end(false).unwrap();
    assert_eq!((unpruned.num_v(), unpruned.num_f()), (8, 1));
}

#[test]
fn union_of_vertex_picks() {
    let cube = cube();
    let submesh = cube
        .select()
        .pick_vertices(&[0usize, 1, 2])
        .unwrap()
        .union()
        .pick_vertices(&[3usize, 4, 7])
        .unwrap()
        .end(true)
        .unwrap();
    assert_subcube(&submesh, &[0, 1, 2, 3, 4, 7], &[0, 1, 5, 10, 11]);
}

#[test]
fn union_of_face_picks() {
    let cube = cube();
    let submesh = cube
        .select()
        .pick_faces(&[0usize, 11])
        .unwrap()
        .union()
        .pick_faces(&[11usize, 10])
        .unwrap()
        .end(true)
        .unwrap();
    assert_subcube(&submesh, &[0, 1, 2, 3, 4, 7], &[0, 10, 11]);
}

#[test]
fn union_of_vertex_and_face_picks() {
    let cube = cube();
    let submesh = cube
        .select()
        .pick_vertices(&[0usize, 1, 2])
        .unwrap()
        .union()
        .pick_faces(&[11usize, 10])
        .unwrap()
        .end(true)
        .unwrap();
    assert_subcube(&submesh, &[0, 1, 2, 3, 4, 7], &[0, 1, 5, 10, 11]);
}

#[test]
fn picks_accept_masks() {
    let cube = cube();
    let mut mask = [false; 12];
    mask[2] = true;
    mask[3] = true;
    let top = cube.picking_faces(&mask).unwrap();
    assert_subcube(&top, &[4, 5, 6, 7], &[2, 3]);

    let vertex_mask = [true, true, true, true, false, false, false, false];
    let bottom = cube.picking_vertices(&vertex_mask).unwrap();
    assert_subcube(&bottom, &[0, 1, 2, 3], &[0, 1]);
}

#[test]
fn picks_are_validated() {
    let cube = cube();
    assert_eq!(
        cube.select().pick_vertices(&[true; 3]).unwrap_err(),
        MeshError::MaskLength {
            what: "vertices",
            expected: 8,
            actual: 3
        }
    );
    assert_eq!(
        cube.select().pick_faces(&[12usize]).unwrap_err().to_string(),
        "Expected indices in faces to be less than 12, got 12"
    );
}

#[test]
fn empty_pick_selects_nothing() {
    let cube = cube();
    let nothing: Vec<usize> = Vec::new();
    let submesh = cube.picking_vertices(&nothing).unwrap();
    assert_eq!((submesh.num_v(), submesh.num_f()), (0, 0));
}

#[test]
fn face_group_picks() {
    let cube = cube_with_groups();
    let top = cube.select().pick_face_groups(&["top"]).unwrap().end(true).unwrap();
    assert_subcube(&top, &[4, 5, 6, 7], &[2, 3]);

    let top_and_bottom = cube
        .select()
        .pick_face_groups(&["top", "bottom"])
        .unwrap()
        .end(true)
        .unwrap();
    assert_subcube(&top_and_bottom, &[0, 1, 2, 3, 4, 5, 6, 7], &[0, 1, 2, 3]);

    assert_eq!(
        cube.select()
            .pick_face_groups(&["top", "a", "b"])
            .unwrap_err()
            .to_string(),
        "Unknown groups: a, b"
    );
}

#[test]
fn vertices_of_face_groups_intersect() {
    let cube = cube_with_groups();
    let submesh = cube
        .select()
        .pick_vertices_of_face_groups(&["top"])
        .unwrap()
        .pick_vertices_of_face_groups(&["left_side"])
        .unwrap()
        .end(false)
        .unwrap();
    assert_subcube(&submesh, &[4, 7], &[]);
}

#[test]
fn face_groups_follow_the_selection() {
    let cube = cube_with_groups();
    let submesh = cube
        .select()
        .vertices_at_or_above(&Point3::new(0.0, 0.0, 1.0), 2)
        .unwrap()
        .end(true)
        .unwrap();
    let groups = submesh.face_groups().unwrap();
    assert_eq!(groups.num_elements(), 2);
    assert_eq!(groups.len(), 9);
    assert_eq!(groups.get("front_side").unwrap(), &[true, true]);
    assert_eq!(groups.get("sides").unwrap(), &[true, true]);
    assert_eq!(groups.get("top").unwrap(), &[false, false]);
}

#[test]
fn selection_does_not_touch_the_source() {
    let cube = cube_with_groups();
    let before = cube.clone();
    let _ = cube.picking_faces(&[1usize, 2]).unwrap();
    assert_eq!(cube, before);
}

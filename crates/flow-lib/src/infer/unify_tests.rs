use super::*;

fn dims<const N: usize>(tables: &mut Tables) -> [DimVar; N] {
    std::array::from_fn(|_| tables.define_dimension())
}

#[test]
fn unresolved_variable_follows_to_itself() {
    let mut tables = Tables::new();
    let d = tables.define_dimension();
    assert_eq!(tables.resolve_axis(Axis::Var(d)), Axis::Var(d));
    assert_eq!(format!("{d}"), "?d0");
}

#[test]
fn dimensions_and_ranks_use_separate_arenas() {
    let mut tables = Tables::new();
    let d = tables.define_dimension();
    let r = tables.define_shape_length();

    unify_rank(&mut tables, Rank::Var(r), Rank::Known(3)).unwrap();

    assert_eq!(tables.resolve_rank(Rank::Var(r)), Rank::Known(3));
    assert_eq!(tables.resolve_axis(Axis::Var(d)), Axis::Var(d));
}

#[test]
fn lower_index_survives_aliasing() {
    let mut tables = Tables::new();
    let [a, b] = dims(&mut tables);

    let forward = unify_axis(&mut tables, Axis::Var(b), Axis::Var(a)).unwrap();
    assert_eq!(forward, Axis::Var(a));
    assert_eq!(tables.resolve_axis(Axis::Var(b)), Axis::Var(a));
}

#[test]
fn chains_resolve_to_the_end() {
    let mut tables = Tables::new();
    let [a, b, c] = dims(&mut tables);

    unify_axis(&mut tables, Axis::Var(c), Axis::Var(b)).unwrap();
    unify_axis(&mut tables, Axis::Var(b), Axis::Var(a)).unwrap();
    unify_axis(&mut tables, Axis::Var(a), Axis::Known(7)).unwrap();

    assert_eq!(tables.resolve_axis(Axis::Var(c)), Axis::Known(7));
}

#[test]
fn elementwise_resolves_variable() {
    let mut tables = Tables::new();
    let d = tables.define_dimension();
    let a = Shape::from_axes(vec![Axis::Known(3), Axis::Var(d)]);
    let b = Shape::known(&[3, 4]);

    let merged = consolidate_shape(&mut tables, Some(&a), Some(&b)).unwrap();

    assert_eq!(merged, Some(Shape::known(&[3, 4])));
    assert_eq!(tables.resolve_axis(Axis::Var(d)), Axis::Known(4));
}

#[test]
fn consolidation_is_symmetric() {
    let build = || {
        let mut tables = Tables::new();
        let [p, q, r, s] = dims(&mut tables);
        let a = Shape::from_axes(vec![Axis::Var(p), Axis::Known(2), Axis::Var(r)]);
        let b = Shape::from_axes(vec![Axis::Var(q), Axis::Var(s), Axis::Known(5)]);
        (tables, a, b)
    };

    let (mut left_tables, a, b) = build();
    let left = consolidate_shape(&mut left_tables, Some(&a), Some(&b)).unwrap();
    let (mut right_tables, a, b) = build();
    let right = consolidate_shape(&mut right_tables, Some(&b), Some(&a)).unwrap();

    assert_eq!(left, right);
    insta::assert_snapshot!(left.unwrap(), @"[?d0, 2, 5]");
}

#[test]
fn dimension_clash() {
    let mut tables = Tables::new();
    let a = Shape::known(&[3, 4]);
    let b = Shape::known(&[3, 5]);

    let err = consolidate_shape(&mut tables, Some(&a), Some(&b)).unwrap_err();

    assert_eq!(err, UnifyError::DimensionClash { left: 4, right: 5 });
    insta::assert_snapshot!(err, @"axis of size 4 against axis of size 5");
}

#[test]
fn clash_after_binding() {
    let mut tables = Tables::new();
    let d = tables.define_dimension();
    unify_axis(&mut tables, Axis::Var(d), Axis::Known(4)).unwrap();

    let err = unify_axis(&mut tables, Axis::Known(6), Axis::Var(d)).unwrap_err();
    assert_eq!(err, UnifyError::DimensionClash { left: 6, right: 4 });
}

#[test]
fn rank_clash() {
    let mut tables = Tables::new();
    let a = Shape::with_rank(Rank::Known(2));
    let b = Shape::with_rank(Rank::Known(3));

    let err = consolidate_length(&mut tables, Some(&a), Some(&b)).unwrap_err();

    assert_eq!(err, UnifyError::ShapeLengthClash { left: 2, right: 3 });
}

#[test]
fn axis_count_mismatch_is_a_rank_clash() {
    let mut tables = Tables::new();
    let a = Shape::known(&[3, 4]);
    let b = Shape::known(&[3, 4, 5]);

    let err = consolidate_shape(&mut tables, Some(&a), Some(&b)).unwrap_err();
    assert_eq!(err, UnifyError::ShapeLengthClash { left: 2, right: 3 });
}

#[test]
fn absent_lengths_allocate_a_variable() {
    let mut tables = Tables::new();

    let shape = consolidate_length(&mut tables, None, None).unwrap();

    assert_eq!(shape.length, Rank::Var(RankVar::from_raw(0)));
    assert_eq!(tables.shape_lengths().len(), 1);
}

#[test]
fn one_sided_consolidation_returns_the_present_side() {
    let mut tables = Tables::new();
    let a = Shape::known(&[2]);

    assert_eq!(
        consolidate_shape(&mut tables, Some(&a), None).unwrap(),
        Some(a.clone())
    );
    assert_eq!(consolidate_shape(&mut tables, None, None).unwrap(), None);
    assert_eq!(consolidate_length(&mut tables, None, Some(&a)).unwrap(), a);
    assert!(tables.shape_lengths().is_empty());
}

#[test]
fn rank_variables_unify() {
    let mut tables = Tables::new();
    let r0 = tables.define_shape_length();
    let r1 = tables.define_shape_length();
    let a = Shape::with_rank(Rank::Var(r0));
    let b = Shape::with_rank(Rank::Var(r1));

    let merged = consolidate_length(&mut tables, Some(&b), Some(&a)).unwrap();
    assert_eq!(merged.length, Rank::Var(r0));

    let known = Shape::with_rank(Rank::Known(4));
    consolidate_length(&mut tables, Some(&merged), Some(&known)).unwrap();
    assert_eq!(tables.resolve_rank(Rank::Var(r1)), Rank::Known(4));
}

#[test]
fn shape_display() {
    let mut tables = Tables::new();
    let d = tables.define_dimension();
    let r = tables.define_shape_length();

    insta::assert_snapshot!(Shape::from_axes(vec![Axis::Known(3), Axis::Var(d)]), @"[3, ?d0]");
    insta::assert_snapshot!(Shape::with_rank(Rank::Known(2)), @"rank 2");
    insta::assert_snapshot!(Shape::with_rank(Rank::Var(r)), @"rank ?r0");
    insta::assert_snapshot!(Shape::known(&[]), @"[]");
}

#[test]
fn shape_json() {
    let mut tables = Tables::new();
    let d = tables.define_dimension();
    let seeded = Shape::from_axes(vec![Axis::Known(3), Axis::Var(d)]);
    let unseeded = Shape::with_rank(Rank::Known(2));

    insta::assert_snapshot!(serde_json::to_string(&seeded).unwrap(), @r#"{"rank":2,"dims":[3,"?d0"]}"#);
    insta::assert_snapshot!(serde_json::to_string(&unseeded).unwrap(), @r#"{"rank":2,"dims":null}"#);
}

use super::*;
use pretty_assertions::assert_eq;

fn name(text: &str) -> Name {
    Name::new(text)
}

#[test]
fn compose_applies_outer_to_inner_values() {
    let inner = Subst::singleton(name("a"), Type::arrow(Type::var("b"), Type::var("b")));
    let outer = Subst::singleton(name("b"), Type::int());
    let composed = outer.compose(&inner);

    assert_eq!(composed.get("a"), Some(&Type::arrow(Type::int(), Type::int())));
    assert_eq!(composed.get("b"), Some(&Type::int()));
}

#[test]
fn compose_outer_wins_on_collision() {
    let inner = Subst::singleton(name("a"), Type::bool());
    let outer = Subst::singleton(name("a"), Type::int());
    assert_eq!(outer.compose(&inner).get("a"), Some(&Type::int()));
}

#[test]
fn compose_equals_sequential_application() {
    let mut s1 = Subst::new();
    s1.insert(name("a"), Type::var("b"));
    s1.insert(name("c"), Type::tuple(vec![Type::var("a"), Type::var("d")]));
    let mut s2 = Subst::new();
    s2.insert(name("b"), Type::bool());
    s2.insert(name("d"), Type::arrow(Type::var("a"), Type::int()));

    let ty = Type::tuple(vec![Type::var("a"), Type::var("c"), Type::var("d")]);
    assert_eq!(ty.apply(&s2.compose(&s1)), ty.apply(&s1).apply(&s2));
}

#[test]
fn without_drops_named_bindings() {
    let mut subst = Subst::new();
    subst.insert(name("a"), Type::int());
    subst.insert(name("b"), Type::bool());
    let trimmed = subst.without(&[name("a")]);
    assert_eq!(trimmed.len(), 1);
    assert_eq!(trimmed.get("a"), None);
    assert_eq!(format!("{trimmed:?}"), "{\"b\": \"Bool\"}");
}

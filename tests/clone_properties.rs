use std::rc::Rc;

use proptest::{prelude::*, test_runner::TestCaseError};
use xsclone::xmlschemas::{
    UNBOUNDED, XmlSchema, XmlSchemaCompositor, XmlSchemaElement, XmlSchemaForm,
    XmlSchemaModelGroup, XmlSchemaNamespaceContext, XmlSchemaOccurs, XmlSchemaParticle,
    XmlSchemaQName, XmlSchemaWildcard, clone_particle, has_particle_ref,
};

fn arb_occurs() -> impl Strategy<Value = XmlSchemaOccurs> {
    (0..3i32, prop_oneof![Just(1), Just(2), Just(UNBOUNDED)])
        .prop_map(|(min, max)| XmlSchemaOccurs::new(min, max.max(min)))
}

fn arb_qname() -> impl Strategy<Value = XmlSchemaQName> {
    (prop_oneof![Just(""), Just("urn:a")], "[a-z]{1,4}")
        .prop_map(|(ns, name)| XmlSchemaQName::new(ns, name))
}

/// Leaves that never depend on the enclosing namespace.
fn arb_plain_leaf() -> BoxedStrategy<XmlSchemaParticle> {
    prop_oneof![
        ("[a-z]{1,4}", arb_occurs(), prop_oneof![
            Just(XmlSchemaForm::Unspecified),
            Just(XmlSchemaForm::Unqualified)
        ])
            .prop_map(|(name, occurs, form)| {
                XmlSchemaParticle::element(XmlSchemaElement {
                    occurs,
                    form,
                    ..XmlSchemaElement::local(name)
                })
            }),
        arb_occurs().prop_map(|occurs| XmlSchemaParticle::any(XmlSchemaWildcard {
            occurs,
            ..Default::default()
        })),
        Just(XmlSchemaParticle::Empty),
    ]
    .boxed()
}

fn arb_leaf() -> BoxedStrategy<XmlSchemaParticle> {
    prop_oneof![
        3 => arb_plain_leaf(),
        1 => arb_qname().prop_map(|name| XmlSchemaParticle::group_ref(name.into_ptr())),
        1 => arb_qname()
            .prop_map(|name| XmlSchemaParticle::element(XmlSchemaElement::reference(name.into_ptr()))),
        1 => arb_qname().prop_map(|name| XmlSchemaParticle::element(XmlSchemaElement {
            type_name: Some(name.into_ptr()),
            ..XmlSchemaElement::local("typed")
        })),
        1 => Just(XmlSchemaParticle::element(XmlSchemaElement {
            form: XmlSchemaForm::Qualified,
            ..XmlSchemaElement::local("qualified")
        })),
    ]
    .boxed()
}

fn arb_tree(leaf: BoxedStrategy<XmlSchemaParticle>) -> impl Strategy<Value = XmlSchemaParticle> {
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            prop_oneof![
                Just(XmlSchemaCompositor::Sequence),
                Just(XmlSchemaCompositor::Choice),
                Just(XmlSchemaCompositor::All)
            ],
            arb_occurs(),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(compositor, occurs, children)| {
                XmlSchemaParticle::ModelGroup(Rc::new(XmlSchemaModelGroup {
                    compositor,
                    occurs,
                    children,
                }))
            })
    })
}

/// Check shape preservation and the copy-or-share decision at every node.
fn check_node(
    old: &XmlSchemaParticle,
    new: &XmlSchemaParticle,
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(old.item_type(), new.item_type());
    prop_assert_eq!(old.occurs(), new.occurs());
    prop_assert_eq!(old.children().len(), new.children().len());

    let copied = has_particle_ref(old, ctx);
    match (old, new) {
        (XmlSchemaParticle::Any(_), _) | (XmlSchemaParticle::Empty, _) => {
            prop_assert!(old.ptr_eq(new));
        }
        _ => prop_assert_eq!(!copied, old.ptr_eq(new)),
    }
    if let (XmlSchemaParticle::GroupRef(old), XmlSchemaParticle::GroupRef(new)) = (old, new) {
        prop_assert_eq!(&old.ref_name, &new.ref_name);
        prop_assert!(!Rc::ptr_eq(&old.ref_name, &new.ref_name));
    }
    if let (XmlSchemaParticle::Element(old), XmlSchemaParticle::Element(new)) = (old, new) {
        prop_assert_eq!(&old.name, &new.name);
        prop_assert_eq!(&old.ref_name, &new.ref_name);
        prop_assert_eq!(&old.type_name, &new.type_name);
        prop_assert_eq!(old.form, new.form);
    }
    for (old, new) in old.children().iter().zip(new.children()) {
        check_node(old, new, ctx)?;
    }
    Ok(())
}

fn qualified_schema() -> XmlSchema {
    let mut schema = XmlSchema::new(Some("urn:target"));
    schema.set_element_form_default("qualified").unwrap();
    schema
}

proptest! {
    #[test]
    fn prop_reference_free_tree_is_shared(tree in arb_tree(arb_plain_leaf())) {
        prop_assert!(!has_particle_ref(&tree, None));
        prop_assert!(clone_particle(&tree, None).ptr_eq(&tree));
        let unqualified = XmlSchema::new(Some("urn:target"));
        prop_assert!(clone_particle(&tree, Some(&unqualified)).ptr_eq(&tree));
    }

    #[test]
    fn prop_clone_preserves_shape_and_shares_clean_subtrees(tree in arb_tree(arb_leaf())) {
        let clone = clone_particle(&tree, None);
        check_node(&tree, &clone, None)?;

        let schema = qualified_schema();
        let clone = clone_particle(&tree, Some(&schema));
        check_node(&tree, &clone, Some(&schema))?;
    }

    #[test]
    fn prop_detection_is_stable(tree in arb_tree(arb_leaf())) {
        let schema = qualified_schema();
        let before = has_particle_ref(&tree, Some(&schema));
        let _ = clone_particle(&tree, Some(&schema));
        prop_assert_eq!(before, has_particle_ref(&tree, Some(&schema)));
    }
}

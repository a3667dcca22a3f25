#[cfg(test)]
mod tests {
    use metamodel::{ClassDescriptor, ClassRef, Model, ModelError};
    use std::collections::{BTreeMap, BTreeSet};

    fn names<'a>(classes: impl IntoIterator<Item = ClassRef<'a>>) -> BTreeSet<String> {
        classes.into_iter().map(|c| c.name().to_string()).collect()
    }

    fn zoo() -> Vec<ClassDescriptor> {
        vec![
            ClassDescriptor::interface("Flier"),
            ClassDescriptor::interface("Swimmer"),
            ClassDescriptor::class("Animal"),
            ClassDescriptor::class("Mammal").extends("Animal"),
            ClassDescriptor::class("Bird").extends("Animal").implements("Flier"),
            ClassDescriptor::class("Bat").extends("Mammal").implements("Flier"),
            ClassDescriptor::class("Dolphin")
                .extends("Mammal")
                .implements("Swimmer"),
            ClassDescriptor::class("Duck")
                .extends("Bird")
                .implements("Swimmer")
                .implements("Flier"),
        ]
    }

    /// Subclass and implementor sets of every class, keyed by class name.
    fn derived_sets(model: &Model) -> BTreeMap<String, (BTreeSet<String>, BTreeSet<String>)> {
        model
            .all_classes()
            .into_iter()
            .map(|c| {
                (
                    c.name().to_string(),
                    (names(c.direct_subclasses()), names(c.direct_implementors())),
                )
            })
            .collect()
    }

    #[test]
    fn test_every_class_is_in_its_superclass_subclasses() {
        let model = Model::new("zoo", zoo()).unwrap();

        for class in model.all_classes() {
            if let Some(superclass) = class.superclass() {
                assert!(
                    superclass.direct_subclasses().contains(&class),
                    "{} missing from subclasses of {}",
                    class.name(),
                    superclass.name()
                );
            }

            // No other class lists it as a subclass
            for other in model.all_classes() {
                if other.direct_subclasses().contains(&class) {
                    assert_eq!(class.superclass(), Some(other));
                }
            }
        }
    }

    #[test]
    fn test_every_declared_interface_lists_its_implementor() {
        let model = Model::new("zoo", zoo()).unwrap();

        for class in model.all_classes() {
            for interface in class.interfaces() {
                assert!(interface.direct_implementors().contains(&class));
            }
            if !class.is_interface() {
                assert!(class.direct_implementors().is_empty());
            }
        }

        let flier = model.class("Flier").unwrap();
        assert_eq!(
            names(flier.direct_implementors()),
            BTreeSet::from(["Bat".to_string(), "Bird".to_string(), "Duck".to_string()])
        );
    }

    #[test]
    fn test_class_names_match_batch() {
        let batch = zoo();
        let expected: BTreeSet<&str> = batch.iter().map(|c| c.name()).collect();
        let model = Model::new("zoo", batch.clone()).unwrap();

        assert_eq!(model.class_names().len(), batch.len());
        assert_eq!(model.class_names(), expected);
        assert_eq!(model.all_classes().len(), batch.len());
    }

    #[test]
    fn test_repeated_queries_are_stable() {
        let model = Model::new("zoo", zoo()).unwrap();

        let first = (model.class_names(), derived_sets(&model));
        for _ in 0..3 {
            assert_eq!(model.class_names(), first.0);
            assert_eq!(derived_sets(&model), first.1);
            assert_eq!(model.class("Duck"), model.class("Duck"));
        }
    }

    #[test]
    fn test_order_independence() {
        let forward = Model::new("zoo", zoo()).unwrap();

        let mut reversed_batch = zoo();
        reversed_batch.reverse();
        let reversed = Model::new("zoo", reversed_batch).unwrap();

        let mut rotated_batch = zoo();
        rotated_batch.rotate_left(3);
        let rotated = Model::new("zoo", rotated_batch).unwrap();

        assert_eq!(derived_sets(&forward), derived_sets(&reversed));
        assert_eq!(derived_sets(&forward), derived_sets(&rotated));
    }

    #[test]
    fn test_subclasses_sorted_by_name() {
        let model = Model::new(
            "zoo",
            vec![
                ClassDescriptor::class("Zebra").extends("Animal"),
                ClassDescriptor::class("Animal"),
                ClassDescriptor::class("Aardvark").extends("Animal"),
                ClassDescriptor::class("Moose").extends("Animal"),
            ],
        )
        .unwrap();

        let subclasses: Vec<&str> = model
            .class("Animal")
            .unwrap()
            .direct_subclasses()
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(subclasses, vec!["Aardvark", "Moose", "Zebra"]);
    }

    #[test]
    fn test_superclass_cycle_links_both_ways() {
        let batch = vec![
            ClassDescriptor::class("A").extends("B"),
            ClassDescriptor::class("B").extends("A"),
        ];
        let model = Model::new("m", batch.clone()).unwrap();
        let mut reversed = batch;
        reversed.reverse();
        let other = Model::new("m", reversed).unwrap();

        let a = model.class("A").unwrap();
        let b = model.class("B").unwrap();
        assert_eq!(names(a.direct_subclasses()), BTreeSet::from(["B".to_string()]));
        assert_eq!(names(b.direct_subclasses()), BTreeSet::from(["A".to_string()]));
        assert_eq!(derived_sets(&model), derived_sets(&other));
        assert!(matches!(
            model.check_acyclic(),
            Err(ModelError::CyclicInheritance(_))
        ));
    }

    #[test]
    fn test_first_error_aborts_build() {
        // Both the duplicate and the unresolved superclass are wrong; the
        // duplicate is found during indexing, before any binding happens.
        let result = Model::new(
            "zoo",
            vec![
                ClassDescriptor::class("Dog").extends("Ghost"),
                ClassDescriptor::class("Dog"),
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            ModelError::DuplicateClassName("Dog".to_string())
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Model::new("zoo", vec![ClassDescriptor::class("Dog").extends("Ghost")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Class 'Dog' extends 'Ghost', which is not in the model"
        );

        let err = Model::new("", Vec::<ClassDescriptor>::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "A non-blank name must be supplied for the model"
        );
    }
}

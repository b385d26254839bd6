//! Initializer chaining under composition policies.
//!
//! The default policy chains undeclared fragment initializers parent-first;
//! the manual policy lets them replace the chain below. Declared chain modes
//! always win over the policy.

use admix_tests::prelude::*;

mod default_policy {
    use super::*;

    #[test]
    fn test_undeclared_initializers_chain_parent_first() {
        // GIVEN: a base with an initializer and a fragment with an undeclared one
        let base = model();
        let fragment = traced_fragment("capability");

        // WHEN: mixed under the default policy and instantiated
        let class = mix(&base, [&fragment]).unwrap();
        let instance = class.instantiate(&[]).unwrap();

        // THEN: the base initializer ran first
        assert_eq!(trace_of(&instance), vec!["model", "capability"]);
    }

    #[test]
    fn test_chain_runs_in_application_order() {
        // GIVEN: two traced fragments
        let base = model();
        let first = traced_fragment("first");
        let second = traced_fragment("second");

        // WHEN: both are mixed
        let class = mix(&base, [&first, &second]).unwrap();
        let instance = class.instantiate(&[]).unwrap();

        // THEN: initializers run rootward to leafward
        assert_eq!(trace_of(&instance), vec!["model", "first", "second"]);
    }

    #[test]
    fn test_declared_replace_wins_over_the_policy() {
        // GIVEN: a fragment that explicitly replaces the chain
        let base = model();
        let fragment = Fragment::build("takeover")
            .init(Initializer::replacing(|instance, _args| {
                trace(instance, "takeover");
                Ok(())
            }))
            .finish();

        // WHEN: mixed under the default policy
        let class = mix(&base, [&fragment]).unwrap();
        let instance = class.instantiate(&[]).unwrap();

        // THEN: the base initializer never ran
        assert_eq!(trace_of(&instance), vec!["takeover"]);
    }
}

mod manual_policy {
    use super::*;

    #[test]
    fn test_undeclared_initializers_replace_under_manual_policy() {
        // GIVEN: a fragment with an undeclared initializer
        let base = model();
        let fragment = traced_fragment("capability");

        // WHEN: mixed under the manual policy
        let class = mix_with(&base, [&fragment], MixPolicy::manual()).unwrap();
        let instance = class.instantiate(&[]).unwrap();

        // THEN: the fragment's initializer replaced the base's
        assert_eq!(trace_of(&instance), vec!["capability"]);
    }

    #[test]
    fn test_declared_parent_first_wins_over_manual_policy() {
        // GIVEN: a fragment that explicitly chains
        let base = model();
        let fragment = Fragment::build("polite")
            .init(Initializer::chained(|instance, _args| {
                trace(instance, "polite");
                Ok(())
            }))
            .finish();

        // WHEN: mixed under the manual policy
        let class = mix_with(&base, [&fragment], MixPolicy::manual()).unwrap();
        let instance = class.instantiate(&[]).unwrap();

        // THEN: the declared chain mode is honored
        assert_eq!(trace_of(&instance), vec!["model", "polite"]);
    }
}

mod extension_initializers {
    use super::*;

    #[test]
    fn test_extend_with_init_chains_after_mixed_fragments() {
        // GIVEN: a mixed class extended with its own initializer
        let base = model();
        let fragment = traced_fragment("capability");
        let class = mix(&base, [&fragment]).unwrap().extend_with_init(
            Members::new(),
            Initializer::chained(|instance, _args| {
                trace(instance, "own");
                Ok(())
            }),
        );

        // WHEN: instantiated
        let instance = class.instantiate(&[]).unwrap();

        // THEN: the whole chain ran, leaf last
        assert_eq!(trace_of(&instance), vec!["model", "capability", "own"]);
    }

    #[test]
    fn test_initializer_errors_propagate() {
        // GIVEN: a fragment whose initializer fails
        let base = model();
        let fragment = Fragment::build("broken")
            .init(Initializer::chained(|_instance, _args| {
                Err(ClassError::MethodFailed("boom".into()))
            }))
            .finish();

        // WHEN/THEN: instantiation surfaces the failure
        let class = mix(&base, [&fragment]).unwrap();
        let err = class.instantiate(&[]).unwrap_err();
        assert!(matches!(err, ClassError::MethodFailed(_)));
    }
}

//! Redefinition scenarios: call-through wrapping on classes and mixins.

use admix_tests::prelude::*;

mod call_through {
    use super::*;

    fn article() -> Class {
        let mut members = Members::new();
        members.insert(
            "render".into(),
            Member::method(|_instance, _args| Ok(Value::from("body"))),
        );
        model().extend(members)
    }

    #[test]
    fn test_redefined_method_sees_the_origin() {
        // GIVEN: a class with a render method
        let class = article();

        // WHEN: render is redefined to wrap the original output
        let wrapped = redefine(&class, |origin| {
            let mut members = Members::new();
            members.insert(
                "render".into(),
                Member::method(move |instance, args| {
                    let body = origin.call(instance, "render", args)?;
                    Ok(Value::from(format!(
                        "<article>{}</article>",
                        body.as_str().unwrap_or_default()
                    )))
                }),
            );
            members
        });

        // THEN: the override composes with the original
        let mut instance = wrapped.instantiate(&[]).unwrap();
        assert_eq!(
            instance.call("render", &[]).unwrap(),
            Value::String("<article>body</article>".into())
        );

        // AND: the original class is untouched
        let mut plain = class.instantiate(&[]).unwrap();
        assert_eq!(plain.call("render", &[]).unwrap(), Value::String("body".into()));
    }

    #[test]
    fn test_untouched_members_keep_resolving() {
        // GIVEN: a redefinition that names only one member
        let class = article().extend(data_members(props! { "title" => "t" }));
        let wrapped = redefine(&class, |_origin| Members::new());

        // THEN: everything else still resolves through the chain
        let instance = wrapped.instantiate(&[]).unwrap();
        assert_eq!(instance.get("title"), Some(Value::String("t".into())));
    }

    #[test]
    fn test_origin_exposes_prior_data_members() {
        // GIVEN: a class with a data member
        let class = model().extend(data_members(props! { "limit" => 10 }));

        // WHEN: a redefinition reads the prior member through the origin
        let wrapped = redefine(&class, |origin| {
            let prior = origin
                .get("limit")
                .and_then(Member::as_data)
                .and_then(Value::as_int)
                .unwrap_or(0);
            data_members(props! { "limit" => prior * 2 })
        });

        // THEN: the override was computed from the origin's value
        assert_eq!(
            wrapped.instantiate(&[]).unwrap().get("limit"),
            Some(Value::Int(20))
        );
    }
}

mod mixin_redefine {
    use super::*;

    #[test]
    fn test_mixin_redefine_layers_over_its_fragment() {
        // GIVEN: the editable mixin
        let mixin = Mixin::new(editable());

        // WHEN: its edit method is redefined to count double
        let loud = mixin.redefine(|origin| {
            let prior = origin.get("edit").cloned();
            let mut members = Members::new();
            members.insert(
                "edit".into(),
                Member::method(move |instance, args| {
                    if let Some(prior) = &prior {
                        prior.invoke(instance, args)?;
                    }
                    let edits = instance.get("edits").and_then(|v| v.as_int()).unwrap_or(0) + 1;
                    instance.set("edits", edits);
                    Ok(Value::Int(edits))
                }),
            );
            members
        });

        // THEN: mixing the redefined descriptor applies the layered behavior
        let class = mix(&model(), [&loud]).unwrap();
        let mut instance = class.instantiate(&[]).unwrap();
        assert_eq!(instance.call("edit", &[]).unwrap(), Value::Int(2));
    }
}

mod properties_view {
    use super::*;

    /// A view layer that runs an `_init_properties` hook during construction
    /// when the class chain defines one.
    fn properties_view(view: &Class) -> Class {
        view.extend_with_init(
            Members::new(),
            Initializer::chained(|instance, _args| {
                if instance.class().lookup("_init_properties").is_some() {
                    instance.call("_init_properties", &[])?;
                }
                Ok(())
            }),
        )
    }

    #[test]
    fn test_subclass_hook_runs_on_construction() {
        // GIVEN: a subclass of the properties view defining the hook
        let view = properties_view(&model());
        let mut members = Members::new();
        members.insert(
            "_init_properties".into(),
            Member::method(|instance, _args| {
                instance.set("ready", true);
                Ok(Value::Null)
            }),
        );
        let subclass = view.extend(members);

        // WHEN: an instance is constructed
        let instance = subclass.instantiate(&[]).unwrap();

        // THEN: the hook has run
        assert_eq!(instance.get("ready"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_view_without_hook_still_constructs() {
        // GIVEN: the properties view with no hook defined
        let view = properties_view(&model());

        // WHEN/THEN: construction succeeds without the hook
        let instance = view.instantiate(&[]).unwrap();
        assert_eq!(instance.get("ready"), None);
    }
}


use super::*;
use crate::test_support::{SampleContext, columns};

fn compile(predicate: &Predicate<'_, SampleContext>, context: &SampleContext) -> CompiledFilter {
    PredicateCompiler::new().compile(predicate, context)
}

#[test]
fn comparison_binds_its_value() {
    let predicate = Predicate::gt(&columns::LAST_LOGIN, 1_700_000_000);

    let filter = compile(&predicate, &SampleContext::default());

    assert_eq!(filter.sql, "last_login > ?");
    assert_eq!(filter.bindings, vec![Value::Long(1_700_000_000)]);
}

#[test]
fn comparison_uses_the_resolved_name() {
    let predicate = Predicate::ne(&columns::NAME, "root".to_string());

    let filter = compile(&predicate, &SampleContext::default());

    assert_eq!(filter.sql, "username <> ?");
    assert_eq!(filter.bindings, vec![Value::Text("root".into())]);
}

#[test]
fn inactive_columns_become_tautologies() {
    let mut context = SampleContext::default();
    context.set_empty_options(true, true, true);

    for predicate in [
        Predicate::eq(&columns::EMAIL, "a@b.c".to_string()),
        Predicate::lte(&columns::IS_LOCKED, 1),
        Predicate::eq_ignore_case(&columns::EMAIL, "A@B.C"),
        Predicate::is_null(&columns::LAST_LOGIN),
        Predicate::is_not_null(&columns::IS_LOCKED),
    ] {
        let filter = compile(&predicate, &context);

        assert_eq!(filter.sql, "1 = 1", "{predicate:?}");
        assert!(filter.bindings.is_empty(), "{predicate:?}");
    }
}

#[test]
fn used_column_with_empty_name_becomes_a_tautology() {
    let mut context = SampleContext::default();
    context.set_ip_unnamed(true);

    let predicate = Predicate::is_null(&columns::IP)
        & Predicate::eq(&columns::IP, "10.0.0.1".to_string())
        & Predicate::eq_ignore_case(&columns::IP, "LOCALHOST");
    let filter = compile(&predicate, &context);

    assert_eq!(filter.sql, "((1 = 1) AND (1 = 1)) AND (1 = 1)");
    assert!(filter.bindings.is_empty());
}

#[test]
fn inactive_column_keeps_the_tree_shape() {
    let mut context = SampleContext::default();
    context.set_empty_options(true, false, false);

    let predicate = (Predicate::eq(&columns::NAME, "Ada".to_string())
        & Predicate::is_null(&columns::EMAIL))
        | Predicate::gt(&columns::LAST_LOGIN, 5);
    let filter = compile(&predicate, &context);

    assert_eq!(
        filter.sql,
        "((username = ?) AND (1 = 1)) OR (last_login > ?)"
    );
    assert_eq!(
        filter.bindings,
        vec![Value::Text("Ada".into()), Value::Long(5)]
    );
}

#[test]
fn ignore_case_collation_follows_the_compiler_flag() {
    let context = SampleContext::default();
    let eq = Predicate::eq_ignore_case(&columns::NAME, "Ada");
    let ne = Predicate::ne_ignore_case(&columns::NAME, "Ada");

    let plain = PredicateCompiler::new();
    let nocase = PredicateCompiler::new().with_no_case_collation(true);

    assert_eq!(plain.compile(&eq, &context).sql, "username = ?");
    assert_eq!(plain.compile(&ne, &context).sql, "username <> ?");
    assert_eq!(
        nocase.compile(&eq, &context).sql,
        "username = ? COLLATE NOCASE"
    );
    assert_eq!(
        nocase.compile(&ne, &context).bindings,
        vec![Value::Text("Ada".into())]
    );
}

#[test]
fn null_checks_bind_nothing() {
    let context = SampleContext::default();

    let is_null = compile(&Predicate::is_null(&columns::EMAIL), &context);
    let not_null = compile(&Predicate::is_not_null(&columns::IP), &context);

    assert_eq!(is_null.sql, "email IS NULL");
    assert_eq!(not_null.sql, "ip IS NOT NULL");
    assert!(is_null.bindings.is_empty() && not_null.bindings.is_empty());
}

#[test]
fn always_true_is_a_tautology() {
    let filter = compile(&Predicate::always_true(), &SampleContext::default());

    assert_eq!(filter.sql, "1 = 1");
    assert_eq!(filter.placeholder_count(), 0);
}

#[test]
fn compiling_twice_is_deterministic() {
    let context = SampleContext::default();
    let predicate = Predicate::eq(&columns::ID, 3) | Predicate::eq(&columns::ID, 4);

    assert_eq!(compile(&predicate, &context), compile(&predicate, &context));
}
